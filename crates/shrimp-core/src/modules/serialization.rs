//! JSON boundary for scenarios and results.
//!
//! Floats are written with shortest round-trip formatting and parsed with
//! `float_roundtrip`, so a result read back is bit-identical to the one
//! written.

use super::estimator::EstimatorInputs;
use crate::domain::{EstimationResult, FootprintError, FootprintResult};
use crate::registry::EmissionFactorTable;

/// Pretty JSON with a single trailing newline.
pub fn result_to_json(result: &EstimationResult) -> FootprintResult<String> {
    let rendered = serde_json::to_string_pretty(result).map_err(|source| {
        FootprintError::invalid_input(
            "OUTPUT.RESULT_FORMAT",
            format!("failed to render estimation result: {source}"),
        )
    })?;
    Ok(normalize_text_artifact(&rendered))
}

pub fn result_from_json_str(source: &str) -> FootprintResult<EstimationResult> {
    serde_json::from_str(source).map_err(|error| {
        FootprintError::invalid_input(
            "OUTPUT.RESULT_FORMAT",
            format!("invalid estimation result JSON: {error}"),
        )
    })
}

/// Parses a scenario. Field validation runs during deserialization, so its
/// messages surface here with the JSON position attached.
pub fn inputs_from_json_str(source: &str) -> FootprintResult<EstimatorInputs> {
    serde_json::from_str(source).map_err(|error| {
        FootprintError::invalid_input(
            "INPUT.SCENARIO_FORMAT",
            format!("invalid scenario JSON: {error}"),
        )
    })
}

pub fn inputs_to_json(inputs: &EstimatorInputs) -> FootprintResult<String> {
    let rendered = serde_json::to_string_pretty(inputs).map_err(|source| {
        FootprintError::invalid_input(
            "INPUT.SCENARIO_FORMAT",
            format!("failed to render scenario: {source}"),
        )
    })?;
    Ok(normalize_text_artifact(&rendered))
}

pub fn factor_table_to_json(table: &EmissionFactorTable) -> FootprintResult<String> {
    let rendered = serde_json::to_string_pretty(table).map_err(|source| {
        FootprintError::invalid_input(
            "FACTOR.TABLE_FORMAT",
            format!("failed to render factor table: {source}"),
        )
    })?;
    Ok(normalize_text_artifact(&rendered))
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}
