use crate::domain::{FootprintError, FootprintResult};

pub(crate) fn require_finite(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be a finite number, got {}", name, value),
        ))
    }
}

pub(crate) fn require_positive(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    let value = require_finite(value, placeholder, name)?;
    if value <= 0.0 {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be > 0, got {}", name, value),
        ));
    }
    Ok(value)
}

pub(crate) fn require_non_negative(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    let value = require_finite(value, placeholder, name)?;
    if value < 0.0 {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be >= 0, got {}", name, value),
        ));
    }
    Ok(value)
}

/// Efficiencies lie in (0, 1].
pub(crate) fn require_efficiency(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    let value = require_finite(value, placeholder, name)?;
    if value <= 0.0 || value > 1.0 {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be in (0, 1], got {}", name, value),
        ));
    }
    Ok(value)
}

pub(crate) fn require_fraction(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    let value = require_finite(value, placeholder, name)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be in [0, 1], got {}", name, value),
        ));
    }
    Ok(value)
}

pub(crate) fn require_hours_per_day(
    value: f64,
    placeholder: &'static str,
    name: &str,
) -> FootprintResult<f64> {
    let value = require_finite(value, placeholder, name)?;
    if value <= 0.0 || value > 24.0 {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("{} must be in (0, 24], got {}", name, value),
        ));
    }
    Ok(value)
}
