//! Purchased-input sources: formulated feed and hatchery seed.
//!
//! Both are mass (or count) times a production factor. An explicit factor
//! override carries supplier or LCA data and wins over the registry.

use super::EmissionModel;
use super::helpers::require_non_negative;
use crate::common::period::AccountingCycle;
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedParameters {
    pub total_feed_kg: f64,
    #[serde(default)]
    pub feed_type: Option<String>,
    #[serde(default)]
    pub emission_factor_override: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeedParameters", into = "FeedParameters")]
pub struct FeedInputs {
    parameters: FeedParameters,
}

impl FeedInputs {
    pub fn new(parameters: FeedParameters) -> FootprintResult<Self> {
        require_non_negative(
            parameters.total_feed_kg,
            "INPUT.FEED_TOTAL_KG",
            "total_feed_kg",
        )?;
        if let Some(factor) = parameters.emission_factor_override {
            require_non_negative(factor, "INPUT.FEED_FACTOR", "feed emission_factor_override")?;
        }
        if parameters
            .feed_type
            .as_deref()
            .is_some_and(|feed_type| feed_type.trim().is_empty())
        {
            return Err(FootprintError::invalid_input(
                "INPUT.FEED_TYPE",
                "feed_type must not be empty when provided",
            ));
        }
        Ok(Self { parameters })
    }

    pub fn total(total_feed_kg: f64) -> FootprintResult<Self> {
        Self::new(FeedParameters {
            total_feed_kg,
            ..FeedParameters::default()
        })
    }

    pub fn parameters(&self) -> &FeedParameters {
        &self.parameters
    }

    pub fn emission_factor(&self, factors: &dyn EmissionFactorLookup) -> FootprintResult<f64> {
        match self.parameters.emission_factor_override {
            Some(factor) => Ok(factor),
            None => factors.feed_factor(self.parameters.feed_type.as_deref()),
        }
    }
}

impl TryFrom<FeedParameters> for FeedInputs {
    type Error = FootprintError;

    fn try_from(parameters: FeedParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<FeedInputs> for FeedParameters {
    fn from(inputs: FeedInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for FeedInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Feed
    }

    fn estimate(
        &self,
        _cycle: &AccountingCycle,
        factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        let factor = self.emission_factor(factors)?;
        Ok(ComponentEmission::new(
            self.source(),
            self.parameters.total_feed_kg * factor,
            Activity::new(self.parameters.total_feed_kg, ActivityUnit::KgFeed),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedParameters {
    pub thousand_post_larvae: f64,
    #[serde(default)]
    pub emission_factor_override: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeedParameters", into = "SeedParameters")]
pub struct SeedInputs {
    parameters: SeedParameters,
}

impl SeedInputs {
    pub fn new(parameters: SeedParameters) -> FootprintResult<Self> {
        require_non_negative(
            parameters.thousand_post_larvae,
            "INPUT.SEED_THOUSAND_PL",
            "thousand_post_larvae",
        )?;
        if let Some(factor) = parameters.emission_factor_override {
            require_non_negative(factor, "INPUT.SEED_FACTOR", "seed emission_factor_override")?;
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &SeedParameters {
        &self.parameters
    }
}

impl TryFrom<SeedParameters> for SeedInputs {
    type Error = FootprintError;

    fn try_from(parameters: SeedParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<SeedInputs> for SeedParameters {
    fn from(inputs: SeedInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for SeedInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Seed
    }

    fn estimate(
        &self,
        _cycle: &AccountingCycle,
        factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        let factor = self
            .parameters
            .emission_factor_override
            .unwrap_or_else(|| factors.seed_factor());
        Ok(ComponentEmission::new(
            self.source(),
            self.parameters.thousand_post_larvae * factor,
            Activity::new(
                self.parameters.thousand_post_larvae,
                ActivityUnit::ThousandPostLarvae,
            ),
        ))
    }
}
