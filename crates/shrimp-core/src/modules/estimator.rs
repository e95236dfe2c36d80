//! Cycle footprint aggregation.
//!
//! [`Estimator`] owns the factor lookup. [`EstimatorInputs`] carries the
//! validated scenario; each enabled sub-model is evaluated in a fixed order
//! and the components are summed into an [`EstimationResult`].

use super::EmissionModel;
use super::aeration::AerationInputs;
use super::feed::{FeedInputs, SeedInputs};
use super::pond_gas::PondGasInputs;
use super::pumping::PumpingModelInputs;
use super::sequestration::SequestrationInputs;
use super::soil::SoilInputs;
use crate::common::period::AccountingCycle;
use crate::domain::{EstimationResult, FootprintError, FootprintResult, Period};
use crate::registry::{EmissionFactorLookup, EmissionFactorRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorParameters {
    pub harvested_shrimp_kg: f64,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub cycle_days: Option<u32>,
    pub feed: FeedInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pumping: Option<PumpingModelInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aeration: Option<AerationInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pond_gas: Option<PondGasInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequestration: Option<SequestrationInputs>,
}

impl EstimatorParameters {
    /// Minimal scenario: harvest, cycle length and feed only.
    pub fn new(harvested_shrimp_kg: f64, cycle_days: u32, feed: FeedInputs) -> Self {
        Self {
            harvested_shrimp_kg,
            period: Period::Cycle,
            cycle_days: Some(cycle_days),
            feed,
            seed: None,
            pumping: None,
            aeration: None,
            soil: None,
            pond_gas: None,
            sequestration: None,
        }
    }
}

/// Validated scenario for one accounting period.
///
/// Harvest sign and finiteness are checked here. The period and a zero
/// harvest are only rejected by [`Estimator::estimate`], so a scenario file
/// always parses into inputs that can be inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EstimatorParameters", into = "EstimatorParameters")]
pub struct EstimatorInputs {
    parameters: EstimatorParameters,
}

impl EstimatorInputs {
    pub fn new(parameters: EstimatorParameters) -> FootprintResult<Self> {
        let harvested = parameters.harvested_shrimp_kg;
        if !harvested.is_finite() || harvested < 0.0 {
            return Err(FootprintError::invalid_input(
                "INPUT.HARVESTED_SHRIMP_KG",
                format!("harvested_shrimp_kg must be a finite value >= 0, got {harvested}"),
            ));
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &EstimatorParameters {
        &self.parameters
    }

    pub fn harvested_shrimp_kg(&self) -> f64 {
        self.parameters.harvested_shrimp_kg
    }

    /// Enabled sub-models in breakdown order.
    pub fn models(&self) -> Vec<&dyn EmissionModel> {
        let parameters = &self.parameters;
        let mut models: Vec<&dyn EmissionModel> = Vec::with_capacity(7);
        if let Some(pumping) = &parameters.pumping {
            models.push(pumping);
        }
        if let Some(aeration) = &parameters.aeration {
            models.push(aeration);
        }
        models.push(&parameters.feed);
        if let Some(seed) = &parameters.seed {
            models.push(seed);
        }
        if let Some(soil) = &parameters.soil {
            models.push(soil);
        }
        if let Some(pond_gas) = &parameters.pond_gas {
            models.push(pond_gas);
        }
        if let Some(sequestration) = &parameters.sequestration {
            models.push(sequestration);
        }
        models
    }
}

impl TryFrom<EstimatorParameters> for EstimatorInputs {
    type Error = FootprintError;

    fn try_from(parameters: EstimatorParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<EstimatorInputs> for EstimatorParameters {
    fn from(inputs: EstimatorInputs) -> Self {
        inputs.parameters
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimator<R = EmissionFactorRegistry> {
    factors: R,
}

impl<R: EmissionFactorLookup> Estimator<R> {
    pub fn new(factors: R) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &R {
        &self.factors
    }

    pub fn estimate(&self, inputs: &EstimatorInputs) -> FootprintResult<EstimationResult> {
        let harvested = inputs.harvested_shrimp_kg();
        if harvested == 0.0 {
            return Err(FootprintError::undefined_intensity(
                "INPUT.HARVESTED_SHRIMP_KG",
                "intensity is undefined for a cycle with zero harvested biomass",
            ));
        }

        let parameters = inputs.parameters();
        let cycle = AccountingCycle::normalize(parameters.period, parameters.cycle_days)?;

        let breakdown = inputs
            .models()
            .into_iter()
            .map(|model| model.estimate(&cycle, &self.factors))
            .collect::<FootprintResult<Vec<_>>>()?;

        EstimationResult::aggregate(cycle.period(), cycle.days(), harvested, breakdown)
    }
}

impl Estimator {
    /// Estimator over the built-in factor table.
    pub fn builtin() -> Self {
        Self::new(EmissionFactorRegistry::builtin())
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::builtin()
    }
}
