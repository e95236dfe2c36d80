pub mod errors;

pub use errors::{FootprintError, FootprintErrorCategory, FootprintResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Accounting basis of the supplied quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Cycle,
    #[serde(alias = "year")]
    Annual,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cycle => "cycle",
            Self::Annual => "annual",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    #[default]
    Grid,
    Diesel,
    Petrol,
    /// On-site generation (solar PV and similar).
    #[serde(alias = "on_site")]
    Solar,
}

impl EnergySource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
            Self::Solar => "solar",
        }
    }
}

impl Display for EnergySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionSource {
    Pumping,
    Aeration,
    Feed,
    Seed,
    Soil,
    PondGas,
    Sequestration,
}

impl EmissionSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pumping => "pumping",
            Self::Aeration => "aeration",
            Self::Feed => "feed",
            Self::Seed => "seed",
            Self::Soil => "soil",
            Self::PondGas => "pond_gas",
            Self::Sequestration => "sequestration",
        }
    }

    /// Error code of the input block this source is computed from.
    pub const fn input_placeholder(self) -> &'static str {
        match self {
            Self::Pumping => "INPUT.PUMPING",
            Self::Aeration => "INPUT.AERATION",
            Self::Feed => "INPUT.FEED",
            Self::Seed => "INPUT.SEED",
            Self::Soil => "INPUT.SOIL",
            Self::PondGas => "INPUT.POND_GAS",
            Self::Sequestration => "INPUT.SEQUESTRATION",
        }
    }
}

impl Display for EmissionSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityUnit {
    Kwh,
    KgFeed,
    ThousandPostLarvae,
    Hectare,
    SquareMetreDays,
}

impl ActivityUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kwh => "kWh",
            Self::KgFeed => "kg feed",
            Self::ThousandPostLarvae => "thousand PL",
            Self::Hectare => "ha",
            Self::SquareMetreDays => "m2 day",
        }
    }
}

/// Physical quantity a component was derived from, kept for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub quantity: f64,
    pub unit: ActivityUnit,
}

impl Activity {
    pub const fn new(quantity: f64, unit: ActivityUnit) -> Self {
        Self { quantity, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentEmission {
    source: EmissionSource,
    value_kgco2e: f64,
    activity: Activity,
}

impl ComponentEmission {
    pub const fn new(source: EmissionSource, value_kgco2e: f64, activity: Activity) -> Self {
        Self {
            source,
            value_kgco2e,
            activity,
        }
    }

    pub const fn source(&self) -> EmissionSource {
        self.source
    }

    pub const fn value_kgco2e(&self) -> f64 {
        self.value_kgco2e
    }

    pub const fn activity(&self) -> Activity {
        self.activity
    }
}

/// Outcome of one `Estimator::estimate` call.
///
/// `total_emissions_kgco2e` is always the left-to-right sum of the breakdown
/// values, and `intensity_kgco2e_per_kg_shrimp` is that total over the
/// harvested biomass. Both are computed once in [`EstimationResult::aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EstimationResultRecord")]
pub struct EstimationResult {
    period: Period,
    cycle_days: u32,
    harvested_shrimp_kg: f64,
    total_emissions_kgco2e: f64,
    intensity_kgco2e_per_kg_shrimp: f64,
    breakdown: Vec<ComponentEmission>,
}

impl EstimationResult {
    pub(crate) fn aggregate(
        period: Period,
        cycle_days: u32,
        harvested_shrimp_kg: f64,
        breakdown: Vec<ComponentEmission>,
    ) -> FootprintResult<Self> {
        if harvested_shrimp_kg == 0.0 {
            return Err(FootprintError::undefined_intensity(
                "INPUT.HARVESTED_SHRIMP_KG",
                "intensity is undefined for a cycle with zero harvested biomass",
            ));
        }

        if let Some(component) = breakdown
            .iter()
            .find(|component| !component.value_kgco2e.is_finite())
        {
            return Err(FootprintError::invalid_input(
                component.source.input_placeholder(),
                format!(
                    "{} emissions are not finite ({} kgCO2e); check the magnitude of its inputs",
                    component.source, component.value_kgco2e
                ),
            ));
        }

        let total_emissions_kgco2e = sum_breakdown(&breakdown);
        if !total_emissions_kgco2e.is_finite() {
            return Err(FootprintError::invalid_input(
                "OUTPUT.TOTAL_EMISSIONS",
                format!(
                    "total emissions overflow ({} kgCO2e over {} components)",
                    total_emissions_kgco2e,
                    breakdown.len()
                ),
            ));
        }
        let intensity_kgco2e_per_kg_shrimp = total_emissions_kgco2e / harvested_shrimp_kg;
        if !intensity_kgco2e_per_kg_shrimp.is_finite() {
            return Err(FootprintError::undefined_intensity(
                "INPUT.HARVESTED_SHRIMP_KG",
                format!(
                    "intensity is not finite (total {} kgCO2e over {} kg)",
                    total_emissions_kgco2e, harvested_shrimp_kg
                ),
            ));
        }

        Ok(Self {
            period,
            cycle_days,
            harvested_shrimp_kg,
            total_emissions_kgco2e,
            intensity_kgco2e_per_kg_shrimp,
            breakdown,
        })
    }

    pub const fn period(&self) -> Period {
        self.period
    }

    pub const fn cycle_days(&self) -> u32 {
        self.cycle_days
    }

    pub const fn harvested_shrimp_kg(&self) -> f64 {
        self.harvested_shrimp_kg
    }

    pub const fn total_emissions_kgco2e(&self) -> f64 {
        self.total_emissions_kgco2e
    }

    pub const fn intensity_kgco2e_per_kg_shrimp(&self) -> f64 {
        self.intensity_kgco2e_per_kg_shrimp
    }

    pub fn breakdown(&self) -> &[ComponentEmission] {
        &self.breakdown
    }

    pub fn component(&self, source: EmissionSource) -> Option<&ComponentEmission> {
        self.breakdown
            .iter()
            .find(|component| component.source == source)
    }

    pub fn value_for(&self, source: EmissionSource) -> Option<f64> {
        self.component(source)
            .map(|component| component.value_kgco2e)
    }
}

/// Wire form of [`EstimationResult`]. A parsed record is only accepted when
/// re-aggregating its breakdown reproduces the stored total and intensity.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EstimationResultRecord {
    period: Period,
    cycle_days: u32,
    harvested_shrimp_kg: f64,
    total_emissions_kgco2e: f64,
    intensity_kgco2e_per_kg_shrimp: f64,
    breakdown: Vec<ComponentEmission>,
}

impl TryFrom<EstimationResultRecord> for EstimationResult {
    type Error = FootprintError;

    fn try_from(record: EstimationResultRecord) -> FootprintResult<Self> {
        if record.cycle_days == 0 {
            return Err(FootprintError::invalid_input(
                "OUTPUT.RESULT_FORMAT",
                "cycle_days must be positive",
            ));
        }
        if !record.harvested_shrimp_kg.is_finite() || record.harvested_shrimp_kg <= 0.0 {
            return Err(FootprintError::invalid_input(
                "OUTPUT.RESULT_FORMAT",
                format!(
                    "harvested_shrimp_kg must be finite and > 0, got {}",
                    record.harvested_shrimp_kg
                ),
            ));
        }

        let result = Self::aggregate(
            record.period,
            record.cycle_days,
            record.harvested_shrimp_kg,
            record.breakdown,
        )
        .map_err(|error| FootprintError::invalid_input("OUTPUT.RESULT_FORMAT", error.to_string()))?;

        if result.total_emissions_kgco2e.to_bits() != record.total_emissions_kgco2e.to_bits() {
            return Err(FootprintError::invalid_input(
                "OUTPUT.RESULT_FORMAT",
                format!(
                    "total_emissions_kgco2e {} does not match the breakdown sum {}",
                    record.total_emissions_kgco2e, result.total_emissions_kgco2e
                ),
            ));
        }
        if result.intensity_kgco2e_per_kg_shrimp.to_bits()
            != record.intensity_kgco2e_per_kg_shrimp.to_bits()
        {
            return Err(FootprintError::invalid_input(
                "OUTPUT.RESULT_FORMAT",
                format!(
                    "intensity_kgco2e_per_kg_shrimp {} does not match total / harvested {}",
                    record.intensity_kgco2e_per_kg_shrimp, result.intensity_kgco2e_per_kg_shrimp
                ),
            ));
        }
        Ok(result)
    }
}

pub fn sum_breakdown(breakdown: &[ComponentEmission]) -> f64 {
    breakdown
        .iter()
        .fold(0.0, |total, component| total + component.value_kgco2e)
}
