//! Carbon removals by vegetation kept or restored on the farm.
//!
//! The annual removal is biomass carbon (above ground plus root share) times
//! a growth rate; it enters the breakdown as a negative value.

use super::EmissionModel;
use super::helpers::require_non_negative;
use crate::common::constants::{CARBON_TO_CO2, KG_PER_TONNE};
use crate::common::period::AccountingCycle;
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VegetationType {
    Mangroves,
    TropicalForests,
    Grasslands,
    Wetlands,
    TemperateForests,
    Peatlands,
}

impl VegetationType {
    /// Above-ground biomass carbon, tC/ha.
    pub const fn above_ground_tc_per_ha(self) -> f64 {
        match self {
            Self::Mangroves => 150.0,
            Self::TropicalForests => 120.0,
            Self::Grasslands => 40.0,
            Self::Wetlands => 60.0,
            Self::TemperateForests => 100.0,
            Self::Peatlands => 70.0,
        }
    }

    pub const fn root_to_shoot(self) -> f64 {
        match self {
            Self::Mangroves => 0.45,
            Self::TropicalForests => 0.24,
            Self::Grasslands => 0.20,
            Self::Wetlands => 0.50,
            Self::TemperateForests => 0.25,
            Self::Peatlands => 0.30,
        }
    }

    /// Fraction of the standing stock added per year.
    pub const fn growth_rate(self) -> f64 {
        match self {
            Self::Mangroves | Self::TropicalForests => 0.015,
            Self::Grasslands => 0.03,
            Self::Wetlands | Self::TemperateForests => 0.02,
            Self::Peatlands => 0.01,
        }
    }

    pub fn biomass_tc_per_ha(self) -> f64 {
        let above_ground = self.above_ground_tc_per_ha();
        above_ground + above_ground * self.root_to_shoot()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequestrationParameters {
    pub vegetation_type: VegetationType,
    pub area_ha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SequestrationParameters", into = "SequestrationParameters")]
pub struct SequestrationInputs {
    parameters: SequestrationParameters,
}

impl SequestrationInputs {
    pub fn new(parameters: SequestrationParameters) -> FootprintResult<Self> {
        require_non_negative(parameters.area_ha, "INPUT.SEQUESTRATION_AREA", "area_ha")?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &SequestrationParameters {
        &self.parameters
    }

    /// Annual removal as a positive kgCO2e figure.
    pub fn annual_removal_kgco2e(&self) -> f64 {
        let vegetation = self.parameters.vegetation_type;
        let annual_tc =
            vegetation.biomass_tc_per_ha() * vegetation.growth_rate() * self.parameters.area_ha;
        annual_tc * CARBON_TO_CO2 * KG_PER_TONNE
    }
}

impl TryFrom<SequestrationParameters> for SequestrationInputs {
    type Error = FootprintError;

    fn try_from(parameters: SequestrationParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<SequestrationInputs> for SequestrationParameters {
    fn from(inputs: SequestrationInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for SequestrationInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Sequestration
    }

    fn estimate(
        &self,
        cycle: &AccountingCycle,
        _factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        Ok(ComponentEmission::new(
            self.source(),
            -(self.annual_removal_kgco2e() * cycle.fraction_of_year()),
            Activity::new(self.parameters.area_ha, ActivityUnit::Hectare),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{SequestrationInputs, SequestrationParameters, VegetationType};
    use crate::common::period::AccountingCycle;
    use crate::domain::Period;
    use crate::modules::EmissionModel;
    use crate::registry::EmissionFactorRegistry;

    #[test]
    fn mangrove_removal_matches_biomass_growth() {
        let inputs = SequestrationInputs::new(SequestrationParameters {
            vegetation_type: VegetationType::Mangroves,
            area_ha: 1.0,
        })
        .expect("sequestration should validate");

        let expected = (150.0 + 150.0 * 0.45) * 0.015 * 3.67 * 1_000.0;
        assert!((inputs.annual_removal_kgco2e() - expected).abs() <= 1.0e-9 * expected);
    }

    #[test]
    fn removal_is_negative_and_scaled_to_cycle() {
        let inputs = SequestrationInputs::new(SequestrationParameters {
            vegetation_type: VegetationType::Grasslands,
            area_ha: 2.0,
        })
        .expect("sequestration should validate");
        let cycle = AccountingCycle::normalize(Period::Cycle, Some(73)).expect("cycle");
        let registry = EmissionFactorRegistry::builtin();

        let component = inputs
            .estimate(&cycle, &registry)
            .expect("estimate should succeed");
        assert!(component.value_kgco2e() < 0.0);
        let expected = inputs.annual_removal_kgco2e() * 0.2;
        assert!((component.value_kgco2e() + expected).abs() <= 1.0e-9 * expected);
    }

    #[test]
    fn negative_area_is_rejected() {
        assert!(
            SequestrationInputs::new(SequestrationParameters {
                vegetation_type: VegetationType::Wetlands,
                area_ha: -0.5,
            })
            .is_err()
        );
    }
}
