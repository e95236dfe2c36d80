//! Land-use change: soil organic carbon lost when the pond area was converted.
//!
//! The stock change is either measured by the geospatial collaborator or
//! taken from the soil-type defaults (three SOC layers, tC/ha). The loss is
//! then allocated to the accounting period, linearly over the amortization
//! horizon unless a front-loaded schedule is requested.

use super::EmissionModel;
use super::helpers::{require_finite, require_fraction, require_non_negative};
use crate::common::constants::{CARBON_TO_CO2, DAYS_PER_YEAR, KG_PER_TONNE};
use crate::common::period::AccountingCycle;
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use serde::{Deserialize, Serialize};

const DEFAULT_AMORTIZATION_YEARS: u32 = 20;
const DEFAULT_IMMEDIATE_RELEASE_FRACTION: f64 = 0.7;
const DEFAULT_IMMEDIATE_WINDOW_YEARS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Desert,
    Tropical,
    Temperate,
    Boreal,
    Peatland,
    Mangrove,
}

impl SoilType {
    pub const fn soc_layers_tc_per_ha(self) -> [f64; 3] {
        match self {
            Self::Desert => [10.0, 8.0, 6.0],
            Self::Tropical => [70.0, 55.0, 40.0],
            Self::Temperate => [85.0, 70.0, 50.0],
            Self::Boreal => [200.0, 150.0, 100.0],
            Self::Peatland => [500.0, 400.0, 300.0],
            Self::Mangrove => [300.0, 250.0, 200.0],
        }
    }

    /// Full loss of the default stock, in tCO2e per hectare.
    pub fn stock_tco2e_per_ha(self) -> f64 {
        self.soc_layers_tc_per_ha().iter().sum::<f64>() * CARBON_TO_CO2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoilCarbonStock {
    Measured { stock_change_tco2e_per_ha: f64 },
    SoilType { soil_type: SoilType },
}

impl SoilCarbonStock {
    pub fn stock_change_tco2e_per_ha(&self) -> f64 {
        match self {
            Self::Measured {
                stock_change_tco2e_per_ha,
            } => *stock_change_tco2e_per_ha,
            Self::SoilType { soil_type } => soil_type.stock_tco2e_per_ha(),
        }
    }
}

fn default_immediate_release_fraction() -> f64 {
    DEFAULT_IMMEDIATE_RELEASE_FRACTION
}

fn default_immediate_window_years() -> f64 {
    DEFAULT_IMMEDIATE_WINDOW_YEARS
}

fn default_amortization_years() -> u32 {
    DEFAULT_AMORTIZATION_YEARS
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "schedule", rename_all = "snake_case")]
pub enum ReleaseSchedule {
    #[default]
    Linear,
    /// Recent conversions release `immediate_release_fraction` of the stock
    /// in the current year; the remainder is spread over the amortization
    /// horizon while the farm is still inside it.
    FrontLoaded {
        years_since_conversion: f64,
        #[serde(default = "default_immediate_release_fraction")]
        immediate_release_fraction: f64,
        #[serde(default = "default_immediate_window_years")]
        immediate_window_years: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilParameters {
    pub stock: SoilCarbonStock,
    pub area_ha: f64,
    #[serde(default = "default_amortization_years")]
    pub amortization_years: u32,
    #[serde(default)]
    pub release: ReleaseSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SoilParameters", into = "SoilParameters")]
pub struct SoilInputs {
    parameters: SoilParameters,
}

impl SoilInputs {
    pub fn new(parameters: SoilParameters) -> FootprintResult<Self> {
        if let SoilCarbonStock::Measured {
            stock_change_tco2e_per_ha,
        } = parameters.stock
        {
            require_finite(
                stock_change_tco2e_per_ha,
                "INPUT.SOIL_STOCK_CHANGE",
                "stock_change_tco2e_per_ha",
            )?;
        }
        require_non_negative(parameters.area_ha, "INPUT.SOIL_AREA", "area_ha")?;
        if parameters.amortization_years == 0 {
            return Err(FootprintError::invalid_input(
                "INPUT.SOIL_AMORTIZATION",
                "amortization_years must be > 0",
            ));
        }
        if let ReleaseSchedule::FrontLoaded {
            years_since_conversion,
            immediate_release_fraction,
            immediate_window_years,
        } = parameters.release
        {
            require_non_negative(
                years_since_conversion,
                "INPUT.SOIL_YEARS_SINCE_CONVERSION",
                "years_since_conversion",
            )?;
            require_fraction(
                immediate_release_fraction,
                "INPUT.SOIL_IMMEDIATE_FRACTION",
                "immediate_release_fraction",
            )?;
            require_non_negative(
                immediate_window_years,
                "INPUT.SOIL_IMMEDIATE_WINDOW",
                "immediate_window_years",
            )?;
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &SoilParameters {
        &self.parameters
    }

    /// Total stock change over the converted area, tCO2e.
    pub fn total_stock_change_tco2e(&self) -> f64 {
        self.parameters.stock.stock_change_tco2e_per_ha() * self.parameters.area_ha
    }

    pub fn emissions_kgco2e(&self, cycle: &AccountingCycle) -> f64 {
        let total_tco2e = self.total_stock_change_tco2e();
        let amortization_years = f64::from(self.parameters.amortization_years);
        let days = f64::from(cycle.days());

        match self.parameters.release {
            ReleaseSchedule::Linear => {
                let amortization_days = amortization_years * f64::from(DAYS_PER_YEAR);
                total_tco2e * KG_PER_TONNE * (days / amortization_days)
            }
            ReleaseSchedule::FrontLoaded {
                years_since_conversion,
                immediate_release_fraction,
                immediate_window_years,
            } => {
                let immediate = if years_since_conversion <= immediate_window_years {
                    total_tco2e * immediate_release_fraction
                } else {
                    0.0
                };
                let gradual = if years_since_conversion < amortization_years {
                    total_tco2e * (1.0 - immediate_release_fraction) / amortization_years
                } else {
                    0.0
                };
                (immediate + gradual) * KG_PER_TONNE * cycle.fraction_of_year()
            }
        }
    }
}

impl TryFrom<SoilParameters> for SoilInputs {
    type Error = FootprintError;

    fn try_from(parameters: SoilParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<SoilInputs> for SoilParameters {
    fn from(inputs: SoilInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for SoilInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Soil
    }

    fn estimate(
        &self,
        cycle: &AccountingCycle,
        _factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        Ok(ComponentEmission::new(
            self.source(),
            self.emissions_kgco2e(cycle),
            Activity::new(self.parameters.area_ha, ActivityUnit::Hectare),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{ReleaseSchedule, SoilCarbonStock, SoilInputs, SoilParameters, SoilType};
    use crate::common::period::AccountingCycle;
    use crate::domain::Period;

    fn measured(stock: f64, area_ha: f64) -> SoilParameters {
        SoilParameters {
            stock: SoilCarbonStock::Measured {
                stock_change_tco2e_per_ha: stock,
            },
            area_ha,
            amortization_years: 20,
            release: ReleaseSchedule::Linear,
        }
    }

    #[test]
    fn linear_amortization_spreads_stock_change_over_horizon() {
        let inputs = SoilInputs::new(measured(100.0, 5.0)).expect("soil should validate");
        let cycle = AccountingCycle::normalize(Period::Cycle, Some(73)).expect("cycle");

        let expected = 100.0 * 5.0 * 1_000.0 * (73.0 / (20.0 * 365.0));
        assert!((inputs.emissions_kgco2e(&cycle) - expected).abs() <= 1.0e-9 * expected);
    }

    #[test]
    fn soil_type_defaults_resolve_stock() {
        assert_eq!(
            SoilType::Mangrove.stock_tco2e_per_ha(),
            (300.0 + 250.0 + 200.0) * 3.67
        );
        let inputs = SoilInputs::new(SoilParameters {
            stock: SoilCarbonStock::SoilType {
                soil_type: SoilType::Tropical,
            },
            ..measured(0.0, 2.0)
        })
        .expect("soil should validate");
        assert_eq!(inputs.total_stock_change_tco2e(), 165.0 * 3.67 * 2.0);
    }

    #[test]
    fn front_loaded_schedule_follows_conversion_age() {
        let cycle = AccountingCycle::normalize(Period::Cycle, Some(90)).expect("cycle");
        let schedule = |years| ReleaseSchedule::FrontLoaded {
            years_since_conversion: years,
            immediate_release_fraction: 0.7,
            immediate_window_years: 5.0,
        };

        let recent = SoilInputs::new(SoilParameters {
            release: schedule(2.0),
            ..measured(100.0, 1.0)
        })
        .expect("soil should validate");
        let expected = (70.0 + 30.0 / 20.0) * 1_000.0 * 90.0 / 365.0;
        assert!((recent.emissions_kgco2e(&cycle) - expected).abs() <= 1.0e-9 * expected);

        let settled = SoilInputs::new(SoilParameters {
            release: schedule(10.0),
            ..measured(100.0, 1.0)
        })
        .expect("soil should validate");
        let expected = 30.0 / 20.0 * 1_000.0 * 90.0 / 365.0;
        assert!((settled.emissions_kgco2e(&cycle) - expected).abs() <= 1.0e-9 * expected);

        let amortized = SoilInputs::new(SoilParameters {
            release: schedule(25.0),
            ..measured(100.0, 1.0)
        })
        .expect("soil should validate");
        assert_eq!(amortized.emissions_kgco2e(&cycle), 0.0);
    }

    #[test]
    fn invalid_soil_inputs_are_rejected() {
        assert!(SoilInputs::new(measured(10.0, -1.0)).is_err());
        assert!(
            SoilInputs::new(SoilParameters {
                amortization_years: 0,
                ..measured(10.0, 1.0)
            })
            .is_err()
        );
        assert!(
            SoilInputs::new(SoilParameters {
                release: ReleaseSchedule::FrontLoaded {
                    years_since_conversion: 1.0,
                    immediate_release_fraction: 1.4,
                    immediate_window_years: 5.0,
                },
                ..measured(10.0, 1.0)
            })
            .is_err()
        );
        assert!(SoilInputs::new(measured(f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn soil_inputs_parse_from_json() {
        let inputs: SoilInputs = serde_json::from_str(
            r#"{
                "stock": { "kind": "soil_type", "soil_type": "mangrove" },
                "area_ha": 5.0,
                "release": { "schedule": "front_loaded", "years_since_conversion": 2.0 }
            }"#,
        )
        .expect("soil inputs should parse");
        assert_eq!(inputs.parameters().amortization_years, 20);
        assert_eq!(
            inputs.parameters().release,
            ReleaseSchedule::FrontLoaded {
                years_since_conversion: 2.0,
                immediate_release_fraction: 0.7,
                immediate_window_years: 5.0,
            }
        );
    }
}
