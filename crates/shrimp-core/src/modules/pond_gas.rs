//! Methane and nitrous oxide released from the pond surface.
//!
//! Area-based daily factors (g gas per m2 per day) by farming intensity; the
//! defaults are the midpoints of the published ranges.

use super::EmissionModel;
use super::helpers::require_non_negative;
use crate::common::constants::{GRAMS_PER_KG, GWP_CH4, GWP_N2O};
use crate::common::period::AccountingCycle;
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Extensive,
    #[default]
    SemiIntensive,
    Intensive,
}

impl SystemType {
    pub fn ch4_g_m2_day(self) -> f64 {
        match self {
            Self::Extensive => (0.005 + 0.015) / 2.0,
            Self::SemiIntensive => (0.020 + 0.050) / 2.0,
            Self::Intensive => (0.060 + 0.120) / 2.0,
        }
    }

    pub fn n2o_g_m2_day(self) -> f64 {
        match self {
            Self::Extensive => (0.001 + 0.005) / 2.0,
            Self::SemiIntensive => (0.005 + 0.015) / 2.0,
            Self::Intensive => (0.020 + 0.045) / 2.0,
        }
    }
}

fn default_gwp_ch4() -> f64 {
    GWP_CH4
}

fn default_gwp_n2o() -> f64 {
    GWP_N2O
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PondGasParameters {
    pub pond_area_m2: f64,
    #[serde(default)]
    pub system_type: SystemType,
    #[serde(default)]
    pub ch4_g_m2_day: Option<f64>,
    #[serde(default)]
    pub n2o_g_m2_day: Option<f64>,
    #[serde(default = "default_gwp_ch4")]
    pub gwp_ch4: f64,
    #[serde(default = "default_gwp_n2o")]
    pub gwp_n2o: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PondGasParameters", into = "PondGasParameters")]
pub struct PondGasInputs {
    parameters: PondGasParameters,
}

impl PondGasInputs {
    pub fn new(parameters: PondGasParameters) -> FootprintResult<Self> {
        require_non_negative(
            parameters.pond_area_m2,
            "INPUT.POND_GAS_AREA",
            "pond_area_m2",
        )?;
        if let Some(factor) = parameters.ch4_g_m2_day {
            require_non_negative(factor, "INPUT.POND_GAS_CH4_FACTOR", "ch4_g_m2_day")?;
        }
        if let Some(factor) = parameters.n2o_g_m2_day {
            require_non_negative(factor, "INPUT.POND_GAS_N2O_FACTOR", "n2o_g_m2_day")?;
        }
        require_non_negative(parameters.gwp_ch4, "INPUT.POND_GAS_GWP", "gwp_ch4")?;
        require_non_negative(parameters.gwp_n2o, "INPUT.POND_GAS_GWP", "gwp_n2o")?;
        Ok(Self { parameters })
    }

    pub fn with_area(pond_area_m2: f64, system_type: SystemType) -> FootprintResult<Self> {
        Self::new(PondGasParameters {
            pond_area_m2,
            system_type,
            ch4_g_m2_day: None,
            n2o_g_m2_day: None,
            gwp_ch4: GWP_CH4,
            gwp_n2o: GWP_N2O,
        })
    }

    pub fn parameters(&self) -> &PondGasParameters {
        &self.parameters
    }

    pub fn emissions_kgco2e(&self, days: f64) -> f64 {
        let parameters = &self.parameters;
        let ch4 = parameters
            .ch4_g_m2_day
            .unwrap_or_else(|| parameters.system_type.ch4_g_m2_day());
        let n2o = parameters
            .n2o_g_m2_day
            .unwrap_or_else(|| parameters.system_type.n2o_g_m2_day());

        let ch4_kg = ch4 * parameters.pond_area_m2 * days / GRAMS_PER_KG;
        let n2o_kg = n2o * parameters.pond_area_m2 * days / GRAMS_PER_KG;
        ch4_kg * parameters.gwp_ch4 + n2o_kg * parameters.gwp_n2o
    }
}

impl TryFrom<PondGasParameters> for PondGasInputs {
    type Error = FootprintError;

    fn try_from(parameters: PondGasParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<PondGasInputs> for PondGasParameters {
    fn from(inputs: PondGasInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for PondGasInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::PondGas
    }

    fn estimate(
        &self,
        cycle: &AccountingCycle,
        _factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        let days = f64::from(cycle.days());
        Ok(ComponentEmission::new(
            self.source(),
            self.emissions_kgco2e(days),
            Activity::new(
                self.parameters.pond_area_m2 * days,
                ActivityUnit::SquareMetreDays,
            ),
        ))
    }
}
