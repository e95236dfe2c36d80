//! Paddlewheel and blower aeration energy.

use super::EmissionModel;
use super::energy::EnergySupply;
use super::helpers::{require_efficiency, require_hours_per_day, require_positive};
use crate::common::constants::KW_PER_HP;
use crate::common::period::{AccountingCycle, SubPeriod};
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use serde::{Deserialize, Serialize};

fn default_motor_efficiency() -> f64 {
    0.80
}

fn default_blower_efficiency() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AerationParameters {
    pub total_aeration_hp: f64,
    pub hours_per_day: f64,
    #[serde(default = "default_motor_efficiency")]
    pub motor_efficiency: f64,
    #[serde(default = "default_blower_efficiency")]
    pub blower_efficiency: f64,
    pub energy: EnergySupply,
    #[serde(default)]
    pub period: Option<SubPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AerationParameters", into = "AerationParameters")]
pub struct AerationInputs {
    parameters: AerationParameters,
}

impl AerationInputs {
    pub fn new(parameters: AerationParameters) -> FootprintResult<Self> {
        require_positive(
            parameters.total_aeration_hp,
            "INPUT.AERATION_POWER",
            "total_aeration_hp",
        )?;
        require_hours_per_day(
            parameters.hours_per_day,
            "INPUT.AERATION_HOURS_PER_DAY",
            "hours_per_day",
        )?;
        require_efficiency(
            parameters.motor_efficiency,
            "INPUT.AERATION_MOTOR_EFFICIENCY",
            "motor_efficiency",
        )?;
        require_efficiency(
            parameters.blower_efficiency,
            "INPUT.AERATION_BLOWER_EFFICIENCY",
            "blower_efficiency",
        )?;
        parameters.energy.validate("INPUT.AERATION_ENERGY")?;

        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &AerationParameters {
        &self.parameters
    }

    /// Electrical input power after motor and blower losses.
    pub fn electric_power_kw(&self) -> f64 {
        let shaft_kw = self.parameters.total_aeration_hp * KW_PER_HP;
        shaft_kw / (self.parameters.motor_efficiency * self.parameters.blower_efficiency)
    }

    pub fn daily_energy_kwh(&self) -> f64 {
        self.electric_power_kw() * self.parameters.hours_per_day
    }

    pub fn energy_kwh(&self, cycle: &AccountingCycle) -> FootprintResult<f64> {
        let days = cycle.days_for(self.parameters.period.as_ref(), "INPUT.AERATION_PERIOD")?;
        Ok(self.daily_energy_kwh() * f64::from(days))
    }
}

impl TryFrom<AerationParameters> for AerationInputs {
    type Error = FootprintError;

    fn try_from(parameters: AerationParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<AerationInputs> for AerationParameters {
    fn from(inputs: AerationInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for AerationInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Aeration
    }

    fn estimate(
        &self,
        cycle: &AccountingCycle,
        factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission> {
        let energy_kwh = self.energy_kwh(cycle)?;
        let emissions = self.parameters.energy.emissions_kgco2e(energy_kwh, factors)?;
        Ok(ComponentEmission::new(
            self.source(),
            emissions,
            Activity::new(energy_kwh, ActivityUnit::Kwh),
        ))
    }
}
