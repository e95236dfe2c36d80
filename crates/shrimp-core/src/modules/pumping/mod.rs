mod model;

pub use model::PumpingDemand;

use super::EmissionModel;
use super::energy::EnergySupply;
use super::helpers::{
    require_efficiency, require_finite, require_hours_per_day, require_non_negative,
    require_positive,
};
use crate::common::constants::{HOURS_PER_DAY, WATER_DENSITY_KG_M3};
use crate::common::period::{AccountingCycle, SubPeriod};
use crate::domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, FootprintError, FootprintResult,
};
use crate::registry::EmissionFactorLookup;
use model::Hydraulics;
use serde::{Deserialize, Serialize};

const DEFAULT_FRICTION_FACTOR: f64 = 0.02;

/// How pipe losses enter the total dynamic head.
///
/// With `None` the supplied `total_dynamic_head_m` is used as-is and the pipe
/// dimensions are validated but do not affect the result. `DarcyWeisbach`
/// treats `total_dynamic_head_m` as static head and adds the pipe friction
/// loss for the daily flow spread over `pumping_hours_per_day`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum HeadLossModel {
    #[default]
    None,
    DarcyWeisbach {
        #[serde(default = "default_friction_factor")]
        friction_factor: f64,
        #[serde(default = "default_pumping_hours")]
        pumping_hours_per_day: f64,
    },
}

impl HeadLossModel {
    pub const fn default_darcy_weisbach() -> Self {
        Self::DarcyWeisbach {
            friction_factor: DEFAULT_FRICTION_FACTOR,
            pumping_hours_per_day: HOURS_PER_DAY,
        }
    }
}

fn default_friction_factor() -> f64 {
    DEFAULT_FRICTION_FACTOR
}

fn default_pumping_hours() -> f64 {
    HOURS_PER_DAY
}

fn default_water_density() -> f64 {
    WATER_DENSITY_KG_M3
}

/// Raw pumping fields as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PumpingParameters {
    pub pond_area_m2: f64,
    pub pond_depth_m: f64,
    pub exchange_fraction_per_day: f64,
    pub pipe_diameter_m: f64,
    pub pipe_length_m: f64,
    pub pump_efficiency: f64,
    pub motor_efficiency: f64,
    pub total_dynamic_head_m: f64,
    #[serde(default = "default_water_density")]
    pub water_density_kg_m3: f64,
    #[serde(default)]
    pub head_loss: HeadLossModel,
    pub energy: EnergySupply,
    #[serde(default)]
    pub period: Option<SubPeriod>,
}

/// Validated pumping inputs. Construction fails on any out-of-range field, so
/// a value of this type can always be estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PumpingParameters", into = "PumpingParameters")]
pub struct PumpingModelInputs {
    parameters: PumpingParameters,
}

impl PumpingModelInputs {
    pub fn new(parameters: PumpingParameters) -> FootprintResult<Self> {
        require_positive(
            parameters.pond_area_m2,
            "INPUT.PUMPING_POND_AREA",
            "pond_area_m2",
        )?;
        require_positive(
            parameters.pond_depth_m,
            "INPUT.PUMPING_POND_DEPTH",
            "pond_depth_m",
        )?;
        let exchange = require_finite(
            parameters.exchange_fraction_per_day,
            "INPUT.PUMPING_EXCHANGE_FRACTION",
            "exchange_fraction_per_day",
        )?;
        if exchange > 1.0 {
            return Err(FootprintError::invalid_input(
                "INPUT.PUMPING_EXCHANGE_FRACTION",
                format!(
                    "exchange_fraction_per_day must be <= 1, got {}",
                    exchange
                ),
            ));
        }
        require_positive(
            parameters.pipe_diameter_m,
            "INPUT.PUMPING_PIPE_DIAMETER",
            "pipe_diameter_m",
        )?;
        require_non_negative(
            parameters.pipe_length_m,
            "INPUT.PUMPING_PIPE_LENGTH",
            "pipe_length_m",
        )?;
        require_efficiency(
            parameters.pump_efficiency,
            "INPUT.PUMPING_PUMP_EFFICIENCY",
            "pump_efficiency",
        )?;
        require_efficiency(
            parameters.motor_efficiency,
            "INPUT.PUMPING_MOTOR_EFFICIENCY",
            "motor_efficiency",
        )?;
        require_non_negative(
            parameters.total_dynamic_head_m,
            "INPUT.PUMPING_TOTAL_DYNAMIC_HEAD",
            "total_dynamic_head_m",
        )?;
        require_positive(
            parameters.water_density_kg_m3,
            "INPUT.PUMPING_WATER_DENSITY",
            "water_density_kg_m3",
        )?;
        if let HeadLossModel::DarcyWeisbach {
            friction_factor,
            pumping_hours_per_day,
        } = parameters.head_loss
        {
            require_positive(
                friction_factor,
                "INPUT.PUMPING_FRICTION_FACTOR",
                "friction_factor",
            )?;
            require_hours_per_day(
                pumping_hours_per_day,
                "INPUT.PUMPING_HOURS_PER_DAY",
                "pumping_hours_per_day",
            )?;
        }
        parameters.energy.validate("INPUT.PUMPING_ENERGY")?;

        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &PumpingParameters {
        &self.parameters
    }

    pub fn demand(&self) -> PumpingDemand {
        let parameters = &self.parameters;
        Hydraulics {
            pond_area_m2: parameters.pond_area_m2,
            pond_depth_m: parameters.pond_depth_m,
            exchange_fraction_per_day: parameters.exchange_fraction_per_day,
            pipe_diameter_m: parameters.pipe_diameter_m,
            pipe_length_m: parameters.pipe_length_m,
            total_dynamic_head_m: parameters.total_dynamic_head_m,
            water_density_kg_m3: parameters.water_density_kg_m3,
            pump_efficiency: parameters.pump_efficiency,
            motor_efficiency: parameters.motor_efficiency,
            head_loss: parameters.head_loss,
        }
        .demand()
    }

    pub fn energy_kwh(&self, cycle: &AccountingCycle) -> FootprintResult<f64> {
        let days = cycle.days_for(self.parameters.period.as_ref(), "INPUT.PUMPING_PERIOD")?;
        Ok(self.demand().daily_energy_kwh * f64::from(days))
    }
}

impl TryFrom<PumpingParameters> for PumpingModelInputs {
    type Error = FootprintError;

    fn try_from(parameters: PumpingParameters) -> FootprintResult<Self> {
        Self::new(parameters)
    }
}

impl From<PumpingModelInputs> for PumpingParameters {
    fn from(inputs: PumpingModelInputs) -> Self {
        inputs.parameters
    }
}

impl EmissionModel for PumpingModelInputs {
    fn source(&self) -> EmissionSource {
        EmissionSource::Pumping
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
