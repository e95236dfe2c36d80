//! Hydraulic energy for water exchange.

use super::HeadLossModel;
use crate::common::constants::{GRAVITY_M_S2, JOULES_PER_KWH, SECONDS_PER_HOUR};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpingDemand {
    pub daily_volume_m3: f64,
    pub friction_head_m: f64,
    pub total_head_m: f64,
    pub daily_energy_kwh: f64,
}

pub(super) struct Hydraulics {
    pub(super) pond_area_m2: f64,
    pub(super) pond_depth_m: f64,
    pub(super) exchange_fraction_per_day: f64,
    pub(super) pipe_diameter_m: f64,
    pub(super) pipe_length_m: f64,
    pub(super) total_dynamic_head_m: f64,
    pub(super) water_density_kg_m3: f64,
    pub(super) pump_efficiency: f64,
    pub(super) motor_efficiency: f64,
    pub(super) head_loss: HeadLossModel,
}

impl Hydraulics {
    /// A non-positive exchange fraction means the pond was not pumped.
    pub(super) fn daily_volume_m3(&self) -> f64 {
        self.pond_area_m2 * self.pond_depth_m * self.exchange_fraction_per_day.max(0.0)
    }

    /// Darcy-Weisbach friction head over the supply pipe. Zero unless the
    /// Darcy-Weisbach head-loss model is selected.
    pub(super) fn friction_head_m(&self, daily_volume_m3: f64) -> f64 {
        match self.head_loss {
            HeadLossModel::None => 0.0,
            HeadLossModel::DarcyWeisbach {
                friction_factor,
                pumping_hours_per_day,
            } => {
                let flow_m3_s = daily_volume_m3 / (pumping_hours_per_day * SECONDS_PER_HOUR);
                let pipe_area_m2 = PI * (self.pipe_diameter_m / 2.0).powi(2);
                let velocity_m_s = flow_m3_s / pipe_area_m2;
                friction_factor * (self.pipe_length_m / self.pipe_diameter_m)
                    * (velocity_m_s * velocity_m_s / (2.0 * GRAVITY_M_S2))
            }
        }
    }

    pub(super) fn demand(&self) -> PumpingDemand {
        let daily_volume_m3 = self.daily_volume_m3();
        let friction_head_m = self.friction_head_m(daily_volume_m3);
        let total_head_m = self.total_dynamic_head_m + friction_head_m;
        let daily_energy_kwh = (self.water_density_kg_m3 * GRAVITY_M_S2 * daily_volume_m3 * total_head_m)
            / (JOULES_PER_KWH * self.pump_efficiency * self.motor_efficiency);

        PumpingDemand {
            daily_volume_m3,
            friction_head_m,
            total_head_m,
            daily_energy_kwh,
        }
    }
}
