//! Physical and accounting constants shared by the emission sub-models.

pub const WATER_DENSITY_KG_M3: f64 = 1_000.0;
pub const GRAVITY_M_S2: f64 = 9.81;
pub const JOULES_PER_KWH: f64 = 3.6e6;
pub const MJ_PER_KWH: f64 = 3.6;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const KW_PER_HP: f64 = 0.7457;
pub const CARBON_TO_CO2: f64 = 3.67;
pub const KG_PER_TONNE: f64 = 1_000.0;
pub const GRAMS_PER_KG: f64 = 1_000.0;
pub const DAYS_PER_YEAR: u32 = 365;
pub const GWP_CH4: f64 = 84.0;
pub const GWP_N2O: f64 = 298.0;
