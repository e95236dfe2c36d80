//! Built-in reference factors.
//!
//! Grid intensities are national averages in kgCO2e/kWh. Farms with utility or
//! metered data should load their own table or set an override per supply.

pub(super) const GRID_KGCO2E_PER_KWH: [(&str, f64); 13] = [
    ("Bangladesh", 0.621),
    ("Brazil", 0.074),
    ("China", 0.636),
    ("Ecuador", 0.206),
    ("El Salvador", 0.196),
    ("Guatemala", 0.209),
    ("Honduras", 0.279),
    ("India", 0.618),
    ("Indonesia", 0.654),
    ("Mexico", 0.415),
    ("Philippines", 0.546),
    ("Thailand", 0.401),
    ("Vietnam", 0.525),
];

pub(super) const DEFAULT_FEED_KGCO2E_PER_KG: f64 = 8.7;
pub(super) const FEED_KGCO2E_PER_KG: [(&str, f64); 1] = [("marine_shrimp", 8.7)];

pub(super) const DIESEL_KGCO2E_PER_LITER: f64 = 2.64;
pub(super) const DIESEL_LHV_MJ_PER_LITER: f64 = 36.0;
pub(super) const PETROL_KGCO2E_PER_LITER: f64 = 2.31;
pub(super) const PETROL_LHV_MJ_PER_LITER: f64 = 34.2;

pub(super) const ON_SITE_KGCO2E_PER_KWH: f64 = 0.0;

pub(super) const SEED_KGCO2E_PER_THOUSAND_PL: f64 = 0.23;
