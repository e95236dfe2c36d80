//! Greenhouse-gas footprint of a shrimp grow-out cycle.
//!
//! Build an [`EstimatorInputs`] (in code or from scenario JSON), hand it to an
//! [`Estimator`] holding the emission-factor lookup, and read the total,
//! intensity and per-source breakdown off the [`EstimationResult`].

pub mod common;
pub mod domain;
pub mod modules;
pub mod registry;

pub use domain::{
    Activity, ActivityUnit, ComponentEmission, EmissionSource, EnergySource, EstimationResult,
    FootprintError, FootprintErrorCategory, FootprintResult, Period,
};
pub use modules::EmissionModel;
pub use modules::estimator::{Estimator, EstimatorInputs, EstimatorParameters};
pub use registry::{EmissionFactorLookup, EmissionFactorRegistry, EmissionFactorTable};
