pub mod aeration;
pub mod energy;
pub mod estimator;
pub mod feed;
pub mod pond_gas;
pub mod pumping;
pub mod sequestration;
pub mod serialization;
pub mod soil;

mod helpers;
mod traits;

pub use traits::EmissionModel;
