pub mod constants;
pub mod period;
