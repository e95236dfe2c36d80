use crate::common::period::AccountingCycle;
use crate::domain::{ComponentEmission, EmissionSource, FootprintResult};
use crate::registry::EmissionFactorLookup;

/// One emission source of the cycle footprint.
///
/// Implementations are pure: the same inputs, cycle and factor table always
/// produce the same component.
pub trait EmissionModel {
    fn source(&self) -> EmissionSource;

    fn estimate(
        &self,
        cycle: &AccountingCycle,
        factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<ComponentEmission>;
}
