//! Electricity and fuel conversion shared by the pumping and aeration models.

use super::helpers::require_non_negative;
use crate::common::constants::MJ_PER_KWH;
use crate::domain::{EnergySource, FootprintError, FootprintResult};
use crate::registry::{EmissionFactorLookup, Fuel};
use serde::{Deserialize, Serialize};

/// Where the energy for a sub-model comes from.
///
/// An explicit `emission_factor_override` (kgCO2e/kWh, supplier or metered
/// data) takes precedence over every registry lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergySupply {
    #[serde(default)]
    pub source: EnergySource,
    #[serde(default)]
    pub grid_country: Option<String>,
    #[serde(default)]
    pub emission_factor_override: Option<f64>,
}

impl EnergySupply {
    pub fn grid(country: impl Into<String>) -> Self {
        Self {
            source: EnergySource::Grid,
            grid_country: Some(country.into()),
            emission_factor_override: None,
        }
    }

    pub fn off_grid(source: EnergySource) -> Self {
        Self {
            source,
            grid_country: None,
            emission_factor_override: None,
        }
    }

    pub fn with_override(mut self, kgco2e_per_kwh: f64) -> Self {
        self.emission_factor_override = Some(kgco2e_per_kwh);
        self
    }

    pub(crate) fn validate(&self, placeholder: &'static str) -> FootprintResult<()> {
        if let Some(factor) = self.emission_factor_override {
            require_non_negative(factor, placeholder, "emission_factor_override")?;
            return Ok(());
        }

        if self.source == EnergySource::Grid {
            let has_country = self
                .grid_country
                .as_deref()
                .is_some_and(|country| !country.trim().is_empty());
            if !has_country {
                return Err(FootprintError::invalid_input(
                    placeholder,
                    "grid_country is required when energy source is 'grid'",
                ));
            }
        }
        Ok(())
    }

    /// Converts delivered energy into kgCO2e.
    pub fn emissions_kgco2e(
        &self,
        energy_kwh: f64,
        factors: &dyn EmissionFactorLookup,
    ) -> FootprintResult<f64> {
        if let Some(factor) = self.emission_factor_override {
            return Ok(energy_kwh * factor);
        }

        match self.source {
            EnergySource::Grid => {
                let country = self.grid_country.as_deref().unwrap_or_default();
                Ok(energy_kwh * factors.grid_factor(country)?)
            }
            EnergySource::Diesel => Ok(fuel_emissions_kgco2e(energy_kwh, Fuel::Diesel, factors)),
            EnergySource::Petrol => Ok(fuel_emissions_kgco2e(energy_kwh, Fuel::Petrol, factors)),
            EnergySource::Solar => Ok(energy_kwh * factors.on_site_factor()),
        }
    }
}

fn fuel_emissions_kgco2e(energy_kwh: f64, fuel: Fuel, factors: &dyn EmissionFactorLookup) -> f64 {
    let factor = factors.fuel_factor(fuel);
    let liters = energy_kwh * MJ_PER_KWH / factor.lhv_mj_per_liter;
    liters * factor.kgco2e_per_liter
}

#[cfg(test)]
mod tests {
    use super::EnergySupply;
    use crate::domain::{EnergySource, FootprintErrorCategory};
    use crate::registry::EmissionFactorRegistry;

    #[test]
    fn grid_supply_uses_country_factor() {
        let registry = EmissionFactorRegistry::builtin();
        let supply = EnergySupply::grid("Mexico");
        assert_eq!(supply.emissions_kgco2e(100.0, &registry), Ok(100.0 * 0.415));
    }

    #[test]
    fn fuel_supply_converts_through_heating_value() {
        let registry = EmissionFactorRegistry::builtin();
        let diesel = EnergySupply::off_grid(EnergySource::Diesel)
            .emissions_kgco2e(100.0, &registry)
            .expect("diesel converts");
        assert!((diesel - 100.0 * 3.6 / 36.0 * 2.64).abs() <= 1.0e-12);

        let petrol = EnergySupply::off_grid(EnergySource::Petrol)
            .emissions_kgco2e(100.0, &registry)
            .expect("petrol converts");
        assert!((petrol - 100.0 * 3.6 / 34.2 * 2.31).abs() <= 1.0e-12);
    }

    #[test]
    fn solar_supply_uses_on_site_factor() {
        let registry = EmissionFactorRegistry::builtin();
        let solar = EnergySupply::off_grid(EnergySource::Solar);
        assert_eq!(solar.emissions_kgco2e(500.0, &registry), Ok(0.0));
    }

    #[test]
    fn override_bypasses_registry() {
        let registry = EmissionFactorRegistry::builtin();
        let supply = EnergySupply::grid("Atlantis").with_override(0.3);
        assert!(supply.validate("INPUT.TEST").is_ok());
        assert_eq!(supply.emissions_kgco2e(10.0, &registry), Ok(3.0));
    }

    #[test]
    fn grid_supply_without_country_is_rejected() {
        let supply = EnergySupply::off_grid(EnergySource::Grid);
        let error = supply
            .validate("INPUT.AERATION_ENERGY")
            .expect_err("grid without country should fail");
        assert_eq!(error.category(), FootprintErrorCategory::InvalidInput);

        let unknown = EnergySupply::grid("Atlantis");
        assert!(unknown.validate("INPUT.AERATION_ENERGY").is_ok());
        let registry = EmissionFactorRegistry::builtin();
        let error = unknown
            .emissions_kgco2e(1.0, &registry)
            .expect_err("unknown country should fail");
        assert_eq!(error.category(), FootprintErrorCategory::UnknownRegion);
    }
}
