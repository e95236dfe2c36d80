//! Emission-factor reference data and lookups.
//!
//! The registry is built once from an [`EmissionFactorTable`] (the built-in
//! defaults or a JSON document) and is read-only afterwards. Sub-models only
//! see it through [`EmissionFactorLookup`], so tests can hand in fixture tables.

mod defaults;

use crate::domain::{FootprintError, FootprintResult};
use defaults::{
    DEFAULT_FEED_KGCO2E_PER_KG, DIESEL_KGCO2E_PER_LITER, DIESEL_LHV_MJ_PER_LITER,
    FEED_KGCO2E_PER_KG, GRID_KGCO2E_PER_KWH, ON_SITE_KGCO2E_PER_KWH, PETROL_KGCO2E_PER_LITER,
    PETROL_LHV_MJ_PER_LITER, SEED_KGCO2E_PER_THOUSAND_PL,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fuel {
    Diesel,
    Petrol,
}

impl Fuel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelFactor {
    pub kgco2e_per_liter: f64,
    pub lhv_mj_per_liter: f64,
}

pub trait EmissionFactorLookup {
    /// Grid electricity factor (kgCO2e/kWh) for a country or region.
    fn grid_factor(&self, region: &str) -> FootprintResult<f64>;

    /// Feed production factor (kgCO2e/kg); `None` selects the default factor.
    fn feed_factor(&self, feed_type: Option<&str>) -> FootprintResult<f64>;

    fn fuel_factor(&self, fuel: Fuel) -> FuelFactor;

    /// Factor for on-site generation (kgCO2e/kWh).
    fn on_site_factor(&self) -> f64;

    /// Hatchery factor (kgCO2e per 1000 post-larvae).
    fn seed_factor(&self) -> f64;
}

/// Serializable form of the reference data. Missing sections fall back to the
/// built-in defaults, so a JSON table only needs the sections it replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionFactorTable {
    pub grid_kgco2e_per_kwh: BTreeMap<String, f64>,
    pub feed_kgco2e_per_kg: BTreeMap<String, f64>,
    pub default_feed_kgco2e_per_kg: f64,
    pub diesel: FuelFactor,
    pub petrol: FuelFactor,
    pub on_site_kgco2e_per_kwh: f64,
    pub seed_kgco2e_per_thousand_pl: f64,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self {
            grid_kgco2e_per_kwh: GRID_KGCO2E_PER_KWH
                .iter()
                .map(|(region, factor)| ((*region).to_string(), *factor))
                .collect(),
            feed_kgco2e_per_kg: FEED_KGCO2E_PER_KG
                .iter()
                .map(|(feed_type, factor)| ((*feed_type).to_string(), *factor))
                .collect(),
            default_feed_kgco2e_per_kg: DEFAULT_FEED_KGCO2E_PER_KG,
            diesel: FuelFactor {
                kgco2e_per_liter: DIESEL_KGCO2E_PER_LITER,
                lhv_mj_per_liter: DIESEL_LHV_MJ_PER_LITER,
            },
            petrol: FuelFactor {
                kgco2e_per_liter: PETROL_KGCO2E_PER_LITER,
                lhv_mj_per_liter: PETROL_LHV_MJ_PER_LITER,
            },
            on_site_kgco2e_per_kwh: ON_SITE_KGCO2E_PER_KWH,
            seed_kgco2e_per_thousand_pl: SEED_KGCO2E_PER_THOUSAND_PL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NamedFactor {
    name: String,
    value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorRegistry {
    grid: BTreeMap<String, NamedFactor>,
    feed: BTreeMap<String, NamedFactor>,
    default_feed: f64,
    diesel: FuelFactor,
    petrol: FuelFactor,
    on_site: f64,
    seed: f64,
}

impl EmissionFactorRegistry {
    pub fn new(table: EmissionFactorTable) -> FootprintResult<Self> {
        let grid = keyed_factors(table.grid_kgco2e_per_kwh, "FACTOR.GRID_TABLE")?;
        let feed = keyed_factors(table.feed_kgco2e_per_kg, "FACTOR.FEED_TABLE")?;
        let default_feed = validate_factor(
            table.default_feed_kgco2e_per_kg,
            "FACTOR.DEFAULT_FEED",
            "default_feed_kgco2e_per_kg",
        )?;
        let diesel = validate_fuel(table.diesel, Fuel::Diesel)?;
        let petrol = validate_fuel(table.petrol, Fuel::Petrol)?;
        let on_site = validate_factor(
            table.on_site_kgco2e_per_kwh,
            "FACTOR.ON_SITE",
            "on_site_kgco2e_per_kwh",
        )?;
        let seed = validate_factor(
            table.seed_kgco2e_per_thousand_pl,
            "FACTOR.SEED",
            "seed_kgco2e_per_thousand_pl",
        )?;

        Ok(Self {
            grid,
            feed,
            default_feed,
            diesel,
            petrol,
            on_site,
            seed,
        })
    }

    pub fn builtin() -> Self {
        Self::new(EmissionFactorTable::default())
            .unwrap_or_else(|error| unreachable!("built-in factor table is valid: {error}"))
    }

    pub fn from_json_str(source: &str) -> FootprintResult<Self> {
        let table: EmissionFactorTable = serde_json::from_str(source).map_err(|error| {
            FootprintError::invalid_input(
                "FACTOR.TABLE_FORMAT",
                format!("failed to parse emission factor table: {}", error),
            )
        })?;
        Self::new(table)
    }

    pub fn grid_factors(&self) -> impl Iterator<Item = (&str, f64)> {
        self.grid
            .values()
            .map(|entry| (entry.name.as_str(), entry.value))
    }

    pub fn feed_factors(&self) -> impl Iterator<Item = (&str, f64)> {
        self.feed
            .values()
            .map(|entry| (entry.name.as_str(), entry.value))
    }

    pub fn default_feed_factor(&self) -> f64 {
        self.default_feed
    }

    /// Table form of the loaded factors, with names as first registered.
    pub fn table(&self) -> EmissionFactorTable {
        EmissionFactorTable {
            grid_kgco2e_per_kwh: self
                .grid_factors()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            feed_kgco2e_per_kg: self
                .feed_factors()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            default_feed_kgco2e_per_kg: self.default_feed,
            diesel: self.diesel,
            petrol: self.petrol,
            on_site_kgco2e_per_kwh: self.on_site,
            seed_kgco2e_per_thousand_pl: self.seed,
        }
    }
}

impl Default for EmissionFactorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EmissionFactorLookup for EmissionFactorRegistry {
    fn grid_factor(&self, region: &str) -> FootprintResult<f64> {
        self.grid
            .get(&normalize_key(region))
            .map(|entry| entry.value)
            .ok_or_else(|| {
                FootprintError::unknown_region(
                    "FACTOR.GRID_COUNTRY",
                    format!(
                        "no grid emission factor registered for '{}'; provide emission_factor_override or a factor table",
                        region.trim()
                    ),
                )
            })
    }

    fn feed_factor(&self, feed_type: Option<&str>) -> FootprintResult<f64> {
        let Some(feed_type) = feed_type else {
            return Ok(self.default_feed);
        };

        self.feed
            .get(&normalize_key(feed_type))
            .map(|entry| entry.value)
            .ok_or_else(|| {
                FootprintError::unknown_feed_type(
                    "FACTOR.FEED_TYPE",
                    format!(
                        "no feed emission factor registered for feed type '{}'",
                        feed_type.trim()
                    ),
                )
            })
    }

    fn fuel_factor(&self, fuel: Fuel) -> FuelFactor {
        match fuel {
            Fuel::Diesel => self.diesel,
            Fuel::Petrol => self.petrol,
        }
    }

    fn on_site_factor(&self) -> f64 {
        self.on_site
    }

    fn seed_factor(&self) -> f64 {
        self.seed
    }
}

fn normalize_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn keyed_factors(
    entries: BTreeMap<String, f64>,
    placeholder: &'static str,
) -> FootprintResult<BTreeMap<String, NamedFactor>> {
    let mut keyed = BTreeMap::new();
    for (name, value) in entries {
        let key = normalize_key(&name);
        if key.is_empty() {
            return Err(FootprintError::invalid_input(
                placeholder,
                "factor table keys must not be empty",
            ));
        }
        let value = validate_factor(value, placeholder, &name)?;
        let trimmed = name.trim().to_string();
        if let Some(existing) = keyed.insert(
            key,
            NamedFactor {
                name: trimmed.clone(),
                value,
            },
        ) {
            return Err(FootprintError::invalid_input(
                placeholder,
                format!(
                    "factor table lists '{}' and '{}', which name the same entry",
                    existing.name, trimmed
                ),
            ));
        }
    }
    Ok(keyed)
}

fn validate_factor(value: f64, placeholder: &'static str, name: &str) -> FootprintResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FootprintError::invalid_input(
            placeholder,
            format!("emission factor '{}' must be finite and >= 0, got {}", name, value),
        ));
    }
    Ok(value)
}

fn validate_fuel(factor: FuelFactor, fuel: Fuel) -> FootprintResult<FuelFactor> {
    validate_factor(factor.kgco2e_per_liter, "FACTOR.FUEL", fuel.as_str())?;
    if !factor.lhv_mj_per_liter.is_finite() || factor.lhv_mj_per_liter <= 0.0 {
        return Err(FootprintError::invalid_input(
            "FACTOR.FUEL",
            format!(
                "{} lower heating value must be > 0 MJ/L, got {}",
                fuel.as_str(),
                factor.lhv_mj_per_liter
            ),
        ));
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::{EmissionFactorLookup, EmissionFactorRegistry, EmissionFactorTable, Fuel};
    use crate::domain::FootprintErrorCategory;
    use std::collections::BTreeMap;

    #[test]
    fn builtin_grid_lookup_is_case_insensitive() {
        let registry = EmissionFactorRegistry::builtin();
        assert_eq!(registry.grid_factor("Ecuador"), Ok(0.206));
        assert_eq!(registry.grid_factor(" ecuador "), Ok(0.206));
        assert_eq!(registry.grid_factor("EL SALVADOR"), Ok(0.196));
    }

    #[test]
    fn unknown_region_is_reported() {
        let registry = EmissionFactorRegistry::builtin();
        let error = registry
            .grid_factor("Atlantis")
            .expect_err("unknown region should fail");
        assert_eq!(error.category(), FootprintErrorCategory::UnknownRegion);
        assert_eq!(error.placeholder(), "FACTOR.GRID_COUNTRY");
    }

    #[test]
    fn feed_lookup_uses_default_or_registered_type() {
        let registry = EmissionFactorRegistry::builtin();
        assert_eq!(registry.feed_factor(None), Ok(8.7));
        assert_eq!(registry.feed_factor(Some("Marine_Shrimp")), Ok(8.7));

        let error = registry
            .feed_factor(Some("insect_meal"))
            .expect_err("unknown feed type should fail");
        assert_eq!(error.category(), FootprintErrorCategory::UnknownFeedType);
    }

    #[test]
    fn json_table_overrides_sections_and_keeps_defaults() {
        let registry = EmissionFactorRegistry::from_json_str(
            r#"{
                "grid_kgco2e_per_kwh": { "Testland": 0.5 },
                "feed_kgco2e_per_kg": { "low_fishmeal": 1.9 }
            }"#,
        )
        .expect("table should load");

        assert_eq!(registry.grid_factor("testland"), Ok(0.5));
        assert!(registry.grid_factor("Mexico").is_err());
        assert_eq!(registry.feed_factor(Some("low_fishmeal")), Ok(1.9));
        assert_eq!(registry.feed_factor(None), Ok(8.7));
        assert_eq!(registry.fuel_factor(Fuel::Diesel).kgco2e_per_liter, 2.64);
        assert_eq!(registry.seed_factor(), 0.23);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let mut table = EmissionFactorTable::default();
        table
            .grid_kgco2e_per_kwh
            .insert("Nowhere".to_string(), -0.1);
        assert!(EmissionFactorRegistry::new(table).is_err());

        let duplicate = EmissionFactorTable {
            grid_kgco2e_per_kwh: BTreeMap::from([
                ("Mexico".to_string(), 0.4),
                ("mexico ".to_string(), 0.5),
            ]),
            ..EmissionFactorTable::default()
        };
        assert!(EmissionFactorRegistry::new(duplicate).is_err());

        let error = EmissionFactorRegistry::from_json_str(r#"{ "grid": {} }"#)
            .expect_err("unknown sections should fail");
        assert_eq!(error.placeholder(), "FACTOR.TABLE_FORMAT");
    }

    #[test]
    fn registry_lists_entries_with_original_names() {
        let registry = EmissionFactorRegistry::builtin();
        let names: Vec<&str> = registry.grid_factors().map(|(name, _)| name).collect();
        assert!(names.contains(&"El Salvador"));
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn table_view_matches_loaded_factors() {
        let registry = EmissionFactorRegistry::builtin();
        assert_eq!(registry.table(), EmissionFactorTable::default());
        assert_eq!(
            EmissionFactorRegistry::new(registry.table()).expect("table should reload"),
            registry
        );
    }
}
