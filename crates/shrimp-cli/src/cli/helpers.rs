use super::CliError;
use anyhow::Context;
use shrimp_core::modules::aeration::{AerationInputs, AerationParameters};
use shrimp_core::modules::energy::EnergySupply;
use shrimp_core::modules::feed::{FeedInputs, SeedInputs, SeedParameters};
use shrimp_core::modules::pond_gas::{PondGasInputs, SystemType};
use shrimp_core::modules::pumping::{HeadLossModel, PumpingModelInputs, PumpingParameters};
use shrimp_core::modules::sequestration::{
    SequestrationInputs, SequestrationParameters, VegetationType,
};
use shrimp_core::modules::serialization::normalize_text_artifact;
use shrimp_core::modules::soil::{
    ReleaseSchedule, SoilCarbonStock, SoilInputs, SoilParameters, SoilType,
};
use shrimp_core::{
    EmissionFactorRegistry, EstimationResult, EstimatorInputs, EstimatorParameters,
    FootprintResult,
};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub(super) fn load_registry(path: Option<&Path>) -> Result<EmissionFactorRegistry, CliError> {
    let Some(path) = path else {
        tracing::debug!("using built-in emission factor table");
        return Ok(EmissionFactorRegistry::builtin());
    };

    let source = read_text_file(path, "emission factor table")?;
    let registry = EmissionFactorRegistry::from_json_str(&source)?;
    tracing::debug!(
        path = %path.display(),
        grid_regions = registry.grid_factors().count(),
        feed_types = registry.feed_factors().count(),
        "loaded emission factor table"
    );
    Ok(registry)
}

pub(super) fn read_text_file(path: &Path, label: &str) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read {label} '{}'", path.display()))
}

pub(super) fn write_text_artifact(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, normalize_text_artifact(content))
        .with_context(|| format!("failed to write '{}'", path.display()))
}

pub(super) fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

pub(super) fn render_summary(result: &EstimationResult) -> String {
    let mut summary = String::new();
    let _ = writeln!(
        summary,
        "Shrimp cycle footprint ({}, {} days)",
        result.period(),
        result.cycle_days()
    );
    let _ = writeln!(
        summary,
        "  harvested shrimp {} kg",
        format_fixed_f64(result.harvested_shrimp_kg(), 16, 3)
    );
    let _ = writeln!(summary, "  {:<16} {:>16}  activity", "source", "kgCO2e");
    for component in result.breakdown() {
        let activity = component.activity();
        let _ = writeln!(
            summary,
            "  {:<16} {}  {} {}",
            component.source().as_str(),
            format_fixed_f64(component.value_kgco2e(), 16, 3),
            format_fixed_f64(activity.quantity, 0, 3),
            activity.unit.as_str()
        );
    }
    let _ = writeln!(
        summary,
        "  {:<16} {} kgCO2e",
        "total",
        format_fixed_f64(result.total_emissions_kgco2e(), 16, 3)
    );
    let _ = writeln!(
        summary,
        "  {:<16} {} kgCO2e/kg shrimp",
        "intensity",
        format_fixed_f64(result.intensity_kgco2e_per_kg_shrimp(), 16, 3)
    );
    summary
}

pub(super) fn render_factor_listing(registry: &EmissionFactorRegistry) -> String {
    let table = registry.table();
    let mut listing = String::new();
    let _ = writeln!(listing, "Grid electricity (kgCO2e/kWh)");
    for (region, factor) in registry.grid_factors() {
        let _ = writeln!(listing, "  {:<24} {}", region, format_fixed_f64(factor, 8, 3));
    }
    let _ = writeln!(listing, "Feed (kgCO2e/kg)");
    let _ = writeln!(
        listing,
        "  {:<24} {}",
        "default",
        format_fixed_f64(registry.default_feed_factor(), 8, 3)
    );
    for (feed_type, factor) in registry.feed_factors() {
        let _ = writeln!(listing, "  {:<24} {}", feed_type, format_fixed_f64(factor, 8, 3));
    }
    let _ = writeln!(listing, "Fuel (kgCO2e/L @ MJ/L)");
    for (fuel, factor) in [("diesel", table.diesel), ("petrol", table.petrol)] {
        let _ = writeln!(
            listing,
            "  {:<24} {} @ {}",
            fuel,
            format_fixed_f64(factor.kgco2e_per_liter, 8, 3),
            format_fixed_f64(factor.lhv_mj_per_liter, 0, 1)
        );
    }
    let _ = writeln!(
        listing,
        "On-site generation {} kgCO2e/kWh",
        format_fixed_f64(table.on_site_kgco2e_per_kwh, 0, 3)
    );
    let _ = writeln!(
        listing,
        "Seed {} kgCO2e per 1000 PL",
        format_fixed_f64(table.seed_kgco2e_per_thousand_pl, 0, 3)
    );
    listing
}

/// A semi-intensive Ecuadorian farm with every source enabled.
pub(super) fn template_inputs() -> FootprintResult<EstimatorInputs> {
    let grid = EnergySupply::grid("Ecuador");
    let parameters = EstimatorParameters {
        seed: Some(SeedInputs::new(SeedParameters {
            thousand_post_larvae: 2_000.0,
            emission_factor_override: None,
        })?),
        pumping: Some(PumpingModelInputs::new(PumpingParameters {
            pond_area_m2: 50_000.0,
            pond_depth_m: 1.0,
            exchange_fraction_per_day: 0.1,
            pipe_diameter_m: 0.3,
            pipe_length_m: 200.0,
            pump_efficiency: 0.7,
            motor_efficiency: 0.9,
            total_dynamic_head_m: 2.0,
            water_density_kg_m3: 1_000.0,
            head_loss: HeadLossModel::None,
            energy: grid.clone(),
            period: None,
        })?),
        aeration: Some(AerationInputs::new(AerationParameters {
            total_aeration_hp: 50.0,
            hours_per_day: 12.0,
            motor_efficiency: 0.80,
            blower_efficiency: 1.0,
            energy: grid,
            period: None,
        })?),
        soil: Some(SoilInputs::new(SoilParameters {
            stock: SoilCarbonStock::SoilType {
                soil_type: SoilType::Mangrove,
            },
            area_ha: 5.0,
            amortization_years: 20,
            release: ReleaseSchedule::Linear,
        })?),
        pond_gas: Some(PondGasInputs::with_area(50_000.0, SystemType::SemiIntensive)?),
        sequestration: Some(SequestrationInputs::new(SequestrationParameters {
            vegetation_type: VegetationType::Mangroves,
            area_ha: 1.0,
        })?),
        ..EstimatorParameters::new(10_000.0, 90, FeedInputs::total(15_000.0)?)
    };
    EstimatorInputs::new(parameters)
}

#[cfg(test)]
mod tests {
    use super::{format_fixed_f64, render_factor_listing, render_summary, template_inputs};
    use shrimp_core::{EmissionFactorRegistry, Estimator};

    #[test]
    fn fixed_width_float_formatting_is_deterministic() {
        assert_eq!(format_fixed_f64(1.23, 13, 5), "      1.23000");
        assert_eq!(format_fixed_f64(-2.5, 0, 1), "-2.5");
    }

    #[test]
    fn template_scenario_estimates_with_builtin_factors() {
        let inputs = template_inputs().expect("template should validate");
        assert_eq!(inputs.models().len(), 7);
        let result = Estimator::builtin()
            .estimate(&inputs)
            .expect("template should estimate");

        let summary = render_summary(&result);
        assert!(summary.starts_with("Shrimp cycle footprint (cycle, 90 days)"));
        for source in [
            "pumping",
            "aeration",
            "feed",
            "seed",
            "soil",
            "pond_gas",
            "sequestration",
        ] {
            assert!(summary.contains(source), "summary should list {source}");
        }
    }

    #[test]
    fn factor_listing_includes_builtin_regions() {
        let listing = render_factor_listing(&EmissionFactorRegistry::builtin());
        assert!(listing.contains("Ecuador"));
        assert!(listing.contains("El Salvador"));
        assert!(listing.contains("diesel"));
    }
}
