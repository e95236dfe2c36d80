use super::CliError;
use super::helpers::{
    load_registry, read_text_file, render_factor_listing, render_summary, template_inputs,
    write_text_artifact,
};
use shrimp_core::Estimator;
use shrimp_core::modules::serialization::{
    factor_table_to_json, inputs_from_json_str, inputs_to_json, result_to_json,
};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct EstimateArgs {
    /// Scenario JSON path
    #[arg(long, value_name = "SCENARIO")]
    inputs: PathBuf,

    /// Emission-factor table JSON path (built-in table when omitted)
    #[arg(long, value_name = "TABLE")]
    factors: Option<PathBuf>,

    /// Write the JSON result to this path
    #[arg(long, value_name = "RESULT")]
    report: Option<PathBuf>,

    /// Print the JSON result instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct FactorsArgs {
    /// Emission-factor table JSON path (built-in table when omitted)
    #[arg(long, value_name = "TABLE")]
    factors: Option<PathBuf>,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

pub(super) fn run_estimate_command(args: EstimateArgs) -> Result<i32, CliError> {
    let registry = load_registry(args.factors.as_deref())?;
    let source = read_text_file(&args.inputs, "scenario")?;
    let inputs = inputs_from_json_str(&source)?;
    tracing::debug!(
        path = %args.inputs.display(),
        sources = inputs.models().len(),
        "loaded scenario"
    );

    let result = Estimator::new(registry).estimate(&inputs)?;
    for component in result.breakdown() {
        tracing::debug!(
            source = %component.source(),
            value_kgco2e = component.value_kgco2e(),
            activity = component.activity().quantity,
            unit = component.activity().unit.as_str(),
            "component estimated"
        );
    }

    let json = result_to_json(&result)?;
    if let Some(report) = &args.report {
        write_text_artifact(report, &json)?;
        tracing::info!(path = %report.display(), "wrote result report");
    }

    if args.json {
        print!("{json}");
    } else {
        print!("{}", render_summary(&result));
    }
    Ok(0)
}

pub(super) fn run_factors_command(args: FactorsArgs) -> Result<i32, CliError> {
    let registry = load_registry(args.factors.as_deref())?;
    if args.json {
        print!("{}", factor_table_to_json(&registry.table())?);
    } else {
        print!("{}", render_factor_listing(&registry));
    }
    Ok(0)
}

pub(super) fn run_template_command() -> Result<i32, CliError> {
    let inputs = template_inputs()?;
    print!("{}", inputs_to_json(&inputs)?);
    Ok(0)
}
