use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FEED_ONLY_SCENARIO: &str = r#"
{
  "harvested_shrimp_kg": 10000.0,
  "period": "cycle",
  "cycle_days": 90,
  "feed": { "total_feed_kg": 15000.0 }
}
"#;

#[test]
fn estimate_prints_summary_and_writes_report() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario_path = temp.path().join("scenario.json");
    let report_path = temp.path().join("reports/result.json");
    write_file(&scenario_path, FEED_ONLY_SCENARIO);

    let output = run_cli(&[
        "estimate",
        "--inputs",
        path_arg(&scenario_path),
        "--report",
        path_arg(&report_path),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shrimp cycle footprint (cycle, 90 days)"));
    assert!(stdout.contains("feed"));
    assert!(report_path.exists(), "report file should be created");

    let report: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report should be readable"),
    )
    .expect("report should be valid JSON");
    assert_eq!(report["total_emissions_kgco2e"].as_f64(), Some(15_000.0 * 8.7));
    assert_eq!(
        report["intensity_kgco2e_per_kg_shrimp"].as_f64(),
        Some(15_000.0 * 8.7 / 10_000.0)
    );
    assert_eq!(report["breakdown"][0]["source"], "feed");
    assert_eq!(report["breakdown"][0]["activity"]["unit"], "kg_feed");
}

#[test]
fn estimate_json_flag_prints_the_result_document() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario_path = temp.path().join("scenario.json");
    write_file(&scenario_path, FEED_ONLY_SCENARIO);

    let output = run_cli(&["estimate", "--inputs", path_arg(&scenario_path), "--json"]);
    assert!(output.status.success());

    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed["period"], "cycle");
    assert_eq!(parsed["cycle_days"], 90);
    assert_eq!(parsed["breakdown"].as_array().map(Vec::len), Some(1));
}

#[test]
fn custom_factor_table_replaces_grid_section() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario_path = temp.path().join("scenario.json");
    let factors_path = temp.path().join("factors.json");
    write_file(
        &scenario_path,
        r#"
        {
          "harvested_shrimp_kg": 1000.0,
          "cycle_days": 10,
          "feed": { "total_feed_kg": 0.0 },
          "aeration": {
            "total_aeration_hp": 10.0,
            "hours_per_day": 10.0,
            "motor_efficiency": 1.0,
            "energy": { "source": "grid", "grid_country": "Testland" }
          }
        }
        "#,
    );
    write_file(
        &factors_path,
        r#"{ "grid_kgco2e_per_kwh": { "Testland": 1.0 } }"#,
    );

    let output = run_cli(&[
        "estimate",
        "--inputs",
        path_arg(&scenario_path),
        "--factors",
        path_arg(&factors_path),
        "--json",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    let expected_kwh = 10.0 * 0.7457 / (1.0 * 1.0) * 10.0 * 10.0;
    let aeration = parsed["breakdown"][0]["value_kgco2e"]
        .as_f64()
        .expect("aeration value should be numeric");
    assert!((aeration - expected_kwh).abs() <= 1.0e-9 * expected_kwh);
}

#[test]
fn unknown_grid_country_exits_with_reference_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario_path = temp.path().join("scenario.json");
    let report_path = temp.path().join("result.json");
    write_file(
        &scenario_path,
        r#"
        {
          "harvested_shrimp_kg": 10000.0,
          "cycle_days": 90,
          "feed": { "total_feed_kg": 15000.0 },
          "aeration": {
            "total_aeration_hp": 50.0,
            "hours_per_day": 12.0,
            "energy": { "source": "grid", "grid_country": "Atlantis" }
          }
        }
        "#,
    );

    let output = run_cli(&[
        "estimate",
        "--inputs",
        path_arg(&scenario_path),
        "--report",
        path_arg(&report_path),
    ]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [FACTOR.GRID_COUNTRY]"),
        "stderr should carry the diagnostic line: {stderr}"
    );
    assert!(!report_path.exists(), "no report should be written on failure");
}

#[test]
fn failure_categories_map_to_exit_codes() {
    let temp = TempDir::new().expect("tempdir should be created");
    let cases = [
        (
            "missing-cycle-days.json",
            r#"{ "harvested_shrimp_kg": 10.0, "feed": { "total_feed_kg": 1.0 } }"#,
            3,
            "INPUT.CYCLE_DAYS",
        ),
        (
            "zero-harvest.json",
            r#"{ "harvested_shrimp_kg": 0.0, "cycle_days": 30, "feed": { "total_feed_kg": 1.0 } }"#,
            5,
            "INPUT.HARVESTED_SHRIMP_KG",
        ),
        (
            "bad-efficiency.json",
            r#"{
              "harvested_shrimp_kg": 10.0,
              "cycle_days": 30,
              "feed": { "total_feed_kg": 1.0 },
              "aeration": {
                "total_aeration_hp": 5.0,
                "hours_per_day": 30.0,
                "energy": { "source": "solar" }
              }
            }"#,
            2,
            "INPUT.SCENARIO_FORMAT",
        ),
    ];

    for (file_name, scenario, exit_code, placeholder) in cases {
        let scenario_path = temp.path().join(file_name);
        write_file(&scenario_path, scenario);
        let output = run_cli(&["estimate", "--inputs", path_arg(&scenario_path)]);

        assert_eq!(output.status.code(), Some(exit_code), "{file_name}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains(&format!("ERROR: [{placeholder}]")),
            "{file_name}: {stderr}"
        );
    }
}

#[test]
fn missing_scenario_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_cli(&[
        "estimate",
        "--inputs",
        path_arg(&temp.path().join("absent.json")),
    ]);
    assert_eq!(output.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read scenario"));
}

#[test]
fn missing_required_argument_is_a_usage_error() {
    let output = run_cli(&["estimate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CLI_USAGE]"));
}

#[test]
fn template_output_round_trips_through_estimate() {
    let temp = TempDir::new().expect("tempdir should be created");
    let template = run_cli(&["template"]);
    assert!(template.status.success());

    let scenario_path = temp.path().join("template.json");
    fs::write(&scenario_path, &template.stdout).expect("template should be written");

    let output = run_cli(&["estimate", "--inputs", path_arg(&scenario_path), "--json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    let sources: Vec<&str> = parsed["breakdown"]
        .as_array()
        .expect("breakdown should be an array")
        .iter()
        .filter_map(|component| component["source"].as_str())
        .collect();
    assert_eq!(
        sources,
        [
            "pumping",
            "aeration",
            "feed",
            "seed",
            "soil",
            "pond_gas",
            "sequestration"
        ]
    );
}

#[test]
fn factors_command_lists_builtin_table() {
    let output = run_cli(&["factors"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Ecuador"));

    let json = run_cli(&["factors", "--json"]);
    assert!(json.status.success());
    let parsed: Value = serde_json::from_slice(&json.stdout).expect("stdout should be valid JSON");
    assert_eq!(parsed["grid_kgco2e_per_kwh"]["Ecuador"].as_f64(), Some(0.206));
    assert_eq!(parsed["default_feed_kgco2e_per_kg"].as_f64(), Some(8.7));
}

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_shrimp-footprint");
    Command::new(binary_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("shrimp-footprint should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths should be valid UTF-8")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}
