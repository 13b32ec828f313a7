use std::process::{Command, Output};

use approx::assert_relative_eq;
use serde_json::Value;

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .args(["--log-level", "warn"])
        .output()
        .expect("binary should run")
}

fn json(output: &Output) -> Value {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn paraboloid_reports_start_point() {
    let output = run(env!("CARGO_BIN_EXE_paraboloid"), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("algorithm = ip"));
    assert!(stdout.contains("Objective value = -15.00"));
    assert!(stdout.contains("(x, y) = (3.00, -4.00)"));
    assert!(stdout.contains("infeasible"));
}

#[test]
fn paraboloid_at_constrained_minimum() {
    let output = run(
        env!("CARGO_BIN_EXE_paraboloid"),
        &["--algorithm", "mma", "--x", "7", "--y", "-7", "--format", "json"],
    );
    let report = json(&output);

    assert_relative_eq!(report["objective"].as_f64().unwrap(), -27.0);
    assert_eq!(report["feasible"], Value::Bool(true));
    assert_eq!(report["driver"]["options"]["algorithm"], "mma");
}

#[test]
fn paraboloid_rejects_unknown_algorithm() {
    let output = run(env!("CARGO_BIN_EXE_paraboloid"), &["--algorithm", "sqp"]);

    assert!(!output.status.success());
}

#[test]
fn brachistochrone_default_setup() {
    let output = run(
        env!("CARGO_BIN_EXE_brachistochrone"),
        &["--format", "json", "--check-partials"],
    );
    let report = json(&output);

    assert_eq!(report["driver"]["options"]["optimizer"], "ParOpt");
    assert_eq!(report["driver"]["opt_settings"]["algorithm"], "tr");
    assert_eq!(report["guess"]["x"].as_array().unwrap().len(), 11);
    assert_eq!(report["guess"]["theta"].as_array().unwrap().len(), 21);
    assert_eq!(report["nodes"]["xdot"].as_array().unwrap().len(), 30);

    let checks = report["partials"].as_array().unwrap();
    assert_eq!(checks.len(), 9);
    assert!(checks.iter().all(|c| c["comparison"]["passed"] == Value::Bool(true)));
}

#[test]
fn brachistochrone_interior_point_settings() {
    let output = run(
        env!("CARGO_BIN_EXE_brachistochrone"),
        &["--algorithm", "ip", "--num-segments", "4", "--order", "5", "--format", "json"],
    );
    let report = json(&output);

    assert_eq!(report["driver"]["opt_settings"]["barrier_strategy"], "mehrotra");
    assert_eq!(report["nodes"]["ptau"].as_array().unwrap().len(), 20);
    assert!(report.get("partials").is_none());
}

#[test]
fn brachistochrone_rejects_even_order() {
    let output = run(env!("CARGO_BIN_EXE_brachistochrone"), &["--order", "4"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid transcription"));
}
