use std::fs;

use eigshow::{DemoConfig, EigError, RenderOpts, SolverOpts};

#[test]
fn empty_yaml_uses_defaults() -> Result<(), EigError> {
    let config = DemoConfig::from_yaml_str("{}")?;
    assert_eq!(config, DemoConfig::default());
    assert_eq!(config.solver, SolverOpts::default());
    assert_eq!(config.render, RenderOpts::default());
    assert_eq!(config.render.value_precision, 3);
    assert_eq!(config.field, 0.5);
    Ok(())
}

#[test]
fn partial_yaml_overrides_fields() -> Result<(), EigError> {
    let text = "solver:\n  max_iterations: 50\ntolerances:\n  residual: 1.0e-6\nfield: 0.25\n";
    let config = DemoConfig::from_yaml_str(text)?;
    assert_eq!(config.solver.max_iterations, 50);
    assert_eq!(config.solver.epsilon, f64::EPSILON);
    assert_eq!(config.tolerances.residual, 1e-6);
    assert_eq!(config.tolerances.diagonal, 1e-9);
    assert_eq!(config.field, 0.25);
    assert_eq!(config.coupling, 1.0);
    Ok(())
}

#[test]
fn load_roundtrips_through_file() -> Result<(), EigError> {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("demo.yaml");
    let mut config = DemoConfig::default();
    config.render.component_precision = Some(4);
    fs::write(&path, config.to_yaml()?).expect("write config");
    assert_eq!(DemoConfig::load(&path)?, config);
    Ok(())
}

#[test]
fn malformed_yaml_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "solver: [1, 2").expect("write config");
    let err = DemoConfig::load(&path).unwrap_err();
    assert!(matches!(err, EigError::Config(_)));
    assert_eq!(err.info().code, "config-parse");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn missing_file_is_config_error() {
    let err = DemoConfig::load(std::path::Path::new("/nonexistent/eigshow.yaml")).unwrap_err();
    assert_eq!(err.info().code, "config-read");
}
