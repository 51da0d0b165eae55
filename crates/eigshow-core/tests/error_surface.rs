use eigshow_core::errors::{EigError, ErrorInfo};
use eigshow_core::Tolerances;

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rows", "3")
        .with_context("reason", "example")
}

#[test]
fn shape_error_surface() {
    let err = EigError::non_square(3, 4);
    assert_eq!(err.info().code, "non-square");
    assert_eq!(err.info().context.get("rows").map(String::as_str), Some("3"));
    assert_eq!(err.info().context.get("cols").map(String::as_str), Some("4"));
}

#[test]
fn numerical_error_surface() {
    let err = EigError::non_finite(2, 1);
    assert_eq!(err.info().code, "non-finite-entry");
    assert_eq!(err.info().context.get("row").map(String::as_str), Some("2"));
    assert_eq!(err.info().context.get("col").map(String::as_str), Some("1"));
    assert!(matches!(err, EigError::Numerical(_)));
}

#[test]
fn config_error_surface() {
    let err = EigError::Config(sample_info("CF001", "bad yaml"));
    assert_eq!(err.info().code, "CF001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = EigError::Serde(sample_info("S001", "schema mismatch").with_hint("regenerate"));
    let text = err.to_string();
    assert!(text.starts_with("serde error: schema mismatch (code: S001)"));
    assert!(text.contains("rows=3"));
    assert!(text.ends_with("hint: regenerate"));
}

#[test]
fn error_serde_roundtrip() {
    let err = EigError::non_square(2, 5);
    let json = serde_json::to_string(&err).expect("encode");
    assert!(json.contains("\"family\":\"Shape\""));
    let restored: EigError = serde_json::from_str(&json).expect("decode");
    assert_eq!(err, restored);
}

#[test]
fn tolerances_fill_missing_fields() {
    let tol: Tolerances = serde_yaml::from_str("residual: 1.0e-6\n").expect("yaml");
    assert_eq!(tol.residual, 1e-6);
    assert_eq!(tol.degeneracy, Tolerances::default().degeneracy);
}

#[test]
fn comparison_thresholds_decode_independently() {
    let text = "residual: 1.0e-6\nprojector_distance: 1.0e-7\nbasis_divergence: 1.0e-3\n";
    let tol: Tolerances = serde_yaml::from_str(text).expect("yaml");
    assert_eq!(tol.projector_distance, 1e-7);
    assert_eq!(tol.basis_divergence, 1e-3);
    assert_eq!(tol.eigenvalue_gap, Tolerances::default().eigenvalue_gap);
    assert_eq!(tol.orthonormality, Tolerances::default().orthonormality);
}
