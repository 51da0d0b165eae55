use eigshow::{decompose, decompose_with, EigError, SolverOpts};
use nalgebra::DMatrix;

fn hilbert(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |row, col| 1.0 / (row + col + 1) as f64)
}

#[test]
fn iteration_cap_surfaces_no_convergence() {
    let opts = SolverOpts {
        max_iterations: 1,
        ..SolverOpts::default()
    };
    let err = decompose_with(&hilbert(10), &opts).unwrap_err();
    assert!(matches!(err, EigError::Numerical(_)));
    assert_eq!(err.info().code, "no-convergence");
    assert_eq!(err.info().context.get("dim").map(String::as_str), Some("10"));
    assert!(err.info().hint.is_some());
}

#[test]
fn unlimited_iterations_converge() -> Result<(), EigError> {
    let opts = SolverOpts {
        max_iterations: 0,
        ..SolverOpts::default()
    };
    let result = decompose_with(&hilbert(10), &opts)?;
    assert_eq!(result.len(), 10);
    assert!((result.eigenvalues[9] - 1.7519).abs() < 1e-3);
    Ok(())
}

#[test]
fn non_square_is_shape_error_before_solving() {
    let err = decompose(&DMatrix::<f64>::zeros(3, 2)).unwrap_err();
    assert!(matches!(err, EigError::Shape(_)));
    assert_eq!(err.info().code, "non-square");
}

#[test]
fn infinite_entry_is_numerical_error() {
    let mut matrix = hilbert(3);
    matrix[(0, 0)] = f64::INFINITY;
    let err = decompose(&matrix).unwrap_err();
    assert_eq!(err.info().code, "non-finite-entry");
}
