use eigshow_core::{EigError, ErrorInfo, Tolerances};
use nalgebra::{ComplexField, DMatrix};
use serde::{Deserialize, Serialize};

use crate::decompose::{ensure_square, EigenResult};

/// Maximum deviations measured for a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Diagnostics {
    /// Largest component of `M v_i - λ_i v_i` over all pairs.
    pub max_residual: f64,
    /// Largest entry of `|V† V - I|`.
    pub orthonormality_defect: f64,
    /// Largest off-diagonal magnitude of `V† M V`.
    pub max_off_diagonal: f64,
    /// Largest gap between the diagonal of `V† M V` and the eigenvalues.
    pub max_diagonal_error: f64,
}

impl Diagnostics {
    /// Whether every measurement is within its tolerance.
    pub fn within(&self, tol: &Tolerances) -> bool {
        self.max_residual < tol.residual
            && self.orthonormality_defect < tol.orthonormality
            && self.max_off_diagonal < tol.off_diagonal
            && self.max_diagonal_error < tol.diagonal
    }

    /// Converts a tolerance violation into an error naming the failed checks.
    pub fn ensure_within(&self, tol: &Tolerances) -> Result<(), EigError> {
        if self.within(tol) {
            return Ok(());
        }
        let mut info = ErrorInfo::new("verification-failed", "decomposition exceeds tolerances");
        let checks = [
            ("max_residual", self.max_residual, tol.residual),
            (
                "orthonormality_defect",
                self.orthonormality_defect,
                tol.orthonormality,
            ),
            ("max_off_diagonal", self.max_off_diagonal, tol.off_diagonal),
            ("max_diagonal_error", self.max_diagonal_error, tol.diagonal),
        ];
        for (name, value, limit) in checks {
            if !(value < limit) {
                info = info.with_context(name, format!("{value:e} >= {limit:e}"));
            }
        }
        Err(EigError::Numerical(info))
    }
}

/// Computes `V† M V`, which is diagonal with the eigenvalues for a valid
/// decomposition.
pub fn verify<T>(matrix: &DMatrix<T>, result: &EigenResult<T>) -> Result<DMatrix<T>, EigError>
where
    T: ComplexField<RealField = f64>,
{
    ensure_compatible(matrix, result)?;
    let vectors = &result.eigenvectors;
    Ok(vectors.adjoint() * matrix * vectors)
}

/// Measures residual, orthonormality and diagonal-form deviations.
pub fn diagnose<T>(matrix: &DMatrix<T>, result: &EigenResult<T>) -> Result<Diagnostics, EigError>
where
    T: ComplexField<RealField = f64>,
{
    ensure_compatible(matrix, result)?;
    let dim = result.len();
    let vectors = &result.eigenvectors;

    let mut max_residual: f64 = 0.0;
    for index in 0..dim {
        let column = vectors.column(index);
        let lambda = T::from_real(result.eigenvalues[index]);
        let residual = matrix * &column - column * lambda;
        max_residual = max_residual.max(max_modulus(residual.iter()));
    }

    let gram = vectors.adjoint() * vectors;
    let identity = DMatrix::<T>::identity(dim, dim);
    let orthonormality_defect = max_modulus((gram - identity).iter());

    let diagonal_form = verify(matrix, result)?;
    let mut max_off_diagonal: f64 = 0.0;
    let mut max_diagonal_error: f64 = 0.0;
    for row in 0..dim {
        for col in 0..dim {
            let entry = diagonal_form[(row, col)].clone();
            if row == col {
                let expected = T::from_real(result.eigenvalues[row]);
                max_diagonal_error = max_diagonal_error.max((entry - expected).modulus());
            } else {
                max_off_diagonal = max_off_diagonal.max(entry.modulus());
            }
        }
    }

    Ok(Diagnostics {
        max_residual,
        orthonormality_defect,
        max_off_diagonal,
        max_diagonal_error,
    })
}

fn max_modulus<'a, T>(values: impl Iterator<Item = &'a T>) -> f64
where
    T: ComplexField<RealField = f64>,
{
    values.fold(0.0, |acc, value| acc.max(value.clone().modulus()))
}

fn ensure_compatible<T>(matrix: &DMatrix<T>, result: &EigenResult<T>) -> Result<(), EigError>
where
    T: ComplexField<RealField = f64>,
{
    ensure_square(matrix)?;
    if matrix.nrows() != result.len() || result.eigenvectors.shape() != matrix.shape() {
        return Err(EigError::Shape(
            ErrorInfo::new("dimension-mismatch", "decomposition does not match matrix")
                .with_context("matrix", matrix.nrows().to_string())
                .with_context("eigenpairs", result.len().to_string()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::decompose::decompose;

    #[test]
    fn diagonal_form_of_symmetric_pair() {
        let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let result = decompose(&matrix).unwrap();
        let form = verify(&matrix, &result).unwrap();
        assert!((form[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((form[(1, 1)] - 3.0).abs() < 1e-12);
        assert!(form[(0, 1)].abs() < 1e-12);
        let diag = diagnose(&matrix, &result).unwrap();
        assert!(diag.within(&Tolerances::default()));
        assert!(diag.ensure_within(&Tolerances::default()).is_ok());
    }

    #[test]
    fn wrong_eigenvalues_fail_verification() {
        let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let mut result = decompose(&matrix).unwrap();
        result.eigenvalues = DVector::from_vec(vec![0.0, 3.0]);
        let diag = diagnose(&matrix, &result).unwrap();
        assert!(diag.max_residual > 0.5);
        let err = diag.ensure_within(&Tolerances::default()).unwrap_err();
        assert_eq!(err.info().code, "verification-failed");
        assert!(err.info().context.contains_key("max_residual"));
        assert!(!err.info().context.contains_key("max_off_diagonal"));
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let small = DMatrix::<f64>::identity(2, 2);
        let result = decompose(&DMatrix::<f64>::identity(3, 3)).unwrap();
        let err = verify(&small, &result).unwrap_err();
        assert_eq!(err.info().code, "dimension-mismatch");
    }

    #[test]
    fn complex_residual_measures_every_column() {
        let i = num_complex::Complex64::i();
        let one = num_complex::Complex64::new(1.0, 0.0);
        let matrix = DMatrix::from_row_slice(2, 2, &[one, -i, i, one]);
        let mut result = decompose(&matrix).unwrap();
        assert!(diagnose(&matrix, &result).unwrap().max_residual < 1e-12);
        result.eigenvalues[1] += 0.25;
        let diag = diagnose(&matrix, &result).unwrap();
        assert!((diag.max_residual - 0.25 / 2f64.sqrt()).abs() < 1e-12);
    }
}
