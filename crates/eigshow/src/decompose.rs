use std::fmt;

use eigshow_core::{EigError, ErrorInfo};
use faer::{Mat, Side};
use nalgebra::{ComplexField, DMatrix, DVector, SymmetricEigen};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::SolverOpts;

/// Ascending eigenvalues paired with their eigenvector columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenResult<T: ComplexField<RealField = f64>> {
    /// Eigenvalues sorted ascending.
    pub eigenvalues: DVector<f64>,
    /// Unit-norm eigenvectors; column `i` belongs to `eigenvalues[i]`.
    pub eigenvectors: DMatrix<T>,
    /// Solver that produced the decomposition.
    pub backend: Backend,
}

impl<T: ComplexField<RealField = f64>> EigenResult<T> {
    fn empty(backend: Backend) -> Self {
        Self {
            eigenvalues: DVector::zeros(0),
            eigenvectors: DMatrix::from_element(0, 0, T::zero()),
            backend,
        }
    }

    /// Number of eigenpairs.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Whether the decomposed matrix was empty.
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Copies out the eigenvector paired with eigenvalue `index`.
    pub fn eigenvector(&self, index: usize) -> DVector<T> {
        self.eigenvectors.column(index).into_owned()
    }

    /// Promotes the eigenvectors to complex scalars.
    pub fn to_complex(&self) -> EigenResult<Complex64> {
        EigenResult {
            eigenvalues: self.eigenvalues.clone(),
            eigenvectors: self
                .eigenvectors
                .map(|value| Complex64::new(value.clone().real(), value.imaginary())),
            backend: self.backend,
        }
    }
}

/// Linear algebra library used to diagonalise a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// `nalgebra::SymmetricEigen`: Householder tridiagonalisation followed by
    /// implicit QR sweeps. Honours [`SolverOpts`].
    Nalgebra,
    /// `faer` self-adjoint eigendecomposition with its own tridiagonal
    /// reduction. Runs in real arithmetic and ignores [`SolverOpts`].
    Faer,
}

impl Backend {
    /// Both backends in comparison order.
    pub const ALL: [Backend; 2] = [Backend::Nalgebra, Backend::Faer];

    /// Stable label used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Nalgebra => "nalgebra",
            Backend::Faer => "faer",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decomposes a Hermitian matrix with the default solver options.
pub fn decompose<T>(matrix: &DMatrix<T>) -> Result<EigenResult<T>, EigError>
where
    T: ComplexField<RealField = f64>,
{
    decompose_with(matrix, &SolverOpts::default())
}

/// Decomposes a Hermitian matrix into ascending eigenvalues and orthonormal
/// eigenvector columns.
///
/// Symmetry is not checked; only the lower triangle is meaningful to the
/// solver. Eigenvalues that tie keep the order the solver produced.
pub fn decompose_with<T>(
    matrix: &DMatrix<T>,
    opts: &SolverOpts,
) -> Result<EigenResult<T>, EigError>
where
    T: ComplexField<RealField = f64>,
{
    ensure_square(matrix)?;
    let dim = matrix.nrows();
    if dim == 0 {
        return Ok(EigenResult::empty(Backend::Nalgebra));
    }
    ensure_finite(matrix)?;

    let eigen = SymmetricEigen::try_new(matrix.clone(), opts.epsilon, opts.max_iterations)
        .ok_or_else(|| {
            EigError::Numerical(
                ErrorInfo::new("no-convergence", "eigen-solver did not converge")
                    .with_context("dim", dim.to_string())
                    .with_context("max_iterations", opts.max_iterations.to_string())
                    .with_hint("raise solver.max_iterations or set it to 0"),
            )
        })?;

    Ok(sorted_pairs(
        dim,
        Backend::Nalgebra,
        |index| eigen.eigenvalues[index],
        |row, col| eigen.eigenvectors[(row, col)].clone(),
    ))
}

/// Runs a real symmetric matrix through the selected backend.
///
/// Eigenvectors are lifted to `Complex64` so results of both backends can
/// be compared directly.
pub fn decompose_backend(
    matrix: &DMatrix<f64>,
    backend: Backend,
    opts: &SolverOpts,
) -> Result<EigenResult<Complex64>, EigError> {
    log::debug!("decomposing with the {backend} backend");
    let result = match backend {
        Backend::Nalgebra => decompose_with(matrix, opts)?,
        Backend::Faer => decompose_faer(matrix)?,
    };
    Ok(result.to_complex())
}

fn decompose_faer(matrix: &DMatrix<f64>) -> Result<EigenResult<f64>, EigError> {
    ensure_square(matrix)?;
    let dim = matrix.nrows();
    if dim == 0 {
        return Ok(EigenResult::empty(Backend::Faer));
    }
    ensure_finite(matrix)?;

    let input = Mat::<f64>::from_fn(dim, dim, |row, col| matrix[(row, col)]);
    let eigen = input.as_ref().self_adjoint_eigen(Side::Lower).map_err(|err| {
        EigError::Numerical(
            ErrorInfo::new("no-convergence", "eigen-solver did not converge")
                .with_context("dim", dim.to_string())
                .with_context("backend", Backend::Faer.label())
                .with_context("reason", format!("{err:?}")),
        )
    })?;
    let values = eigen.S().column_vector();
    let vectors = eigen.U();
    Ok(sorted_pairs(
        dim,
        Backend::Faer,
        |index| values[index],
        |row, col| vectors[(row, col)],
    ))
}

/// Reorders solver output so eigenvalues ascend; ties keep solver order.
fn sorted_pairs<T>(
    dim: usize,
    backend: Backend,
    value: impl Fn(usize) -> f64,
    component: impl Fn(usize, usize) -> T,
) -> EigenResult<T>
where
    T: ComplexField<RealField = f64>,
{
    let mut order: Vec<usize> = (0..dim).collect();
    order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

    let eigenvalues = DVector::from_iterator(dim, order.iter().map(|&idx| value(idx)));
    let eigenvectors = DMatrix::from_fn(dim, dim, |row, col| component(row, order[col]));
    log::debug!(
        "{backend} decomposed {dim}x{dim} matrix: lowest={:.6}, highest={:.6}",
        eigenvalues[0],
        eigenvalues[dim - 1]
    );
    EigenResult {
        eigenvalues,
        eigenvectors,
        backend,
    }
}

fn ensure_finite<T: ComplexField>(matrix: &DMatrix<T>) -> Result<(), EigError> {
    let dim = matrix.nrows().max(1);
    match matrix.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(EigError::non_finite(index % dim, index / dim)),
        None => Ok(()),
    }
}

pub(crate) fn ensure_square<T: ComplexField>(matrix: &DMatrix<T>) -> Result<(), EigError> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(EigError::non_square(matrix.nrows(), matrix.ncols()))
    }
}
