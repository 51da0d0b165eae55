//! Sample spin-½ Hamiltonians.

use eigshow_core::{EigError, ErrorInfo};
use nalgebra::{ComplexField, DMatrix};
use num_complex::Complex64;

use crate::decompose::ensure_square;

/// Largest chain handled by the dense builders (dimension `2^12`).
pub const MAX_SITES: usize = 12;

/// Cartesian component of a spin-½ operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinComponent {
    /// `S_x`
    X,
    /// `S_y`
    Y,
    /// `S_z`
    Z,
}

impl SpinComponent {
    /// All three components in `x, y, z` order.
    pub const ALL: [SpinComponent; 3] = [SpinComponent::X, SpinComponent::Y, SpinComponent::Z];
}

/// Two-site Heisenberg Hamiltonian in the `(↑↓, ↓↑, ↑↑, ↓↓)` basis.
pub fn two_site_heisenberg() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        4,
        4,
        &[
            -0.25, 0.5, 0.0, 0.0, //
            0.5, -0.25, 0.0, 0.0, //
            0.0, 0.0, 0.25, 0.0, //
            0.0, 0.0, 0.0, 0.25,
        ],
    )
}

/// Single-site spin-½ operator (`ħ = 1`).
pub fn spin_operator(component: SpinComponent) -> DMatrix<Complex64> {
    let zero = Complex64::new(0.0, 0.0);
    let half = Complex64::new(0.5, 0.0);
    let half_i = Complex64::new(0.0, 0.5);
    match component {
        SpinComponent::X => DMatrix::from_row_slice(2, 2, &[zero, half, half, zero]),
        SpinComponent::Y => DMatrix::from_row_slice(2, 2, &[zero, -half_i, half_i, zero]),
        SpinComponent::Z => DMatrix::from_row_slice(2, 2, &[half, zero, zero, -half]),
    }
}

/// Embeds a single-site operator at `site` of an `n_sites` chain.
///
/// Site 0 is the most significant tensor factor.
pub fn site_operator(
    op: &DMatrix<Complex64>,
    site: usize,
    n_sites: usize,
) -> Result<DMatrix<Complex64>, EigError> {
    check_sites(n_sites, &[site])?;
    let identity = DMatrix::<Complex64>::identity(2, 2);
    let mut out = DMatrix::<Complex64>::identity(1, 1);
    for position in 0..n_sites {
        out = if position == site {
            out.kronecker(op)
        } else {
            out.kronecker(&identity)
        };
    }
    Ok(out)
}

/// Exchange term `J S_i · S_j`.
pub fn heisenberg_bond(
    n_sites: usize,
    i: usize,
    j: usize,
    coupling: f64,
) -> Result<DMatrix<Complex64>, EigError> {
    check_sites(n_sites, &[i, j])?;
    if i == j {
        return Err(EigError::Shape(
            ErrorInfo::new("invalid-site", "bond endpoints must differ")
                .with_context("site", i.to_string()),
        ));
    }
    let dim = 1usize << n_sites;
    let mut out = DMatrix::<Complex64>::zeros(dim, dim);
    for component in SpinComponent::ALL {
        let op = spin_operator(component);
        out += site_operator(&op, i, n_sites)? * site_operator(&op, j, n_sites)?;
    }
    Ok(out * Complex64::new(coupling, 0.0))
}

/// Open Heisenberg chain `J Σ S_i · S_{i+1}`.
pub fn heisenberg_chain(n_sites: usize, coupling: f64) -> Result<DMatrix<Complex64>, EigError> {
    check_sites(n_sites, &[])?;
    let dim = 1usize << n_sites;
    let mut out = DMatrix::<Complex64>::zeros(dim, dim);
    for site in 1..n_sites {
        out += heisenberg_bond(n_sites, site - 1, site, coupling)?;
    }
    Ok(out)
}

/// Three-site sample with a threefold-degenerate spectrum: an exchange bond
/// on sites 0 and 1 plus a Zeeman field on site 2.
///
/// Eigenvalues are `-3J/4 ± h/2` (simple) and `J/4 ± h/2` (threefold).
pub fn degenerate_sample(coupling: f64, field: f64) -> Result<DMatrix<f64>, EigError> {
    let bond = heisenberg_bond(3, 0, 1, coupling)?;
    let zeeman =
        site_operator(&spin_operator(SpinComponent::Z), 2, 3)? * Complex64::new(field, 0.0);
    to_real(&(bond + zeeman), 1e-12)
}

/// Drops imaginary parts, failing if any exceeds `tol`.
pub fn to_real(matrix: &DMatrix<Complex64>, tol: f64) -> Result<DMatrix<f64>, EigError> {
    let nrows = matrix.nrows();
    if let Some(index) = matrix.iter().position(|value| value.im.abs() > tol) {
        return Err(EigError::Numerical(
            ErrorInfo::new("complex-entry", "matrix has non-negligible imaginary parts")
                .with_context("row", (index % nrows.max(1)).to_string())
                .with_context("col", (index / nrows.max(1)).to_string()),
        ));
    }
    Ok(matrix.map(|value| value.re))
}

/// Largest `|A_ij - conj(A_ji)|`; zero for an exactly Hermitian matrix.
pub fn hermiticity_defect<T>(matrix: &DMatrix<T>) -> Result<f64, EigError>
where
    T: ComplexField<RealField = f64>,
{
    ensure_square(matrix)?;
    let dim = matrix.nrows();
    let mut defect: f64 = 0.0;
    for row in 0..dim {
        for col in row..dim {
            let gap = matrix[(row, col)].clone() - matrix[(col, row)].clone().conjugate();
            defect = defect.max(gap.modulus());
        }
    }
    Ok(defect)
}

fn check_sites(n_sites: usize, sites: &[usize]) -> Result<(), EigError> {
    if n_sites == 0 || n_sites > MAX_SITES {
        return Err(EigError::Shape(
            ErrorInfo::new("invalid-chain", "chain length out of range")
                .with_context("n_sites", n_sites.to_string())
                .with_context("max", MAX_SITES.to_string()),
        ));
    }
    if let Some(site) = sites.iter().find(|&&site| site >= n_sites) {
        return Err(EigError::Shape(
            ErrorInfo::new("invalid-site", "site index outside chain")
                .with_context("site", site.to_string())
                .with_context("n_sites", n_sites.to_string()),
        ));
    }
    Ok(())
}
