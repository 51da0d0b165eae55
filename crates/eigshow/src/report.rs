use eigshow_core::{EigError, Tolerances};
use nalgebra::{ComplexField, DMatrix};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::decompose::{Backend, EigenResult};
use crate::degeneracy::{degenerate_blocks, DegenerateBlock};
use crate::verify::{diagnose, Diagnostics};

/// Serialisable snapshot of one decomposition and its checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumReport {
    /// Matrix dimension.
    pub dimension: usize,
    /// Backend that produced the decomposition.
    pub backend: Backend,
    /// Ascending eigenvalues.
    pub eigenvalues: Vec<f64>,
    /// Real parts of each eigenvector, in eigenvalue order.
    pub eigenvectors: Vec<Vec<f64>>,
    /// Imaginary parts, present only when some component is non-zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eigenvectors_im: Option<Vec<Vec<f64>>>,
    /// Eigenspaces grouped with the degeneracy tolerance.
    pub blocks: Vec<DegenerateBlock>,
    /// Residual, orthonormality and diagonal-form measurements.
    pub diagnostics: Diagnostics,
    /// Whether the diagnostics passed the tolerances they were built with.
    pub within_tolerance: bool,
    /// Basis-independent fingerprint of the spectrum.
    pub spectrum_hash: String,
}

impl SpectrumReport {
    /// Builds a report for `result`, a decomposition of `matrix`.
    pub fn build<T>(
        matrix: &DMatrix<T>,
        result: &EigenResult<T>,
        tol: &Tolerances,
    ) -> Result<Self, EigError>
    where
        T: ComplexField<RealField = f64>,
    {
        let diagnostics = diagnose(matrix, result)?;
        let columns = |part: fn(T) -> f64| -> Vec<Vec<f64>> {
            result
                .eigenvectors
                .column_iter()
                .map(|column| column.iter().cloned().map(part).collect())
                .collect()
        };
        let imaginary = columns(|value| value.imaginary());
        let has_imaginary = imaginary.iter().flatten().any(|value| *value != 0.0);
        let eigenvalues: Vec<f64> = result.eigenvalues.iter().copied().collect();
        Ok(Self {
            dimension: result.len(),
            backend: result.backend,
            blocks: degenerate_blocks(&eigenvalues, tol.degeneracy),
            spectrum_hash: spectrum_hash(&eigenvalues),
            eigenvalues,
            eigenvectors: columns(|value| value.real()),
            eigenvectors_im: has_imaginary.then_some(imaginary),
            within_tolerance: diagnostics.within(tol),
            diagnostics,
        })
    }
}

/// SHA-256 over eigenvalues rounded to 1e-9, hex encoded.
///
/// The eigenvector basis is not hashed. Spectra that differ by far less than
/// 1e-9 hash alike, except when a value sits next to a rounding half-step,
/// where noise of any size can flip the rounded integer.
pub fn spectrum_hash(eigenvalues: &[f64]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((eigenvalues.len() as u64).to_le_bytes());
    for value in eigenvalues {
        let scaled = (value * 1e9).round() as i64;
        hasher.update(scaled.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_ignores_sub_tolerance_noise() {
        let a = spectrum_hash(&[-0.75, 0.25, 0.25, 0.25]);
        let b = spectrum_hash(&[-0.75 + 1e-13, 0.25, 0.25 - 1e-14, 0.25]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, spectrum_hash(&[-0.75, 0.25, 0.25]));
    }

    #[test]
    fn hash_can_split_at_rounding_half_step() {
        let boundary = 0.5e-9;
        assert_ne!(
            spectrum_hash(&[boundary - 1e-18]),
            spectrum_hash(&[boundary + 1e-18])
        );
    }
}
