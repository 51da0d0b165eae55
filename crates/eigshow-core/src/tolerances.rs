use serde::{Deserialize, Serialize};

const DEFAULT_TOLERANCE: f64 = 1e-9;

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Absolute thresholds used when checking a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Maximum accepted `|M v - λ v|` component.
    #[serde(default = "default_tolerance")]
    pub residual: f64,
    /// Maximum accepted deviation of `V† V` from the identity.
    #[serde(default = "default_tolerance")]
    pub orthonormality: f64,
    /// Magnitude below which an off-diagonal entry of `V† M V` counts as zero.
    #[serde(default = "default_tolerance")]
    pub off_diagonal: f64,
    /// Maximum accepted gap between the diagonal of `V† M V` and the eigenvalues.
    #[serde(default = "default_tolerance")]
    pub diagonal: f64,
    /// Gap under which neighbouring eigenvalues are treated as degenerate.
    #[serde(default = "default_tolerance")]
    pub degeneracy: f64,
    /// Largest eigenvalue difference under which two decompositions of one
    /// matrix count as having the same spectrum.
    #[serde(default = "default_tolerance")]
    pub eigenvalue_gap: f64,
    /// Largest accepted entry of `|P_a - P_b|` for two eigenspace projectors.
    #[serde(default = "default_tolerance")]
    pub projector_distance: f64,
    /// Phase-aligned component difference above which two eigenvectors are
    /// reported as a different basis choice. Never affects equivalence.
    #[serde(default = "default_tolerance")]
    pub basis_divergence: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            residual: DEFAULT_TOLERANCE,
            orthonormality: DEFAULT_TOLERANCE,
            off_diagonal: DEFAULT_TOLERANCE,
            diagonal: DEFAULT_TOLERANCE,
            degeneracy: DEFAULT_TOLERANCE,
            eigenvalue_gap: DEFAULT_TOLERANCE,
            projector_distance: DEFAULT_TOLERANCE,
            basis_divergence: DEFAULT_TOLERANCE,
        }
    }
}
