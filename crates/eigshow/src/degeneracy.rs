//! Degenerate eigenspace grouping and basis-independent comparison.
//!
//! Inside a degenerate block any orthonormal basis is a valid answer, so two
//! solvers may disagree component-wise while describing the same subspace.
//! Subspaces are compared through their projectors `P = Σ v v†`.

use std::ops::Range;

use eigshow_core::{EigError, ErrorInfo, Tolerances};
use nalgebra::{ComplexField, DMatrix};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::decompose::EigenResult;

/// Contiguous run of (numerically) equal eigenvalues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegenerateBlock {
    /// Index of the first eigenpair in the block.
    pub start: usize,
    /// Number of eigenpairs sharing the eigenvalue.
    pub multiplicity: usize,
}

impl DegenerateBlock {
    /// Eigenpair indices covered by the block.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.multiplicity
    }

    /// Whether the eigenvalue is shared by more than one eigenvector.
    pub fn is_degenerate(&self) -> bool {
        self.multiplicity > 1
    }
}

/// Groups ascending eigenvalues whose consecutive gaps are at most `tol`.
pub fn degenerate_blocks(eigenvalues: &[f64], tol: f64) -> Vec<DegenerateBlock> {
    let mut blocks: Vec<DegenerateBlock> = Vec::new();
    for (index, value) in eigenvalues.iter().enumerate() {
        let extends = index > 0 && (value - eigenvalues[index - 1]).abs() <= tol;
        if let (true, Some(block)) = (extends, blocks.last_mut()) {
            block.multiplicity += 1;
            continue;
        }
        blocks.push(DegenerateBlock {
            start: index,
            multiplicity: 1,
        });
    }
    blocks
}

/// Orthogonal projector onto the eigenspace spanned by `block`.
pub fn projector<T>(result: &EigenResult<T>, block: &DegenerateBlock) -> DMatrix<T>
where
    T: ComplexField<RealField = f64>,
{
    let columns = result.eigenvectors.columns(block.start, block.multiplicity);
    &columns * columns.adjoint()
}

/// Agreement of two decompositions on one eigenspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubspaceAgreement {
    /// Block location within the ascending spectrum.
    pub block: DegenerateBlock,
    /// Eigenvalue of the block, taken from the reference decomposition.
    pub eigenvalue: f64,
    /// Largest entry of `|P_a - P_b|`.
    pub projector_distance: f64,
    /// Largest component difference between paired eigenvectors after
    /// removing the free global phase of each vector.
    pub max_component_difference: f64,
}

/// Basis-independent comparison of two decompositions of one matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendComparison {
    /// Largest absolute difference between the eigenvalue sequences.
    pub eigenvalue_gap: f64,
    /// One entry per eigenspace of the reference decomposition.
    pub subspaces: Vec<SubspaceAgreement>,
    /// Whether eigenvalues and every eigenspace agree within tolerance.
    pub equivalent: bool,
}

impl BackendComparison {
    /// Blocks whose phase-aligned eigenvectors differ by more than `tol`,
    /// typically [`Tolerances::basis_divergence`].
    pub fn divergent_blocks(&self, tol: f64) -> impl Iterator<Item = &SubspaceAgreement> {
        self.subspaces
            .iter()
            .filter(move |entry| entry.max_component_difference > tol)
    }
}

/// Compares decomposition `b` against the reference `a`.
///
/// Both results must come from the same matrix. Blocks are grouped on `a`
/// with `tol.degeneracy`. The results are equivalent when no eigenvalue
/// differs by more than `tol.eigenvalue_gap` and every projector distance is
/// at most `tol.projector_distance`. Component differences are recorded but
/// never decide equivalence, since the basis inside a degenerate block is
/// free.
pub fn compare_backends(
    a: &EigenResult<Complex64>,
    b: &EigenResult<Complex64>,
    tol: &Tolerances,
) -> Result<BackendComparison, EigError> {
    if a.len() != b.len() || a.eigenvectors.shape() != b.eigenvectors.shape() {
        return Err(EigError::Shape(
            ErrorInfo::new("dimension-mismatch", "decompositions have different sizes")
                .with_context("left", a.len().to_string())
                .with_context("right", b.len().to_string()),
        ));
    }

    let eigenvalue_gap = a
        .eigenvalues
        .iter()
        .zip(b.eigenvalues.iter())
        .fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs()));

    let blocks = degenerate_blocks(a.eigenvalues.as_slice(), tol.degeneracy);
    let mut subspaces = Vec::with_capacity(blocks.len());
    for block in blocks {
        let distance = (projector(a, &block) - projector(b, &block))
            .iter()
            .fold(0.0_f64, |acc, value| acc.max(value.norm()));
        let component_gap = block
            .range()
            .map(|index| phase_aligned_difference(a, b, index))
            .fold(0.0_f64, f64::max);
        subspaces.push(SubspaceAgreement {
            eigenvalue: a.eigenvalues[block.start],
            block,
            projector_distance: distance,
            max_component_difference: component_gap,
        });
    }

    let equivalent = eigenvalue_gap <= tol.eigenvalue_gap
        && subspaces
            .iter()
            .all(|entry| entry.projector_distance <= tol.projector_distance);
    log::debug!(
        "compared {} eigenspaces: eigenvalue gap {eigenvalue_gap:e}, equivalent={equivalent}",
        subspaces.len()
    );
    Ok(BackendComparison {
        eigenvalue_gap,
        subspaces,
        equivalent,
    })
}

fn phase_aligned_difference(
    a: &EigenResult<Complex64>,
    b: &EigenResult<Complex64>,
    index: usize,
) -> f64 {
    let left = a.eigenvectors.column(index);
    let right = b.eigenvectors.column(index);
    let overlap = left.dotc(&right);
    let phase = if overlap.norm() > f64::EPSILON {
        overlap.conj() / overlap.norm()
    } else {
        Complex64::new(1.0, 0.0)
    };
    left.iter()
        .zip(right.iter())
        .fold(0.0_f64, |acc, (x, y)| acc.max((x - y * phase).norm()))
}
