use eigshow_core::EigError;
use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::config::DemoConfig;
use crate::decompose::{decompose_backend, decompose_with, Backend};
use crate::degeneracy::{compare_backends, BackendComparison};
use crate::hamiltonian::{degenerate_sample, hermiticity_defect, two_site_heisenberg};
use crate::render::render_with;
use crate::report::SpectrumReport;
use crate::verify::verify;

/// Everything produced by one demo run.
#[derive(Debug, Clone)]
pub struct DemoOutput {
    /// Rendered eigenpairs of the two-site sample.
    pub lines: Vec<String>,
    /// `V† M V` for the two-site sample.
    pub diagonal_form: DMatrix<f64>,
    /// Report for the two-site sample.
    pub two_site: SpectrumReport,
    /// Reports for the degenerate sample, one per backend.
    pub degenerate: Vec<SpectrumReport>,
    /// Rendered eigenpairs of the degenerate sample, one set per backend.
    pub degenerate_lines: Vec<(Backend, Vec<String>)>,
    /// Subspace comparison of the two backends on the degenerate sample.
    pub comparison: BackendComparison,
}

/// Diagonalises the two-site sample, then compares both backends on the
/// degenerate sample.
pub fn run_demo(config: &DemoConfig) -> Result<DemoOutput, EigError> {
    let matrix = two_site_heisenberg();
    let result = decompose_with(&matrix, &config.solver)?;
    let lines: Vec<String> = render_with(&result, config.render).collect();
    let diagonal_form = verify(&matrix, &result)?;
    let two_site = SpectrumReport::build(&matrix, &result, &config.tolerances)?;
    log::info!(
        "two-site sample: {} eigenpairs, spectrum {}",
        lines.len(),
        two_site.spectrum_hash
    );
    warn_if_outside(&two_site, "two-site sample");

    let sample = degenerate_sample(config.coupling, config.field)?;
    let defect = hermiticity_defect(&sample)?;
    log::debug!("degenerate sample hermiticity defect {defect:e}");
    let promoted = sample.map(|value| Complex64::new(value, 0.0));
    let mut results = Vec::with_capacity(Backend::ALL.len());
    let mut degenerate = Vec::with_capacity(Backend::ALL.len());
    let mut degenerate_lines = Vec::with_capacity(Backend::ALL.len());
    for backend in Backend::ALL {
        let decomposition = decompose_backend(&sample, backend, &config.solver)?;
        let report = SpectrumReport::build(&promoted, &decomposition, &config.tolerances)?;
        warn_if_outside(&report, backend.label());
        degenerate_lines.push((backend, render_with(&decomposition, config.render).collect()));
        degenerate.push(report);
        results.push(decomposition);
    }

    let comparison = compare_backends(&results[0], &results[1], &config.tolerances)?;
    for entry in comparison.divergent_blocks(config.tolerances.basis_divergence) {
        log::info!(
            "backends pick different bases for E = {:.3} (multiplicity {}): component difference {:.3}, projector distance {:e}",
            entry.eigenvalue,
            entry.block.multiplicity,
            entry.max_component_difference,
            entry.projector_distance
        );
    }
    if comparison.equivalent {
        log::info!("backends agree on every eigenspace");
    } else {
        log::warn!(
            "backends disagree: eigenvalue gap {:e}",
            comparison.eigenvalue_gap
        );
    }

    Ok(DemoOutput {
        lines,
        diagonal_form,
        two_site,
        degenerate,
        degenerate_lines,
        comparison,
    })
}

fn warn_if_outside(report: &SpectrumReport, label: &str) {
    if !report.within_tolerance {
        log::warn!("{label}: diagnostics outside tolerance: {:?}", report.diagnostics);
    }
}
