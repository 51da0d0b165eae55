#![deny(missing_docs)]
#![doc = "Dense Hermitian eigen-decomposition with line rendering, diagonal-form \
verification and basis-independent comparison of solver backends."]

/// YAML configuration for solver, tolerances and rendering.
pub mod config;
/// Ascending eigen-decomposition on top of `nalgebra::SymmetricEigen` or `faer`.
pub mod decompose;
pub mod degeneracy;
/// Demo runner over the two bundled samples.
pub mod demo;
pub mod hamiltonian;
/// Human readable eigenpair lines.
pub mod render;
/// Serialisable spectrum reports.
pub mod report;
/// JSON serialisation helpers for reports and comparisons.
#[path = "serde.rs"]
pub mod serde_io;
/// Diagonal-form verification and decomposition diagnostics.
pub mod verify;

pub use config::{DemoConfig, SolverOpts};
pub use decompose::{decompose, decompose_backend, decompose_with, Backend, EigenResult};
pub use degeneracy::{compare_backends, degenerate_blocks, projector, BackendComparison};
pub use demo::{run_demo, DemoOutput};
pub use eigshow_core::{EigError, ErrorInfo, Tolerances};
pub use render::{render, render_with, EigenLines, RenderOpts};
pub use report::{spectrum_hash, SpectrumReport};
pub use verify::{diagnose, verify, Diagnostics};
