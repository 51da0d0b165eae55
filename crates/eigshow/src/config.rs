use std::path::Path;

use eigshow_core::{EigError, ErrorInfo, Tolerances};
use serde::{Deserialize, Serialize};

use crate::render::RenderOpts;

/// Parameters forwarded to the dense eigen-solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOpts {
    /// Convergence threshold for off-diagonal elimination.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Iteration cap; zero lets the solver run until it converges.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_epsilon() -> f64 {
    f64::EPSILON
}

fn default_max_iterations() -> usize {
    10_000
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// YAML-configurable parameters for a demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Solver settings shared by both samples.
    #[serde(default)]
    pub solver: SolverOpts,
    /// Thresholds for verification and subspace comparison.
    #[serde(default)]
    pub tolerances: Tolerances,
    /// Line formatting for rendered eigenpairs.
    #[serde(default)]
    pub render: RenderOpts,
    /// Heisenberg exchange coupling of the degenerate sample.
    #[serde(default = "default_coupling")]
    pub coupling: f64,
    /// Zeeman field applied to the third site of the degenerate sample.
    #[serde(default = "default_field")]
    pub field: f64,
}

fn default_coupling() -> f64 {
    1.0
}

fn default_field() -> f64 {
    0.5
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            solver: SolverOpts::default(),
            tolerances: Tolerances::default(),
            render: RenderOpts::default(),
            coupling: default_coupling(),
            field: default_field(),
        }
    }
}

impl DemoConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, EigError> {
        serde_yaml::from_str(text)
            .map_err(|err| EigError::Config(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, EigError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            EigError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text).map_err(|err| match err {
            EigError::Config(info) => {
                EigError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Serialises the configuration back into YAML.
    pub fn to_yaml(&self) -> Result<String, EigError> {
        serde_yaml::to_string(self)
            .map_err(|err| EigError::Config(ErrorInfo::new("config-serialize", err.to_string())))
    }
}
