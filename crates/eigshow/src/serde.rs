use std::path::Path;

use eigshow_core::{EigError, ErrorInfo};

use crate::degeneracy::BackendComparison;
use crate::report::SpectrumReport;

/// Serialises a spectrum report into indented JSON.
pub fn report_to_json(report: &SpectrumReport) -> Result<String, EigError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| EigError::Serde(ErrorInfo::new("report-serialize", err.to_string())))
}

/// Deserialises a spectrum report from JSON text.
pub fn report_from_json(json: &str) -> Result<SpectrumReport, EigError> {
    serde_json::from_str(json)
        .map_err(|err| EigError::Serde(ErrorInfo::new("report-deserialize", err.to_string())))
}

/// Serialises a backend comparison into indented JSON.
pub fn comparison_to_json(comparison: &BackendComparison) -> Result<String, EigError> {
    serde_json::to_string_pretty(comparison)
        .map_err(|err| EigError::Serde(ErrorInfo::new("comparison-serialize", err.to_string())))
}

/// Writes a JSON payload to disk.
pub fn write_json(path: &Path, json: &str) -> Result<(), EigError> {
    std::fs::write(path, json).map_err(|err| {
        EigError::Serde(
            ErrorInfo::new("json-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Reads a JSON payload from disk.
pub fn read_json(path: &Path) -> Result<String, EigError> {
    std::fs::read_to_string(path).map_err(|err| {
        EigError::Serde(
            ErrorInfo::new("json-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
