//! Structured error types shared across eigshow crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`EigError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (dimensions, indices, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for eigshow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EigError {
    /// Input matrix has the wrong shape (not square, mismatched sizes).
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// The eigen-solver failed or a numerical check did not hold.
    #[error("numerical error: {0}")]
    Numerical(ErrorInfo),
    /// Configuration decoding or file access errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl EigError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            EigError::Shape(info)
            | EigError::Numerical(info)
            | EigError::Config(info)
            | EigError::Serde(info) => info,
        }
    }

    /// Reports a matrix that is not square.
    pub fn non_square(rows: usize, cols: usize) -> Self {
        EigError::Shape(
            ErrorInfo::new("non-square", "matrix must be square")
                .with_context("rows", rows.to_string())
                .with_context("cols", cols.to_string()),
        )
    }

    /// Reports a NaN or infinite matrix entry at `(row, col)`.
    pub fn non_finite(row: usize, col: usize) -> Self {
        EigError::Numerical(
            ErrorInfo::new("non-finite-entry", "matrix contains NaN or infinite entries")
                .with_context("row", row.to_string())
                .with_context("col", col.to_string()),
        )
    }
}
