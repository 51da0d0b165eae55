#![deny(missing_docs)]
#![doc = "Shared error taxonomy and numerical tolerances for the eigshow crates."]

pub mod errors;
/// Absolute thresholds used by decomposition checks.
pub mod tolerances;

pub use errors::{EigError, ErrorInfo};
pub use tolerances::Tolerances;
