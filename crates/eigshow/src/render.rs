use std::fmt::{Display, Write as _};
use std::iter::FusedIterator;

use nalgebra::ComplexField;
use serde::{Deserialize, Serialize};

use crate::decompose::EigenResult;

/// Formatting knobs for rendered eigenpairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOpts {
    /// Decimal places for the eigenvalue field.
    #[serde(default = "default_value_precision")]
    pub value_precision: usize,
    /// Fixed decimal places for vector components; `None` keeps the
    /// scalar's default `Display` output.
    #[serde(default)]
    pub component_precision: Option<usize>,
}

fn default_value_precision() -> usize {
    3
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            value_precision: default_value_precision(),
            component_precision: None,
        }
    }
}

/// Lazily formats one line per eigenpair, in ascending-eigenvalue order.
///
/// Cloning the iterator restarts it from its current position.
#[derive(Debug, Clone)]
pub struct EigenLines<'a, T: ComplexField<RealField = f64>> {
    result: &'a EigenResult<T>,
    opts: RenderOpts,
    next: usize,
}

/// Renders every eigenpair as `eigenvector [..] with E = <value>`.
pub fn render<T>(result: &EigenResult<T>) -> EigenLines<'_, T>
where
    T: ComplexField<RealField = f64> + Display,
{
    render_with(result, RenderOpts::default())
}

/// Renders eigenpairs with custom precision settings.
pub fn render_with<T>(result: &EigenResult<T>, opts: RenderOpts) -> EigenLines<'_, T>
where
    T: ComplexField<RealField = f64> + Display,
{
    EigenLines {
        result,
        opts,
        next: 0,
    }
}

impl<'a, T> EigenLines<'a, T>
where
    T: ComplexField<RealField = f64> + Display,
{
    fn line(&self, index: usize) -> String {
        let mut out = String::from("eigenvector [");
        for (pos, component) in self.result.eigenvectors.column(index).iter().enumerate() {
            if pos > 0 {
                out.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = match self.opts.component_precision {
                Some(precision) => write!(out, "{component:.precision$}"),
                None => write!(out, "{component}"),
            };
        }
        let precision = self.opts.value_precision;
        let _ = write!(
            out,
            "] with E = {:.precision$}",
            self.result.eigenvalues[index]
        );
        out
    }
}

impl<'a, T> Iterator for EigenLines<'a, T>
where
    T: ComplexField<RealField = f64> + Display,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.result.len() {
            return None;
        }
        let line = self.line(self.next);
        self.next += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.result.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for EigenLines<'a, T> where
    T: ComplexField<RealField = f64> + Display
{
}

impl<'a, T> FusedIterator for EigenLines<'a, T> where T: ComplexField<RealField = f64> + Display {}
