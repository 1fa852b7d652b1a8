//! Interpolation settings.

use sn_core::{Length, Ratio, SnError, as_fraction, ensure_finite, ensure_positive, in_m, m, unitless};

use crate::error::InvertResult;

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationSettings {
    /// Slope assumed along a branch that has only one known invert.
    pub mean_slope: Ratio,
    /// Manhole depth assumed when no invert can be traced at all.
    pub mean_depth: Length,
    /// Smallest allowed rim-to-invert depth.
    pub min_depth: Length,
    /// Note appended to the tag of every interpolated node.
    pub tag: String,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            mean_slope: unitless(0.01),
            mean_depth: m(1.0),
            min_depth: m(0.3),
            tag: "sk_interpolated".to_string(),
        }
    }
}

/// Settings as plain meters and fractions, checked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Params {
    pub mean_slope: f64,
    pub mean_depth: f64,
    pub min_depth: f64,
}

impl InterpolationSettings {
    pub fn validate(&self) -> InvertResult<()> {
        self.params().map(|_| ())
    }

    pub(crate) fn params(&self) -> InvertResult<Params> {
        let mean_slope = ensure_finite(as_fraction(self.mean_slope), "mean slope")?;
        if mean_slope < 0.0 {
            return Err(SnError::InvalidArg {
                what: "mean slope must not be negative",
            }
            .into());
        }
        Ok(Params {
            mean_slope,
            mean_depth: ensure_positive(in_m(self.mean_depth), "mean depth")?,
            min_depth: ensure_positive(in_m(self.min_depth), "minimum depth")?,
        })
    }
}
