//! Collapse the branches of one trace into a single surrogate invert.

use sn_core::Real;

use crate::trace::Branch;

/// Length-weighted summary of the inverts reached by a trace.
///
/// Branches are weighted by `1 / length`, so nearer inverts dominate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surrogate {
    pub elevation: Real,
    /// Mean distance to the contributing inverts.
    pub length: Real,
    pub min: Real,
    pub max: Real,
    pub branches: usize,
}

impl Surrogate {
    /// `None` when no branch found an invert at a positive distance.
    pub fn from_branches(branches: &[Branch]) -> Option<Self> {
        let mut weighted = 0.0;
        let mut weights = 0.0;
        let mut length_sum = 0.0;
        let mut min = Real::INFINITY;
        let mut max = Real::NEG_INFINITY;
        let mut count = 0usize;

        for branch in branches {
            let Some(sk) = branch.found_elevation else {
                continue;
            };
            if branch.accumulated_length <= 0.0 {
                continue;
            }
            weighted += sk / branch.accumulated_length;
            weights += 1.0 / branch.accumulated_length;
            length_sum += branch.accumulated_length;
            min = min.min(sk);
            max = max.max(sk);
            count += 1;
        }

        (count > 0).then(|| Self {
            elevation: weighted / weights,
            length: length_sum / count as Real,
            min,
            max,
            branches: count,
        })
    }
}
