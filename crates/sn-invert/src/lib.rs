//! sn-invert: invert elevations, slopes and manhole depths.
//!
//! Runs on a normalized network:
//! - `trace` walks all branches up- or downstream of a node to the nearest known inverts
//! - `interpolate_missing` fills every unknown invert from those traces
//! - `compute_slopes` derives pipe slopes from the finished inverts
//! - `compute_depths` derives manhole depths (rim minus invert)

pub mod depth;
pub mod error;
pub mod interpolate;
pub mod settings;
pub mod slope;
pub mod surrogate;
pub mod trace;

pub use depth::compute_depths;
pub use error::{InvertError, InvertResult};
pub use interpolate::{InterpolationReport, interpolate_missing};
pub use settings::InterpolationSettings;
pub use slope::{SlopeReport, compute_slopes};
pub use surrogate::Surrogate;
pub use trace::{Branch, Direction, advance_all, rearm_for_second_elevation, trace};
