//! sn-core: stable foundation for sewernet.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact arena indices for network objects)
//! - geometry (planar points and polylines)
//! - diagnostics (structured event sink)
//! - error (shared error types)

pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Level};
pub use error::{SnError, SnResult};
pub use geometry::{Point, Projection};
pub use ids::*;
pub use numeric::*;
pub use units::*;
