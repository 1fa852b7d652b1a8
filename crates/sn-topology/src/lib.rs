//! sn-topology: turns a surveyed sewer network into a node-link-node graph.
//!
//! `normalize` runs, in order:
//! 1. self-loop repair
//! 2. pruning of disconnected elements (optional)
//! 3. splitting of pipes at the inlets lying on them
//! 4. outfall classification
//!
//! Data problems never abort the run. They are recorded in the report's
//! diagnostics and the affected element is pruned or skipped.

pub mod normalize;
pub mod outfall;
pub mod prune;
pub mod split;

pub use normalize::{NormalizeOptions, NormalizeReport, normalize};
pub use outfall::classify_outfalls;
pub use split::{SplitOutcome, relevant_inlets, split_at_inlet};
