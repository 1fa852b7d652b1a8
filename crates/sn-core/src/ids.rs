//! Arena positions for nodes and links.
//!
//! A network stores its manholes and pipes in two `Vec`s. Code that walks the
//! network refers to entries by position; string ids only appear at the edges,
//! in project files and diagnostics.

use core::fmt;
use core::num::NonZeroU32;

/// Position of a node or link in its network's arena.
///
/// Stored off by one so that `Option<Id>` costs no more than `Id`. Endpoint
/// lookups on a pipe with a missing manhole return `None` at no extra size.
///
/// An `Id` is only meaningful for the network that handed it out, and only until
/// that network deletes a node or link. Pruning and inlet splitting shift the
/// arenas, so callers re-resolve string ids after either step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// # Panics
    ///
    /// When `index` does not fit in `u32`. Networks are far below that size.
    pub fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1).expect("arena index fits in u32");
        Self(NonZeroU32::new(raw).expect("index+1 is nonzero"))
    }

    /// Slot in the arena `Vec`.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Manhole, inlet, or outfall slot.
pub type NodeIdx = Id;
/// Pipe slot.
pub type LinkIdx = Id;
