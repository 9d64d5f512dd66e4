//! Identifiers for declared network layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a layer declared in a topology arena.
///
/// A `LayerId` is assigned once, when the layer is declared, and stays valid
/// for the lifetime of the arena that issued it. It is independent of the
/// traversal order the layout engine later assigns to reachable nodes.
///
/// # Examples
///
/// ```
/// # use strata_core::identifier::LayerId;
/// let id = LayerId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "layer#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(usize);

impl LayerId {
    /// Creates a handle for the given arena slot.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena slot this handle points to.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}
