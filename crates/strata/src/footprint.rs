//! Expand/collapse footprint bookkeeping.
//!
//! [`FootprintTable`] is the reference [`FootprintProvider`]: it remembers a
//! collapsed and an expanded width for each layer together with the layer's
//! current state, and answers width queries from whichever state is active.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use strata_core::identifier::LayerId;

pub use strata_core::footprint::{FootprintProvider, UniformFootprint};

/// Visual state of a layer's block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintState {
    #[default]
    Collapsed,
    Expanded,
}

impl FootprintState {
    /// Returns the opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    collapsed: f32,
    expanded: f32,
    state: FootprintState,
}

impl Entry {
    fn width(&self) -> f32 {
        match self.state {
            FootprintState::Collapsed => self.collapsed,
            FootprintState::Expanded => self.expanded,
        }
    }
}

/// Per-layer collapsed/expanded widths plus the current state.
///
/// Layers without an entry report `default_width`.
///
/// # Examples
///
/// ```
/// # use strata::footprint::{FootprintState, FootprintTable};
/// # use strata_core::{footprint::FootprintProvider, identifier::LayerId};
/// let layer = LayerId::new(0);
/// let mut table = FootprintTable::new(10.0);
/// table.insert(layer, 10.0, 40.0);
///
/// assert_eq!(table.footprint_width(layer), 10.0);
/// assert_eq!(table.toggle(layer), Some(FootprintState::Expanded));
/// assert_eq!(table.footprint_width(layer), 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct FootprintTable {
    entries: HashMap<LayerId, Entry>,
    default_width: f32,
}

impl FootprintTable {
    /// Creates an empty table whose unknown layers report `default_width`.
    pub fn new(default_width: f32) -> Self {
        Self {
            entries: HashMap::new(),
            default_width,
        }
    }

    /// Records the collapsed and expanded widths of a layer; it starts collapsed.
    pub fn insert(&mut self, layer: LayerId, collapsed: f32, expanded: f32) {
        self.entries.insert(
            layer,
            Entry {
                collapsed,
                expanded,
                state: FootprintState::Collapsed,
            },
        );
    }

    /// Current state of a layer, if it has an entry.
    pub fn state(&self, layer: LayerId) -> Option<FootprintState> {
        self.entries.get(&layer).map(|entry| entry.state)
    }

    /// Forces a layer into `state`. Returns false if the layer has no entry.
    pub fn set_state(&mut self, layer: LayerId, state: FootprintState) -> bool {
        match self.entries.get_mut(&layer) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }

    /// Flips a layer between collapsed and expanded, returning the new state.
    pub fn toggle(&mut self, layer: LayerId) -> Option<FootprintState> {
        let entry = self.entries.get_mut(&layer)?;
        entry.state = entry.state.toggled();
        debug!(layer:% = layer, state:? = entry.state; "Toggled footprint");
        Some(entry.state)
    }
}

impl FootprintProvider for FootprintTable {
    fn footprint_width(&self, layer: LayerId) -> f32 {
        self.entries
            .get(&layer)
            .map(Entry::width)
            .unwrap_or(self.default_width)
    }
}
