//! Reference animation collaborator.
//!
//! [`TransitionBoard`] tracks the in-flight transition of every layer and
//! resolves races between overlapping re-layouts of the same rank: a
//! transition whose generation is older than the newest one seen for its
//! rank is discarded, and a newer transition replaces whatever the layer was
//! still animating toward.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use strata_core::{geometry::Point3, identifier::LayerId};

pub use strata_core::animation::{Animator, Generation, Transition};

/// In-flight transitions keyed by layer.
#[derive(Debug, Clone, Default)]
pub struct TransitionBoard {
    newest: HashMap<usize, Generation>,
    active: IndexMap<LayerId, Transition>,
    dropped: usize,
}

impl TransitionBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the layer is currently animating toward.
    pub fn target_of(&self, layer: LayerId) -> Option<Point3> {
        self.active.get(&layer).map(Transition::to)
    }

    /// In-flight transition of a layer.
    pub fn transition(&self, layer: LayerId) -> Option<&Transition> {
        self.active.get(&layer)
    }

    /// All in-flight transitions, in the order layers first started moving.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.active.values()
    }

    /// Newest generation accepted for `rank`.
    pub fn newest_generation(&self, rank: usize) -> Option<Generation> {
        self.newest.get(&rank).copied()
    }

    /// Number of stale transitions discarded so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Marks a layer's animation as finished, returning its transition.
    pub fn complete(&mut self, layer: LayerId) -> Option<Transition> {
        self.active.shift_remove(&layer)
    }

    /// Returns true if no layer is moving.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}

impl Animator for TransitionBoard {
    fn translate_to(&mut self, transition: Transition) {
        let newest = self.newest.entry(transition.rank()).or_default();
        if transition.generation() < *newest {
            self.dropped += 1;
            debug!(
                layer:% = transition.layer(),
                rank = transition.rank(),
                generation = transition.generation().value(),
                newest = newest.value();
                "Dropping superseded transition"
            );
            return;
        }
        *newest = transition.generation();

        if let Some(previous) = self.active.insert(transition.layer(), transition) {
            trace!(
                layer:% = transition.layer(),
                from_generation = previous.generation().value(),
                to_generation = transition.generation().value();
                "Replaced in-flight transition"
            );
        }
    }
}
