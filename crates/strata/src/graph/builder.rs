//! Backward traversal from the declared outputs.
//!
//! Produces the ordered, deduplicated list of every layer reachable by
//! walking predecessor relations back from the outputs. A layer is recorded
//! the first time the walk enters it, and its producers are then visited in
//! declaration order, so the list matches a recursive pre-order walk without
//! using the call stack.

use std::collections::HashMap;

use log::{debug, trace};

use strata_core::identifier::LayerId;

use crate::{error::GraphError, graph::NodeIndex, model::Topology};

/// Ordered list of reachable layers with a reverse lookup.
///
/// The position of a layer in the list is its [`NodeIndex`].
#[derive(Debug, Clone, Default)]
pub struct NodeList {
    layers: Vec<LayerId>,
    positions: HashMap<LayerId, NodeIndex>,
}

impl NodeList {
    fn push(&mut self, layer: LayerId) {
        self.positions.insert(layer, NodeIndex::new(self.layers.len()));
        self.layers.push(layer);
    }

    /// Number of reachable layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layer was reached.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The layer stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not issued by this list.
    pub fn layer(&self, index: NodeIndex) -> LayerId {
        self.layers[index.index()]
    }

    /// The index of `layer`, if it was reached.
    pub fn index_of(&self, layer: LayerId) -> Option<NodeIndex> {
        self.positions.get(&layer).copied()
    }

    /// The reached layers, in traversal order.
    pub fn as_slice(&self) -> &[LayerId] {
        &self.layers
    }

    /// Iterates over `(index, layer)` pairs in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, LayerId)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, &layer)| (NodeIndex::new(index), layer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Collects every layer reachable backward from `outputs`.
///
/// Each layer appears exactly once, however many merge paths reach it.
///
/// # Errors
///
/// Returns [`GraphError::UnknownLayer`] for an output that does not belong to
/// `topology` and [`GraphError::Cycle`] if the walk re-enters a layer whose
/// producers are still being visited.
pub fn build_node_list(topology: &Topology, outputs: &[LayerId]) -> Result<NodeList, GraphError> {
    let mut nodes = NodeList::default();
    let mut states: HashMap<LayerId, VisitState> = HashMap::new();
    // (layer, next producer to visit)
    let mut stack: Vec<(LayerId, usize)> = Vec::new();

    for &output in outputs {
        if !topology.contains(output) {
            return Err(GraphError::UnknownLayer(output.to_string()));
        }
        if states.contains_key(&output) {
            continue;
        }

        states.insert(output, VisitState::InProgress);
        nodes.push(output);
        stack.push((output, 0));

        while let Some(frame) = stack.last_mut() {
            let (layer, cursor) = *frame;
            let Some(&producer) = topology.predecessors(layer).get(cursor) else {
                states.insert(layer, VisitState::Done);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match states.get(&producer) {
                Some(VisitState::InProgress) => {
                    return Err(GraphError::Cycle {
                        layer: topology.name(producer),
                    });
                }
                Some(VisitState::Done) => {}
                None => {
                    trace!(layer:% = producer; "Entering layer");
                    states.insert(producer, VisitState::InProgress);
                    nodes.push(producer);
                    stack.push((producer, 0));
                }
            }
        }
    }

    debug!(nodes = nodes.len(), outputs = outputs.len(); "Built node list");
    Ok(nodes)
}
