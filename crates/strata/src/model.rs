//! Declared network topology.
//!
//! A [`Topology`] is an arena of layers. Each layer carries its raw depth
//! (channel count) and a [`Predecessors`] relation naming the layers that feed
//! it. Layers refer to each other by [`LayerId`], so forward references (and
//! therefore cycles) can be declared; the graph builder rejects the latter.

use std::slice;

use indexmap::IndexMap;
use log::trace;

use strata_core::identifier::LayerId;

use crate::{error::GraphError, footprint::FootprintTable};

/// The producers feeding one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Predecessors {
    /// A source layer; only valid for declared inputs.
    #[default]
    None,
    /// Fed by exactly one layer.
    Chain(LayerId),
    /// Combines two or more upstream branches, in declaration order.
    Merge(Vec<LayerId>),
}

impl Predecessors {
    /// Returns the producers as a slice, in declaration order.
    pub fn as_slice(&self) -> &[LayerId] {
        match self {
            Self::None => &[],
            Self::Chain(layer) => slice::from_ref(layer),
            Self::Merge(layers) => layers,
        }
    }
}

/// One declared network layer.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    depth: u32,
    predecessors: Predecessors,
}

impl Layer {
    /// The unique name of this layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw depth, such as the layer's channel count.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The layers feeding this one.
    pub fn predecessors(&self) -> &Predecessors {
        &self.predecessors
    }
}

/// Arena of declared layers, indexed by [`LayerId`] and by name.
///
/// # Examples
///
/// ```
/// # use strata::model::Topology;
/// let mut topology = Topology::new();
/// let image = topology.declare("image", 3).unwrap();
/// let conv = topology.chain("conv", 16, image).unwrap();
/// let skip = topology.chain("skip", 16, image).unwrap();
/// let sum = topology.merge("sum", 16, &[conv, skip]).unwrap();
///
/// assert_eq!(topology.len(), 4);
/// assert_eq!(topology.find("sum"), Some(sum));
/// assert_eq!(topology.predecessors(sum), &[conv, skip]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Topology {
    layers: IndexMap<String, Layer>,
}

impl Topology {
    /// Creates an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a layer with no predecessors.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateLayer`] if the name is taken.
    pub fn declare(&mut self, name: impl Into<String>, depth: u32) -> Result<LayerId, GraphError> {
        let name = name.into();
        if self.layers.contains_key(&name) {
            return Err(GraphError::DuplicateLayer(name));
        }

        let layer = Layer {
            name: name.clone(),
            depth,
            predecessors: Predecessors::None,
        };
        let (index, _) = self.layers.insert_full(name, layer);
        trace!(index, depth; "Declared layer");

        Ok(LayerId::new(index))
    }

    /// Sets the predecessor relation of an already declared layer.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownLayer`] if `layer` or any producer does
    /// not belong to this topology, and [`GraphError::MergeArity`] if a merge
    /// names fewer than two producers.
    pub fn link(&mut self, layer: LayerId, predecessors: Predecessors) -> Result<(), GraphError> {
        let name = self.name_checked(layer)?.to_string();

        if let Predecessors::Merge(producers) = &predecessors {
            if producers.len() < 2 {
                return Err(GraphError::MergeArity {
                    layer: name,
                    count: producers.len(),
                });
            }
        }
        for &producer in predecessors.as_slice() {
            self.name_checked(producer)?;
        }

        if let Some((_, entry)) = self.layers.get_index_mut(layer.index()) {
            entry.predecessors = predecessors;
        }
        Ok(())
    }

    /// Declares a layer fed by a single producer.
    pub fn chain(
        &mut self,
        name: impl Into<String>,
        depth: u32,
        from: LayerId,
    ) -> Result<LayerId, GraphError> {
        self.name_checked(from)?;
        let layer = self.declare(name, depth)?;
        self.link(layer, Predecessors::Chain(from))?;
        Ok(layer)
    }

    /// Declares a merge layer fed by several producers.
    pub fn merge(
        &mut self,
        name: impl Into<String>,
        depth: u32,
        from: &[LayerId],
    ) -> Result<LayerId, GraphError> {
        let name = name.into();
        if from.len() < 2 {
            return Err(GraphError::MergeArity {
                layer: name,
                count: from.len(),
            });
        }
        for &producer in from {
            self.name_checked(producer)?;
        }
        let layer = self.declare(name, depth)?;
        self.link(layer, Predecessors::Merge(from.to_vec()))?;
        Ok(layer)
    }

    /// Returns the layer behind `id`, if it belongs to this topology.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get_index(id.index()).map(|(_, layer)| layer)
    }

    /// Returns true if `id` belongs to this topology.
    pub fn contains(&self, id: LayerId) -> bool {
        id.index() < self.layers.len()
    }

    /// Looks a layer up by name.
    pub fn find(&self, name: &str) -> Option<LayerId> {
        self.layers.get_index_of(name).map(LayerId::new)
    }

    /// Producers of `id`; empty for unknown ids.
    pub fn predecessors(&self, id: LayerId) -> &[LayerId] {
        self.layer(id)
            .map(|layer| layer.predecessors.as_slice())
            .unwrap_or_default()
    }

    /// Name of `id`, or its display form if it is not part of this topology.
    pub fn name(&self, id: LayerId) -> String {
        self.layer(id)
            .map(|layer| layer.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Iterates over all layers in declaration order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers
            .values()
            .enumerate()
            .map(|(index, layer)| (LayerId::new(index), layer))
    }

    /// Number of declared layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn name_checked(&self, id: LayerId) -> Result<&str, GraphError> {
        self.layer(id)
            .map(Layer::name)
            .ok_or_else(|| GraphError::UnknownLayer(id.to_string()))
    }
}

/// A fully assembled model: topology, its boundary layers, and footprints.
#[derive(Debug, Clone)]
pub struct Model {
    topology: Topology,
    inputs: Vec<LayerId>,
    outputs: Vec<LayerId>,
    footprints: FootprintTable,
}

impl Model {
    /// Bundles an assembled topology with its declared inputs and outputs.
    pub fn new(
        topology: Topology,
        inputs: Vec<LayerId>,
        outputs: Vec<LayerId>,
        footprints: FootprintTable,
    ) -> Self {
        Self {
            topology,
            inputs,
            outputs,
            footprints,
        }
    }

    /// The declared layers.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Declared input layers.
    pub fn inputs(&self) -> &[LayerId] {
        &self.inputs
    }

    /// Declared output layers.
    pub fn outputs(&self) -> &[LayerId] {
        &self.outputs
    }

    /// Current footprint of every layer.
    pub fn footprints(&self) -> &FootprintTable {
        &self.footprints
    }

    /// Mutable access to footprints, for expand/collapse toggles.
    pub fn footprints_mut(&mut self) -> &mut FootprintTable {
        &mut self.footprints
    }
}
