//! On-disk model declarations.
//!
//! A model is declared in TOML: the boundary layers by name, then one
//! `[[layer]]` table per layer. A layer names a single producer with `from`
//! or several with `merge`; layers may reference producers declared later in
//! the file.
//!
//! ```toml
//! inputs = ["image"]
//! outputs = ["logits"]
//!
//! [[layer]]
//! name = "image"
//! depth = 3
//! width = 28
//! expanded_width = 84
//!
//! [[layer]]
//! name = "conv"
//! depth = 32
//! from = "image"
//!
//! [[layer]]
//! name = "logits"
//! depth = 10
//! from = "conv"
//! ```

use log::{debug, warn};
use serde::Deserialize;

use strata_core::identifier::LayerId;

use crate::{
    config::LayoutConfig,
    error::GraphError,
    footprint::{FootprintState, FootprintTable},
    model::{Model, Predecessors, Topology},
};

fn default_depth() -> u32 {
    1
}

/// A whole model declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDeclaration {
    inputs: Vec<String>,
    outputs: Vec<String>,
    #[serde(default, rename = "layer")]
    layers: Vec<LayerDeclaration>,
}

/// One `[[layer]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDeclaration {
    name: String,
    #[serde(default = "default_depth")]
    depth: u32,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    merge: Vec<String>,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    expanded_width: Option<f32>,
    #[serde(default)]
    state: FootprintState,
}

impl ModelDeclaration {
    /// Resolves names and assembles the declared [`Model`].
    ///
    /// Layers without a `width` use the configured default footprint; a
    /// missing `expanded_width` equals the collapsed width.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateLayer`] for repeated names,
    /// [`GraphError::UnknownLayer`] for references to undeclared layers,
    /// [`GraphError::ConflictingPredecessors`] if a layer sets both `from`
    /// and `merge`, and [`GraphError::MergeArity`] for a one-producer merge.
    pub fn assemble(&self, config: &LayoutConfig) -> Result<Model, GraphError> {
        let mut topology = Topology::new();
        let mut footprints = FootprintTable::new(config.default_footprint());

        let mut ids = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let id = topology.declare(layer.name.as_str(), layer.depth)?;
            let collapsed = layer.width.unwrap_or(config.default_footprint());
            let expanded = layer.expanded_width.unwrap_or(collapsed);
            if expanded < collapsed {
                warn!(layer = layer.name.as_str(), collapsed, expanded; "Expanded width is narrower than collapsed width");
            }
            footprints.insert(id, collapsed, expanded);
            footprints.set_state(id, layer.state);
            ids.push(id);
        }

        let mut links = Vec::new();
        for (layer, &id) in self.layers.iter().zip(&ids) {
            let predecessors = match (&layer.from, layer.merge.as_slice()) {
                (Some(_), [_, ..]) => {
                    return Err(GraphError::ConflictingPredecessors {
                        layer: layer.name.clone(),
                    });
                }
                (Some(from), []) => Predecessors::Chain(resolve(&topology, from)?),
                (None, []) => Predecessors::None,
                (None, merge) => Predecessors::Merge(resolve_all(&topology, merge)?),
            };
            links.push((id, predecessors));
        }
        for (id, predecessors) in links {
            topology.link(id, predecessors)?;
        }

        let inputs = resolve_all(&topology, &self.inputs)?;
        let outputs = resolve_all(&topology, &self.outputs)?;

        debug!(layers = topology.len(), inputs = inputs.len(), outputs = outputs.len(); "Assembled model");
        Ok(Model::new(topology, inputs, outputs, footprints))
    }
}

fn resolve(topology: &Topology, name: &str) -> Result<LayerId, GraphError> {
    topology
        .find(name)
        .ok_or_else(|| GraphError::UnknownLayer(name.to_string()))
}

fn resolve_all(topology: &Topology, names: &[String]) -> Result<Vec<LayerId>, GraphError> {
    names.iter().map(|name| resolve(topology, name)).collect()
}
