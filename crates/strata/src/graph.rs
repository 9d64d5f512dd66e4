//! The layout graph of one assembled model.
//!
//! [`Graph::build`] runs the whole pipeline once, when the model topology is
//! complete:
//!
//! ```text
//! build_node_list ─► RelationMatrix ─► assign_levels ─► LevelMap ─► rank_centers ─► pack_rank (per rank)
//!                                                  normalize_depths (independent)
//! ```
//!
//! Afterwards [`Graph::on_footprint_changed`] re-packs a single rank whenever
//! a layer is expanded or collapsed.

mod builder;
mod relation;
mod relayout;

pub use builder::{NodeList, build_node_list};
pub use relation::RelationMatrix;

use std::fmt;

use log::{debug, info, trace};
use serde::Serialize;

use strata_core::{
    animation::Generation, footprint::FootprintProvider, geometry::Point3, identifier::LayerId,
};

use crate::{
    config::LayoutConfig,
    error::GraphError,
    layout::{LevelMap, assign_levels, normalize_depths, pack_rank, rank_centers},
    model::Topology,
};

/// Position of a reachable layer in the graph's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates an index into a node list.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the numeric index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Final placement of one layer, as handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Placement<'a> {
    pub layer: LayerId,
    pub name: &'a str,
    pub rank: usize,
    pub center: Point3,
    pub visual_depth: f32,
}

/// Layout state of an assembled model.
///
/// Holds the reachable nodes, their relations and ranks, and the current
/// center of every node. Only centers change after construction.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: NodeList,
    names: Vec<String>,
    inputs: Vec<NodeIndex>,
    outputs: Vec<NodeIndex>,
    relations: RelationMatrix,
    ranks: Vec<usize>,
    levels: LevelMap,
    rank_centers: Vec<Point3>,
    visual_depths: Vec<f32>,
    centers: Vec<Point3>,
    generations: Vec<Generation>,
    config: LayoutConfig,
}

impl Graph {
    /// Lays out the layers reachable from `outputs`.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if the boundary sets are empty or name
    /// unknown layers, an input has producers or cannot reach any output, the
    /// topology contains a predecessor cycle, or some node is left without a
    /// rank.
    pub fn build<F>(
        topology: &Topology,
        inputs: &[LayerId],
        outputs: &[LayerId],
        footprints: &F,
        config: &LayoutConfig,
    ) -> Result<Self, GraphError>
    where
        F: FootprintProvider + ?Sized,
    {
        info!(inputs = inputs.len(), outputs = outputs.len(); "Building layout graph");

        if inputs.is_empty() {
            return Err(GraphError::NoInputs);
        }
        if outputs.is_empty() {
            return Err(GraphError::NoOutputs);
        }
        for &input in inputs {
            let layer = topology
                .layer(input)
                .ok_or_else(|| GraphError::UnknownLayer(input.to_string()))?;
            if !layer.predecessors().as_slice().is_empty() {
                return Err(GraphError::InputHasPredecessors {
                    layer: layer.name().to_string(),
                });
            }
        }

        let nodes = build_node_list(topology, outputs)?;

        let input_indices = dedup_indices(inputs.iter().map(|&input| {
            nodes
                .index_of(input)
                .ok_or_else(|| GraphError::UnreachableInput {
                    layer: topology.name(input),
                })
        }))?;
        let output_indices = dedup_indices(outputs.iter().map(|&output| {
            nodes
                .index_of(output)
                .ok_or_else(|| GraphError::UnknownLayer(output.to_string()))
        }))?;

        let relations = RelationMatrix::build(topology, &nodes);
        let lookup = assign_levels(&relations, &input_indices, &output_indices);
        if let Some(unranked) = lookup.first_unranked() {
            return Err(GraphError::Unranked {
                layer: topology.name(nodes.layer(unranked)),
            });
        }
        let ranks: Vec<usize> = (0..nodes.len())
            .map(|index| lookup.rank(NodeIndex::new(index)).unwrap_or_default())
            .collect();

        let levels = LevelMap::group(&lookup);
        trace!(levels:?; "Grouped levels");

        let raw_depths: Vec<u32> = nodes
            .iter()
            .map(|(_, layer)| topology.layer(layer).map(|l| l.depth()).unwrap_or_default())
            .collect();
        let visual_depths = normalize_depths(
            &raw_depths,
            config.min_visual_depth(),
            config.max_visual_depth(),
        );

        let names = nodes.iter().map(|(_, layer)| topology.name(layer)).collect();
        let centers_by_rank = rank_centers(levels.rank_count(), config.rank_interval());

        let mut graph = Self {
            centers: vec![Point3::default(); nodes.len()],
            generations: vec![Generation::default(); levels.rank_count()],
            nodes,
            names,
            inputs: input_indices,
            outputs: output_indices,
            relations,
            ranks,
            levels,
            rank_centers: centers_by_rank,
            visual_depths,
            config: config.clone(),
        };

        for rank in 0..graph.levels.rank_count() {
            for (node, target) in graph.pack_level(rank, footprints) {
                graph.centers[node.index()] = target;
            }
        }

        info!(
            nodes = graph.node_count(),
            ranks = graph.levels.rank_count();
            "Layout graph built"
        );
        Ok(graph)
    }

    /// Number of reachable layers.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reachable layers in traversal order.
    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    /// Declared inputs, deduplicated.
    pub fn inputs(&self) -> &[NodeIndex] {
        &self.inputs
    }

    /// Declared outputs, deduplicated.
    pub fn outputs(&self) -> &[NodeIndex] {
        &self.outputs
    }

    /// "Produces input to" relation over the node list.
    pub fn relations(&self) -> &RelationMatrix {
        &self.relations
    }

    /// Node indices grouped by rank.
    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    /// Center of every rank along the main axis.
    pub fn rank_centers(&self) -> &[Point3] {
        &self.rank_centers
    }

    /// The deepest rank.
    pub fn max_rank(&self) -> usize {
        self.levels.rank_count().saturating_sub(1)
    }

    /// Index of `layer`, if it is part of the graph.
    pub fn index_of(&self, layer: LayerId) -> Option<NodeIndex> {
        self.nodes.index_of(layer)
    }

    /// Name of the node at `index`.
    pub fn name(&self, index: NodeIndex) -> &str {
        &self.names[index.index()]
    }

    /// Rank of the node at `index`.
    pub fn rank(&self, index: NodeIndex) -> usize {
        self.ranks[index.index()]
    }

    /// Rank of `layer`, if it is part of the graph.
    pub fn rank_of(&self, layer: LayerId) -> Option<usize> {
        self.index_of(layer).map(|index| self.rank(index))
    }

    /// Current center of `layer`, if it is part of the graph.
    pub fn center_of(&self, layer: LayerId) -> Option<Point3> {
        self.index_of(layer).map(|index| self.centers[index.index()])
    }

    /// Rendered thickness of `layer`, if it is part of the graph.
    pub fn visual_depth_of(&self, layer: LayerId) -> Option<f32> {
        self.index_of(layer)
            .map(|index| self.visual_depths[index.index()])
    }

    /// Latest layout generation of `rank`.
    pub fn generation(&self, rank: usize) -> Option<Generation> {
        self.generations.get(rank).copied()
    }

    /// Layout settings this graph was built with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current placement of every node, in traversal order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> {
        self.nodes.iter().map(|(index, layer)| Placement {
            layer,
            name: self.name(index),
            rank: self.rank(index),
            center: self.centers[index.index()],
            visual_depth: self.visual_depths[index.index()],
        })
    }

    /// Target centers for the nodes of `rank` under the current footprints.
    fn pack_level<F>(&self, rank: usize, footprints: &F) -> Vec<(NodeIndex, Point3)>
    where
        F: FootprintProvider + ?Sized,
    {
        let bucket = self.levels.bucket(rank);
        let layers: Vec<LayerId> = bucket.iter().map(|&node| self.nodes.layer(node)).collect();
        let packing = pack_rank(&layers, footprints, self.config.sibling_interval());
        let rank_center = self.rank_centers[rank];

        debug!(rank, total_width = packing.total_width(); "Packed level");
        bucket
            .iter()
            .zip(packing.offsets())
            .map(|(&node, &offset)| (node, rank_center.with_x(offset)))
            .collect()
    }
}

/// Collects indices, dropping repeats while keeping first-seen order.
fn dedup_indices(
    indices: impl Iterator<Item = Result<NodeIndex, GraphError>>,
) -> Result<Vec<NodeIndex>, GraphError> {
    let mut unique: Vec<NodeIndex> = Vec::new();
    for index in indices {
        let index = index?;
        if !unique.contains(&index) {
            unique.push(index);
        }
    }
    Ok(unique)
}
