//! "Produces input to" adjacency over the node list.

use log::debug;

use crate::{
    graph::{NodeIndex, builder::NodeList},
    model::Topology,
};

/// Square boolean matrix where `produces(from, to)` means `from` feeds `to`.
///
/// Model graphs hold tens of layers, so the dense `n × n` form is cheap and
/// keeps successor scans in node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl RelationMatrix {
    /// Builds the forward-edge view of `nodes`.
    ///
    /// For every node and each of its producers, marks
    /// `matrix[producer][node]`.
    pub fn build(topology: &Topology, nodes: &NodeList) -> Self {
        let size = nodes.len();
        let mut matrix = Self {
            size,
            cells: vec![false; size * size],
        };

        for (to, layer) in nodes.iter() {
            for &producer in topology.predecessors(layer) {
                if let Some(from) = nodes.index_of(producer) {
                    matrix.cells[from.index() * size + to.index()] = true;
                }
            }
        }

        debug!(size, edges = matrix.edge_count(); "Built relation matrix");
        matrix
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `from` feeds `to`.
    pub fn produces(&self, from: NodeIndex, to: NodeIndex) -> bool {
        from.index() < self.size
            && to.index() < self.size
            && self.cells[from.index() * self.size + to.index()]
    }

    /// Nodes fed by `from`, in ascending index order.
    pub fn successors(&self, from: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let row: &[bool] = if from.index() < self.size {
            &self.cells[from.index() * self.size..(from.index() + 1) * self.size]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|(_, produces)| **produces)
            .map(|(to, _)| NodeIndex::new(to))
    }

    /// Nodes feeding `to`, in ascending index order.
    pub fn predecessors(&self, to: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.size)
            .map(NodeIndex::new)
            .filter(move |&from| self.produces(from, to))
    }

    /// Every `(from, to)` edge, row by row.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        (0..self.size).map(NodeIndex::new).flat_map(move |from| {
            self.successors(from).map(move |to| (from, to))
        })
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }
}
