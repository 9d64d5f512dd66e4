//! JSON layout dump.

use serde::Serialize;

use strata_core::geometry::Point3;

use crate::{
    export::{Error, Exporter},
    graph::{Graph, Placement},
};

#[derive(Debug, Serialize)]
struct LayoutDump<'a> {
    max_rank: usize,
    rank_centers: &'a [Point3],
    levels: Vec<Vec<&'a str>>,
    nodes: Vec<Placement<'a>>,
}

impl<'a> LayoutDump<'a> {
    fn from_graph(graph: &'a Graph) -> Self {
        let levels = graph
            .levels()
            .iter()
            .map(|(_, bucket)| bucket.iter().map(|&node| graph.name(node)).collect())
            .collect();

        Self {
            max_rank: graph.max_rank(),
            rank_centers: graph.rank_centers(),
            levels,
            nodes: graph.placements().collect(),
        }
    }
}

/// Serializes placements, rank buckets and rank centers.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    /// Emits compact single-line JSON instead of the indented default.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, graph: &Graph) -> Result<String, Error> {
        let dump = LayoutDump::from_graph(graph);
        let json = if self.pretty {
            serde_json::to_string_pretty(&dump)?
        } else {
            serde_json::to_string(&dump)?
        };
        Ok(json)
    }
}
