//! Plain-text layout table.

use std::fmt::Write;

use crate::{
    export::{Error, Exporter},
    graph::Graph,
};

/// Lists every rank with its main-axis center and the layers placed on it.
///
/// ```text
/// rank 0  y = -25.0
///   x          x =   -6.0  depth =  1.0
///   y          x =    6.0  depth =  1.0
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, graph: &Graph) -> Result<String, Error> {
        let mut out = String::new();
        let width = graph
            .placements()
            .map(|placement| placement.name.len())
            .max()
            .unwrap_or_default();

        for (rank, bucket) in graph.levels().iter() {
            writeln!(out, "rank {rank}  y = {:.1}", graph.rank_centers()[rank].y())?;
            for &node in bucket {
                let layer = graph.nodes().layer(node);
                let center = graph.center_of(layer).unwrap_or_default();
                let depth = graph.visual_depth_of(layer).unwrap_or_default();
                writeln!(
                    out,
                    "  {:<width$}  x = {:>7.1}  depth = {:>5.1}",
                    graph.name(node),
                    center.x(),
                    depth,
                )?;
            }
        }

        Ok(out)
    }
}
