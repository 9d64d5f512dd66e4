//! Graphviz DOT view of the relation graph.
//!
//! Nodes carry their rank and layout center (`pos`, usable with
//! `neato -n`); edges follow the "produces input to" relation.

use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, EdgeReference, NodeIndex},
};

use crate::{
    export::{Error, Exporter},
    graph::{Graph, Placement},
};

type LayoutDag<'a> = DiGraph<Placement<'a>, ()>;

#[derive(Debug, Clone, Copy, Default)]
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export(&self, graph: &Graph) -> Result<String, Error> {
        let mut dag: LayoutDag<'_> =
            DiGraph::with_capacity(graph.node_count(), graph.relations().edge_count());
        let handles: Vec<NodeIndex> = graph
            .placements()
            .map(|placement| dag.add_node(placement))
            .collect();
        for (from, to) in graph.relations().edges() {
            dag.add_edge(handles[from.index()], handles[to.index()], ());
        }

        let dot = Dot::with_attr_getters(
            &dag,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &edge_attributes,
            &node_attributes,
        );

        Ok(format!("{dot:?}"))
    }
}

fn edge_attributes(_: &LayoutDag<'_>, _: EdgeReference<'_, ()>) -> String {
    String::new()
}

fn node_attributes(_: &LayoutDag<'_>, (_, placement): (NodeIndex, &Placement<'_>)) -> String {
    format!(
        "label = {:?} rank = {} pos = \"{:.1},{:.1}\"",
        placement.name,
        placement.rank,
        placement.center.x(),
        placement.center.y(),
    )
}
