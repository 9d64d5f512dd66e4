//! Example: Laying out a network built in code
//!
//! This example declares a small two-branch network directly through the
//! topology API, lays it out, then collapses one layer and prints the
//! transitions the re-layout hands to the animator.

use strata::{
    Graph,
    animation::TransitionBoard,
    config::LayoutConfig,
    export::{Exporter, text::TextExporter},
    footprint::{FootprintState, FootprintTable},
    model::Topology,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut topology = Topology::new();
    let image = topology.declare("image", 3)?;
    let conv = topology.chain("conv", 64, image)?;
    let metadata = topology.declare("metadata", 8)?;
    let dense = topology.chain("dense", 32, metadata)?;
    let fusion = topology.merge("fusion", 96, &[conv, dense])?;
    let logits = topology.chain("logits", 10, fusion)?;

    let mut footprints = FootprintTable::new(10.0);
    footprints.insert(conv, 12.0, 40.0);
    footprints.set_state(conv, FootprintState::Expanded);

    let config = LayoutConfig::default();
    let mut graph = Graph::build(&topology, &[image, metadata], &[logits], &footprints, &config)?;

    println!("Initial layout:\n{}", TextExporter.export(&graph)?);

    footprints.toggle(conv);
    let mut board = TransitionBoard::new();
    let generation = graph.on_footprint_changed(conv, &footprints, &mut board)?;

    println!("Collapsed `conv` (generation {}):", generation.value());
    for transition in board.transitions() {
        println!(
            "  {} moves {:.1} over {:?}",
            topology.name(transition.layer()),
            transition.distance(),
            transition.duration()
        );
    }

    println!("\nFinal layout:\n{}", TextExporter.export(&graph)?);
    Ok(())
}
