//! Interactive re-layout after a footprint change.
//!
//! Expanding or collapsing a layer only changes its own width, so only its
//! rank needs re-packing. The rank's generation counter is advanced first and
//! every transition handed to the animator carries it, letting the animator
//! discard targets computed by an older re-layout of the same rank.

use log::{debug, info};

use strata_core::{
    animation::{Animator, Generation, Transition},
    footprint::FootprintProvider,
    identifier::LayerId,
};

use crate::{error::GraphError, graph::Graph};

impl Graph {
    /// Re-packs the rank containing `layer` and animates its siblings.
    ///
    /// Every node of the rank receives one [`Transition`] from its previous
    /// center to its new one. Other ranks are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownLayer`] if `layer` is not part of this graph.
    pub fn on_footprint_changed<F, A>(
        &mut self,
        layer: LayerId,
        footprints: &F,
        animator: &mut A,
    ) -> Result<Generation, GraphError>
    where
        F: FootprintProvider + ?Sized,
        A: Animator + ?Sized,
    {
        let index = self
            .index_of(layer)
            .ok_or_else(|| GraphError::UnknownLayer(layer.to_string()))?;
        let rank = self.rank(index);
        let generation = self.advance_generation(rank);

        info!(layer = self.name(index), rank, generation = generation.value(); "Re-laying out rank");

        let duration = self.config.transition_duration();
        for (node, target) in self.pack_level(rank, footprints) {
            let from = self.centers[node.index()];
            self.centers[node.index()] = target;
            animator.translate_to(Transition::new(
                self.nodes.layer(node),
                rank,
                generation,
                from,
                target,
                duration,
            ));
        }

        Ok(generation)
    }

    /// Re-packs every rank without animating.
    ///
    /// Used after bulk footprint changes, such as restoring a saved
    /// expanded/collapsed state before the first render. Each rank's
    /// generation still advances so in-flight animations become stale.
    pub fn relayout_all<F>(&mut self, footprints: &F)
    where
        F: FootprintProvider + ?Sized,
    {
        for rank in 0..self.levels.rank_count() {
            self.advance_generation(rank);
            for (node, target) in self.pack_level(rank, footprints) {
                self.centers[node.index()] = target;
            }
        }
        debug!(ranks = self.levels.rank_count(); "Re-laid out all ranks");
    }

    fn advance_generation(&mut self, rank: usize) -> Generation {
        let generation = self.generations[rank].next();
        self.generations[rank] = generation;
        generation
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::LayoutConfig,
        footprint::{FootprintState, FootprintTable},
        model::Topology,
    };

    struct Fixture {
        graph: Graph,
        footprints: FootprintTable,
        p: LayerId,
        q: LayerId,
        r: LayerId,
        out: LayerId,
    }

    fn fixture() -> Fixture {
        let mut topology = Topology::new();
        let p = topology.declare("p", 1).unwrap();
        let q = topology.declare("q", 1).unwrap();
        let r = topology.declare("r", 1).unwrap();
        let out = topology.merge("out", 1, &[p, q, r]).unwrap();

        let mut footprints = FootprintTable::new(10.0);
        for layer in [p, q, r] {
            footprints.insert(layer, 4.0, 10.0);
            footprints.set_state(layer, FootprintState::Expanded);
        }

        let config = LayoutConfig::default()
            .with_sibling_interval(2.0)
            .with_transition(Duration::from_millis(300));
        let graph = Graph::build(&topology, &[p, q, r], &[out], &footprints, &config).unwrap();

        Fixture {
            graph,
            footprints,
            p,
            q,
            r,
            out,
        }
    }

    #[test]
    fn test_collapse_repacks_only_its_rank() {
        let mut fixture = fixture();
        let out_before = fixture.graph.center_of(fixture.out).unwrap();
        // Node list is [out, p, q, r]: rank 0 packs p, q, r in that order.
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.p).unwrap().x(), -12.0);
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.q).unwrap().x(), 0.0);
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.r).unwrap().x(), 12.0);

        fixture.footprints.toggle(fixture.q);
        let mut transitions: Vec<Transition> = Vec::new();
        let generation = fixture
            .graph
            .on_footprint_changed(fixture.q, &fixture.footprints, &mut transitions)
            .unwrap();

        assert_eq!(generation, Generation::new(1));
        assert_eq!(transitions.len(), 3);
        assert!(transitions.iter().all(|t| t.generation() == generation));
        assert!(transitions.iter().all(|t| t.rank() == 0));
        assert!(
            transitions
                .iter()
                .all(|t| t.duration() == Duration::from_millis(300))
        );

        // widths [10, 4, 10], interval 2 => total 28
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.p).unwrap().x(), -9.0);
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.q).unwrap().x(), 0.0);
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.r).unwrap().x(), 9.0);

        assert_eq!(fixture.graph.center_of(fixture.out).unwrap(), out_before);
        assert_eq!(fixture.graph.generation(1), Some(Generation::default()));
    }

    #[test]
    fn test_transition_starts_from_previous_center() {
        let mut fixture = fixture();
        let before = fixture.graph.center_of(fixture.p).unwrap();

        fixture.footprints.toggle(fixture.q);
        let mut transitions: Vec<Transition> = Vec::new();
        fixture
            .graph
            .on_footprint_changed(fixture.q, &fixture.footprints, &mut transitions)
            .unwrap();

        let moved = transitions
            .iter()
            .find(|t| t.layer() == fixture.p)
            .unwrap();
        assert_eq!(moved.from(), before);
        assert_eq!(Some(moved.to()), fixture.graph.center_of(fixture.p));
    }

    #[test]
    fn test_repeated_changes_advance_generation() {
        let mut fixture = fixture();
        let mut transitions: Vec<Transition> = Vec::new();

        fixture.footprints.toggle(fixture.q);
        fixture
            .graph
            .on_footprint_changed(fixture.q, &fixture.footprints, &mut transitions)
            .unwrap();
        fixture.footprints.toggle(fixture.r);
        let second = fixture
            .graph
            .on_footprint_changed(fixture.r, &fixture.footprints, &mut transitions)
            .unwrap();

        assert_eq!(second, Generation::new(2));
        assert_eq!(transitions.len(), 6);
    }

    #[test]
    fn test_repack_with_unchanged_footprints_is_stable() {
        let mut fixture = fixture();
        let before: Vec<_> = fixture.graph.placements().map(|p| p.center).collect();

        let mut transitions: Vec<Transition> = Vec::new();
        fixture
            .graph
            .on_footprint_changed(fixture.p, &fixture.footprints, &mut transitions)
            .unwrap();

        let after: Vec<_> = fixture.graph.placements().map(|p| p.center).collect();
        assert_eq!(before, after);
        assert!(transitions.iter().all(|t| t.distance() == 0.0));
    }

    #[test]
    fn test_unknown_layer() {
        let mut fixture = fixture();
        let mut transitions: Vec<Transition> = Vec::new();
        let err = fixture
            .graph
            .on_footprint_changed(LayerId::new(99), &fixture.footprints, &mut transitions)
            .unwrap_err();

        assert_eq!(err, GraphError::UnknownLayer("layer#99".to_string()));
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_relayout_all_applies_bulk_changes() {
        let mut fixture = fixture();
        for layer in [fixture.p, fixture.q, fixture.r] {
            fixture.footprints.toggle(layer);
        }

        fixture.graph.relayout_all(&fixture.footprints);

        // widths [4, 4, 4], interval 2 => total 16
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.p).unwrap().x(), -6.0);
        assert_approx_eq!(f32, fixture.graph.center_of(fixture.r).unwrap().x(), 6.0);
        assert_eq!(fixture.graph.generation(0), Some(Generation::new(1)));
        assert_eq!(fixture.graph.generation(1), Some(Generation::new(1)));
    }
}
