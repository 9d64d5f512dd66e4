//! Rank assignment and grouping.
//!
//! Ranks are assigned by a breadth-first sweep forward from the declared
//! inputs. Every wave writes `wave + 1` onto the successors it reaches, so a
//! node reached again by a longer path ends up on the deeper rank. The sweep
//! stops as soon as a whole frontier consists of declared outputs.
//!
//! Afterwards every declared output is moved onto the single deepest rank
//! found, regardless of its own distance from the inputs. Outputs are aligned
//! to the global maximum, not to the length of their own longest path.

use log::{debug, trace};

use crate::graph::{NodeIndex, RelationMatrix};

/// Rank of every node, indexed by [`NodeIndex`].
///
/// A node the sweep never reached has no rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankLookup {
    ranks: Vec<Option<usize>>,
    max_rank: usize,
}

impl RankLookup {
    /// Rank of `node`, if it received one.
    pub fn rank(&self, node: NodeIndex) -> Option<usize> {
        self.ranks.get(node.index()).copied().flatten()
    }

    /// The deepest rank; every declared output sits on it.
    pub fn max_rank(&self) -> usize {
        self.max_rank
    }

    /// Number of nodes covered by the lookup.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns true if the lookup covers no node.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// First node that received no rank.
    pub fn first_unranked(&self) -> Option<NodeIndex> {
        self.ranks
            .iter()
            .position(Option::is_none)
            .map(NodeIndex::new)
    }
}

/// Assigns a rank to every node reachable forward from `inputs`.
pub fn assign_levels(
    matrix: &RelationMatrix,
    inputs: &[NodeIndex],
    outputs: &[NodeIndex],
) -> RankLookup {
    let size = matrix.size();
    let mut ranks = vec![None; size];
    let mut is_output = vec![false; size];
    for output in outputs {
        is_output[output.index()] = true;
    }

    let mut frontier = Vec::with_capacity(inputs.len());
    let mut queued = vec![false; size];
    for &input in inputs {
        ranks[input.index()] = Some(0);
        if !queued[input.index()] {
            queued[input.index()] = true;
            frontier.push(input);
        }
    }

    let mut rank = 0;
    while !frontier.iter().all(|node| is_output[node.index()]) {
        let mut next = Vec::new();
        queued.fill(false);

        for &node in &frontier {
            for successor in matrix.successors(node) {
                ranks[successor.index()] = Some(rank + 1);
                if !queued[successor.index()] {
                    queued[successor.index()] = true;
                    next.push(successor);
                }
            }
        }

        rank += 1;
        trace!(rank, frontier = next.len(); "Advanced frontier");
        frontier = next;
    }

    let max_rank = ranks.iter().flatten().copied().max().unwrap_or_default();
    for output in outputs {
        ranks[output.index()] = Some(max_rank);
    }

    debug!(max_rank, waves = rank; "Assigned levels");
    RankLookup { ranks, max_rank }
}

/// Node indices grouped by rank.
///
/// Bucket `r` holds the nodes of rank `r` in ascending index order; every
/// ranked node appears in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    buckets: Vec<Vec<NodeIndex>>,
}

impl LevelMap {
    /// Buckets every ranked node of `lookup` by its rank.
    pub fn group(lookup: &RankLookup) -> Self {
        let mut buckets = vec![Vec::new(); lookup.max_rank() + 1];
        for (index, rank) in lookup.ranks.iter().enumerate() {
            if let Some(rank) = rank {
                buckets[*rank].push(NodeIndex::new(index));
            }
        }
        Self { buckets }
    }

    /// Number of ranks.
    pub fn rank_count(&self) -> usize {
        self.buckets.len()
    }

    /// Nodes of `rank`; empty for ranks beyond the deepest one.
    pub fn bucket(&self, rank: usize) -> &[NodeIndex] {
        self.buckets.get(rank).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over `(rank, nodes)` from rank zero upward.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[NodeIndex])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(rank, bucket)| (rank, bucket.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::build_node_list, model::Topology};

    struct Fixture {
        topology: Topology,
        nodes: crate::graph::NodeList,
        matrix: RelationMatrix,
    }

    impl Fixture {
        fn new(topology: Topology, outputs: &[&str]) -> Self {
            let outputs: Vec<_> = outputs
                .iter()
                .map(|name| topology.find(name).unwrap())
                .collect();
            let nodes = build_node_list(&topology, &outputs).unwrap();
            let matrix = RelationMatrix::build(&topology, &nodes);
            Self {
                topology,
                nodes,
                matrix,
            }
        }

        fn index(&self, name: &str) -> NodeIndex {
            self.nodes
                .index_of(self.topology.find(name).unwrap())
                .unwrap()
        }

        fn indices(&self, names: &[&str]) -> Vec<NodeIndex> {
            names.iter().map(|name| self.index(name)).collect()
        }

        fn assign(&self, inputs: &[&str], outputs: &[&str]) -> RankLookup {
            assign_levels(&self.matrix, &self.indices(inputs), &self.indices(outputs))
        }
    }

    #[test]
    fn test_linear_chain_ranks_by_depth() {
        let mut topology = Topology::new();
        let input = topology.declare("input", 1).unwrap();
        let a = topology.chain("a", 1, input).unwrap();
        let b = topology.chain("b", 1, a).unwrap();
        topology.chain("output", 1, b).unwrap();
        let fixture = Fixture::new(topology, &["output"]);

        let lookup = fixture.assign(&["input"], &["output"]);
        for (name, expected) in [("input", 0), ("a", 1), ("b", 2), ("output", 3)] {
            assert_eq!(lookup.rank(fixture.index(name)), Some(expected), "{name}");
        }
        assert_eq!(lookup.max_rank(), 3);
    }

    #[test]
    fn test_unbalanced_outputs_are_aligned_to_deepest_rank() {
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        topology.chain("a", 1, x).unwrap();
        let b = topology.chain("b", 1, x).unwrap();
        topology.chain("c", 1, b).unwrap();
        let fixture = Fixture::new(topology, &["a", "c"]);

        let lookup = fixture.assign(&["x"], &["a", "c"]);
        assert_eq!(lookup.rank(fixture.index("x")), Some(0));
        assert_eq!(lookup.rank(fixture.index("b")), Some(1));
        assert_eq!(lookup.rank(fixture.index("a")), Some(2));
        assert_eq!(lookup.rank(fixture.index("c")), Some(2));
    }

    #[test]
    fn test_alignment_uses_global_maximum_not_own_path() {
        // x -> a (output); x -> b -> c -> d -> e (output); y -> f -> e
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        topology.chain("a", 1, x).unwrap();
        let b = topology.chain("b", 1, x).unwrap();
        let c = topology.chain("c", 1, b).unwrap();
        let d = topology.chain("d", 1, c).unwrap();
        let y = topology.declare("y", 1).unwrap();
        let f = topology.chain("f", 1, y).unwrap();
        topology.merge("e", 1, &[d, f]).unwrap();
        let fixture = Fixture::new(topology, &["a", "e"]);

        let lookup = fixture.assign(&["x", "y"], &["a", "e"]);
        assert_eq!(lookup.max_rank(), 4);
        assert_eq!(lookup.rank(fixture.index("a")), Some(4));
        assert_eq!(lookup.rank(fixture.index("e")), Some(4));
        assert_eq!(lookup.rank(fixture.index("f")), Some(1));
    }

    #[test]
    fn test_longer_path_overwrites_shorter() {
        // x -> m, x -> p -> m, m -> out
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        let p = topology.chain("p", 1, x).unwrap();
        let m = topology.merge("m", 1, &[x, p]).unwrap();
        topology.chain("out", 1, m).unwrap();
        let fixture = Fixture::new(topology, &["out"]);

        let lookup = fixture.assign(&["x"], &["out"]);
        assert_eq!(lookup.rank(fixture.index("p")), Some(1));
        assert_eq!(lookup.rank(fixture.index("m")), Some(2));
        assert_eq!(lookup.rank(fixture.index("out")), Some(3));
    }

    #[test]
    fn test_source_not_declared_as_input_stays_unranked() {
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        let stray = topology.declare("stray", 1).unwrap();
        topology.merge("out", 1, &[x, stray]).unwrap();
        let fixture = Fixture::new(topology, &["out"]);

        let lookup = fixture.assign(&["x"], &["out"]);
        assert_eq!(lookup.rank(fixture.index("stray")), None);
        assert_eq!(lookup.first_unranked(), Some(fixture.index("stray")));
    }

    #[test]
    fn test_sweep_stops_on_frontier_of_outputs() {
        // x -> a (output) -> b (output)
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        let a = topology.chain("a", 1, x).unwrap();
        topology.chain("b", 1, a).unwrap();
        let fixture = Fixture::new(topology, &["a", "b"]);

        let lookup = fixture.assign(&["x"], &["a", "b"]);
        assert_eq!(lookup.rank(fixture.index("x")), Some(0));
        assert_eq!(lookup.rank(fixture.index("a")), Some(1));
        // Never reached by the sweep; placed by output alignment alone.
        assert_eq!(lookup.rank(fixture.index("b")), Some(1));
        assert_eq!(lookup.max_rank(), 1);
        assert_eq!(lookup.first_unranked(), None);
    }

    #[test]
    fn test_layer_behind_output_frontier_stays_unranked() {
        // x -> a (output) -> c -> d (output)
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        let a = topology.chain("a", 1, x).unwrap();
        let c = topology.chain("c", 1, a).unwrap();
        topology.chain("d", 1, c).unwrap();
        let fixture = Fixture::new(topology, &["a", "d"]);

        let lookup = fixture.assign(&["x"], &["a", "d"]);
        assert_eq!(lookup.rank(fixture.index("c")), None);
        assert_eq!(lookup.rank(fixture.index("d")), Some(1));
        assert_eq!(lookup.first_unranked(), Some(fixture.index("c")));
    }

    #[test]
    fn test_single_node_graph() {
        let mut topology = Topology::new();
        topology.declare("only", 1).unwrap();
        let fixture = Fixture::new(topology, &["only"]);

        let lookup = fixture.assign(&["only"], &["only"]);
        assert_eq!(lookup.rank(fixture.index("only")), Some(0));
        assert_eq!(lookup.max_rank(), 0);
    }

    #[test]
    fn test_level_map_partitions_nodes() {
        let mut topology = Topology::new();
        let x = topology.declare("x", 1).unwrap();
        let y = topology.declare("y", 1).unwrap();
        let m = topology.merge("m", 1, &[x, y]).unwrap();
        topology.chain("z", 1, m).unwrap();
        let fixture = Fixture::new(topology, &["z"]);

        let lookup = fixture.assign(&["x", "y"], &["z"]);
        let levels = LevelMap::group(&lookup);

        assert_eq!(levels.rank_count(), 3);
        let mut rank_zero = levels.bucket(0).to_vec();
        rank_zero.sort();
        assert_eq!(rank_zero, {
            let mut expected = fixture.indices(&["x", "y"]);
            expected.sort();
            expected
        });
        assert_eq!(levels.bucket(1), &[fixture.index("m")]);
        assert_eq!(levels.bucket(2), &[fixture.index("z")]);
        assert!(levels.bucket(3).is_empty());

        let total: usize = levels.iter().map(|(_, bucket)| bucket.len()).sum();
        assert_eq!(total, 4);
    }
}
