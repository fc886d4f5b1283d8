//! Layout strategies
//!
//! Every strategy implements the same contract: given the nodes, the edges
//! and a [`LayoutContext`], produce exactly one position per node id.
//!
//! - [`ForceDirected`]: n-body simulation with repulsion, spring attraction
//!   and damping, seeded from the context's random source
//! - [`Sphere`]: Fibonacci lattice on a sphere
//! - [`Helix`]: two-turn helix around the y axis
//! - [`Grid`]: cubic lattice centered on the origin
//!
//! Only `ForceDirected` consumes randomness or previous positions; the other
//! three are pure functions of the node count.

use std::fmt;

use indexmap::IndexMap;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::graph::{Edge, Node, NodeId};
use crate::vector::Vector3;

mod force;
mod grid;
mod helix;
mod sphere;

pub use force::ForceDirected;
pub use grid::Grid;
pub use helix::Helix;
pub use sphere::Sphere;

/// Node positions keyed by id, in input node order
pub type Positions = IndexMap<NodeId, Vector3>;

/// Strategy selector
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Force,
    Sphere,
    Helix,
    Grid,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Force,
        StrategyKind::Sphere,
        StrategyKind::Helix,
        StrategyKind::Grid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Force => "force",
            StrategyKind::Sphere => "sphere",
            StrategyKind::Helix => "helix",
            StrategyKind::Grid => "grid",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs a strategy may draw on besides the graph itself
pub struct LayoutContext<'a> {
    /// Positions from the previously published snapshot, if any
    pub previous: Option<&'a Positions>,
    /// Random source for stochastic strategies
    pub rng: &'a mut dyn RngCore,
}

impl<'a> LayoutContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore) -> Self {
        Self {
            previous: None,
            rng,
        }
    }

    pub fn with_previous(mut self, previous: Option<&'a Positions>) -> Self {
        self.previous = previous;
        self
    }
}

/// Computes a position for every node
///
/// Implementations may assume the graph has already been validated: every
/// edge endpoint names a node and node ids are unique.
pub trait LayoutStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn compute_layout(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        ctx: &mut LayoutContext<'_>,
    ) -> Positions;
}

/// Build the strategy for `kind` from its section of `config`
pub fn strategy_for(kind: StrategyKind, config: &LayoutConfig) -> Box<dyn LayoutStrategy> {
    match kind {
        StrategyKind::Force => Box::new(ForceDirected::new(config.force.clone())),
        StrategyKind::Sphere => Box::new(Sphere::new(config.sphere.clone())),
        StrategyKind::Helix => Box::new(Helix::new(config.helix.clone())),
        StrategyKind::Grid => Box::new(Grid::new(config.grid.clone())),
    }
}

/// Place nodes by index with a closure `(index, total) -> position`
fn place_by_index(nodes: &[Node], place: impl Fn(usize, usize) -> Vector3) -> Positions {
    let total = nodes.len();
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), place(i, total)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_nodes(n: usize) -> Vec<Node> {
        (0..n).map(|i| Node::new(format!("node{i}"))).collect()
    }

    #[test]
    fn strategy_kind_parses_case_insensitive() {
        use clap::ValueEnum;

        assert_eq!(StrategyKind::from_str("force", true), Ok(StrategyKind::Force));
        assert_eq!(StrategyKind::from_str("HELIX", true), Ok(StrategyKind::Helix));
        assert!(StrategyKind::from_str("dagre", true).is_err());
    }

    #[test]
    fn strategy_kind_display_matches_serde_name() {
        for kind in StrategyKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn strategy_for_builds_matching_kind() {
        let config = LayoutConfig::default();
        for kind in StrategyKind::ALL {
            assert_eq!(strategy_for(kind, &config).kind(), kind);
        }
    }

    #[test]
    fn every_strategy_positions_every_node_once() {
        let config = LayoutConfig::default();
        let nodes = make_nodes(13);
        let edges = vec![Edge::new("node0", "node1", 1.0)];
        let mut rng = StdRng::seed_from_u64(11);

        for kind in StrategyKind::ALL {
            let strategy = strategy_for(kind, &config);
            let mut ctx = LayoutContext::new(&mut rng);
            let positions = strategy.compute_layout(&nodes, &edges, &mut ctx);

            assert_eq!(positions.len(), nodes.len(), "{kind}");
            for (node, (id, pos)) in nodes.iter().zip(&positions) {
                assert_eq!(&node.id, id, "{kind} keeps input order");
                assert!(pos.is_finite(), "{kind} produced non-finite position");
            }
        }
    }

    #[test]
    fn every_strategy_handles_empty_graph() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(0);

        for kind in StrategyKind::ALL {
            let mut ctx = LayoutContext::new(&mut rng);
            let positions = strategy_for(kind, &config).compute_layout(&[], &[], &mut ctx);
            assert!(positions.is_empty(), "{kind}");
        }
    }
}
