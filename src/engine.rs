//! Layout engine: strategy selection, recompute, and snapshot publication
//!
//! A recompute validates the input graph, runs the active strategy on a
//! private working copy, and publishes the result as an immutable
//! [`LayoutSnapshot`]. Publication swaps one `Arc` under a lock, so a reader
//! holding a snapshot keeps a consistent view while newer ones replace it.
//!
//! Recompute is synchronous and costs `O(iterations · n²)` for the force
//! strategy. Hosts that need responsiveness should call it off their
//! interactive path; [`LayoutEngine::snapshot_cell`] lets other threads read
//! published snapshots meanwhile.

use std::sync::Arc;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ConfigError, LayoutConfig};
use crate::graph::{Edge, InvalidGraphError, Node, NodeId, validate};
use crate::interaction::InteractionState;
use crate::strategy::{LayoutContext, Positions, StrategyKind, strategy_for};

/// An immutable, fully computed set of node positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub strategy: StrategyKind,
    /// Monotonic publication counter, starting at 1
    pub generated_at: u64,
    /// Seed the strategy's random source was created from
    pub seed: u64,
    pub positions: Positions,
}

impl LayoutSnapshot {
    pub fn contains(&self, id: &NodeId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.positions.keys()
    }
}

/// Shared read handle to the most recently published snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotCell {
    current: Arc<RwLock<Option<Arc<LayoutSnapshot>>>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot, or `None` before the first publication
    pub fn load(&self) -> Option<Arc<LayoutSnapshot>> {
        self.current.read().clone()
    }

    fn store(&self, snapshot: Arc<LayoutSnapshot>) {
        *self.current.write() = Some(snapshot);
    }
}

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No snapshot has been published yet
    Uninitialized,
    /// At least one recompute succeeded
    Ready,
}

/// The last graph accepted by `recompute`, kept for `reset`
#[derive(Debug, Clone)]
struct GraphInput {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Orchestrates layout strategies and publishes snapshots
pub struct LayoutEngine {
    config: LayoutConfig,
    strategy: StrategyKind,
    /// Source of per-run seeds
    seeds: StdRng,
    seed: u64,
    generation: u64,
    graph: Option<GraphInput>,
    published: SnapshotCell,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::with_valid_config(LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// Create an engine; seeds from `config.seed` or from entropy.
    ///
    /// Fails when `config` holds values the strategies cannot use.
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: LayoutConfig) -> Self {
        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seed = seeds.next_u64();

        Self {
            strategy: config.strategy,
            config,
            seeds,
            seed,
            generation: 0,
            graph: None,
            published: SnapshotCell::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Switch the active strategy; takes effect on the next recompute
    pub fn set_strategy(&mut self, kind: StrategyKind) {
        if kind != self.strategy {
            debug!(from = %self.strategy, to = %kind, "layout strategy changed");
        }
        self.strategy = kind;
    }

    /// Set the force simulation's pass count; takes effect on the next recompute
    pub fn set_iterations(&mut self, iterations: usize) {
        self.config.force.iterations = iterations;
    }

    pub fn state(&self) -> EngineState {
        if self.generation == 0 {
            EngineState::Uninitialized
        } else {
            EngineState::Ready
        }
    }

    pub fn current_snapshot(&self) -> Option<Arc<LayoutSnapshot>> {
        self.published.load()
    }

    /// Handle other threads can use to read published snapshots
    pub fn snapshot_cell(&self) -> SnapshotCell {
        self.published.clone()
    }

    /// Fresh interaction state that frames snapshots with this engine's
    /// camera limits, already observing the current snapshot if there is one
    pub fn interaction_state(&self) -> InteractionState {
        let mut state = InteractionState::new().with_framing(self.config.framing.clone());
        if let Some(snapshot) = self.current_snapshot() {
            state.observe(snapshot);
        }
        state
    }

    /// Lay out `nodes`/`edges` with the active strategy and publish the result.
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub fn recompute(
        &mut self,
        nodes: &[Node],
        edges: &[Edge],
    ) -> Result<Arc<LayoutSnapshot>, InvalidGraphError> {
        if let Err(err) = validate(nodes, edges) {
            warn!(error = %err, "rejected graph");
            return Err(err);
        }

        self.graph = Some(GraphInput {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        });
        Ok(self.run(true))
    }

    /// Re-run the last accepted graph with a fresh random seed.
    ///
    /// Previous positions are never reused, so every node is re-randomized
    /// even with warm start enabled. Returns `None` when nothing has been
    /// computed yet.
    pub fn reset(&mut self) -> Option<Arc<LayoutSnapshot>> {
        self.graph.as_ref()?;
        self.seed = self.seeds.next_u64();
        debug!(seed = self.seed, "layout reset");
        Some(self.run(false))
    }

    fn run(&mut self, reuse_previous: bool) -> Arc<LayoutSnapshot> {
        let previous = if reuse_previous {
            self.published.load()
        } else {
            None
        };
        let positions = match &self.graph {
            Some(graph) => {
                debug!(
                    strategy = %self.strategy,
                    nodes = graph.nodes.len(),
                    edges = graph.edges.len(),
                    seed = self.seed,
                    "computing layout"
                );
                let strategy = strategy_for(self.strategy, &self.config);
                let mut rng = StdRng::seed_from_u64(self.seed);
                let mut ctx = LayoutContext::new(&mut rng)
                    .with_previous(previous.as_deref().map(|s| &s.positions));
                strategy.compute_layout(&graph.nodes, &graph.edges, &mut ctx)
            }
            None => Positions::new(),
        };

        self.generation += 1;
        let snapshot = Arc::new(LayoutSnapshot {
            strategy: self.strategy,
            generated_at: self.generation,
            seed: self.seed,
            positions,
        });
        self.published.store(Arc::clone(&snapshot));
        debug!(generation = self.generation, "snapshot published");
        snapshot
    }
}
