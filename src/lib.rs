//! kglayout - 3D layout engine for knowledge graphs.
//!
//! Positions graph nodes with one of four strategies (force-directed, sphere,
//! helix, grid) and publishes each result as an immutable snapshot that
//! renderers and interaction state read from.

pub mod config;
pub mod engine;
pub mod framing;
pub mod graph;
pub mod hints;
pub mod interaction;
pub mod io;
pub mod strategy;
pub mod vector;

pub use config::{ConfigError, LayoutConfig};
pub use engine::{EngineState, LayoutEngine, LayoutSnapshot, SnapshotCell};
pub use graph::{Edge, InvalidGraphError, Node, NodeId, NodeKind};
pub use interaction::{InteractionEvent, InteractionState};
pub use strategy::{LayoutStrategy, Positions, StrategyKind};
pub use vector::Vector3;
