//! Graph data types consumed by the layout engine
//!
//! Nodes and edges are owned by the caller. The engine only reads node ids
//! (positions are keyed by them) and edge endpoints/strengths; mastery and
//! kind are carried through for render hints.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, unique identifier of a knowledge node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Node kind enumeration for semantic categorization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Concept,
    Question,
    Note,
    Resource,
}

/// Highest mastery level a node can report
pub const MAX_MASTERY: u8 = 5;

/// A knowledge node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// How well the node is known, 0 (unseen) to 5 (mastered)
    #[serde(default)]
    pub mastery_level: u8,

    #[serde(default)]
    pub kind: NodeKind,

    /// Optional display title, ignored by layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            mastery_level: 0,
            kind: NodeKind::Concept,
            title: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mastery(mut self, level: u8) -> Self {
        self.mastery_level = level;
        self
    }
}

fn default_strength() -> f64 {
    1.0
}

/// A weighted relation between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: NodeId,
    pub target_id: NodeId,

    /// Relation strength in `[0, 1]`, scales the attraction force
    #[serde(default = "default_strength")]
    pub strength: f64,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, strength: f64) -> Self {
        Self {
            source_id: source.into(),
            target_id: target.into(),
            strength,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }
}

/// Reasons a node/edge list cannot be laid out
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidGraphError {
    /// An edge endpoint names a node that is not in the node list
    #[error("edge {index} references unknown node '{id}'")]
    UnknownNode { index: usize, id: NodeId },

    /// Two nodes share an id, so positions could not be keyed uniquely
    #[error("duplicate node id '{0}'")]
    DuplicateNode(NodeId),

    /// A node's mastery level is above [`MAX_MASTERY`]
    #[error("node '{id}' has mastery level {level}, expected 0..={max}", max = MAX_MASTERY)]
    MasteryOutOfRange { id: NodeId, level: u8 },

    /// Edge strength is NaN, infinite, or outside `[0, 1]`
    #[error("edge {index} has strength {strength} outside [0, 1]")]
    InvalidStrength { index: usize, strength: f64 },
}

/// Check that node ids are unique, mastery levels are in range, and
/// `edges` only reference ids present in `nodes` with a strength in `[0, 1]`.
///
/// Errors are reported for the first offending element in input order.
pub fn validate(nodes: &[Node], edges: &[Edge]) -> Result<(), InvalidGraphError> {
    let mut ids: HashSet<&NodeId> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !ids.insert(&node.id) {
            return Err(InvalidGraphError::DuplicateNode(node.id.clone()));
        }
        if node.mastery_level > MAX_MASTERY {
            return Err(InvalidGraphError::MasteryOutOfRange {
                id: node.id.clone(),
                level: node.mastery_level,
            });
        }
    }

    for (index, edge) in edges.iter().enumerate() {
        for id in [&edge.source_id, &edge.target_id] {
            if !ids.contains(id) {
                return Err(InvalidGraphError::UnknownNode {
                    index,
                    id: id.clone(),
                });
            }
        }
        if !(0.0..=1.0).contains(&edge.strength) {
            return Err(InvalidGraphError::InvalidStrength {
                index,
                strength: edge.strength,
            });
        }
    }

    Ok(())
}
