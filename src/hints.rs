//! Render hints derived from node mastery and kind
//!
//! The engine never uses these itself; they travel alongside positions so
//! renderers size, color and shape nodes consistently.

use serde::Serialize;

use crate::graph::{MAX_MASTERY, Node, NodeKind};

/// Color constants for mastery levels (hex RGB)
pub mod colors {
    /// Level 4-5: mastered (green)
    pub const MASTERED: &str = "#52c41a";
    /// Level 3: proficient (blue)
    pub const PROFICIENT: &str = "#1890ff";
    /// Level 2: basic grasp (orange)
    pub const BASIC: &str = "#faad14";
    /// Level 1: introduced (red)
    pub const INTRODUCED: &str = "#ff7875";
    /// Level 0: not yet studied (grey)
    pub const UNSEEN: &str = "#d9d9d9";
}

/// Base node size at mastery 0
pub const BASE_SIZE: f64 = 0.3;
/// Size added per mastery level
pub const SIZE_PER_LEVEL: f64 = 0.1;

/// Geometry used to draw each node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Sphere,
    Box,
    Cone,
    Octahedron,
}

impl From<NodeKind> for Shape {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Concept => Shape::Sphere,
            NodeKind::Question => Shape::Box,
            NodeKind::Note => Shape::Cone,
            NodeKind::Resource => Shape::Octahedron,
        }
    }
}

/// How a renderer should draw one node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderHint {
    pub color: &'static str,
    pub size: f64,
    pub shape: Shape,
}

impl RenderHint {
    pub fn for_node(node: &Node) -> Self {
        Self {
            color: mastery_color(node.mastery_level),
            size: mastery_size(node.mastery_level),
            shape: node.kind.into(),
        }
    }
}

pub fn mastery_color(level: u8) -> &'static str {
    match level {
        4.. => colors::MASTERED,
        3 => colors::PROFICIENT,
        2 => colors::BASIC,
        1 => colors::INTRODUCED,
        0 => colors::UNSEEN,
    }
}

/// Node size, growing linearly with mastery (clamped to the valid range)
pub fn mastery_size(level: u8) -> f64 {
    BASE_SIZE + f64::from(level.min(MAX_MASTERY)) * SIZE_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_by_mastery() {
        assert_eq!(mastery_color(0), colors::UNSEEN);
        assert_eq!(mastery_color(1), colors::INTRODUCED);
        assert_eq!(mastery_color(2), colors::BASIC);
        assert_eq!(mastery_color(3), colors::PROFICIENT);
        assert_eq!(mastery_color(4), colors::MASTERED);
        assert_eq!(mastery_color(5), colors::MASTERED);
    }

    #[test]
    fn size_grows_with_mastery_and_clamps() {
        assert!((mastery_size(0) - 0.3).abs() < 1e-12);
        assert!((mastery_size(5) - 0.8).abs() < 1e-12);
        assert_eq!(mastery_size(200), mastery_size(5));
    }

    #[test]
    fn shape_by_kind() {
        assert_eq!(Shape::from(NodeKind::Concept), Shape::Sphere);
        assert_eq!(Shape::from(NodeKind::Question), Shape::Box);
        assert_eq!(Shape::from(NodeKind::Note), Shape::Cone);
        assert_eq!(Shape::from(NodeKind::Resource), Shape::Octahedron);
    }

    #[test]
    fn hint_for_node() {
        let node = Node::new("n").with_kind(NodeKind::Note).with_mastery(3);
        let hint = RenderHint::for_node(&node);
        assert_eq!(hint.color, colors::PROFICIENT);
        assert_eq!(hint.shape, Shape::Cone);
    }
}
