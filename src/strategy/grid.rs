//! Cubic grid layout

use super::{LayoutContext, LayoutStrategy, Positions, StrategyKind, place_by_index};
use crate::config::GridConfig;
use crate::graph::{Edge, Node};
use crate::vector::Vector3;

/// Fills a cube of side `ceil(cbrt(n))` cell by cell, x fastest
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub config: GridConfig,
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    /// Number of cells along each axis for `total` nodes
    pub fn side(total: usize) -> usize {
        let root = (total as f64).cbrt();
        // cbrt can land a hair above an exact integer root
        let rounded = root.round();
        if (root - rounded).abs() < 1e-9 {
            rounded as usize
        } else {
            root.ceil() as usize
        }
    }

    pub fn point(&self, index: usize, total: usize) -> Vector3 {
        let side = Self::side(total).max(1);
        let half = side as f64 / 2.0;

        let x = (index % side) as f64 - half;
        let y = ((index / side) % side) as f64 - half;
        let z = (index / (side * side)) as f64 - half;

        Vector3::new(x, y, z) * self.config.spacing
    }
}

impl LayoutStrategy for Grid {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Grid
    }

    fn compute_layout(
        &self,
        nodes: &[Node],
        _edges: &[Edge],
        _ctx: &mut LayoutContext<'_>,
    ) -> Positions {
        place_by_index(nodes, |i, n| self.point(i, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_is_ceiling_cube_root() {
        assert_eq!(Grid::side(0), 0);
        assert_eq!(Grid::side(1), 1);
        assert_eq!(Grid::side(2), 2);
        assert_eq!(Grid::side(8), 2);
        assert_eq!(Grid::side(9), 3);
        assert_eq!(Grid::side(27), 3);
        assert_eq!(Grid::side(64), 4);
        assert_eq!(Grid::side(1000), 10);
        assert_eq!(Grid::side(1001), 11);
    }

    #[test]
    fn eight_nodes_fill_a_two_cube() {
        let grid = Grid::default();
        let points: Vec<Vector3> = (0..8).map(|i| grid.point(i, 8)).collect();

        for (i, a) in points.iter().enumerate() {
            for c in a.to_array() {
                assert!(c == -3.0 || c == 0.0, "coordinate {c} off the lattice");
            }
            for b in &points[i + 1..] {
                assert_ne!(a, b, "duplicate grid cell");
                let d = a.distance(*b);
                assert!(d >= 3.0 - 1e-12, "cells {d} apart");
            }
        }
    }

    #[test]
    fn single_node_sits_half_a_cell_off_origin() {
        assert_eq!(Grid::default().point(0, 1), Vector3::new(-1.5, -1.5, -1.5));
    }

    #[test]
    fn x_varies_fastest() {
        let grid = Grid::default();
        let total = 27;
        assert_eq!(grid.point(1, total) - grid.point(0, total), Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(grid.point(3, total) - grid.point(0, total), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(grid.point(9, total) - grid.point(0, total), Vector3::new(0.0, 0.0, 3.0));
    }
}
