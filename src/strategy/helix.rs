//! Helical layout

use std::f64::consts::TAU;

use super::{LayoutContext, LayoutStrategy, Positions, StrategyKind, place_by_index};
use crate::config::HelixConfig;
use crate::graph::{Edge, Node};
use crate::vector::Vector3;

/// Winds nodes around the y axis, bottom to top
#[derive(Debug, Clone, Default)]
pub struct Helix {
    pub config: HelixConfig,
}

impl Helix {
    pub fn new(config: HelixConfig) -> Self {
        Self { config }
    }

    pub fn point(&self, index: usize, total: usize) -> Vector3 {
        let HelixConfig {
            radius,
            height,
            turns,
        } = self.config;
        let t = index as f64 / total as f64;
        let angle = t * turns * TAU;

        Vector3::new(radius * angle.cos(), height * (t - 0.5), radius * angle.sin())
    }
}

impl LayoutStrategy for Helix {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Helix
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
    fn starts_at_bottom_on_x_axis() {
        let p = Helix::default().point(0, 8);
        assert_eq!(p, Vector3::new(8.0, -10.0, 0.0));
    }

    #[test]
    fn points_keep_constant_radius_around_y() {
        let helix = Helix::default();
        for i in 0..16 {
            let p = helix.point(i, 16);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn height_rises_monotonically_within_span() {
        let helix = Helix::default();
        let ys: Vec<f64> = (0..10).map(|i| helix.point(i, 10).y).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
        assert!(ys.iter().all(|y| (-10.0..10.0).contains(y)));
    }

    #[test]
    fn two_turns_over_the_span() {
        // Quarter of the way through two turns is half a revolution
        let p = Helix::default().point(2, 8);
        assert!((p.x + 8.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }
}
