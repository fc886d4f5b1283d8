//! Fibonacci-sphere layout

use std::f64::consts::PI;

use super::{LayoutContext, LayoutStrategy, Positions, StrategyKind, place_by_index};
use crate::config::SphereConfig;
use crate::graph::{Edge, Node};
use crate::vector::Vector3;

/// Distributes nodes over the surface of a sphere centered on the origin
#[derive(Debug, Clone, Default)]
pub struct Sphere {
    pub config: SphereConfig,
}

impl Sphere {
    pub fn new(config: SphereConfig) -> Self {
        Self { config }
    }

    /// Position of node `index` out of `total` on the lattice
    pub fn point(&self, index: usize, total: usize) -> Vector3 {
        let i = index as f64;
        let n = total as f64;
        let radius = self.config.radius;

        let phi = (-1.0 + 2.0 * i / n).acos();
        let theta = (n * PI).sqrt() * phi;

        Vector3::new(
            radius * theta.cos() * phi.sin(),
            radius * theta.sin() * phi.sin(),
            radius * phi.cos(),
        )
    }
}

impl LayoutStrategy for Sphere {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sphere
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
    fn all_points_on_radius() {
        let sphere = Sphere::default();
        for total in [1, 2, 4, 10, 97] {
            for i in 0..total {
                let dist = sphere.point(i, total).length();
                assert!((dist - 10.0).abs() < 1e-9, "{i}/{total} at {dist}");
            }
        }
    }

    #[test]
    fn first_point_is_south_pole() {
        let p = Sphere::default().point(0, 5);
        assert!((p.z + 10.0).abs() < 1e-12);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
    }

    #[test]
    fn custom_radius_is_respected() {
        let sphere = Sphere::new(SphereConfig { radius: 2.5 });
        assert!((sphere.point(3, 7).length() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn points_are_distinct() {
        let sphere = Sphere::default();
        let points: Vec<Vector3> = (0..20).map(|i| sphere.point(i, 20)).collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) > 1e-6);
            }
        }
    }
}
