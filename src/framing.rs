//! Camera framing derived from a layout snapshot
//!
//! Renderers own the camera; this module only answers "where should it look
//! and from how far" so a fit request can be honoured for any snapshot.

use serde::Serialize;

use crate::config::FramingConfig;
use crate::engine::LayoutSnapshot;
use crate::vector::Vector3;

/// Axis-aligned 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    pub min: Vector3,
    pub max: Vector3,
}

impl Default for BoundingBox3D {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox3D {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Bounds of every position in a snapshot
    pub fn of_snapshot(snapshot: &LayoutSnapshot) -> Self {
        let mut bounds = Self::empty();
        for pos in snapshot.positions.values() {
            bounds.include_point(*pos);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include_point(&mut self, p: Vector3) {
        self.min = Vector3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vector3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }
}

/// Where a camera should aim, and from how far, to see a whole layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFraming {
    pub target: Vector3,
    pub distance: f64,
}

impl CameraFraming {
    /// Fit `bounds` (grown by `padding` on every side) into the field of view.
    ///
    /// Returns `None` for empty bounds.
    pub fn fit(bounds: &BoundingBox3D, padding: f64, config: &FramingConfig) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }

        let size = bounds.size();
        let max_dim = size.x.max(size.y).max(size.z) + padding * 2.0;
        let half_fov = config.fov / 2.0;
        let distance = (max_dim / 2.0) / half_fov.tan();

        Some(Self {
            target: bounds.center(),
            distance: distance.clamp(config.min_distance, config.max_distance),
        })
    }

    /// Framing for every position in `snapshot`
    pub fn for_snapshot(
        snapshot: &LayoutSnapshot,
        padding: f64,
        config: &FramingConfig,
    ) -> Option<Self> {
        Self::fit(&BoundingBox3D::of_snapshot(snapshot), padding, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use crate::strategy::{Positions, StrategyKind};

    fn snapshot(points: &[[f64; 3]]) -> LayoutSnapshot {
        let positions: Positions = points
            .iter()
            .enumerate()
            .map(|(i, p)| (NodeId::new(format!("n{i}")), Vector3::from(*p)))
            .collect();
        LayoutSnapshot {
            strategy: StrategyKind::Grid,
            generated_at: 1,
            seed: 0,
            positions,
        }
    }

    #[test]
    fn bounding_box_empty() {
        assert!(BoundingBox3D::empty().is_empty());
        assert!(BoundingBox3D::of_snapshot(&snapshot(&[])).is_empty());
    }

    #[test]
    fn bounding_box_include_point() {
        let mut bb = BoundingBox3D::empty();
        bb.include_point(Vector3::new(10.0, 20.0, 30.0));
        bb.include_point(Vector3::new(-5.0, 15.0, 25.0));

        assert!(!bb.is_empty());
        assert_eq!(bb.min, Vector3::new(-5.0, 15.0, 25.0));
        assert_eq!(bb.max, Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(bb.center(), Vector3::new(2.5, 17.5, 27.5));
    }

    #[test]
    fn fit_centers_on_snapshot() {
        let snap = snapshot(&[[0.0, 0.0, 0.0], [4.0, 2.0, -2.0]]);
        let framing = CameraFraming::fit(
            &BoundingBox3D::of_snapshot(&snap),
            0.0,
            &FramingConfig::default(),
        )
        .unwrap();

        assert_eq!(framing.target, Vector3::new(2.0, 1.0, -1.0));
    }

    #[test]
    fn fit_distance_grows_with_extent() {
        let config = FramingConfig {
            min_distance: 0.0,
            max_distance: 1000.0,
            ..FramingConfig::default()
        };
        let small = BoundingBox3D::of_snapshot(&snapshot(&[[-1.0; 3], [1.0; 3]]));
        let large = BoundingBox3D::of_snapshot(&snapshot(&[[-10.0; 3], [10.0; 3]]));

        let near = CameraFraming::fit(&small, 0.0, &config).unwrap();
        let far = CameraFraming::fit(&large, 0.0, &config).unwrap();
        assert!(far.distance > near.distance);
    }

    #[test]
    fn fit_distance_is_clamped() {
        let config = FramingConfig::default();
        let point = BoundingBox3D::of_snapshot(&snapshot(&[[0.0; 3]]));
        let huge = BoundingBox3D::of_snapshot(&snapshot(&[[-1e4; 3], [1e4; 3]]));

        assert_eq!(CameraFraming::fit(&point, 0.0, &config).unwrap().distance, 5.0);
        assert_eq!(CameraFraming::fit(&huge, 0.0, &config).unwrap().distance, 50.0);
    }

    #[test]
    fn fit_of_empty_is_none() {
        let config = FramingConfig::default();
        assert!(CameraFraming::fit(&BoundingBox3D::empty(), 1.0, &config).is_none());
    }
}
