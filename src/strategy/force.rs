//! Force-directed layout
//!
//! Nodes repel each other like charged particles (inverse-square) and edges
//! pull their endpoints together like springs (linear in distance, scaled by
//! the relation strength). Velocities are damped after every integration
//! step so the system settles.
//!
//! The simulation runs a fixed number of passes. Each pass costs
//! `O(n² + e)`: repulsion is computed over every unordered pair with no
//! spatial partitioning, which bounds the practical graph size.

use std::collections::HashMap;

use rand::Rng;

use super::{LayoutContext, LayoutStrategy, Positions, StrategyKind};
use crate::config::ForceConfig;
use crate::graph::{Edge, Node, NodeId};
use crate::vector::Vector3;

/// A node's working state during a simulation run
#[derive(Debug, Clone, Copy)]
struct Body {
    position: Vector3,
    velocity: Vector3,
}

/// An edge resolved to indices into the body array
#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    strength: f64,
}

/// n-body force-directed layout
#[derive(Debug, Clone, Default)]
pub struct ForceDirected {
    pub config: ForceConfig,
}

impl ForceDirected {
    pub fn new(config: ForceConfig) -> Self {
        Self { config }
    }

    fn initial_position(&self, id: &NodeId, ctx: &mut LayoutContext<'_>) -> Vector3 {
        if self.config.warm_start {
            if let Some(pos) = ctx.previous.and_then(|prev| prev.get(id)) {
                return *pos;
            }
        }
        let extent = self.config.initial_extent.abs();
        Vector3::new(
            ctx.rng.gen_range(-extent..=extent),
            ctx.rng.gen_range(-extent..=extent),
            ctx.rng.gen_range(-extent..=extent),
        )
    }

    /// Run one simulation pass: forces, then integration and damping
    fn tick(&self, bodies: &mut [Body], springs: &[Spring]) {
        self.apply_repulsion(bodies);
        self.apply_attraction(bodies, springs);

        for body in bodies.iter_mut() {
            let next = body.position + body.velocity;
            if next.is_finite() {
                body.position = next;
                body.velocity *= self.config.damping;
            } else {
                body.velocity = Vector3::ZERO;
            }
        }
    }

    /// Push every pair of distinct bodies apart (Coulomb's law)
    fn apply_repulsion(&self, bodies: &mut [Body]) {
        let n = bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = bodies[i].position - bodies[j].position;
                let dist = delta.length();

                // Coincident bodies have no defined direction
                if dist <= 0.0 || !dist.is_finite() {
                    continue;
                }

                // Near-coincident pairs overflow 1/d²; skip rather than go NaN
                let force = self.config.repulsion_strength / (dist * dist);
                let push = delta.normalize() * force;
                if !push.is_finite() {
                    continue;
                }

                bodies[i].velocity += push;
                bodies[j].velocity -= push;
            }
        }
    }

    /// Pull the endpoints of every edge together (Hooke's law, zero rest length)
    fn apply_attraction(&self, bodies: &mut [Body], springs: &[Spring]) {
        for spring in springs {
            let delta = bodies[spring.target].position - bodies[spring.source].position;
            let dist = delta.length();

            let force = dist * self.config.attraction_strength * spring.strength;
            let pull = delta.normalize() * force;
            if !pull.is_finite() {
                continue;
            }

            bodies[spring.source].velocity += pull;
            bodies[spring.target].velocity -= pull;
        }
    }
}

impl LayoutStrategy for ForceDirected {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Force
    }

    fn compute_layout(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        ctx: &mut LayoutContext<'_>,
    ) -> Positions {
        let mut bodies: Vec<Body> = nodes
            .iter()
            .map(|node| Body {
                position: self.initial_position(&node.id, ctx),
                velocity: Vector3::ZERO,
            })
            .collect();

        let index: HashMap<&NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (&node.id, i))
            .collect();

        // Self-loops contribute nothing, and unknown endpoints were rejected
        // by validation before we got here.
        let springs: Vec<Spring> = edges
            .iter()
            .filter(|e| !e.is_self_loop())
            .filter_map(|e| {
                Some(Spring {
                    source: *index.get(&e.source_id)?,
                    target: *index.get(&e.target_id)?,
                    strength: e.strength,
                })
            })
            .collect();

        for _ in 0..self.config.iterations {
            self.tick(&mut bodies, &springs);
        }

        nodes
            .iter()
            .zip(bodies)
            .map(|(node, body)| (node.id.clone(), body.position))
            .collect()
    }
}
