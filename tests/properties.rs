use proptest::prelude::*;

use kglayout::{Edge, LayoutConfig, LayoutEngine, Node, NodeId, StrategyKind};

/// Up to `max_nodes` nodes named n0..nK plus edges between existing nodes
fn graph_strategy(max_nodes: usize) -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (0..=max_nodes).prop_flat_map(|n| {
        let nodes: Vec<Node> = (0..n).map(|i| Node::new(format!("n{i}"))).collect();
        let edges = if n == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec((0..n, 0..n, 0.0f64..=1.0), 0..(2 * n))
                .prop_map(|raw| {
                    raw.into_iter()
                        .map(|(s, t, strength)| {
                            Edge::new(format!("n{s}"), format!("n{t}"), strength)
                        })
                        .collect()
                })
                .boxed()
        };
        (Just(nodes), edges)
    })
}

fn kind_strategy() -> impl Strategy<Value = StrategyKind> {
    prop::sample::select(StrategyKind::ALL.to_vec())
}

fn engine(kind: StrategyKind, seed: u64) -> LayoutEngine {
    LayoutEngine::new(
        LayoutConfig::default()
            .with_strategy(kind)
            .with_seed(seed)
            .with_iterations(30),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every node gets exactly one finite position, in input order
    #[test]
    fn prop_snapshot_is_complete(
        (nodes, edges) in graph_strategy(12),
        kind in kind_strategy(),
        seed in any::<u64>()
    ) {
        let snapshot = engine(kind, seed).recompute(&nodes, &edges).unwrap();

        prop_assert_eq!(snapshot.len(), nodes.len());
        for (node, (id, pos)) in nodes.iter().zip(snapshot.positions.iter()) {
            prop_assert_eq!(&node.id, id);
            prop_assert!(pos.is_finite(), "{} has non-finite position {:?}", id, pos);
        }
    }

    /// Sphere, helix and grid ignore both the seed and the edges
    #[test]
    fn prop_geometric_strategies_are_deterministic(
        (nodes, edges) in graph_strategy(16),
        kind in prop::sample::select(vec![
            StrategyKind::Sphere,
            StrategyKind::Helix,
            StrategyKind::Grid,
        ]),
        seed_a in any::<u64>(),
        seed_b in any::<u64>()
    ) {
        let a = engine(kind, seed_a).recompute(&nodes, &edges).unwrap();
        let b = engine(kind, seed_b).recompute(&nodes, &[]).unwrap();
        prop_assert_eq!(&a.positions, &b.positions);
    }

    #[test]
    fn prop_force_layout_is_reproducible(
        (nodes, edges) in graph_strategy(10),
        seed in any::<u64>()
    ) {
        let a = engine(StrategyKind::Force, seed).recompute(&nodes, &edges).unwrap();
        let b = engine(StrategyKind::Force, seed).recompute(&nodes, &edges).unwrap();
        prop_assert_eq!(&a.positions, &b.positions);
    }

    #[test]
    fn prop_sphere_points_lie_on_radius(n in 1usize..64) {
        let nodes: Vec<Node> = (0..n).map(|i| Node::new(format!("n{i}"))).collect();
        let snapshot = engine(StrategyKind::Sphere, 0).recompute(&nodes, &[]).unwrap();

        for pos in snapshot.positions.values() {
            prop_assert!((pos.length() - 10.0).abs() <= 1e-6);
        }
    }

    #[test]
    fn prop_grid_cells_are_distinct_and_spaced(n in 1usize..80) {
        let nodes: Vec<Node> = (0..n).map(|i| Node::new(format!("n{i}"))).collect();
        let snapshot = engine(StrategyKind::Grid, 0).recompute(&nodes, &[]).unwrap();
        let points: Vec<_> = snapshot.positions.values().copied().collect();

        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                prop_assert!(a.distance(*b) >= 3.0 - 1e-9);
            }
        }
    }

    /// A rejected graph never replaces the published snapshot
    #[test]
    fn prop_unknown_endpoint_is_rejected(
        (nodes, edges) in graph_strategy(8),
        kind in kind_strategy()
    ) {
        let mut engine = engine(kind, 1);
        let first = engine.recompute(&nodes, &edges).unwrap();

        let mut broken = edges.clone();
        broken.push(Edge::new("n0", "ghost", 0.5));
        prop_assert!(engine.recompute(&nodes, &broken).is_err());
        prop_assert_eq!(engine.current_snapshot(), Some(first));
    }

    /// Interaction only ever points at nodes of the observed snapshot
    #[test]
    fn prop_selection_stays_within_snapshot(
        (nodes, edges) in graph_strategy(8),
        picks in prop::collection::vec(0usize..12, 1..10)
    ) {
        let mut engine = engine(StrategyKind::Grid, 0);
        let snapshot = engine.recompute(&nodes, &edges).unwrap();
        let mut state = engine.interaction_state();

        for pick in picks {
            state.select(&NodeId::new(format!("n{pick}")));
            if let Some(selected) = state.selected() {
                prop_assert!(snapshot.contains(selected));
            }
        }
    }
}
