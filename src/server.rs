use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use notify::{Event, RecursiveMode, Watcher};
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use kglayout::config::FramingConfig;
use kglayout::engine::{LayoutEngine, LayoutSnapshot, SnapshotCell};
use kglayout::framing::CameraFraming;
use kglayout::graph::Node;
use kglayout::io::{JsonWriter, SnapshotDocument, Writer, read_graph};

/// Padding around the layout when framing the camera
const FRAMING_PADDING: f64 = 1.0;

/// Shared state behind the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<LayoutEngine>>,
    snapshots: SnapshotCell,
    nodes: Arc<RwLock<Vec<Node>>>,
    framing: FramingConfig,
}

impl AppState {
    pub fn new(engine: LayoutEngine) -> Self {
        let framing = engine.config().framing.clone();
        Self {
            snapshots: engine.snapshot_cell(),
            engine: Arc::new(Mutex::new(engine)),
            nodes: Arc::new(RwLock::new(Vec::new())),
            framing,
        }
    }

    /// Re-read `input` and recompute the layout on the calling thread
    fn reload(&self, input: &Path) -> anyhow::Result<Arc<LayoutSnapshot>> {
        let doc = read_graph(input)?;
        let snapshot = self.engine.lock().recompute(&doc.nodes, &doc.edges)?;
        *self.nodes.write() = doc.nodes;
        Ok(snapshot)
    }

    fn render(&self, snapshot: &LayoutSnapshot) -> Response {
        let nodes = self.nodes.read();
        let doc = SnapshotDocument::new(snapshot)
            .with_hints(&nodes)
            .with_framing(CameraFraming::for_snapshot(
                snapshot,
                FRAMING_PADDING,
                &self.framing,
            ));

        match JsonWriter.render(&doc) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}

async fn get_snapshot(State(state): State<AppState>) -> Response {
    match state.snapshots.load() {
        Some(snapshot) => state.render(&snapshot),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no layout computed yet").into_response(),
    }
}

async fn post_reset(State(state): State<AppState>) -> Response {
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || engine.lock().reset()).await;

    match result {
        Ok(Some(snapshot)) => state.render(&snapshot),
        Ok(None) => (StatusCode::SERVICE_UNAVAILABLE, "no layout computed yet").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/snapshot", get(get_snapshot))
        .route("/reset", post(post_reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve layouts of `input`, recomputing whenever the file changes
pub async fn serve(input: &Path, engine: LayoutEngine, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(engine);

    // Initial layout
    let snapshot = state.reload(input)?;
    info!(nodes = snapshot.len(), "initial layout computed");

    // Create channel for file change notifications
    let (tx, mut rx) = mpsc::channel::<()>(1);

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                let _ = tx.blocking_send(());
            }
        }
    })?;

    // Watch the input file's parent directory
    let watch_path = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;

    // Recompute off the async runtime; large graphs block for a while
    let regen_state = state.clone();
    let regen_input = input.to_path_buf();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            // Debounce: wait a bit for rapid changes to settle
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            // Drain any additional notifications
            while rx.try_recv().is_ok() {}

            let state = regen_state.clone();
            let input = regen_input.clone();
            match tokio::task::spawn_blocking(move || state.reload(&input)).await {
                Ok(Ok(snapshot)) => info!(
                    generation = snapshot.generated_at,
                    nodes = snapshot.len(),
                    "layout recomputed"
                ),
                Ok(Err(e)) => warn!(error = %e, "layout not recomputed"),
                Err(e) => warn!(error = %e, "layout task failed"),
            }
        }
    });

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "serving layout snapshots");
    println!("Layout server running at http://localhost:{port}/snapshot");
    println!("Watching {} for changes...", input.display());
    println!("Press Ctrl+C to stop");

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, router(state)).await?;

    Ok(())
}
