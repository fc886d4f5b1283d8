//! Selection, hover, auto-rotate and fit state driven by UI events
//!
//! `InteractionState` is plain single-threaded state. It holds on to the
//! last snapshot it observed so it can ignore events for nodes that no
//! longer exist (a node may be deleted between an event being dispatched and
//! handled). Every actual change is queued as an [`InteractionEvent`] for the
//! host to drain.

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::config::FramingConfig;
use crate::engine::LayoutSnapshot;
use crate::framing::CameraFraming;
use crate::graph::NodeId;

/// A discrete change in interaction state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum InteractionEvent {
    SelectionChanged(Option<NodeId>),
    HoverChanged(Option<NodeId>),
    AutoRotateChanged(bool),
    FitRequested,
}

#[derive(Debug, Default)]
pub struct InteractionState {
    selected: Option<NodeId>,
    hovered: Option<NodeId>,
    auto_rotate: bool,
    fit_requested: bool,
    snapshot: Option<Arc<LayoutSnapshot>>,
    framing: FramingConfig,
    events: Vec<InteractionEvent>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framing(mut self, framing: FramingConfig) -> Self {
        self.framing = framing;
        self
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// The snapshot events are currently checked against
    pub fn snapshot(&self) -> Option<&Arc<LayoutSnapshot>> {
        self.snapshot.as_ref()
    }

    /// Adopt a newly published snapshot.
    ///
    /// Selection and hover pointing at nodes that are gone are cleared, and
    /// a fit is requested so the renderer re-frames the new layout.
    pub fn observe(&mut self, snapshot: Arc<LayoutSnapshot>) {
        if self.selected.as_ref().is_some_and(|id| !snapshot.contains(id)) {
            self.set_selected(None);
        }
        if self.hovered.as_ref().is_some_and(|id| !snapshot.contains(id)) {
            self.set_hovered(None);
        }
        self.snapshot = Some(snapshot);
        self.request_fit();
    }

    fn knows(&self, id: &NodeId) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.contains(id))
    }

    /// Select `id`; ignored if the node is not in the observed snapshot
    pub fn select(&mut self, id: &NodeId) {
        if !self.knows(id) {
            trace!(%id, "ignoring select of unknown node");
            return;
        }
        self.set_selected(Some(id.clone()));
    }

    /// Hover `id`; ignored if the node is not in the observed snapshot
    pub fn hover(&mut self, id: &NodeId) {
        if !self.knows(id) {
            trace!(%id, "ignoring hover of unknown node");
            return;
        }
        self.set_hovered(Some(id.clone()));
    }

    pub fn clear_selection(&mut self) {
        self.set_selected(None);
    }

    pub fn clear_hover(&mut self) {
        self.set_hovered(None);
    }

    /// Flip auto-rotation and return the new value
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.emit(InteractionEvent::AutoRotateChanged(self.auto_rotate));
        self.auto_rotate
    }

    /// Ask the renderer to re-frame the camera
    pub fn request_fit(&mut self) {
        self.fit_requested = true;
        self.emit(InteractionEvent::FitRequested);
    }

    /// One-shot: true once per fit request, then false until the next one
    pub fn fit_requested(&mut self) -> bool {
        std::mem::take(&mut self.fit_requested)
    }

    /// Camera framing for the observed snapshot, `None` when it is empty
    pub fn framing(&self, padding: f64) -> Option<CameraFraming> {
        let snapshot = self.snapshot.as_ref()?;
        CameraFraming::for_snapshot(snapshot, padding, &self.framing)
    }

    /// Take all events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_selected(&mut self, id: Option<NodeId>) {
        if self.selected != id {
            self.selected = id.clone();
            self.emit(InteractionEvent::SelectionChanged(id));
        }
    }

    fn set_hovered(&mut self, id: Option<NodeId>) {
        if self.hovered != id {
            self.hovered = id.clone();
            self.emit(InteractionEvent::HoverChanged(id));
        }
    }

    fn emit(&mut self, event: InteractionEvent) {
        trace!(?event, "interaction event");
        self.events.push(event);
    }
}
