//! Drag interaction state machine

use crate::geometry::{edge_at, Axis, Point, Rect};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use trellis_config::ReorderConfig;
use trellis_position::{Edge, ItemId, MoveRequest, PositionedItem, ScopeId};

/// Where a dragged item would land if released now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIntent {
    pub source: ItemId,
    /// Scope the source was picked up from
    pub from_scope: ScopeId,
    /// Scope the source would land in
    pub to_scope: ScopeId,
    /// Anchor item; `None` drops at a boundary of `to_scope`
    pub target: Option<ItemId>,
    pub edge: Edge,
}

impl DropIntent {
    /// True when the item changes scope
    pub fn is_cross_scope(&self) -> bool {
        self.from_scope != self.to_scope
    }

    /// Turn the intent into a move request over the destination's siblings
    pub fn to_request(&self, siblings: impl IntoIterator<Item = PositionedItem>) -> MoveRequest {
        MoveRequest::new(self.source.clone(), self.target.clone(), self.edge, siblings)
    }
}

/// An item under the pointer that could anchor a drop
#[derive(Debug, Clone, PartialEq)]
pub struct HoverCandidate {
    pub id: ItemId,
    pub scope: ScopeId,
    pub rect: Rect,
    pub axis: Axis,
}

/// Drag lifecycle state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No pointer interaction in progress
    #[default]
    Idle,
    /// Pointer is down on an item but has not moved far enough to drag
    Pressed {
        source: ItemId,
        scope: ScopeId,
        origin: Point,
    },
    /// Item is picked up; no drop target yet
    Dragging { source: ItemId, scope: ScopeId },
    /// Item is over a drop candidate
    Previewing { intent: DropIntent },
    /// Item was released with a resolvable intent, awaiting completion
    Dropped { intent: DropIntent },
}

impl DragState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressed { .. } => "pressed",
            Self::Dragging { .. } => "dragging",
            Self::Previewing { .. } => "previewing",
            Self::Dropped { .. } => "dropped",
        }
    }
}

/// Drives one draggable collection through its drag lifecycle.
///
/// Events that make no sense in the current state are ignored and reported
/// through the `false`/`None` return value.
#[derive(Debug, Clone)]
pub struct DragMachine {
    state: DragState,
    last_intent: Option<DropIntent>,
    ended_at: Option<Instant>,
    split_fraction: f64,
    threshold_px: f64,
    click_suppress: Duration,
}

impl DragMachine {
    /// Create a machine using the configured split fraction, pick-up threshold
    /// and click suppression window
    pub fn new(config: &ReorderConfig) -> Self {
        Self::with_settings(
            config.edge_split_fraction,
            config.drag_threshold_px,
            config.click_suppress(),
        )
    }

    /// Create a machine from explicit settings
    pub fn with_settings(split_fraction: f64, threshold_px: f64, click_suppress: Duration) -> Self {
        Self {
            state: DragState::Idle,
            last_intent: None,
            ended_at: None,
            split_fraction,
            threshold_px,
            click_suppress,
        }
    }

    /// Current interaction state
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// True while an item is picked up
    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            DragState::Dragging { .. } | DragState::Previewing { .. }
        )
    }

    /// Id of the item being dragged, if any
    pub fn dragged_item(&self) -> Option<&ItemId> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Previewing { intent } | DragState::Dropped { intent } => Some(&intent.source),
            _ => None,
        }
    }

    /// The current advisory drop intent
    pub fn preview(&self) -> Option<&DropIntent> {
        match &self.state {
            DragState::Previewing { intent } => Some(intent),
            _ => None,
        }
    }

    /// Pointer pressed on an item
    pub fn press(&mut self, source: ItemId, scope: ScopeId, at: Point) -> bool {
        if !matches!(self.state, DragState::Idle) {
            return self.ignore("press");
        }
        self.transition(DragState::Pressed {
            source,
            scope,
            origin: at,
        });
        true
    }

    /// Pointer moved; starts the drag once it travels past the threshold
    pub fn pointer_move(&mut self, at: Point) -> bool {
        let DragState::Pressed {
            source,
            scope,
            origin,
        } = &self.state
        else {
            return false;
        };
        let dx = (at.x - origin.x).abs();
        let dy = (at.y - origin.y).abs();
        if dx <= self.threshold_px && dy <= self.threshold_px {
            return false;
        }
        let next = DragState::Dragging {
            source: source.clone(),
            scope: scope.clone(),
        };
        self.last_intent = None;
        self.transition(next);
        true
    }

    /// Start dragging directly, as a native drag-start event does
    pub fn start(&mut self, source: ItemId, scope: ScopeId) -> bool {
        if !matches!(self.state, DragState::Idle | DragState::Pressed { .. }) {
            return self.ignore("start");
        }
        self.last_intent = None;
        self.transition(DragState::Dragging { source, scope });
        true
    }

    /// Pointer over a candidate item; recomputes the preview
    pub fn hover(&mut self, candidate: &HoverCandidate, at: Point) -> bool {
        let Some((source, from_scope)) = self.active_source() else {
            return self.ignore("hover");
        };
        if candidate.id == source {
            trace!(item = %source, "hovering the dragged item itself");
            return false;
        }
        let edge = edge_at(candidate.rect, at, candidate.axis, self.split_fraction);
        self.set_preview(DropIntent {
            source,
            from_scope,
            to_scope: candidate.scope.clone(),
            target: Some(candidate.id.clone()),
            edge,
        });
        true
    }

    /// Pointer over a scope with no item under it (empty list, or past the
    /// last item): the drop appends to that scope
    pub fn hover_scope(&mut self, scope: ScopeId) -> bool {
        let Some((source, from_scope)) = self.active_source() else {
            return self.ignore("hover_scope");
        };
        self.set_preview(DropIntent {
            source,
            from_scope,
            to_scope: scope,
            target: None,
            edge: Edge::After,
        });
        true
    }

    /// Pointer left the current candidate; the last intent is kept as fallback
    pub fn leave(&mut self) -> bool {
        let DragState::Previewing { intent } = &self.state else {
            return false;
        };
        let next = DragState::Dragging {
            source: intent.source.clone(),
            scope: intent.from_scope.clone(),
        };
        self.transition(next);
        true
    }

    /// Pointer released.
    ///
    /// Returns the intent to execute: the current preview, or the last known
    /// one if no candidate is under the pointer. With neither, or if the
    /// press never became a drag, the machine returns to idle.
    pub fn release(&mut self, now: Instant) -> Option<DropIntent> {
        let state = std::mem::take(&mut self.state);
        let intent = match state {
            DragState::Previewing { intent } => Some(intent),
            DragState::Dragging { source, .. } => {
                self.ended_at = Some(now);
                let fallback = self.last_intent.take();
                match &fallback {
                    Some(intent) => debug!(item = %source, to = %intent.to_scope, "drop falling back to last preview"),
                    None => debug!(item = %source, "drop without target, cancelled"),
                }
                fallback
            }
            DragState::Pressed { .. } => {
                trace!("released without dragging");
                None
            }
            other => {
                self.state = other;
                self.ignore("release");
                return None;
            }
        };

        self.last_intent = None;
        match intent {
            Some(intent) => {
                self.ended_at = Some(now);
                debug!(
                    item = %intent.source,
                    from = %intent.from_scope,
                    to = %intent.to_scope,
                    target = ?intent.target.as_ref().map(ItemId::as_str),
                    edge = %intent.edge,
                    "item dropped"
                );
                self.transition(DragState::Dropped {
                    intent: intent.clone(),
                });
                Some(intent)
            }
            None => {
                if self.state != DragState::Idle {
                    self.transition(DragState::Idle);
                }
                None
            }
        }
    }

    /// The dropped intent was handled; back to idle
    pub fn complete(&mut self) -> bool {
        if !matches!(self.state, DragState::Dropped { .. }) {
            return self.ignore("complete");
        }
        self.transition(DragState::Idle);
        true
    }

    /// Abandon whatever is in progress
    pub fn cancel(&mut self, now: Instant) -> bool {
        if matches!(self.state, DragState::Idle) {
            return false;
        }
        if self.is_dragging() {
            self.ended_at = Some(now);
        }
        self.last_intent = None;
        self.transition(DragState::Idle);
        true
    }

    /// True shortly after a drag ended, so the trailing click is swallowed
    pub fn suppresses_click(&self, now: Instant) -> bool {
        self.ended_at
            .is_some_and(|ended| now.saturating_duration_since(ended) < self.click_suppress)
    }

    fn active_source(&self) -> Option<(ItemId, ScopeId)> {
        match &self.state {
            DragState::Dragging { source, scope } => Some((source.clone(), scope.clone())),
            DragState::Previewing { intent } => {
                Some((intent.source.clone(), intent.from_scope.clone()))
            }
            _ => None,
        }
    }

    fn set_preview(&mut self, intent: DropIntent) {
        self.last_intent = Some(intent.clone());
        if let DragState::Previewing { intent: current } = &mut self.state {
            *current = intent;
        } else {
            self.transition(DragState::Previewing { intent });
        }
    }

    fn transition(&mut self, next: DragState) {
        trace!(from = self.state.name(), to = next.name(), "drag transition");
        self.state = next;
    }

    fn ignore(&self, event: &str) -> bool {
        trace!(state = self.state.name(), event, "drag event ignored");
        false
    }
}
