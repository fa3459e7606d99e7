//! Persistence and realtime collaborators
//!
//! The coordinator never talks to storage or sockets directly. It hands
//! updates to these traits and reacts to their results.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trellis_position::{ItemId, Position, ScopeId, ScopeKind};

/// A single position write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    pub kind: ScopeKind,
    pub item_id: ItemId,
    pub scope_id: ScopeId,
    pub position: Position,
}

/// Move notification sent to other clients
///
/// `from_scope_id` and `to_scope_id` are only present when the item changed
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    pub kind: ScopeKind,
    pub scope_id: ScopeId,
    pub item_id: ItemId,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_scope_id: Option<ScopeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_scope_id: Option<ScopeId>,
}

impl MoveEvent {
    /// Event for an item that stayed in `scope_id`
    pub fn within(kind: ScopeKind, scope_id: ScopeId, item_id: ItemId, position: Position) -> Self {
        Self {
            kind,
            scope_id,
            item_id,
            position,
            from_scope_id: None,
            to_scope_id: None,
        }
    }

    /// Event for an item that moved from `from` to `to`
    pub fn across(
        kind: ScopeKind,
        from: ScopeId,
        to: ScopeId,
        item_id: ItemId,
        position: Position,
    ) -> Self {
        Self {
            kind,
            scope_id: to.clone(),
            item_id,
            position,
            from_scope_id: Some(from),
            to_scope_id: Some(to),
        }
    }

    pub fn is_cross_scope(&self) -> bool {
        self.from_scope_id.is_some()
    }
}

/// Durable storage for positions
#[async_trait]
pub trait PositionStore: Send + Sync {
    async fn persist(&self, update: &PositionUpdate) -> Result<()>;
}

/// Realtime fan-out of moves
#[async_trait]
pub trait MoveBroadcaster: Send + Sync {
    async fn broadcast(&self, event: &MoveEvent) -> Result<()>;
}

#[async_trait]
impl<T: PositionStore + ?Sized> PositionStore for Arc<T> {
    async fn persist(&self, update: &PositionUpdate) -> Result<()> {
        (**self).persist(update).await
    }
}

#[async_trait]
impl<T: MoveBroadcaster + ?Sized> MoveBroadcaster for Arc<T> {
    async fn broadcast(&self, event: &MoveEvent) -> Result<()> {
        (**self).broadcast(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_event_wire_format_within_scope() {
        let event = MoveEvent::within(
            ScopeKind::Card,
            "todo".into(),
            "card-1".into(),
            Position::from(1500),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["scopeId"], "todo");
        assert_eq!(json["itemId"], "card-1");
        assert!(json.get("fromScopeId").is_none());
        assert!(json.get("toScopeId").is_none());
        assert!(!event.is_cross_scope());
    }

    #[test]
    fn test_move_event_wire_format_across_scopes() {
        let event = MoveEvent::across(
            ScopeKind::Card,
            "todo".into(),
            "done".into(),
            "card-1".into(),
            Position::from(6000),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["scopeId"], "done");
        assert_eq!(json["fromScopeId"], "todo");
        assert_eq!(json["toScopeId"], "done");

        let back: MoveEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_position_update_uses_camel_case() {
        let update = PositionUpdate {
            kind: ScopeKind::List,
            item_id: "list-1".into(),
            scope_id: "board-1".into(),
            position: Position::from(2000),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["itemId"], "list-1");
        assert_eq!(json["scopeId"], "board-1");
    }
}
