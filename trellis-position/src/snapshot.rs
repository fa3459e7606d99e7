//! Ordered sibling snapshots and move requests

use crate::error::{PositionError, Result};
use crate::ids::ItemId;
use crate::position::{Edge, Position, PositionedItem, Spacing};
use crate::reconcile::compute_insertion_position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Point-in-time view of one sibling scope, sorted ascending by position.
///
/// Construction validates the ordering contract the reconciler relies on:
/// strictly increasing positions and unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SiblingSnapshot {
    items: Vec<PositionedItem>,
}

impl SiblingSnapshot {
    /// Wrap items that are already sorted; fails on unsorted or duplicate input
    pub fn from_sorted(items: Vec<PositionedItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for pair in items.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.position == prev.position {
                return Err(PositionError::DuplicatePosition {
                    position: next.position.to_string(),
                    first: prev.id.to_string(),
                    second: next.id.to_string(),
                });
            }
            if next.position < prev.position {
                return Err(PositionError::Unsorted {
                    id: next.id.to_string(),
                    position: next.position.to_string(),
                    previous: prev.position.to_string(),
                });
            }
        }
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(PositionError::DuplicateId {
                    id: item.id.to_string(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Sort by position (ties broken by id) and validate
    pub fn from_unsorted(mut items: Vec<PositionedItem>) -> Result<Self> {
        items.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Self::from_sorted(items)
    }

    /// Items in display order
    pub fn as_slice(&self) -> &[PositionedItem] {
        &self.items
    }

    /// Iterate in display order
    pub fn iter(&self) -> std::slice::Iter<'_, PositionedItem> {
        self.items.iter()
    }

    /// Number of siblings
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for an empty scope
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of an item in display order
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Current position of an item
    pub fn position_of(&self, id: &ItemId) -> Option<Position> {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map(|item| item.position)
    }

    /// True if the item is one of the siblings
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// The snapshot with one item removed
    pub fn without(&self, id: &ItemId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| &item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Take the sorted items
    pub fn into_vec(self) -> Vec<PositionedItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a SiblingSnapshot {
    type Item = &'a PositionedItem;
    type IntoIter = std::slice::Iter<'a, PositionedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A request to move one item next to another.
///
/// `siblings` is the destination scope's snapshot. The source is never part
/// of it: [`MoveRequest::new`] strips it if the caller passed it along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub source_id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<ItemId>,
    pub edge: Edge,
    pub siblings: Vec<PositionedItem>,
}

impl MoveRequest {
    /// Create a request, excluding the source from `siblings`
    pub fn new(
        source_id: impl Into<ItemId>,
        target_id: Option<ItemId>,
        edge: Edge,
        siblings: impl IntoIterator<Item = PositionedItem>,
    ) -> Self {
        let source_id = source_id.into();
        let siblings = siblings
            .into_iter()
            .filter(|item| item.id != source_id)
            .collect();
        Self {
            source_id,
            target_id,
            edge,
            siblings,
        }
    }

    /// Compute the source's new position
    pub fn resolve(&self, spacing: Spacing) -> Position {
        compute_insertion_position(&self.siblings, self.target_id.as_ref(), self.edge, spacing)
    }
}
