//! In-memory ordered sibling snapshots
//!
//! The cache holds data, not policy: lookups, ordered inserts, and
//! capture/restore of whole scopes. The coordinator decides what to change.

use crate::error::Result;
use std::collections::HashMap;
use trellis_position::{ItemId, Position, PositionedItem, ScopeId, ScopeKind, SiblingSnapshot};

/// Items of one kind grouped by sibling scope, each scope kept sorted
#[derive(Debug, Clone, Default)]
pub struct ScopeTable {
    scopes: HashMap<ScopeId, Vec<PositionedItem>>,
    owner: HashMap<ItemId, ScopeId>,
}

impl ScopeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope; existing scopes are left alone
    pub fn ensure_scope(&mut self, scope: ScopeId) {
        self.scopes.entry(scope).or_default();
    }

    /// True once the scope has been registered, even if it holds no items
    pub fn has_scope(&self, scope: &ScopeId) -> bool {
        self.scopes.contains_key(scope)
    }

    /// Ordered copy of a scope's items; empty for unknown scopes
    pub fn snapshot(&self, scope: &ScopeId) -> Vec<PositionedItem> {
        self.scopes.get(scope).cloned().unwrap_or_default()
    }

    /// Scope currently holding an item
    pub fn scope_of(&self, item: &ItemId) -> Option<&ScopeId> {
        self.owner.get(item)
    }

    /// Cached position of an item, wherever it lives
    pub fn position_of(&self, item: &ItemId) -> Option<Position> {
        let scope = self.owner.get(item)?;
        self.scopes
            .get(scope)?
            .iter()
            .find(|i| &i.id == item)
            .map(|i| i.position)
    }

    /// True if the item is in any scope of this table
    pub fn contains(&self, item: &ItemId) -> bool {
        self.owner.contains_key(item)
    }

    /// Load stored items into a scope.
    ///
    /// The scope's resulting contents must form a valid [`SiblingSnapshot`]:
    /// no two items may share a position. Nothing is loaded on failure.
    /// Reloading an item already in the scope replaces its position.
    pub fn load(&mut self, scope: ScopeId, items: Vec<PositionedItem>) -> Result<()> {
        let mut merged = self.snapshot(&scope);
        merged.retain(|existing| !items.iter().any(|item| item.id == existing.id));
        merged.extend(items.iter().cloned());
        SiblingSnapshot::from_unsorted(merged)?;

        for item in items {
            self.place(scope.clone(), item);
        }
        Ok(())
    }

    /// Put an item into a scope at its sorted place, removing it from wherever
    /// it was before
    pub fn place(&mut self, scope: ScopeId, item: PositionedItem) {
        self.remove(&item.id);
        let items = self.scopes.entry(scope.clone()).or_default();
        let at = items.partition_point(|existing| {
            (existing.position, &existing.id) < (item.position, &item.id)
        });
        self.owner.insert(item.id.clone(), scope);
        items.insert(at, item);
    }

    /// Remove an item, returning the scope it was in
    pub fn remove(&mut self, item: &ItemId) -> Option<(ScopeId, PositionedItem)> {
        let scope = self.owner.remove(item)?;
        let items = self.scopes.get_mut(&scope)?;
        let index = items.iter().position(|i| &i.id == item)?;
        Some((scope, items.remove(index)))
    }

    /// Copy the listed scopes so they can be put back later
    pub fn capture(&self, scopes: &[&ScopeId]) -> ScopeCapture {
        let mut captured: Vec<(ScopeId, Vec<PositionedItem>)> = Vec::with_capacity(scopes.len());
        for scope in scopes {
            if captured.iter().any(|(id, _)| id == *scope) {
                continue;
            }
            captured.push(((*scope).clone(), self.snapshot(scope)));
        }
        ScopeCapture { scopes: captured }
    }

    /// Put captured scopes back exactly as they were
    pub fn restore(&mut self, capture: ScopeCapture) {
        for (scope, items) in &capture.scopes {
            if let Some(current) = self.scopes.get(scope) {
                for item in current {
                    self.owner.remove(&item.id);
                }
            }
            for item in items {
                // An item captured here may have been placed elsewhere since.
                if let Some(other) = self.owner.remove(&item.id) {
                    if let Some(list) = self.scopes.get_mut(&other) {
                        list.retain(|i| i.id != item.id);
                    }
                }
                self.owner.insert(item.id.clone(), scope.clone());
            }
        }
        for (scope, items) in capture.scopes {
            self.scopes.insert(scope, items);
        }
    }

    /// Number of items across all scopes
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }
}

/// Saved contents of some scopes, used to roll back an optimistic change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeCapture {
    scopes: Vec<(ScopeId, Vec<PositionedItem>)>,
}

/// Lists per board and cards per list
#[derive(Debug, Clone, Default)]
pub struct BoardCache {
    lists: ScopeTable,
    cards: ScopeTable,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a board; it becomes a scope for lists
    pub fn add_board(&mut self, board: ScopeId) {
        self.lists.ensure_scope(board);
    }

    /// Table holding items of `kind`
    pub fn table(&self, kind: ScopeKind) -> &ScopeTable {
        match kind {
            ScopeKind::List => &self.lists,
            ScopeKind::Card => &self.cards,
        }
    }

    /// Mutable table holding items of `kind`
    pub fn table_mut(&mut self, kind: ScopeKind) -> &mut ScopeTable {
        match kind {
            ScopeKind::List => &mut self.lists,
            ScopeKind::Card => &mut self.cards,
        }
    }

    /// Load a list into a board; the list becomes a scope for cards
    pub fn load_list(&mut self, board: ScopeId, list: PositionedItem) -> Result<()> {
        let cards = ScopeId::from_string(list.id.as_str());
        self.lists.load(board, vec![list])?;
        self.cards.ensure_scope(cards);
        Ok(())
    }

    /// Load a card into a list
    pub fn load_card(&mut self, list: ScopeId, card: PositionedItem) -> Result<()> {
        self.load_cards(list, vec![card])
    }

    /// Load all cards of a list at once
    pub fn load_cards(&mut self, list: ScopeId, cards: Vec<PositionedItem>) -> Result<()> {
        self.cards.load(list, cards)
    }

    /// Ordered cards of a list
    pub fn cards_in(&self, list: &ScopeId) -> Vec<PositionedItem> {
        self.cards.snapshot(list)
    }

    /// Ordered lists of a board
    pub fn lists_in(&self, board: &ScopeId) -> Vec<PositionedItem> {
        self.lists.snapshot(board)
    }
}
