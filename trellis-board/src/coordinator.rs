//! Optimistic move coordination

use crate::cache::BoardCache;
use crate::collaborators::{MoveBroadcaster, MoveEvent, PositionStore, PositionUpdate};
use crate::error::{BoardError, Result};
use std::time::Instant;
use tracing::{debug, info, warn};
use trellis_config::ReorderConfig;
use trellis_dnd::{DropGuard, DropIntent};
use trellis_position::{
    append_position, plan_insertion, renumber, Assignment, ItemId, Position, PositionedItem,
    ScopeId, ScopeKind,
};

/// Why a drop was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another drop is still being persisted
    Busy,
    /// The source is no longer in the scope the drag started from
    StaleSource,
    /// The destination scope is not loaded
    UnknownScope,
}

/// Result of [`MoveCoordinator::apply_drop`]
#[derive(Debug)]
pub enum MoveOutcome {
    Moved {
        item_id: ItemId,
        scope_id: ScopeId,
        position: Position,
        /// The destination scope was renumbered before the move
        renumbered: bool,
    },
    Skipped(SkipReason),
    /// Persisting failed and the cache was put back as it was
    RolledBack { item_id: ItemId, error: BoardError },
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Turns drop intents into persisted, broadcast positions
///
/// The cache is updated before persistence is awaited so the UI never waits
/// on the network. Only one drop is processed at a time.
pub struct MoveCoordinator<S, B> {
    cache: BoardCache,
    store: S,
    broadcaster: B,
    config: ReorderConfig,
    guard: DropGuard,
}

impl<S: PositionStore, B: MoveBroadcaster> MoveCoordinator<S, B> {
    pub fn new(config: ReorderConfig, store: S, broadcaster: B) -> Self {
        let guard = DropGuard::new(config.drop_guard_timeout());
        Self {
            cache: BoardCache::new(),
            store,
            broadcaster,
            config,
            guard,
        }
    }

    /// Start from an already loaded cache
    pub fn with_cache(mut self, cache: BoardCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &BoardCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut BoardCache {
        &mut self.cache
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// True while a drop is in flight
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy(Instant::now())
    }

    /// Add a new item at the end of `scope`
    ///
    /// Creating a list also registers it as a scope for cards.
    pub async fn create_item(
        &mut self,
        kind: ScopeKind,
        scope: ScopeId,
        id: ItemId,
    ) -> Result<Position> {
        let table = self.cache.table(kind);
        if !table.has_scope(&scope) {
            return Err(BoardError::scope_not_found(kind, &scope));
        }
        if table.contains(&id) {
            return Err(BoardError::DuplicateItem {
                kind,
                id: id.to_string(),
            });
        }

        let spacing = self.config.spacing.for_kind(kind);
        let position = append_position(&table.snapshot(&scope), spacing);
        self.cache
            .table_mut(kind)
            .place(scope.clone(), PositionedItem::new(id.clone(), position));

        let update = PositionUpdate {
            kind,
            item_id: id.clone(),
            scope_id: scope.clone(),
            position,
        };
        if let Err(e) = self.store.persist(&update).await {
            warn!(%kind, item_id = %id, error = %e, "create not persisted, removing from cache");
            self.cache.table_mut(kind).remove(&id);
            return Err(e);
        }

        if kind == ScopeKind::List {
            self.cache
                .table_mut(ScopeKind::Card)
                .ensure_scope(ScopeId::from_string(id.as_str()));
        }
        info!(%kind, item_id = %id, scope_id = %scope, %position, "created item");
        Ok(position)
    }

    /// Reassign evenly spaced positions to every item of `scope`
    ///
    /// Returns the number of items whose position changed. If a write fails,
    /// the assignments already stored are written back with their previous
    /// positions and the scope is restored in the cache, so the store and the
    /// cache keep the same order.
    pub async fn renumber_scope(&mut self, kind: ScopeKind, scope: &ScopeId) -> Result<usize> {
        let table = self.cache.table(kind);
        if !table.has_scope(scope) {
            return Err(BoardError::scope_not_found(kind, scope));
        }

        let plan = renumber(&table.snapshot(scope), self.config.spacing.for_kind(kind));
        if plan.change_count() == 0 {
            return Ok(0);
        }
        let capture = table.capture(&[scope]);

        for assignment in plan.changed() {
            self.cache.table_mut(kind).place(
                scope.clone(),
                PositionedItem::new(assignment.id.clone(), assignment.position),
            );
        }

        let mut written: Vec<&Assignment> = Vec::with_capacity(plan.change_count());
        for assignment in plan.changed() {
            let update = PositionUpdate {
                kind,
                item_id: assignment.id.clone(),
                scope_id: scope.clone(),
                position: assignment.position,
            };
            if let Err(e) = self.store.persist(&update).await {
                warn!(
                    %kind,
                    scope_id = %scope,
                    written = written.len(),
                    error = %e,
                    "renumber not persisted, restoring scope"
                );
                self.revert_written(kind, scope, &written).await;
                self.cache.table_mut(kind).restore(capture);
                return Err(e);
            }
            written.push(assignment);
        }

        info!(%kind, scope_id = %scope, changed = plan.change_count(), "renumbered scope");
        Ok(plan.change_count())
    }

    /// Write previous positions back for assignments that were already stored.
    /// Failures are logged; the first error is what the caller sees.
    async fn revert_written(&self, kind: ScopeKind, scope: &ScopeId, written: &[&Assignment]) {
        for assignment in written.iter().rev() {
            let update = PositionUpdate {
                kind,
                item_id: assignment.id.clone(),
                scope_id: scope.clone(),
                position: assignment.previous,
            };
            if let Err(e) = self.store.persist(&update).await {
                warn!(
                    %kind,
                    item_id = %assignment.id,
                    position = %assignment.previous,
                    error = %e,
                    "could not restore stored position"
                );
            }
        }
    }

    /// Apply a completed drag
    pub async fn apply_drop(&mut self, kind: ScopeKind, intent: &DropIntent) -> MoveOutcome {
        if !self.guard.try_begin(Instant::now()) {
            debug!(source = %intent.source, "drop ignored, another is in flight");
            return MoveOutcome::Skipped(SkipReason::Busy);
        }
        let outcome = self.run_drop(kind, intent).await;
        self.guard.finish();
        outcome
    }

    async fn run_drop(&mut self, kind: ScopeKind, intent: &DropIntent) -> MoveOutcome {
        let source = &intent.source;
        let table = self.cache.table(kind);
        if table.scope_of(source) != Some(&intent.from_scope) {
            warn!(
                %kind,
                %source,
                claimed = %intent.from_scope,
                actual = ?table.scope_of(source),
                "drop source is stale, skipping"
            );
            return MoveOutcome::Skipped(SkipReason::StaleSource);
        }
        if !table.has_scope(&intent.to_scope) {
            warn!(%kind, scope_id = %intent.to_scope, "drop destination not loaded, skipping");
            return MoveOutcome::Skipped(SkipReason::UnknownScope);
        }

        let mut insertion = self.plan(kind, intent);
        let mut renumbered = false;
        if insertion.needs_renumber {
            debug!(%kind, scope_id = %intent.to_scope, "renumbering destination before move");
            if let Err(error) = self.renumber_scope(kind, &intent.to_scope).await {
                return MoveOutcome::RolledBack {
                    item_id: source.clone(),
                    error,
                };
            }
            renumbered = true;
            insertion = self.plan(kind, intent);
        }
        let position = insertion.position;
        debug!(%kind, %source, %position, "computed drop position");

        let capture = self
            .cache
            .table(kind)
            .capture(&[&intent.from_scope, &intent.to_scope]);
        self.cache.table_mut(kind).place(
            intent.to_scope.clone(),
            PositionedItem::new(source.clone(), position),
        );

        let update = PositionUpdate {
            kind,
            item_id: source.clone(),
            scope_id: intent.to_scope.clone(),
            position,
        };
        if let Err(error) = self.store.persist(&update).await {
            warn!(%kind, %source, error = %error, "move not persisted, rolling back");
            self.cache.table_mut(kind).restore(capture);
            return MoveOutcome::RolledBack {
                item_id: source.clone(),
                error,
            };
        }

        let event = if intent.is_cross_scope() {
            MoveEvent::across(
                kind,
                intent.from_scope.clone(),
                intent.to_scope.clone(),
                source.clone(),
                position,
            )
        } else {
            MoveEvent::within(kind, intent.to_scope.clone(), source.clone(), position)
        };
        if let Err(e) = self.broadcaster.broadcast(&event).await {
            warn!(%kind, %source, error = %e, "move persisted but not broadcast");
        }

        info!(
            %kind,
            %source,
            from = %intent.from_scope,
            to = %intent.to_scope,
            %position,
            renumbered,
            "moved item"
        );
        MoveOutcome::Moved {
            item_id: source.clone(),
            scope_id: intent.to_scope.clone(),
            position,
            renumbered,
        }
    }

    fn plan(&self, kind: ScopeKind, intent: &DropIntent) -> trellis_position::Insertion {
        let request = intent.to_request(self.cache.table(kind).snapshot(&intent.to_scope));
        plan_insertion(
            &request.siblings,
            request.target_id.as_ref(),
            request.edge,
            self.config.spacing.for_kind(kind),
            &self.config.precision,
        )
    }
}
