//! Board cache and optimistic move coordination
//!
//! This crate is the caller side of the position reconciler. It keeps the
//! ordered sibling snapshots of a board in memory, turns drop intents into
//! new positions, applies them optimistically, and hands them to the
//! persistence and realtime collaborators.
//!
//! ## Move pipeline
//!
//! 1. A drop is admitted by the in-flight [`DropGuard`](trellis_dnd::DropGuard)
//! 2. The source must still be in the scope the drag claims it came from
//! 3. The destination snapshot (source excluded) goes through the reconciler
//! 4. If the result ran out of precision headroom the destination is renumbered first
//! 5. Origin and destination are captured, then the cache is updated immediately
//! 6. The new position is persisted; on failure the capture is restored
//! 7. The move is broadcast to other clients
//!
//! ```rust,no_run
//! use trellis_board::{MoveCoordinator, PositionStore, MoveBroadcaster, MoveOutcome};
//! use trellis_config::ReorderConfig;
//! use trellis_dnd::DropIntent;
//! use trellis_position::ScopeKind;
//!
//! # async fn example<S: PositionStore, B: MoveBroadcaster>(store: S, broadcaster: B, intent: DropIntent) {
//! let mut coordinator = MoveCoordinator::new(ReorderConfig::default(), store, broadcaster);
//! match coordinator.apply_drop(ScopeKind::Card, &intent).await {
//!     MoveOutcome::Moved { position, .. } => println!("moved to {position}"),
//!     other => println!("not moved: {other:?}"),
//! }
//! # }
//! ```

mod cache;
mod collaborators;
mod coordinator;
mod error;

pub use cache::{BoardCache, ScopeCapture, ScopeTable};
pub use collaborators::{MoveBroadcaster, MoveEvent, PositionStore, PositionUpdate};
pub use coordinator::{MoveCoordinator, MoveOutcome, SkipReason};
pub use error::{BoardError, Result};
