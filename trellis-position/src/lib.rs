//! Fractional positions for ordered board items
//!
//! Cards within a list and lists within a board are ordered by a numeric
//! `position`. Moving an item computes one new position that sorts strictly
//! between its new neighbors, so no sibling ever needs to be rewritten.
//!
//! ## Overview
//!
//! - **Sibling scope** - positions are unique within a list (for cards) or a board (for lists)
//! - **Midpoint insertion** - between two neighbors the new position is their midpoint
//! - **Boundary insertion** - at either end the position steps one spacing past the edge item
//! - **Lenient targets** - a missing or unknown target falls back to the boundary policy
//! - **Renumbering** - when bisection runs out of decimal headroom, a scope is respaced
//!
//! ## Basic Usage
//!
//! ```rust
//! use trellis_position::{compute_insertion_position, Edge, ItemId, Position, PositionedItem, Spacing};
//!
//! let siblings = vec![
//!     PositionedItem::new("a", Position::from(100)),
//!     PositionedItem::new("b", Position::from(200)),
//! ];
//!
//! let target = ItemId::from_string("a");
//! let position = compute_insertion_position(&siblings, Some(&target), Edge::After, Spacing::default());
//! assert_eq!(position, Position::from(150));
//! ```

mod error;
mod ids;
mod position;
mod reconcile;
mod renumber;
mod snapshot;

pub use error::{PositionError, Result};
pub use ids::{ItemId, ScopeId};
pub use position::{Edge, Position, PositionedItem, ScopeKind, Spacing};
pub use reconcile::{
    append_position, compute_insertion_position, neighbors, plan_insertion, position_between,
    Insertion, Neighbors,
};
pub use renumber::{renumber, Assignment, PrecisionPolicy, RenumberPlan};
pub use snapshot::{MoveRequest, SiblingSnapshot};
