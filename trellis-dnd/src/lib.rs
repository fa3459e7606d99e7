//! Drag-and-drop interaction for board items
//!
//! The drag lifecycle is an explicit state value rather than a web of
//! callbacks and mutable flags:
//!
//! ```text
//! Idle -> Pressed -> Dragging -> Previewing <-> Previewing -> Dropped -> Idle
//!            |          |             |
//!            +----------+-------------+--> Idle (click or cancel)
//! ```
//!
//! Hover events compute an advisory [`DropIntent`] from pointer geometry; a
//! release turns the current (or last known) intent into the drop. Nothing
//! here touches persisted positions; the caller feeds the intent to the
//! position reconciler.
//!
//! Two helpers run alongside the machine:
//!
//! - [`DropGuard`] keeps a second drop from starting while the previous one is
//!   still settling, resetting itself after a fixed timeout.
//! - [`AutoScroller`] scrolls a container while the pointer hugs one of its
//!   edges, accelerating up to a cap. [`drive`] runs it on a timer.

mod autoscroll;
mod geometry;
mod guard;
mod state;

pub use autoscroll::{drive, AutoScroller, ScrollStep, ScrollSurface};
pub use geometry::{edge_at, Axis, Point, Rect};
pub use guard::DropGuard;
pub use state::{DragMachine, DragState, DropIntent, HoverCandidate};
