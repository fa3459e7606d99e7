//! Insertion position reconciliation
//!
//! Given the destination scope's siblings (sorted ascending, mover excluded)
//! and a `(target, edge)` pair, pick the two positions that will flank the
//! moved item and produce a value strictly between them.

use crate::ids::ItemId;
use crate::position::{Edge, Position, PositionedItem, Spacing};
use crate::renumber::PrecisionPolicy;
use tracing::trace;

/// Positions that will flank an inserted item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub lower: Option<Position>,
    pub upper: Option<Position>,
}

impl Neighbors {
    /// True when `position` sorts strictly between both present neighbors
    pub fn admits(&self, position: Position) -> bool {
        self.lower.is_none_or(|lower| lower < position)
            && self.upper.is_none_or(|upper| position < upper)
    }
}

/// Result of planning an insertion, including whether the scope should be
/// renumbered before the value is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub position: Position,
    pub neighbors: Neighbors,
    pub needs_renumber: bool,
}

/// Find the neighbors of an insertion point.
///
/// An absent target, or one that is not among `siblings`, means a boundary
/// insert: `After` lands past the last item and `Before` ahead of the first.
pub fn neighbors(siblings: &[PositionedItem], target_id: Option<&ItemId>, edge: Edge) -> Neighbors {
    let index = target_id.and_then(|id| {
        let found = siblings.iter().position(|item| &item.id == id);
        if found.is_none() {
            trace!(target = %id, %edge, "target not among siblings, using boundary insert");
        }
        found
    });

    match (index, edge) {
        (Some(i), Edge::Before) => Neighbors {
            lower: i.checked_sub(1).map(|prev| siblings[prev].position),
            upper: Some(siblings[i].position),
        },
        (Some(i), Edge::After) => Neighbors {
            lower: Some(siblings[i].position),
            upper: siblings.get(i + 1).map(|next| next.position),
        },
        (None, Edge::Before) => Neighbors {
            lower: None,
            upper: siblings.first().map(|first| first.position),
        },
        (None, Edge::After) => Neighbors {
            lower: siblings.last().map(|last| last.position),
            upper: None,
        },
    }
}

/// Pick a position strictly between the given neighbors
pub fn position_between(neighbors: Neighbors, spacing: Spacing) -> Position {
    match (neighbors.lower, neighbors.upper) {
        (Some(lower), Some(upper)) => lower.midpoint(&upper),
        (Some(lower), None) => lower.step_after(spacing),
        (None, Some(upper)) => upper.step_before(spacing),
        (None, None) => Position::new(spacing.value()),
    }
}

/// Compute the new position of an item dropped on `edge` of `target_id`.
///
/// `siblings` must be sorted ascending by position and must not contain the
/// moving item. The function is pure and total; it returns a single value
/// and never touches the siblings.
///
/// Boundary inserts step by `spacing` and saturate at the decimal range. A
/// boundary sibling already at `Decimal::MAX` (or `MIN`) therefore yields its
/// own position back; use [`plan_insertion`] to detect that and renumber.
pub fn compute_insertion_position(
    siblings: &[PositionedItem],
    target_id: Option<&ItemId>,
    edge: Edge,
    spacing: Spacing,
) -> Position {
    position_between(neighbors(siblings, target_id, edge), spacing)
}

/// Like [`compute_insertion_position`], also reporting whether the result has
/// run out of precision headroom under `policy`.
pub fn plan_insertion(
    siblings: &[PositionedItem],
    target_id: Option<&ItemId>,
    edge: Edge,
    spacing: Spacing,
    policy: &PrecisionPolicy,
) -> Insertion {
    let neighbors = neighbors(siblings, target_id, edge);
    let position = position_between(neighbors, spacing);
    let needs_renumber = policy.needs_renumber(position, neighbors);
    if needs_renumber {
        trace!(%position, scale = position.scale(), "insertion exhausted precision headroom");
    }
    Insertion {
        position,
        neighbors,
        needs_renumber,
    }
}

/// Position for a newly created item: one spacing past the last sibling
pub fn append_position(siblings: &[PositionedItem], spacing: Spacing) -> Position {
    compute_insertion_position(siblings, None, Edge::After, spacing)
}
