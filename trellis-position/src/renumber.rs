//! Precision headroom and scope renumbering
//!
//! Bisecting the same gap over and over adds one binary digit per insert.
//! Decimals carry those digits exactly for a long while, but not forever, so
//! a scope whose gaps got too fine is respaced to whole multiples of the
//! spacing. Order never changes; only the values do.

use crate::ids::ItemId;
use crate::position::{Position, PositionedItem, Spacing};
use crate::reconcile::Neighbors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default limit on digits after the decimal point before renumbering
pub const DEFAULT_MAX_SCALE: u32 = 10;

/// When a computed position is considered out of headroom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionPolicy {
    /// Largest acceptable number of digits after the decimal point
    pub max_scale: u32,
}

impl PrecisionPolicy {
    /// Create a policy with the given scale limit
    pub fn new(max_scale: u32) -> Self {
        Self { max_scale }
    }

    /// A position needs a renumbered scope when it failed to land strictly
    /// between its neighbors, or when it carries more fractional digits than
    /// the policy allows.
    pub fn needs_renumber(&self, position: Position, neighbors: Neighbors) -> bool {
        !neighbors.admits(position) || position.scale() > self.max_scale
    }
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCALE)
    }
}

/// New position for one item in a renumbered scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: ItemId,
    pub previous: Position,
    pub position: Position,
}

impl Assignment {
    /// True if the item's value actually moves
    pub fn is_change(&self) -> bool {
        self.previous != self.position
    }
}

/// Respacing of a whole scope, in display order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenumberPlan {
    assignments: Vec<Assignment>,
}

impl RenumberPlan {
    /// All assignments in display order
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Only the assignments that change a value
    pub fn changed(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| a.is_change())
    }

    /// Number of items whose value changes
    pub fn change_count(&self) -> usize {
        self.changed().count()
    }

    /// The scope as it looks after the plan is applied
    pub fn items(&self) -> Vec<PositionedItem> {
        self.assignments
            .iter()
            .map(|a| PositionedItem::new(a.id.clone(), a.position))
            .collect()
    }
}

/// Assign `(i + 1) * spacing` to every sibling, keeping the current order
pub fn renumber(siblings: &[PositionedItem], spacing: Spacing) -> RenumberPlan {
    let assignments = siblings
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let slot = Decimal::from(i as u64 + 1);
            Assignment {
                id: item.id.clone(),
                previous: item.position,
                position: Position::new(slot.saturating_mul(spacing.value())),
            }
        })
        .collect();
    RenumberPlan { assignments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_renumber_preserves_order() {
        let siblings = vec![
            PositionedItem::new("a", Position::new(dec!(1.0625))),
            PositionedItem::new("b", Position::new(dec!(1.125))),
            PositionedItem::new("c", Position::from(7000)),
        ];
        let plan = renumber(&siblings, Spacing::default());
        let ids: Vec<&str> = plan.assignments().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let positions: Vec<Position> = plan.items().iter().map(|i| i.position).collect();
        assert_eq!(
            positions,
            vec![Position::from(1000), Position::from(2000), Position::from(3000)]
        );
    }

    #[test]
    fn test_changed_skips_items_already_in_place() {
        let siblings = vec![
            PositionedItem::new("a", Position::from(1000)),
            PositionedItem::new("b", Position::new(dec!(1500.5))),
        ];
        let plan = renumber(&siblings, Spacing::default());
        assert_eq!(plan.change_count(), 1);
        assert_eq!(plan.changed().next().unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_renumber_empty() {
        let plan = renumber(&[], Spacing::default());
        assert!(plan.assignments().is_empty());
    }

    #[test]
    fn test_policy_flags_deep_scale() {
        let policy = PrecisionPolicy::new(3);
        let n = Neighbors {
            lower: Some(Position::from(0)),
            upper: Some(Position::from(1)),
        };
        assert!(!policy.needs_renumber(Position::new(dec!(0.125)), n));
        assert!(policy.needs_renumber(Position::new(dec!(0.0625)), n));
    }

    #[test]
    fn test_policy_flags_collapsed_midpoint() {
        let policy = PrecisionPolicy::default();
        let n = Neighbors {
            lower: Some(Position::from(5)),
            upper: Some(Position::from(6)),
        };
        assert!(policy.needs_renumber(Position::from(5), n));
    }
}
