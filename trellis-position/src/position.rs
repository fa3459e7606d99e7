//! Position values and the items that carry them

use crate::error::{PositionError, Result};
use crate::ids::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort key of an item within its sibling scope.
///
/// Backed by a 96-bit decimal so repeated bisection keeps exact digits far
/// longer than binary floating point. Positions are not indexes: any value
/// may be inserted between two existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Decimal);

impl Position {
    /// Wrap a decimal value
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// The underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Arithmetic midpoint of two positions
    pub fn midpoint(&self, other: &Position) -> Position {
        let mid = match self.0.checked_add(other.0) {
            Some(sum) => sum / Decimal::TWO,
            None => (self.0 / Decimal::TWO).saturating_add(other.0 / Decimal::TWO),
        };
        Self(mid)
    }

    /// One spacing step after this position
    pub fn step_after(&self, spacing: Spacing) -> Position {
        Self(self.0.saturating_add(spacing.value()))
    }

    /// One spacing step before this position
    pub fn step_before(&self, spacing: Spacing) -> Position {
        Self(self.0.saturating_sub(spacing.value()))
    }

    /// Number of significant digits after the decimal point
    pub fn scale(&self) -> u32 {
        self.0.normalize().scale()
    }
}

impl From<i64> for Position {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Decimal> for Position {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| PositionError::parse(s, e))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Gap used for boundary inserts and for appending new items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Spacing(Decimal);

impl Spacing {
    /// Create a spacing; it must be strictly positive
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PositionError::invalid_spacing(value));
        }
        Ok(Self(value))
    }

    /// Spacing of a whole number of units
    pub fn from_units(units: u32) -> Result<Self> {
        Self::new(Decimal::from(units))
    }

    /// The underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self(Decimal::ONE_THOUSAND)
    }
}

impl TryFrom<Decimal> for Spacing {
    type Error = PositionError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Spacing> for Decimal {
    fn from(spacing: Spacing) -> Self {
        spacing.0
    }
}

/// A card or a list together with its position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionedItem {
    pub id: ItemId,
    pub position: Position,
}

impl PositionedItem {
    /// Create a positioned item
    pub fn new(id: impl Into<ItemId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Side of the target item a dragged item lands on.
///
/// Vertical layouts speak of top/bottom, horizontal ones of left/right; both
/// collapse onto before/after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[serde(alias = "top", alias = "left")]
    Before,
    #[serde(alias = "bottom", alias = "right")]
    After,
}

impl FromStr for Edge {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "before" | "top" | "left" => Ok(Self::Before),
            "after" | "bottom" | "right" => Ok(Self::After),
            other => Err(PositionError::parse(other, "expected before/after/top/bottom/left/right")),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Which kind of sibling scope an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// Cards, scoped by their list
    Card,
    /// Lists, scoped by their board
    List,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("card"),
            Self::List => f.write_str("list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_midpoint() {
        let a = Position::from(100);
        let b = Position::from(200);
        assert_eq!(a.midpoint(&b), Position::from(150));
        assert_eq!(b.midpoint(&a), Position::from(150));
    }

    #[test]
    fn test_midpoint_fractional() {
        let a = Position::from(1);
        let b = Position::from(2);
        assert_eq!(a.midpoint(&b), Position::new(dec!(1.5)));
        assert_eq!(a.midpoint(&b).scale(), 1);
    }

    #[test]
    fn test_midpoint_near_max_does_not_overflow() {
        let a = Position::new(Decimal::MAX);
        let b = Position::new(Decimal::MAX - Decimal::ONE_THOUSAND);
        let mid = a.midpoint(&b);
        assert!(mid <= a);
        assert!(mid >= b);
    }

    #[test]
    fn test_steps() {
        let spacing = Spacing::from_units(1000).unwrap();
        assert_eq!(Position::from(100).step_after(spacing), Position::from(1100));
        assert_eq!(Position::from(100).step_before(spacing), Position::from(-900));
    }

    #[test]
    fn test_scale_ignores_trailing_zeros() {
        assert_eq!(Position::new(dec!(150.000)).scale(), 0);
        assert_eq!(Position::new(dec!(0.125)).scale(), 3);
    }

    #[test]
    fn test_parse_and_display() {
        let p: Position = "12.50".parse().unwrap();
        assert_eq!(p, Position::new(dec!(12.5)));
        assert_eq!(p.to_string(), "12.5");
        assert!("twelve".parse::<Position>().is_err());
    }

    #[test]
    fn test_spacing_must_be_positive() {
        assert!(Spacing::new(Decimal::ZERO).is_err());
        assert!(Spacing::new(dec!(-1)).is_err());
        assert_eq!(Spacing::new(dec!(0.5)).unwrap().value(), dec!(0.5));
        assert_eq!(Spacing::default().value(), dec!(1000));
    }

    #[test]
    fn test_spacing_deserialize_validates() {
        let ok: Spacing = serde_json::from_str("100").unwrap();
        assert_eq!(ok.value(), dec!(100));
        assert!(serde_json::from_str::<Spacing>("0").is_err());
    }

    #[test]
    fn test_edge_aliases() {
        let top: Edge = serde_json::from_str("\"top\"").unwrap();
        let right: Edge = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(top, Edge::Before);
        assert_eq!(right, Edge::After);
        assert_eq!("Left".parse::<Edge>().unwrap(), Edge::Before);
        assert_eq!("bottom".parse::<Edge>().unwrap(), Edge::After);
        assert!("middle".parse::<Edge>().is_err());
    }

    #[test]
    fn test_position_orders_numerically() {
        let low: Position = "9.5".parse().unwrap();
        let high: Position = "10".parse().unwrap();
        assert!(low < high);
    }
}
