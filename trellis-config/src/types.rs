//! Configuration types

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trellis_position::{PrecisionPolicy, ScopeKind, Spacing};

/// Default fraction of a candidate's extent that separates before from after
pub const DEFAULT_EDGE_SPLIT_FRACTION: f64 = 0.5;
/// Default in-flight drop timeout
pub const DEFAULT_DROP_GUARD_TIMEOUT_MS: u64 = 5000;
/// Default pointer travel before a press turns into a drag
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;
/// Default window after a drop during which clicks are swallowed
pub const DEFAULT_CLICK_SUPPRESS_MS: u64 = 100;

/// Everything the reordering core can be tuned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    pub spacing: SpacingConfig,
    /// Pointer fraction along the candidate's axis where before turns into after
    pub edge_split_fraction: f64,
    pub precision: PrecisionPolicy,
    pub drop_guard_timeout_ms: u64,
    pub drag_threshold_px: f64,
    pub click_suppress_ms: u64,
    pub autoscroll: AutoScrollConfig,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            spacing: SpacingConfig::default(),
            edge_split_fraction: DEFAULT_EDGE_SPLIT_FRACTION,
            precision: PrecisionPolicy::default(),
            drop_guard_timeout_ms: DEFAULT_DROP_GUARD_TIMEOUT_MS,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            click_suppress_ms: DEFAULT_CLICK_SUPPRESS_MS,
            autoscroll: AutoScrollConfig::default(),
        }
    }
}

impl ReorderConfig {
    pub fn drop_guard_timeout(&self) -> Duration {
        Duration::from_millis(self.drop_guard_timeout_ms)
    }

    pub fn click_suppress(&self) -> Duration {
        Duration::from_millis(self.click_suppress_ms)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.edge_split_fraction > 0.0 && self.edge_split_fraction < 1.0) {
            return Err(ConfigError::invalid_value(
                "edge_split_fraction",
                format!("must be strictly between 0 and 1, got {}", self.edge_split_fraction),
            ));
        }
        if self.drop_guard_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "drop_guard_timeout_ms",
                "must be greater than zero",
            ));
        }
        if !(self.drag_threshold_px >= 0.0) {
            return Err(ConfigError::invalid_value(
                "drag_threshold_px",
                "must not be negative",
            ));
        }
        self.autoscroll.validate()
    }
}

/// Spacing per scope kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    pub cards: Spacing,
    pub lists: Spacing,
}

impl SpacingConfig {
    /// Spacing used for items of the given kind
    pub fn for_kind(&self, kind: ScopeKind) -> Spacing {
        match kind {
            ScopeKind::Card => self.cards,
            ScopeKind::List => self.lists,
        }
    }
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            cards: Spacing::default(),
            lists: Spacing::default(),
        }
    }
}

/// Auto-scroll tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollConfig {
    /// Distance from a container edge that activates scrolling
    pub edge_threshold_px: f64,
    /// Step size on the first tick inside the zone
    pub initial_step_px: f64,
    /// Step growth per tick while the pointer stays in the zone
    pub acceleration_px: f64,
    /// Upper bound on the step size
    pub max_step_px: f64,
    pub tick_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold_px: 48.0,
            initial_step_px: 2.0,
            acceleration_px: 1.0,
            max_step_px: 20.0,
            tick_ms: 16,
        }
    }
}

impl AutoScrollConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.edge_threshold_px > 0.0) {
            return Err(ConfigError::invalid_value(
                "autoscroll.edge_threshold_px",
                "must be greater than zero",
            ));
        }
        if !(self.initial_step_px > 0.0) {
            return Err(ConfigError::invalid_value(
                "autoscroll.initial_step_px",
                "must be greater than zero",
            ));
        }
        if !(self.acceleration_px >= 0.0) {
            return Err(ConfigError::invalid_value(
                "autoscroll.acceleration_px",
                "must not be negative",
            ));
        }
        if !(self.max_step_px >= self.initial_step_px) {
            return Err(ConfigError::invalid_value(
                "autoscroll.max_step_px",
                "must be at least initial_step_px",
            ));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::invalid_value(
                "autoscroll.tick_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ReorderConfig::default();
        config.validate().unwrap();
        assert_eq!(config.edge_split_fraction, 0.5);
        assert_eq!(config.drop_guard_timeout(), Duration::from_secs(5));
        assert_eq!(config.precision.max_scale, 10);
    }

    #[test]
    fn test_spacing_for_kind() {
        let spacing = SpacingConfig {
            cards: Spacing::from_units(1000).unwrap(),
            lists: Spacing::from_units(100).unwrap(),
        };
        assert_eq!(spacing.for_kind(ScopeKind::Card), spacing.cards);
        assert_eq!(spacing.for_kind(ScopeKind::List), spacing.lists);
    }

    #[test]
    fn test_split_fraction_bounds() {
        for bad in [0.0, 1.0, -0.1, f64::NAN] {
            let config = ReorderConfig {
                edge_split_fraction: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_autoscroll_cap_below_initial_rejected() {
        let config = ReorderConfig {
            autoscroll: AutoScrollConfig {
                initial_step_px: 10.0,
                max_step_px: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("autoscroll.max_step_px"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReorderConfig =
            serde_json::from_str(r#"{"spacing":{"lists":100},"click_suppress_ms":250}"#).unwrap();
        assert_eq!(config.spacing.lists, Spacing::from_units(100).unwrap());
        assert_eq!(config.spacing.cards, Spacing::default());
        assert_eq!(config.click_suppress(), Duration::from_millis(250));
        assert_eq!(config.autoscroll, AutoScrollConfig::default());
    }
}
