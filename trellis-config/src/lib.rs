//! Trellis configuration management using Figment
//!
//! All tunables of the reordering core live in one [`ReorderConfig`]:
//! spacing constants, the pointer split fraction, the precision policy, the
//! drop guard timeout and the auto-scroll tuning.
//!
//! # Precedence
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional configuration file (TOML, YAML or JSON, chosen by extension)
//! 3. Environment variables prefixed `TRELLIS_`, with `__` separating nested keys
//!
//! ```no_run
//! use trellis_config::ConfigProvider;
//!
//! // TRELLIS_SPACING__CARDS=100 overrides spacing.cards
//! let config = ConfigProvider::new().with_file("trellis.toml").load()?;
//! println!("split at {}", config.edge_split_fraction);
//! # Ok::<(), trellis_config::ConfigError>(())
//! ```
//!
//! # Example TOML
//!
//! ```toml
//! edge_split_fraction = 0.5
//! drop_guard_timeout_ms = 5000
//!
//! [spacing]
//! cards = 1000
//! lists = 100
//!
//! [precision]
//! max_scale = 10
//!
//! [autoscroll]
//! edge_threshold_px = 48.0
//! max_step_px = 20.0
//! ```

mod error;
mod provider;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use provider::{load_configuration, ConfigFormat, ConfigProvider, ENV_PREFIX};
pub use types::{AutoScrollConfig, ReorderConfig, SpacingConfig};
