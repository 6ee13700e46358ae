//! # slot-themes — Theme configuration for the slot engine
//!
//! A theme is the complete, static description of one game variant: the
//! five reel strips, the payline table, the per-symbol per-count payout
//! multipliers, and the payout rules (minimum win length, scatter rules).
//!
//! Themes are plain data. They are authored as JSON or YAML (or taken from
//! the built-in catalog), validated once at load time, and then handed to
//! the engine, which never mutates them. The engine refuses to start with
//! an invalid theme, so everything downstream can assume the invariants
//! checked here: strip symbols always resolve in the multiplier table,
//! payline rows always fit the visible window, and so on.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{builtin, builtin_names, random_strips};
pub use config::{
    REEL_COUNT, ScatterRules, SymbolId, ThemeConfig, VISIBLE_ROWS,
};
pub use error::{ConfigError, ConfigResult};
