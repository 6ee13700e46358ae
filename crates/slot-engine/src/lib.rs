//! # slot-engine — Spin resolution and payout engine
//!
//! The deterministic core of a five-reel, three-row slot game. Everything
//! visual (canvas rendering, audio, win celebrations) lives outside this
//! crate; the engine owns the parts whose correctness matters: choosing
//! where each reel stops, animating the reels so the final rendered frame
//! matches that choice exactly, reading the result grid, and paying out.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine (session: balance, bet, rng, stats, history)
//!     │
//!     ├── ThemeConfig (slot-themes: strips, paylines, multiplier table)
//!     ├── ReelBank (per-reel position/target/spin state)
//!     ├── TimingConfig (stagger, durations, easing, rotations)
//!     │
//!     │   start_spin(now) ─ debit bet, draw stop targets, schedule reels
//!     │   tick(now) ──────── advance reels; resolve when the last one snaps
//!     │   try_resolve(now) ─ timer-driven completion (defers while spinning)
//!     │
//!     └── SpinOutcome (result grid + Option<WinSummary>)
//! ```
//!
//! Time is an opaque monotonic `f64` millisecond value supplied by the
//! caller on every `tick`; the engine assumes nothing about tick cadence.
//! A single engine never has two spins in flight, and the [`SharedEngine`]
//! handle extends that single-writer rule to threaded hosts.

pub mod engine;
pub mod error;
pub mod paytable;
pub mod reels;
pub mod spin;
pub mod timing;

pub use engine::*;
pub use error::*;
pub use paytable::*;
pub use reels::*;
pub use spin::*;
pub use timing::*;

pub use slot_themes::{
    ConfigError, REEL_COUNT, ScatterRules, SymbolId, ThemeConfig, VISIBLE_ROWS, builtin,
    builtin_names,
};
