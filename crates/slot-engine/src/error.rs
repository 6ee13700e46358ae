//! Recoverable spin guards
//!
//! Fatal configuration problems are [`slot_themes::ConfigError`] and stop an
//! engine from being constructed at all. The errors here are the local,
//! non-fatal guards around `start_spin`: nothing has been mutated when one
//! is returned, and callers that want the original game's silent-ignore
//! behavior can simply drop the value.

use thiserror::Error;

/// A rejected spin request. No state changes when one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    #[error("insufficient balance: have {balance}, bet is {bet}")]
    InsufficientBalance { balance: u64, bet: u32 },

    #[error("a spin is already in progress")]
    InProgress,

    #[error("reels are not initialized")]
    NotReady,
}
