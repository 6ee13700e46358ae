//! Theme validation and loading errors

use thiserror::Error;

use crate::config::SymbolId;

/// Fatal configuration error. A theme that fails validation never reaches
/// the engine; there is no recovery path short of fixing the theme data.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("theme defines {found} reel strips, expected {expected}")]
    ReelCountMismatch { expected: usize, found: usize },

    #[error("reel {reel} strip is empty")]
    EmptyStrip { reel: usize },

    #[error("reel {reel} strip has {len} symbols, minimum is {min}")]
    ShortStrip { reel: usize, len: usize, min: usize },

    #[error("reel {reel} contains symbol {symbol} with no multiplier entry")]
    UnknownSymbol { reel: usize, symbol: SymbolId },

    #[error("symbol {symbol} has no name (theme names {named} symbols)")]
    UnnamedSymbol { symbol: SymbolId, named: usize },

    #[error("theme defines no paylines")]
    NoPaylines,

    #[error("payline {line} has {found} entries, expected {expected}")]
    PaylineLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("payline {line} addresses row {row} on reel {reel}, visible rows are 0..{rows}")]
    RowOutOfRange {
        line: usize,
        reel: usize,
        row: u8,
        rows: usize,
    },

    #[error("theme has no symbol multiplier table")]
    EmptyPaytable,

    #[error("min win length {min_win_length} is outside 1..={reels}")]
    BadMinWinLength { min_win_length: u8, reels: usize },

    #[error("scatter rules define no payouts")]
    EmptyScatterRules,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
