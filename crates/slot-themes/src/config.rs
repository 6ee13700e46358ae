//! Theme configuration types and validation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Number of reels (columns). The engine and every payline are built around
/// this count.
pub const REEL_COUNT: usize = 5;

/// Number of symbol rows visible in the reel viewport.
pub const VISIBLE_ROWS: usize = 3;

/// A strip must hold the visible window plus one symbol of headroom on each
/// side so the viewport never wraps onto itself mid-scroll.
pub const MIN_STRIP_LEN: usize = VISIBLE_ROWS + 2;

/// Symbol identifier: an index into the theme's multiplier table.
pub type SymbolId = u32;

/// Payout multipliers for one symbol, keyed by consecutive-match count.
/// Lookup is by exact count: a 5-of-a-kind pays the 5 entry only, it does
/// not stack the 3 and 4 entries.
pub type CountMultipliers = BTreeMap<u8, u32>;

/// Scatter payout rules carried by a theme.
///
/// Scatter and bonus detection are position-free (counted anywhere on the
/// grid) and handled by an external collaborator that inspects the finished
/// result grid; the engine itself never evaluates these. The rules live
/// here so a theme file round-trips completely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterRules {
    /// Bet multiplier per scatter count (e.g. {3: 5, 4: 10, 5: 50})
    pub payouts: BTreeMap<u8, u32>,
    /// Bonus symbols required to trigger the bonus feature
    pub bonus_requirement: u8,
}

/// Complete configuration for one game variant.
///
/// Validated once via [`ThemeConfig::validate`] (the loaders do this for
/// you); the engine only accepts themes that passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name (e.g. "Classic")
    pub name: String,

    /// Display names indexed by symbol id. May be empty; when present it
    /// must cover every symbol the theme uses.
    #[serde(default)]
    pub symbol_names: Vec<String>,

    /// One strip per reel: the fixed cyclic sequence of symbol ids the reel
    /// scrolls through.
    pub reel_strips: Vec<Vec<SymbolId>>,

    /// Row index per reel, one payline per entry. Row values address the
    /// visible window: 0 = top, 1 = middle, 2 = bottom.
    pub paylines: Vec<Vec<u8>>,

    /// Payout multiplier table: symbol id -> consecutive count -> multiplier.
    pub multipliers: BTreeMap<SymbolId, CountMultipliers>,

    /// Minimum consecutive run (from reel 0) that can pay at all.
    pub min_win_length: u8,

    /// Run length at or above which a win is signalled as "epic" to the
    /// presentation layer. Advisory only; does not affect payout math.
    #[serde(default = "default_epic_win_length")]
    pub epic_win_length: u8,

    /// Scatter/bonus rules, if the theme has them.
    #[serde(default)]
    pub scatter: Option<ScatterRules>,
}

fn default_epic_win_length() -> u8 {
    REEL_COUNT as u8
}

impl ThemeConfig {
    /// Parse a theme from JSON and validate it.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let theme: Self = serde_json::from_str(text)?;
        theme.validate()?;
        theme.log_loaded();
        Ok(theme)
    }

    /// Parse a theme from YAML and validate it.
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let theme: Self = serde_yml::from_str(text)?;
        theme.validate()?;
        theme.log_loaded();
        Ok(theme)
    }

    fn log_loaded(&self) {
        log::debug!(
            "loaded theme \"{}\": {} symbols, {} paylines",
            self.name,
            self.multipliers.len(),
            self.paylines.len()
        );
    }

    /// Check every structural invariant the engine relies on.
    ///
    /// Errors here are fatal: the engine refuses to construct with a theme
    /// that fails any check.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.multipliers.is_empty() {
            return Err(ConfigError::EmptyPaytable);
        }

        if self.reel_strips.len() != REEL_COUNT {
            return Err(ConfigError::ReelCountMismatch {
                expected: REEL_COUNT,
                found: self.reel_strips.len(),
            });
        }

        for (reel, strip) in self.reel_strips.iter().enumerate() {
            if strip.is_empty() {
                return Err(ConfigError::EmptyStrip { reel });
            }
            if strip.len() < MIN_STRIP_LEN {
                return Err(ConfigError::ShortStrip {
                    reel,
                    len: strip.len(),
                    min: MIN_STRIP_LEN,
                });
            }
            for &symbol in strip {
                if !self.multipliers.contains_key(&symbol) {
                    return Err(ConfigError::UnknownSymbol { reel, symbol });
                }
                if !self.symbol_names.is_empty()
                    && symbol as usize >= self.symbol_names.len()
                {
                    return Err(ConfigError::UnnamedSymbol {
                        symbol,
                        named: self.symbol_names.len(),
                    });
                }
            }
        }

        if self.paylines.is_empty() {
            return Err(ConfigError::NoPaylines);
        }
        for (line, payline) in self.paylines.iter().enumerate() {
            if payline.len() != REEL_COUNT {
                return Err(ConfigError::PaylineLength {
                    line,
                    expected: REEL_COUNT,
                    found: payline.len(),
                });
            }
            for (reel, &row) in payline.iter().enumerate() {
                if row as usize >= VISIBLE_ROWS {
                    return Err(ConfigError::RowOutOfRange {
                        line,
                        reel,
                        row,
                        rows: VISIBLE_ROWS,
                    });
                }
            }
        }

        if self.min_win_length == 0 || self.min_win_length as usize > REEL_COUNT {
            return Err(ConfigError::BadMinWinLength {
                min_win_length: self.min_win_length,
                reels: REEL_COUNT,
            });
        }

        if let Some(scatter) = &self.scatter {
            if scatter.payouts.is_empty() {
                return Err(ConfigError::EmptyScatterRules);
            }
        }

        Ok(())
    }

    /// Display name for a symbol, falling back to the raw id.
    pub fn symbol_name(&self, symbol: SymbolId) -> String {
        self.symbol_names
            .get(symbol as usize)
            .cloned()
            .unwrap_or_else(|| format!("#{symbol}"))
    }

    /// Multiplier for an exact consecutive-match count, if the table has one.
    pub fn multiplier(&self, symbol: SymbolId, count: u8) -> Option<u32> {
        self.multipliers.get(&symbol)?.get(&count).copied()
    }

    /// Whether a symbol can start a win at all (has any positive multiplier).
    pub fn can_pay(&self, symbol: SymbolId) -> bool {
        self.multipliers
            .get(&symbol)
            .is_some_and(|counts| counts.values().any(|&m| m > 0))
    }

    /// Strip length for one reel.
    pub fn strip_len(&self, reel: usize) -> usize {
        self.reel_strips.get(reel).map_or(0, Vec::len)
    }
}
