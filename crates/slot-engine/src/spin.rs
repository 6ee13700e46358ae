//! Spin outcome and session history types

use serde::{Deserialize, Serialize};

use crate::paytable::LineWin;
use crate::reels::ResultGrid;

/// Maximum retained session history entries.
pub const HISTORY_LIMIT: usize = 50;

/// Everything a winning spin pays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    /// Sum of all line payouts, already credited to the balance
    pub total_win: u64,
    /// The single best line (strictly greatest multiplier, first-seen ties)
    pub best_line: LineWin,
    /// Every qualifying line, in payline-table order
    pub line_wins: Vec<LineWin>,
    /// Advisory celebration flag: total reached five times the bet
    pub big_win: bool,
    /// Advisory flag: some winning run reached the theme's epic length
    pub epic_win: bool,
}

/// The result of one completed spin.
///
/// `win` is `None` for a loss — losing is an expected outcome, not an
/// error, and the bet was already debited at spin start. The raw grid is
/// always present so external collaborators (scatter counting, bonus
/// triggers, history UI) can inspect it regardless of line wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// The authoritative symbol grid this spin resolved to
    pub grid: ResultGrid,
    /// Bet that was staked on this spin
    pub bet: u32,
    /// Payout details, or `None` for a loss
    pub win: Option<WinSummary>,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.win.is_some()
    }

    /// Total payout in credits; zero for a loss.
    pub fn total_win(&self) -> u64 {
        self.win.as_ref().map_or(0, |w| w.total_win)
    }

    /// Win-to-bet ratio, for presentation tiers.
    pub fn win_ratio(&self) -> f64 {
        if self.bet == 0 {
            return 0.0;
        }
        self.total_win() as f64 / self.bet as f64
    }
}

/// One entry in the session history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Whether the spin paid anything
    pub win: bool,
    /// Best-line symbol name for wins; the middle-row symbols for losses
    pub detail: String,
    /// Best-line run length (zero for losses)
    pub count: u8,
    /// Bet staked
    pub bet: u32,
    /// Credits won
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_outcome_accessors() {
        let outcome = SpinOutcome {
            grid: [[0; 3]; 5],
            bet: 10,
            win: None,
        };
        assert!(!outcome.is_win());
        assert_eq!(outcome.total_win(), 0);
        assert_eq!(outcome.win_ratio(), 0.0);
    }

    #[test]
    fn test_win_ratio() {
        let line = LineWin {
            line_index: 0,
            symbol: 1,
            symbol_name: "Seven".into(),
            count: 3,
            multiplier: 5,
            amount: 50,
            positions: vec![(0, 1), (1, 1), (2, 1)],
        };
        let outcome = SpinOutcome {
            grid: [[0; 3]; 5],
            bet: 10,
            win: Some(WinSummary {
                total_win: 50,
                best_line: line.clone(),
                line_wins: vec![line],
                big_win: true,
                epic_win: false,
            }),
        };
        assert!(outcome.is_win());
        assert_eq!(outcome.total_win(), 50);
        assert_eq!(outcome.win_ratio(), 5.0);
    }
}
