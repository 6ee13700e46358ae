//! Payline evaluation
//!
//! Walks every configured payline across a finished result grid, counting
//! strictly-contiguous left-to-right matches of the line's starting symbol,
//! and prices each qualifying run through the theme's multiplier table.
//! Lookup is by exact run length — a 5-of-a-kind pays the 5-count entry
//! alone, never the 3- and 4-count entries on top.
//!
//! Evaluation is a pure function of (grid, theme, bet): no randomness, no
//! state, identical output for identical input.

use serde::{Deserialize, Serialize};

use slot_themes::{REEL_COUNT, SymbolId, ThemeConfig};

use crate::reels::ResultGrid;

/// A single winning payline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    /// Index of the payline in the theme's table
    pub line_index: u8,
    /// The matched symbol
    pub symbol: SymbolId,
    /// Display name of the matched symbol
    pub symbol_name: String,
    /// Length of the consecutive run
    pub count: u8,
    /// Multiplier applied to the bet
    pub multiplier: u32,
    /// Payout in credits
    pub amount: u64,
    /// (reel, row) cells of the winning run only
    pub positions: Vec<(u8, u8)>,
}

/// All wins on one grid, in payline-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Qualifying lines, in the order their paylines are configured
    pub line_wins: Vec<LineWin>,
    /// Sum of all line amounts
    pub total_win: u64,
    /// Index into `line_wins` of the best line (strictly greatest
    /// multiplier; the earliest line wins ties)
    pub best: Option<usize>,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.total_win > 0
    }

    /// The single highest-multiplier line, if anything won.
    pub fn best_line(&self) -> Option<&LineWin> {
        self.best.and_then(|i| self.line_wins.get(i))
    }
}

/// Evaluate every payline of `theme` against a finished grid.
pub fn evaluate(grid: &ResultGrid, theme: &ThemeConfig, bet: u32) -> Evaluation {
    let mut line_wins = Vec::new();

    for (index, payline) in theme.paylines.iter().enumerate() {
        if let Some(win) = evaluate_line(grid, payline, index as u8, theme, bet) {
            line_wins.push(win);
        }
    }

    let total_win = line_wins.iter().map(|w| w.amount).sum();

    let mut best = None;
    let mut best_multiplier = 0u32;
    for (i, win) in line_wins.iter().enumerate() {
        if win.multiplier > best_multiplier {
            best_multiplier = win.multiplier;
            best = Some(i);
        }
    }

    Evaluation {
        line_wins,
        total_win,
        best,
    }
}

fn evaluate_line(
    grid: &ResultGrid,
    payline: &[u8],
    line_index: u8,
    theme: &ThemeConfig,
    bet: u32,
) -> Option<LineWin> {
    if payline.len() != grid.len() {
        return None;
    }

    let start_row = payline[0];
    let symbol = grid[0][start_row as usize];

    // A symbol with no positive multiplier entry can never start a win.
    if !theme.can_pay(symbol) {
        return None;
    }

    let mut positions = vec![(0u8, start_row)];
    let mut count = 1u8;
    for reel in 1..REEL_COUNT {
        let row = payline[reel];
        if grid[reel][row as usize] != symbol {
            break;
        }
        positions.push((reel as u8, row));
        count += 1;
    }

    if count < theme.min_win_length {
        return None;
    }
    let multiplier = theme.multiplier(symbol, count)?;
    let amount = multiplier as u64 * bet as u64;
    if amount == 0 {
        return None;
    }

    Some(LineWin {
        line_index,
        symbol,
        symbol_name: theme.symbol_name(symbol),
        count,
        multiplier,
        amount,
        positions,
    })
}
