//! The engine: session state, spin orchestration, outcome aggregation
//!
//! One [`SlotEngine`] is one play session. It owns every piece of state the
//! original game kept in globals — balance, bet, the spinning flag, the
//! reels, the last result — and routes all mutation through its methods, so
//! the single-writer rule holds by construction. Hosts that want to drive
//! the engine from multiple threads wrap it in the [`SharedEngine`] mutex
//! handle instead of cloning state.

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use slot_themes::{ConfigError, SymbolId, ThemeConfig};

use crate::error::SpinError;
use crate::paytable::{Evaluation, evaluate};
use crate::reels::{ReelBank, ResultGrid};
use crate::spin::{HISTORY_LIMIT, SpinOutcome, SpinRecord, WinSummary};
use crate::timing::TimingConfig;

/// Starting balance for a fresh session.
pub const DEFAULT_BALANCE: u64 = 1000;

/// Starting bet for a fresh session.
pub const DEFAULT_BET: u32 = 10;

/// Selectable bet amounts, stepped through by the bet controls.
pub const BET_LEVELS: [u32; 5] = [5, 10, 20, 50, 100];

/// A total at or above `bet * BIG_WIN_MULTIPLE` raises the big-win flag.
pub const BIG_WIN_MULTIPLE: u64 = 5;

/// Session statistics, updated on every resolved spin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub losses: u64,
    pub big_wins: u64,
}

impl SessionStats {
    /// Return-to-player percentage so far.
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            self.total_win as f64 / self.total_bet as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Percentage of spins that paid anything.
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.wins as f64 / self.total_spins as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Thread-safe handle to an engine. All access serializes through the
/// mutex, preserving the no-overlapping-spins rule for threaded hosts.
pub type SharedEngine = Arc<Mutex<SlotEngine>>;

/// The spin resolution and payout engine for one session.
pub struct SlotEngine {
    theme: ThemeConfig,
    reels: ReelBank,
    timing: TimingConfig,
    rng: StdRng,
    balance: u64,
    bet: u32,
    spinning: bool,
    awaiting_resolution: bool,
    last_outcome: Option<SpinOutcome>,
    stats: SessionStats,
    history: VecDeque<SpinRecord>,
}

impl SlotEngine {
    /// Build an engine for a theme with normal gameplay timing.
    ///
    /// The theme is validated here; an engine never exists with a broken
    /// configuration.
    pub fn new(theme: ThemeConfig) -> Result<Self, ConfigError> {
        Self::with_timing(theme, TimingConfig::default())
    }

    /// Build an engine with a specific timing profile.
    pub fn with_timing(theme: ThemeConfig, timing: TimingConfig) -> Result<Self, ConfigError> {
        theme.validate()?;
        let mut rng = StdRng::from_os_rng();
        let reels = ReelBank::from_theme(&theme, &mut rng);
        debug!("engine initialized with theme \"{}\"", theme.name);
        Ok(Self {
            theme,
            reels,
            timing,
            rng,
            balance: DEFAULT_BALANCE,
            bet: DEFAULT_BET,
            spinning: false,
            awaiting_resolution: false,
            last_outcome: None,
            stats: SessionStats::default(),
            history: VecDeque::new(),
        })
    }

    /// Override the starting balance (builder style).
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    /// Reseed the stop-index RNG for deterministic replay.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Wrap this engine for use from multiple threads.
    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    // ------------------------------------------------------------------
    // Spin lifecycle
    // ------------------------------------------------------------------

    /// Start a spin at time `now`.
    ///
    /// On success the bet is debited and every reel is armed with a fresh
    /// uniform stop target and its staggered schedule. On any guard failure
    /// nothing changes: a duplicate request while spinning and an
    /// uninitialized reel bank are logged and rejected, an insufficient
    /// balance is rejected for the caller to surface.
    pub fn start_spin(&mut self, now: f64) -> Result<(), SpinError> {
        if self.spinning {
            warn!("spin requested while reels are already spinning; ignoring");
            return Err(SpinError::InProgress);
        }
        if self.reels.is_empty() || self.reels.reels().iter().any(|r| r.strip().is_empty()) {
            warn!("spin requested before reels were initialized; ignoring");
            return Err(SpinError::NotReady);
        }
        if self.balance < self.bet as u64 {
            debug!(
                "spin rejected: balance {} cannot cover bet {}",
                self.balance, self.bet
            );
            return Err(SpinError::InsufficientBalance {
                balance: self.balance,
                bet: self.bet,
            });
        }

        self.balance -= self.bet as u64;
        self.spinning = true;
        self.awaiting_resolution = true;
        self.last_outcome = None;

        for (i, reel) in self.reels.reels_mut().iter_mut().enumerate() {
            let target = self.rng.random_range(0..reel.strip().len());
            reel.schedule(i, now, target, &self.timing);
        }
        debug!("spin started at {now}ms, bet {}", self.bet);
        Ok(())
    }

    /// Advance every reel to `now`. If this tick stopped the last reel,
    /// the spin resolves immediately and the outcome is returned; on every
    /// other tick this returns `None`.
    pub fn tick(&mut self, now: f64) -> Option<SpinOutcome> {
        self.reels.advance_all(now);
        if self.awaiting_resolution && self.reels.all_stopped() {
            return Some(self.resolve());
        }
        None
    }

    /// Timer-driven completion check, for hosts that schedule a callback at
    /// [`Self::spin_deadline`] instead of resolving from the tick loop.
    ///
    /// If a reel is somehow still animating the check defers: it logs and
    /// returns `None`, and the caller retries after a short delay. A spin
    /// that already resolved returns `None` as well.
    pub fn try_resolve(&mut self, now: f64) -> Option<SpinOutcome> {
        if !self.awaiting_resolution {
            return None;
        }
        self.reels.advance_all(now);
        if !self.reels.all_stopped() {
            warn!("completion check fired while reels are still spinning; retry shortly");
            return None;
        }
        Some(self.resolve())
    }

    /// Absolute time by which every reel of the in-flight spin will have
    /// stopped, including the completion buffer. `None` while idle.
    pub fn spin_deadline(&self) -> Option<f64> {
        if !self.spinning {
            return None;
        }
        let last_stop = self
            .reels
            .reels()
            .iter()
            .map(|r| r.stop_time())
            .fold(f64::NEG_INFINITY, f64::max);
        Some(last_stop + self.timing.completion_buffer_ms)
    }

    /// Extract the grid, evaluate paylines, settle the balance, and record
    /// the spin. Only called once all reels report stopped.
    fn resolve(&mut self) -> SpinOutcome {
        let grid = self.reels.extract_grid();
        let evaluation = evaluate(&grid, &self.theme, self.bet);
        let outcome = self.finalize(grid, evaluation);

        self.spinning = false;
        self.awaiting_resolution = false;
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Aggregate line wins into the session: credit the balance on a win,
    /// leave it alone on a loss (the bet was debited at spin start), and
    /// update stats and history either way.
    fn finalize(&mut self, grid: ResultGrid, evaluation: Evaluation) -> SpinOutcome {
        let bet = self.bet;
        self.stats.total_spins += 1;
        self.stats.total_bet += bet as u64;

        let win = match evaluation.best_line().cloned() {
            Some(best_line) if evaluation.total_win > 0 => {
                self.balance = self.balance.saturating_add(evaluation.total_win);
                self.stats.wins += 1;
                self.stats.total_win += evaluation.total_win;

                let big_win = evaluation.total_win >= bet as u64 * BIG_WIN_MULTIPLE;
                if big_win {
                    self.stats.big_wins += 1;
                }
                let epic_win = evaluation
                    .line_wins
                    .iter()
                    .any(|w| w.count >= self.theme.epic_win_length);

                debug!(
                    "win: {} credits on {} lines (best: {} x{})",
                    evaluation.total_win,
                    evaluation.line_wins.len(),
                    best_line.symbol_name,
                    best_line.count
                );
                Some(WinSummary {
                    total_win: evaluation.total_win,
                    best_line,
                    line_wins: evaluation.line_wins,
                    big_win,
                    epic_win,
                })
            }
            _ => {
                self.stats.losses += 1;
                None
            }
        };

        let record = match &win {
            Some(w) => SpinRecord {
                win: true,
                detail: w.best_line.symbol_name.clone(),
                count: w.best_line.count,
                bet,
                amount: w.total_win,
            },
            None => {
                let middle = grid
                    .iter()
                    .map(|reel| self.theme.symbol_name(reel[1]))
                    .collect::<Vec<_>>()
                    .join(", ");
                SpinRecord {
                    win: false,
                    detail: format!("Middle: {middle}"),
                    count: 0,
                    bet,
                    amount: 0,
                }
            }
        };
        self.history.push_front(record);
        self.history.truncate(HISTORY_LIMIT);

        SpinOutcome { grid, bet, win }
    }

    // ------------------------------------------------------------------
    // Bet and balance controls
    // ------------------------------------------------------------------

    /// Step the bet up one level. Requires the balance to cover the new
    /// bet; a no-op while spinning. Returns whether the bet changed.
    pub fn increase_bet(&mut self) -> bool {
        if self.spinning {
            return false;
        }
        let Some(pos) = BET_LEVELS.iter().position(|&b| b == self.bet) else {
            return false;
        };
        let Some(&next) = BET_LEVELS.get(pos + 1) else {
            return false;
        };
        if self.balance < next as u64 {
            debug!("cannot raise bet to {next}: balance is {}", self.balance);
            return false;
        }
        self.bet = next;
        true
    }

    /// Step the bet down one level. A no-op while spinning.
    pub fn decrease_bet(&mut self) -> bool {
        if self.spinning {
            return false;
        }
        let Some(pos) = BET_LEVELS.iter().position(|&b| b == self.bet) else {
            return false;
        };
        if pos == 0 {
            return false;
        }
        self.bet = BET_LEVELS[pos - 1];
        true
    }

    /// Add credits to the balance. A no-op while spinning.
    pub fn add_credit(&mut self, amount: u64) {
        if self.spinning {
            return;
        }
        self.balance = self.balance.saturating_add(amount);
    }

    // ------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Session history, newest first, capped at [`HISTORY_LIMIT`].
    pub fn history(&self) -> &VecDeque<SpinRecord> {
        &self.history
    }

    /// Result of the most recently resolved spin.
    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// The most recent result grid, for external collaborators (scatter
    /// counting, bonus triggers) that inspect positions payline-free.
    pub fn last_grid(&self) -> Option<ResultGrid> {
        self.last_outcome.as_ref().map(|o| o.grid)
    }

    /// Read-only view of the reels, for the presentation layer.
    pub fn reels(&self) -> &ReelBank {
        &self.reels
    }

    /// Fractional scroll position of one reel, for rendering.
    pub fn reel_position(&self, reel: usize) -> Option<f64> {
        self.reels.reel(reel).map(|r| r.position())
    }

    /// Cosmetic velocity estimate of one reel.
    pub fn reel_velocity(&self, reel: usize) -> Option<f64> {
        self.reels.reel(reel).map(|r| r.velocity())
    }

    /// Strip contents of one reel.
    pub fn reel_strip(&self, reel: usize) -> Option<&[SymbolId]> {
        self.reels.reel(reel).map(|r| r.strip())
    }
}
