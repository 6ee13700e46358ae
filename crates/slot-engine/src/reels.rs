//! Reel state and result extraction
//!
//! Each reel owns a copy of its theme strip plus the animation state for
//! the current spin. `position` is a fractional strip index: the symbol
//! rendered at the top of the 3-row viewport is `floor(position)`, and the
//! stop target is therefore the strip index that lands on the top row.
//! Payout logic never reads the animated position — it reads the strip at
//! the resolved integer target.

use rand::Rng;
use serde::{Deserialize, Serialize};

use slot_themes::{REEL_COUNT, SymbolId, ThemeConfig, VISIBLE_ROWS};

use crate::timing::{TimingConfig, ease_out_quart};

/// The authoritative result of a spin: `grid[reel][row]` is the symbol
/// visible at that cell once every reel has stopped.
pub type ResultGrid = [[SymbolId; VISIBLE_ROWS]; REEL_COUNT];

/// Animation and strip state for a single reel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelState {
    strip: Vec<SymbolId>,
    position: f64,
    target: usize,
    spinning: bool,
    start_time: f64,
    duration: f64,
    start_position: f64,
    distance: f64,
    velocity: f64,
    last_update: f64,
}

impl ReelState {
    fn new(strip: Vec<SymbolId>, start_offset: usize) -> Self {
        Self {
            strip,
            position: start_offset as f64,
            target: start_offset,
            spinning: false,
            start_time: 0.0,
            duration: 0.0,
            start_position: 0.0,
            distance: 0.0,
            velocity: 0.0,
            last_update: 0.0,
        }
    }

    /// Strip contents (read-only; the strip never changes after init).
    pub fn strip(&self) -> &[SymbolId] {
        &self.strip
    }

    /// Current fractional position, for rendering only.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Latest velocity estimate in strip-units per second. Purely cosmetic
    /// (motion blur, trails); zero once stopped.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether this reel is still animating.
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// The strip index that lands on the top visible row when stopped.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Absolute time at which this reel's animation completes.
    pub fn stop_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Symbol at a strip index, wrapping around the strip.
    pub fn symbol_at(&self, index: usize) -> SymbolId {
        self.strip[index % self.strip.len()]
    }

    /// Arm this reel for a spin toward `target`.
    ///
    /// The travel distance is a whole number of rotations (more for later
    /// reels) plus the forward gap from the current position to the target;
    /// a zero gap is bumped by a full strip so the reel always visibly
    /// moves forward.
    pub(crate) fn schedule(
        &mut self,
        reel: usize,
        now: f64,
        target: usize,
        timing: &TimingConfig,
    ) {
        let len = self.strip.len() as f64;
        self.target = target;
        self.start_time = now + timing.start_delay_for(reel);
        self.duration = timing.duration_for(reel);
        self.start_position = self.position;

        let current_mod = self.position.rem_euclid(len);
        let mut difference = (target as f64 - current_mod).rem_euclid(len);
        if difference <= 0.0 {
            difference = len;
        }
        self.distance = timing.rotations_for(reel) as f64 * len + difference;

        self.spinning = true;
        self.velocity = 0.0;
        self.last_update = self.start_time;
    }

    /// Advance the animation to `now`.
    ///
    /// Before `start_time` (stagger) this is a no-op. Once the full
    /// duration has elapsed the position snaps exactly to the target and
    /// the reel reports stopped; in between, eased interpolation.
    pub(crate) fn advance(&mut self, now: f64) {
        if !self.spinning {
            return;
        }
        let elapsed = now - self.start_time;
        if elapsed < 0.0 {
            return;
        }
        if elapsed >= self.duration {
            self.position = self.target as f64;
            self.spinning = false;
            self.velocity = 0.0;
            self.last_update = now;
            return;
        }

        let progress = elapsed / self.duration;
        let new_position = self.start_position + self.distance * ease_out_quart(progress);

        let dt_secs = (now - self.last_update) / 1000.0;
        if dt_secs > 0.0 {
            self.velocity = (new_position - self.position) / dt_secs;
        }
        self.position = new_position;
        self.last_update = now;
    }
}

/// The five reels of the active theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelBank {
    reels: Vec<ReelState>,
}

impl ReelBank {
    /// Build reels from a validated theme: each reel gets its own copy of
    /// the strip and a random integer start offset.
    pub(crate) fn from_theme(theme: &ThemeConfig, rng: &mut impl Rng) -> Self {
        let reels = theme
            .reel_strips
            .iter()
            .map(|strip| {
                let offset = rng.random_range(0..strip.len());
                ReelState::new(strip.clone(), offset)
            })
            .collect();
        Self { reels }
    }

    /// Read-only view of every reel.
    pub fn reels(&self) -> &[ReelState] {
        &self.reels
    }

    /// One reel by index.
    pub fn reel(&self, index: usize) -> Option<&ReelState> {
        self.reels.get(index)
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    /// True when no reel is animating.
    pub fn all_stopped(&self) -> bool {
        self.reels.iter().all(|r| !r.spinning)
    }

    pub(crate) fn reels_mut(&mut self) -> &mut [ReelState] {
        &mut self.reels
    }

    pub(crate) fn advance_all(&mut self, now: f64) {
        for reel in &mut self.reels {
            reel.advance(now);
        }
    }

    /// Read the visible window of every stopped reel.
    ///
    /// Row `r` of reel `i` is `strip[(target + r) mod len]` — the target is
    /// the top row. This is a pure read of fixed data at fixed indices;
    /// calling it twice on the same stopped bank yields the same grid. The
    /// engine only calls it once every reel reports stopped.
    pub(crate) fn extract_grid(&self) -> ResultGrid {
        let mut grid: ResultGrid = [[0; VISIBLE_ROWS]; REEL_COUNT];
        for (i, reel) in self.reels.iter().enumerate().take(REEL_COUNT) {
            for (row, cell) in grid[i].iter_mut().enumerate() {
                *cell = reel.symbol_at(reel.target + row);
            }
        }
        grid
    }
}
