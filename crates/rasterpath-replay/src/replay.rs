//! Replay of a search: reveals the expansion trace, then the path.

use rasterpath_core::Point;
use rasterpath_paths::Search;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Playback speed settings. Speeds are cells revealed per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplayConfig {
    pub speed: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    /// Amount added or removed by `speed_more` / `speed_less`.
    pub speed_step: u32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: 10,
            min_speed: 1,
            max_speed: 200,
            speed_step: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where the playback is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Not started, or reset.
    Idle,
    /// Revealing expanded cells.
    Expand,
    /// Revealing the path.
    Path,
    /// Everything revealed.
    Done,
}

// ---------------------------------------------------------------------------
// ReplaySession
// ---------------------------------------------------------------------------

/// Step-driven playback of one search result.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    trace: Vec<Point>,
    path: Vec<Point>,
    phase: Phase,
    exp_index: usize,
    /// Index of the last revealed path cell, `None` before the first path step.
    path_index: Option<usize>,
    speed: u32,
    cfg: ReplayConfig,
}

impl ReplaySession {
    /// Create an idle replay of `trace` followed by `path`.
    pub fn new(cfg: ReplayConfig, trace: Vec<Point>, path: Vec<Point>) -> Self {
        let mut r = Self {
            trace,
            path,
            phase: Phase::Idle,
            exp_index: 0,
            path_index: None,
            speed: cfg.speed,
            cfg,
        };
        r.set_speed(cfg.speed);
        r
    }

    /// Create an idle replay of a search result. A search without a path
    /// replays its trace only.
    pub fn from_search(cfg: ReplayConfig, search: &Search) -> Self {
        let path = search.path().map(|p| p.cells().to_vec()).unwrap_or_default();
        Self::new(cfg, search.trace.clone(), path)
    }

    /// Begin playback from the first expanded cell.
    pub fn start(&mut self) {
        self.rewind();
        self.phase = Phase::Expand;
    }

    /// Stop and forget progress.
    pub fn reset(&mut self) {
        self.rewind();
        self.phase = Phase::Idle;
    }

    fn rewind(&mut self) {
        self.exp_index = 0;
        self.path_index = None;
    }

    /// Advance by one frame and return the new phase.
    ///
    /// In [`Phase::Expand`] up to `speed` more expanded cells are revealed;
    /// the step that reveals the last one switches to [`Phase::Path`]. In
    /// [`Phase::Path`] the path cursor moves `speed` cells forward and the
    /// step that reaches the goal switches to [`Phase::Done`]. Idle and done
    /// replays do not move.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Idle | Phase::Done => {}
            Phase::Expand => {
                self.exp_index = (self.exp_index + self.speed as usize).min(self.trace.len());
                if self.exp_index >= self.trace.len() {
                    self.phase = if self.path.is_empty() {
                        Phase::Done
                    } else {
                        Phase::Path
                    };
                }
            }
            Phase::Path => {
                let last = self.path.len() - 1;
                let next = (self.path_index.unwrap_or(0) + self.speed.max(1) as usize).min(last);
                self.path_index = Some(next);
                if next >= last {
                    self.phase = Phase::Done;
                }
            }
        }
        self.phase
    }

    /// Reveal everything.
    pub fn finish(&mut self) {
        self.exp_index = self.trace.len();
        self.path_index = self.path.len().checked_sub(1);
        self.phase = Phase::Done;
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether steps still change what is shown.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Expand | Phase::Path)
    }

    /// Expanded cells revealed so far, in expansion order.
    pub fn expanded(&self) -> &[Point] {
        &self.trace[..self.exp_index]
    }

    /// Path cells revealed so far, starting at the start.
    pub fn path(&self) -> &[Point] {
        match self.path_index {
            Some(i) => &self.path[..=i],
            None => &[],
        }
    }

    /// The traveller's position: the furthest revealed path cell.
    pub fn traveller(&self) -> Option<Point> {
        self.path_index.map(|i| self.path[i])
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    /// Cells revealed per step.
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Set the speed, clamped to the configured range.
    pub fn set_speed(&mut self, speed: u32) {
        let lo = self.cfg.min_speed.max(1);
        let hi = self.cfg.max_speed.max(lo);
        self.speed = speed.clamp(lo, hi);
    }

    pub fn speed_more(&mut self) {
        self.set_speed(self.speed.saturating_add(self.cfg.speed_step));
    }

    pub fn speed_less(&mut self) {
        self.set_speed(self.speed.saturating_sub(self.cfg.speed_step));
    }
}
