//! Picking session: image, mask settings, start/goal picks, last search.

use rasterpath_core::{Grid, MaskConfig, Point, build_mask};
use rasterpath_paths::{NoPath, Search, find_path};

use crate::replay::{ReplayConfig, ReplaySession};

/// What a call to [`Session::pick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Recorded as the start; a goal is needed next.
    Start,
    /// Recorded as the goal, and a search was run.
    Goal { found: bool },
    /// Ignored: a replay is running or both points are already picked.
    Ignored,
}

/// Interactive state for one image.
///
/// The mask is rebuilt whenever the mask settings change and right before
/// every search. A search runs when the second point is picked; if it finds
/// a path, a replay of it starts immediately.
#[derive(Debug, Clone)]
pub struct Session {
    gray: Grid<u8>,
    mask_cfg: MaskConfig,
    mask: Grid<bool>,
    picks: Vec<Point>,
    replay_cfg: ReplayConfig,
    search: Option<Search>,
    replay: Option<ReplaySession>,
}

impl Session {
    pub fn new(gray: Grid<u8>, mask_cfg: MaskConfig, replay_cfg: ReplayConfig) -> Self {
        let mask = build_mask(&gray, &mask_cfg);
        Self {
            gray,
            mask_cfg,
            mask,
            picks: Vec::with_capacity(2),
            replay_cfg,
            search: None,
            replay: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn gray(&self) -> &Grid<u8> {
        &self.gray
    }

    pub fn mask(&self) -> &Grid<bool> {
        &self.mask
    }

    pub fn mask_config(&self) -> MaskConfig {
        self.mask_cfg
    }

    /// Picked points, start first.
    pub fn picks(&self) -> &[Point] {
        &self.picks
    }

    pub fn start(&self) -> Option<Point> {
        self.picks.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.picks.get(1).copied()
    }

    /// The last search, kept until the picks or the results are cleared.
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Why the last search found nothing.
    pub fn no_path(&self) -> Option<NoPath> {
        self.search.as_ref().and_then(Search::no_path)
    }

    pub fn replay(&self) -> Option<&ReplaySession> {
        self.replay.as_ref()
    }

    /// Whether a replay is still revealing cells.
    pub fn is_running(&self) -> bool {
        self.replay.as_ref().is_some_and(ReplaySession::is_running)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Pick the next point. The second pick runs the search.
    pub fn pick(&mut self, p: Point) -> Pick {
        if self.is_running() || self.picks.len() >= 2 {
            return Pick::Ignored;
        }
        self.picks.push(p);
        if self.picks.len() == 1 {
            log::debug!("start picked at {p}");
            return Pick::Start;
        }
        Pick::Goal {
            found: self.compute(),
        }
    }

    /// Drop the most recent pick together with any results derived from it.
    pub fn undo(&mut self) -> Option<Point> {
        let p = self.picks.pop()?;
        log::debug!("pick at {p} undone");
        self.clear_results();
        Some(p)
    }

    /// Flip the mask polarity and rebuild the mask.
    pub fn toggle_invert(&mut self) {
        self.set_mask_config(self.mask_cfg.inverted());
    }

    /// Flip the mask polarity, rebuild the mask, and search again if both
    /// points are picked. Returns whether a path was found by the new search.
    pub fn toggle_invert_and_rerun(&mut self) -> Option<bool> {
        self.toggle_invert();
        if self.picks.len() < 2 {
            return None;
        }
        self.clear(true);
        Some(self.compute())
    }

    /// Replace the mask settings and rebuild the mask.
    pub fn set_mask_config(&mut self, cfg: MaskConfig) {
        self.mask_cfg = cfg;
        self.mask = build_mask(&self.gray, &self.mask_cfg);
    }

    /// Stop the replay and drop results; also drop the picks unless
    /// `keep_points`.
    pub fn clear(&mut self, keep_points: bool) {
        self.clear_results();
        if !keep_points {
            self.picks.clear();
        }
    }

    /// Advance the replay by one frame. No-op without a replay.
    pub fn step(&mut self) {
        if let Some(r) = self.replay.as_mut() {
            r.step();
        }
    }

    fn clear_results(&mut self) {
        self.search = None;
        self.replay = None;
    }

    /// Rebuild the mask and search between the two picks.
    fn compute(&mut self) -> bool {
        let (Some(start), Some(goal)) = (self.start(), self.goal()) else {
            return false;
        };
        self.mask = build_mask(&self.gray, &self.mask_cfg);
        let search = find_path(&self.mask, start, goal);
        let found = search.is_found();
        self.replay = found.then(|| {
            let mut replay = ReplaySession::from_search(self.replay_cfg, &search);
            replay.start();
            replay
        });
        self.search = Some(search);
        found
    }
}
