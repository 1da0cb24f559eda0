//! Errors and machine-readable output of the command-line tool.

use std::fmt;
use std::io;
use std::path::PathBuf;

use rasterpath_core::Point;
use rasterpath_image::LoadError;
use rasterpath_paths::{NoPath, Search};
use serde::Serialize;

/// Everything that stops a run before or after the search. A search that
/// finds no path is not an error.
#[derive(Debug)]
pub enum AppError {
    Load(LoadError),
    ReadConfig { path: PathBuf, source: io::Error },
    ParseConfig { path: PathBuf, source: serde_json::Error },
    Write { path: PathBuf, source: image::ImageError },
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Load(e) => write!(f, "{e}"),
            AppError::ReadConfig { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            AppError::ParseConfig { path, source } => {
                write!(f, "invalid mask settings in {}: {source}", path.display())
            }
            AppError::Write { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
            AppError::Io(e) => write!(f, "{e}"),
            AppError::Json(e) => write!(f, "cannot encode report: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Load(e) => Some(e),
            AppError::ReadConfig { source, .. } => Some(source),
            AppError::ParseConfig { source, .. } => Some(source),
            AppError::Write { source, .. } => Some(source),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        AppError::Load(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

/// JSON summary printed with `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub start: Point,
    pub goal: Point,
    pub threshold: u8,
    /// `"found"` or the reason no path exists.
    pub outcome: &'static str,
    pub path: Option<&'a [Point]>,
    pub cost: Option<f64>,
    pub trace: &'a [Point],
}

impl<'a> Report<'a> {
    pub fn new(start: Point, goal: Point, threshold: u8, search: &'a Search) -> Self {
        let path = search.path();
        Self {
            start,
            goal,
            threshold,
            outcome: outcome_name(search.no_path()),
            path: path.map(|p| p.cells()),
            cost: path.map(|p| p.cost()),
            trace: &search.trace,
        }
    }
}

fn outcome_name(no_path: Option<NoPath>) -> &'static str {
    match no_path {
        None => "found",
        Some(NoPath::OutOfBounds) => "out_of_bounds",
        Some(NoPath::UnwalkableEndpoint) => "unwalkable_endpoint",
        Some(NoPath::Unreachable) => "unreachable",
        Some(NoPath::BudgetExhausted) => "budget_exhausted",
    }
}
