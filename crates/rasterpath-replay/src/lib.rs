//! Presentation state for rasterpath, without any presentation.
//!
//! [`ReplaySession`] plays back one search: first the expansion trace, then
//! the path, a configurable number of cells per [`step`](ReplaySession::step).
//! [`Session`] owns an image's intensities, the mask settings, the picked
//! start and goal, and the replay of the last search. Front ends drive both
//! through explicit method calls and render whatever the accessors expose.

mod replay;
mod session;

pub use replay::{Phase, ReplayConfig, ReplaySession};
pub use session::{Pick, Session};
