//! Shortest-path search on a 2-D tile grid, with stepwise playback.
//!
//! A [`Grid`] of walkable and blocked tiles is snapshotted into a
//! [`GridGraph`], searched breadth-first by [`BfsPathfinder`], and the
//! reconstructed [`PathSequence`] is replayed one cell at a time through a
//! [`PlaybackCursor`]. [`Walker`] ties these together behind the boundary
//! API a frontend drives.

pub mod error;
pub mod find;
pub mod grid;
pub mod mapfile;
pub mod playback;
pub mod util;
pub mod walker;

pub use error::{MapError, WalkError};
pub use find::{BfsPathfinder, PathSequence};
pub use grid::{Grid, GridGraph, Point, Tile};
pub use playback::{PlaybackCursor, Step};
pub use walker::{Walker, DEFAULT_MOVE_DELAY_MS};
