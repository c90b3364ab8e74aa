use std::time::Duration;

use log::debug;

use crate::error::WalkError;
use crate::find::{BfsPathfinder, PathSequence};
use crate::grid::Grid;
use crate::playback::{PlaybackCursor, Step};

/// Default playback cadence in milliseconds.
pub const DEFAULT_MOVE_DELAY_MS: u64 = 100;

/// The boundary object a frontend drives: owns the grid, runs searches and
/// manages the single active playback.
#[derive(Debug)]
pub struct Walker {
    grid: Grid,
    path: Option<PathSequence>,
    cursor: Option<PlaybackCursor>,
    move_delay: Duration,
}

impl Walker {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            path: None,
            cursor: None,
            move_delay: Duration::from_millis(DEFAULT_MOVE_DELAY_MS),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The cadence an external scheduler should tick at. The core never
    /// sleeps on this itself.
    pub fn move_delay(&self) -> Duration {
        self.move_delay
    }

    /// Sets the playback delay in milliseconds. Zero is invalid input.
    pub fn set_move_delay(&mut self, ms: u64) -> Result<(), WalkError> {
        if ms == 0 {
            return Err(WalkError::InvalidDelay(ms));
        }
        debug!("move delay: {} ms", ms);
        self.move_delay = Duration::from_millis(ms);
        Ok(())
    }

    /// The last search result. `None` until a search has been requested;
    /// an empty sequence means the target was unreachable.
    pub fn path(&self) -> Option<&PathSequence> {
        self.path.as_ref()
    }

    /// Checks the endpoints, snapshots the grid and runs the search.
    ///
    /// An unreachable target is a stored empty sequence, not an error.
    pub fn find_path(&mut self, include_target: bool) -> Result<&PathSequence, WalkError> {
        let start = self.grid.start().ok_or(WalkError::MissingStart)?;
        let target = self.grid.target().ok_or(WalkError::MissingTarget)?;

        let graph = self.grid.graph();
        let path = BfsPathfinder::new(&graph).find_path(start, target, include_target);
        Ok(&*self.path.insert(path))
    }

    /// Starts playback of the stored path. A playback already in flight is
    /// cancelled first; the new one wins.
    pub fn play(&mut self) -> Result<(), WalkError> {
        let path = self.path.clone().ok_or(WalkError::NoPath)?;
        self.cursor = Some(PlaybackCursor::new(path, self.grid.start()));
        Ok(())
    }

    /// Cancels the active playback, if any.
    pub fn stop(&mut self) {
        self.cursor = None;
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// One externally scheduled playback tick. Returns `None` when no
    /// playback is active or the path is exhausted; the finished cursor is
    /// dropped so the driving timer can stop.
    pub fn tick(&mut self) -> Option<Step> {
        let step = self.cursor.as_mut()?.step();
        if step.is_none() {
            self.cursor = None;
        }
        step
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Point;

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    fn walker_3x3() -> Walker {
        let mut grid = Grid::new(3, 3);
        grid.set_start(p(0, 0));
        grid.set_target(p(2, 2));
        Walker::new(grid)
    }

    #[test]
    fn missing_endpoints_are_rejected_before_searching() {
        let mut walker = Walker::new(Grid::new(3, 3));
        assert_eq!(walker.find_path(true).unwrap_err(), WalkError::MissingStart);

        walker.grid_mut().set_start(p(0, 0));
        assert_eq!(
            walker.find_path(true).unwrap_err(),
            WalkError::MissingTarget
        );

        // no partial search state either way
        assert!(walker.path().is_none());
    }

    #[test]
    fn unreachable_target_is_distinguishable_from_no_search() {
        let mut grid = Grid::new(3, 3);
        grid.set_start(p(0, 0));
        grid.set_target(p(2, 2));
        grid.set_wall(p(1, 2));
        grid.set_wall(p(2, 1));

        let mut walker = Walker::new(grid);
        assert!(walker.path().is_none());

        walker.find_path(true).unwrap();
        assert!(walker.path().is_some_and(PathSequence::is_empty));
    }

    #[test]
    fn play_before_any_search_is_an_error() {
        let mut walker = walker_3x3();
        assert_eq!(walker.play().unwrap_err(), WalkError::NoPath);
    }

    #[test]
    fn ticks_drain_the_path_then_signal_completion() {
        let mut walker = walker_3x3();
        let len = walker.find_path(true).unwrap().len();
        walker.play().unwrap();

        let mut steps = Vec::new();
        while let Some(step) = walker.tick() {
            steps.push(step);
        }

        assert_eq!(steps.len(), len);
        // the first trail mark is the cell the walk began on
        assert_eq!(steps[0].trail, Some(p(0, 0)));
        assert!(!walker.is_playing());
    }

    #[test]
    fn starting_playback_again_replaces_the_active_cursor() {
        let mut walker = walker_3x3();
        walker.find_path(true).unwrap();

        walker.play().unwrap();
        let first = walker.tick().unwrap();
        walker.tick().unwrap();

        walker.play().unwrap();
        let restarted = walker.tick().unwrap();
        assert_eq!(restarted.position, first.position);
    }

    #[test]
    fn stop_cancels_playback() {
        let mut walker = walker_3x3();
        walker.find_path(true).unwrap();
        walker.play().unwrap();

        walker.stop();
        assert!(!walker.is_playing());
        assert_eq!(walker.tick(), None);
    }

    #[test]
    fn include_target_flag_reaches_the_search() {
        let mut walker = walker_3x3();
        let with_target = walker.find_path(true).unwrap().len();
        let without_target = walker.find_path(false).unwrap().len();
        assert_eq!(without_target + 1, with_target);
    }

    #[test]
    fn zero_delay_is_rejected() {
        let mut walker = walker_3x3();
        assert_eq!(
            walker.move_delay(),
            Duration::from_millis(DEFAULT_MOVE_DELAY_MS)
        );
        assert_eq!(
            walker.set_move_delay(0).unwrap_err(),
            WalkError::InvalidDelay(0)
        );

        walker.set_move_delay(250).unwrap();
        assert_eq!(walker.move_delay(), Duration::from_millis(250));
    }
}
