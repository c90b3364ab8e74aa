use crate::find::PathSequence;
use crate::grid::Point;

/// One playback tick: where the walker now stands and the cell it left
/// behind as a trail mark.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub position: Point,
    pub trail: Option<Point>,
}

/// Steps through a [`PathSequence`] one cell per external tick.
///
/// The cursor never blocks and never schedules anything itself; whatever
/// drives it (a timer, an event loop, a test) decides the cadence.
#[derive(Debug)]
pub struct PlaybackCursor {
    path: PathSequence,
    index: usize,
    previous: Option<Point>,
}

impl PlaybackCursor {
    /// `origin` seeds the first trail mark, so the cell the walk begins on
    /// is marked as soon as the walker leaves it.
    pub fn new(path: PathSequence, origin: Option<Point>) -> Self {
        Self {
            path,
            index: 0,
            previous: origin,
        }
    }

    /// Advances one cell. Returns `None` once the sequence is exhausted,
    /// signalling the driving loop to stop.
    pub fn step(&mut self) -> Option<Step> {
        let position = self.path.get(self.index)?;
        let step = Step {
            position,
            trail: self.previous,
        };
        self.previous = Some(position);
        self.index += 1;
        Some(step)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.path.len()
    }
}
