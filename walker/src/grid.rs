use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::WalkError;

/// A cell coordinate on the grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.row, self.col)
    }
}

/// The tile kinds a grid cell can hold.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Start,
    Target,
    Wall,
}

impl Tile {
    /// The character form used by the map file format.
    pub fn as_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Start => 'A',
            Tile::Target => 'B',
            Tile::Wall => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            'A' => Some(Tile::Start),
            'B' => Some(Tile::Target),
            'W' => Some(Tile::Wall),
            _ => None,
        }
    }

    /// Display name for status reporting.
    pub fn name(self) -> &'static str {
        match self {
            Tile::Empty => "Empty",
            Tile::Start => "A",
            Tile::Target => "B",
            Tile::Wall => "Wall",
        }
    }

    /// A path may pass through every tile except walls.
    pub fn is_walkable(self) -> bool {
        self != Tile::Wall
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The editable tile grid.
///
/// Invariant: rectangular, every row has the same column count. The cached
/// start/target positions always agree with the tile matrix; the editing
/// operations keep them in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    tiles: Vec<Vec<Tile>>,
    start: Option<Point>,
    target: Option<Point>,
}

impl Grid {
    /// An all-empty grid with no start or target placed.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            tiles: vec![vec![Tile::Empty; columns]; rows],
            start: None,
            target: None,
        }
    }

    pub(crate) fn from_parts(
        tiles: Vec<Vec<Tile>>,
        start: Option<Point>,
        target: Option<Point>,
    ) -> Self {
        let rows = tiles.len();
        let columns = tiles.first().map_or(0, Vec::len);
        Self {
            rows,
            columns,
            tiles,
            start,
            target,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row < self.rows && p.col < self.columns
    }

    pub fn tile_at(&self, p: Point) -> Tile {
        self.tiles[p.row][p.col]
    }

    /// Clears every tile back to empty and forgets start/target.
    pub fn reset(&mut self) {
        self.tiles = vec![vec![Tile::Empty; self.columns]; self.rows];
        self.start = None;
        self.target = None;
    }

    /// Changes the grid dimensions, keeping the overlapping region and
    /// filling any growth with empty tiles. A start or target that falls
    /// outside the new bounds is cleared.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        let mut new_tiles = vec![vec![Tile::Empty; columns]; rows];

        for row in 0..self.rows.min(rows) {
            for col in 0..self.columns.min(columns) {
                new_tiles[row][col] = self.tiles[row][col];
            }
        }

        self.rows = rows;
        self.columns = columns;
        self.tiles = new_tiles;

        self.start = self.start.filter(|p| self.contains(*p));
        self.target = self.target.filter(|p| self.contains(*p));
    }

    /// Places the start marker. Only takes effect on an empty tile; the
    /// previous start tile (if any) reverts to empty.
    pub fn set_start(&mut self, p: Point) {
        if self.tile_at(p) == Tile::Empty {
            if let Some(old) = self.start {
                self.tiles[old.row][old.col] = Tile::Empty;
            }
            self.tiles[p.row][p.col] = Tile::Start;
            self.start = Some(p);
        }
    }

    /// Places the target marker. Only takes effect on an empty tile; the
    /// previous target tile (if any) reverts to empty.
    pub fn set_target(&mut self, p: Point) {
        if self.tile_at(p) == Tile::Empty {
            if let Some(old) = self.target {
                self.tiles[old.row][old.col] = Tile::Empty;
            }
            self.tiles[p.row][p.col] = Tile::Target;
            self.target = Some(p);
        }
    }

    /// Places a wall, unless the tile holds the start or target marker.
    pub fn set_wall(&mut self, p: Point) {
        let old = self.tile_at(p);
        if old != Tile::Start && old != Tile::Target {
            self.tiles[p.row][p.col] = Tile::Wall;
        }
    }

    /// Clears a tile to empty, unless it holds the start or target marker.
    pub fn set_empty(&mut self, p: Point) {
        let old = self.tile_at(p);
        if old != Tile::Start && old != Tile::Target {
            self.tiles[p.row][p.col] = Tile::Empty;
        }
    }

    /// Dispatches a paint gesture: 0 empty, 1 start, 2 target, 3 wall.
    /// Any other selector aborts the operation without touching the grid.
    pub fn paint(&mut self, p: Point, selector: usize) -> Result<(), WalkError> {
        debug!("paint {} with selector {}", p, selector);
        match selector {
            0 => self.set_empty(p),
            1 => self.set_start(p),
            2 => self.set_target(p),
            3 => self.set_wall(p),
            other => return Err(WalkError::InvalidTileSelector(other)),
        }
        Ok(())
    }

    /// Snapshots the walkability matrix into a fresh [`GridGraph`] for one
    /// search. Later grid edits do not affect the snapshot.
    pub fn graph(&self) -> GridGraph {
        let mut walkable = Vec::with_capacity(self.rows * self.columns);
        for row in &self.tiles {
            walkable.extend(row.iter().map(|tile| tile.is_walkable()));
        }
        GridGraph {
            rows: self.rows,
            columns: self.columns,
            walkable,
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.tiles {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Immutable walkability snapshot of a rectangular grid, row-major.
#[derive(Debug)]
pub struct GridGraph {
    rows: usize,
    columns: usize,
    walkable: Vec<bool>,
}

impl GridGraph {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_walkable(&self, p: Point) -> bool {
        self.walkable[self.index(p)]
    }

    pub(crate) fn index(&self, p: Point) -> usize {
        p.row * self.columns + p.col
    }

    pub(crate) fn point(&self, index: usize) -> Point {
        Point {
            row: index / self.columns,
            col: index % self.columns,
        }
    }

    /// Up to four in-bounds neighbors of `p`, always in up, right, down,
    /// left order. The order is the tie-break between equal-length paths.
    /// Out-of-bounds candidates are filtered, never an error.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> {
        let mut points = Vec::with_capacity(4);

        if p.row > 0 {
            points.push(Point {
                row: p.row - 1,
                col: p.col,
            });
        }
        if p.col + 1 < self.columns {
            points.push(Point {
                row: p.row,
                col: p.col + 1,
            });
        }
        if p.row + 1 < self.rows {
            points.push(Point {
                row: p.row + 1,
                col: p.col,
            });
        }
        if p.col > 0 {
            points.push(Point {
                row: p.row,
                col: p.col - 1,
            });
        }

        points.into_iter()
    }
}
