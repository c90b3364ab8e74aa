//! The text map format: one line per row, `.` empty, `A` start, `B`
//! target, `W` wall. Parsing validates rectangularity, the tile alphabet
//! and marker uniqueness; I/O failures are propagated with the offending
//! path attached.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::MapError;
use crate::grid::{Grid, Point, Tile};

/// Parses a map from its text form.
pub fn parse(text: &str) -> Result<Grid, MapError> {
    let mut tiles: Vec<Vec<Tile>> = Vec::new();
    let mut start = None;
    let mut target = None;
    let mut width = None;

    for (row, line) in text.lines().enumerate() {
        let mut cells = Vec::with_capacity(line.len());
        for (col, c) in line.chars().enumerate() {
            let tile = Tile::from_char(c).ok_or(MapError::UnknownTile(c))?;
            match tile {
                Tile::Start => {
                    if start.is_some() {
                        return Err(MapError::DuplicateStart);
                    }
                    start = Some(Point { row, col });
                }
                Tile::Target => {
                    if target.is_some() {
                        return Err(MapError::DuplicateTarget);
                    }
                    target = Some(Point { row, col });
                }
                Tile::Empty | Tile::Wall => {}
            }
            cells.push(tile);
        }

        let expected = *width.get_or_insert(cells.len());
        if cells.len() != expected {
            return Err(MapError::RaggedRow {
                line: row + 1,
                expected,
                found: cells.len(),
            });
        }
        tiles.push(cells);
    }

    Ok(Grid::from_parts(tiles, start, target))
}

/// Renders a grid to its text form, one newline-terminated line per row.
pub fn serialize(grid: &Grid) -> String {
    grid.to_string()
}

/// Loads a map file.
pub fn load(path: &Path) -> Result<Grid, MapError> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse(&text)?;

    if let Some(start) = grid.start() {
        debug!("start: {}", start);
    }
    if let Some(target) = grid.target() {
        debug!("target: {}", target);
    }
    info!("{} loaded", path.display());

    Ok(grid)
}

/// Saves a map file, overwriting any existing content.
pub fn save(grid: &Grid, path: &Path) -> Result<(), MapError> {
    fs::write(path, serialize(grid)).map_err(|source| MapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("{} saved", path.display());
    Ok(())
}
