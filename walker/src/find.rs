use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{GridGraph, Point};

/// The reconstructed route: cell coordinates from the step after start up
/// to the chosen end cell.
///
/// Materialized once by the search; traversing it never mutates anything,
/// so it can be walked any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSequence(Vec<Point>);

impl PathSequence {
    /// The first cell of the route, or `None` for an empty route.
    pub fn head(&self) -> Option<Point> {
        self.0.first().copied()
    }

    /// The cell following the first occurrence of `cell` on the route.
    pub fn next(&self, cell: Point) -> Option<Point> {
        let at = self.0.iter().position(|c| *c == cell)?;
        self.0.get(at + 1).copied()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied()
    }

    pub fn cells(&self) -> &[Point] {
        &self.0
    }
}

/// Breadth-first shortest path search over one [`GridGraph`] snapshot.
///
/// Each search owns a freshly allocated visited/parent arena addressed by
/// flat cell index, so search state always starts clean. `visited` is never
/// reset within a search and a cell gets a parent only on its first visit,
/// which keeps the parent entries a forest rooted at the start cell.
pub struct BfsPathfinder<'a> {
    graph: &'a GridGraph,
    visited: Vec<bool>,
    parent: Vec<Option<usize>>,
}

impl<'a> BfsPathfinder<'a> {
    pub fn new(graph: &'a GridGraph) -> Self {
        debug!("bfs: {}x{}", graph.rows(), graph.columns());
        let cells = graph.rows() * graph.columns();
        Self {
            graph,
            visited: vec![false; cells],
            parent: vec![None; cells],
        }
    }

    /// Runs the search and reconstructs the route from `start` to `target`.
    ///
    /// With `include_target` false the route ends one cell before the
    /// target. The returned sequence excludes the start cell; it is empty
    /// when the target is unreachable or equals the start.
    pub fn find_path(mut self, start: Point, target: Point, include_target: bool) -> PathSequence {
        self.visited[self.graph.index(start)] = true;

        let mut queue = VecDeque::new();
        queue.push_back(start);

        // No early exit at the target: the queue is drained and the parent
        // forest covers the whole reachable component.
        while let Some(cell) = queue.pop_front() {
            let cell_index = self.graph.index(cell);
            for neighbor in self.graph.neighbors(cell) {
                let index = self.graph.index(neighbor);
                if !self.visited[index] && self.graph.is_walkable(neighbor) {
                    self.visited[index] = true;
                    self.parent[index] = Some(cell_index);
                    queue.push_back(neighbor);
                }
            }
        }

        self.reconstruct(start, target, include_target)
    }

    fn reconstruct(&self, start: Point, target: Point, include_target: bool) -> PathSequence {
        if start == target || !self.visited[self.graph.index(target)] {
            return PathSequence::default();
        }

        let target_index = self.graph.index(target);
        let last = if include_target {
            Some(target_index)
        } else {
            self.parent[target_index]
        };

        let start_index = self.graph.index(start);
        let mut cells = Vec::new();
        let mut cursor = last;
        while let Some(index) = cursor {
            if index == start_index {
                break;
            }
            cells.push(self.graph.point(index));
            cursor = self.parent[index];
        }
        cells.reverse();

        debug!("path length: {}", cells.len());
        PathSequence(cells)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Grid;

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    fn find(
        grid: &Grid,
        start: (usize, usize),
        target: (usize, usize),
        include_target: bool,
    ) -> PathSequence {
        let graph = grid.graph();
        BfsPathfinder::new(&graph).find_path(
            p(start.0, start.1),
            p(target.0, target.1),
            include_target,
        )
    }

    fn enclosed_target_grid() -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.set_wall(p(1, 2));
        grid.set_wall(p(2, 1));
        grid.set_wall(p(2, 3));
        grid.set_wall(p(3, 2));
        grid
    }

    #[test]
    fn open_grid_route_follows_tie_break_order() {
        let grid = Grid::new(3, 3);

        let path = find(&grid, (0, 0), (2, 2), true);

        // right is explored before down, so the route runs along row 0 first
        assert_eq!(
            path.cells(),
            &[p(0, 1), p(0, 2), p(1, 2), p(2, 2)]
        );
    }

    #[test]
    fn walls_force_a_detour() {
        let mut grid = Grid::new(3, 3);
        grid.set_wall(p(1, 1));
        grid.set_wall(p(0, 1));

        let path = find(&grid, (0, 0), (2, 2), true);

        // down column 0, then along row 2
        assert_eq!(
            path.cells(),
            &[p(1, 0), p(2, 0), p(2, 1), p(2, 2)]
        );
    }

    #[test]
    fn start_equals_target_yields_empty_sequence() {
        let grid = Grid::new(3, 3);
        assert!(find(&grid, (1, 1), (1, 1), true).is_empty());
        assert!(find(&grid, (1, 1), (1, 1), false).is_empty());
    }

    #[test]
    fn enclosed_target_yields_empty_sequence() {
        let grid = enclosed_target_grid();
        assert!(find(&grid, (0, 0), (2, 2), true).is_empty());
        assert!(find(&grid, (0, 0), (2, 2), false).is_empty());
    }

    #[test]
    fn open_grid_path_length_is_manhattan_distance() {
        let grid = Grid::new(6, 9);

        for (start, target) in [((0, 0), (5, 8)), ((2, 7), (4, 1)), ((5, 0), (0, 3))] {
            let path = find(&grid, start, target, true);
            let manhattan = start.0.abs_diff(target.0) + start.1.abs_diff(target.1);
            assert_eq!(path.len(), manhattan);

            // every hop moves one unit along exactly one axis
            let mut previous = p(start.0, start.1);
            for cell in path.iter() {
                let dr = previous.row.abs_diff(cell.row);
                let dc = previous.col.abs_diff(cell.col);
                assert_eq!(dr + dc, 1);
                previous = cell;
            }
            assert_eq!(previous, p(target.0, target.1));
        }
    }

    #[test]
    fn excluding_target_drops_exactly_one_cell() {
        let mut grid = Grid::new(4, 4);
        grid.set_wall(p(1, 1));

        let with_target = find(&grid, (0, 0), (3, 3), true);
        let without_target = find(&grid, (0, 0), (3, 3), false);

        assert_eq!(without_target.len() + 1, with_target.len());
        assert_eq!(
            without_target.cells(),
            &with_target.cells()[..with_target.len() - 1]
        );
    }

    #[test]
    fn target_adjacent_to_start_excluded_yields_empty_sequence() {
        let grid = Grid::new(2, 2);
        assert!(find(&grid, (0, 0), (0, 1), false).is_empty());
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut grid = Grid::new(5, 5);
        grid.set_wall(p(2, 2));
        grid.set_wall(p(1, 3));

        let first = find(&grid, (0, 0), (4, 4), true);
        let second = find(&grid, (0, 0), (4, 4), true);

        assert_eq!(first, second);
    }

    #[test]
    fn sequence_traversal_is_idempotent() {
        let grid = Grid::new(3, 3);
        let path = find(&grid, (0, 0), (2, 2), true);

        let walk = |path: &PathSequence| {
            let mut cells = Vec::new();
            let mut cursor = path.head();
            while let Some(cell) = cursor {
                cells.push(cell);
                cursor = path.next(cell);
            }
            cells
        };

        let first = walk(&path);
        let second = walk(&path);
        assert_eq!(first, second);
        assert_eq!(first.len(), path.len());
    }

    #[test]
    fn head_and_next_follow_the_chain() {
        let grid = Grid::new(1, 4);
        let path = find(&grid, (0, 0), (0, 3), true);

        assert_eq!(path.head(), Some(p(0, 1)));
        assert_eq!(path.next(p(0, 1)), Some(p(0, 2)));
        assert_eq!(path.next(p(0, 3)), None);
        assert_eq!(path.next(p(0, 0)), None);
    }
}
