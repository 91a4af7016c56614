//! Trace the outer boundary of a blocked region in an occupancy grid.
//!
//! An [`OccupancyGrid`](struct.OccupancyGrid.html) rasterizes a bounded
//! drawing surface into cells whose occupancy is sampled through an
//! injected containment probe (typically a collision query against the
//! drawn strokes). [`trace_hull`](struct.OccupancyGrid.html#method.trace_hull)
//! then walks the 8-connected boundary of the blocked region below a seed
//! point: a depth-first search over the compass neighbors that keeps to
//! cells with at least one free neighbor, backtracking when it runs into a
//! dead end, until it loops back to its start cell.
//!
//! The trace runs synchronously to completion on its (single-threaded)
//! trigger; guarding against re-entrant triggers is the caller's concern.

use crate::geom::euclid;
use crate::geom::{Box2D, Point};
use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Integer cell coordinate in an occupancy grid.
pub type CellCoord = euclid::default::Point2D<i32>;

/// The eight compass directions, in the fixed order the boundary walk
/// probes them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum MoveDirection {
    Left = 0,
    LeftUp = 1,
    Up = 2,
    RightUp = 3,
    Right = 4,
    RightDown = 5,
    Down = 6,
    LeftDown = 7,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 8] = [
        MoveDirection::Left,
        MoveDirection::LeftUp,
        MoveDirection::Up,
        MoveDirection::RightUp,
        MoveDirection::Right,
        MoveDirection::RightDown,
        MoveDirection::Down,
        MoveDirection::LeftDown,
    ];

    /// Cell offset of one step in this direction, y up.
    pub fn offset(self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::LeftUp => (-1, 1),
            MoveDirection::Up => (0, 1),
            MoveDirection::RightUp => (1, 1),
            MoveDirection::Right => (1, 0),
            MoveDirection::RightDown => (1, -1),
            MoveDirection::Down => (0, -1),
            MoveDirection::LeftDown => (-1, -1),
        }
    }

    pub fn opposite(self) -> MoveDirection {
        Self::ALL[(self as usize + 4) % 8]
    }
}

/// One cell of a traced hull: where it is and the direction the walk
/// entered it from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct HullPoint {
    pub cell: CellCoord,
    pub direction: MoveDirection,
}

/// How a hull trace ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TraceOutcome {
    /// The walk looped back to its start cell.
    Closed,
    /// The walk backtracked all the way out, or hit the iteration cap;
    /// the traced path is partial.
    Exhausted,
}

/// An ordered boundary trace.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct HullTrace {
    /// Visited boundary cells, in walk order. On a closed trace the first
    /// cell is the one the walk returned to.
    pub points: Vec<HullPoint>,
    pub outcome: TraceOutcome,
}

impl HullTrace {
    pub fn is_closed(&self) -> bool {
        self.outcome == TraceOutcome::Closed
    }
}

/// Error produced when a hull trace cannot start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HullTraceError {
    /// The seed point is outside the grid or in an occupied cell.
    InvalidSeed,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HullTraceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HullTraceError::InvalidSeed => {
                std::write!(f, "Invalid seed position")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HullTraceError {}

/// A boolean occupancy raster over a world-space rectangle.
///
/// The outermost ring of cells is always occupied, so every blocked region
/// reachable from the inside is bounded and every downward scan from a
/// free cell hits something.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    columns: usize,
    rows: usize,
    bounds: Box2D,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates a grid of `columns x rows` cells covering `bounds`, with the
    /// border cells marked occupied.
    pub fn new(columns: usize, rows: usize, bounds: Box2D) -> Self {
        assert!(columns >= 3 && rows >= 3);

        let mut grid = OccupancyGrid {
            columns,
            rows,
            bounds,
            cells: vec![false; columns * rows],
        };

        for x in 0..columns as i32 {
            grid.set_occupied(CellCoord::new(x, 0), true);
            grid.set_occupied(CellCoord::new(x, rows as i32 - 1), true);
        }
        for y in 0..rows as i32 {
            grid.set_occupied(CellCoord::new(0, y), true);
            grid.set_occupied(CellCoord::new(columns as i32 - 1, y), true);
        }

        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn bounds(&self) -> &Box2D {
        &self.bounds
    }

    fn cell_index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(CellCoord::new(x, y)));
        y as usize * self.columns + x as usize
    }

    fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.x >= 0 && (cell.x as usize) < self.columns && cell.y >= 0 && (cell.y as usize) < self.rows
    }

    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.cells[self.cell_index(cell.x, cell.y)]
    }

    pub fn set_occupied(&mut self, cell: CellCoord, occupied: bool) {
        let index = self.cell_index(cell.x, cell.y);
        self.cells[index] = occupied;
    }

    /// World-space size of one cell.
    pub fn cell_size(&self) -> (f32, f32) {
        (
            (self.bounds.max.x - self.bounds.min.x) / self.columns as f32,
            (self.bounds.max.y - self.bounds.min.y) / self.rows as f32,
        )
    }

    /// The cell containing a world-space position, if it is on the grid.
    pub fn cell_at(&self, position: Point) -> Option<CellCoord> {
        let (cell_width, cell_height) = self.cell_size();
        let cell = CellCoord::new(
            ((position.x - self.bounds.min.x) / cell_width).floor() as i32,
            ((position.y - self.bounds.min.y) / cell_height).floor() as i32,
        );

        if self.in_bounds(cell) {
            Some(cell)
        } else {
            None
        }
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, cell: CellCoord) -> Point {
        let (cell_width, cell_height) = self.cell_size();
        Point::new(
            self.bounds.min.x + (cell.x as f32 + 0.5) * cell_width,
            self.bounds.min.y + (cell.y as f32 + 0.5) * cell_height,
        )
    }

    /// Re-samples the occupancy of every interior cell through `probe`,
    /// called with the cell's world-space center. Border cells stay
    /// occupied.
    pub fn refresh(&mut self, probe: &mut dyn FnMut(Point) -> bool) {
        for x in 1..self.columns - 1 {
            for y in 1..self.rows - 1 {
                let center = self.cell_center(CellCoord::new(x as i32, y as i32));
                let index = self.cell_index(x as i32, y as i32);
                self.cells[index] = probe(center);
            }
        }
    }

    /// Number of free cells among a cell's 8 neighbors.
    fn free_neighbor_count(&self, cell: CellCoord) -> usize {
        let mut count = 0;
        for dir in MoveDirection::ALL.iter() {
            let (dx, dy) = dir.offset();
            let neighbor = CellCoord::new(cell.x + dx, cell.y + dy);
            if self.in_bounds(neighbor) && !self.is_occupied(neighbor) {
                count += 1;
            }
        }
        count
    }

    /// Traces the boundary of the blocked region below `seed`.
    ///
    /// The seed must be on the grid and in a free cell, otherwise the
    /// trace fails with [`HullTraceError::InvalidSeed`]. From the seed the
    /// search scans straight down to the first occupied cell, then walks
    /// depth-first along occupied cells that touch at least one free
    /// neighbor, probing the compass directions in a fixed order and never
    /// stepping straight back where it came from. Dead ends backtrack; a
    /// candidate matching the start cell closes the loop. An iteration cap
    /// equal to the grid's cell count bounds the walk.
    pub fn trace_hull(&self, seed: Point) -> Result<HullTrace, HullTraceError> {
        let seed_cell = self.cell_at(seed).ok_or(HullTraceError::InvalidSeed)?;
        if self.is_occupied(seed_cell) {
            return Err(HullTraceError::InvalidSeed);
        }

        // The bottom border guarantees the scan hits an occupied cell.
        let mut start_cell = seed_cell;
        for y in (0..=seed_cell.y).rev() {
            if self.is_occupied(CellCoord::new(seed_cell.x, y)) {
                start_cell = CellCoord::new(seed_cell.x, y);
                break;
            }
        }

        let start = HullPoint {
            cell: start_cell,
            direction: MoveDirection::Left,
        };

        let mut points = vec![start];
        let mut path = vec![start];
        let mut visited = vec![false; self.columns * self.rows];
        visited[self.cell_index(start_cell.x, start_cell.y)] = true;

        let mut current = start;
        let mut outcome = TraceOutcome::Exhausted;
        let cap = self.columns * self.rows;
        let mut traversed = 0;

        while traversed < cap {
            traversed += 1;

            let mut advanced = false;
            let mut closed = false;

            for &dir in MoveDirection::ALL.iter() {
                // Never step straight back where the walk came from.
                if dir == current.direction.opposite() {
                    continue;
                }

                let (dx, dy) = dir.offset();
                let next = CellCoord::new(current.cell.x + dx, current.cell.y + dy);

                if next == start.cell {
                    closed = true;
                    break;
                }
                if !self.in_bounds(next) || !self.is_occupied(next) {
                    continue;
                }
                // Cells buried in the solid interior are not boundary.
                if self.free_neighbor_count(next) == 0 {
                    continue;
                }
                if visited[self.cell_index(next.x, next.y)] {
                    log::warn!("duplicated hull cell at ({}, {})", next.x, next.y);
                    continue;
                }

                let point = HullPoint {
                    cell: next,
                    direction: dir,
                };
                points.push(point);
                path.push(point);
                visited[self.cell_index(next.x, next.y)] = true;
                current = point;
                advanced = true;
                break;
            }

            if closed {
                outcome = TraceOutcome::Closed;
                break;
            }

            if !advanced {
                path.pop();
                match path.last() {
                    Some(&top) => current = top,
                    None => {
                        log::warn!("hull search exhausted before closing the loop");
                        break;
                    }
                }
            }
        }

        log::debug!(
            "hull trace: {} cells, {} iterations, {:?}",
            points.len(),
            traversed,
            outcome
        );

        Ok(HullTrace { points, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    fn grid_8x8() -> OccupancyGrid {
        let _ = env_logger::builder().is_test(true).try_init();

        // One world unit per cell, origin at the grid's min corner.
        OccupancyGrid::new(
            8,
            8,
            Box2D::new(point(0.0, 0.0), point(8.0, 8.0)),
        )
    }

    #[test]
    fn border_cells_start_occupied() {
        let grid = grid_8x8();
        assert!(grid.is_occupied(CellCoord::new(0, 5)));
        assert!(grid.is_occupied(CellCoord::new(7, 2)));
        assert!(grid.is_occupied(CellCoord::new(3, 0)));
        assert!(grid.is_occupied(CellCoord::new(4, 7)));
        assert!(!grid.is_occupied(CellCoord::new(3, 3)));
    }

    #[test]
    fn refresh_samples_cell_centers() {
        let mut grid = grid_8x8();
        // Occupy everything within 1.6 units of (4.5, 4.5).
        let center = point(4.5, 4.5);
        grid.refresh(&mut |p| (p - center).length() < 1.6);

        assert!(grid.is_occupied(CellCoord::new(4, 4)));
        assert!(grid.is_occupied(CellCoord::new(5, 4)));
        assert!(!grid.is_occupied(CellCoord::new(1, 1)));
        // The border is not resampled.
        assert!(grid.is_occupied(CellCoord::new(0, 0)));
    }

    #[test]
    fn seed_must_be_free_and_in_bounds() {
        let grid = grid_8x8();
        assert_eq!(
            grid.trace_hull(point(-3.0, 2.0)),
            Err(HullTraceError::InvalidSeed)
        );
        // (0..1, 0..1) is a border cell.
        assert_eq!(
            grid.trace_hull(point(0.5, 0.5)),
            Err(HullTraceError::InvalidSeed)
        );
    }

    #[test]
    fn rectangular_ring_closes() {
        let mut grid = grid_8x8();
        // A 4x4 ring of occupied cells with a free 2x2 interior.
        for x in 2..=5 {
            for y in 2..=5 {
                if x == 2 || x == 5 || y == 2 || y == 5 {
                    grid.set_occupied(CellCoord::new(x, y), true);
                }
            }
        }

        // Seed inside the ring; the downward scan hits (3, 2).
        let trace = grid.trace_hull(point(3.5, 3.5)).unwrap();

        assert!(trace.is_closed());
        // The cycle visits every perimeter cell exactly once.
        assert_eq!(trace.points.len(), 12);
        assert_eq!(trace.points[0].cell, CellCoord::new(3, 2));

        for p in &trace.points {
            assert!(grid.is_occupied(p.cell));
            let on_ring = p.cell.x == 2 || p.cell.x == 5 || p.cell.y == 2 || p.cell.y == 5;
            assert!(on_ring, "walked off the ring at {:?}", p.cell);
        }
    }

    #[test]
    fn dead_end_exhausts_with_partial_path() {
        let mut grid = grid_8x8();
        // Two isolated occupied cells below the seed: a dead end, nothing
        // to loop around.
        grid.set_occupied(CellCoord::new(3, 4), true);
        grid.set_occupied(CellCoord::new(3, 3), true);

        let trace = grid.trace_hull(point(3.5, 5.5)).unwrap();

        assert_eq!(trace.outcome, TraceOutcome::Exhausted);
        assert_eq!(
            trace.points.iter().map(|p| p.cell).collect::<Vec<_>>(),
            vec![CellCoord::new(3, 4), CellCoord::new(3, 3)],
        );
    }

    #[test]
    fn opposite_directions() {
        assert_eq!(MoveDirection::Left.opposite(), MoveDirection::Right);
        assert_eq!(MoveDirection::LeftUp.opposite(), MoveDirection::RightDown);
        assert_eq!(MoveDirection::Down.opposite(), MoveDirection::Up);
        assert_eq!(MoveDirection::LeftDown.opposite(), MoveDirection::RightUp);
    }

    #[test]
    fn cell_lookup_round_trips() {
        let grid = grid_8x8();
        let cell = grid.cell_at(point(3.5, 6.2)).unwrap();
        assert_eq!(cell, CellCoord::new(3, 6));
        let center = grid.cell_center(cell);
        assert_eq!(grid.cell_at(center), Some(cell));
    }
}
