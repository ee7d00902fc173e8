//! # grid_route
//!
//! A grid-based shortest-path engine. Computes unweighted shortest routes
//! between two cells of a fixed-size 2-D grid with
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! over the 4-connected neighbourhood (no diagonals). Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! The engine owns the obstacle mask, the start/end cells and the last
//! computed path; a presentation layer drives it through discrete
//! [commands](Command) and reads the resulting state back for rendering.
mod bfs;

use grid_util::grid::{BoolGrid, Grid};
use log::info;
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bfs::bfs;
use core::fmt;

/// Notice a caller should surface when [find_shortest_path](GridPathEngine::find_shortest_path)
/// comes back with [SearchResult::NotFound].
pub const NO_PATH_NOTICE: &str = "There is no possible path to reach the end point.";

/// Error raised by engine mutations instead of corrupting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A cell index outside `[0, rows * cols)` was passed to a mutation.
    InvalidIndex { index: usize, len: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::InvalidIndex { index, len } => {
                write!(
                    f,
                    "cell index {} is out of range for a grid of {} cells",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Outcome of a shortest-path query. `NotFound` is a normal result, not an
/// error: the caller is expected to show [NO_PATH_NOTICE] (or similar) and
/// carry on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// A shortest path exists and has been stored on the engine.
    Found,
    /// The end cell is not reachable from the start cell; the stored path is
    /// empty.
    NotFound,
}

/// The discrete command vocabulary a presentation layer issues against the
/// engine, one interaction at a time. Selection-mode state ("what does the
/// next click mean") belongs to the caller; by the time a command is built,
/// that ambiguity is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleObstacle(usize),
    SetStart(usize),
    SetEnd(usize),
    RandomizeObstacles,
    Clear,
    FindShortestPath,
}

/// [GridPathEngine] maintains a fixed `rows × cols` grid in which cells are
/// addressed by linear index `row * cols + col`. Obstacles are kept as [bool]
/// values in a [BoolGrid] ([true] meaning impassable), components in a
/// [UnionFind] structure used to rule out unreachable queries cheaply.
///
/// Start and end cells can never be turned into obstacles through
/// [toggle_obstacle](Self::toggle_obstacle); moving an endpoint onto an
/// obstacle cell through [set_start](Self::set_start) or
/// [set_end](Self::set_end) is allowed and does not clear the obstacle.
///
/// The stored path is the raw backward parent walk: end-to-start order,
/// end inclusive, start exclusive. Render loops animating from start to end
/// must reverse it first.
#[derive(Clone, Debug)]
pub struct GridPathEngine {
    grid: BoolGrid,
    components: UnionFind<usize>,
    components_dirty: bool,
    start: usize,
    end: usize,
    path: Vec<usize>,
}

impl GridPathEngine {
    /// Creates an engine for a `rows × cols` grid with no obstacles, start in
    /// the top-left cell and end in the bottom-right cell.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> GridPathEngine {
        assert!(rows > 0 && cols > 0, "grid dimensions must be nonzero");
        GridPathEngine {
            grid: BoolGrid::new(cols, rows, false),
            // The fresh UnionFind has no unions yet, so the first query must
            // regenerate it.
            components: UnionFind::new(rows * cols),
            components_dirty: true,
            start: 0,
            end: rows * cols - 1,
            path: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.height()
    }
    pub fn cols(&self) -> usize {
        self.grid.width()
    }
    /// The total number of cells; all valid indices lie in `[0, len)`.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn index_in_bounds(&self, index: usize) -> bool {
        index < self.len()
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn end(&self) -> usize {
        self.end
    }
    /// The last computed path in end-to-start order, or empty if none has
    /// been computed, the last search failed, or [clear](Self::clear) ran.
    pub fn path(&self) -> &[usize] {
        &self.path
    }
    /// Whether `index` is an impassable cell. Out-of-range indices are not
    /// obstacles.
    pub fn is_obstacle(&self, index: usize) -> bool {
        self.index_in_bounds(index) && self.grid.get(index % self.cols(), index / self.cols())
    }
    /// Iterates over all obstacle indices in increasing order.
    pub fn obstacles(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&ix| self.is_obstacle(ix))
    }
    pub fn obstacle_count(&self) -> usize {
        self.obstacles().count()
    }

    fn check(&self, index: usize) -> Result<(), GridError> {
        if self.index_in_bounds(index) {
            Ok(())
        } else {
            Err(GridError::InvalidIndex {
                index,
                len: self.len(),
            })
        }
    }

    fn set_cell(&mut self, index: usize, blocked: bool) {
        let cols = self.cols();
        self.grid.set(index % cols, index / cols, blocked);
    }

    /// Marks `index` as an obstacle. A no-op on the start and end cells
    /// (endpoints can never become obstacles) and on cells that already are
    /// obstacles: obstacles only accumulate, matching the click behaviour of
    /// the original application. There is no removal counterpart short of
    /// [clear](Self::clear).
    ///
    /// Does not recompute the stored path; a stale path persists until the
    /// caller asks for a new search.
    pub fn toggle_obstacle(&mut self, index: usize) -> Result<(), GridError> {
        self.check(index)?;
        if index == self.start || index == self.end || self.is_obstacle(index) {
            return Ok(());
        }
        self.set_cell(index, true);
        self.components_dirty = true;
        Ok(())
    }

    /// Moves the start cell. The overwrite is unconditional: moving onto an
    /// obstacle cell is allowed and leaves the obstacle in place. Does not
    /// touch the stored path.
    pub fn set_start(&mut self, index: usize) -> Result<(), GridError> {
        self.check(index)?;
        self.start = index;
        Ok(())
    }

    /// Moves the end cell; same policy as [set_start](Self::set_start).
    pub fn set_end(&mut self, index: usize) -> Result<(), GridError> {
        self.check(index)?;
        self.end = index;
        Ok(())
    }

    /// Replaces all obstacles with `rows * cols / 5` cells drawn uniformly at
    /// random, never on the start or end cell. Uses the thread-local
    /// generator; see [randomize_obstacles_with](Self::randomize_obstacles_with)
    /// for seeded generation.
    pub fn randomize_obstacles(&mut self) {
        let density = self.len() / 5;
        self.randomize_obstacles_with(&mut rand::thread_rng(), density);
    }

    /// Replaces all obstacles with `density` distinct cells sampled uniformly
    /// without replacement from the non-endpoint cells. A `density` exceeding
    /// the number of available cells is capped rather than retried forever,
    /// yielding the maximum achievable obstacle count.
    ///
    /// Does not touch the stored path.
    pub fn randomize_obstacles_with<R: Rng>(&mut self, rng: &mut R, density: usize) {
        self.grid = BoolGrid::new(self.cols(), self.rows(), false);
        let candidates: Vec<usize> = (0..self.len())
            .filter(|&ix| ix != self.start && ix != self.end)
            .collect();
        let amount = density.min(candidates.len());
        for &ix in candidates.choose_multiple(rng, amount) {
            self.set_cell(ix, true);
        }
        self.components_dirty = true;
        info!("Randomized {} obstacles (requested {})", amount, density);
    }

    /// Empties the obstacle set and the stored path; start and end stay put.
    pub fn clear(&mut self) {
        self.grid = BoolGrid::new(self.cols(), self.rows(), false);
        self.path.clear();
        self.components_dirty = true;
    }

    /// In-bounds, non-obstacle neighbours of `index`, in up, down, left,
    /// right order. The order is a fixed tie-break: it decides which of
    /// several equally short paths a search returns.
    fn neighbours(&self, index: usize) -> Vec<usize> {
        let cols = self.cols();
        let row = index / cols;
        let col = index % cols;
        let mut neighbours = Vec::with_capacity(4);
        if row > 0 {
            neighbours.push(index - cols);
        }
        if row + 1 < self.rows() {
            neighbours.push(index + cols);
        }
        if col > 0 {
            neighbours.push(index - 1);
        }
        if col + 1 < cols {
            neighbours.push(index + 1);
        }
        neighbours.retain(|&ix| !self.is_obstacle(ix));
        neighbours
    }

    /// Retrieves the component id a given cell belongs to. Only free cells
    /// carry meaningful component ids.
    pub fn get_component(&self, index: usize) -> usize {
        self.components.find(index)
    }

    /// Checks if start and end are free cells on the same component. Callers
    /// must [update](Self::update) first for an answer that reflects recent
    /// mutations.
    pub fn reachable(&self) -> bool {
        !self.is_obstacle(self.start)
            && !self.is_obstacle(self.end)
            && self.components.equiv(self.start, self.end)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let cols = self.cols();
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for ix in 0..self.len() {
            if self.is_obstacle(ix) {
                continue;
            }
            // Right and down neighbours suffice to link the whole component.
            if ix % cols + 1 < cols && !self.is_obstacle(ix + 1) {
                self.components.union(ix, ix + 1);
            }
            if ix / cols + 1 < self.rows() && !self.is_obstacle(ix + cols) {
                self.components.union(ix, ix + cols);
            }
        }
    }

    /// Computes the shortest path from start to end with breadth-first search
    /// and stores it on the engine, wholesale. The path is in end-to-start
    /// order, end inclusive, start exclusive; a search with `start == end`
    /// succeeds with an empty path.
    ///
    /// When both endpoints are free cells in different components the search
    /// is skipped entirely, which avoids flooding grids that have no route at
    /// all. The answer is the same either way.
    pub fn find_shortest_path(&mut self) -> SearchResult {
        self.path.clear();
        if self.start == self.end {
            return SearchResult::Found;
        }
        self.update();
        if !self.is_obstacle(self.start) && !self.is_obstacle(self.end) && !self.reachable() {
            info!(
                "{} and {} are not on the same component",
                self.start, self.end
            );
            return SearchResult::NotFound;
        }
        let end = self.end;
        match bfs(&self.start, |&ix| self.neighbours(ix), |&ix| ix == end) {
            Some(path) => {
                self.path = path;
                SearchResult::Found
            }
            None => SearchResult::NotFound,
        }
    }

    /// Applies one presentation-layer command. Mutations yield `Ok(None)`;
    /// [Command::FindShortestPath] yields the search result.
    pub fn apply(&mut self, command: Command) -> Result<Option<SearchResult>, GridError> {
        match command {
            Command::ToggleObstacle(index) => self.toggle_obstacle(index).map(|()| None),
            Command::SetStart(index) => self.set_start(index).map(|()| None),
            Command::SetEnd(index) => self.set_end(index).map(|()| None),
            Command::RandomizeObstacles => {
                self.randomize_obstacles();
                Ok(None)
            }
            Command::Clear => {
                self.clear();
                Ok(None)
            }
            Command::FindShortestPath => Ok(Some(self.find_shortest_path())),
        }
    }
}

impl fmt::Display for GridPathEngine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let ix = row * self.cols() + col;
                if ix == self.start {
                    write!(f, "S")?;
                } else if ix == self.end {
                    write!(f, "E")?;
                } else if self.is_obstacle(ix) {
                    write!(f, "#")?;
                } else if self.path.contains(&ix) {
                    write!(f, "*")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
