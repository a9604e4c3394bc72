use tracing::trace;

use crate::CellOffset;
use crate::grid::Grid;
use crate::rule_set::RuleSet;

/// Offsets of the eight cells surrounding `(0, 0)`
const NEIGHBORS: [(CellOffset, CellOffset); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of live cells among the eight neighbors of `(i, j)`, wrapping around the edges.
///
/// Any coordinate works, it's brought onto the grid before the offsets are added.
pub fn count_live_neighbors(grid: &Grid, i: CellOffset, j: CellOffset) -> u8 {
    let i = i.rem_euclid(grid.rows() as CellOffset);
    let j = j.rem_euclid(grid.columns() as CellOffset);

    NEIGHBORS
        .iter()
        .filter(|&&(di, dj)| grid.is_alive(i + di, j + dj))
        .count() as u8
}

/// Compute the next generation of `grid` under Conway's rules.
pub fn advance(grid: &Grid) -> Grid {
    Engine::default().advance(grid)
}

/// Applies a [`RuleSet`] to every cell of a [`Grid`] at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    rules: RuleSet,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Snapshot-and-rebuild: the returned grid is the next generation, `grid` is left untouched.
    pub fn advance(&self, grid: &Grid) -> Grid {
        let mut next = grid.clone();
        self.advance_into(grid, &mut next);

        next
    }

    /// Write the next generation of `current` into `next`.
    ///
    /// Every neighbor count is read from `current`, so no cell ever sees a neighbor that has
    /// already moved on to the next generation. Both grids must have the same dimensions.
    pub fn advance_into(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(
            (current.rows(), current.columns()),
            (next.rows(), next.columns()),
            "double buffers must share dimensions"
        );

        for cell in current.cells() {
            let (i, j) = (cell.i() as CellOffset, cell.j() as CellOffset);
            let n = count_live_neighbors(current, i, j);

            next.set(i, j, self.rules.next(cell.alive, n));
        }

        trace!(population = next.population(), "advanced");
    }
}
