use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::CellOffset;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Invalid dimensions {rows}x{columns}, both must be positive")]
    InvalidDimension { rows: usize, columns: usize },

    #[error("Invalid seed probability {0}, expected a value in [0, 1]")]
    InvalidProbability(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseGridError {
    #[error("Empty grid")]
    Empty,

    #[error("Row {row} has {got} cells, expected {exp}")]
    RaggedRow { row: usize, exp: usize, got: usize },

    #[error("Unrecognized cell '{got}' at ({row}, {column})")]
    UnrecognizedCell { row: usize, column: usize, got: char },
}

/// A single position of the [`Grid`].
///
/// The position never changes once the grid is built, only `alive` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    i: usize,
    j: usize,
    pub alive: bool,
}

impl Cell {
    /// Row index
    pub fn i(&self) -> usize {
        self.i
    }

    /// Column index
    pub fn j(&self) -> usize {
        self.j
    }
}

/// A fixed size `rows x columns` grid whose edges wrap around onto each other, i.e. a torus.
///
/// Cells are stored row-major, so cell `(i, j)` lives at `i * columns + j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is dead
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimension { rows, columns });
        }

        let cells = (0..rows)
            .flat_map(|i| (0..columns).map(move |j| Cell { i, j, alive: false }))
            .collect();

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Create a grid where every cell is independently alive with probability `p`.
    ///
    /// `p = 0` never touches `rng` and always yields an empty grid.
    pub fn random<R: Rng>(
        rows: usize,
        columns: usize,
        p: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        // NaN fails this check too
        if !(0f64..=1f64).contains(&p) {
            return Err(GridError::InvalidProbability(p));
        }

        let mut grid = Self::new(rows, columns)?;

        if p > 0f64 {
            for cell in grid.cells.iter_mut() {
                cell.alive = rng.gen_bool(p);
            }
        }

        debug!(rows, columns, p, population = grid.population(), "seeded grid");

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Resolve any coordinate onto the torus.
    ///
    /// `-1` maps onto the last row (or column), and `rows` (or `columns`) maps back onto `0`.
    pub fn cell_at(&self, i: CellOffset, j: CellOffset) -> &Cell {
        &self.cells[self.index(i, j)]
    }

    pub fn is_alive(&self, i: CellOffset, j: CellOffset) -> bool {
        self.cell_at(i, j).alive
    }

    /// Bring the cell at `(i, j)` to life. Activating a live cell does nothing.
    pub fn activate(&mut self, i: CellOffset, j: CellOffset) {
        self.set(i, j, true);
    }

    pub fn set(&mut self, i: CellOffset, j: CellOffset, alive: bool) {
        let n = self.index(i, j);
        self.cells[n].alive = alive;
    }

    /// Visit every cell exactly once, row by row
    pub fn for_each_cell<F>(&self, f: F)
    where
        F: FnMut(&Cell),
    {
        self.cells.iter().for_each(f);
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    fn index(&self, i: CellOffset, j: CellOffset) -> usize {
        let i = wrap(i, self.rows);
        let j = wrap(j, self.columns);

        i * self.columns + j
    }
}

/// Wraps `n` into `[0, len)`. Works for any offset, not just a single step past either edge.
fn wrap(n: CellOffset, len: usize) -> usize {
    n.rem_euclid(len as CellOffset) as usize
}

/// Plaintext form, `#` for a live cell and `.` for a dead one
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                let c = if cell.alive { '#' } else { '.' };
                write!(f, "{c}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(ParseGridError::Empty);
        };

        let columns = first.chars().count();
        let mut grid = Grid::new(lines.len(), columns).map_err(|_| ParseGridError::Empty)?;

        for (row, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != columns {
                return Err(ParseGridError::RaggedRow {
                    row,
                    exp: columns,
                    got,
                });
            }

            for (column, c) in line.chars().enumerate() {
                let alive = match c {
                    '#' | 'O' | 'o' | '*' => true,
                    '.' => false,
                    got => {
                        return Err(ParseGridError::UnrecognizedCell { row, column, got });
                    }
                };

                grid.cells[row * columns + column].alive = alive;
            }
        }

        Ok(grid)
    }
}
