use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::CellOffset;
use crate::config::Config;
use crate::engine::Engine;
use crate::grid::Grid;
use crate::grid::GridError;

/// Which cells a single pointer position brings to life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Brush {
    /// Just the cell under the pointer
    Single,

    /// The cell under the pointer plus its right, lower and lower right neighbors
    #[default]
    Square,
}

impl Brush {
    /// Offsets from the pointed-at cell covered by the brush
    pub fn offsets(&self) -> &'static [(CellOffset, CellOffset)] {
        match self {
            Brush::Single => &[(0, 0)],
            Brush::Square => &[(0, 0), (1, 0), (1, 1), (0, 1)],
        }
    }
}

/// How fresh grids get populated on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeding {
    /// Chance of any one cell starting alive, in percent
    pub percent: u8,

    /// Whether a reset seeds the grid at all, or leaves it empty
    pub randomize: bool,
}

impl Seeding {
    pub fn probability(&self) -> f64 {
        self.percent as f64 / 100f64
    }
}

/// The whole state of a running simulation.
///
/// This owns the authoritative [`Grid`]. Everything else (the renderer, pointer input) only ever
/// sees it through [`Simulation::grid`] or asks for changes through the methods here.
pub struct Simulation {
    grid: Grid,

    /// Back buffer the next generation is written into, then swapped with `grid`
    back: Grid,

    engine: Engine,
    running: bool,
    generations: u64,

    /// When the current run started, `None` while stopped
    started_at: Option<Instant>,

    seeding: Seeding,
    brush: Brush,
    rng: ChaCha8Rng,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let seeding = Seeding {
            percent: config.seed_percent,
            randomize: !config.empty,
        };

        if seeding.percent > 100 {
            return Err(GridError::InvalidProbability(seeding.probability()));
        }

        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let back = Grid::new(config.rows, config.columns)?;

        let mut sim = Self {
            grid: back.clone(),
            back,
            engine: Engine::new(config.rule),
            running: false,
            generations: 0,
            started_at: None,
            seeding,
            brush: config.brush,
            rng,
        };

        if seeding.randomize {
            sim.grid = sim.fresh_grid(true)?;
        }

        debug!(
            rows = config.rows,
            columns = config.columns,
            rule = %config.rule,
            "created simulation"
        );

        Ok(sim)
    }

    /// Read view of the current generation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Start running. Starting again while running restarts the generations per second clock.
    pub fn start_run(&mut self) {
        self.running = true;
        self.started_at = Some(Instant::now());

        info!(generation = self.generations, "run started");
    }

    pub fn stop_run(&mut self) {
        if !self.running {
            return;
        }

        self.running = false;
        self.started_at = None;

        info!(generation = self.generations, "run stopped");
    }

    pub fn toggle_run(&mut self) {
        if self.running {
            self.stop_run();
        } else {
            self.start_run();
        }
    }

    /// Advance one generation if the simulation is running. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.advance();

        true
    }

    /// Advance exactly one generation, running or not
    pub fn step(&mut self) {
        self.advance();
    }

    fn advance(&mut self) {
        self.engine.advance_into(&self.grid, &mut self.back);
        std::mem::swap(&mut self.grid, &mut self.back);

        self.generations += 1;

        trace!(generation = self.generations, "tick");
    }

    /// Throw away the current grid and start over with one of the same size, either seeded with
    /// the current [`Seeding`] percentage or empty. This also stops the run.
    pub fn reset(&mut self, randomize: bool) -> Result<(), GridError> {
        self.grid = self.fresh_grid(randomize)?;

        self.running = false;
        self.started_at = None;
        self.generations = 0;

        info!(
            randomize,
            percent = self.seeding.percent,
            population = self.grid.population(),
            "reset"
        );

        Ok(())
    }

    fn fresh_grid(&mut self, randomize: bool) -> Result<Grid, GridError> {
        let (rows, columns) = (self.grid.rows(), self.grid.columns());

        if randomize {
            Grid::random(rows, columns, self.seeding.probability(), &mut self.rng)
        } else {
            Grid::new(rows, columns)
        }
    }

    /// Paint the brush onto the grid with its corner at `(i, j)`
    pub fn activate_at(&mut self, i: CellOffset, j: CellOffset) {
        for &(di, dj) in self.brush.offsets() {
            self.grid.activate(i + di, j + dj);
        }
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn set_seed_percent(&mut self, percent: u8) {
        self.seeding.percent = percent.min(100);

        debug!(percent = self.seeding.percent, "seed percentage changed");
    }

    pub fn adjust_seed_percent(&mut self, delta: i16) {
        let percent = (self.seeding.percent as i16 + delta).clamp(0, 100);
        self.set_seed_percent(percent as u8);
    }

    pub fn toggle_randomize(&mut self) {
        self.seeding.randomize = !self.seeding.randomize;

        debug!(randomize = self.seeding.randomize, "randomize on reset toggled");
    }

    /// Average generations per second since the run started, rounded down. `0` while stopped.
    pub fn generations_per_second(&self, now: Instant) -> u64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };

        let secs = now.saturating_duration_since(started_at).as_secs_f64();
        if secs <= 0f64 {
            return 0;
        }

        (self.generations as f64 / secs).floor() as u64
    }
}
