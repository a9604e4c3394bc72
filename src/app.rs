use std::time::Instant;

use tracing::debug;

use crate::CellOffset;
use crate::ScreenSize;
use crate::camera::Camera;
use crate::config::Config;
use crate::events::AppEvent;
use crate::events::Event;
use crate::events::PointerEvent;
use crate::events::RunEvent;
use crate::events::SeedEvent;
use crate::grid::GridError;
use crate::io::KEYS_HELP;
use crate::sim::Simulation;

/// Terminal rows above the grid taken up by the status bar
pub const HEADER_ROWS: ScreenSize = 2;

/// How much one key press moves the seed percentage
const SEED_STEP: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything the terminal front end needs between two frames
pub struct App {
    sim: Simulation,
    camera: Camera,
    cell_size: usize,

    /// Whether the left button is held, i.e. whether drags draw
    mouse_down: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let sim = Simulation::new(config)?;
        let cell_size = config.cell_size as usize;
        let camera = Camera::for_grid(sim.grid(), cell_size);

        Ok(Self {
            sim,
            camera,
            cell_size,
            mouse_down: false,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, GridError> {
        match event {
            Event::RunEvent(RunEvent::Start) => self.sim.start_run(),
            Event::RunEvent(RunEvent::Stop) => self.sim.stop_run(),
            Event::RunEvent(RunEvent::Toggle) => self.sim.toggle_run(),
            Event::RunEvent(RunEvent::Step) => self.sim.step(),
            Event::RunEvent(RunEvent::Reset) => {
                let randomize = self.sim.seeding().randomize;
                self.sim.reset(randomize)?;
            }

            Event::SeedEvent(SeedEvent::Increase) => self.sim.adjust_seed_percent(SEED_STEP),
            Event::SeedEvent(SeedEvent::Decrease) => self.sim.adjust_seed_percent(-SEED_STEP),
            Event::SeedEvent(SeedEvent::ToggleRandomize) => self.sim.toggle_randomize(),

            Event::PointerEvent(PointerEvent::Press { column, row }) => {
                self.mouse_down = true;
                self.pointer(column, row);
            }
            Event::PointerEvent(PointerEvent::Drag { column, row }) => {
                if self.mouse_down {
                    self.pointer(column, row);
                }
            }
            Event::PointerEvent(PointerEvent::Release) => self.mouse_down = false,

            Event::AppEvent(AppEvent::Resize { cols, rows }) => {
                debug!(cols, rows, "terminal resized");
            }
            Event::AppEvent(AppEvent::Exit) => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Activate every cell under a pointer position, if it's over the grid
    fn pointer(&mut self, column: ScreenSize, row: ScreenSize) {
        let Some(row) = row.checked_sub(HEADER_ROWS) else {
            return;
        };

        let (rows, columns) = Camera::grid_cells(column, row, self.cell_size);

        // clip to the grid, the pointer never wraps
        let grid = self.sim.grid();
        let rows = rows.start..rows.end.min(grid.rows() as CellOffset);
        let columns = columns.start..columns.end.min(grid.columns() as CellOffset);

        for i in rows {
            for j in columns.clone() {
                self.sim.activate_at(i, j);
            }
        }
    }

    /// Advance the simulation if it's running
    pub fn tick(&mut self) -> bool {
        self.sim.tick()
    }

    pub fn status(&self, now: Instant) -> String {
        let sim = &self.sim;
        let seeding = sim.seeding();

        format!(
            "{} | generation {} | {} gen/s | seed {}% {} | {} | population {}",
            if sim.is_running() { "Running" } else { "Stopped" },
            sim.generations(),
            sim.generations_per_second(now),
            seeding.percent,
            if seeding.randomize { "random" } else { "empty" },
            sim.engine().rules(),
            sim.grid().population(),
        )
    }

    /// The whole screen: status, key bindings, then the grid
    pub fn frame(&mut self, now: Instant) -> String {
        let status = self.status(now);

        self.camera.reset();
        self.camera.draw_grid(self.sim.grid(), self.cell_size);

        format!("{status}\n{KEYS_HELP}\n{}", self.camera.render())
    }
}

#[cfg(test)]
mod test {
    use std::time::Instant;

    use clap::Parser;

    use super::App;
    use super::Flow;
    use super::HEADER_ROWS;
    use crate::config::Config;
    use crate::events::AppEvent;
    use crate::events::Event;
    use crate::events::PointerEvent;
    use crate::events::RunEvent;
    use crate::events::SeedEvent;

    fn app(args: &[&str]) -> App {
        let mut argv = vec!["torus-life", "--rng-seed", "3"];
        argv.extend_from_slice(args);

        App::new(&Config::parse_from(argv)).unwrap()
    }

    fn press(column: u16, row: u16) -> Event {
        Event::PointerEvent(PointerEvent::Press { column, row })
    }

    fn drag(column: u16, row: u16) -> Event {
        Event::PointerEvent(PointerEvent::Drag { column, row })
    }

    #[test]
    fn drags_only_draw_while_pressed() {
        let mut app = app(&["--rows", "8", "--columns", "8", "--empty", "--brush", "single"]);

        app.handle(drag(0, HEADER_ROWS)).unwrap();
        assert_eq!(app.simulation().grid().population(), 0);

        // every character covers 4 rows and 2 columns of cells
        app.handle(press(0, HEADER_ROWS)).unwrap();
        assert_eq!(app.simulation().grid().population(), 8);

        app.handle(drag(1, HEADER_ROWS)).unwrap();
        app.handle(drag(2, HEADER_ROWS + 1)).unwrap();

        let grid = app.simulation().grid();
        assert_eq!(grid.population(), 24);
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(3, 3));
        assert!(grid.is_alive(7, 5));
        assert!(!grid.is_alive(4, 0));

        app.handle(Event::PointerEvent(PointerEvent::Release)).unwrap();
        app.handle(drag(3, HEADER_ROWS)).unwrap();
        assert_eq!(app.simulation().grid().population(), 24);
    }

    #[test]
    fn pointer_outside_the_grid_does_nothing() {
        let mut app = app(&["--rows", "8", "--columns", "8", "--empty"]);

        // status bar
        app.handle(press(0, 0)).unwrap();
        // right of the grid
        app.handle(drag(4, HEADER_ROWS)).unwrap();
        // below the grid
        app.handle(drag(0, HEADER_ROWS + 2)).unwrap();

        assert_eq!(app.simulation().grid().population(), 0);
    }

    #[test]
    fn pointer_is_clipped_at_the_edges() {
        // the last character row only has one grid row under it
        let mut app = app(&["--rows", "5", "--columns", "5", "--empty", "--brush", "single"]);

        app.handle(press(2, HEADER_ROWS + 1)).unwrap();

        let grid = app.simulation().grid();
        assert_eq!(grid.population(), 1);
        assert!(grid.is_alive(4, 4));
    }

    #[test]
    fn every_cell_is_reachable() {
        for cell_size in ["1", "2", "3", "5", "8"] {
            for brush in ["single", "square"] {
                let mut app = app(&[
                    "--rows", "13", "--columns", "11", "--empty", "--cell-size", cell_size,
                    "--brush", brush,
                ]);

                app.handle(press(0, 0)).unwrap();
                for row in HEADER_ROWS..HEADER_ROWS + 30 {
                    for column in 0..50 {
                        app.handle(drag(column, row)).unwrap();
                    }
                }

                assert_eq!(
                    app.simulation().grid().population(),
                    13 * 11,
                    "cell size {cell_size}, {brush} brush"
                );
            }
        }
    }

    #[test]
    fn every_cell_is_reachable_on_the_default_grid() {
        let mut app = app(&["--empty", "--brush", "single"]);

        app.handle(press(0, 0)).unwrap();
        for row in HEADER_ROWS..HEADER_ROWS + 25 {
            for column in 0..75 {
                app.handle(drag(column, row)).unwrap();
            }
        }

        assert_eq!(app.simulation().grid().population(), 100 * 150);
    }

    #[test]
    fn square_brush_by_default() {
        // large cells, so one character sits on a single cell
        let mut app = app(&["--rows", "8", "--columns", "8", "--empty", "--cell-size", "4"]);

        app.handle(press(3, HEADER_ROWS + 1)).unwrap();

        let grid = app.simulation().grid();
        assert_eq!(grid.population(), 4);
        for (i, j) in [(1, 1), (2, 1), (2, 2), (1, 2)] {
            assert!(grid.is_alive(i, j), "({i}, {j})");
        }
    }

    #[test]
    fn run_events() {
        let mut app = app(&["--rows", "8", "--columns", "8"]);

        app.handle(Event::RunEvent(RunEvent::Start)).unwrap();
        assert!(app.simulation().is_running());
        assert!(app.tick());

        app.handle(Event::RunEvent(RunEvent::Toggle)).unwrap();
        assert!(!app.simulation().is_running());
        assert!(!app.tick());

        app.handle(Event::RunEvent(RunEvent::Step)).unwrap();
        assert_eq!(app.simulation().generations(), 2);

        app.handle(Event::RunEvent(RunEvent::Stop)).unwrap();
        assert!(!app.simulation().is_running());
    }

    #[test]
    fn reset_follows_the_randomize_toggle() {
        let mut app = app(&["--rows", "10", "--columns", "10", "--seed-percent", "100"]);
        assert_eq!(app.simulation().grid().population(), 100);

        app.handle(Event::SeedEvent(SeedEvent::ToggleRandomize)).unwrap();
        app.handle(Event::RunEvent(RunEvent::Reset)).unwrap();
        assert_eq!(app.simulation().grid().population(), 0);

        app.handle(Event::SeedEvent(SeedEvent::ToggleRandomize)).unwrap();
        app.handle(Event::RunEvent(RunEvent::Reset)).unwrap();
        assert_eq!(app.simulation().grid().population(), 100);
    }

    #[test]
    fn seed_keys_move_in_steps() {
        let mut app = app(&["--seed-percent", "98"]);

        app.handle(Event::SeedEvent(SeedEvent::Increase)).unwrap();
        assert_eq!(app.simulation().seeding().percent, 100);

        app.handle(Event::SeedEvent(SeedEvent::Decrease)).unwrap();
        app.handle(Event::SeedEvent(SeedEvent::Decrease)).unwrap();
        assert_eq!(app.simulation().seeding().percent, 90);
    }

    #[test]
    fn exit() {
        let mut app = app(&[]);

        assert_eq!(
            app.handle(Event::AppEvent(AppEvent::Resize { cols: 80, rows: 24 })),
            Ok(Flow::Continue)
        );
        assert_eq!(app.handle(Event::AppEvent(AppEvent::Exit)), Ok(Flow::Exit));
    }

    #[test]
    fn frame_layout() {
        let mut app = app(&["--rows", "8", "--columns", "6", "--empty"]);

        let frame = app.frame(Instant::now());
        let lines: Vec<&str> = frame.lines().collect();

        // 2 header lines, then 8 rows of 4 dots each make 2 lines of 3 characters
        assert_eq!(lines.len(), HEADER_ROWS as usize + 2);
        assert!(lines[0].starts_with("Stopped | generation 0"));
        assert!(lines[2..].iter().all(|l| l.chars().count() == 3));
    }
}
