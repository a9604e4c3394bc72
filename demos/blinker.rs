use torus_life::camera::Camera;
use torus_life::engine::advance;
use torus_life::grid::Grid;

// Prints a few generations of a blinker and a glider, as plaintext and as braille
fn main() -> anyhow::Result<()> {
    let mut grid: Grid = "
        ..........
        .###......
        ..........
        ......#...
        .......#..
        .....###..
        ..........
        ..........
    "
    .parse()?;

    let mut cam = Camera::for_grid(&grid, 1);

    for generation in 0..4 {
        cam.reset();
        cam.draw_grid(&grid, 1);

        println!("generation {generation}, population {}", grid.population());
        println!("{grid}");
        println!("{}", cam.render());

        grid = advance(&grid);
    }

    Ok(())
}
