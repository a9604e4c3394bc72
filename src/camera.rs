use std::ops::Range;

use crate::CellOffset;
use crate::ScreenSize;
use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Width of a braille character, in dots
const DOTS_X: usize = 2;

/// Height of a braille character, in dots
const DOTS_Y: usize = 4;

pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the cell buffer, in dots
    w: usize,

    /// Height of the cell buffer, in dots
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        let cb = vec![false; w * h];

        // For each braille character, we need 3 bytes:
        //  - The leader byte:     0b11100010
        //  - Continuation byte 1: 0b101000xx
        //  - Continuation byte 2: 0b10xxxxxx
        // For each newline, we need one byte: 0b00001010
        //
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).

        let (bw, bh) = (w.div_ceil(DOTS_X), h.div_ceil(DOTS_Y));
        let cp = vec![BRAILLE_EMPTY; bw * bh];

        // Each braille character is 3 bytes, and newlines one byte. Since we need `bh` newlines,
        // this gives us a framebuffer of length `3 * (bw * bh) + bh`.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        let mut cam = Self { cb, fb, cp, w, h };
        cam.render();

        cam
    }

    /// A camera with exactly one dot square of side `cell_size` per cell of `grid`
    pub fn for_grid(grid: &Grid, cell_size: usize) -> Self {
        Self::new(grid.columns() * cell_size, grid.rows() * cell_size)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on a single pixel of the framebuffer
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Turns on a square grid of pixels in the framebuffer
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        assert!(x + s <= self.w, "x is out of bounds");
        assert!(y + s <= self.h, "y is out of bounds");

        for dx in 0..s {
            for dy in 0..s {
                let (x, y) = (x + dx, y + dy);

                let i = self.xy_from(x, y);
                self.cb[i] = true
            }
        }
    }

    /// Draw every live cell of `grid` as a `cell_size` square
    pub fn draw_grid(&mut self, grid: &Grid, cell_size: usize) {
        grid.for_each_cell(|cell| {
            if cell.alive {
                self.draw_square(cell.j() * cell_size, cell.i() * cell_size, cell_size);
            }
        });
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Fundamentally, we have a framebuffer of every pixel on our screen, and we ask ourselves "Is
    /// this pixel on or off?".
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(DOTS_X);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = (n % self.w, n / self.w);
                self.cp[(y / DOTS_Y) * bw + (x / DOTS_X)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint lives in U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    /// The grid rows and columns under the terminal character at `(column, row)`.
    ///
    /// A character covers 2x4 dots, so with small cells it spans several of them. Positions past
    /// the right or bottom edge of the grid map to ranges past the grid, it's up to the caller to
    /// clip those.
    pub fn grid_cells(
        column: ScreenSize,
        row: ScreenSize,
        cell_size: usize,
    ) -> (Range<CellOffset>, Range<CellOffset>) {
        let x = column as usize * DOTS_X;
        let y = row as usize * DOTS_Y;

        let rows = y / cell_size..(y + DOTS_Y).div_ceil(cell_size);
        let columns = x / cell_size..(x + DOTS_X).div_ceil(cell_size);

        (
            rows.start as CellOffset..rows.end as CellOffset,
            columns.start as CellOffset..columns.end as CellOffset,
        )
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
