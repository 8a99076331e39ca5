/// Terminal drawing surface backed by a character cell buffer
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::DrawSurface;

const BACKGROUND: char = ' ';
const STROKE: char = '#';

/// Canvas-style path drawing onto a grid of terminal cells.
///
/// `move_to`/`line_to` accumulate a path; `stroke` rasterizes its segments
/// with integer Bresenham into the cell buffer. `present` queues the buffer
/// as styled crossterm output; the caller positions the cursor and flushes.
pub struct TermSurface {
    width: usize,
    height: usize,
    cells: Vec<char>,
    path: Vec<[f32; 2]>,
    closed: bool,
}

impl TermSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BACKGROUND; width * height],
            path: Vec::new(),
            closed: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return; // off-screen cells are simply dropped
        }
        self.cells[y as usize * self.width + x as usize] = STROKE;
    }

    fn draw_segment(&mut self, from: [f32; 2], to: [f32; 2]) {
        let mut x0 = from[0].round() as i32;
        let mut y0 = from[1].round() as i32;
        let x1 = to[0].round() as i32;
        let y1 = to[1].round() as i32;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Queue the cell buffer as terminal output.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.cells[y * self.width + x];
                let color = if c == STROKE {
                    Color::Cyan
                } else {
                    Color::DarkGrey
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TermSurface {
    fn clear(&mut self) {
        self.cells.fill(BACKGROUND);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.clear();
        self.path.push([x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push([x, y]);
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn stroke(&mut self) {
        for i in 1..self.path.len() {
            let from = self.path[i - 1];
            let to = self.path[i];
            self.draw_segment(from, to);
        }
        if self.closed && self.path.len() > 2 {
            let from = self.path[self.path.len() - 1];
            let to = self.path[0];
            self.draw_segment(from, to);
        }
    }
}
