use super::canvas::{Canvas, DrawError};
use super::{Backdrop, background_color};
use crate::geometry::{Point, Rect, Viewport};
use palette::Srgba;

pub const GRID_SIZE: f64 = 40.0;
pub const TIME_STEP: f64 = 0.01;
pub const DOT_BASE_SIZE: f64 = GRID_SIZE * 0.3;
pub const TRAIL_ALPHA: f64 = 0.2;

/// A lattice of dots rippling with a wave shaped by the pointer and scroll progress.
pub struct DotGrid {
    viewport: Viewport,
    pointer: Point,
    scroll: f64,
    time: f64,
}

impl DotGrid {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: Point::new(0.5, 0.5),
            scroll: 0.0,
            time: 0.0,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        let rows = (self.viewport.height / GRID_SIZE).ceil().max(0.0) as usize + 1;
        let cols = (self.viewport.width / GRID_SIZE).ceil().max(0.0) as usize + 1;
        (rows, cols)
    }

    /// Wave value in `[-amplitude, amplitude]` for the dot at `(col, row)`.
    pub fn wave_at(&self, col: usize, row: usize) -> f64 {
        let center = Point::new(col as f64 * GRID_SIZE, row as f64 * GRID_SIZE);
        let distance = self.viewport.fraction_of(center).distance(self.pointer);

        let influence_x = (self.pointer.x - 0.5) * 2.0;
        let influence_y = (self.pointer.y - 0.5) * 2.0;

        let speed = 0.02 + self.scroll * 0.03;
        let frequency = 3.0 + influence_x * 2.0;
        let amplitude = 0.3 + influence_y * 0.2;

        (col as f64 * 0.2
            + row as f64 * 0.1
            + self.time * speed
            + distance * frequency
            + self.scroll * 5.0)
            .sin()
            * amplitude
    }

    #[cfg(test)]
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl Backdrop for DotGrid {
    fn step(&mut self) {
        self.time += TIME_STEP;
    }

    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), DrawError> {
        canvas.fill_rect(Rect::from_viewport(self.viewport), background_color(TRAIL_ALPHA))?;
        if self.viewport.is_empty() {
            return Ok(());
        }

        let (rows, cols) = self.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let wave = self.wave_at(col, row);
                let size = DOT_BASE_SIZE + DOT_BASE_SIZE * wave * 0.5;
                let opacity = (0.1 + wave * 0.15).clamp(0.0, 1.0);
                canvas.fill_circle(
                    Point::new(col as f64 * GRID_SIZE, row as f64 * GRID_SIZE),
                    size / 2.0,
                    Srgba::new(1.0, 1.0, 1.0, opacity),
                )?;
            }
        }
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn pointer_moved(&mut self, fraction: Point) {
        self.pointer = Point::new(fraction.x.clamp(0.0, 1.0), fraction.y.clamp(0.0, 1.0));
    }

    fn scrolled(&mut self, fraction: f64) {
        self.scroll = fraction.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::background::canvas::testing::{Op, RecordingCanvas};

    #[test]
    fn test_dimensions() {
        let grid = DotGrid::new(Viewport::new(800.0, 610.0));
        assert_eq!(grid.dimensions(), (17, 21));
    }

    #[test]
    fn test_renders_one_dot_per_cell_after_trail() {
        let grid = DotGrid::new(Viewport::new(80.0, 40.0));
        let mut canvas = RecordingCanvas::default();
        grid.render(&mut canvas).unwrap();

        assert!(matches!(canvas.ops[0], Op::FillRect(..)));
        assert_eq!(canvas.circles(), 2 * 3);
    }

    #[test]
    fn test_empty_viewport_only_fades() {
        let grid = DotGrid::new(Viewport::default());
        let mut canvas = RecordingCanvas::default();
        grid.render(&mut canvas).unwrap();
        assert_eq!(canvas.ops.len(), 1);
    }

    #[test]
    fn test_wave_bounded_by_amplitude() {
        let mut grid = DotGrid::new(Viewport::new(400.0, 300.0));
        grid.pointer_moved(Point::new(1.0, 1.0));
        grid.scrolled(0.7);
        for _ in 0..50 {
            grid.step();
        }
        let (rows, cols) = grid.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                assert!(grid.wave_at(col, row).abs() <= 0.5 + 1e-12);
            }
        }
    }

    #[test]
    fn test_pointer_changes_wave() {
        let mut grid = DotGrid::new(Viewport::new(400.0, 300.0));
        let before = grid.wave_at(3, 4);
        grid.pointer_moved(Point::new(0.1, 0.9));
        assert_ne!(before, grid.wave_at(3, 4));
    }

    #[test]
    fn test_time_advances_per_step() {
        let mut grid = DotGrid::new(Viewport::new(400.0, 300.0));
        grid.step();
        grid.step();
        assert!((grid.time() - 2.0 * TIME_STEP).abs() < 1e-12);
    }
}
