use super::canvas::{Canvas, DrawError};
use super::surface::Backbuffer;
use super::{Backdrop, background_color};
use crate::geometry::{Point, Viewport};
use cairo::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Stopped,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Drawn,
    /// Stepped, but there was nothing to draw on.
    Blank,
    /// Not running; nothing was touched.
    Halted,
}

/// Drives a [`Backdrop`] into an off-screen buffer once per tick.
///
/// `Stopped` is terminal: once the owning view is torn down the animator never draws again.
pub struct Animator {
    backdrop: Box<dyn Backdrop>,
    buffer: Option<Backbuffer>,
    viewport: Viewport,
    phase: Phase,
    frames: u64,
}

impl Animator {
    pub fn new(backdrop: Box<dyn Backdrop>, viewport: Viewport) -> Self {
        let mut animator = Self {
            backdrop,
            buffer: None,
            viewport: Viewport::default(),
            phase: Phase::Idle,
            frames: 0,
        };
        animator.resize(viewport);
        animator
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            log::debug!("Background stopped after {} frames", self.frames);
        }
        self.phase = Phase::Stopped;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Swaps in a new background, keeping the buffer and lifecycle.
    pub fn replace(&mut self, mut backdrop: Box<dyn Backdrop>) {
        backdrop.resize(self.viewport);
        self.backdrop = backdrop;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport && self.buffer.is_some() {
            return;
        }
        self.viewport = viewport;
        self.backdrop.resize(viewport);
        self.buffer = match Backbuffer::new(viewport) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                log::debug!("No background surface for {:?}: {}", viewport, e);
                None
            }
        };
    }

    pub fn pointer_moved(&mut self, fraction: Point) {
        self.backdrop.pointer_moved(fraction);
    }

    pub fn scrolled(&mut self, fraction: f64) {
        self.backdrop.scrolled(fraction);
    }

    /// Advances one tick into the off-screen buffer.
    pub fn tick(&mut self) -> Result<Frame, DrawError> {
        if !self.is_running() {
            return Ok(Frame::Halted);
        }
        self.backdrop.step();
        self.frames += 1;

        let Some(buffer) = &self.buffer else {
            return Ok(Frame::Blank);
        };
        let backdrop = &self.backdrop;
        buffer.draw(|canvas| backdrop.render(canvas))?;
        Ok(Frame::Drawn)
    }

    /// Advances one tick onto an arbitrary canvas.
    pub fn tick_on(&mut self, canvas: &mut dyn Canvas) -> Result<Frame, DrawError> {
        if !self.is_running() {
            return Ok(Frame::Halted);
        }
        self.backdrop.step();
        self.frames += 1;
        self.backdrop.render(canvas)?;
        Ok(Frame::Drawn)
    }

    /// Copies the accumulated frame onto the widget, or plain background when there is none.
    pub fn paint(&self, cr: &Context) -> Result<(), DrawError> {
        match &self.buffer {
            Some(buffer) => buffer.paint_onto(cr),
            None => {
                let mut cr = cr.clone();
                cr.clear(background_color(1.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::background::ParticleField;
    use crate::gui::background::canvas::testing::RecordingCanvas;

    fn field() -> Box<dyn Backdrop> {
        Box::new(ParticleField::new(10, Viewport::new(200.0, 100.0), Some(1)))
    }

    #[test]
    fn test_idle_until_started() {
        let mut animator = Animator::new(field(), Viewport::new(200.0, 100.0));
        let mut canvas = RecordingCanvas::default();
        assert_eq!(animator.tick_on(&mut canvas).unwrap(), Frame::Halted);
        assert!(canvas.ops.is_empty());

        animator.start();
        assert_eq!(animator.tick_on(&mut canvas).unwrap(), Frame::Drawn);
        assert_eq!(canvas.circles(), 10);
    }

    #[test]
    fn test_no_draw_after_stop() {
        let mut animator = Animator::new(field(), Viewport::new(200.0, 100.0));
        animator.start();
        assert_eq!(animator.tick().unwrap(), Frame::Drawn);
        animator.stop();

        let mut canvas = RecordingCanvas::default();
        for _ in 0..5 {
            assert_eq!(animator.tick_on(&mut canvas).unwrap(), Frame::Halted);
            assert_eq!(animator.tick().unwrap(), Frame::Halted);
        }
        assert!(canvas.ops.is_empty());
        assert_eq!(animator.frames(), 1);
    }

    #[test]
    fn test_stopped_cannot_restart() {
        let mut animator = Animator::new(field(), Viewport::new(200.0, 100.0));
        animator.stop();
        animator.start();
        assert_eq!(animator.phase(), Phase::Stopped);
    }

    #[test]
    fn test_missing_surface_is_silent() {
        let mut animator = Animator::new(field(), Viewport::default());
        animator.start();
        assert_eq!(animator.tick().unwrap(), Frame::Blank);

        animator.resize(Viewport::new(50.0, 50.0));
        assert_eq!(animator.tick().unwrap(), Frame::Drawn);
    }
}
