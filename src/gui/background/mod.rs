use crate::config::{BackgroundConfig, BackgroundKind};
use crate::geometry::{Point, Viewport};
use palette::{Srgb, Srgba, WithAlpha};

pub mod animator;
pub mod canvas;
pub mod grid;
pub mod particles;
pub mod surface;

pub use animator::{Animator, Frame, Phase};
pub use canvas::{Canvas, DrawError};
pub use grid::DotGrid;
pub use particles::{Particle, ParticleField};
pub use surface::Backbuffer;

/// An ambient background animated one tick at a time.
pub trait Backdrop {
    fn step(&mut self);
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), DrawError>;
    fn resize(&mut self, viewport: Viewport);
    fn pointer_moved(&mut self, _fraction: Point) {}
    fn scrolled(&mut self, _fraction: f64) {}
}

pub fn from_config(config: &BackgroundConfig, viewport: Viewport) -> Box<dyn Backdrop> {
    match config.kind {
        BackgroundKind::Particles => Box::new(ParticleField::new(
            config.particles,
            viewport,
            config.seed,
        )),
        BackgroundKind::Grid => Box::new(DotGrid::new(viewport)),
    }
}

/// Slate 900.
pub fn background_color(alpha: f64) -> Srgba<f64> {
    Srgb::new(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0).with_alpha(alpha)
}

pub fn link_color() -> Srgb<f64> {
    Srgb::new(100.0 / 255.0, 120.0 / 255.0, 1.0)
}
