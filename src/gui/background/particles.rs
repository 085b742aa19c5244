use super::canvas::{Canvas, DrawError};
use super::{Backdrop, background_color, link_color};
use crate::geometry::{Point, Rect, Viewport};
use palette::{FromColor, Hsl, Srgb, Srgba, WithAlpha, encoding};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MAX_PARTICLES: usize = 1000;
pub const MAX_SPEED: f64 = 1.5;
pub const DRIFT: f64 = 0.025;
pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_MAX_ALPHA: f64 = 0.2;
pub const LINK_WIDTH: f64 = 0.5;
pub const TRAIL_ALPHA: f64 = 0.2;

pub type ParticleColor = Hsl<encoding::Srgb, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub radius: f64,
    pub color: ParticleColor,
    pub alpha: f64,
}

impl Particle {
    /// A particle somewhere inside `viewport`, in the blue to purple range.
    pub fn random(rng: &mut impl Rng, viewport: Viewport) -> Self {
        Self {
            position: Point::new(
                rng.random::<f64>() * viewport.width.max(0.0),
                rng.random::<f64>() * viewport.height.max(0.0),
            ),
            velocity: Point::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)),
            radius: rng.random_range(2.0..7.0),
            color: ParticleColor::new(
                rng.random_range(220..280) as f64,
                rng.random_range(70..100) as f64 / 100.0,
                rng.random_range(40..60) as f64 / 100.0,
            ),
            alpha: rng.random_range(0.1..0.6),
        }
    }

    pub fn update(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        self.position.x = wrap(self.position.x + self.velocity.x, viewport.width);
        self.position.y = wrap(self.position.y + self.velocity.y, viewport.height);

        self.velocity.x =
            (self.velocity.x + rng.random_range(-DRIFT..DRIFT)).clamp(-MAX_SPEED, MAX_SPEED);
        self.velocity.y =
            (self.velocity.y + rng.random_range(-DRIFT..DRIFT)).clamp(-MAX_SPEED, MAX_SPEED);
    }

    pub fn rgba(&self) -> Srgba<f64> {
        Srgb::<f64>::from_color(self.color).with_alpha(self.alpha)
    }
}

/// Leaving one edge re-enters at the opposite one.
fn wrap(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Alpha of the line joining two particles `distance` apart.
pub fn link_opacity(distance: f64) -> f64 {
    if distance >= LINK_DISTANCE {
        return 0.0;
    }
    (1.0 - distance / LINK_DISTANCE) * LINK_MAX_ALPHA
}

pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(count: usize, viewport: Viewport, seed: Option<u64>) -> Self {
        if count > MAX_PARTICLES {
            log::warn!("{} particles requested, capping at {}", count, MAX_PARTICLES);
        }
        let mut rng = seed
            .map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_os_rng);
        let particles = (0..count.min(MAX_PARTICLES))
            .map(|_| Particle::random(&mut rng, viewport))
            .collect();

        Self {
            particles,
            viewport,
            rng,
        }
    }

    pub fn from_particles(particles: Vec<Particle>, viewport: Viewport, seed: u64) -> Self {
        Self {
            particles,
            viewport,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn draw_links(&self, canvas: &mut dyn Canvas) -> Result<(), DrawError> {
        // O(n²); the pool is capped at MAX_PARTICLES
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance < LINK_DISTANCE {
                    canvas.stroke_line(
                        a.position,
                        b.position,
                        LINK_WIDTH,
                        link_color().with_alpha(link_opacity(distance)),
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl Backdrop for ParticleField {
    fn step(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.update(viewport, &mut self.rng);
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), DrawError> {
        canvas.fill_rect(Rect::from_viewport(self.viewport), background_color(TRAIL_ALPHA))?;
        for particle in &self.particles {
            canvas.fill_circle(particle.position, particle.radius, particle.rgba())?;
        }
        self.draw_links(canvas)
    }

    fn resize(&mut self, viewport: Viewport) {
        // a field built before the window had a size has every particle at the origin
        if self.viewport.is_empty() && !viewport.is_empty() {
            for particle in &mut self.particles {
                particle.position = Point::new(
                    self.rng.random::<f64>() * viewport.width,
                    self.rng.random::<f64>() * viewport.height,
                );
            }
        }
        self.viewport = viewport;
    }
}
