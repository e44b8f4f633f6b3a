use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::palette::Palette;
use crate::particle::{Motion, Particle};
use crate::surface::Surface;
use crate::viewport::Viewport;

pub const DESKTOP_STARS: usize = 40;
pub const MOBILE_STARS: usize = 20;
pub const DESKTOP_CIRCLES: usize = 10;
pub const MOBILE_CIRCLES: usize = 5;

/// Owns every particle of one animated surface
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Seed stars scattered over the viewport and circles stacked on the pointer
    pub fn seed<R: Rng>(
        viewport: Viewport,
        pointer: Vec2,
        is_mobile: bool,
        palette: &Palette,
        rng: &mut R,
    ) -> Self {
        let mut field = Self::default();
        field.reseed(viewport, pointer, is_mobile, palette, rng);
        field
    }

    /// Replace the whole population
    pub fn reseed<R: Rng>(
        &mut self,
        viewport: Viewport,
        pointer: Vec2,
        is_mobile: bool,
        palette: &Palette,
        rng: &mut R,
    ) {
        let (stars, circles) = if is_mobile {
            (MOBILE_STARS, MOBILE_CIRCLES)
        } else {
            (DESKTOP_STARS, DESKTOP_CIRCLES)
        };
        let size = viewport.size();

        self.particles.clear();
        self.particles.reserve(stars + circles);

        for _ in 0..stars {
            let position = Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y);
            let radius = rng.gen::<f32>() * 0.8 + 0.2;
            let velocity = Vec2::new(
                (rng.gen::<f32>() - 0.5) * 0.15,
                (rng.gen::<f32>() - 0.5) * 0.15,
            );

            let mut star = Particle::star(position, radius, palette.soft_blue, velocity);
            star.opacity = rng.gen::<f32>() * 0.3 + 0.2;
            star.time = rng.gen::<f32>() * 100.0;
            self.particles.push(star);
        }

        for i in 0..circles {
            let radius = rng.gen::<f32>() * 4.0 + 1.5;
            let color = if i % 2 == 0 {
                palette.accent_blue
            } else {
                palette.cyan
            };
            let orbit_radius = rng.gen::<f32>() * 50.0 + 20.0;

            let mut orb = Particle::circle(pointer, radius, color, orbit_radius);
            orb.motion = Motion::Circle {
                orbit_radius,
                phase_angle: rng.gen::<f32>() * TAU,
            };
            orb.time = rng.gen::<f32>() * 100.0;
            self.particles.push(orb);
        }

        log::info!("Seeded {} stars and {} circles", stars, circles);
    }

    /// Clear the surface, then update and draw every particle in insertion order
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, pointer: Vec2) {
        surface.clear();
        let viewport = surface.viewport();

        for particle in &mut self.particles {
            particle.update(pointer, viewport);
            particle.draw(surface);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn star_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_star()).count()
    }

    pub fn circle_count(&self) -> usize {
        self.particles.len() - self.star_count()
    }
}
