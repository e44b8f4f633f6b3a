use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

use crate::palette::Color;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Per-frame advance of the shared clock and the orbit angle
pub const TIME_STEP: f32 = 0.02;

const STAR_DRIFT: f32 = 0.6;
const STAR_OPACITY_BASE: f32 = 0.2;
const STAR_OPACITY_SWING: f32 = 0.1;
const REPEL_RADIUS: f32 = 50.0;
const REPEL_STRENGTH: f32 = 0.8;
const STAR_SPIKES: usize = 4;

const ORBIT_EASING: f32 = 0.08;
const PULSE_AMPLITUDE: f32 = 0.08;
const CIRCLE_OPACITY_BASE: f32 = 0.3;
const CIRCLE_OPACITY_SWING: f32 = 0.08;

/// Variant-specific motion state
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Motion {
    /// Drifting, twinkling speck pushed away by the pointer
    Star { velocity: Vec2 },
    /// Glowing orb orbiting the pointer
    Circle { orbit_radius: f32, phase_angle: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub opacity: f32,
    pub time: f32,
    pub motion: Motion,
}

impl Particle {
    pub fn star(position: Vec2, radius: f32, color: Color, velocity: Vec2) -> Self {
        Self {
            position,
            radius,
            color,
            opacity: 0.2,
            time: 0.0,
            motion: Motion::Star { velocity },
        }
    }

    pub fn circle(position: Vec2, radius: f32, color: Color, orbit_radius: f32) -> Self {
        Self {
            position,
            radius,
            color,
            opacity: 0.4,
            time: 0.0,
            motion: Motion::Circle {
                orbit_radius,
                phase_angle: 0.0,
            },
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self.motion, Motion::Star { .. })
    }

    /// Advance one frame against the current pointer and viewport
    pub fn update(&mut self, pointer: Vec2, viewport: Viewport) {
        self.time += TIME_STEP;
        let offset = pointer - self.position;
        let distance = offset.length();

        match &mut self.motion {
            Motion::Star { velocity } => {
                self.opacity = STAR_OPACITY_BASE + self.time.sin() * STAR_OPACITY_SWING;
                self.position += *velocity * STAR_DRIFT;

                // Direction is undefined when sitting exactly on the pointer
                if distance > 0.0 && distance < REPEL_RADIUS {
                    let force = (REPEL_RADIUS - distance) / REPEL_RADIUS;
                    self.position -= offset / distance * force * REPEL_STRENGTH;
                }
            }
            Motion::Circle {
                orbit_radius,
                phase_angle,
            } => {
                *phase_angle += TIME_STEP;
                let target = pointer + Vec2::new(phase_angle.cos(), phase_angle.sin()) * *orbit_radius;
                self.position += (target - self.position) * ORBIT_EASING;

                // Compounds frame over frame; there is no base radius to return to.
                self.radius *= 1.0 + self.time.sin() * PULSE_AMPLITUDE;
                self.opacity = CIRCLE_OPACITY_BASE + self.time.sin() * CIRCLE_OPACITY_SWING;
            }
        }

        self.wrap(viewport);
    }

    fn wrap(&mut self, viewport: Viewport) {
        let size = viewport.size();
        let r = self.radius;

        if self.position.x < -r {
            self.position.x = size.x + r;
        } else if self.position.x > size.x + r {
            self.position.x = -r;
        }

        if self.position.y < -r {
            self.position.y = size.y + r;
        } else if self.position.y > size.y + r {
            self.position.y = -r;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self.motion {
            Motion::Star { .. } => {
                let outline = star_outline(self.position, self.radius);
                surface.fill_polygon(&outline, self.color, self.opacity);
            }
            Motion::Circle { .. } => {
                surface.fill_circle(self.position, self.radius, self.color, self.opacity);
            }
        }
    }
}

/// Four-spike star: outer point straight up, then alternating inner/outer
/// vertices every 45 degrees, clockwise on a y-down surface
pub fn star_outline(center: Vec2, radius: f32) -> [Vec2; STAR_SPIKES * 2] {
    let inner = radius / 2.0;
    std::array::from_fn(|i| {
        let r = if i % 2 == 0 { radius } else { inner };
        let angle = i as f32 * FRAC_PI_4;
        center + Vec2::new(angle.sin(), -angle.cos()) * r
    })
}
