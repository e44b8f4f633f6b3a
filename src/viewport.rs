use glam::Vec2;

/// Widths at or below this many logical pixels get the reduced particle count
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Logical (CSS-style) pixel dimensions of the drawing surface. Every
/// particle distance lives in this space, whatever the display density.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale a physical surface size down to logical pixels, never below 1x1
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let logical = |px: u32| ((px as f64 / scale).round() as u32).max(1);
        Self::new(logical(width), logical(height))
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

/// Map a physical window coordinate into the logical space particles live in
pub fn logical_point(physical: Vec2, scale_factor: f64) -> Vec2 {
    if scale_factor > 0.0 {
        physical / scale_factor as f32
    } else {
        physical
    }
}

pub fn is_mobile_width(logical_width: f64) -> bool {
    logical_width <= MOBILE_MAX_WIDTH
}
