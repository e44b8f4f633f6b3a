use glam::Vec2;

use crate::viewport::Viewport;

/// Latest pointer location relative to the drawing surface's top-left corner
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerTracker {
    position: Vec2,
}

impl PointerTracker {
    /// Starts at the viewport center until the first move arrives
    pub fn centered(viewport: Viewport) -> Self {
        Self {
            position: viewport.center(),
        }
    }

    pub fn on_move(&mut self, client: Vec2, surface_origin: Vec2) {
        self.position = client - surface_origin;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}
