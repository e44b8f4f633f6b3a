use glam::Vec2;
use std::f32::consts::TAU;

use crate::palette::Color;
use crate::viewport::Viewport;

/// Segments used to approximate a disc
pub const CIRCLE_SEGMENTS: usize = 32;

/// Anything the particle field can paint onto
pub trait Surface {
    fn viewport(&self) -> Viewport;

    fn resize(&mut self, viewport: Viewport);

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Cover the whole surface with one opaque tone
    fn fill(&mut self, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color, opacity: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill(Color),
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        opacity: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        opacity: f32,
    },
}

/// Surface that records what was asked of it
#[derive(Clone, Debug, Default)]
pub struct CommandList {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    clears: usize,
    fills: usize,
}

impl CommandList {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Commands issued since the last clear, the clear itself included
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn fill_count(&self) -> usize {
        self.fills
    }
}

impl Surface for CommandList {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill(&mut self, color: Color) {
        self.fills += 1;
        self.commands.push(DrawCommand::Fill(color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color, opacity: f32) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            opacity,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            opacity,
        });
    }
}

/// GPU vertex: pixel-space position plus linear RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Surface that tessellates shapes into a triangle list for the renderer
#[derive(Clone, Debug, Default)]
pub struct ShapeBatch {
    viewport: Viewport,
    vertices: Vec<Vertex>,
}

impl ShapeBatch {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn push_fan(&mut self, center: Vec2, rim: impl Iterator<Item = Vec2> + Clone, color: [f32; 4]) {
        let next = rim.clone().cycle().skip(1);
        for (a, b) in rim.zip(next) {
            for p in [center, a, b] {
                self.vertices.push(Vertex {
                    position: p.to_array(),
                    color,
                });
            }
        }
    }
}

impl Surface for ShapeBatch {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill(&mut self, color: Color) {
        let size = self.viewport.size();
        let corners = [
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            size,
            Vec2::new(0.0, size.y),
        ];
        let color = color.to_linear(1.0);
        for i in [0, 1, 2, 0, 2, 3] {
            self.vertices.push(Vertex {
                position: corners[i].to_array(),
                color,
            });
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color, opacity: f32) {
        if points.len() < 3 {
            return;
        }
        let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
        self.push_fan(centroid, points.iter().copied(), color.to_linear(opacity));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        let rim = (0..CIRCLE_SEGMENTS).map(move |i| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        });
        self.push_fan(center, rim, color.to_linear(opacity));
    }
}
