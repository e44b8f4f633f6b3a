// Library exports for WebAssembly and library usage
pub mod config;
pub mod contact_form;
pub mod palette;
pub mod particle;
pub mod particle_field;
pub mod pointer;
pub mod render_loop;
pub mod renderer;
pub mod surface;
pub mod viewport;

// Re-export main types
pub use config::Settings;
pub use contact_form::{ContactForm, FormClient, FormError};
pub use palette::{Color, Palette};
pub use particle::{Motion, Particle};
pub use particle_field::ParticleField;
pub use pointer::PointerTracker;
pub use render_loop::{FrameScheduler, LoopState, RenderLoop, Startup, StopHandle};
pub use renderer::Renderer;
pub use surface::{CommandList, DrawCommand, ShapeBatch, Surface};
pub use viewport::Viewport;
