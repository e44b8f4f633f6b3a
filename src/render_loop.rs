use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

use crate::palette::Palette;
use crate::particle_field::ParticleField;
use crate::pointer::PointerTracker;
use crate::surface::Surface;
use crate::viewport::is_mobile_width;

/// Asks the host for one more frame at the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl<F: Fn()> FrameScheduler for F {
    fn request_frame(&self) {
        self()
    }
}

/// Host facts read once when the backdrop starts
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Startup {
    pub reduced_motion: bool,
    pub logical_width: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Seeded and rescheduling itself every frame
    Running,
    /// Reduced motion: painted once, never ticks
    Static,
    Stopped,
}

/// Cancels a render loop from outside the frame callback
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Drives the particle field once per display refresh until stopped
pub struct RenderLoop {
    field: Option<ParticleField>,
    state: LoopState,
    frames: u64,
    stop: StopHandle,
}

impl RenderLoop {
    /// Seed and enter the running state, or paint the flat background once
    /// when reduced motion is requested
    pub fn start<S, R>(
        startup: Startup,
        palette: &Palette,
        surface: &mut S,
        pointer: &PointerTracker,
        rng: &mut R,
    ) -> Self
    where
        S: Surface + ?Sized,
        R: Rng,
    {
        if startup.reduced_motion {
            log::info!("Reduced motion requested; painting a static backdrop");
            surface.fill(palette.main_bg_blue);
            return Self {
                field: None,
                state: LoopState::Static,
                frames: 0,
                stop: StopHandle::default(),
            };
        }

        let is_mobile = is_mobile_width(startup.logical_width);
        let field = ParticleField::seed(
            surface.viewport(),
            pointer.position(),
            is_mobile,
            palette,
            rng,
        );
        log::info!(
            "Backdrop running ({} layout, {} particles)",
            if is_mobile { "mobile" } else { "desktop" },
            field.particles().len()
        );

        Self {
            field: Some(field),
            state: LoopState::Running,
            frames: 0,
            stop: StopHandle::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        if self.stop.is_stopped() {
            LoopState::Stopped
        } else {
            self.state
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Tick the field and schedule the next frame. Returns false when the
    /// loop is static or stopped, in which case nothing is drawn or scheduled.
    pub fn frame<S, F>(&mut self, surface: &mut S, pointer: &PointerTracker, scheduler: &F) -> bool
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.state() != LoopState::Running {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };

        field.tick(surface, pointer.position());
        self.frames += 1;
        log::trace!("Frame {} drawn", self.frames);

        scheduler.request_frame();
        true
    }

    /// Run at most `max_frames` frames back to back; returns how many were drawn
    pub fn run_for<S, F>(
        &mut self,
        max_frames: u64,
        surface: &mut S,
        pointer: &PointerTracker,
        scheduler: &F,
    ) -> u64
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let mut drawn = 0;
        while drawn < max_frames && self.frame(surface, pointer, scheduler) {
            drawn += 1;
        }
        drawn
    }
}
