//! Surface lifecycle management
//!
//! Keeps the drawing surface sized and positioned to its container and owns
//! the create/start/stop lifecycle of the active pattern. Invariant: at most
//! one running pattern per surface, and the old one is always stopped before
//! the next starts or before final teardown.

use std::rc::Rc;

use super::{ContentBox, SharedSurface};
use crate::pattern::{FrameScheduler, PatternDriver, PatternFactory};

pub struct SurfaceManager {
    scheduler: Rc<dyn FrameScheduler>,
    surface: Option<SharedSurface>,
    factory: Option<PatternFactory>,
    active: Option<PatternDriver>,
    /// Bumped on every successful measurement; a new generation forces a
    /// pattern rebuild against the new dimensions
    generation: u64,
}

impl SurfaceManager {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            surface: None,
            factory: None,
            active: None,
            generation: 0,
        }
    }

    /// Adopt a drawing surface, restarting the active pattern on it
    pub fn attach(&mut self, surface: SharedSurface) {
        self.surface = Some(surface);
        self.rebuild();
    }

    /// Register the pattern factory, replacing any active pattern
    pub fn set_pattern(&mut self, factory: PatternFactory) {
        self.factory = Some(factory);
        self.rebuild();
    }

    /// The container's content box changed: re-apply layout and backing
    /// size, then restart the pattern against the new dimensions. No-op
    /// while no surface is attached.
    pub fn on_container_measured(&mut self, bounds: ContentBox) {
        let Some(surface) = &self.surface else {
            return;
        };

        {
            let mut surface = surface.borrow_mut();
            let ratio = surface.pixel_ratio();
            surface.set_layout(&bounds);
            // The ratio scales the whole measured dimension
            surface.set_backing_size(
                (bounds.width * ratio).round() as u32,
                (bounds.height * ratio).round() as u32,
            );
        }

        self.generation += 1;
        log::debug!(
            "surface measured {}x{} at ({}, {}), generation {}",
            bounds.width,
            bounds.height,
            bounds.left,
            bounds.top,
            self.generation
        );
        self.rebuild();
    }

    /// Stop the active pattern with no replacement
    pub fn detach(&mut self) {
        if let Some(active) = self.active.take() {
            active.stop();
        }
        self.surface = None;
    }

    /// Whether a pattern is currently running
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(PatternDriver::is_running)
    }

    /// Stop the old pattern, then build and start a fresh one for the
    /// current surface/factory pair
    fn rebuild(&mut self) {
        if let Some(active) = self.active.take() {
            active.stop();
        }

        let (Some(surface), Some(factory)) = (&self.surface, &self.factory) else {
            return;
        };

        let pattern = factory(surface.clone());
        let driver = PatternDriver::new(pattern, self.scheduler.clone());
        driver.start();
        self.active = Some(driver);
    }
}
