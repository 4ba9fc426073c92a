//! Minimal pulsing-circle pattern
//!
//! The smallest useful pattern: one float of state, no physics. Kept as the
//! reference implementation of the contract.

use glam::Vec2;

use super::{Pattern, PatternFactory};
use crate::surface::SharedSurface;

const TIME_STEP: f32 = 0.05;
const COLOR: &str = "#000000";

pub struct ZoomCircle {
    surface: SharedSurface,
    time: f32,
}

impl ZoomCircle {
    pub fn new(surface: SharedSurface) -> Self {
        Self { surface, time: 0.0 }
    }

    /// Factory for `SurfaceManager::set_pattern`
    pub fn factory() -> PatternFactory {
        Box::new(|surface| Box::new(ZoomCircle::new(surface)))
    }
}

impl Pattern for ZoomCircle {
    fn render(&mut self) {
        let mut surface = self.surface.borrow_mut();
        if !surface.is_ready() {
            return;
        }
        let (width, height) = surface.backing_size();

        surface.clear();
        surface.fill_circle(
            Vec2::new(width / 2.0, height / 2.0),
            (width / 2.0) * self.time.cos().abs(),
            COLOR,
        );
        self.time += TIME_STEP;
    }
}
