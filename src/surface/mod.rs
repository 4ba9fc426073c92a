//! Drawing-surface abstraction
//!
//! A `Surface` is the raster target a pattern paints each frame. The browser
//! implementation wraps an HTML canvas (`platform::web`); tests substitute
//! recording fakes. The `SurfaceManager` keeps the surface sized to its
//! container and owns the active pattern's lifecycle.

pub mod manager;

pub use manager::SurfaceManager;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

/// A container's measured content box, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub left: f32,
}

impl ContentBox {
    pub fn new(width: f32, height: f32, top: f32, left: f32) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }
}

/// The raster target patterns paint onto.
///
/// Layout calls come from the `SurfaceManager`; drawing calls come from the
/// running pattern mid-frame. Implementations treat drawing as a no-op when
/// the underlying context is unavailable.
pub trait Surface {
    /// Match the display size and position to the container's content box
    fn set_layout(&mut self, bounds: &ContentBox);

    /// Resize the backing pixel store
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Current backing pixel size
    fn backing_size(&self) -> (f32, f32);

    /// Device pixel ratio of the host display
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Whether the surface can accept drawing commands. Patterns skip the
    /// whole frame, simulation included, while this is false.
    fn is_ready(&self) -> bool {
        true
    }

    /// Clear the whole surface
    fn clear(&mut self);

    /// Fill a closed polygon with a CSS color
    fn fill_polygon(&mut self, points: &[Vec2], color: &str);

    /// Fill a circle with a CSS color
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
}

/// Shared handle to the active surface. The manager sizes it and the running
/// pattern draws to it, all within the same single-threaded frame.
pub type SharedSurface = Rc<RefCell<dyn Surface>>;
