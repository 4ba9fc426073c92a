//! Shared fakes for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::surface::{ContentBox, Surface};

/// Surface that records every call for assertions
pub struct RecordingSurface {
    pub backing: (u32, u32),
    pub layout: Option<ContentBox>,
    pub ratio: f32,
    pub ready: bool,
    pub clears: usize,
    pub polygons: Vec<(Vec<Vec2>, String)>,
    pub circles: Vec<(Vec2, f32, String)>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            backing: (width, height),
            layout: None,
            ratio: 1.0,
            ready: true,
            clears: 0,
            polygons: Vec::new(),
            circles: Vec::new(),
        }
    }

    pub fn shared(width: u32, height: u32) -> Rc<RefCell<RecordingSurface>> {
        Rc::new(RefCell::new(Self::new(width, height)))
    }

    pub fn shared_with_ratio(width: u32, height: u32, ratio: f32) -> Rc<RefCell<RecordingSurface>> {
        let mut surface = Self::new(width, height);
        surface.ratio = ratio;
        Rc::new(RefCell::new(surface))
    }
}

impl Surface for RecordingSurface {
    fn set_layout(&mut self, bounds: &ContentBox) {
        self.layout = Some(*bounds);
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn backing_size(&self) -> (f32, f32) {
        (self.backing.0 as f32, self.backing.1 as f32)
    }

    fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        self.polygons.push((points.to_vec(), color.to_string()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.circles.push((center, radius, color.to_string()));
    }
}
