//! A single falling, rotating, oscillating confetti quad

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;

use super::random_span;
use crate::palette::{self, ColorPair};
use crate::surface::Surface;

const ROTATION_SPEED_MIN: f32 = 800.0;
const ROTATION_SPEED_VARIANCE: f32 = 600.0;
const OSCILLATION_SPEED_MIN: f32 = 0.5;
const OSCILLATION_SPEED_VARIANCE: f32 = 1.5;
const X_VELOCITY: f32 = 40.0;
const Y_VELOCITY_MIN: f32 = 50.0;
const Y_VELOCITY_VARIANCE: f32 = 60.0;
const SIZE: f32 = 5.0;

/// One paper square. Created once per engine; when it falls past the bottom
/// of the container it re-enters at the top in a fresh column, keeping its
/// rotation and oscillation state.
#[derive(Debug, Clone)]
pub struct ConfettiPaper {
    pub position: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Cosine of the rotation, cached per update; drives the face flip and
    /// the vertical foreshortening of the quad
    pub cos_rotation: f32,
    pub oscillation_speed: f32,
    pub x_velocity: f32,
    pub y_velocity: f32,
    /// Oscillation phase accumulator
    pub time: f32,
    /// Unit corner offsets, fixed at construction: a random base angle plus
    /// i * 90 degrees + 45 degrees
    pub corners: [Vec2; 4],
    pub size: f32,
    pub colors: ColorPair,
}

impl ConfettiPaper {
    pub fn new(rng: &mut impl Rng, bounds: Vec2, palette: &[ColorPair]) -> Self {
        let position = Vec2::new(random_span(rng, bounds.x), random_span(rng, bounds.y));
        let angle = rng.random_range(0.0..TAU);
        let rotation = rng.random_range(0.0..TAU);
        let rotation_speed = rng.random_range(0.0..ROTATION_SPEED_VARIANCE) + ROTATION_SPEED_MIN;
        let oscillation_speed =
            rng.random_range(0.0..OSCILLATION_SPEED_VARIANCE) + OSCILLATION_SPEED_MIN;
        let y_velocity = rng.random_range(0.0..Y_VELOCITY_VARIANCE) + Y_VELOCITY_MIN;
        let time = rng.random_range(0.0..1.0);

        let corners = std::array::from_fn(|i| {
            let theta = angle + i as f32 * FRAC_PI_2 + FRAC_PI_4;
            Vec2::new(theta.cos(), theta.sin())
        });

        let colors = palette::random_pair(rng, palette);

        Self {
            position,
            rotation,
            rotation_speed,
            cos_rotation: 1.0,
            oscillation_speed,
            x_velocity: X_VELOCITY,
            y_velocity,
            time,
            corners,
            size: SIZE,
            colors,
        }
    }

    /// Advance one fixed timestep within `bounds` (container width/height)
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, bounds: Vec2) {
        self.time += dt;
        self.rotation += self.rotation_speed * dt;
        self.cos_rotation = self.rotation.to_radians().cos();

        self.position.x += (self.time * self.oscillation_speed).cos() * self.x_velocity * dt;
        self.position.y += self.y_velocity * dt;

        // Fell past the bottom: re-enter at the top in a fresh column
        if self.position.y > bounds.y {
            self.position.x = random_span(rng, bounds.x);
            self.position.y = 0.0;
        }
    }

    /// Paint the quad. The visible face follows the sign of the rotation's
    /// cosine; corner y-coordinates are compressed by it to fake the tumble.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = if self.cos_rotation > 0.0 {
            &self.colors.front
        } else {
            &self.colors.back
        };

        let quad = self.corners.map(|corner| {
            Vec2::new(
                self.position.x + corner.x * self.size,
                self.position.y + corner.y * self.size * self.cos_rotation,
            )
        });
        surface.fill_polygon(&quad, color);
    }
}
