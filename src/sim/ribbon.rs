//! Flowing ribbon: a kinematic head dragging a chain of constrained point
//! masses
//!
//! The head moves on its own (oscillating drift plus constant fall). Every
//! other particle is pulled toward its predecessor by a force scaled from
//! the head's step distance, integrated freely, then snapped back to exact
//! spacing by a geometric correction pass (a hard constraint, not a spring).

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::point_mass::PointMass;
use super::random_span;
use crate::palette::{self, ColorPair};
use crate::surface::Surface;

const VELOCITY_INHERIT_MAX: f32 = 2.0;
const TIME_INITIAL_MAX: f32 = 10.0;
const OSCILLATION_SPEED_MIN: f32 = 1.5;
const OSCILLATION_SPEED_VARIANCE: f32 = 2.0;
const OSCILLATION_DISTANCE_MIN: f32 = 40.0;
const OSCILLATION_DISTANCE_VARIANCE: f32 = 40.0;
const Y_VELOCITY_MIN: f32 = 80.0;
const Y_VELOCITY_VARIANCE: f32 = 40.0;

/// Chain geometry shared by every ribbon in an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonGeometry {
    pub particle_count: usize,
    pub particle_mass: f32,
    pub particle_drag: f32,
    /// Exact spacing enforced between consecutive particles
    pub particle_distance: f32,
    /// Width of the drawn band
    pub thickness: f32,
    /// Direction of the band's far edge, radians
    pub angle: f32,
}

impl Default for RibbonGeometry {
    fn default() -> Self {
        Self {
            particle_count: 30,
            particle_mass: 1.0,
            particle_drag: 0.05,
            particle_distance: 8.0,
            thickness: 8.0,
            angle: FRAC_PI_4,
        }
    }
}

impl RibbonGeometry {
    /// Vertical extent of a fully stretched chain
    fn chain_extent(&self) -> f32 {
        self.particle_distance * self.particle_count as f32
    }
}

/// One ribbon. Fully reset (new head above the viewport, fresh colors and
/// phases, chain rebuilt) once the head has fallen a full chain extent past
/// the container bottom.
#[derive(Debug, Clone)]
pub struct ConfettiRibbon {
    pub head: Vec2,
    pub prev_head: Vec2,
    pub particles: Vec<PointMass>,
    pub colors: ColorPair,
    geometry: RibbonGeometry,
    /// Far-edge offset, fixed from geometry: (cos(angle), sin(angle)) * thickness
    edge_offset: Vec2,
    time: f32,
    oscillation_speed: f32,
    oscillation_distance: f32,
    velocity_inherit: f32,
    y_velocity: f32,
}

impl ConfettiRibbon {
    pub fn new(
        rng: &mut impl Rng,
        bounds: Vec2,
        palette: &[ColorPair],
        geometry: RibbonGeometry,
    ) -> Self {
        let edge_offset = Vec2::new(
            geometry.angle.cos() * geometry.thickness,
            geometry.angle.sin() * geometry.thickness,
        );
        let mut ribbon = Self {
            head: Vec2::ZERO,
            prev_head: Vec2::ZERO,
            particles: Vec::new(),
            colors: ColorPair::new("", ""),
            geometry,
            edge_offset,
            time: 0.0,
            oscillation_speed: 0.0,
            oscillation_distance: 0.0,
            velocity_inherit: 0.0,
            y_velocity: 0.0,
        };
        ribbon.reset(rng, bounds, palette);
        ribbon
    }

    /// Restart above the viewport: fresh head, colors, phases, and a chain
    /// rebuilt straight down from the head at exact spacing
    pub fn reset(&mut self, rng: &mut impl Rng, bounds: Vec2, palette: &[ColorPair]) {
        let head = Vec2::new(
            random_span(rng, bounds.x),
            -random_span(rng, bounds.y * 2.0),
        );
        self.head = head;
        self.prev_head = head;
        self.colors = palette::random_pair(rng, palette);

        self.time = rng.random_range(0.0..TIME_INITIAL_MAX);
        self.oscillation_speed =
            rng.random_range(0.0..OSCILLATION_SPEED_VARIANCE) + OSCILLATION_SPEED_MIN;
        self.oscillation_distance =
            rng.random_range(0.0..OSCILLATION_DISTANCE_VARIANCE) + OSCILLATION_DISTANCE_MIN;
        self.velocity_inherit = rng.random_range(0.0..VELOCITY_INHERIT_MAX);
        self.y_velocity = rng.random_range(0.0..Y_VELOCITY_VARIANCE) + Y_VELOCITY_MIN;

        self.particles = (0..self.geometry.particle_count)
            .map(|i| {
                PointMass::new(
                    Vec2::new(head.x, head.y - i as f32 * self.geometry.particle_distance),
                    self.geometry.particle_mass,
                    self.geometry.particle_drag,
                )
            })
            .collect();
    }

    /// Advance one fixed timestep: move the head kinematically, pull the
    /// chain after it, then enforce exact spacing.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, bounds: Vec2, palette: &[ColorPair]) {
        self.time += dt * self.oscillation_speed;
        self.head.x += self.time.cos() * self.oscillation_distance * dt;
        self.head.y += self.y_velocity * dt;

        let step = self.head.distance(self.prev_head);
        self.prev_head = self.head;

        if let Some(first) = self.particles.first_mut() {
            first.position = self.head;
        }

        // Each particle inherits the head's speed along the direction of its
        // predecessor
        let inherited = (step / dt) * self.velocity_inherit;
        for i in 1..self.particles.len() {
            let toward_previous =
                (self.particles[i - 1].position - self.particles[i].position).normalize_or_zero();
            self.particles[i].add_force(toward_previous * inherited);
        }

        for particle in self.particles.iter_mut().skip(1) {
            particle.integrate(dt);
        }

        // Correction pass: snap each particle to exact spacing along the
        // direction the integration left it in
        let spacing = self.geometry.particle_distance;
        for i in 1..self.particles.len() {
            let anchor = self.particles[i - 1].position;
            let direction = (self.particles[i].position - anchor).normalize_or_zero();
            self.particles[i].position = anchor + direction * spacing;
        }

        if self.head.y > bounds.y + self.geometry.chain_extent() {
            self.reset(rng, bounds, palette);
        }
    }

    /// Paint the band segment by segment. The face of each segment follows
    /// which side of it the far edge lies on; the first and last segments
    /// close the band with triangulated caps, interior segments are quads.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let segment_count = self.particles.len().saturating_sub(1);
        for i in 0..segment_count {
            let near = self.particles[i].position;
            let near_next = self.particles[i + 1].position;
            let far = near + self.edge_offset;
            let far_next = near_next + self.edge_offset;

            let color = if side_facing(near, near_next, far_next) < 0.0 {
                &self.colors.front
            } else {
                &self.colors.back
            };

            if i == 0 {
                let cap = (near_next + far_next) * 0.5;
                surface.fill_polygon(&[near, near_next, cap], color);
                surface.fill_polygon(&[far_next, far, cap], color);
            } else if i == segment_count - 1 {
                let cap = (near + far) * 0.5;
                surface.fill_polygon(&[near, near_next, cap], color);
                surface.fill_polygon(&[far_next, far, cap], color);
            } else {
                surface.fill_polygon(&[near, near_next, far_next, far], color);
            }
        }
    }
}

/// 2-D cross product of (a - b) and (c - b): the sign says which side of
/// segment ab the point c lies on
fn side_facing(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (a.x - b.x) * (c.y - b.y) - (a.y - b.y) * (c.x - b.x)
}
