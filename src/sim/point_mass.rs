//! Euler-integrated point mass with an accumulate-then-clear force buffer

use glam::Vec2;

/// A physics body advanced by explicit Euler integration.
///
/// Forces accumulate between steps in any order and count; `integrate`
/// consumes the buffer and resets it to zero. `mass` must be positive and
/// `drag` non-negative; violating either propagates NaN rather than
/// returning an error.
#[derive(Debug, Clone)]
pub struct PointMass {
    pub position: Vec2,
    pub velocity: Vec2,
    force: Vec2,
    mass: f32,
    drag: f32,
}

impl PointMass {
    pub fn new(position: Vec2, mass: f32, drag: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass,
            drag,
        }
    }

    /// Accumulate a force for the next integration step
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Forces accumulated since the last integration step
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Net force after the speed-proportional drag term
    fn current_force(&self) -> Vec2 {
        let speed = self.velocity.length();
        self.force - self.velocity * (self.drag * self.mass * speed)
    }

    /// Advance one step and clear the force buffer. Call at most once per
    /// simulation step.
    pub fn integrate(&mut self, dt: f32) {
        let acceleration = self.current_force() / self.mass;
        self.position += self.velocity * dt;
        self.velocity += acceleration * dt;
        self.force = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn integrate_clears_force_buffer() {
        let mut mass = PointMass::new(Vec2::ZERO, 1.0, 0.05);
        mass.add_force(Vec2::new(3.0, -2.0));
        mass.add_force(Vec2::new(-1.0, 5.0));
        mass.integrate(0.02);
        assert_eq!(mass.force(), Vec2::ZERO);
    }

    #[test]
    fn forces_accumulate_before_integration() {
        let mut mass = PointMass::new(Vec2::ZERO, 2.0, 0.0);
        mass.add_force(Vec2::new(1.0, 0.0));
        mass.add_force(Vec2::new(1.0, 0.0));
        assert_eq!(mass.force(), Vec2::new(2.0, 0.0));

        mass.integrate(1.0);
        // a = F/m = 1, applied over dt = 1
        assert!((mass.velocity.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn position_advances_with_pre_step_velocity() {
        let mut mass = PointMass::new(Vec2::ZERO, 1.0, 0.0);
        mass.velocity = Vec2::new(10.0, 0.0);
        mass.add_force(Vec2::new(0.0, 100.0));
        mass.integrate(0.1);
        // The position update uses the velocity from before this step
        assert!((mass.position.x - 1.0).abs() < 1e-6);
        assert!(mass.position.y.abs() < 1e-6);
        assert!((mass.velocity.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn drag_opposes_motion() {
        let mut mass = PointMass::new(Vec2::ZERO, 1.0, 0.5);
        mass.velocity = Vec2::new(20.0, 0.0);
        let speed_before = mass.velocity.length();
        mass.integrate(0.01);
        assert!(mass.velocity.length() < speed_before);
        // Drag never reverses the direction of travel at a sane timestep
        assert!(mass.velocity.x > 0.0);
    }

    proptest! {
        #[test]
        fn force_buffer_always_zero_after_integrate(
            fx in -1000.0f32..1000.0,
            fy in -1000.0f32..1000.0,
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            dt in 0.001f32..0.1,
        ) {
            let mut mass = PointMass::new(Vec2::ZERO, 1.0, 0.05);
            mass.velocity = Vec2::new(vx, vy);
            mass.add_force(Vec2::new(fx, fy));
            mass.integrate(dt);
            prop_assert_eq!(mass.force(), Vec2::ZERO);
            prop_assert!(mass.position.is_finite());
            prop_assert!(mass.velocity.is_finite());
        }
    }
}
