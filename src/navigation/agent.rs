//! Navigation agent component and walkable area resource.

use bevy::prelude::*;
use rand::Rng;

/// Per-entity navigation state.
///
/// Mirrors the surface a navmesh agent exposes: a destination, a speed, a
/// stop switch, and read-only velocity / remaining-distance feedback that
/// the steering system refreshes every frame.
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    /// Movement speed in units per second.
    pub speed: f32,
    /// Paused agents keep their destination but do not move.
    pub is_stopped: bool,
    /// Agents stop this far short of their destination.
    pub stopping_distance: f32,
    /// Disabled agents are ignored by the steering system entirely.
    pub enabled: bool,
    destination: Option<Vec3>,
    desired_velocity: Vec3,
    velocity: Vec3,
    remaining_distance: f32,
}

impl NavAgent {
    pub fn new(speed: f32, stopping_distance: f32) -> Self {
        Self {
            speed,
            is_stopped: false,
            stopping_distance,
            enabled: true,
            destination: None,
            desired_velocity: Vec3::ZERO,
            velocity: Vec3::ZERO,
            remaining_distance: 0.0,
        }
    }

    /// Path toward `point`. Remaining distance updates on the next steering pass.
    pub fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Velocity the agent wants, regardless of whether it is stopped.
    pub fn desired_velocity(&self) -> Vec3 {
        self.desired_velocity
    }

    /// Velocity actually applied last frame.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Horizontal distance left to the destination; zero without one.
    pub fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    /// Recompute velocities for an agent at `position`.
    ///
    /// Returns the displacement to apply this frame.
    pub fn steer(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let Some(destination) = self.destination.filter(|_| self.enabled) else {
            self.desired_velocity = Vec3::ZERO;
            self.velocity = Vec3::ZERO;
            self.remaining_distance = 0.0;
            return Vec3::ZERO;
        };

        let offset = Vec3::new(destination.x - position.x, 0.0, destination.z - position.z);
        self.remaining_distance = offset.length();

        let to_stop = self.remaining_distance - self.stopping_distance;
        self.desired_velocity = if to_stop > 0.0 {
            offset.normalize_or_zero() * self.speed
        } else {
            Vec3::ZERO
        };

        self.velocity = if self.is_stopped {
            Vec3::ZERO
        } else {
            self.desired_velocity
        };

        // Never step past the stopping point
        let step = self.velocity * dt;
        if to_stop > 0.0 && step.length() > to_stop {
            step.normalize_or_zero() * to_stop
        } else {
            step
        }
    }
}

/// Walkable region shared by all agents.
#[derive(Resource, Debug, Clone)]
pub struct NavArea {
    /// Minimum (x, z) corner
    pub min: Vec2,
    /// Maximum (x, z) corner
    pub max: Vec2,
    /// Ground height
    pub floor_y: f32,
}

impl Default for NavArea {
    fn default() -> Self {
        Self {
            min: Vec2::splat(-25.0),
            max: Vec2::splat(25.0),
            floor_y: 0.0,
        }
    }
}

impl NavArea {
    /// Nearest walkable point to `point`.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        let flat = Vec2::new(point.x, point.z).clamp(self.min, self.max);
        Vec3::new(flat.x, self.floor_y, flat.y)
    }

    /// Random walkable point within `radius` of `center`.
    pub fn random_point<R: Rng + ?Sized>(&self, center: Vec3, radius: f32, rng: &mut R) -> Vec3 {
        // Uniform over the disc
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = radius * rng.gen::<f32>().sqrt();
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;

        self.clamp(center + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn no_destination_means_zero_remaining() {
        let mut agent = NavAgent::new(3.0, 0.5);
        let step = agent.steer(Vec3::ZERO, 0.1);

        assert_eq!(step, Vec3::ZERO);
        assert_eq!(agent.remaining_distance(), 0.0);
    }

    #[test]
    fn walks_toward_destination_at_speed() {
        let mut agent = NavAgent::new(2.0, 0.0);
        agent.set_destination(Vec3::new(10.0, 0.0, 0.0));

        let step = agent.steer(Vec3::ZERO, 0.5);

        assert_relative_eq!(step.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(agent.velocity().length(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(agent.remaining_distance(), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn stopped_agent_keeps_desire_but_does_not_move() {
        let mut agent = NavAgent::new(2.0, 0.0);
        agent.set_destination(Vec3::new(0.0, 0.0, 5.0));
        agent.is_stopped = true;

        let step = agent.steer(Vec3::ZERO, 0.5);

        assert_eq!(step, Vec3::ZERO);
        assert_eq!(agent.velocity(), Vec3::ZERO);
        assert!(agent.desired_velocity().length() > 0.0);
    }

    #[test]
    fn halts_at_stopping_distance() {
        let mut agent = NavAgent::new(10.0, 2.0);
        agent.set_destination(Vec3::new(3.0, 0.0, 0.0));

        let step = agent.steer(Vec3::ZERO, 1.0);

        assert_relative_eq!(step.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn random_points_stay_in_radius_and_area() {
        let area = NavArea::default();
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vec3::new(20.0, 0.0, 0.0);

        for _ in 0..200 {
            let point = area.random_point(center, 10.0, &mut rng);
            assert!(point.distance(center) <= 10.0 + 1e-4);
            assert!(point.x <= area.max.x && point.x >= area.min.x);
            assert!(point.z <= area.max.y && point.z >= area.min.y);
        }
    }
}
