//! In-memory spatial scene for unit tests.
//!
//! Every collider is a sphere, which keeps overlap, ray, and sweep answers
//! exact and independent of the physics engine.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use crate::physics::{RayHit, SpatialQuery, SweepHit, MAX_SWEEP_HITS};

#[derive(Debug, Clone)]
pub struct Ball {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub layer: Group,
}

/// Scene of spheres; insertion order is the overlap query order.
#[derive(Default)]
pub struct SphereScene {
    pub balls: Vec<Ball>,
}

impl SphereScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: u32, center: Vec3, radius: f32, layer: Group) -> Entity {
        let entity = Entity::from_raw(id);
        self.balls.push(Ball {
            entity,
            center,
            radius,
            layer,
        });
        entity
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.balls
            .iter()
            .find(|ball| ball.entity == entity)
            .map(|ball| ball.center)
    }
}

/// Distance along a unit ray to the first surface of a sphere, if hit.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    if c <= 0.0 {
        // Starting inside counts as an immediate hit
        return Some(0.0);
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    (t >= 0.0).then_some(t)
}

impl SpatialQuery for SphereScene {
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: Group) -> Vec<Entity> {
        self.balls
            .iter()
            .filter(|ball| layers.intersects(ball.layer))
            .filter(|ball| ball.center.distance(center) <= radius + ball.radius)
            .map(|ball| ball.entity)
            .collect()
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        self.balls
            .iter()
            .filter(|ball| Some(ball.entity) != exclude)
            .filter_map(|ball| {
                ray_sphere(origin, direction, ball.center, ball.radius)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| RayHit {
                        entity: ball.entity,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layers: Group,
    ) -> Vec<SweepHit> {
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };

        let mut hits: Vec<SweepHit> = self
            .balls
            .iter()
            .filter(|ball| layers.intersects(ball.layer))
            .filter_map(|ball| {
                // Sweeping a sphere against a sphere is a ray against the inflated sphere
                let travelled = ray_sphere(origin, direction, ball.center, ball.radius + radius)?;
                if travelled > distance {
                    return None;
                }

                let sweep_center = origin + direction * travelled;
                let normal = (sweep_center - ball.center).normalize_or_zero();

                Some(SweepHit {
                    entity: ball.entity,
                    distance: travelled,
                    point: ball.center + normal * ball.radius,
                    normal,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(MAX_SWEEP_HITS);
        hits
    }
}
