//! Spatial query service: overlap, occlusion ray, and sphere sweep.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Upper bound on hits gathered by one sweep.
pub const MAX_SWEEP_HITS: usize = 10;

/// First thing a ray struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// One contact reported by a sphere sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub entity: Entity,
    /// Distance travelled before contact; zero when already overlapping at the start.
    pub distance: f32,
    pub point: Vec3,
    /// Surface normal of the struck collider, facing the sweep.
    pub normal: Vec3,
}

/// Synchronous spatial queries against the current world state.
pub trait SpatialQuery {
    /// Entities on `layers` whose colliders touch the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: Group) -> Vec<Entity>;

    /// First collider on any layer hit by the ray, ignoring `exclude`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit>;

    /// Sweep a sphere along `direction`; hits on `layers`, nearest first.
    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layers: Group,
    ) -> Vec<SweepHit>;
}

/// `SpatialQuery` backed by a Rapier context.
pub struct RapierSpatialQuery<'a> {
    context: &'a RapierContext,
}

impl<'a> RapierSpatialQuery<'a> {
    pub fn new(context: &'a RapierContext) -> Self {
        Self { context }
    }
}

fn layer_filter(layers: Group) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, layers)
}

impl SpatialQuery for RapierSpatialQuery<'_> {
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: Group) -> Vec<Entity> {
        let mut found = Vec::new();
        let shape = Collider::ball(radius);

        self.context.intersections_with_shape(
            center,
            Quat::IDENTITY,
            &shape,
            QueryFilter::default().groups(layer_filter(layers)),
            |entity| {
                found.push(entity);
                true // Continue checking other entities
            },
        );

        found
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        let mut filter = QueryFilter::default();
        if let Some(entity) = exclude {
            filter = filter.exclude_collider(entity);
        }

        self.context
            .cast_ray(origin, direction, max_distance, true, filter)
            .map(|(entity, distance)| RayHit { entity, distance })
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

        let shape = Collider::ball(radius);
        let options = ShapeCastOptions {
            max_time_of_impact: distance.max(0.0),
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };

        // Rapier reports only the nearest hit, so re-cast while excluding
        // what was already found. Hits come out nearest first.
        let mut hits: Vec<SweepHit> = Vec::new();
        while hits.len() < MAX_SWEEP_HITS {
            let seen = |entity: Entity| hits.iter().all(|hit| hit.entity != entity);
            let filter = QueryFilter::default()
                .groups(layer_filter(layers))
                .predicate(&seen);

            let Some((entity, hit)) =
                self.context
                    .cast_shape(origin, Quat::IDENTITY, direction, &shape, options, filter)
            else {
                break;
            };

            let travelled = hit.time_of_impact;
            // Witness and normal are reported in world space on the struck collider
            let (point, normal) = match hit.details {
                Some(details) => (
                    details.witness1,
                    details.normal1.try_normalize().unwrap_or(-direction),
                ),
                None => (origin + direction * travelled, -direction),
            };

            hits.push(SweepHit {
                entity,
                distance: travelled,
                point,
                normal,
            });
        }

        hits
    }
}
