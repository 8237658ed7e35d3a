//! Melee attack resolution - one sphere sweep per fixed tick.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use crate::core::DamageEvent;
use crate::physics::SpatialQuery;

/// One tick's worth of swing.
#[derive(Debug, Clone, Copy)]
pub struct Strike {
    pub attacker: Entity,
    /// Sweep start (the attack root)
    pub origin: Vec3,
    pub direction: Vec3,
    pub radius: f32,
    /// Length of the sweep this tick
    pub distance: f32,
    pub damage: f32,
    pub layers: Group,
}

impl Strike {
    /// Sweep length for an attacker moving at `speed` over a tick of `dt` seconds.
    pub fn sweep_distance(speed: f32, dt: f32) -> f32 {
        speed * dt
    }
}

/// Sweep the strike volume and damage at most one new target.
///
/// Hits are visited nearest first. Entities already struck this cycle and
/// entities `is_damageable` rejects are skipped; the first remaining hit
/// gets a `DamageEvent` (through `apply`), joins `struck`, and ends the
/// tick. Returns the entity that was hit.
pub fn resolve_strike<Q, D, A>(
    world: &Q,
    strike: &Strike,
    struck: &mut HashSet<Entity>,
    is_damageable: D,
    mut apply: A,
) -> Option<Entity>
where
    Q: SpatialQuery + ?Sized,
    D: Fn(Entity) -> bool,
    A: FnMut(DamageEvent),
{
    let hits = world.sweep_sphere(
        strike.origin,
        strike.radius,
        strike.direction,
        strike.distance,
        strike.layers,
    );

    for hit in hits {
        if hit.entity == strike.attacker || struck.contains(&hit.entity) || !is_damageable(hit.entity) {
            continue;
        }

        // Overlapping at the start of the sweep has no meaningful contact point
        let hit_point = if hit.distance <= 0.0 {
            strike.origin
        } else {
            hit.point
        };

        apply(DamageEvent {
            target: hit.entity,
            source: strike.attacker,
            amount: strike.damage,
            hit_point,
            hit_normal: hit.normal,
        });
        struck.insert(hit.entity);

        return Some(hit.entity);
    }

    None
}
