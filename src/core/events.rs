//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, the attack
//! resolver sends DamageEvents, and the health system receives them to
//! apply damage. This keeps systems independent and testable.

use bevy::prelude::*;

/// Sent when an attack connects with a damageable entity.
///
/// Immutable value describing the hit at the moment it happened. The damage
/// system applies it to the target's `Health`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount (always positive)
    pub amount: f32,
    /// World-space impact point
    pub hit_point: Vec3,
    /// Surface normal at the impact point
    pub hit_normal: Vec3,
}

/// Sent after a `DamageEvent` was accepted by a living target.
///
/// Rejected damage (target already dead, or not damageable) never produces
/// this event, so reactions like retaliation and hit effects only fire for
/// hits that actually landed.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageTaken {
    pub target: Entity,
    pub source: Entity,
    pub hit_point: Vec3,
    pub hit_normal: Vec3,
}

/// Sent exactly once when an entity dies (health reaches 0).
///
/// Systems can listen for this to trigger death animations,
/// roster cleanup, scoring, etc.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Fire-and-forget request for a visual/audio effect.
#[derive(Event, Debug, Clone, Copy)]
pub enum EffectCue {
    /// Flesh impact at a hit point.
    Hit {
        target: Entity,
        point: Vec3,
        normal: Vec3,
    },
    /// Death sound for an entity.
    Death { entity: Entity },
}
