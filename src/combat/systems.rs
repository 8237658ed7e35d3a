//! Combat systems - damage application, effect cues, and corpse cleanup.

use bevy::prelude::*;

use super::components::*;
use crate::core::EffectCue;

/// Apply damage to entities.
///
/// Accepted hits produce `DamageTaken`; the hit that empties a health pool
/// also marks the entity `Dead` and sends its single `DeathEvent`.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<&mut Health, Without<Dead>>,
    mut damage_taken: EventWriter<DamageTaken>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        // Missing or already-dead targets are stale references; ignore them
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };

        let outcome = health.apply_damage(event.amount);
        if !outcome.landed() {
            continue;
        }

        damage_taken.send(DamageTaken {
            target: event.target,
            source: event.source,
            hit_point: event.hit_point,
            hit_normal: event.hit_normal,
        });

        if outcome == DamageOutcome::Killed {
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Turn landed hits and deaths into effect requests.
pub fn emit_effect_cues(
    mut damage_taken: EventReader<DamageTaken>,
    mut deaths: EventReader<DeathEvent>,
    mut cues: EventWriter<EffectCue>,
) {
    for hit in damage_taken.read() {
        cues.send(EffectCue::Hit {
            target: hit.target,
            point: hit.hit_point,
            normal: hit.hit_normal,
        });
    }

    for death in deaths.read() {
        cues.send(EffectCue::Death { entity: death.entity });
    }
}

/// Headless stand-in for the effects/audio backend.
pub fn log_effect_cues(mut cues: EventReader<EffectCue>) {
    for cue in cues.read() {
        match cue {
            EffectCue::Hit { target, point, normal } => {
                debug!("Hit effect on {:?} at {:?} (normal {:?})", target, point, normal);
            }
            EffectCue::Death { entity } => {
                debug!("Death effect for {:?}", entity);
            }
        }
    }
}

/// Despawn entities whose delayed-destruction timer has run out.
pub fn despawn_expired(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.0.tick(time.delta());

        if timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
