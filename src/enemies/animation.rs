//! Agent animation cues.
//!
//! Stands in for the animation system: it accepts "play attack" and
//! "play death" requests and reports back when the attack wind-up and the
//! swing itself have finished. The AI reacts to those reports as inbound
//! events rather than polling timers itself.

use bevy::prelude::*;

use super::components::AttackTiming;

/// Request to play the attack animation.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackCue {
    pub agent: Entity,
}

/// Request to play the death animation.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathCue {
    pub agent: Entity,
}

/// The attack animation reached the point where the swing becomes live.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindUpComplete {
    pub agent: Entity,
}

/// The attack animation finished.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackComplete {
    pub agent: Entity,
}

/// Phase of a playing attack animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingPhase {
    WindUp,
    Strike,
}

/// A playing attack animation.
#[derive(Component, Debug)]
pub struct AttackAnimation {
    pub timer: Timer,
    pub phase: SwingPhase,
}

impl AttackAnimation {
    pub fn start(timing: &AttackTiming) -> Self {
        Self {
            timer: Timer::from_seconds(timing.wind_up, TimerMode::Once),
            phase: SwingPhase::WindUp,
        }
    }
}

/// Start attack animations for every cue received this frame.
pub fn start_attack_animations(
    mut commands: Commands,
    mut cues: EventReader<AttackCue>,
    query: Query<&AttackTiming>,
) {
    for cue in cues.read() {
        let Ok(timing) = query.get(cue.agent) else {
            continue;
        };

        commands.entity(cue.agent).insert(AttackAnimation::start(timing));
    }
}

/// Advance attack animations and report phase completions.
pub fn advance_attack_animations(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut AttackAnimation, &AttackTiming)>,
    mut wind_ups: EventWriter<WindUpComplete>,
    mut completions: EventWriter<AttackComplete>,
) {
    for (entity, mut animation, timing) in query.iter_mut() {
        animation.timer.tick(time.delta());

        if !animation.timer.finished() {
            continue;
        }

        match animation.phase {
            SwingPhase::WindUp => {
                wind_ups.send(WindUpComplete { agent: entity });
                animation.phase = SwingPhase::Strike;
                animation.timer = Timer::from_seconds(timing.strike, TimerMode::Once);
            }
            SwingPhase::Strike => {
                completions.send(AttackComplete { agent: entity });
                commands.entity(entity).remove::<AttackAnimation>();
            }
        }
    }
}

/// Death interrupts whatever the agent was playing.
pub fn play_death_animations(mut commands: Commands, mut cues: EventReader<DeathCue>) {
    for cue in cues.read() {
        if let Some(mut entity) = commands.get_entity(cue.agent) {
            entity.remove::<AttackAnimation>();
        }
        debug!("Playing death animation for {:?}", cue.agent);
    }
}
