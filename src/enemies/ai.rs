//! Agent AI behavior systems.
//!
//! Patrol -> Tracking when perception acquires a target, Tracking ->
//! AttackBegin once in range, AttackBegin -> Attacking on the wind-up cue,
//! and back to Tracking or Patrol when the attack animation completes.
//! Losing the target at any point drops the agent back to Patrol on the
//! next perception cycle.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::animation::{AttackComplete, AttackCue, DeathCue, WindUpComplete};
use super::attack::{resolve_strike, Strike};
use super::components::*;
use super::perception::{scan, Eye, VisionCone};
use crate::combat::{DamageEvent, DamageTaken, Dead, DeathEvent, Health};
use crate::core::{smooth_damp_angle, SimRng};
use crate::navigation::{NavAgent, NavArea};
use crate::physics::{RapierSpatialQuery, TARGET_LAYER};

/// Patrolling agents pick a new destination once this close to the current one.
pub const PATROL_REPATH_DISTANCE: f32 = 1.0;

/// Pursuit half of a perception cycle.
///
/// With a live target the agent (re)paths to it, switching to pursuit
/// speed if it was patrolling. Without one the stale reference is cleared
/// and the agent falls back to Patrol at patrol speed. Returns `true` when
/// the agent is patrolling and should scan for a new target.
pub fn pursue_or_patrol(
    state: &mut AgentState,
    target: &mut AgentTarget,
    target_position: Option<Vec3>,
    stats: &AgentStats,
    nav: &mut NavAgent,
) -> bool {
    if let Some(position) = target_position {
        if *state == AgentState::Patrol {
            *state = AgentState::Tracking;
            nav.speed = stats.run_speed;
        }

        nav.set_destination(position);
        return false;
    }

    target.0 = None;

    if *state != AgentState::Patrol {
        *state = AgentState::Patrol;
        nav.speed = stats.patrol_speed;
    }

    true
}

/// Tracking -> AttackBegin when within attack distance. Pauses navigation.
pub fn try_begin_attack(
    state: &mut AgentState,
    distance: f32,
    profile: &AttackProfile,
    nav: &mut NavAgent,
) -> bool {
    if *state != AgentState::Tracking || distance > profile.attack_distance() {
        return false;
    }

    *state = AgentState::AttackBegin;
    nav.is_stopped = true;
    true
}

/// AttackBegin -> Attacking. Starts a fresh attack cycle.
pub fn enable_attack(state: &mut AgentState, cycle: &mut AttackCycle) -> bool {
    if *state != AgentState::AttackBegin {
        return false;
    }

    *state = AgentState::Attacking;
    cycle.struck.clear();
    true
}

/// End of the attack animation: resume navigation and go back to
/// Tracking if the target still lives, Patrol otherwise.
pub fn disable_attack(
    state: &mut AgentState,
    has_target: bool,
    stats: &AgentStats,
    nav: &mut NavAgent,
) {
    if has_target {
        *state = AgentState::Tracking;
        nav.speed = stats.run_speed;
    } else {
        *state = AgentState::Patrol;
        nav.speed = stats.patrol_speed;
    }

    nav.is_stopped = false;
}

/// Yaw (around +Y) that makes an entity's forward (-Z) point along `direction`.
pub fn yaw_toward(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Position of `entity` if it is a living damageable target.
fn living_position(
    targets: &Query<(&Transform, &Health), Without<Agent>>,
    entity: Entity,
) -> Option<Vec3> {
    targets
        .get(entity)
        .ok()
        .filter(|(_, health)| !health.is_dead())
        .map(|(transform, _)| transform.translation)
}

/// Recurring perception task: validate the target, steer, and scan.
pub fn perception_cycle(
    time: Res<Time>,
    area: Res<NavArea>,
    mut rng: ResMut<SimRng>,
    rapier_context: Query<&RapierContext>,
    targets: Query<(&Transform, &Health), Without<Agent>>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &AgentStats,
            &Senses,
            &mut AgentState,
            &mut AgentTarget,
            &mut NavAgent,
            &mut PerceptionTimer,
        ),
        (With<Agent>, Without<Dead>),
    >,
) {
    let world = rapier_context.get_single().ok().map(RapierSpatialQuery::new);

    for (entity, transform, stats, senses, mut state, mut target, mut nav, mut timer) in
        agents.iter_mut()
    {
        timer.0.tick(time.delta());
        if !timer.0.just_finished() {
            continue;
        }

        let target_position = target.0.and_then(|e| living_position(&targets, e));
        let previous = *state;

        let patrolling = pursue_or_patrol(&mut state, &mut target, target_position, stats, &mut nav);
        if *state != previous {
            debug!("{:?}: {:?} -> {:?}", entity, previous, *state);
        }

        if !patrolling {
            continue;
        }

        if nav.remaining_distance() <= nav.stopping_distance + PATROL_REPATH_DISTANCE {
            let destination = area.random_point(transform.translation, stats.patrol_radius, &mut rng.0);
            nav.set_destination(destination);
        }

        let Some(world) = world.as_ref() else {
            continue;
        };

        let eye = Eye {
            position: senses.eye_position(transform),
            forward: transform.forward().as_vec3(),
        };
        let cone = VisionCone {
            field_of_view: senses.field_of_view,
            view_distance: senses.view_distance,
        };

        target.0 = scan(world, entity, eye, cone, TARGET_LAYER, |candidate| {
            living_position(&targets, candidate)
        });

        if let Some(found) = target.0 {
            debug!("{:?} spotted {:?}", entity, found);
        }
    }
}

/// Start attacking once a tracked target is within reach.
pub fn check_attack_range(
    targets: Query<(&Transform, &Health), Without<Agent>>,
    mut agents: Query<
        (Entity, &Transform, &AttackProfile, &AgentTarget, &mut AgentState, &mut NavAgent),
        (With<Agent>, Without<Dead>),
    >,
    mut cues: EventWriter<AttackCue>,
) {
    for (entity, transform, profile, target, mut state, mut nav) in agents.iter_mut() {
        if *state != AgentState::Tracking {
            continue;
        }

        // Stale targets are left for the next perception cycle to clear
        let Some(target_position) = target.0.and_then(|e| living_position(&targets, e)) else {
            continue;
        };

        let distance = transform.translation.distance(target_position);
        if try_begin_attack(&mut state, distance, profile, &mut nav) {
            debug!("{:?}: Tracking -> AttackBegin", entity);
            cues.send(AttackCue { agent: entity });
        }
    }
}

/// Wind-up finished: the swing goes live.
pub fn on_wind_up_complete(
    mut events: EventReader<WindUpComplete>,
    mut agents: Query<(&mut AgentState, &mut AttackCycle), (With<Agent>, Without<Dead>)>,
) {
    for event in events.read() {
        let Ok((mut state, mut cycle)) = agents.get_mut(event.agent) else {
            continue;
        };

        if enable_attack(&mut state, &mut cycle) {
            debug!("{:?}: AttackBegin -> Attacking", event.agent);
        }
    }
}

/// Attack animation finished: resume pursuit or patrol.
pub fn on_attack_complete(
    mut events: EventReader<AttackComplete>,
    targets: Query<(&Transform, &Health), Without<Agent>>,
    mut agents: Query<
        (&mut AgentState, &AgentTarget, &AgentStats, &mut NavAgent),
        (With<Agent>, Without<Dead>),
    >,
) {
    for event in events.read() {
        let Ok((mut state, target, stats, mut nav)) = agents.get_mut(event.agent) else {
            continue;
        };

        let has_target = target.0.and_then(|e| living_position(&targets, e)).is_some();
        disable_attack(&mut state, has_target, stats, &mut nav);
        debug!("{:?}: attack finished -> {:?}", event.agent, *state);
    }
}

/// Smoothly turn engaged agents toward their target.
pub fn face_target(
    time: Res<Time>,
    targets: Query<(&Transform, &Health), Without<Agent>>,
    mut agents: Query<
        (&mut Transform, &AgentState, &AgentTarget, &mut TurnSmoothing),
        (With<Agent>, Without<Dead>),
    >,
) {
    let dt = time.delta_secs();

    for (mut transform, state, target, mut smoothing) in agents.iter_mut() {
        if !state.is_engaged() {
            continue;
        }

        let Some(target_position) = target.0.and_then(|e| living_position(&targets, e)) else {
            continue;
        };

        let to_target = target_position - transform.translation;
        if Vec2::new(to_target.x, to_target.z).length_squared() <= f32::EPSILON {
            continue;
        }

        let current_yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
        let TurnSmoothing { smooth_time, velocity } = &mut *smoothing;
        let yaw = smooth_damp_angle(current_yaw, yaw_toward(to_target), velocity, *smooth_time, dt);

        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

/// Sweep the attack volume of every attacking agent.
pub fn resolve_attacks(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    damageable: Query<&Health>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &AgentState,
            &AgentStats,
            &AttackProfile,
            &NavAgent,
            &mut AttackCycle,
        ),
        (With<Agent>, Without<Dead>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let dt = time.delta_secs();

    for (entity, transform, state, stats, profile, nav, mut cycle) in agents.iter_mut() {
        if *state != AgentState::Attacking {
            continue;
        }

        let strike = Strike {
            attacker: entity,
            origin: profile.root(transform),
            direction: transform.forward().as_vec3(),
            radius: profile.radius,
            distance: Strike::sweep_distance(nav.velocity().length(), dt),
            damage: stats.damage,
            layers: TARGET_LAYER,
        };

        let hit = resolve_strike(
            &world,
            &strike,
            &mut cycle.struck,
            |candidate| damageable.contains(candidate),
            |event| {
                damage_events.send(event);
            },
        );

        if let Some(victim) = hit {
            debug!("{:?} struck {:?} for {}", entity, victim, stats.damage);
        }
    }
}

/// Agents hit while idle turn on whoever hurt them.
pub fn retaliate(
    mut damage_taken: EventReader<DamageTaken>,
    targets: Query<(&Transform, &Health), Without<Agent>>,
    mut agents: Query<&mut AgentTarget, (With<Agent>, Without<Dead>)>,
) {
    for hit in damage_taken.read() {
        let Ok(mut target) = agents.get_mut(hit.target) else {
            continue;
        };

        if target.0.is_none() && living_position(&targets, hit.source).is_some() {
            target.0 = Some(hit.source);
        }
    }
}

/// Shut an agent down when it dies.
///
/// Stops the perception task, drops the collider out of queries, halts
/// navigation, and plays the death animation. Corpse removal and scoring
/// are handled by the death listeners registered at spawn.
pub fn handle_agent_death(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut agents: Query<(&mut NavAgent, &AgentType), With<Agent>>,
    mut cues: EventWriter<DeathCue>,
) {
    for death in deaths.read() {
        let Ok((mut nav, agent_type)) = agents.get_mut(death.entity) else {
            continue;
        };

        match death.killed_by {
            Some(killer) => info!("{} {:?} killed by {:?}", agent_type.0, death.entity, killer),
            None => info!("{} {:?} died", agent_type.0, death.entity),
        }

        nav.is_stopped = true;
        nav.enabled = false;

        commands
            .entity(death.entity)
            .remove::<PerceptionTimer>()
            .insert(ColliderDisabled);

        cues.send(DeathCue { agent: death.entity });
    }
}
