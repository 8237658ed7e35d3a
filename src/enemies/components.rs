//! Agent-related components.

use std::collections::HashSet;

use bevy::prelude::*;

/// Marker component for all hostile agents.
#[derive(Component)]
pub struct Agent;

/// Agent type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct AgentType(pub String);

/// Behavior state machine for agents.
///
/// Death is not a state here: it is tracked by `Dead` on the entity and
/// stops every agent system.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AgentState {
    /// Wandering between random points, scanning for targets.
    #[default]
    Patrol,
    /// Pursuing an acquired target.
    Tracking,
    /// Stopped in range, winding up the swing.
    AttackBegin,
    /// Swing is live; the attack sweep runs every fixed tick.
    Attacking,
}

impl AgentState {
    /// States in which the agent turns to face its target.
    pub fn is_engaged(self) -> bool {
        matches!(self, AgentState::AttackBegin | AgentState::Attacking)
    }
}

/// Current target. A weak reference: the agent never owns the target and
/// must re-validate it before every use.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentTarget(pub Option<Entity>);

/// Per-agent combat and locomotion numbers, fixed at spawn.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AgentStats {
    pub damage: f32,
    /// Pursuit speed
    pub run_speed: f32,
    /// Wandering speed
    pub patrol_speed: f32,
    /// How far from its position a patrolling agent picks its next destination
    pub patrol_radius: f32,
}

impl Default for AgentStats {
    fn default() -> Self {
        Self {
            damage: 30.0,
            run_speed: 10.0,
            patrol_speed: 3.0,
            patrol_radius: 20.0,
        }
    }
}

/// Vision cone parameters.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Senses {
    /// Full cone angle in degrees
    pub field_of_view: f32,
    pub view_distance: f32,
    /// Eye height above the agent's origin
    pub eye_height: f32,
}

impl Default for Senses {
    fn default() -> Self {
        Self {
            field_of_view: 50.0,
            view_distance: 10.0,
            eye_height: 1.6,
        }
    }
}

impl Senses {
    /// World-space eye position for an agent transform.
    pub fn eye_position(&self, transform: &Transform) -> Vec3 {
        transform.translation + Vec3::Y * self.eye_height
    }
}

/// Melee reach. The attack root sits `reach` ahead of the agent at
/// `height`, and the swept sphere has `radius`.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AttackProfile {
    pub radius: f32,
    pub reach: f32,
    pub height: f32,
}

impl Default for AttackProfile {
    fn default() -> Self {
        Self {
            radius: 2.0,
            reach: 1.0,
            height: 1.0,
        }
    }
}

impl AttackProfile {
    /// Distance at which a tracking agent stops and starts its attack.
    pub fn attack_distance(&self) -> f32 {
        self.reach + self.radius
    }

    /// World-space origin of the attack sweep.
    pub fn root(&self, transform: &Transform) -> Vec3 {
        transform.translation + transform.forward().as_vec3() * self.reach + Vec3::Y * self.height
    }
}

/// Targets already damaged during the current attack cycle.
#[derive(Component, Default, Debug)]
pub struct AttackCycle {
    pub struck: HashSet<Entity>,
}

/// Facing smoothing state while engaged.
#[derive(Component, Clone, Debug)]
pub struct TurnSmoothing {
    /// Approximate time to settle on the target bearing, in seconds
    pub smooth_time: f32,
    /// Angular velocity carried between ticks (radians per second)
    pub velocity: f32,
}

impl Default for TurnSmoothing {
    fn default() -> Self {
        Self {
            smooth_time: 0.1,
            velocity: 0.0,
        }
    }
}

/// Recurring perception task. Present while the agent lives; removing it
/// stops the task.
#[derive(Component)]
pub struct PerceptionTimer(pub Timer);

impl PerceptionTimer {
    pub fn every(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Repeating))
    }
}

impl Default for PerceptionTimer {
    fn default() -> Self {
        Self::every(0.05)
    }
}

/// Durations of the attack animation phases.
#[derive(Component, Clone, Debug)]
pub struct AttackTiming {
    /// Time from the attack trigger until the swing becomes live
    pub wind_up: f32,
    /// Time the swing stays live
    pub strike: f32,
}

impl Default for AttackTiming {
    fn default() -> Self {
        Self {
            wind_up: 0.4,
            strike: 0.5,
        }
    }
}

/// Visual intensity marker: white for weak agents, the strong colour for tough ones.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SkinTint(pub Srgba);
