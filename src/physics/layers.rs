//! Collision layers used by perception and attacks.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Living targets agents hunt (the player).
pub const TARGET_LAYER: Group = Group::GROUP_1;
/// Agents themselves.
pub const AGENT_LAYER: Group = Group::GROUP_2;
/// Static level geometry (walls, obstacles).
pub const WORLD_LAYER: Group = Group::GROUP_3;

/// Collision groups for a collider that belongs to `layer` and interacts with everything.
pub fn member_of(layer: Group) -> CollisionGroups {
    CollisionGroups::new(layer, Group::ALL)
}
