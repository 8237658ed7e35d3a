//! Player plugin - lives, respawn, and game over.

use bevy::prelude::*;

use super::components::*;
use super::lives;
use crate::combat::CombatSet;

/// Player plugin - handles the player's deaths and respawns.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(Update, lives::handle_player_death.in_set(CombatSet::Reactions))
            .add_systems(Update, lives::respawn_player.in_set(CombatSet::Cleanup));
    }
}
