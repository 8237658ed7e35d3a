//! Combat plugin - damage application, death detection, and cleanup.

use bevy::prelude::*;

use super::systems;

/// System set ordering for combat.
///
/// Other plugins put their reactions to `DamageTaken` and `DeathEvent` in
/// `Reactions`, so they see the events in the same frame they are sent.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Damage,
    Reactions,
    Feedback,
    Cleanup,
}

/// Combat plugin - handles all damage and death systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // System ordering
            .configure_sets(
                Update,
                (
                    CombatSet::Damage,
                    CombatSet::Reactions,
                    CombatSet::Feedback,
                    CombatSet::Cleanup,
                )
                    .chain(),
            )

            .add_systems(Update, systems::apply_damage.in_set(CombatSet::Damage))

            .add_systems(
                Update,
                (systems::emit_effect_cues, systems::log_effect_cues)
                    .chain()
                    .in_set(CombatSet::Feedback),
            )

            .add_systems(Update, systems::despawn_expired.in_set(CombatSet::Cleanup));
    }
}
