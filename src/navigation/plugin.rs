//! Navigation plugin - moves agents along their paths.

use bevy::prelude::*;

use super::agent::{NavAgent, NavArea};

/// Path following runs in this set, after AI has issued its commands.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationSet;

/// Navigation plugin - owns the walkable area and the steering system.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavArea>()
            .add_systems(Update, follow_paths.in_set(NavigationSet));
    }
}

/// Move every enabled agent toward its destination and turn it to face
/// the direction of travel.
pub fn follow_paths(
    time: Res<Time>,
    area: Res<NavArea>,
    mut query: Query<(&mut Transform, &mut NavAgent)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut agent) in query.iter_mut() {
        if !agent.enabled {
            continue;
        }

        let step = agent.steer(transform.translation, dt);
        if step == Vec3::ZERO {
            continue;
        }

        let next = area.clamp(transform.translation + step);
        transform.translation = Vec3::new(next.x, transform.translation.y, next.z);

        // Face the direction of travel (rotate around Y axis)
        let heading = agent.velocity();
        if heading.length_squared() > 1e-6 {
            let look_target = transform.translation + Vec3::new(heading.x, 0.0, heading.z);
            transform.look_at(look_target, Vec3::Y);
        }
    }
}
