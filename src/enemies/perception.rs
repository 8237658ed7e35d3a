//! Agent perception - vision cone and line-of-sight target selection.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use crate::physics::SpatialQuery;

/// Where an agent is looking from.
#[derive(Debug, Clone, Copy)]
pub struct Eye {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Shape of what an agent can see.
#[derive(Debug, Clone, Copy)]
pub struct VisionCone {
    /// Full cone angle in degrees
    pub field_of_view: f32,
    pub view_distance: f32,
}

/// Field-of-view test on the ground plane.
///
/// The vertical component of the eye-to-target direction is replaced with
/// the eye's own forward vertical, so targets above or below the eye are
/// judged by bearing alone. A degenerate direction (target straight above
/// or below a level eye) has no angle to the forward vector and passes.
pub fn in_field_of_view(eye: &Eye, cone: &VisionCone, target: Vec3) -> bool {
    let mut direction = target - eye.position;
    direction.y = eye.forward.y;

    if direction.length_squared() <= f32::EPSILON || eye.forward.length_squared() <= f32::EPSILON {
        return true;
    }

    direction.angle_between(eye.forward) <= (cone.field_of_view * 0.5).to_radians()
}

/// True when the first thing a ray from the eye hits is the target itself.
pub fn has_line_of_sight<Q: SpatialQuery + ?Sized>(
    world: &Q,
    viewer: Entity,
    eye: &Eye,
    cone: &VisionCone,
    target: Entity,
    target_position: Vec3,
) -> bool {
    let direction = target_position - eye.position;

    world
        .raycast(eye.position, direction, cone.view_distance, Some(viewer))
        .is_some_and(|hit| hit.entity == target)
}

/// One perception cycle: pick the first visible living candidate.
///
/// `locate` returns a candidate's position when it is a living target and
/// `None` otherwise. Candidates are tried in the order the overlap query
/// reports them; the first that passes both the cone and occlusion tests
/// wins, with no nearest-first preference.
pub fn scan<Q, F>(
    world: &Q,
    viewer: Entity,
    eye: Eye,
    cone: VisionCone,
    layers: Group,
    locate: F,
) -> Option<Entity>
where
    Q: SpatialQuery + ?Sized,
    F: Fn(Entity) -> Option<Vec3>,
{
    world
        .overlap_sphere(eye.position, cone.view_distance, layers)
        .into_iter()
        .filter(|candidate| *candidate != viewer)
        .find(|candidate| {
            let Some(position) = locate(*candidate) else {
                return false;
            };

            in_field_of_view(&eye, &cone, position)
                && has_line_of_sight(world, viewer, &eye, &cone, *candidate, position)
        })
}
