use spirv_std::glam::{Vec2, Vec4};

use super::view::{PreviousViewProjection, View};

/// Screen-space motion between the previous and current frame, in UV units.
///
/// Both positions are projected with their own frame's view projection.
/// Clip space Y points up while UV space Y points down, hence the flip.
pub fn calculate_motion_vector(
    view: &View,
    previous_view: &PreviousViewProjection,
    world_position: Vec4,
    previous_world_position: Vec4,
) -> Vec2 {
    let clip_position = view.view_proj * world_position;
    let previous_clip_position = previous_view.view_proj * previous_world_position;

    let clip_position = clip_position.truncate().truncate() / clip_position.w;
    let previous_clip_position =
        previous_clip_position.truncate().truncate() / previous_clip_position.w;

    (clip_position - previous_clip_position) * Vec2::new(0.5, -0.5)
}
