use crate::prelude::{mesh_position_local_to_world, Mesh, PreviousSkinning};

use spirv_std::glam::Vec4;

/// Optional previous frame world position output.
///
/// Permutations without motion vectors pass `()`, which never touches the
/// previous frame joints.
pub trait VertexPreviousPosition {
    fn transform_previous_position<I, W, PSM: PreviousSkinning<I, W>>(
        &mut self,
        _mesh: &Mesh,
        _prev_joint_matrices: &PSM,
        _indexes: I,
        _weights: W,
        _vertex_position: Vec4,
    ) {
    }
}

impl VertexPreviousPosition for Vec4 {
    fn transform_previous_position<I, W, PSM: PreviousSkinning<I, W>>(
        &mut self,
        mesh: &Mesh,
        prev_joint_matrices: &PSM,
        indexes: I,
        weights: W,
        vertex_position: Vec4,
    ) {
        let prev_model = prev_joint_matrices.skin_prev_model(mesh, indexes, weights);
        *self = mesh_position_local_to_world(prev_model, vertex_position);
    }
}

impl VertexPreviousPosition for () {}
