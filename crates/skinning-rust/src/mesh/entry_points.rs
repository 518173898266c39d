use spirv_std::{
    glam::{UVec4, Vec2, Vec3, Vec4},
    spirv,
};

#[allow(unused_imports)]
use spirv_std::num_traits::Float;

use crate::prelude::{
    calculate_motion_vector, mesh_position_local_to_world, Mesh, PreviousSkinning,
    PreviousViewProjection, SkinnedMesh, Skinning, VertexPreviousPosition, View,
};

/// Expands one `#[spirv(vertex)]` entry point per permutation.
///
/// Each line names the entry point, whether it is skinned, whether it writes
/// the previous world position, and the mesh descriptor set. Names follow
/// `vertex__{skinned}__{motion_vectors}__{mesh bind group}`, the name the host
/// builds from the pipeline's shader defs.
macro_rules! vertex_permutations {
    (@skinned $name:ident, none, $motion:ident, $set:tt) => {
        vertex_permutations!(@motion $name, $motion, $set,
            [] [&()]
            [] [(), ()]
            [] [&()]
        );
    };

    (@skinned $name:ident, some, $motion:ident, $set:tt) => {
        vertex_permutations!(@motion $name, $motion, $set,
            [#[spirv(uniform, descriptor_set = $set, binding = 1)] joint_matrices: &SkinnedMesh,]
            [joint_matrices]
            [in_joint_indices: UVec4, in_joint_weights: Vec4,]
            [in_joint_indices, in_joint_weights]
            [#[spirv(uniform, descriptor_set = $set, binding = 6)] prev_joint_matrices: &SkinnedMesh,]
            [prev_joint_matrices]
        );
    };

    (@motion $name:ident, none, $set:tt,
        $skin_param:tt $skin_arg:tt $joint_param:tt $joint_arg:tt $prev_param:tt $prev_arg:tt
    ) => {
        vertex_permutations!(@emit $name, $set,
            $skin_param $skin_arg $joint_param $joint_arg
            [] [&()]
            [] [&mut ()]
        );
    };

    (@motion $name:ident, some, $set:tt,
        $skin_param:tt $skin_arg:tt $joint_param:tt $joint_arg:tt $prev_param:tt $prev_arg:tt
    ) => {
        vertex_permutations!(@emit $name, $set,
            $skin_param $skin_arg $joint_param $joint_arg
            $prev_param $prev_arg
            [out_previous_world_position: &mut Vec4,] [out_previous_world_position]
        );
    };

    (@emit $name:ident, $set:tt,
        [$($skin_param:tt)*] [$($skin_arg:tt)*]
        [$($joint_param:tt)*] [$($joint_arg:tt)*]
        [$($prev_param:tt)*] [$($prev_arg:tt)*]
        [$($out_param:tt)*] [$($out_arg:tt)*]
    ) => {
        #[allow(non_snake_case)]
        #[spirv(vertex)]
        pub fn $name(
            #[spirv(uniform, descriptor_set = 0, binding = 0)] view: &View,
            #[spirv(uniform, descriptor_set = $set, binding = 0)] mesh: &Mesh,
            $($skin_param)*
            $($prev_param)*

            in_position: Vec3,
            in_normal: Vec3,
            $($joint_param)*

            #[spirv(position)] out_clip_position: &mut Vec4,
            out_world_position: &mut Vec4,
            out_world_normal: &mut Vec3,
            $($out_param)*
        ) {
            vertex_impl(
                view,
                mesh,
                $($skin_arg)*,
                $($prev_arg)*,
                $($joint_arg)*,
                in_position,
                in_normal,
                out_clip_position,
                out_world_position,
                out_world_normal,
                $($out_arg)*,
            );
        }
    };

    ($($name:ident: $skinned:ident, $motion:ident, $set:tt;)*) => {
        $(vertex_permutations!(@skinned $name, $skinned, $motion, $set);)*
    };
}

vertex_permutations! {
    vertex__none__none__bindgroup_2: none, none, 2;
    vertex__none__none__bindgroup_1: none, none, 1;
    vertex__none__some__bindgroup_2: none, some, 2;
    vertex__none__some__bindgroup_1: none, some, 1;
    vertex__some__none__bindgroup_2: some, none, 2;
    vertex__some__none__bindgroup_1: some, none, 1;
    vertex__some__some__bindgroup_2: some, some, 2;
    vertex__some__some__bindgroup_1: some, some, 1;
}

#[allow(clippy::too_many_arguments)]
pub fn vertex_impl<SM, PSM, PP>(
    view: &View,
    mesh: &Mesh,
    joint_matrices: &SM,
    prev_joint_matrices: &PSM,
    in_joint_indices: SM::JointIndices,
    in_joint_weights: SM::JointWeights,
    in_position: Vec3,
    in_normal: Vec3,
    out_clip_position: &mut Vec4,
    out_world_position: &mut Vec4,
    out_world_normal: &mut Vec3,
    out_previous_world_position: &mut PP,
) where
    SM: Skinning,
    PSM: PreviousSkinning<SM::JointIndices, SM::JointWeights>,
    PP: VertexPreviousPosition,
{
    let vertex_position = in_position.extend(1.0);
    let model = joint_matrices.skin_model(mesh, in_joint_indices, in_joint_weights);

    *out_world_normal = SM::skin_normals(mesh, model, in_normal);
    *out_world_position = mesh_position_local_to_world(model, vertex_position);
    *out_clip_position = view.mesh_position_world_to_clip(*out_world_position);

    out_previous_world_position.transform_previous_position(
        mesh,
        prev_joint_matrices,
        in_joint_indices,
        in_joint_weights,
        vertex_position,
    );
}

/// Motion vector prepass fragment stage.
///
/// Reads the previous world position at location 2, so it only pairs with the
/// `vertex__*__some__*` permutations.
#[spirv(fragment)]
pub fn prepass_fragment(
    #[spirv(uniform, descriptor_set = 0, binding = 0)] view: &View,
    #[spirv(uniform, descriptor_set = 0, binding = 2)] previous_view: &PreviousViewProjection,
    in_world_position: Vec4,
    in_world_normal: Vec3,
    in_previous_world_position: Vec4,
    out_normal: &mut Vec4,
    out_motion_vector: &mut Vec2,
) {
    *out_normal = (in_world_normal.normalize() * 0.5 + 0.5).extend(1.0);
    *out_motion_vector = calculate_motion_vector(
        view,
        previous_view,
        in_world_position,
        in_previous_world_position,
    );
}
