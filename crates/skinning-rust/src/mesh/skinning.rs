use crate::prelude::Mesh;

use spirv_std::glam::{Mat4, Vec3};

#[allow(unused_imports)]
use spirv_std::num_traits::Float;

/// Source of the current frame model matrix for a vertex.
///
/// `()` stands in for meshes without joints, so unskinned permutations carry
/// no joint inputs at all.
pub trait Skinning {
    /// Per-vertex joint indices, `()` when the mesh has none.
    type JointIndices: Copy;
    /// Per-vertex joint weights, `()` when the mesh has none.
    type JointWeights: Copy;

    /// Local to world transform of one vertex.
    fn skin_model(
        &self,
        mesh: &Mesh,
        joint_indices: Self::JointIndices,
        joint_weights: Self::JointWeights,
    ) -> Mat4;

    /// World space normal for a vertex transformed by `model`.
    fn skin_normals(mesh: &Mesh, model: Mat4, normal: Vec3) -> Vec3;
}

impl Skinning for () {
    type JointIndices = ();
    type JointWeights = ();

    fn skin_model(&self, mesh: &Mesh, (): (), (): ()) -> Mat4 {
        mesh.model
    }

    // The mesh uniform carries a precomputed inverse-transpose, so `model` is
    // not needed.
    fn skin_normals(mesh: &Mesh, _model: Mat4, normal: Vec3) -> Vec3 {
        mesh.mesh_normal_local_to_world(normal)
    }
}

/// Source of the previous frame model matrix, only bound by motion vector
/// permutations.
///
/// Takes the same joint indices and weights as the current frame; only the
/// joint matrices differ.
pub trait PreviousSkinning<I, W> {
    fn skin_prev_model(&self, mesh: &Mesh, indexes: I, weights: W) -> Mat4;
}

impl<I, W> PreviousSkinning<I, W> for () {
    fn skin_prev_model(&self, mesh: &Mesh, _: I, _: W) -> Mat4 {
        mesh.previous_model
    }
}

#[cfg(test)]
mod tests {
    use spirv_std::glam::{Mat4, Vec3};

    use super::{PreviousSkinning, Skinning};
    use crate::prelude::Mesh;

    fn mesh() -> Mesh {
        let model = Mat4::from_rotation_z(0.5);
        Mesh {
            model,
            previous_model: Mat4::from_translation(Vec3::X),
            inverse_transpose_model: model,
            flags: 0,
        }
    }

    #[test]
    fn unskinned_model_is_mesh_model() {
        let mesh = mesh();
        assert_eq!(().skin_model(&mesh, (), ()), mesh.model);
    }

    #[test]
    fn unskinned_previous_model_is_mesh_previous_model() {
        let mesh = mesh();
        assert_eq!(().skin_prev_model(&mesh, (), ()), mesh.previous_model);
    }

    #[test]
    fn unskinned_normals_ignore_model_argument() {
        let mesh = mesh();
        let normal = <() as Skinning>::skin_normals(&mesh, Mat4::ZERO, Vec3::X);
        assert!(normal.abs_diff_eq(Mat4::from_rotation_z(0.5).transform_vector3(Vec3::X), 1e-5));
    }
}
