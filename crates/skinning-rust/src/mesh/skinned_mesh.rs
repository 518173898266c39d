use spirv_std::glam::{Mat4, UVec4, Vec3, Vec4};

use crate::skinning::{skin_model, skin_normals};

use crate::prelude::{PreviousSkinning, Skinning};

use super::Mesh;

/// Maximum number of joints a single skinned mesh can reference.
///
/// Matches the uniform buffer size the host binds per skeleton.
pub const MAX_JOINTS: usize = 256;

/// One skeleton's joint matrices, already multiplied by their inverse bind
/// poses.
///
/// The current and previous frame are bound as two separate instances.
#[derive(Copy, Clone, PartialEq)]
#[repr(C)]
pub struct SkinnedMesh {
    pub data: [Mat4; MAX_JOINTS],
}

impl Default for SkinnedMesh {
    fn default() -> Self {
        SkinnedMesh {
            data: [Mat4::IDENTITY; MAX_JOINTS],
        }
    }
}

impl Skinning for SkinnedMesh {
    type JointIndices = UVec4;
    type JointWeights = Vec4;

    fn skin_model(&self, _: &Mesh, indexes: UVec4, weights: Vec4) -> Mat4 {
        skin_model(&self.data, indexes, weights)
    }

    fn skin_normals(_: &Mesh, model: Mat4, normal: Vec3) -> Vec3 {
        skin_normals(model, normal)
    }
}

impl PreviousSkinning<UVec4, Vec4> for SkinnedMesh {
    fn skin_prev_model(&self, _: &Mesh, indexes: UVec4, weights: Vec4) -> Mat4 {
        skin_model(&self.data, indexes, weights)
    }
}

#[cfg(test)]
mod tests {
    use spirv_std::glam::{Mat4, UVec4, Vec3, Vec4};

    use super::SkinnedMesh;
    use crate::prelude::{Mesh, PreviousSkinning, Skinning};

    fn skeleton(offset: f32) -> SkinnedMesh {
        let mut skin = SkinnedMesh::default();
        for (i, joint) in skin.data.iter_mut().enumerate() {
            *joint = Mat4::from_translation(Vec3::new(i as f32 + offset, 0.0, 0.0));
        }
        skin
    }

    #[test]
    fn blends_referenced_joints() {
        let skin = skeleton(0.0);
        let model = skin.skin_model(
            &Mesh::default(),
            UVec4::new(10, 20, 0, 0),
            Vec4::new(0.5, 0.5, 0.0, 0.0),
        );
        assert!(model.abs_diff_eq(Mat4::from_translation(Vec3::new(15.0, 0.0, 0.0)), 1e-5));
    }

    #[test]
    fn last_joint_is_addressable() {
        let skin = skeleton(0.0);
        let model = skin.skin_model(&Mesh::default(), UVec4::new(255, 0, 0, 0), Vec4::X);
        assert_eq!(model, skin.data[255]);
    }

    #[test]
    fn previous_frame_is_independent_of_current() {
        let current = skeleton(0.0);
        let mut previous = skeleton(100.0);
        let mesh = Mesh::default();
        let indexes = UVec4::new(1, 2, 3, 4);
        let weights = Vec4::new(0.4, 0.3, 0.2, 0.1);

        let model = current.skin_model(&mesh, indexes, weights);
        let prev_model = previous.skin_prev_model(&mesh, indexes, weights);
        assert!(!model.abs_diff_eq(prev_model, 1e-3));

        // Only the previous array changes: the current blend is untouched.
        previous.data[2] = Mat4::from_scale(Vec3::splat(3.0));
        assert_eq!(current.skin_model(&mesh, indexes, weights), model);
        assert_ne!(previous.skin_prev_model(&mesh, indexes, weights), prev_model);
    }

    #[test]
    fn current_frame_change_leaves_previous_untouched() {
        let mut current = skeleton(0.0);
        let previous = skeleton(100.0);
        let mesh = Mesh::default();
        let indexes = UVec4::new(7, 7, 9, 0);
        let weights = Vec4::new(0.25, 0.25, 0.5, 0.0);

        let prev_model = previous.skin_prev_model(&mesh, indexes, weights);
        current.data[7] = Mat4::from_rotation_x(1.0);
        current.data[9] = Mat4::ZERO;

        assert_eq!(previous.skin_prev_model(&mesh, indexes, weights), prev_model);
    }

    #[test]
    fn same_array_gives_same_model_for_both_frames() {
        let skin = skeleton(3.0);
        let mesh = Mesh::default();
        let indexes = UVec4::new(5, 6, 7, 8);
        let weights = Vec4::splat(0.25);
        assert_eq!(
            skin.skin_model(&mesh, indexes, weights),
            skin.skin_prev_model(&mesh, indexes, weights)
        );
    }
}
