use bevy::render::render_resource::{
    BindGroupLayoutEntry, BindingType, BufferBindingType, BufferSize, ShaderStages,
};
use serde::{Deserialize, Serialize};

use skinning_rust::prelude::{
    JOINT_MATRICES_BINDING, MAX_JOINTS, MESH_BINDGROUP_1_DESCRIPTOR_SET, MESH_DESCRIPTOR_SET,
    PREVIOUS_JOINT_MATRICES_BINDING,
};

use crate::prelude::SkinningPipelineKey;

/// Size in bytes of one skeleton's joint matrices.
pub const JOINT_BUFFER_SIZE: usize = MAX_JOINTS * std::mem::size_of::<[f32; 16]>();

/// Which bind group holds the mesh resources.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshBindGroup {
    /// Bind group 2, after view and material.
    #[default]
    Two,
    /// Bind group 1, for pipelines without a material bind group.
    One,
}

impl MeshBindGroup {
    pub fn descriptor_set(&self) -> u32 {
        match self {
            MeshBindGroup::Two => MESH_DESCRIPTOR_SET,
            MeshBindGroup::One => MESH_BINDGROUP_1_DESCRIPTOR_SET,
        }
    }
}

impl From<SkinningPipelineKey> for MeshBindGroup {
    fn from(key: SkinningPipelineKey) -> Self {
        if key.contains(SkinningPipelineKey::MESH_BINDGROUP_1) {
            MeshBindGroup::One
        } else {
            MeshBindGroup::Two
        }
    }
}

/// Where a pipeline's skinning resources are bound, chosen once per pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinBindingLayout {
    pub mesh_bind_group: MeshBindGroup,
    /// Binding of the current frame joint matrices, if the mesh is skinned.
    pub joint_matrices: Option<u32>,
    /// Binding of the previous frame joint matrices, if the mesh is skinned
    /// and motion vectors are requested.
    pub previous_joint_matrices: Option<u32>,
}

impl SkinBindingLayout {
    pub fn new(key: SkinningPipelineKey) -> Self {
        let joint_matrices = key.is_skinned().then_some(JOINT_MATRICES_BINDING);
        let previous_joint_matrices = (key.is_skinned() && key.motion_vectors())
            .then_some(PREVIOUS_JOINT_MATRICES_BINDING);

        SkinBindingLayout {
            mesh_bind_group: key.into(),
            joint_matrices,
            previous_joint_matrices,
        }
    }

    pub fn descriptor_set(&self) -> u32 {
        self.mesh_bind_group.descriptor_set()
    }

    /// Skinning entries of the mesh bind group layout.
    ///
    /// Joint buffers use dynamic offsets so one buffer serves every skeleton
    /// drawn in a pass.
    pub fn layout_entries(&self) -> Vec<BindGroupLayoutEntry> {
        [self.joint_matrices, self.previous_joint_matrices]
            .into_iter()
            .flatten()
            .map(joint_buffer)
            .collect()
    }
}

fn joint_buffer(binding: u32) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::VERTEX,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size: BufferSize::new(JOINT_BUFFER_SIZE as u64),
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use bevy::render::render_resource::{BindingType, BufferBindingType, ShaderStages};

    use super::{MeshBindGroup, SkinBindingLayout, JOINT_BUFFER_SIZE};
    use crate::prelude::SkinningPipelineKey;

    #[test]
    fn joint_buffer_holds_max_joints() {
        assert_eq!(JOINT_BUFFER_SIZE, 256 * 64);
    }

    #[test]
    fn unskinned_layout_has_no_joint_entries() {
        let layout = SkinBindingLayout::new(SkinningPipelineKey::MOTION_VECTOR_PREPASS);
        assert_eq!(layout.joint_matrices, None);
        assert_eq!(layout.previous_joint_matrices, None);
        assert!(layout.layout_entries().is_empty());
    }

    #[test]
    fn previous_joints_only_with_motion_vectors() {
        let layout = SkinBindingLayout::new(SkinningPipelineKey::SKINNED);
        assert_eq!(layout.joint_matrices, Some(1));
        assert_eq!(layout.previous_joint_matrices, None);
        assert_eq!(layout.layout_entries().len(), 1);

        let layout = SkinBindingLayout::new(
            SkinningPipelineKey::SKINNED | SkinningPipelineKey::MOTION_VECTOR_PREPASS,
        );
        assert_eq!(layout.previous_joint_matrices, Some(6));

        let entries = layout.layout_entries();
        assert_eq!(
            entries.iter().map(|e| e.binding).collect::<Vec<_>>(),
            vec![1, 6]
        );
        for entry in entries {
            assert_eq!(entry.visibility, ShaderStages::VERTEX);
            match entry.ty {
                BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset,
                    min_binding_size,
                } => {
                    assert!(has_dynamic_offset);
                    assert_eq!(
                        min_binding_size.map(|size| size.get()),
                        Some(JOINT_BUFFER_SIZE as u64)
                    );
                }
                ty => panic!("unexpected binding type {ty:?}"),
            }
        }
    }

    #[test]
    fn mesh_bind_group_follows_key() {
        let layout = SkinBindingLayout::new(SkinningPipelineKey::SKINNED);
        assert_eq!(layout.mesh_bind_group, MeshBindGroup::Two);
        assert_eq!(layout.descriptor_set(), 2);

        let layout = SkinBindingLayout::new(
            SkinningPipelineKey::SKINNED | SkinningPipelineKey::MESH_BINDGROUP_1,
        );
        assert_eq!(layout.mesh_bind_group, MeshBindGroup::One);
        assert_eq!(layout.descriptor_set(), 1);
    }
}
