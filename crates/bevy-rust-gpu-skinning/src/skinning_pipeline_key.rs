use bevy::render::mesh::{Mesh, MeshVertexBufferLayout, VertexAttributeDescriptor};

pub const SKINNED_DEF: &str = "SKINNED";
pub const MOTION_VECTOR_PREPASS_DEF: &str = "MOTION_VECTOR_PREPASS";
pub const MESH_BINDGROUP_1_DEF: &str = "MESH_BINDGROUP_1";

bitflags::bitflags! {
    /// The parts of a mesh pipeline's configuration that affect skinning.
    ///
    /// Resolved once per pipeline specialization, never per vertex.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SkinningPipelineKey: u32 {
        /// The mesh carries joint indices and weights.
        const SKINNED = 1 << 0;
        /// The pipeline writes motion vectors and needs the previous frame.
        const MOTION_VECTOR_PREPASS = 1 << 1;
        /// Mesh resources live in bind group 1 instead of 2.
        const MESH_BINDGROUP_1 = 1 << 2;
    }
}

impl SkinningPipelineKey {
    const DEFS: [(SkinningPipelineKey, &'static str); 3] = [
        (SkinningPipelineKey::SKINNED, SKINNED_DEF),
        (
            SkinningPipelineKey::MOTION_VECTOR_PREPASS,
            MOTION_VECTOR_PREPASS_DEF,
        ),
        (SkinningPipelineKey::MESH_BINDGROUP_1, MESH_BINDGROUP_1_DEF),
    ];

    pub fn from_shader_defs(shader_defs: &[String]) -> Self {
        Self::DEFS
            .iter()
            .filter(|(_, def)| shader_defs.iter().any(|d| d == def))
            .fold(Self::empty(), |key, (flag, _)| key | *flag)
    }

    pub fn shader_defs(&self) -> Vec<String> {
        Self::DEFS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, def)| def.to_string())
            .collect()
    }

    pub fn is_skinned(&self) -> bool {
        self.contains(Self::SKINNED)
    }

    pub fn motion_vectors(&self) -> bool {
        self.contains(Self::MOTION_VECTOR_PREPASS)
    }
}

/// A mesh is skinned when its vertex layout carries both joint attributes.
pub fn is_skinned(layout: &MeshVertexBufferLayout) -> bool {
    layout.contains(Mesh::ATTRIBUTE_JOINT_INDEX) && layout.contains(Mesh::ATTRIBUTE_JOINT_WEIGHT)
}

/// Joint attribute descriptors at `offset` and `offset + 1`.
///
/// The skinned entry points in `skinning_rust` read them at
/// [`JOINT_INDEX_LOCATION`](skinning_rust::prelude::JOINT_INDEX_LOCATION);
/// shaders with more vertex inputs pass their own offset.
pub fn skinning_vertex_attributes(offset: u32) -> [VertexAttributeDescriptor; 2] {
    [
        Mesh::ATTRIBUTE_JOINT_INDEX.at_shader_location(offset),
        Mesh::ATTRIBUTE_JOINT_WEIGHT.at_shader_location(offset + 1),
    ]
}
