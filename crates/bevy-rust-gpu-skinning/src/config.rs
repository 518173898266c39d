use std::{fs::File, io::BufReader, path::Path};

use bevy::{
    prelude::info,
    render::mesh::{Mesh, MeshVertexBufferLayout},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use skinning_rust::prelude::MAX_JOINTS;

use crate::prelude::{
    is_skinned, validate_joint_count, validate_mesh_skin, MeshBindGroup, SkinValidationError,
    SkinningPipelineKey,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read skinning config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse skinning config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "max_joints is {max_joints}, but joint buffers hold at most {}",
        MAX_JOINTS
    )]
    MaxJoints { max_joints: usize },
}

/// Per-application skinning settings, loaded from JSON.
///
/// Every field is optional:
///
/// ```json
/// { "motion_vectors": true, "mesh_bind_group": "one", "max_joints": 64 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinningConfig {
    /// Request the motion vector prepass permutations.
    pub motion_vectors: bool,
    pub mesh_bind_group: MeshBindGroup,
    /// Largest skeleton the application will bind. Meshes with more joints
    /// are rejected by [`SkinningConfig::validate_mesh`].
    pub max_joints: usize,
}

impl Default for SkinningConfig {
    fn default() -> Self {
        SkinningConfig {
            motion_vectors: false,
            mesh_bind_group: MeshBindGroup::default(),
            max_joints: MAX_JOINTS,
        }
    }
}

impl SkinningConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SkinningConfig = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading skinning config from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let config: SkinningConfig = serde_json::from_reader(reader)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.max_joints > MAX_JOINTS {
            return Err(ConfigError::MaxJoints {
                max_joints: self.max_joints,
            });
        }
        Ok(self)
    }

    pub fn pipeline_key(&self, is_skinned: bool) -> SkinningPipelineKey {
        let mut key = SkinningPipelineKey::empty();
        key.set(SkinningPipelineKey::SKINNED, is_skinned);
        key.set(SkinningPipelineKey::MOTION_VECTOR_PREPASS, self.motion_vectors);
        key.set(
            SkinningPipelineKey::MESH_BINDGROUP_1,
            self.mesh_bind_group == MeshBindGroup::One,
        );
        key
    }

    /// Pipeline key for a mesh, skinned when its layout carries joints.
    pub fn mesh_pipeline_key(&self, layout: &MeshVertexBufferLayout) -> SkinningPipelineKey {
        self.pipeline_key(is_skinned(layout))
    }

    pub fn validate_joint_count(&self, joint_count: usize) -> Result<(), SkinValidationError> {
        validate_joint_count(joint_count, self.max_joints)
    }

    /// Checks a skinned mesh bound to a skeleton of `joint_count` joints.
    pub fn validate_mesh(
        &self,
        mesh: &Mesh,
        joint_count: usize,
    ) -> Result<(), SkinValidationError> {
        self.validate_joint_count(joint_count)?;
        validate_mesh_skin(mesh, joint_count)
    }
}
