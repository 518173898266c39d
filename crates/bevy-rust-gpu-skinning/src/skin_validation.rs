//! Asset-time checks for the skin binding preconditions the vertex shader
//! relies on but never verifies.
//!
//! Every joint index must address the skeleton's joint matrices, weights must
//! be finite and non-negative, and they must sum to one. Run these when a mesh
//! is imported or its skeleton changes, never per frame.

use bevy::render::mesh::{Mesh, VertexAttributeValues};
use thiserror::Error;

use skinning_rust::prelude::MAX_JOINTS;

/// Allowed distance of a vertex's weight sum from one.
pub const WEIGHT_SUM_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkinValidationError {
    #[error("skeleton has {joint_count} joints, more than the {max_joints} allowed")]
    TooManyJoints {
        joint_count: usize,
        max_joints: usize,
    },

    #[error("vertex {vertex}: joint index {index} is out of range for {joint_count} joints")]
    JointIndexOutOfRange {
        vertex: usize,
        index: u32,
        joint_count: usize,
    },

    #[error("vertex {vertex}: joint weight {weight} is negative or not finite")]
    InvalidWeight { vertex: usize, weight: f32 },

    #[error("vertex {vertex}: joint weights sum to {sum}, expected 1")]
    WeightSum { vertex: usize, sum: f32 },

    #[error("mesh is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("mesh {0} attribute has an unsupported format")]
    UnsupportedFormat(&'static str),

    #[error("mesh has {indices} joint index entries but {weights} joint weight entries")]
    LengthMismatch { indices: usize, weights: usize },
}

/// Checks a skeleton fits in `max_joints`, itself capped by [`MAX_JOINTS`].
pub fn validate_joint_count(
    joint_count: usize,
    max_joints: usize,
) -> Result<(), SkinValidationError> {
    let max_joints = max_joints.min(MAX_JOINTS);
    if joint_count > max_joints {
        return Err(SkinValidationError::TooManyJoints {
            joint_count,
            max_joints,
        });
    }
    Ok(())
}

pub fn validate_skin_binding(
    vertex: usize,
    indices: [u32; 4],
    weights: [f32; 4],
    joint_count: usize,
) -> Result<(), SkinValidationError> {
    if let Some(&index) = indices.iter().find(|&&index| index as usize >= joint_count) {
        return Err(SkinValidationError::JointIndexOutOfRange {
            vertex,
            index,
            joint_count,
        });
    }

    if let Some(&weight) = weights
        .iter()
        .find(|weight| !weight.is_finite() || **weight < 0.0)
    {
        return Err(SkinValidationError::InvalidWeight { vertex, weight });
    }

    let sum: f32 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(SkinValidationError::WeightSum { vertex, sum });
    }

    Ok(())
}

/// Checks every vertex of a skinned mesh against a skeleton of `joint_count`
/// joints.
pub fn validate_mesh_skin(mesh: &Mesh, joint_count: usize) -> Result<(), SkinValidationError> {
    validate_joint_count(joint_count, MAX_JOINTS)?;

    let indices = joint_indices(mesh)?;
    let weights = match mesh.attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT) {
        Some(VertexAttributeValues::Float32x4(weights)) => weights,
        Some(_) => return Err(SkinValidationError::UnsupportedFormat("joint weight")),
        None => return Err(SkinValidationError::MissingAttribute("joint weight")),
    };

    if indices.len() != weights.len() {
        return Err(SkinValidationError::LengthMismatch {
            indices: indices.len(),
            weights: weights.len(),
        });
    }

    indices
        .into_iter()
        .zip(weights.iter())
        .enumerate()
        .try_for_each(|(vertex, (indices, weights))| {
            validate_skin_binding(vertex, indices, *weights, joint_count)
        })
}

fn joint_indices(mesh: &Mesh) -> Result<Vec<[u32; 4]>, SkinValidationError> {
    match mesh.attribute(Mesh::ATTRIBUTE_JOINT_INDEX) {
        Some(VertexAttributeValues::Uint16x4(indices)) => Ok(indices
            .iter()
            .map(|index| index.map(u32::from))
            .collect()),
        Some(VertexAttributeValues::Uint32x4(indices)) => Ok(indices.clone()),
        Some(_) => Err(SkinValidationError::UnsupportedFormat("joint index")),
        None => Err(SkinValidationError::MissingAttribute("joint index")),
    }
}
