//! Descriptor slots used by the entry points in [`entry_points`](super::entry_points).
//!
//! `#[spirv]` attributes need literals, so these mirror the values written
//! there for the host side to build matching bind group layouts.

pub const VIEW_DESCRIPTOR_SET: u32 = 0;
pub const VIEW_BINDING: u32 = 0;
pub const PREVIOUS_VIEW_PROJECTION_BINDING: u32 = 2;

/// Mesh resources when the pipeline has a material bind group at set 1.
pub const MESH_DESCRIPTOR_SET: u32 = 2;
/// Mesh resources for pipelines without a material bind group (`MESH_BINDGROUP_1`).
pub const MESH_BINDGROUP_1_DESCRIPTOR_SET: u32 = 1;

pub const MESH_BINDING: u32 = 0;
pub const JOINT_MATRICES_BINDING: u32 = 1;
pub const PREVIOUS_JOINT_MATRICES_BINDING: u32 = 6;

/// Vertex input location of the joint indices; joint weights follow at the
/// next location.
pub const JOINT_INDEX_LOCATION: u32 = 2;
