//! Host side of the rust-gpu skinning shaders.
//!
//! Resolves a mesh pipeline's skinning configuration into shader defs, entry
//! point names and bind group layout entries that match what
//! `skinning_rust::mesh::entry_points` exports, and checks skin data before
//! it reaches the GPU.

pub mod config;
pub mod module_meta;
pub mod skin_binding_layout;
pub mod skin_validation;
pub mod skinning_entry_point;
pub mod skinning_pipeline_key;

pub mod prelude;
