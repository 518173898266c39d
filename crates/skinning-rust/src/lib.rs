//! Linear blend skinning for rust-gpu vertex shaders.
//!
//! The math lives in [`skinning`]; [`mesh`] wires it into the mesh vertex
//! stage through the [`Skinning`](mesh::skinning::Skinning) trait family and
//! exports one `#[spirv(vertex)]` entry point per pipeline permutation.

#![no_std]

pub mod mesh;
pub mod mesh_view;
pub mod prelude;
pub mod skinning;
