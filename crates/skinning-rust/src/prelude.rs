pub use super::{
    mesh::{
        bindings::*, skinned_mesh::*, skinning::*, vertex_previous_position::*, *,
    },
    mesh_view::{motion_vector::*, view::*, *},
    skinning::*,
};
