pub use super::{
    config::*, module_meta::*, skin_binding_layout::*, skin_validation::*,
    skinning_entry_point::*, skinning_pipeline_key::*,
};
