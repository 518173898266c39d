use once_cell::sync::Lazy;

use crate::prelude::{MESH_BINDGROUP_1_DEF, MOTION_VECTOR_PREPASS_DEF, SKINNED_DEF};

pub type SkinningEntryPointName = &'static str;
pub type SkinningEntryPointMappings =
    &'static [(&'static [(&'static str, &'static str)], &'static str)];

/// Maps a pipeline's shader defs onto one of a shader's exported entry
/// points.
///
/// Each mapping adds a `__`-separated segment: the value paired with the
/// first defined shader def, or the fallback when none are defined.
pub trait SkinningEntryPoint: 'static + Send + Sync {
    const NAME: SkinningEntryPointName;
    const MAPPINGS: SkinningEntryPointMappings;
    /// Shader defs a pipeline must set before this entry point may be used.
    const REQUIRED_DEFS: &'static [&'static str] = &[];

    fn permutation(shader_defs: &[String]) -> Vec<String> {
        Self::MAPPINGS
            .iter()
            .map(|(defined, undefined)| {
                defined
                    .iter()
                    .find_map(|(def, mapping)| {
                        shader_defs
                            .iter()
                            .any(|shader_def| shader_def == def)
                            .then_some(*mapping)
                    })
                    .unwrap_or(*undefined)
                    .to_string()
            })
            .collect()
    }

    fn build(shader_defs: &[String]) -> String {
        Self::permutation(shader_defs)
            .into_iter()
            .fold(Self::NAME.to_string(), |entry_point, segment| {
                entry_point + "__" + &segment
            })
    }

    /// The entry point for a pipeline, or `None` when a required def is unset.
    fn entry_point(shader_defs: &[String]) -> Option<String> {
        Self::REQUIRED_DEFS
            .iter()
            .all(|required| shader_defs.iter().any(|shader_def| shader_def == required))
            .then(|| Self::build(shader_defs))
    }

    /// Every entry point name the mappings can produce.
    fn permutations() -> Vec<String> {
        Self::MAPPINGS
            .iter()
            .fold(vec![Self::NAME.to_string()], |names, (defined, undefined)| {
                let segments: Vec<_> = defined
                    .iter()
                    .map(|(_, mapping)| *mapping)
                    .chain(std::iter::once(*undefined))
                    .collect();

                names
                    .iter()
                    .flat_map(|name| segments.iter().map(move |segment| format!("{name}__{segment}")))
                    .collect()
            })
    }
}

/// The mesh vertex stage exported by `skinning_rust::mesh::entry_points`.
pub enum SkinnedMeshVertex {}

impl SkinningEntryPoint for SkinnedMeshVertex {
    const NAME: SkinningEntryPointName = "mesh::entry_points::vertex";
    const MAPPINGS: SkinningEntryPointMappings = &[
        (&[(SKINNED_DEF, "some")], "none"),
        (&[(MOTION_VECTOR_PREPASS_DEF, "some")], "none"),
        (&[(MESH_BINDGROUP_1_DEF, "bindgroup_1")], "bindgroup_2"),
    ];
}

/// The motion vector prepass fragment stage.
///
/// It reads the previous world position, which only the motion vector
/// vertex permutations write.
pub enum PrepassFragment {}

impl SkinningEntryPoint for PrepassFragment {
    const NAME: SkinningEntryPointName = "mesh::entry_points::prepass_fragment";
    const MAPPINGS: SkinningEntryPointMappings = &[];
    const REQUIRED_DEFS: &'static [&'static str] = &[MOTION_VECTOR_PREPASS_DEF];
}

/// All entry points the skinning shader module is expected to export.
pub static SKINNING_ENTRY_POINTS: Lazy<Vec<String>> = Lazy::new(|| {
    SkinnedMeshVertex::permutations()
        .into_iter()
        .chain(PrepassFragment::permutations())
        .collect()
});
