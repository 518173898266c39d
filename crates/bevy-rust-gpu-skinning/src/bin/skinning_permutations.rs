use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{info, warn};

use bevy_rust_gpu_skinning::prelude::{
    MissingEntryPoints, ModuleMeta, PrepassFragment, SkinBindingLayout, SkinnedMeshVertex,
    SkinningConfig, SkinningEntryPoint, SKINNING_ENTRY_POINTS,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct SkinningPermutations {
    /// Skinning config JSON, defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Resolve the entry point for a skinned mesh
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    skinned: bool,
    /// Check a skeleton of this many joints against the config's `max_joints`
    #[arg(short, long)]
    joint_count: Option<usize>,
    /// `*.spv.json` metadata of the compiled shader module to check
    #[arg(short, long)]
    module_meta: Option<PathBuf>,
    /// Write the missing permutations to this path
    #[arg(short, long)]
    write: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let args = SkinningPermutations::parse();

    let config = match &args.config {
        Some(path) => SkinningConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SkinningConfig::default(),
    };
    info!("{config:?}");

    let key = config.pipeline_key(args.skinned);
    let shader_defs = key.shader_defs();
    info!("Shader defs: {shader_defs:?}");
    info!("Vertex entry point: {}", SkinnedMeshVertex::build(&shader_defs));
    match PrepassFragment::entry_point(&shader_defs) {
        Some(entry_point) => info!("Fragment entry point: {entry_point}"),
        None => info!("No prepass fragment without motion vectors"),
    }

    if let Some(joint_count) = args.joint_count {
        config.validate_joint_count(joint_count)?;
        info!("{joint_count} joints fit in {} max joints", config.max_joints);
    }

    let layout = SkinBindingLayout::new(key);
    info!(
        "Joint matrices: set {} binding {:?}, previous {:?}",
        layout.descriptor_set(),
        layout.joint_matrices,
        layout.previous_joint_matrices
    );

    println!();
    info!("Entry points:");
    for entry_point in SKINNING_ENTRY_POINTS.iter() {
        info!("  {entry_point}");
    }
    println!();

    let Some(path) = &args.module_meta else {
        return Ok(());
    };

    let meta = ModuleMeta::load(path).with_context(|| format!("loading {}", path.display()))?;

    let mut missing = MissingEntryPoints::default();
    for entry_point in meta.missing_entry_points(SKINNING_ENTRY_POINTS.iter()) {
        let (shader, permutation) = split_entry_point(&entry_point);
        missing.insert(shader, permutation);
    }

    if missing.is_empty() {
        info!("{} exports every skinning entry point", meta.module);
    } else {
        warn!(
            "{} is missing {} skinning permutations",
            meta.module,
            missing.entry_points.values().map(Vec::len).sum::<usize>()
        );
    }

    if let Some(out) = &args.write {
        fs::write(out, missing.to_json()?)
            .with_context(|| format!("writing {}", out.display()))?;
        info!("Wrote missing permutations to {}", out.display());
    }

    Ok(())
}

/// Splits `name__seg__seg` into the shader name and its permutation segments.
fn split_entry_point(entry_point: &str) -> (&str, Vec<String>) {
    [SkinnedMeshVertex::NAME, PrepassFragment::NAME]
        .into_iter()
        .find_map(|name| {
            let segments = entry_point.strip_prefix(name)?;
            if !segments.is_empty() && !segments.starts_with("__") {
                return None;
            }
            Some((
                name,
                segments
                    .split("__")
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect(),
            ))
        })
        .unwrap_or((entry_point, Vec::new()))
}
