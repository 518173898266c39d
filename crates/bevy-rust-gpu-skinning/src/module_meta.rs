use std::{fs::File, io::BufReader, path::Path};

use bevy::prelude::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleMetaError {
    #[error("failed to read shader module metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse shader module metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata emitted next to a compiled SPIR-V module (`*.spv.json`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMeta {
    pub entry_points: Vec<String>,
    pub module: String,
}

impl ModuleMeta {
    pub fn from_json(json: &str) -> Result<Self, ModuleMetaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModuleMetaError> {
        let path = path.as_ref();
        debug!("Loading shader module metadata from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.entry_points.iter().any(|e| e == entry_point)
    }

    /// Requested entry points the module doesn't export.
    pub fn missing_entry_points<'a>(
        &self,
        requested: impl IntoIterator<Item = &'a String>,
    ) -> Vec<String> {
        let missing: Vec<String> = requested
            .into_iter()
            .filter(|entry_point| !self.contains(entry_point))
            .cloned()
            .collect();

        for entry_point in &missing {
            warn!("Missing entry point {entry_point} in {}", self.module);
        }

        missing
    }
}

/// Permutations a shader module was asked for but doesn't export, keyed by
/// shader name and written out so the permutations can be added.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingEntryPoints {
    pub entry_points: std::collections::BTreeMap<String, Vec<Vec<String>>>,
}

impl MissingEntryPoints {
    pub fn insert(&mut self, shader: &str, permutation: Vec<String>) -> bool {
        let permutations = self.entry_points.entry(shader.to_string()).or_default();
        if permutations.contains(&permutation) {
            return false;
        }

        debug!("New permutation {permutation:?} for {shader}");
        permutations.push(permutation);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.entry_points.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ModuleMetaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{MissingEntryPoints, ModuleMeta, ModuleMetaError};

    const META: &str = r#"{
        "entry_points": [
            "mesh::entry_points::vertex__none__none__bindgroup_2",
            "mesh::entry_points::vertex__some__none__bindgroup_2"
        ],
        "module": "shader.spv"
    }"#;

    #[test]
    fn parses_module_meta() {
        let meta = ModuleMeta::from_json(META).unwrap();
        assert_eq!(meta.module, "shader.spv");
        assert!(meta.contains("mesh::entry_points::vertex__some__none__bindgroup_2"));
        assert!(!meta.contains("mesh::entry_points::vertex__some__some__bindgroup_2"));
    }

    #[test]
    fn reports_missing_entry_points() {
        let meta = ModuleMeta::from_json(META).unwrap();
        let requested = vec![
            "mesh::entry_points::vertex__some__none__bindgroup_2".to_string(),
            "mesh::entry_points::vertex__some__some__bindgroup_2".to_string(),
        ];
        assert_eq!(
            meta.missing_entry_points(&requested),
            vec!["mesh::entry_points::vertex__some__some__bindgroup_2"]
        );
    }

    #[test]
    fn malformed_meta_is_a_json_error() {
        let error = ModuleMeta::from_json("{ \"module\": 3 }").unwrap_err();
        assert!(matches!(error, ModuleMetaError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = ModuleMeta::load("does/not/exist.spv.json").unwrap_err();
        assert!(matches!(error, ModuleMetaError::Io(_)));
    }

    #[test]
    fn missing_permutations_are_deduplicated() {
        let mut missing = MissingEntryPoints::default();
        let permutation = vec!["some".to_string(), "some".to_string(), "bindgroup_2".to_string()];

        assert!(missing.insert("mesh::entry_points::vertex", permutation.clone()));
        assert!(!missing.insert("mesh::entry_points::vertex", permutation));
        assert_eq!(missing.entry_points["mesh::entry_points::vertex"].len(), 1);

        let json = missing.to_json().unwrap();
        assert!(json.contains("bindgroup_2"));
    }
}
