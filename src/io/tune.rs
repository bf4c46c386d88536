use crate::registry::{AlgId, AlgorithmRegistry, ConfigSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// TUNE FILES
// ============================================================================

/// One algorithm configuration carried by a tune file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuneConfig {
    pub name: String,
    pub config: String,
    #[serde(flatten)]
    pub set: ConfigSet,
}

/// An operator tune: which models form the generator list, and any
/// configuration sets that replace the built-in defaults.
///
/// An empty `generator_list` means "keep the default generator list";
/// config entries always override the default set of the same `AlgId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tune {
    #[serde(default)]
    pub generator_list: Vec<AlgId>,
    #[serde(default)]
    pub configs: Vec<TuneConfig>,
}

impl Tune {
    /// Reads and parses a JSON tune file.
    pub fn load(path: &Path) -> Result<Tune> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read tune file: {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed tune file: {:?}", path))
    }

    /// Installs every configuration set carried by the tune into the
    /// registry, replacing defaults of the same identity.
    pub fn apply(&self, registry: &mut AlgorithmRegistry) {
        for entry in &self.configs {
            registry.add_config(AlgId::new(&entry.name, &entry.config), entry.set.clone());
        }
    }

    /// The generator list this tune selects, falling back to `default_ids`
    /// when the tune names none.
    pub fn generator_ids(&self, default_ids: Vec<AlgId>) -> Vec<AlgId> {
        if self.generator_list.is_empty() {
            default_ids
        } else {
            self.generator_list.clone()
        }
    }
}
