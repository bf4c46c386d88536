use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// ALGORITHM IDENTITY
// ============================================================================

/// Names one configured algorithm: implementation name + configuration set.
/// The same implementation registered under two configuration sets yields
/// two distinct, independently cached instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlgId {
    pub name: String,
    pub config: String,
}

impl AlgId {
    pub fn new(name: &str, config: &str) -> Self {
        Self {
            name: name.to_string(),
            config: config.to_string(),
        }
    }
}

impl fmt::Display for AlgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.config)
    }
}

// ============================================================================
// CONFIGURATION SETS
// ============================================================================

/// A single configuration parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Num(f64),
    Text(String),
}

/// One named parameter set for one algorithm: scalar parameters plus the
/// sub-algorithms the algorithm declares it needs. Sub-algorithm references
/// are resolved by the registry before the owning algorithm is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSet {
    #[serde(default)]
    pub params: HashMap<String, ParamValue>,
    #[serde(default)]
    pub sub_algs: HashMap<String, AlgId>,
}

impl ConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), ParamValue::Num(value));
        self
    }

    pub fn set_text(mut self, key: &str, value: &str) -> Self {
        self.params
            .insert(key.to_string(), ParamValue::Text(value.to_string()));
        self
    }

    pub fn set_flag(mut self, key: &str, value: bool) -> Self {
        self.params.insert(key.to_string(), ParamValue::Flag(value));
        self
    }

    pub fn set_sub_alg(mut self, key: &str, id: AlgId) -> Self {
        self.sub_algs.insert(key.to_string(), id);
        self
    }

    pub fn num(&self, key: &str) -> Option<f64> {
        match self.params.get(key) {
            Some(ParamValue::Num(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn num_or(&self, key: &str, default: f64) -> f64 {
        self.num(key).unwrap_or(default)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.params.get(key) {
            Some(ParamValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        match self.params.get(key) {
            Some(ParamValue::Flag(v)) => *v,
            _ => default,
        }
    }

    pub fn sub_alg(&self, key: &str) -> Option<&AlgId> {
        self.sub_algs.get(key)
    }
}

// ============================================================================
// REGISTRY ERRORS
// ============================================================================

/// Configuration-fatal failures. A partially configured model would produce
/// physically wrong results indistinguishable from correct ones, so these
/// abort setup rather than degrade.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no algorithm registered under the name '{0}'")]
    UnknownAlgorithm(String),

    #[error("no configuration set '{0}' is known")]
    MissingConfig(AlgId),

    #[error("algorithm '{parent}' declares sub-algorithm '{key}' but its configuration names none")]
    MissingSubAlg { parent: AlgId, key: String },

    #[error("sub-algorithm '{key}' of '{parent}' resolved to '{id}', which lacks the {expected} capability")]
    SubAlgCapability {
        parent: AlgId,
        key: String,
        id: AlgId,
        expected: &'static str,
    },

    #[error("sub-algorithm dependency cycle involving '{0}'")]
    DependencyCycle(AlgId),

    #[error("algorithm '{id}' does not provide the {expected} capability")]
    WrongCapability { id: AlgId, expected: &'static str },

    #[error("configuration set '{id}' is missing required parameter '{key}'")]
    MissingParam { id: AlgId, key: String },
}
