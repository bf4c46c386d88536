use crate::core::algorithm::XSecAlgRef;
use crate::registry::{AlgId, AlgorithmRegistry, RegistryError};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// GENERATOR LIST
// ============================================================================

/// The operator-selected, ordered set of enabled cross-section models.
///
/// Order matters: it is the deterministic tie-break when two models claim
/// the same discrete channel during map construction (earlier wins).
#[derive(Default)]
pub struct GeneratorList {
    entries: Vec<XSecAlgRef>,
}

impl GeneratorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every id through the registry, in order. Any resolution
    /// failure is configuration-fatal and aborts list construction.
    pub fn resolve(
        registry: &mut AlgorithmRegistry,
        ids: &[AlgId],
    ) -> Result<Arc<GeneratorList>, RegistryError> {
        let mut list = GeneratorList::new();
        for id in ids {
            list.push(registry.resolve_xsec(id)?);
        }
        Ok(Arc::new(list))
    }

    pub fn push(&mut self, alg: XSecAlgRef) {
        self.entries.push(alg);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, XSecAlgRef> {
        self.entries.iter()
    }
}

impl fmt::Display for GeneratorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for alg in &self.entries {
            writeln!(f, "{}", alg.id())?;
        }
        Ok(())
    }
}
