use crate::core::interaction::Interaction;
use crate::core::algorithm::Hadronizer;
use crate::core::pdg;
use crate::registry::{AlgId, AlgorithmHandle, ConfigSet, RegistryError, SubAlgs};
use std::sync::Arc;

// ============================================================================
// HADRONIZATION (opaque stub)
// ============================================================================

/// Deterministic stand-in for a string-fragmentation backend. The mean
/// charged multiplicity follows the usual a + b ln(W^2) parametrization;
/// everything else about real hadronization lives outside this framework.
pub struct StringFragmentation {
    id: AlgId,
    alpha: f64,
    beta: f64,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    _subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    Ok(AlgorithmHandle::Hadronizer(Arc::new(StringFragmentation {
        id,
        alpha: config.num_or("alpha", 0.4),
        beta: config.num_or("beta", 1.1),
    })))
}

impl Hadronizer for StringFragmentation {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn hadronize(&self, interaction: &Interaction) -> Vec<i32> {
        let w = interaction.kine.w.unwrap_or(1.5).max(1.1);
        let mean = self.alpha + self.beta * (w * w).ln();
        let n_pi = (mean.round() as usize).max(1);

        let mut out = Vec::with_capacity(n_pi + 1);
        out.push(pdg::PROTON);
        for k in 0..n_pi {
            out.push(match k % 3 {
                0 => pdg::PI_PLUS,
                1 => pdg::PI_MINUS,
                _ => pdg::PI_ZERO,
            });
        }
        out
    }
}
