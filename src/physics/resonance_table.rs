use crate::core::interaction::Resonance;
use crate::core::algorithm::ResonanceTable;
use crate::registry::{AlgId, AlgorithmHandle, ConfigSet, RegistryError, SubAlgs};
use std::sync::Arc;

// ============================================================================
// BARYON RESONANCE PARAMETER TABLE
// ============================================================================

/// PDG-sourced resonance parameters. The optional `width-scale` parameter
/// lets a tune broaden or narrow every resonance uniformly.
pub struct BaryonResTable {
    id: AlgId,
    width_scale: f64,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    _subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    Ok(AlgorithmHandle::ResonanceTable(Arc::new(BaryonResTable {
        id,
        width_scale: config.num_or("width-scale", 1.0),
    })))
}

/// (mass GeV, width GeV, BW norm, orbital angular momentum)
fn params(res: Resonance) -> (f64, f64, f64, i32) {
    match res {
        Resonance::P33_1232 => (1.232, 0.117, 1.0, 1),
        Resonance::S11_1535 => (1.535, 0.150, 1.0, 0),
        Resonance::D13_1520 => (1.515, 0.115, 1.0, 2),
        Resonance::S11_1650 => (1.655, 0.135, 1.0, 0),
        Resonance::F15_1680 => (1.685, 0.120, 1.0, 3),
    }
}

impl ResonanceTable for BaryonResTable {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn mass(&self, res: Resonance) -> f64 {
        params(res).0
    }

    fn width(&self, res: Resonance) -> f64 {
        params(res).1 * self.width_scale
    }

    fn breit_wigner_norm(&self, res: Resonance) -> f64 {
        params(res).2
    }

    fn orbital_angular_mom(&self, res: Resonance) -> i32 {
        params(res).3
    }
}
