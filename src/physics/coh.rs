use crate::core::algorithm::{KinePhaseSpace, XSecAlgorithm};
use crate::core::interaction::{
    InitialState, Interaction, InteractionType, ProcessInfo, ScatteringType,
};
use crate::core::list::InteractionList;
use crate::core::pdg;
use crate::physics::{self, G2_SCALE};
use crate::registry::{AlgId, AlgorithmHandle, ConfigSet, RegistryError, SubAlgs};
use std::sync::Arc;

// ============================================================================
// COHERENT PION PRODUCTION
// ============================================================================

/// Coherent pion production off the nucleus as a whole. Free nucleons have
/// no coherent channel, so this model claims nothing for them; the struck
/// nucleon stays unset because the entire nucleus recoils.
pub struct CohPionProduction {
    id: AlgId,
    current: InteractionType,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    _subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    let current = physics::current_from_config(&id, config)?;
    Ok(AlgorithmHandle::XSec(Arc::new(CohPionProduction { id, current })))
}

impl XSecAlgorithm for CohPionProduction {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn valid_process(&self, interaction: &Interaction) -> bool {
        interaction.proc_info.scattering_type == ScatteringType::Coherent
            && interaction.proc_info.interaction_type == self.current
            && pdg::is_ion(interaction.init_state.target)
            && interaction.init_state.hit_nucleon.is_none()
            && (pdg::is_neutrino(interaction.init_state.probe)
                || pdg::is_anti_neutrino(interaction.init_state.probe))
    }

    fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList {
        let mut list = InteractionList::new();
        if !pdg::is_ion(init_state.target) {
            return list;
        }
        if !pdg::is_neutrino(init_state.probe) && !pdg::is_anti_neutrino(init_state.probe) {
            return list;
        }
        let mut init = init_state.clone();
        init.hit_nucleon = None;
        list.push(Interaction::new(
            init,
            ProcessInfo::new(self.current, ScatteringType::Coherent),
        ));
        list
    }

    fn xsec(&self, interaction: &Interaction, phase_space: KinePhaseSpace) -> f64 {
        if !self.valid_process(interaction) || phase_space != KinePhaseSpace::Q2fE {
            return 0.0;
        }
        let Some(q2) = interaction.kine.q2 else {
            return 0.0;
        };
        if q2 < 0.0 {
            return 0.0;
        }
        // A^(1/3) scaling with a steep forward Q2 peak
        let a = pdg::ion_a(interaction.init_state.target) as f64;
        G2_SCALE * a.cbrt() * (-8.0 * q2).exp()
    }

    fn integral(&self, interaction: &Interaction) -> f64 {
        if !self.valid_process(interaction) {
            return 0.0;
        }
        let e = interaction.init_state.probe_energy();
        let a = pdg::ion_a(interaction.init_state.target) as f64;
        // pion production threshold
        if e < 0.14 {
            return 0.0;
        }
        G2_SCALE * 0.1 * a.cbrt() * (e / (e + physics::NUCLEON_MASS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics;
    use crate::registry::AlgorithmRegistry;

    fn model() -> Arc<dyn XSecAlgorithm> {
        let mut reg = AlgorithmRegistry::new();
        physics::register_all(&mut reg);
        physics::install_default_configs(&mut reg);
        reg.resolve_xsec(&AlgId::new("CohPionProduction", "CC")).unwrap()
    }

    #[test]
    fn free_nucleons_have_no_coherent_channel() {
        let coh = model();
        let off_p = coh.enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::PROTON, 2.0));
        assert!(off_p.is_empty());
    }

    #[test]
    fn nuclear_target_claims_one_whole_nucleus_channel() {
        let coh = model();
        let c12 = InitialState::new(pdg::NU_MU, pdg::ion_pdg_code(6, 12), 2.0);
        let list = coh.enumerate_interactions(&c12);
        assert_eq!(list.len(), 1);
        let i = list.get(0).unwrap();
        assert_eq!(i.init_state.hit_nucleon, None);
        assert!(coh.valid_process(i));
    }

    #[test]
    fn xsec_is_forward_peaked() {
        let coh = model();
        let mut i = coh
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::ion_pdg_code(6, 12), 2.0))
            .get(0)
            .unwrap()
            .clone();
        i.kine.q2 = Some(0.01);
        let forward = coh.xsec(&i, KinePhaseSpace::Q2fE);
        i.kine.q2 = Some(1.0);
        let backward = coh.xsec(&i, KinePhaseSpace::Q2fE);
        assert!(forward > backward);
    }

    #[test]
    fn heavier_nuclei_have_larger_integrals() {
        let coh = model();
        let c12 = coh
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::ion_pdg_code(6, 12), 2.0))
            .get(0)
            .unwrap()
            .clone();
        let fe56 = coh
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::ion_pdg_code(26, 56), 2.0))
            .get(0)
            .unwrap()
            .clone();
        assert!(coh.integral(&fe56) > coh.integral(&c12));
    }
}
