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
// DEEP-INELASTIC SCATTERING (parton-model scaling form)
// ============================================================================

/// Deep-inelastic scattering off valence quarks. Claims one channel per
/// (struck nucleon, struck quark): CC selects the charge-allowed quark
/// (d for neutrinos, u for antineutrinos), NC scatters off both.
pub struct DisPartonModel {
    id: AlgId,
    current: InteractionType,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    _subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    let current = physics::current_from_config(&id, config)?;
    Ok(AlgorithmHandle::XSec(Arc::new(DisPartonModel { id, current })))
}

impl DisPartonModel {
    fn claimable_quarks(&self, probe: i32) -> Vec<i32> {
        match self.current {
            InteractionType::WeakCC if pdg::is_neutrino(probe) => vec![pdg::DOWN_QUARK],
            InteractionType::WeakCC if pdg::is_anti_neutrino(probe) => vec![pdg::UP_QUARK],
            InteractionType::WeakNC
                if pdg::is_neutrino(probe) || pdg::is_anti_neutrino(probe) =>
            {
                vec![pdg::UP_QUARK, pdg::DOWN_QUARK]
            }
            _ => vec![],
        }
    }
}

impl XSecAlgorithm for DisPartonModel {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn valid_process(&self, interaction: &Interaction) -> bool {
        interaction.proc_info.scattering_type == ScatteringType::DeepInelastic
            && interaction.proc_info.interaction_type == self.current
            && interaction.init_state.struck_nucleon().is_some()
            && interaction
                .hit_quark
                .map(|q| self.claimable_quarks(interaction.init_state.probe).contains(&q))
                .unwrap_or(false)
    }

    fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList {
        let (has_p, has_n) = init_state.nucleon_content();
        let proc = ProcessInfo::new(self.current, ScatteringType::DeepInelastic);

        let mut list = InteractionList::new();
        for (nucleon, present) in [(pdg::PROTON, has_p), (pdg::NEUTRON, has_n)] {
            if !present {
                continue;
            }
            let mut init = init_state.clone();
            if pdg::is_ion(init.target) {
                init.hit_nucleon = Some(nucleon);
            }
            for quark in self.claimable_quarks(init_state.probe) {
                list.push(Interaction::new(init.clone(), proc).with_hit_quark(quark));
            }
        }
        list
    }

    fn xsec(&self, interaction: &Interaction, phase_space: KinePhaseSpace) -> f64 {
        if !self.valid_process(interaction) || phase_space != KinePhaseSpace::XYfE {
            return 0.0;
        }
        let (Some(x), Some(y)) = (interaction.kine.x, interaction.kine.y) else {
            return 0.0;
        };
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            return 0.0;
        }
        let e = interaction.init_state.probe_energy();
        // valence-like x shape; antiquark-free toy distribution
        let q_x = x.sqrt() * (1.0 - x).powi(3);
        G2_SCALE * physics::NUCLEON_MASS * e * q_x * (1.0 - y + y * y / 2.0)
    }

    fn integral(&self, interaction: &Interaction) -> f64 {
        if !self.valid_process(interaction) {
            return 0.0;
        }
        // DIS total xsec grows linearly with energy
        let e = interaction.init_state.probe_energy();
        G2_SCALE * 0.68 * e / (self.claimable_quarks(interaction.init_state.probe).len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics;
    use crate::registry::AlgorithmRegistry;

    fn model(config: &str) -> Arc<dyn XSecAlgorithm> {
        let mut reg = AlgorithmRegistry::new();
        physics::register_all(&mut reg);
        physics::install_default_configs(&mut reg);
        reg.resolve_xsec(&AlgId::new("DisPartonModel", config)).unwrap()
    }

    #[test]
    fn cc_claims_one_quark_nc_claims_two() {
        let init = InitialState::new(pdg::NU_MU, pdg::PROTON, 10.0);
        assert_eq!(model("CC").enumerate_interactions(&init).len(), 1);
        assert_eq!(model("NC").enumerate_interactions(&init).len(), 2);
    }

    #[test]
    fn quark_tag_enters_the_channel_key() {
        let nc = model("NC");
        let list = nc.enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::PROTON, 10.0));
        let keys: Vec<_> = list.iter().map(Interaction::channel_key).collect();
        assert_ne!(keys[0], keys[1]);
    }

    #[test]
    fn antineutrino_strikes_the_up_quark() {
        let cc = model("CC");
        let list = cc.enumerate_interactions(&InitialState::new(pdg::ANTI_NU_MU, pdg::PROTON, 10.0));
        assert_eq!(list.get(0).unwrap().hit_quark, Some(pdg::UP_QUARK));
    }

    #[test]
    fn xsec_requires_in_range_bjorken_variables() {
        let cc = model("CC");
        let mut i = cc
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::NEUTRON, 10.0))
            .get(0)
            .unwrap()
            .clone();
        i.kine.x = Some(0.25);
        i.kine.y = Some(0.5);
        assert!(cc.xsec(&i, KinePhaseSpace::XYfE) > 0.0);

        i.kine.x = Some(1.5);
        assert_eq!(cc.xsec(&i, KinePhaseSpace::XYfE), 0.0);
    }

    #[test]
    fn integral_scales_with_energy() {
        let cc = model("CC");
        let low = cc
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::NEUTRON, 5.0))
            .get(0)
            .unwrap()
            .clone();
        let high = cc
            .enumerate_interactions(&InitialState::new(pdg::NU_MU, pdg::NEUTRON, 50.0))
            .get(0)
            .unwrap()
            .clone();
        assert!(cc.integral(&high) > cc.integral(&low));
    }
}
