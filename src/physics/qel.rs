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
// QUASI-ELASTIC SCATTERING (Llewellyn-Smith dipole form)
// ============================================================================

/// Quasi-elastic scattering off free or bound nucleons.
///
/// CC: nu + n -> l- + p and nubar + p -> l+ + n (charge conservation leaves
/// no channel for the opposite nucleon). NC: elastic off either nucleon.
pub struct QelLlewellynSmith {
    id: AlgId,
    current: InteractionType,
    axial_mass: f64,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    _subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    let current = physics::current_from_config(&id, config)?;
    Ok(AlgorithmHandle::XSec(Arc::new(QelLlewellynSmith {
        current,
        axial_mass: config.num_or("axial-mass", 0.99),
        id,
    })))
}

impl QelLlewellynSmith {
    /// Which struck nucleons this model can claim for the probe.
    fn claimable_nucleons(&self, probe: i32) -> Vec<i32> {
        match self.current {
            InteractionType::WeakCC if pdg::is_neutrino(probe) => vec![pdg::NEUTRON],
            InteractionType::WeakCC if pdg::is_anti_neutrino(probe) => vec![pdg::PROTON],
            InteractionType::WeakNC
                if pdg::is_neutrino(probe) || pdg::is_anti_neutrino(probe) =>
            {
                vec![pdg::PROTON, pdg::NEUTRON]
            }
            _ => vec![],
        }
    }

    fn dipole(&self, q2: f64) -> f64 {
        let d = 1.0 + q2 / (self.axial_mass * self.axial_mass);
        1.0 / (d * d * d * d)
    }
}

impl XSecAlgorithm for QelLlewellynSmith {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn valid_process(&self, interaction: &Interaction) -> bool {
        interaction.proc_info.scattering_type == ScatteringType::QuasiElastic
            && interaction.proc_info.interaction_type == self.current
            && interaction
                .init_state
                .struck_nucleon()
                .map(|n| self.claimable_nucleons(interaction.init_state.probe).contains(&n))
                .unwrap_or(false)
    }

    fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList {
        let (has_p, has_n) = init_state.nucleon_content();
        let proc = ProcessInfo::new(self.current, ScatteringType::QuasiElastic);

        let mut list = InteractionList::new();
        for nucleon in self.claimable_nucleons(init_state.probe) {
            let present = match nucleon {
                pdg::PROTON => has_p,
                pdg::NEUTRON => has_n,
                _ => false,
            };
            if !present {
                continue;
            }
            let mut init = init_state.clone();
            if pdg::is_ion(init.target) {
                init.hit_nucleon = Some(nucleon);
            }
            list.push(Interaction::new(init, proc));
        }
        list
    }

    fn xsec(&self, interaction: &Interaction, phase_space: KinePhaseSpace) -> f64 {
        if !self.valid_process(interaction) || phase_space != KinePhaseSpace::Q2fE {
            return 0.0;
        }
        let q2 = interaction.kine.q2.unwrap_or(0.0);
        if q2 < 0.0 {
            return 0.0;
        }
        G2_SCALE * self.dipole(q2)
    }

    fn integral(&self, interaction: &Interaction) -> f64 {
        if !self.valid_process(interaction) {
            return 0.0;
        }
        // QE total xsec rises and saturates with energy
        let e = interaction.init_state.probe_energy();
        let ma2 = self.axial_mass * self.axial_mass;
        G2_SCALE * ma2 * (1.0 - (-e / ma2).exp())
    }
}
