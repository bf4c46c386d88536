use crate::core::algorithm::{KinePhaseSpace, ResonanceTable, XSecAlgorithm};
use crate::core::interaction::{
    InitialState, Interaction, InteractionType, ProcessInfo, Resonance, ScatteringType,
};
use crate::core::list::InteractionList;
use crate::core::pdg;
use crate::physics::{self, G2_SCALE};
use crate::registry::{AlgId, AlgorithmHandle, ConfigSet, RegistryError, SubAlgs};
use std::sync::Arc;

// ============================================================================
// RESONANCE PRODUCTION (Breit-Wigner in W)
// ============================================================================

/// Baryon-resonance production. Claims one channel per (struck nucleon,
/// resonance) pair; the resonance mass/width parameters come from the
/// resonance-table sub-algorithm named in the configuration set.
pub struct ResBreitWigner {
    id: AlgId,
    current: InteractionType,
    table: Arc<dyn ResonanceTable>,
}

pub fn build(
    id: AlgId,
    config: &ConfigSet,
    subs: &SubAlgs<'_>,
) -> Result<AlgorithmHandle, RegistryError> {
    let current = physics::current_from_config(&id, config)?;
    let table = subs.resonance_table("resonance-table")?;
    Ok(AlgorithmHandle::XSec(Arc::new(ResBreitWigner {
        id,
        current,
        table,
    })))
}

/// L-dependent Breit-Wigner shape in the hadronic invariant mass W.
fn breit_wigner_l(w: f64, l: i32, mass: f64, width: f64, norm: f64) -> f64 {
    // width grows with available phase space above threshold
    let width_w = width * (w / mass).powi(2 * l + 1);
    let d = (w * w - mass * mass).powi(2) + mass * mass * width_w * width_w;
    if d <= 0.0 {
        return 0.0;
    }
    (mass * width_w / d) / norm / std::f64::consts::PI
}

impl ResBreitWigner {
    fn probe_allowed(&self, probe: i32) -> bool {
        match self.current {
            InteractionType::WeakCC | InteractionType::WeakNC => {
                pdg::is_neutrino(probe) || pdg::is_anti_neutrino(probe)
            }
            InteractionType::EM => probe.abs() == pdg::ELECTRON,
        }
    }
}

impl XSecAlgorithm for ResBreitWigner {
    fn id(&self) -> &AlgId {
        &self.id
    }

    fn valid_process(&self, interaction: &Interaction) -> bool {
        interaction.proc_info.scattering_type == ScatteringType::Resonant
            && interaction.proc_info.interaction_type == self.current
            && interaction.resonance.is_some()
            && self.probe_allowed(interaction.init_state.probe)
            && interaction.init_state.struck_nucleon().is_some()
    }

    fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList {
        if !self.probe_allowed(init_state.probe) {
            return InteractionList::new();
        }
        let (has_p, has_n) = init_state.nucleon_content();
        let proc = ProcessInfo::new(self.current, ScatteringType::Resonant);

        let mut list = InteractionList::new();
        for (nucleon, present) in [(pdg::PROTON, has_p), (pdg::NEUTRON, has_n)] {
            if !present {
                continue;
            }
            let mut init = init_state.clone();
            if pdg::is_ion(init.target) {
                init.hit_nucleon = Some(nucleon);
            }
            for &res in Resonance::all() {
                list.push(Interaction::new(init.clone(), proc).with_resonance(res));
            }
        }
        list
    }

    fn xsec(&self, interaction: &Interaction, phase_space: KinePhaseSpace) -> f64 {
        if !self.valid_process(interaction) || phase_space != KinePhaseSpace::WQ2fE {
            return 0.0;
        }
        let (Some(w), Some(q2)) = (interaction.kine.w, interaction.kine.q2) else {
            return 0.0;
        };
        if w <= physics::NUCLEON_MASS || q2 < 0.0 {
            return 0.0;
        }
        let Some(res) = interaction.resonance else {
            return 0.0;
        };
        let bw = breit_wigner_l(
            w,
            self.table.orbital_angular_mom(res),
            self.table.mass(res),
            self.table.width(res),
            self.table.breit_wigner_norm(res),
        );
        // soft Q2 suppression
        G2_SCALE * bw / (1.0 + q2)
    }

    fn integral(&self, interaction: &Interaction) -> f64 {
        if !self.valid_process(interaction) {
            return 0.0;
        }
        let Some(res) = interaction.resonance else {
            return 0.0;
        };
        let e = interaction.init_state.probe_energy();
        let threshold = self.table.mass(res) - physics::NUCLEON_MASS;
        if e <= threshold {
            return 0.0;
        }
        G2_SCALE * self.table.width(res) * (1.0 - (-(e - threshold)).exp())
    }
}
