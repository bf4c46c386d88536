use crate::core::algorithm::XSecAlgRef;
use crate::core::generator::GeneratorList;
use crate::core::interaction::{ChannelKey, InitialState, Interaction};
use crate::core::list::InteractionList;
use anyhow::{bail, Result};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// CROSS-SECTION ALGORITHM MAP
// ============================================================================

/// Associates every discrete channel the enabled models claim for one
/// initial state with the model instance responsible for evaluating it.
///
/// Built once per initial state, then queried in O(1) per event instead of
/// re-scanning the model list. A rebuild fully discards previous content;
/// stale entries from a different initial state never survive.
///
/// The map shares (and never mutates) the algorithm instances; the registry
/// remains their configuring owner.
#[derive(Default, Clone)]
pub struct XSecAlgorithmMap {
    generator_list: Option<Arc<GeneratorList>>,
    init_state: Option<InitialState>,
    interactions: InteractionList,
    table: HashMap<ChannelKey, XSecAlgRef>,
}

impl XSecAlgorithmMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records which generator list the next `build_map` consults.
    /// Does not itself trigger a build.
    pub fn use_generator_list(&mut self, list: Arc<GeneratorList>) {
        self.generator_list = Some(list);
    }

    /// Builds the channel → algorithm association for `init_state`.
    ///
    /// Models are visited strictly in generator-list order; on a duplicate
    /// channel claim the first claimant wins and the later claim is dropped
    /// with a debug diagnostic (overlapping responsibility is a
    /// configuration ambiguity, not a defect). An initial state no model
    /// claims anything for yields a valid empty map.
    pub fn build_map(&mut self, init_state: &InitialState) -> Result<()> {
        let Some(list) = self.generator_list.clone() else {
            bail!("build_map called before use_generator_list");
        };

        self.reset();
        self.init_state = Some(init_state.clone());

        for alg in list.iter() {
            let claimed = alg.enumerate_interactions(init_state);
            for interaction in &claimed {
                let key = interaction.channel_key();
                if let Some(prev) = self.table.get(&key) {
                    debug!(
                        "channel [{}] already claimed by {}; dropping claim from {}",
                        interaction,
                        prev.id(),
                        alg.id()
                    );
                    continue;
                }
                self.table.insert(key, Arc::clone(alg));
                self.interactions.push(interaction.clone());
            }
        }
        Ok(())
    }

    /// The algorithm responsible for `interaction`'s channel, or `None` if
    /// no enabled model claims it (callers treat that as zero cross
    /// section). Pure hash lookup; no model is re-queried.
    pub fn find_xsec_algorithm(&self, interaction: &Interaction) -> Option<&XSecAlgRef> {
        self.table.get(&interaction.channel_key())
    }

    /// Read-only view of every resolvable channel, in claim order.
    pub fn get_interaction_list(&self) -> &InteractionList {
        &self.interactions
    }

    /// The initial state the map was last built for.
    pub fn init_state(&self) -> Option<&InitialState> {
        self.init_state.as_ref()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Empties the channel list and the lookup table. The recorded
    /// generator list is kept for the next build.
    pub fn reset(&mut self) {
        self.interactions.reset();
        self.table.clear();
        self.init_state = None;
    }

    /// Value-semantics assignment: deep-copies the channel list and the
    /// initial-state snapshot; algorithm references and the generator-list
    /// handle are shared, never re-resolved.
    pub fn copy_from(&mut self, other: &XSecAlgorithmMap) {
        self.generator_list = other.generator_list.clone();
        self.init_state = other.init_state.clone();
        self.interactions.copy_from(&other.interactions);
        self.table = other.table.clone();
    }
}

impl fmt::Debug for XSecAlgorithmMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for XSecAlgorithmMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.init_state {
            Some(init) => writeln!(f, "xsec algorithm map for {}:", init)?,
            None => writeln!(f, "xsec algorithm map (not built):")?,
        }
        for interaction in &self.interactions {
            let owner = self
                .table
                .get(&interaction.channel_key())
                .map(|alg| alg.id().to_string())
                .unwrap_or_else(|| "<unmapped>".to_string());
            writeln!(f, "  {}  ->  {}", interaction, owner)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::{InteractionType, ProcessInfo, ScatteringType};
    use crate::core::algorithm::{KinePhaseSpace, XSecAlgorithm};
    use crate::core::pdg;
    use crate::registry::AlgId;

    /// Test double claiming a fixed set of scattering types for any
    /// neutrino + nucleon initial state.
    struct ClaimingModel {
        id: AlgId,
        current: InteractionType,
        claims: Vec<ScatteringType>,
    }

    impl ClaimingModel {
        fn new(name: &str, current: InteractionType, claims: &[ScatteringType]) -> XSecAlgRef {
            Arc::new(Self {
                id: AlgId::new(name, "Test"),
                current,
                claims: claims.to_vec(),
            })
        }
    }

    impl XSecAlgorithm for ClaimingModel {
        fn id(&self) -> &AlgId {
            &self.id
        }
        fn valid_process(&self, interaction: &Interaction) -> bool {
            interaction.proc_info.interaction_type == self.current
                && self.claims.contains(&interaction.proc_info.scattering_type)
        }
        fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList {
            self.claims
                .iter()
                .map(|&scat| {
                    Interaction::new(
                        init_state.clone(),
                        ProcessInfo::new(self.current, scat),
                    )
                })
                .collect()
        }
        fn xsec(&self, _i: &Interaction, _ps: KinePhaseSpace) -> f64 {
            1.0
        }
        fn integral(&self, _i: &Interaction) -> f64 {
            1.0
        }
    }

    fn init_state() -> InitialState {
        InitialState::new(pdg::NU_MU, pdg::PROTON, 2.0)
    }

    fn interaction(current: InteractionType, scat: ScatteringType) -> Interaction {
        Interaction::new(init_state(), ProcessInfo::new(current, scat))
    }

    fn three_channel_map() -> XSecAlgorithmMap {
        // ModelA claims CC-QEL and CC-RES, ModelB claims NC-QEL
        let mut list = GeneratorList::new();
        list.push(ClaimingModel::new(
            "ModelA",
            InteractionType::WeakCC,
            &[ScatteringType::QuasiElastic, ScatteringType::Resonant],
        ));
        list.push(ClaimingModel::new(
            "ModelB",
            InteractionType::WeakNC,
            &[ScatteringType::QuasiElastic],
        ));

        let mut map = XSecAlgorithmMap::new();
        map.use_generator_list(Arc::new(list));
        map.build_map(&init_state()).unwrap();
        map
    }

    #[test]
    fn three_models_three_channels() {
        let map = three_channel_map();
        assert_eq!(map.get_interaction_list().len(), 3);

        let cc_qel = interaction(InteractionType::WeakCC, ScatteringType::QuasiElastic);
        let owner = map.find_xsec_algorithm(&cc_qel).expect("CC-QEL resolvable");
        assert_eq!(owner.id().name, "ModelA");

        let nc_qel = interaction(InteractionType::WeakNC, ScatteringType::QuasiElastic);
        assert_eq!(
            map.find_xsec_algorithm(&nc_qel).unwrap().id().name,
            "ModelB"
        );

        // a channel no model claims resolves to nothing, not an error
        let nc_dis = interaction(InteractionType::WeakNC, ScatteringType::DeepInelastic);
        assert!(map.find_xsec_algorithm(&nc_dis).is_none());
    }

    #[test]
    fn bidirectional_completeness() {
        let map = three_channel_map();
        for interaction in map.get_interaction_list() {
            assert!(map.find_xsec_algorithm(interaction).is_some());
        }
        assert_eq!(map.len(), map.get_interaction_list().len());
    }

    #[test]
    fn channel_keys_round_trip() {
        let map = three_channel_map();
        for interaction in map.get_interaction_list() {
            let key = interaction.channel_key();
            let by_key = map.table.get(&key).expect("key present");
            let by_lookup = map.find_xsec_algorithm(interaction).unwrap();
            assert!(Arc::ptr_eq(by_key, by_lookup));
        }
    }

    #[test]
    fn first_claimant_wins_on_duplicate_channels() {
        let mut list = GeneratorList::new();
        list.push(ClaimingModel::new(
            "First",
            InteractionType::WeakCC,
            &[ScatteringType::QuasiElastic],
        ));
        list.push(ClaimingModel::new(
            "Second",
            InteractionType::WeakCC,
            &[ScatteringType::QuasiElastic],
        ));

        let mut map = XSecAlgorithmMap::new();
        map.use_generator_list(Arc::new(list));
        map.build_map(&init_state()).unwrap();

        // exactly one retained entry, attributed to the earlier model
        assert_eq!(map.get_interaction_list().len(), 1);
        let cc_qel = interaction(InteractionType::WeakCC, ScatteringType::QuasiElastic);
        assert_eq!(map.find_xsec_algorithm(&cc_qel).unwrap().id().name, "First");
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut map = three_channel_map();
        let before: Vec<_> = map
            .get_interaction_list()
            .iter()
            .map(Interaction::channel_key)
            .collect();
        let owners_before: Vec<_> = map
            .get_interaction_list()
            .iter()
            .map(|i| map.find_xsec_algorithm(i).unwrap().id().clone())
            .collect();

        map.build_map(&init_state()).unwrap();

        let after: Vec<_> = map
            .get_interaction_list()
            .iter()
            .map(Interaction::channel_key)
            .collect();
        let owners_after: Vec<_> = map
            .get_interaction_list()
            .iter()
            .map(|i| map.find_xsec_algorithm(i).unwrap().id().clone())
            .collect();

        assert_eq!(before, after);
        assert_eq!(owners_before, owners_after);
    }

    #[test]
    fn rebuild_discards_previous_initial_state() {
        let mut map = three_channel_map();
        let old_channel = map.get_interaction_list().get(0).unwrap().clone();

        let other = InitialState::new(pdg::NU_E, pdg::NEUTRON, 1.0);
        map.build_map(&other).unwrap();

        // entries keyed to the previous initial state are gone
        assert!(map.find_xsec_algorithm(&old_channel).is_none());
        assert_eq!(map.init_state().unwrap().probe, pdg::NU_E);
    }

    #[test]
    fn empty_generator_list_builds_a_valid_empty_map() {
        let mut map = XSecAlgorithmMap::new();
        map.use_generator_list(Arc::new(GeneratorList::new()));
        map.build_map(&init_state()).unwrap();
        assert!(map.is_empty());
        assert!(map.get_interaction_list().is_empty());
        let any = interaction(InteractionType::WeakCC, ScatteringType::QuasiElastic);
        assert!(map.find_xsec_algorithm(&any).is_none());
    }

    #[test]
    fn build_without_generator_list_is_an_error() {
        let mut map = XSecAlgorithmMap::new();
        assert!(map.build_map(&init_state()).is_err());
    }

    #[test]
    fn reset_empties_but_keeps_generator_list() {
        let mut map = three_channel_map();
        let resolvable = map.get_interaction_list().get(0).unwrap().clone();

        map.reset();
        assert!(map.get_interaction_list().is_empty());
        assert!(map.find_xsec_algorithm(&resolvable).is_none());

        // the recorded generator list survives a reset
        map.build_map(&init_state()).unwrap();
        assert_eq!(map.get_interaction_list().len(), 3);
    }

    #[test]
    fn copy_shares_algorithms_but_not_interactions() {
        let source = three_channel_map();
        let mut copy = XSecAlgorithmMap::new();
        copy.copy_from(&source);

        assert_eq!(copy.get_interaction_list(), source.get_interaction_list());
        for interaction in source.get_interaction_list() {
            let a = source.find_xsec_algorithm(interaction).unwrap();
            let b = copy.find_xsec_algorithm(interaction).unwrap();
            assert!(Arc::ptr_eq(a, b), "algorithm handles must be shared");
        }
    }

    #[test]
    fn display_names_each_owner() {
        let map = three_channel_map();
        let text = map.to_string();
        assert!(text.contains("ModelA/Test"));
        assert!(text.contains("ModelB/Test"));
        assert_eq!(text.lines().count(), 4); // header + 3 channels
    }
}
