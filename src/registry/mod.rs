pub mod config;

pub use config::{AlgId, ConfigSet, ParamValue, RegistryError};

use crate::core::algorithm::{Hadronizer, ResonanceTable, XSecAlgorithm};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// CAPABILITY-TAGGED HANDLES
// ============================================================================

/// A configured algorithm instance, tagged with the capability it provides.
/// Callers check the capability explicitly instead of downcasting.
#[derive(Clone)]
pub enum AlgorithmHandle {
    XSec(Arc<dyn XSecAlgorithm>),
    Hadronizer(Arc<dyn Hadronizer>),
    ResonanceTable(Arc<dyn ResonanceTable>),
}

impl std::fmt::Debug for AlgorithmHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AlgorithmHandle({}, {})", self.capability(), self.id())
    }
}

impl AlgorithmHandle {
    pub fn id(&self) -> &AlgId {
        match self {
            Self::XSec(a) => a.id(),
            Self::Hadronizer(a) => a.id(),
            Self::ResonanceTable(a) => a.id(),
        }
    }

    pub fn capability(&self) -> &'static str {
        match self {
            Self::XSec(_) => "cross-section evaluator",
            Self::Hadronizer(_) => "hadronizer",
            Self::ResonanceTable(_) => "resonance table",
        }
    }

    pub fn as_xsec(&self) -> Option<Arc<dyn XSecAlgorithm>> {
        match self {
            Self::XSec(a) => Some(Arc::clone(a)),
            _ => None,
        }
    }

    pub fn as_hadronizer(&self) -> Option<Arc<dyn Hadronizer>> {
        match self {
            Self::Hadronizer(a) => Some(Arc::clone(a)),
            _ => None,
        }
    }

    pub fn as_resonance_table(&self) -> Option<Arc<dyn ResonanceTable>> {
        match self {
            Self::ResonanceTable(a) => Some(Arc::clone(a)),
            _ => None,
        }
    }
}

// ============================================================================
// SUB-ALGORITHM ACCESS DURING CONSTRUCTION
// ============================================================================

/// The already-resolved sub-algorithms handed to a builder. Keys are the
/// declaration keys from the parent's configuration set.
pub struct SubAlgs<'a> {
    parent: &'a AlgId,
    resolved: HashMap<String, AlgorithmHandle>,
}

impl<'a> SubAlgs<'a> {
    fn new(parent: &'a AlgId) -> Self {
        Self {
            parent,
            resolved: HashMap::new(),
        }
    }

    fn insert(&mut self, key: String, handle: AlgorithmHandle) {
        self.resolved.insert(key, handle);
    }

    fn get(&self, key: &str) -> Result<&AlgorithmHandle, RegistryError> {
        self.resolved
            .get(key)
            .ok_or_else(|| RegistryError::MissingSubAlg {
                parent: self.parent.clone(),
                key: key.to_string(),
            })
    }

    /// The sub-algorithm under `key`, required to be a resonance table.
    pub fn resonance_table(&self, key: &str) -> Result<Arc<dyn ResonanceTable>, RegistryError> {
        let handle = self.get(key)?;
        handle
            .as_resonance_table()
            .ok_or_else(|| RegistryError::SubAlgCapability {
                parent: self.parent.clone(),
                key: key.to_string(),
                id: handle.id().clone(),
                expected: "resonance table",
            })
    }

    /// The sub-algorithm under `key`, required to be a hadronizer.
    pub fn hadronizer(&self, key: &str) -> Result<Arc<dyn Hadronizer>, RegistryError> {
        let handle = self.get(key)?;
        handle
            .as_hadronizer()
            .ok_or_else(|| RegistryError::SubAlgCapability {
                parent: self.parent.clone(),
                key: key.to_string(),
                id: handle.id().clone(),
                expected: "hadronizer",
            })
    }
}

/// Constructor for one algorithm implementation. Receives the identity the
/// instance is being configured under, its configuration set, and its
/// already-resolved sub-algorithms.
pub type BuilderFn =
    fn(AlgId, &ConfigSet, &SubAlgs<'_>) -> Result<AlgorithmHandle, RegistryError>;

// ============================================================================
// ALGORITHM REGISTRY
// ============================================================================

/// The configuring owner of every algorithm instance.
///
/// Resolution is recursive and cached: the sub-algorithms a configuration
/// set declares are resolved before the parent is built, a missing name or
/// a dependency cycle is a configuration-fatal error, and resolving the
/// same `AlgId` twice hands back the same shared instance. This is an
/// explicit object with an explicit lifecycle; nothing here is global.
#[derive(Default)]
pub struct AlgorithmRegistry {
    builders: HashMap<String, BuilderFn>,
    configs: HashMap<AlgId, ConfigSet>,
    instances: HashMap<AlgId, AlgorithmHandle>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation under its name.
    pub fn register(&mut self, name: &str, builder: BuilderFn) {
        self.builders.insert(name.to_string(), builder);
    }

    /// Installs (or replaces) the configuration set for one `AlgId`.
    /// Replacing a set does not invalidate instances already configured
    /// from the old one.
    pub fn add_config(&mut self, id: AlgId, config: ConfigSet) {
        self.configs.insert(id, config);
    }

    pub fn has_config(&self, id: &AlgId) -> bool {
        self.configs.contains_key(id)
    }

    /// Resolves (configuring on first use) the algorithm named by `id`.
    ///
    /// Walks the sub-algorithm dependency graph reachable from `id`,
    /// rejects cycles, builds dependencies first, and caches every
    /// instance built along the way.
    pub fn resolve(&mut self, id: &AlgId) -> Result<AlgorithmHandle, RegistryError> {
        if let Some(handle) = self.instances.get(id) {
            return Ok(handle.clone());
        }

        let order = self.dependency_order(id)?;
        // deepest dependencies first
        for node in order.into_iter().rev() {
            if self.instances.contains_key(&node) {
                continue;
            }
            let config = self
                .configs
                .get(&node)
                .ok_or_else(|| RegistryError::MissingConfig(node.clone()))?
                .clone();
            let builder = *self
                .builders
                .get(&node.name)
                .ok_or_else(|| RegistryError::UnknownAlgorithm(node.name.clone()))?;

            let mut subs = SubAlgs::new(&node);
            for (key, sub_id) in &config.sub_algs {
                // present in the cache: dependency order guarantees it
                let handle = self
                    .instances
                    .get(sub_id)
                    .ok_or_else(|| RegistryError::MissingConfig(sub_id.clone()))?;
                subs.insert(key.clone(), handle.clone());
            }

            let handle = builder(node.clone(), &config, &subs)?;
            self.instances.insert(node, handle);
        }

        Ok(self
            .instances
            .get(id)
            .expect("resolution order must include the requested id")
            .clone())
    }

    /// Resolves `id` and requires the cross-section-evaluator capability.
    pub fn resolve_xsec(&mut self, id: &AlgId) -> Result<Arc<dyn XSecAlgorithm>, RegistryError> {
        let handle = self.resolve(id)?;
        handle.as_xsec().ok_or_else(|| RegistryError::WrongCapability {
            id: id.clone(),
            expected: "cross-section evaluator",
        })
    }

    /// Resolves `id` and requires the hadronizer capability.
    pub fn resolve_hadronizer(&mut self, id: &AlgId) -> Result<Arc<dyn Hadronizer>, RegistryError> {
        let handle = self.resolve(id)?;
        handle
            .as_hadronizer()
            .ok_or_else(|| RegistryError::WrongCapability {
                id: id.clone(),
                expected: "hadronizer",
            })
    }

    /// Topological order of the configuration dependency graph reachable
    /// from `root` (parents before their sub-algorithms).
    fn dependency_order(&self, root: &AlgId) -> Result<Vec<AlgId>, RegistryError> {
        let mut graph: DiGraph<AlgId, ()> = DiGraph::new();
        let mut nodes: HashMap<AlgId, NodeIndex> = HashMap::new();
        let mut stack = vec![root.clone()];

        while let Some(id) = stack.pop() {
            let from = *nodes
                .entry(id.clone())
                .or_insert_with(|| graph.add_node(id.clone()));

            if !self.builders.contains_key(&id.name) {
                return Err(RegistryError::UnknownAlgorithm(id.name.clone()));
            }
            let config = self
                .configs
                .get(&id)
                .ok_or_else(|| RegistryError::MissingConfig(id.clone()))?;

            for sub_id in config.sub_algs.values() {
                let seen = nodes.contains_key(sub_id);
                let to = *nodes
                    .entry(sub_id.clone())
                    .or_insert_with(|| graph.add_node(sub_id.clone()));
                graph.add_edge(from, to, ());
                if !seen {
                    stack.push(sub_id.clone());
                }
            }
        }

        let sorted = toposort(&graph, None)
            .map_err(|cycle| RegistryError::DependencyCycle(graph[cycle.node_id()].clone()))?;
        Ok(sorted.into_iter().map(|ix| graph[ix].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::{InitialState, Interaction, Resonance};
    use crate::core::list::InteractionList;
    use crate::core::algorithm::{KinePhaseSpace, ResonanceTable, XSecAlgorithm};

    struct FlatTable {
        id: AlgId,
        mass: f64,
    }

    impl ResonanceTable for FlatTable {
        fn id(&self) -> &AlgId {
            &self.id
        }
        fn mass(&self, _res: Resonance) -> f64 {
            self.mass
        }
        fn width(&self, _res: Resonance) -> f64 {
            0.1
        }
        fn breit_wigner_norm(&self, _res: Resonance) -> f64 {
            1.0
        }
        fn orbital_angular_mom(&self, _res: Resonance) -> i32 {
            1
        }
    }

    fn flat_table_builder(
        id: AlgId,
        config: &ConfigSet,
        _subs: &SubAlgs<'_>,
    ) -> Result<AlgorithmHandle, RegistryError> {
        Ok(AlgorithmHandle::ResonanceTable(Arc::new(FlatTable {
            id,
            mass: config.num_or("mass", 1.232),
        })))
    }

    struct TableUser {
        id: AlgId,
        table: Arc<dyn ResonanceTable>,
    }

    impl XSecAlgorithm for TableUser {
        fn id(&self) -> &AlgId {
            &self.id
        }
        fn valid_process(&self, _i: &Interaction) -> bool {
            true
        }
        fn enumerate_interactions(&self, _init: &InitialState) -> InteractionList {
            InteractionList::new()
        }
        fn xsec(&self, _i: &Interaction, _ps: KinePhaseSpace) -> f64 {
            self.table.mass(Resonance::P33_1232)
        }
        fn integral(&self, _i: &Interaction) -> f64 {
            0.0
        }
    }

    fn table_user_builder(
        id: AlgId,
        _config: &ConfigSet,
        subs: &SubAlgs<'_>,
    ) -> Result<AlgorithmHandle, RegistryError> {
        let table = subs.resonance_table("resonance-table")?;
        Ok(AlgorithmHandle::XSec(Arc::new(TableUser { id, table })))
    }

    fn registry_with_pair() -> AlgorithmRegistry {
        let mut reg = AlgorithmRegistry::new();
        reg.register("FlatTable", flat_table_builder);
        reg.register("TableUser", table_user_builder);
        reg.add_config(
            AlgId::new("FlatTable", "Default"),
            ConfigSet::new().set_num("mass", 1.5),
        );
        reg.add_config(
            AlgId::new("TableUser", "Default"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("FlatTable", "Default")),
        );
        reg
    }

    #[test]
    fn resolves_sub_algorithms_before_parent() {
        let mut reg = registry_with_pair();
        let alg = reg.resolve_xsec(&AlgId::new("TableUser", "Default")).unwrap();
        let probe = Interaction::new(
            InitialState::new(14, 2112, 1.0),
            crate::core::interaction::ProcessInfo::new(
                crate::core::interaction::InteractionType::WeakCC,
                crate::core::interaction::ScatteringType::Resonant,
            ),
        );
        // the sub-algorithm's configured mass flows through the parent
        assert_eq!(alg.xsec(&probe, KinePhaseSpace::WQ2fE), 1.5);
    }

    #[test]
    fn resolution_is_idempotent_and_shared() {
        let mut reg = registry_with_pair();
        let id = AlgId::new("TableUser", "Default");
        let a = reg.resolve_xsec(&id).unwrap();
        let b = reg.resolve_xsec(&id).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_config_is_fatal() {
        let mut reg = registry_with_pair();
        let err = reg.resolve(&AlgId::new("TableUser", "NoSuchConfig")).unwrap_err();
        assert!(matches!(err, RegistryError::MissingConfig(_)));
    }

    #[test]
    fn unknown_algorithm_is_fatal() {
        let mut reg = registry_with_pair();
        reg.add_config(AlgId::new("Ghost", "Default"), ConfigSet::new());
        let err = reg.resolve(&AlgId::new("Ghost", "Default")).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownAlgorithm(_)));
    }

    #[test]
    fn unresolved_sub_algorithm_is_fatal() {
        let mut reg = AlgorithmRegistry::new();
        reg.register("TableUser", table_user_builder);
        reg.register("FlatTable", flat_table_builder);
        reg.add_config(
            AlgId::new("TableUser", "Broken"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("FlatTable", "Absent")),
        );
        let err = reg.resolve(&AlgId::new("TableUser", "Broken")).unwrap_err();
        assert!(matches!(err, RegistryError::MissingConfig(_)));
    }

    #[test]
    fn wrong_capability_sub_algorithm_is_fatal() {
        let mut reg = registry_with_pair();
        // point the sub-algorithm slot at another TableUser (an xsec evaluator),
        // which cannot satisfy the resonance-table requirement
        reg.add_config(
            AlgId::new("TableUser", "Inner"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("FlatTable", "Default")),
        );
        reg.add_config(
            AlgId::new("TableUser", "Outer"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("TableUser", "Inner")),
        );
        let err = reg.resolve(&AlgId::new("TableUser", "Outer")).unwrap_err();
        assert!(matches!(err, RegistryError::SubAlgCapability { .. }));
    }

    #[test]
    fn dependency_cycle_is_fatal() {
        let mut reg = AlgorithmRegistry::new();
        reg.register("TableUser", table_user_builder);
        reg.add_config(
            AlgId::new("TableUser", "A"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("TableUser", "B")),
        );
        reg.add_config(
            AlgId::new("TableUser", "B"),
            ConfigSet::new().set_sub_alg("resonance-table", AlgId::new("TableUser", "A")),
        );
        let err = reg.resolve(&AlgId::new("TableUser", "A")).unwrap_err();
        assert!(matches!(err, RegistryError::DependencyCycle(_)));
    }

    #[test]
    fn capability_mismatch_at_top_level() {
        let mut reg = registry_with_pair();
        let err = reg
            .resolve_xsec(&AlgId::new("FlatTable", "Default"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::WrongCapability { .. }));
    }
}
