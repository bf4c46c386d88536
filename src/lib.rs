// ============================================================================
// MODULE DECLARATIONS
// ============================================================================
pub mod core;
pub mod io;
pub mod physics;
pub mod registry;

// ============================================================================
// RE-EXPORTS (Public API)
// ============================================================================
pub use crate::core::algorithm::{
    Hadronizer, KinePhaseSpace, ResonanceTable, XSecAlgRef, XSecAlgorithm,
};
pub use crate::core::generator::GeneratorList;
pub use crate::core::interaction::{
    ChannelKey, InitialState, Interaction, InteractionType, Kinematics, ProcessInfo, Resonance,
    ScatteringType,
};
pub use crate::core::list::InteractionList;
pub use crate::core::map::XSecAlgorithmMap;
pub use crate::core::pdg;
pub use crate::io::tune::Tune;
pub use crate::registry::{AlgId, AlgorithmHandle, AlgorithmRegistry, ConfigSet, RegistryError};

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

// ============================================================================
// HIGH-LEVEL INTERFACE
// ============================================================================

/// Configuration for one channel-resolution run.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Probe name ("numu", "nuebar", ...) or raw PDG code.
    pub probe: String,
    /// Target name ("neutron", "c12", ...) or raw PDG code.
    pub target: String,
    /// Probe energy in GeV.
    pub energy: f64,
    /// Optional tune file selecting models and overriding parameters.
    pub tune_path: Option<PathBuf>,
}

/// Creates a registry with every shipped model registered and the default
/// tune installed. The caller owns the registry and its lifecycle.
pub fn default_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();
    physics::register_all(&mut registry);
    physics::install_default_configs(&mut registry);
    registry
}

/// The master pipeline: tune → generator list → channel map.
///
/// Returns the built map together with a human-readable channel report.
/// Registry resolution failures are configuration-fatal and propagate;
/// an initial state no model claims anything for yields a valid empty map.
pub fn resolve_channels(
    registry: &mut AlgorithmRegistry,
    config: &ResolveConfig,
) -> Result<(XSecAlgorithmMap, String)> {
    // 0. TUNE PHASE
    let tune = match &config.tune_path {
        Some(path) => io::tune::Tune::load(path)?,
        None => Tune::default(),
    };
    tune.apply(registry);

    // 1. INITIAL STATE
    let probe = pdg::code_from_name(&config.probe)
        .ok_or_else(|| anyhow!("Unknown probe '{}'", config.probe))?;
    let target = pdg::code_from_name(&config.target)
        .ok_or_else(|| anyhow!("Unknown target '{}'", config.target))?;
    let init_state = InitialState::new(probe, target, config.energy);

    // 2. GENERATOR LIST
    let ids = tune.generator_ids(physics::default_generator_ids());
    let generator_list =
        GeneratorList::resolve(registry, &ids).context("Generator list configuration failed")?;

    // 3. MAP CONSTRUCTION
    let mut map = XSecAlgorithmMap::new();
    map.use_generator_list(generator_list);
    map.build_map(&init_state)?;

    // 4. REPORT
    let report = io::report::channel_table(&map);
    Ok((map, report))
}
