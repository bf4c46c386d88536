// ============================================================================
// PHYSICS MODELS
// ============================================================================
// Concrete cross-section algorithms, the resonance parameter table and the
// hadronization stub. The shapes are physically motivated but deliberately
// simple; the framework cares about channel claiming and configuration
// flow, not numeric fidelity.

pub mod coh;
pub mod dis;
pub mod hadronize;
pub mod qel;
pub mod res;
pub mod resonance_table;

use crate::registry::{AlgId, AlgorithmRegistry, ConfigSet};

/// Fermi constant squared times unit conversion, in 1e-38 cm^2 / GeV^2.
/// Sets the overall scale of every model; only ratios matter here.
pub const G2_SCALE: f64 = 1.583;

/// Nucleon mass in GeV.
pub const NUCLEON_MASS: f64 = 0.93956;

/// Registers every shipped implementation under its name.
pub fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register("QelLlewellynSmith", qel::build);
    registry.register("ResBreitWigner", res::build);
    registry.register("DisPartonModel", dis::build);
    registry.register("CohPionProduction", coh::build);
    registry.register("BaryonResTable", resonance_table::build);
    registry.register("StringFragmentation", hadronize::build);
}

/// Installs the built-in default configuration sets (the "default tune").
/// A tune file loaded afterwards may replace any of them.
pub fn install_default_configs(registry: &mut AlgorithmRegistry) {
    registry.add_config(AlgId::new("BaryonResTable", "Default"), ConfigSet::new());

    registry.add_config(
        AlgId::new("QelLlewellynSmith", "CC"),
        ConfigSet::new().set_num("axial-mass", 0.99).set_text("current", "CC"),
    );
    registry.add_config(
        AlgId::new("QelLlewellynSmith", "NC"),
        ConfigSet::new().set_num("axial-mass", 0.99).set_text("current", "NC"),
    );
    registry.add_config(
        AlgId::new("ResBreitWigner", "CC"),
        ConfigSet::new()
            .set_text("current", "CC")
            .set_sub_alg("resonance-table", AlgId::new("BaryonResTable", "Default")),
    );
    registry.add_config(
        AlgId::new("ResBreitWigner", "NC"),
        ConfigSet::new()
            .set_text("current", "NC")
            .set_sub_alg("resonance-table", AlgId::new("BaryonResTable", "Default")),
    );
    registry.add_config(
        AlgId::new("DisPartonModel", "CC"),
        ConfigSet::new().set_text("current", "CC"),
    );
    registry.add_config(
        AlgId::new("DisPartonModel", "NC"),
        ConfigSet::new().set_text("current", "NC"),
    );
    registry.add_config(
        AlgId::new("CohPionProduction", "CC"),
        ConfigSet::new().set_text("current", "CC"),
    );
    registry.add_config(
        AlgId::new("CohPionProduction", "NC"),
        ConfigSet::new().set_text("current", "NC"),
    );
    registry.add_config(
        AlgId::new("StringFragmentation", "Default"),
        ConfigSet::new().set_num("alpha", 0.4).set_num("beta", 1.1),
    );
}

/// The generator list of a standard charged + neutral current run.
pub fn default_generator_ids() -> Vec<AlgId> {
    vec![
        AlgId::new("QelLlewellynSmith", "CC"),
        AlgId::new("QelLlewellynSmith", "NC"),
        AlgId::new("ResBreitWigner", "CC"),
        AlgId::new("ResBreitWigner", "NC"),
        AlgId::new("DisPartonModel", "CC"),
        AlgId::new("DisPartonModel", "NC"),
        AlgId::new("CohPionProduction", "CC"),
        AlgId::new("CohPionProduction", "NC"),
    ]
}

/// Parses the "current" configuration parameter shared by all models.
pub(crate) fn current_from_config(
    id: &AlgId,
    config: &ConfigSet,
) -> Result<crate::core::interaction::InteractionType, crate::registry::RegistryError> {
    use crate::core::interaction::InteractionType;
    match config.text("current") {
        Some("CC") => Ok(InteractionType::WeakCC),
        Some("NC") => Ok(InteractionType::WeakNC),
        Some("EM") => Ok(InteractionType::EM),
        _ => Err(crate::registry::RegistryError::MissingParam {
            id: id.clone(),
            key: "current".to_string(),
        }),
    }
}
