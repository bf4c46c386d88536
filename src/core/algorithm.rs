use crate::core::interaction::{InitialState, Interaction, Resonance};
use crate::core::list::InteractionList;
use crate::registry::config::AlgId;
use std::sync::Arc;

// ============================================================================
// CAPABILITY INTERFACES
// ============================================================================
// Every configured algorithm implements exactly one of these. Instances are
// immutable after configuration and shared read-only across maps and
// threads, hence the `Send + Sync` bounds.

/// Which kinematic phase space a differential cross section is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KinePhaseSpace {
    /// d2sigma / dW dQ2 at fixed probe energy.
    WQ2fE,
    /// d2sigma / dx dy at fixed probe energy.
    XYfE,
    /// dsigma / dQ2 at fixed probe energy.
    Q2fE,
}

/// A cross-section evaluator: claims responsibility for a set of discrete
/// channels and evaluates their (differential) cross sections.
pub trait XSecAlgorithm: Send + Sync {
    /// Identity the instance was configured under.
    fn id(&self) -> &AlgId;

    /// Can this model evaluate the given channel at all?
    fn valid_process(&self, interaction: &Interaction) -> bool;

    /// Every discrete channel this model claims for the initial state.
    /// An empty list is a normal answer (e.g. a channel forbidden by
    /// conservation laws), never an error.
    fn enumerate_interactions(&self, init_state: &InitialState) -> InteractionList;

    /// Differential cross section for the channel, in the given phase space.
    /// Returns 0 for a channel the model cannot evaluate.
    fn xsec(&self, interaction: &Interaction, phase_space: KinePhaseSpace) -> f64;

    /// Total (integrated) cross section for the channel at the channel's
    /// probe energy.
    fn integral(&self, interaction: &Interaction) -> f64;
}

impl std::fmt::Debug for dyn XSecAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XSecAlgorithm({})", self.id())
    }
}

/// Shared handle to a configured cross-section algorithm. The registry is
/// the configuring owner; maps hold these handles without ever mutating or
/// re-configuring the instance behind them.
pub type XSecAlgRef = Arc<dyn XSecAlgorithm>;

/// Baryon resonance parameter provider (mass/width tables).
pub trait ResonanceTable: Send + Sync {
    fn id(&self) -> &AlgId;
    /// Resonance mass in GeV.
    fn mass(&self, res: Resonance) -> f64;
    /// Resonance width in GeV.
    fn width(&self, res: Resonance) -> f64;
    /// Breit-Wigner normalization constant.
    fn breit_wigner_norm(&self, res: Resonance) -> f64;
    /// Orbital angular momentum of the resonance.
    fn orbital_angular_mom(&self, res: Resonance) -> i32;
}

/// Hadronic final-state provider. The physics behind it is external to this
/// framework; the returned values are final-state PDG codes.
pub trait Hadronizer: Send + Sync {
    fn id(&self) -> &AlgId;
    fn hadronize(&self, interaction: &Interaction) -> Vec<i32>;
}
