use crate::core::pdg;
use nalgebra::Vector4;
use std::fmt;

// ============================================================================
// PROCESS CLASSIFICATION
// ============================================================================

/// Which current mediates the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionType {
    WeakCC,
    WeakNC,
    EM,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeakCC => "CC",
            Self::WeakNC => "NC",
            Self::EM => "EM",
        }
    }
}

/// The scattering mechanism the channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatteringType {
    QuasiElastic,
    Resonant,
    DeepInelastic,
    Coherent,
}

impl ScatteringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuasiElastic => "QEL",
            Self::Resonant => "RES",
            Self::DeepInelastic => "DIS",
            Self::Coherent => "COH",
        }
    }
}

/// Baryon resonances the RES model produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resonance {
    P33_1232,
    S11_1535,
    D13_1520,
    S11_1650,
    F15_1680,
}

impl Resonance {
    pub fn all() -> &'static [Resonance] {
        &[
            Self::P33_1232,
            Self::S11_1535,
            Self::D13_1520,
            Self::S11_1650,
            Self::F15_1680,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P33_1232 => "P33(1232)",
            Self::S11_1535 => "S11(1535)",
            Self::D13_1520 => "D13(1520)",
            Self::S11_1650 => "S11(1650)",
            Self::F15_1680 => "F15(1680)",
        }
    }
}

/// Interaction type + scattering type pair identifying the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessInfo {
    pub interaction_type: InteractionType,
    pub scattering_type: ScatteringType,
}

impl ProcessInfo {
    pub fn new(interaction_type: InteractionType, scattering_type: ScatteringType) -> Self {
        Self {
            interaction_type,
            scattering_type,
        }
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.interaction_type.as_str(),
            self.scattering_type.as_str()
        )
    }
}

// ============================================================================
// INITIAL STATE
// ============================================================================

/// The incoming configuration of a reaction: probe + target (+ struck nucleon
/// when the target is a nucleus), before any channel selection.
///
/// The probe four-momentum is continuous lab-frame data; it never enters
/// channel identification.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    pub probe: i32,
    pub target: i32,
    pub hit_nucleon: Option<i32>,
    pub probe_p4: Vector4<f64>,
}

impl InitialState {
    /// Probe with energy `e` along +z, on the given target.
    pub fn new(probe: i32, target: i32, e: f64) -> Self {
        Self {
            probe,
            target,
            hit_nucleon: None,
            probe_p4: Vector4::new(e, 0.0, 0.0, e),
        }
    }

    pub fn with_hit_nucleon(mut self, nucleon: i32) -> Self {
        self.hit_nucleon = Some(nucleon);
        self
    }

    pub fn probe_energy(&self) -> f64 {
        self.probe_p4[0]
    }

    /// The nucleon the probe scatters off: the explicit struck nucleon for
    /// nuclear targets, or the target itself when it is a free nucleon.
    pub fn struck_nucleon(&self) -> Option<i32> {
        self.hit_nucleon
            .or_else(|| pdg::is_nucleon(self.target).then_some(self.target))
    }

    /// Nucleon content of the target: (has protons, has neutrons).
    pub fn nucleon_content(&self) -> (bool, bool) {
        if pdg::is_ion(self.target) {
            let z = pdg::ion_z(self.target);
            let n = pdg::ion_a(self.target) - z;
            (z > 0, n > 0)
        } else {
            (self.target == pdg::PROTON, self.target == pdg::NEUTRON)
        }
    }
}

impl fmt::Display for InitialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}",
            pdg::particle_name(self.probe),
            pdg::particle_name(self.target)
        )?;
        if let Some(nucleon) = self.hit_nucleon {
            write!(f, "[{}]", pdg::particle_name(nucleon))?;
        }
        write!(f, " (E={:.3} GeV)", self.probe_energy())
    }
}

// ============================================================================
// KINEMATICS
// ============================================================================

/// Continuous kinematic variables, settable after channel selection.
/// Deliberately excluded from channel identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kinematics {
    pub w: Option<f64>,
    pub q2: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

// ============================================================================
// INTERACTION & CHANNEL KEY
// ============================================================================

/// The discrete channel descriptor of an Interaction. Two Interactions
/// belong to the same channel iff their keys are equal; kinematics never
/// participate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub probe: i32,
    pub target: i32,
    pub hit_nucleon: Option<i32>,
    pub interaction_type: InteractionType,
    pub scattering_type: ScatteringType,
    pub resonance: Option<Resonance>,
    pub hit_quark: Option<i32>,
}

/// One specific reaction channel: initial state, process classification,
/// optional resonance / struck-quark tags, and (mutable) kinematics.
///
/// Value semantics throughout: `Clone` is a deep copy, lists own their
/// elements, and no Interaction is ever aliased between containers.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub init_state: InitialState,
    pub proc_info: ProcessInfo,
    pub resonance: Option<Resonance>,
    pub hit_quark: Option<i32>,
    pub kine: Kinematics,
}

impl Interaction {
    pub fn new(init_state: InitialState, proc_info: ProcessInfo) -> Self {
        Self {
            init_state,
            proc_info,
            resonance: None,
            hit_quark: None,
            kine: Kinematics::default(),
        }
    }

    pub fn with_resonance(mut self, res: Resonance) -> Self {
        self.resonance = Some(res);
        self
    }

    pub fn with_hit_quark(mut self, quark: i32) -> Self {
        self.hit_quark = Some(quark);
        self
    }

    /// Derives the discrete lookup key. Round-trips: an Interaction stored
    /// in a map is stored under exactly this key.
    pub fn channel_key(&self) -> ChannelKey {
        ChannelKey {
            probe: self.init_state.probe,
            target: self.init_state.target,
            hit_nucleon: self.init_state.hit_nucleon,
            interaction_type: self.proc_info.interaction_type,
            scattering_type: self.proc_info.scattering_type,
            resonance: self.resonance,
            hit_quark: self.hit_quark,
        }
    }

    /// Channel equality: identical discrete descriptors, kinematics ignored.
    pub fn same_channel(&self, other: &Interaction) -> bool {
        self.channel_key() == other.channel_key()
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.proc_info, self.init_state)?;
        if let Some(res) = self.resonance {
            write!(f, " res:{}", res.as_str())?;
        }
        if let Some(q) = self.hit_quark {
            write!(f, " quark:{}", pdg::particle_name(q))?;
        }
        Ok(())
    }
}
