// ============================================================================
// PDG PARTICLE CODES
// ============================================================================
// Monte Carlo particle numbering scheme (PDG). Only the codes the framework
// actually handles are listed; nuclear targets use the 10LZZZAAAI ion scheme.

pub const NU_E: i32 = 12;
pub const NU_MU: i32 = 14;
pub const NU_TAU: i32 = 16;
pub const ANTI_NU_E: i32 = -12;
pub const ANTI_NU_MU: i32 = -14;
pub const ANTI_NU_TAU: i32 = -16;

pub const ELECTRON: i32 = 11;
pub const MUON: i32 = 13;
pub const TAU: i32 = 15;

pub const PROTON: i32 = 2212;
pub const NEUTRON: i32 = 2112;

pub const UP_QUARK: i32 = 2;
pub const DOWN_QUARK: i32 = 1;

pub const PI_ZERO: i32 = 111;
pub const PI_PLUS: i32 = 211;
pub const PI_MINUS: i32 = -211;

/// Base of the PDG nuclear ion code scheme (10LZZZAAAI with L=0, I=0).
const ION_BASE: i32 = 1_000_000_000;

pub fn is_neutrino(pdg: i32) -> bool {
    matches!(pdg, NU_E | NU_MU | NU_TAU)
}

pub fn is_anti_neutrino(pdg: i32) -> bool {
    matches!(pdg, ANTI_NU_E | ANTI_NU_MU | ANTI_NU_TAU)
}

pub fn is_lepton_probe(pdg: i32) -> bool {
    is_neutrino(pdg) || is_anti_neutrino(pdg) || pdg.abs() == ELECTRON
}

pub fn is_nucleon(pdg: i32) -> bool {
    matches!(pdg, PROTON | NEUTRON)
}

pub fn is_ion(pdg: i32) -> bool {
    pdg > ION_BASE
}

/// Composes a nuclear PDG code from proton number Z and mass number A.
pub fn ion_pdg_code(z: i32, a: i32) -> i32 {
    ION_BASE + z * 10_000 + a * 10
}

/// Proton number of an ion code.
pub fn ion_z(ion_pdg: i32) -> i32 {
    (ion_pdg - ION_BASE) / 10_000
}

/// Mass number of an ion code.
pub fn ion_a(ion_pdg: i32) -> i32 {
    ((ion_pdg - ION_BASE) % 10_000) / 10
}

/// The charged lepton produced when a (anti)neutrino undergoes a CC transition.
pub fn charged_lepton_partner(nu_pdg: i32) -> Option<i32> {
    match nu_pdg {
        NU_E => Some(ELECTRON),
        NU_MU => Some(MUON),
        NU_TAU => Some(TAU),
        ANTI_NU_E => Some(-ELECTRON),
        ANTI_NU_MU => Some(-MUON),
        ANTI_NU_TAU => Some(-TAU),
        _ => None,
    }
}

/// Human-readable symbol for the codes the framework handles.
pub fn particle_name(pdg: i32) -> String {
    match pdg {
        NU_E => "nu_e".into(),
        NU_MU => "nu_mu".into(),
        NU_TAU => "nu_tau".into(),
        ANTI_NU_E => "nu_e_bar".into(),
        ANTI_NU_MU => "nu_mu_bar".into(),
        ANTI_NU_TAU => "nu_tau_bar".into(),
        ELECTRON => "e-".into(),
        x if x == -ELECTRON => "e+".into(),
        MUON => "mu-".into(),
        x if x == -MUON => "mu+".into(),
        TAU => "tau-".into(),
        x if x == -TAU => "tau+".into(),
        PROTON => "p".into(),
        NEUTRON => "n".into(),
        UP_QUARK => "u".into(),
        DOWN_QUARK => "d".into(),
        PI_ZERO => "pi0".into(),
        PI_PLUS => "pi+".into(),
        PI_MINUS => "pi-".into(),
        _ if is_ion(pdg) => format!("A(Z={},A={})", ion_z(pdg), ion_a(pdg)),
        _ => format!("pdg({})", pdg),
    }
}

/// Inverse of the probe/target names accepted on the command line.
pub fn code_from_name(name: &str) -> Option<i32> {
    match name {
        "nu_e" | "nue" => Some(NU_E),
        "nu_mu" | "numu" => Some(NU_MU),
        "nu_tau" | "nutau" => Some(NU_TAU),
        "nu_e_bar" | "nuebar" => Some(ANTI_NU_E),
        "nu_mu_bar" | "numubar" => Some(ANTI_NU_MU),
        "nu_tau_bar" | "nutaubar" => Some(ANTI_NU_TAU),
        "e-" | "electron" => Some(ELECTRON),
        "p" | "proton" => Some(PROTON),
        "n" | "neutron" => Some(NEUTRON),
        "C12" | "c12" => Some(ion_pdg_code(6, 12)),
        "O16" | "o16" => Some(ion_pdg_code(8, 16)),
        "Ar40" | "ar40" => Some(ion_pdg_code(18, 40)),
        "Fe56" | "fe56" => Some(ion_pdg_code(26, 56)),
        other => other.parse::<i32>().ok(),
    }
}
