use crate::core::algorithm::KinePhaseSpace;
use crate::core::map::XSecAlgorithmMap;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

// ============================================================================
// CHANNEL REPORTS
// ============================================================================

/// Renders the resolved channel table: one line per channel with the owning
/// algorithm, plus the per-channel total cross sections and their sum (the
/// enumeration use-case behind `get_interaction_list`).
pub fn channel_table(map: &XSecAlgorithmMap) -> String {
    let mut out = String::new();
    match map.init_state() {
        Some(init) => {
            let _ = writeln!(out, "--- Resolved channels for {} ---", init);
        }
        None => {
            let _ = writeln!(out, "--- Resolved channels (map not built) ---");
        }
    }

    let mut total = 0.0;
    for (n, interaction) in map.get_interaction_list().iter().enumerate() {
        // every listed interaction resolves; the map guarantees it
        let Some(alg) = map.find_xsec_algorithm(interaction) else {
            continue;
        };
        let sigma = alg.integral(interaction);
        total += sigma;
        let _ = writeln!(
            out,
            "{:>3}  {:<52}  {:<24}  {:>10.4}",
            n + 1,
            interaction.to_string(),
            alg.id().to_string(),
            sigma
        );
    }
    let _ = writeln!(
        out,
        "     {} channels, total xsec {:.4} (1e-38 cm^2)",
        map.get_interaction_list().len(),
        total
    );
    out
}

/// Per-channel differential cross sections at fixed kinematics, one phase
/// space per scattering type.
pub fn xsec_table(map: &XSecAlgorithmMap, w: f64, q2: f64, x: f64, y: f64) -> String {
    use crate::core::interaction::ScatteringType;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- Differential xsec at W={:.3} Q2={:.3} x={:.3} y={:.3} ---",
        w, q2, x, y
    );
    for interaction in map.get_interaction_list() {
        let Some(alg) = map.find_xsec_algorithm(interaction) else {
            continue;
        };
        let mut probe = interaction.clone();
        probe.kine.w = Some(w);
        probe.kine.q2 = Some(q2);
        probe.kine.x = Some(x);
        probe.kine.y = Some(y);

        let phase_space = match probe.proc_info.scattering_type {
            ScatteringType::Resonant => KinePhaseSpace::WQ2fE,
            ScatteringType::DeepInelastic => KinePhaseSpace::XYfE,
            _ => KinePhaseSpace::Q2fE,
        };
        let _ = writeln!(
            out,
            "  {:<52}  {:>12.6}",
            probe.to_string(),
            alg.xsec(&probe, phase_space)
        );
    }
    out
}

/// Writes a rendered report to disk.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    fs::write(path, report).with_context(|| format!("Could not write report to {:?}", path))
}
