use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use neutrino_xsec_map::{default_registry, io::report, resolve_channels, ResolveConfig};

#[derive(Parser)]
#[command(author, version, about = "Neutrino Interaction Channel Resolver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolves every interaction channel for a probe/target pair and
    /// prints the channel -> algorithm table.
    Channels {
        /// Probe: numu, nue, numubar, ... or a PDG code.
        #[arg(short, long)]
        probe: String,

        /// Target: proton, neutron, c12, ar40, ... or a PDG code.
        #[arg(short, long)]
        target: String,

        /// Probe energy in GeV.
        #[arg(short, long, default_value_t = 2.0)]
        energy: f64,

        /// JSON tune file (model selection + parameter overrides).
        #[arg(long)]
        tune: Option<PathBuf>,

        /// Write the channel report to a file as well.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolves channels and evaluates each differential cross section at
    /// fixed kinematics.
    Xsec {
        #[arg(short, long)]
        probe: String,

        #[arg(short, long)]
        target: String,

        #[arg(short, long, default_value_t = 2.0)]
        energy: f64,

        /// Hadronic invariant mass W (GeV).
        #[arg(long, default_value_t = 1.232)]
        w: f64,

        /// Momentum transfer Q2 (GeV^2).
        #[arg(long, default_value_t = 0.2)]
        q2: f64,

        /// Bjorken x.
        #[arg(long, default_value_t = 0.25)]
        x: f64,

        /// Inelasticity y.
        #[arg(long, default_value_t = 0.5)]
        y: f64,

        #[arg(long)]
        tune: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start_time = Instant::now();

    match cli.command {
        Commands::Channels {
            probe,
            target,
            energy,
            tune,
            output,
        } => {
            println!("--- Neutrino Interaction Channel Resolver ---");
            println!("Resolving channels for {} + {} at {} GeV...", probe, target, energy);

            let mut registry = default_registry();
            let config = ResolveConfig {
                probe,
                target,
                energy,
                tune_path: tune,
            };
            let (map, channel_report) = resolve_channels(&mut registry, &config)?;

            println!("-> {} channels resolved.", map.get_interaction_list().len());
            println!("\n{}", channel_report);

            if let Some(path) = output {
                println!("Writing report to {:?}...", path);
                report::write_report(&path, &channel_report)?;
            }

            println!("Done in {:.2?}", start_time.elapsed());
        }

        Commands::Xsec {
            probe,
            target,
            energy,
            w,
            q2,
            x,
            y,
            tune,
        } => {
            println!("--- Differential Cross Section Evaluation ---");

            let mut registry = default_registry();
            let config = ResolveConfig {
                probe,
                target,
                energy,
                tune_path: tune,
            };
            let (map, channel_report) = resolve_channels(&mut registry, &config)?;

            println!("{}", channel_report);
            println!("{}", report::xsec_table(&map, w, q2, x, y));

            println!("Done in {:.2?}", start_time.elapsed());
        }
    }

    Ok(())
}
