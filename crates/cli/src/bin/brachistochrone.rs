//! # Brachistochrone
//!
//! Declares the minimum-time bead-on-a-wire phase, checks it against the ODE,
//! evaluates the ODE at the initial guess on every node, and prints the
//! pyOptSparse driver options.
//!
//! ```sh
//! cargo run --bin brachistochrone -- --algorithm ip --check-partials
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use descent_cli::{Format, init_logging, print_json, report};
use descent_core::check::CheckConfig;
use descent_driver::DriverOptions;
use descent_models::brachistochrone::{BrachistochroneOde, PartialCheck};
use descent_phase::{
    GaussLobatto, Phase,
    brachistochrone::{self, InitialGuess, NodeValues},
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optimizer name passed to pyOptSparse
    #[arg(long, default_value = "ParOpt")]
    optimizer: String,

    /// ParOpt algorithm: `tr`, or anything else for interior point
    #[arg(long, default_value = "tr")]
    algorithm: String,

    /// Number of Gauss-Lobatto segments
    #[arg(long, default_value_t = 10)]
    num_segments: usize,

    /// Nodes per segment (odd, at least 3)
    #[arg(long, default_value_t = 3)]
    order: usize,

    /// Compare the analytic partials with central differences at the guess
    #[arg(long)]
    check_partials: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    driver: DriverOptions,
    phase: &'a Phase,
    guess: InitialGuess,
    nodes: NodeValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    partials: Option<Vec<PartialCheck>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let transcription =
        GaussLobatto::new(cli.num_segments, cli.order).context("invalid transcription")?;
    let phase = brachistochrone::phase(transcription);
    let ode = BrachistochroneOde::new(phase.grid().num_nodes());
    phase.check(&ode).context("phase setup check failed")?;
    info!(
        segments = transcription.num_segments(),
        order = transcription.order(),
        nodes = ode.num_nodes(),
        "phase set up"
    );

    let guess = brachistochrone::initial_guess(&phase).context("building initial guess")?;
    let nodes = brachistochrone::evaluate_guess(&phase, &ode, &guess)
        .context("evaluating the ODE at the initial guess")?;

    let partials = if cli.check_partials {
        let checks = ode
            .check_partials(&nodes.ode_input(), &CheckConfig::default())
            .context("checking partials")?;
        Some(checks)
    } else {
        None
    };

    let driver = DriverOptions::trajectory(&cli.optimizer, &cli.algorithm);
    let summary = Report {
        driver,
        phase: &phase,
        guess,
        nodes,
        partials,
    };

    match cli.format {
        Format::Json => print_json(&summary)?,
        Format::Plain => {
            print!("{}", report::driver(&summary.driver));
            println!();
            print!("{}", report::node_table(&summary.nodes));
            if let Some(checks) = &summary.partials {
                println!();
                print!("{}", report::check_table(checks));
            }
        }
    }

    let failed = summary
        .partials
        .iter()
        .flatten()
        .filter(|check| !check.comparison.passed)
        .count();
    if failed > 0 {
        warn!(failed, "analytic partials disagree with central differences");
        bail!("{failed} partial blocks failed the check");
    }

    Ok(())
}
