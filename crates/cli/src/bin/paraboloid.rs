//! # Constrained paraboloid
//!
//! Sets up `min (x-3)^2 + xy + (y+4)^2 - 3` subject to `x + y >= 0` over
//! `[-50, 50]^2`, prints the ParOpt driver options, and evaluates the problem
//! at a point.
//!
//! ```sh
//! cargo run --bin paraboloid -- --algorithm tr --x 7 --y -7
//! ```

use anyhow::Context;
use clap::Parser;
use descent_cli::{Format, init_logging, print_json, report};
use descent_core::{ConstrainedProblem, Differentiable, evaluate};
use descent_driver::{Algorithm, DriverOptions};
use descent_models::paraboloid::{Paraboloid, ParaboloidProblem, Partials};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// ParOpt algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::Ip)]
    algorithm: Algorithm,

    /// x coordinate to evaluate (defaults to the start point)
    #[arg(long)]
    x: Option<f64>,

    /// y coordinate to evaluate (defaults to the start point)
    #[arg(long)]
    y: Option<f64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Debug, Serialize)]
struct Report {
    driver: DriverOptions,
    x: f64,
    y: f64,
    objective: f64,
    constraint: f64,
    feasible: bool,
    gradient: Partials,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    let problem = ParaboloidProblem::default();
    let [x0, y0] = problem.initial_point();
    let point = [cli.x.unwrap_or(x0), cli.y.unwrap_or(y0)];

    let driver = DriverOptions::paraboloid(cli.algorithm);
    info!(algorithm = %cli.algorithm, ?point, "evaluating paraboloid");

    let eval = evaluate(&Paraboloid, &problem, point).context("evaluating paraboloid")?;
    let gradient = Paraboloid
        .partials(&eval.snapshot.input)
        .context("computing paraboloid gradient")?;

    let summary = Report {
        driver,
        x: point[0],
        y: point[1],
        objective: eval.objective,
        constraint: eval.constraints[0],
        feasible: eval.feasible,
        gradient,
    };

    match cli.format {
        Format::Json => print_json(&summary)?,
        Format::Plain => {
            print!("{}", report::driver(&summary.driver));
            println!("Objective value = {:.2}", summary.objective);
            println!(
                "Constraint x + y = {:.2} ({})",
                summary.constraint,
                if summary.feasible { "feasible" } else { "infeasible" }
            );
            println!("(x, y) = ({:.2}, {:.2})", summary.x, summary.y);
        }
    }

    Ok(())
}
