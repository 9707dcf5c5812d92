// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod estimate;
pub mod logging;
pub mod planner;
pub mod render;
pub mod types;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::loader::{load_and_plan, load_and_render};
use crate::types::ExecutionPlan;

pub use crate::errors::{PhaseplanError, ValidationError};
pub use crate::estimate::EstimateDefaults;
pub use crate::planner::{plan, plan_with, render};
pub use crate::types::{Edge, Phase, PhaseEstimate, RenderFormat, Step};

/// High-level entry point used by `main.rs`.
///
/// Loads the step file named on the command line, runs the planner and
/// prints the result to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Plan { file, json } => {
            let plan = load_and_plan(&file)
                .with_context(|| format!("planning steps from {:?}", file))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        Command::Graph { file, format } => {
            let rendered = load_and_render(&file, format)
                .with_context(|| format!("rendering steps from {:?}", file))?;
            print!("{rendered}");
        }
    }
    Ok(())
}

/// Human-readable phase breakdown.
fn print_plan(plan: &ExecutionPlan) {
    println!("execution plan ({} steps)", plan.step_count());
    println!();

    for (phase, estimate) in plan.phases.iter().zip(plan.phase_estimates.iter()) {
        println!(
            "phase {} ({} parallel, ~{:.1}s, ${:.2}):",
            phase.index + 1,
            phase.steps.len(),
            estimate.duration_seconds,
            estimate.cost
        );
        for step in phase.steps.iter() {
            println!("  - {} [{}]", step.name, step.id);
            println!("      agent: {} / {}", step.agent, step.action);
            if !step.depends_on.is_empty() {
                println!("      after: {:?}", step.depends_on);
            }
        }
    }

    println!();
    println!("total duration: ~{:.1}s", plan.total_duration_seconds);
    println!("total cost: ${:.2}", plan.total_cost);
    println!("critical path: {}", plan.critical_path.join(" -> "));

    debug!("plan printed");
}
