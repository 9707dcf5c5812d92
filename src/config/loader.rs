// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawStepFile, StepFile};
use crate::errors::Result;
use crate::planner::{plan_with, render};
use crate::types::{ExecutionPlan, RenderFormat, Step};

/// Load a step file and return the raw `RawStepFile`.
///
/// Files ending in `.json` are parsed as JSON, everything else as TOML. This
/// only deserializes; use [`load_and_validate`] for the `[defaults]` checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawStepFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawStepFile = if is_json(path) {
        parse_json(&contents)?
    } else {
        toml::from_str::<RawStepFile>(&contents)?
    };

    debug!(path = ?path, steps = raw.step.len(), "step file loaded");
    Ok(raw)
}

/// Load a step file and validate its `[defaults]`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<StepFile> {
    let raw = load_from_path(&path)?;
    let file = StepFile::try_from(raw)?;
    Ok(file)
}

/// Load a step file and build its execution plan.
pub fn load_and_plan(path: impl AsRef<Path>) -> Result<ExecutionPlan> {
    let file = load_and_validate(path)?;
    let plan = plan_with(file.steps(), file.defaults())?;
    Ok(plan)
}

/// Load a step file and render its graph.
pub fn load_and_render(path: impl AsRef<Path>, format: RenderFormat) -> Result<String> {
    let file = load_and_validate(path)?;
    let rendered = render(file.steps(), format)?;
    Ok(rendered)
}

/// Step file used when `--file` is not given: `Phaseplan.toml` in the
/// current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Phaseplan.toml")
}

/// A top-level array is a bare step list; anything else is a document. The
/// shape is picked up front so serde reports the offending key and position.
fn parse_json(contents: &str) -> Result<RawStepFile> {
    if contents.trim_start().starts_with('[') {
        let steps: Vec<Step> = serde_json::from_str(contents)?;
        Ok(RawStepFile::from_steps(steps))
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
