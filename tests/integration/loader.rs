// tests/integration/loader.rs

use std::io::Write;
use tempfile::NamedTempFile;
use phaseplan::config::{load_and_plan, load_and_render, load_and_validate, load_from_path};
use phaseplan::errors::PhaseplanError;
use phaseplan::RenderFormat;
use phaseplan_test_utils::init_tracing;

fn write_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const PIPELINE_TOML: &str = r#"
[defaults]
duration_seconds = 20
cost = 0.1

[[step]]
id = "fetch"
name = "Fetch data"
agent = "http"
action = "get"
estimated_duration_seconds = 5

[[step]]
id = "train"
name = "Train model"
agent = "gpu"
action = "fit"
depends_on = ["fetch"]
estimated_duration_seconds = 600
estimated_cost = 2.5

[[step]]
id = "lint"
name = "Lint config"
agent = "shell"
action = "check"

[[step]]
id = "report"
name = "Write report"
agent = "writer"
action = "summarize"
depends_on = ["train", "lint"]
"#;

#[test]
fn test_toml_step_file_plans_with_file_defaults() {
    init_tracing();

    let file = write_file(".toml", PIPELINE_TOML);
    let plan = load_and_plan(file.path()).expect("should plan");

    let phases: Vec<Vec<&str>> = plan.phases.iter().map(|p| p.step_ids().collect()).collect();
    assert_eq!(phases, vec![vec!["fetch", "lint"], vec!["train"], vec!["report"]]);
    assert_eq!(plan.critical_path, vec!["fetch", "train", "report"]);
    // 5 + 600 + 20 (default)
    assert_eq!(plan.total_duration_seconds, 625.0);
    // 0.1 + 2.5 + 0.1 + 0.1
    assert!((plan.total_cost - 2.8).abs() < 1e-9);
}

#[test]
fn test_toml_defaults_section_is_optional() {
    init_tracing();

    let file = write_file(
        ".toml",
        r#"
[[step]]
id = "only"
name = "Only"
agent = "shell"
action = "run"
"#,
    );
    let loaded = load_and_validate(file.path()).expect("should load");

    assert_eq!(loaded.defaults().duration_seconds, 30.0);
    assert_eq!(loaded.defaults().cost, 0.05);
    assert_eq!(loaded.steps().len(), 1);
}

#[test]
fn test_json_document_accepts_camel_case_fields() {
    init_tracing();

    let file = write_file(
        ".json",
        r#"{
  "defaults": { "duration_seconds": 1, "cost": 0 },
  "steps": [
    { "id": "a", "name": "A", "agent": "x", "action": "y", "estimatedDurationSeconds": 4 },
    { "id": "b", "name": "B", "agent": "x", "action": "y", "dependsOn": ["a"], "estimatedCost": 0.5 }
  ]
}"#,
    );
    let plan = load_and_plan(file.path()).expect("should plan");

    assert_eq!(plan.total_duration_seconds, 5.0);
    assert_eq!(plan.total_cost, 0.5);
    assert_eq!(plan.critical_path, vec!["a", "b"]);
}

#[test]
fn test_json_bare_array_uses_builtin_defaults() {
    init_tracing();

    let file = write_file(
        ".json",
        r#"[
  { "id": "a", "name": "A", "agent": "x", "action": "y" },
  { "id": "b", "name": "B", "agent": "x", "action": "y", "depends_on": ["a"] }
]"#,
    );
    let raw = load_from_path(file.path()).expect("should parse");
    assert_eq!(raw.step.len(), 2);

    let plan = load_and_plan(file.path()).expect("should plan");
    assert_eq!(plan.total_duration_seconds, 60.0);
}

#[test]
fn test_malformed_json_is_a_json_error() {
    init_tracing();

    let file = write_file(".json", "{ \"steps\": [ ");

    assert!(matches!(
        load_from_path(file.path()),
        Err(PhaseplanError::JsonError(_))
    ));
}

#[test]
fn test_json_errors_name_the_offending_key() {
    init_tracing();

    let document = write_file(
        ".json",
        r#"{"steps": [{"id": "a", "name": "A", "agent": "x", "action": "y", "colour": "red"}]}"#,
    );
    match load_from_path(document.path()) {
        Err(PhaseplanError::JsonError(err)) => {
            assert!(err.to_string().contains("colour"), "unexpected error: {err}");
        }
        other => panic!("expected a JSON error, got {other:?}"),
    }

    let array = write_file(
        ".json",
        r#"[{"id": "a", "name": "A", "agent": "x", "action": "y", "estimatedCost": "cheap"}]"#,
    );
    match load_from_path(array.path()) {
        Err(PhaseplanError::JsonError(err)) => {
            let message = err.to_string();
            assert!(!message.contains("did not match any variant"), "unexpected error: {message}");
            assert!(message.contains("cheap"), "unexpected error: {message}");
        }
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn test_render_from_file() {
    init_tracing();

    let file = write_file(".toml", PIPELINE_TOML);
    let tree = load_and_render(file.path(), RenderFormat::Tree).expect("should render");

    let expected = "\
Fetch data [fetch]
└── Train model [train]
    └── Write report [report]
Lint config [lint]
└── Write report [report] (*)
";
    assert_eq!(tree, expected);
}
