use std::collections::HashMap;

use proptest::prelude::*;
use phaseplan::types::ExecutionPlan;
use phaseplan::{plan, render, RenderFormat, Step};
use phaseplan_test_utils::builders::StepBuilder;

// Strategy to generate a valid step list.
// Acyclicity comes from only letting step N depend on steps 0..N-1; the list
// is then shuffled so input order is not a topological order.
fn dag_steps_strategy(max_steps: usize) -> impl Strategy<Value = Vec<Step>> {
    (1..=max_steps).prop_flat_map(|num_steps| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_steps),
            num_steps,
        );
        let durations = proptest::collection::vec(0u32..120, num_steps);
        let costs = proptest::collection::vec(0u32..500, num_steps);

        (deps_strat, durations, costs)
            .prop_map(move |(raw_deps, durations, costs)| {
                raw_deps
                    .into_iter()
                    .enumerate()
                    .map(|(i, potential_deps)| {
                        let mut builder = StepBuilder::new(&format!("step_{i}"))
                            .duration(f64::from(durations[i]))
                            .cost(f64::from(costs[i]) / 100.0);
                        // Sanitize dependencies: only allow deps < i.
                        if i > 0 {
                            for dep_idx in potential_deps {
                                builder = builder.after(&format!("step_{}", dep_idx % i));
                            }
                        }
                        builder.build()
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    })
}

fn phase_index(plan: &ExecutionPlan) -> HashMap<String, usize> {
    plan.phases
        .iter()
        .flat_map(|phase| phase.step_ids().map(move |id| (id.to_string(), phase.index)))
        .collect()
}

fn approx_le(a: f64, b: f64) -> bool {
    a <= b + 1e-9 * b.abs().max(1.0)
}

fn approx_eq(a: f64, b: f64) -> bool {
    approx_le(a, b) && approx_le(b, a)
}

proptest! {
    #[test]
    fn test_phases_partition_the_steps(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");
        let index = phase_index(&plan);

        prop_assert_eq!(plan.step_count(), steps.len());
        prop_assert_eq!(index.len(), steps.len());
        for step in &steps {
            prop_assert!(index.contains_key(&step.id), "step {} missing from phases", step.id);
        }
        for (position, phase) in plan.phases.iter().enumerate() {
            prop_assert_eq!(phase.index, position);
            prop_assert!(!phase.steps.is_empty());
        }
    }

    #[test]
    fn test_dependencies_run_in_strictly_earlier_phases(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");
        let index = phase_index(&plan);

        for step in &steps {
            for dep in &step.depends_on {
                prop_assert!(
                    index[dep] < index[&step.id],
                    "{} (phase {}) runs before its dependency {} (phase {})",
                    step.id, index[&step.id], dep, index[dep]
                );
            }
        }
    }

    #[test]
    fn test_phases_are_minimal(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");
        let index = phase_index(&plan);

        // A step in phase k > 0 has a dependency in phase k - 1, otherwise it
        // could have run earlier. No two steps of a phase share an edge.
        for step in &steps {
            let phase = index[&step.id];
            if phase > 0 {
                prop_assert!(step.depends_on.iter().any(|dep| index[dep] == phase - 1));
            }
            for dep in &step.depends_on {
                prop_assert_ne!(index[dep], phase);
            }
        }
    }

    #[test]
    fn test_critical_path_duration_is_bounded(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");

        let durations: Vec<f64> = steps
            .iter()
            .map(|s| s.estimated_duration_seconds.unwrap_or_default())
            .collect();
        let longest = durations.iter().copied().fold(0.0, f64::max);
        let sum: f64 = durations.iter().sum();

        prop_assert!(approx_le(longest, plan.total_duration_seconds));
        prop_assert!(approx_le(plan.total_duration_seconds, sum));
    }

    #[test]
    fn test_critical_path_is_a_dependency_chain(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");
        let by_id: HashMap<&str, &Step> = steps.iter().map(|s| (s.id.as_str(), s)).collect();

        prop_assert!(!plan.critical_path.is_empty());
        for pair in plan.critical_path.windows(2) {
            let later = by_id[pair[1].as_str()];
            prop_assert!(later.depends_on.contains(&pair[0]));
        }

        let along_path: f64 = plan
            .critical_path
            .iter()
            .map(|id| by_id[id.as_str()].estimated_duration_seconds.unwrap_or_default())
            .sum();
        prop_assert!(approx_eq(along_path, plan.total_duration_seconds));
    }

    #[test]
    fn test_total_cost_is_the_sum_of_step_costs(steps in dag_steps_strategy(12)) {
        let plan = plan(&steps).expect("generated graphs are valid");
        let sum: f64 = steps.iter().map(|s| s.estimated_cost.unwrap_or_default()).sum();

        prop_assert!(approx_eq(plan.total_cost, sum));
    }

    #[test]
    fn test_every_format_mentions_every_step_and_edge(steps in dag_steps_strategy(10)) {
        let tree = render(&steps, RenderFormat::Tree).expect("should render");
        let dot = render(&steps, RenderFormat::Dot).expect("should render");
        let mermaid = render(&steps, RenderFormat::Mermaid).expect("should render");

        let position: HashMap<&str, usize> = steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();

        for step in &steps {
            let label = format!("[{}]", step.id);
            prop_assert!(tree.contains(&label));
            let node_decl = format!("\"{}\" [label=", step.id);
            prop_assert!(dot.contains(&node_decl));
            prop_assert!(mermaid.contains(&label));

            let mut seen = std::collections::HashSet::new();
            for dep in step.depends_on.iter().filter(|d| seen.insert(d.as_str())) {
                let dot_edge = format!("\"{}\" -> \"{}\";", dep, step.id);
                prop_assert!(dot.contains(&dot_edge));
                let edge = format!("  n{} --> n{}\n", position[dep.as_str()], position[step.id.as_str()]);
                prop_assert!(mermaid.contains(&edge));
            }
        }

        prop_assert_eq!(render(&steps, RenderFormat::Tree).expect("should render"), tree);
    }

    #[test]
    fn test_tree_expands_each_step_once_and_prints_each_edge_once(steps in dag_steps_strategy(10)) {
        let tree = render(&steps, RenderFormat::Tree).expect("should render");

        let mut expanded: HashMap<String, usize> = HashMap::new();
        let mut repeated: HashMap<String, usize> = HashMap::new();
        for line in tree.lines() {
            let label = line.trim_start_matches(['│', '├', '└', '─', ' ']);
            match label.strip_suffix(" (*)") {
                Some(label) => *repeated.entry(label.to_string()).or_default() += 1,
                None => *expanded.entry(label.to_string()).or_default() += 1,
            }
        }

        let mut edges = 0;
        for step in &steps {
            let label = format!("{} [{}]", step.name, step.id);
            let distinct: std::collections::HashSet<&str> =
                step.depends_on.iter().map(String::as_str).collect();
            edges += distinct.len();

            prop_assert_eq!(expanded.get(&label).copied(), Some(1), "{} not expanded exactly once", label);
            let extra_parents = distinct.len().saturating_sub(1);
            prop_assert_eq!(repeated.get(&label).copied().unwrap_or(0), extra_parents);
        }

        let roots = steps.iter().filter(|s| s.depends_on.is_empty()).count();
        prop_assert_eq!(tree.lines().count(), roots + edges);
    }
}
