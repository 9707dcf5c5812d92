#![allow(dead_code)]

use phaseplan::Step;

/// Builder for `Step` to simplify test setup.
///
/// Name, agent and action are derived from the id unless overridden; no
/// estimates are set, so the planner's defaults apply.
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            step: Step {
                id: id.to_string(),
                name: format!("Step {id}"),
                agent: "agent".to_string(),
                action: "run".to_string(),
                depends_on: vec![],
                estimated_duration_seconds: None,
                estimated_cost: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.step.name = name.to_string();
        self
    }

    pub fn agent(mut self, agent: &str) -> Self {
        self.step.agent = agent.to_string();
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.step.action = action.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.step.depends_on.push(dep.to_string());
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.step.estimated_duration_seconds = Some(seconds);
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.step.estimated_cost = Some(cost);
        self
    }

    pub fn build(self) -> Step {
        self.step
    }
}

/// Shorthand for a step with a fixed duration and dependencies.
pub fn step(id: &str, after: &[&str], duration: f64) -> Step {
    after
        .iter()
        .fold(StepBuilder::new(id), |b, dep| b.after(dep))
        .duration(duration)
        .build()
}

/// `ids[0] -> ids[1] -> ...`, each step depending on the previous one.
pub fn chain(ids: &[&str], duration: f64) -> Vec<Step> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let after: Vec<&str> = if i == 0 { vec![] } else { vec![ids[i - 1]] };
            step(id, &after, duration)
        })
        .collect()
}
