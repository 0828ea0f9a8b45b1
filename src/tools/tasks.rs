//! Task prioritization tool.
//!
//! Scores a list of task objects against weighted criteria and returns
//! them sorted by descending score. Effort counts inversely: a cheap task
//! scores higher than an expensive one of equal urgency.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolError};

/// Default criteria weights when the caller supplies none.
const DEFAULT_CRITERIA: &[(&str, f64)] = &[
    ("urgency", 0.3),
    ("importance", 0.4),
    ("effort", 0.2),
    ("dependencies", 0.1),
];

/// Ratings are expected on a 1-10 scale; missing fields default to the
/// midpoint so partially-specified tasks still rank sensibly.
const RATING_MAX: f64 = 10.0;
const RATING_DEFAULT: f64 = 5.0;

/// Prioritize a list of tasks by weighted criteria.
pub struct PrioritizeTasks;

#[async_trait]
impl Tool for PrioritizeTasks {
    fn name(&self) -> &str {
        "prioritize_tasks"
    }

    fn description(&self) -> &str {
        "Prioritize a list of tasks by weighted criteria (urgency, importance, effort, dependencies; ratings 1-10). Parameters: {\"tasks\": [{\"name\": \"...\", \"urgency\": 8}], \"criteria\": {\"urgency\": 0.5}}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let tasks = args["tasks"]
            .as_array()
            .ok_or_else(|| ToolError::msg("Missing 'tasks' argument (expected a list)"))?;

        let criteria: Vec<(String, f64)> = match args.get("criteria") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| {
                    let weight = v
                        .as_f64()
                        .ok_or_else(|| ToolError::msg(format!("Criterion '{}' must be a number", k)))?;
                    Ok((k.clone(), weight))
                })
                .collect::<Result<_, ToolError>>()?,
            Some(Value::Null) | None => DEFAULT_CRITERIA
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
            Some(_) => return Err(ToolError::msg("'criteria' must be an object of weights")),
        };

        let mut scored: Vec<(f64, Value)> = tasks
            .iter()
            .map(|task| {
                if !task.is_object() {
                    return Err(ToolError::msg("Each task must be an object"));
                }
                let score = score_task(task, &criteria);
                let mut annotated = task.clone();
                annotated["priority_score"] = json!(round2(score));
                Ok((score, annotated))
            })
            .collect::<Result<_, ToolError>>()?;

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(Value::Array(scored.into_iter().map(|(_, t)| t).collect()))
    }
}

fn score_task(task: &Value, criteria: &[(String, f64)]) -> f64 {
    criteria
        .iter()
        .map(|(name, weight)| {
            let rating = task[name.as_str()]
                .as_f64()
                .unwrap_or(RATING_DEFAULT)
                .clamp(0.0, RATING_MAX);
            // High effort should push a task down, not up.
            let value = if name == "effort" {
                RATING_MAX - rating
            } else {
                rating
            };
            weight * value / RATING_MAX
        })
        .sum()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
