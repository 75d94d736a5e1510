//! Task generation for the generate-task dialog.
//!
//! A request is captured from the dialog form and resolved after a delay by a
//! [`Generator`]. The pending request is owned by the dialog, so closing or
//! reopening the dialog drops it.

use crate::domain::{Task, TaskStatus};
use chrono::NaiveDate;
use std::time::{Duration, Instant};

/// Free-form inputs captured from the dialog; not validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub objective: String,
    pub due_date: String,
    pub priority: String,
    pub scope: String,
}

/// Result shown in the preview stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    pub title: String,
    pub due: Option<NaiveDate>,
    pub priority: String,
    pub scope: String,
    pub steps: Vec<String>,
}

impl GeneratedPlan {
    /// Turn the plan into a parent task with one subtask per step
    pub fn into_task(self) -> Task {
        let mut task = Task::new(self.title, TaskStatus::Todo).with_due(self.due);
        for step in self.steps {
            task.add_subtask(Task::new(step, TaskStatus::Todo).with_due(self.due));
        }
        task
    }
}

/// Produces a plan from a request. Any input, even an empty one, yields a plan.
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> GeneratedPlan;
}

/// Stand-in for a generation backend: derives a fixed set of steps from the inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGenerator;

impl Generator for SimulatedGenerator {
    fn generate(&self, request: &GenerationRequest) -> GeneratedPlan {
        let objective = request.objective.trim();
        let title = if objective.is_empty() {
            String::from("Untitled objective")
        } else {
            objective.to_string()
        };
        let due = parse_due_date(&request.due_date);
        let scope = request.scope.trim().to_string();
        let priority = request.priority.trim().to_string();

        let mut steps = vec![
            format!("Outline what \"{}\" needs", title),
            format!("Break \"{}\" into milestones", title),
        ];
        if !scope.is_empty() {
            steps.push(format!("Review plan with {}", scope));
        }
        steps.push(match due {
            Some(date) => format!("Deliver by {}", date.format("%Y-%m-%d")),
            None => String::from("Deliver"),
        });

        GeneratedPlan {
            title,
            due,
            priority,
            scope,
            steps,
        }
    }
}

/// Lenient due date parsing: anything but YYYY-MM-DD means "no due date"
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// A request waiting for its simulated delay to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: u64,
    pub ready_at: Instant,
    pub request: GenerationRequest,
}

impl PendingGeneration {
    pub fn new(ticket: u64, requested_at: Instant, delay: Duration, request: GenerationRequest) -> Self {
        Self {
            ticket,
            ready_at: requested_at + delay,
            request,
        }
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at
    }

    /// Time left before the request resolves
    pub fn remaining(&self, now: Instant) -> Duration {
        self.ready_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> GenerationRequest {
        GenerationRequest {
            objective: "Ship v1".to_string(),
            due_date: "2025-01-01".to_string(),
            priority: "high".to_string(),
            scope: "team".to_string(),
        }
    }

    #[test]
    fn test_simulated_plan() {
        let plan = SimulatedGenerator.generate(&request());

        assert_eq!(plan.title, "Ship v1");
        assert_eq!(plan.due, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(plan.priority, "high");
        assert_eq!(
            plan.steps,
            vec![
                "Outline what \"Ship v1\" needs".to_string(),
                "Break \"Ship v1\" into milestones".to_string(),
                "Review plan with team".to_string(),
                "Deliver by 2025-01-01".to_string(),
            ]
        );
    }

    #[test]
    fn test_simulated_plan_accepts_empty_inputs() {
        let plan = SimulatedGenerator.generate(&GenerationRequest::default());
        assert_eq!(plan.title, "Untitled objective");
        assert!(plan.due.is_none());
        assert_eq!(plan.steps.len(), 3);
        assert_eq!(plan.steps.last().map(String::as_str), Some("Deliver"));
    }

    #[test]
    fn test_plan_into_task() {
        let task = SimulatedGenerator.generate(&request()).into_task();
        assert_eq!(task.title, "Ship v1");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.subtasks.len(), 4);
        assert!(task.is_parent());
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date(" 2025-01-01 "), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(parse_due_date("next week"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_pending_generation_deadline() {
        let start = Instant::now();
        let pending = PendingGeneration::new(1, start, Duration::from_millis(2000), request());

        assert!(!pending.is_ready(start));
        assert!(!pending.is_ready(start + Duration::from_millis(1999)));
        assert!(pending.is_ready(start + Duration::from_millis(2000)));
        assert_eq!(pending.remaining(start), Duration::from_millis(2000));
        assert_eq!(pending.remaining(start + Duration::from_secs(3)), Duration::ZERO);
    }
}
