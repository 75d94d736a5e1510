use super::enums::TaskStatus;
use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Slide-out state of a task that was checked off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub started_at: Instant,
}

impl Removal {
    pub fn new(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// Progress of the slide-out (0.0 to 1.0)
    pub fn progress(&self, now: Instant, length: Duration) -> f64 {
        if length.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / length.as_secs_f64()).min(1.0)
    }

    /// Whether the exit transition has ended
    pub fn is_finished(&self, now: Instant, length: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= length
    }
}

/// A task or subtask row
#[derive(Debug, Clone)]
pub struct Task {
    /// Unique ID for internal references
    pub id: Uuid,
    pub title: String,
    /// Status the task is filtered by
    pub status: TaskStatus,
    /// Whether the status indicator is checked
    pub checked: bool,
    /// Whether subtasks are shown (parent tasks only)
    pub expanded: bool,
    /// Set while the task slides out of the list
    pub removal: Option<Removal>,
    pub due: Option<NaiveDate>,
    /// Subtasks (one level deep)
    pub subtasks: Vec<Task>,
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status,
            checked: false,
            expanded: true,
            removal: None,
            due: None,
            subtasks: Vec::new(),
            created_at: Local::now(),
        }
    }

    pub fn with_due(mut self, due: Option<NaiveDate>) -> Self {
        self.due = due;
        self
    }

    /// Add a subtask
    pub fn add_subtask(&mut self, subtask: Task) {
        self.subtasks.push(subtask);
    }

    /// A task with children can be expanded and collapsed
    pub fn is_parent(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// Flip the status indicator. Checking starts the slide-out; unchecking
    /// before it ends keeps the task. Returns the new checked state.
    pub fn toggle_checked(&mut self, now: Instant) -> bool {
        self.checked = !self.checked;
        if self.checked {
            self.removal = Some(Removal::new(now));
        } else {
            self.removal = None;
        }
        self.checked
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Whether the slide-out has run its full length
    pub fn removal_finished(&self, now: Instant, length: Duration) -> bool {
        self.removal
            .map(|r| r.is_finished(now, length))
            .unwrap_or(false)
    }

    /// Reclassify a detached task as completed
    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
        self.removal = None;
    }
}
