use serde::{Deserialize, Serialize};

/// Status of a task; drives which tab it is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[serde(alias = "to-do")]
    Todo,
    #[serde(alias = "done")]
    Completed,
    Overdue,
}

impl TaskStatus {
    /// Parse a status name ("todo", "to-do", "completed", "done", "overdue")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "todo" | "to-do" => Some(Self::Todo),
            "completed" | "done" => Some(Self::Completed),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    /// Tabs in display order
    pub fn all() -> &'static [TaskStatus] {
        &[TaskStatus::Todo, TaskStatus::Completed, TaskStatus::Overdue]
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Todo => Self::Completed,
            Self::Completed => Self::Overdue,
            Self::Overdue => Self::Todo,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Todo => Self::Overdue,
            Self::Completed => Self::Todo,
            Self::Overdue => Self::Completed,
        }
    }
}

/// The two dialogs that can sit on the modal stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    AddTask,
    GenerateTask,
}

/// Stage of the generate-task dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Form,
    Loading,
    Preview,
}

/// UI mode, derived from the topmost modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    GeneratingTask,
}

impl From<Option<ModalKind>> for UiMode {
    fn from(top: Option<ModalKind>) -> Self {
        match top {
            None => UiMode::Normal,
            Some(ModalKind::AddTask) => UiMode::AddingTask,
            Some(ModalKind::GenerateTask) => UiMode::GeneratingTask,
        }
    }
}
