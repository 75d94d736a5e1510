use crate::domain::{Task, TaskStatus};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid task file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("task \"{title}\" has an invalid due date \"{due}\" (expected YYYY-MM-DD)")]
    BadDate { title: String, due: String },
}

/// One entry of a task seed file
#[derive(Debug, Deserialize)]
struct SeedTask {
    title: String,
    #[serde(default = "default_status")]
    status: TaskStatus,
    #[serde(default)]
    due: Option<String>,
    #[serde(default)]
    subtasks: Vec<SeedTask>,
}

fn default_status() -> TaskStatus {
    TaskStatus::Todo
}

impl SeedTask {
    fn into_task(self) -> Result<Task, SeedError> {
        let due = match self.due {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    SeedError::BadDate {
                        title: self.title.clone(),
                        due: raw.clone(),
                    }
                })?,
            ),
            None => None,
        };

        let mut task = Task::new(self.title, self.status).with_due(due);
        for sub in self.subtasks {
            task.add_subtask(sub.into_task()?);
        }
        Ok(task)
    }
}

/// Parse tasks from the JSON text of a seed file
pub fn parse_tasks(content: &str, path: &Path) -> Result<Vec<Task>, SeedError> {
    let seeds: Vec<SeedTask> = serde_json::from_str(content).map_err(|source| SeedError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    seeds.into_iter().map(SeedTask::into_task).collect()
}

/// Load a read-only task seed file
pub fn load_tasks<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, SeedError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tasks(&content, path)
}

/// Built-in list shown when no seed file is given
pub fn demo_tasks() -> Vec<Task> {
    let today = Local::now().date_naive();

    let mut launch = Task::new("Prepare launch", TaskStatus::Todo).with_due(Some(today + Duration::days(3)));
    launch.add_subtask(Task::new("Write release notes", TaskStatus::Todo));
    launch.add_subtask(Task::new("Tag the release", TaskStatus::Todo));
    launch.add_subtask(Task::new("Freeze dependencies", TaskStatus::Completed));

    vec![
        Task::new("Buy groceries for tonight", TaskStatus::Todo).with_due(Some(today)),
        launch,
        Task::new("Fix shed door", TaskStatus::Todo),
        Task::new("Book dentist appointment", TaskStatus::Completed),
        Task::new("Renew passport", TaskStatus::Overdue).with_due(Some(today - Duration::days(2))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_tasks_with_legacy_status_names() {
        let json = r#"[
            { "title": "A", "status": "to-do" },
            { "title": "B", "status": "done" },
            { "title": "C", "status": "overdue", "due": "2025-01-01" },
            { "title": "D" }
        ]"#;
        let tasks = parse_tasks(json, Path::new("tasks.json")).unwrap();

        let statuses: Vec<TaskStatus> = tasks.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![
                TaskStatus::Todo,
                TaskStatus::Completed,
                TaskStatus::Overdue,
                TaskStatus::Todo
            ]
        );
        assert_eq!(tasks[2].due, NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_parse_tasks_with_subtasks() {
        let json = r#"[{ "title": "Parent", "subtasks": [{ "title": "Child", "status": "completed" }] }]"#;
        let tasks = parse_tasks(json, Path::new("tasks.json")).unwrap();

        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].is_parent());
        assert_eq!(tasks[0].subtasks[0].status, TaskStatus::Completed);
    }

    #[test]
    fn test_bad_due_date() {
        let json = r#"[{ "title": "A", "due": "tomorrow" }]"#;
        let err = parse_tasks(json, Path::new("tasks.json")).unwrap_err();
        assert!(matches!(err, SeedError::BadDate { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_tasks(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn test_load_tasks_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"[{ "title": "From file" }]"#).unwrap();

        let tasks = load_tasks(&path).unwrap();
        assert_eq!(tasks[0].title, "From file");
    }

    #[test]
    fn test_demo_tasks_cover_every_tab() {
        let tasks = demo_tasks();
        for status in TaskStatus::all() {
            assert!(tasks.iter().any(|t| t.status == *status));
        }
    }
}
