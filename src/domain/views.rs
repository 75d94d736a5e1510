use super::enums::TaskStatus;
use super::item::Task;

/// Width of the indentation in front of a subtask row
pub const SUBTASK_INDENT: u16 = 5;
/// Width of the expand indicator slot ("▾ ")
pub const EXPAND_WIDTH: u16 = 2;
/// Width of the status indicator slot ("[x]")
pub const STATUS_WIDTH: u16 = 3;

/// A visible row of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Depth in the tree (0 = parent, 1 = subtask)
    pub depth: usize,
    /// Whether this is the last visible subtask of its parent
    pub is_last: bool,
    /// Index into the tasks array
    pub task_index: usize,
    /// Subtask index (None for top-level tasks)
    pub subtask_index: Option<usize>,
}

/// A task is shown iff its status matches the active tab
pub fn is_visible(task: &Task, filter: TaskStatus) -> bool {
    task.status == filter
}

impl FlatRow {
    /// A subtask listed on its own because its parent is filtered out
    pub fn is_loose_subtask(&self) -> bool {
        self.depth == 0 && self.subtask_index.is_some()
    }
}

/// Project the task tree onto the rows shown under `filter`.
/// Matching subtasks sit below their parent while it is shown and expanded;
/// when the parent itself is filtered out they are listed at the top level.
pub fn visible_rows(tasks: &[Task], filter: TaskStatus) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for (task_idx, task) in tasks.iter().enumerate() {
        let parent_shown = is_visible(task, filter);
        if parent_shown {
            rows.push(FlatRow {
                depth: 0,
                is_last: false,
                task_index: task_idx,
                subtask_index: None,
            });
            if !task.expanded {
                continue;
            }
        }

        let shown: Vec<usize> = task
            .subtasks
            .iter()
            .enumerate()
            .filter(|(_, st)| is_visible(st, filter))
            .map(|(i, _)| i)
            .collect();
        let count = shown.len();
        for (pos, st_idx) in shown.into_iter().enumerate() {
            rows.push(FlatRow {
                depth: usize::from(parent_shown),
                is_last: pos + 1 == count,
                task_index: task_idx,
                subtask_index: Some(st_idx),
            });
        }
    }

    rows
}

/// Count tasks (including subtasks) carrying a status. Equals the number of
/// rows `visible_rows` yields for that status once every parent is expanded.
pub fn count_with_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks
        .iter()
        .map(|t| {
            usize::from(t.status == status)
                + t.subtasks.iter().filter(|st| st.status == status).count()
        })
        .sum()
}

/// What a column on a list row points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Expand,
    Status,
    Body,
}

/// Resolve a column (relative to the row start) to the indicator under it
pub fn row_target(depth: usize, column: u16) -> RowTarget {
    let indent = if depth > 0 { SUBTASK_INDENT } else { 0 };
    let expand_end = indent + EXPAND_WIDTH;
    let status_end = expand_end + STATUS_WIDTH;

    if depth == 0 && column < expand_end {
        RowTarget::Expand
    } else if (expand_end..status_end).contains(&column) {
        RowTarget::Status
    } else {
        RowTarget::Body
    }
}

/// Status indicator glyph
pub fn status_glyph(task: &Task) -> &'static str {
    if task.checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Expand indicator glyph (blank for tasks without subtasks)
pub fn expand_glyph(task: &Task, use_emoji: bool) -> &'static str {
    match (task.is_parent(), task.expanded, use_emoji) {
        (false, _, _) => "  ",
        (true, true, true) => "▾ ",
        (true, false, true) => "▸ ",
        (true, true, false) => "- ",
        (true, false, false) => "+ ",
    }
}

/// Get tree connector for subtasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}
