use crate::app::AppState;
use crate::domain::{expand_glyph, row_target, status_glyph, tree_connector, FlatRow, RowTarget, Task};
use crate::ui::layout::{contains, inner};
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_style, slide_out_style, status_style,
    title_style, tree_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Columns a title travels while sliding out
const SLIDE_DISTANCE: f64 = 24.0;

/// Render the task list for the active tab, starting at the scroll offset
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.rows();
    let title = if app.list_scroll_offset > 0 {
        format!(" {} [scrolled +{}] ", app.active_tab.label(), app.list_scroll_offset)
    } else {
        format!(" {} ", app.active_tab.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if rows.is_empty() {
        let empty = Paragraph::new(Line::styled("  Nothing here.", hint_style())).block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(app.list_scroll_offset)
        .filter_map(|(idx, row)| {
            let task = row_task(app, row)?;
            let context = if row.is_loose_subtask() {
                app.tasks.get(row.task_index).map(|p| p.title.as_str())
            } else {
                None
            };
            let line = create_task_line(task, row, context, app.use_emoji, app.last_tick, app.slide_out);
            let style = if idx == app.selected_index && task.removal.is_none() {
                selected_style()
            } else {
                default_style()
            };
            Some(ListItem::new(line).style(style))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn row_task<'a>(app: &'a AppState, row: &FlatRow) -> Option<&'a Task> {
    let task = app.tasks.get(row.task_index)?;
    match row.subtask_index {
        Some(st_idx) => task.subtasks.get(st_idx),
        None => Some(task),
    }
}

/// Create a single line for a task/subtask
/// Format: ▾ [ ] Prepare launch  · due 2025-01-03
/// `context` names the parent of a subtask listed on its own.
fn create_task_line(
    task: &Task,
    row: &FlatRow,
    context: Option<&str>,
    use_emoji: bool,
    now: Instant,
    slide_out: Duration,
) -> Line<'static> {
    let mut spans = Vec::new();

    // Indentation and tree connector for subtasks; keeps indicator columns fixed
    if row.depth > 0 {
        spans.push(Span::styled("  ".to_string(), tree_style()));
        spans.push(Span::styled(tree_connector(row.is_last).to_string(), tree_style()));
        spans.push(Span::raw("   ".to_string()));
    } else {
        spans.push(Span::raw(expand_glyph(task, use_emoji).to_string()));
    }

    spans.push(Span::styled(status_glyph(task).to_string(), status_style(task.status)));
    spans.push(Span::raw(" ".to_string()));

    match task.removal {
        Some(removal) => {
            let progress = removal.progress(now, slide_out);
            let shift = (progress * SLIDE_DISTANCE) as usize;
            spans.push(Span::raw(" ".repeat(shift)));
            spans.push(Span::styled(task.title.clone(), slide_out_style()));
        }
        None => {
            spans.push(Span::raw(task.title.clone()));
            if let Some(due) = task.due {
                spans.push(Span::styled(
                    format!("  · due {}", due.format("%Y-%m-%d")),
                    status_style(task.status),
                ));
            }
            if let Some(parent) = context {
                spans.push(Span::styled(format!("  (in {})", parent), hint_style()));
            }
            if task.is_parent() && !task.expanded {
                spans.push(Span::styled(
                    format!("  ({} hidden)", task.subtasks.len()),
                    hint_style(),
                ));
            }
        }
    }

    Line::from(spans)
}

/// Row index and indicator under a terminal cell of the list pane
pub fn row_at(app: &AppState, area: Rect, column: u16, row: u16) -> Option<(usize, RowTarget)> {
    let body = inner(area);
    if !contains(body, column, row) {
        return None;
    }
    let index = app.list_scroll_offset + (row - body.y) as usize;
    let flat = app.rows().into_iter().nth(index)?;
    Some((index, row_target(flat.depth, column - body.x)))
}
