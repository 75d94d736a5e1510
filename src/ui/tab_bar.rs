use crate::app::AppState;
use crate::domain::{count_with_status, Task, TaskStatus};
use crate::ui::styles::{active_tab_style, hint_style, tab_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LEADING: &str = " ";
const SEPARATOR: &str = "│";

/// Tab labels in display order, e.g. " To Do (3) "
fn tab_labels(tasks: &[Task]) -> Vec<(TaskStatus, String)> {
    TaskStatus::all()
        .iter()
        .map(|status| {
            let count = count_with_status(tasks, *status);
            (*status, format!(" {} ({}) ", status.label(), count))
        })
        .collect()
}

/// Render the status tabs
pub fn render_tab_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::raw(LEADING)];

    for (i, (status, label)) in tab_labels(&app.tasks).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, hint_style()));
        }
        let style = if status == app.active_tab {
            active_tab_style()
        } else {
            tab_style()
        };
        spans.push(Span::styled(label, style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tab under a column of the tab bar
pub fn tab_at(tasks: &[Task], area: Rect, column: u16) -> Option<TaskStatus> {
    let mut x = area.x as usize + LEADING.chars().count();
    let column = column as usize;

    for (i, (status, label)) in tab_labels(tasks).into_iter().enumerate() {
        if i > 0 {
            x += SEPARATOR.chars().count();
        }
        let width = label.chars().count();
        if (x..x + width).contains(&column) {
            return Some(status);
        }
        x += width;
    }
    None
}
