use crate::app::AppState;
use crate::ui::styles::{border_style, hint_style, status_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render details of the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    match app.selected_task() {
        Some(task) => {
            lines.push(Line::from(Span::styled(task.title.clone(), title_style())));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("Status: "),
                Span::styled(task.status.label(), status_style(task.status)),
            ]));
            let due = task
                .due
                .map(|d| d.format("%a %b %d, %Y").to_string())
                .unwrap_or_else(|| String::from("none"));
            lines.push(Line::raw(format!("Due: {}", due)));
            if task.is_parent() {
                let open = task.subtasks.iter().filter(|st| !st.checked).count();
                lines.push(Line::raw(format!(
                    "Subtasks: {} ({} open)",
                    task.subtasks.len(),
                    open
                )));
            }
            lines.push(Line::raw(format!(
                "Created: {}",
                task.created_at.format("%Y-%m-%d %H:%M")
            )));
        }
        None => {
            lines.push(Line::from(Span::styled("No task selected", hint_style())));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Details ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
