use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const ADD_MODAL_HEIGHT: u16 = 11;

/// Label line and value line for one form field
pub fn field_lines(label: &str, value: &str, editing: bool) -> [Line<'static>; 2] {
    let label = if editing {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };
    let value_line = Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);
    [Line::raw(label), value_line]
}

/// Render the add-task dialog
pub fn render_add_task_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.add_form {
        let modal_area = create_modal_area(area, ADD_MODAL_HEIGHT);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        lines.extend(field_lines("Title", &form.title, form.editing_field == 0));
        lines.push(Line::raw(""));
        lines.extend(field_lines(
            "Due date (YYYY-MM-DD, optional)",
            &form.due,
            form.editing_field == 1,
        ));
        lines.push(Line::raw(""));
        let (title, action) = if form.is_edit() {
            (" Edit Task ", "save")
        } else {
            (" Add Task ", "add")
        };
        lines.push(Line::raw(format!(
            "Tab to switch fields  ·  Enter to {}  ·  Esc to close",
            action
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lines_mark_editing_field() {
        let [label, value] = field_lines("Title", "Fix door", true);
        assert_eq!(label.spans[0].content, "Title: (editing)");
        assert_eq!(value.spans[1].content, "Fix door");
        assert_eq!(value.spans[2].content, "█");

        let [label, value] = field_lines("Scope", "", false);
        assert_eq!(label.spans[0].content, "Scope:");
        assert_eq!(value.spans[2].content, "");
    }

    #[test]
    fn test_edit_dialog_title() {
        use crate::config::AppConfig;
        use crate::domain::{Task, TaskStatus};
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = AppState::new(
            vec![Task::new("Fix door", TaskStatus::Todo)],
            &AppConfig::default(),
            TaskStatus::Todo,
        );
        app.open_edit_modal();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| render_add_task_modal(f, &app, f.size()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = (0..30)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();
        assert!(text.contains("Edit Task"));
        assert!(text.contains("Fix door"));
    }
}
