pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod tab_bar;

use crate::app::AppState;
use crate::domain::ModalKind;
use details_pane::render_details_pane;
use input_form::render_add_task_modal;
use keybindings::render_keybindings;
use layout::{create_layout, inner};
use list_pane::render_list_pane;
use modal::render_generate_modal;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};
use styles::hint_style;
use tab_bar::render_tab_bar;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    app.viewport = size;
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode(), app.stage(), layout.keybindings_area);
    render_tab_bar(f, app, layout.tab_area);
    app.scroll_to_selection(inner(layout.list_area).height as usize);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_footer(f, app, layout.footer_area);

    // Dialogs bottom to top so the topmost is drawn last
    for kind in app.modals.clone() {
        match kind {
            ModalKind::AddTask => render_add_task_modal(f, app, size),
            ModalKind::GenerateTask => render_generate_modal(f, app, size),
        }
    }
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let text = format!(" {} completed this session", app.completed.len());
    f.render_widget(Paragraph::new(Line::raw(text)).style(hint_style()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Task, TaskStatus};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_render_records_viewport() {
        let mut app = AppState::new(
            vec![Task::new("A", TaskStatus::Todo)],
            &AppConfig::default(),
            TaskStatus::Todo,
        );
        app.toggle_add_modal();
        app.open_generate_modal();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert_eq!(app.viewport, Rect::new(0, 0, 100, 40));
    }

    #[test]
    fn test_render_scrolls_list_to_selection() {
        let tasks = (0..30)
            .map(|i| Task::new(format!("Task{}", i), TaskStatus::Todo))
            .collect();
        let mut app = AppState::new(tasks, &AppConfig::default(), TaskStatus::Todo);
        for _ in 0..29 {
            app.move_selection_down();
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        // 20 rows: keybindings, tabs, footer and two borders leave 15 list rows
        assert_eq!(app.list_scroll_offset, 15);
        let buffer = terminal.backend().buffer();
        let last_row: String = (0..70)
            .map(|x| buffer.get(x, 17).symbol().to_string())
            .collect();
        assert!(last_row.contains("Task29"));
    }
}
