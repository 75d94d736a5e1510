use crate::app::AppState;
use crate::domain::RowTarget;
use crate::ui::layout::{contains, create_layout};
use crate::ui::list_pane::row_at;
use crate::ui::modal::modal_rect;
use crate::ui::tab_bar::tab_at;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Single click handler for the whole screen. Clicks are resolved by
/// position: dialog backdrop, tab bar, then list indicators.
pub fn handle_mouse(app: &mut AppState, event: MouseEvent) {
    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    handle_click(app, event.column, event.row);
}

pub fn handle_click(app: &mut AppState, column: u16, row: u16) {
    let viewport = app.viewport;

    // Backdrop closes the topmost dialog; clicks on its content do nothing
    if let Some(kind) = app.top_modal() {
        if !contains(modal_rect(kind, viewport), column, row) {
            app.close_modal(kind);
        }
        return;
    }

    let layout = create_layout(viewport);

    if contains(layout.tab_area, column, row) {
        if let Some(status) = tab_at(&app.tasks, layout.tab_area, column) {
            app.select_tab(status);
        }
        return;
    }

    if let Some((index, target)) = row_at(app, layout.list_area, column, row) {
        match target {
            RowTarget::Status => app.toggle_status(index),
            RowTarget::Expand => app.toggle_expand(index),
            RowTarget::Body => app.select_row(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{ModalKind, Stage, Task, TaskStatus};
    use ratatui::layout::Rect;

    fn create_test_app() -> AppState {
        let mut parent = Task::new("Parent", TaskStatus::Todo);
        parent.add_subtask(Task::new("Child", TaskStatus::Todo));
        let mut app = AppState::new(
            vec![
                parent,
                Task::new("B", TaskStatus::Completed),
                Task::new("C", TaskStatus::Overdue),
            ],
            &AppConfig::default(),
            TaskStatus::Todo,
        );
        app.viewport = Rect::new(0, 0, 100, 40);
        app
    }

    // List pane starts at row 2; its first row of content is at y = 3, x = 1

    #[test]
    fn test_click_status_indicator() {
        let mut app = create_test_app();
        handle_click(&mut app, 3, 3);
        assert!(app.tasks[0].checked);

        handle_click(&mut app, 3, 3);
        assert!(!app.tasks[0].checked);
    }

    #[test]
    fn test_click_subtask_status_indicator() {
        let mut app = create_test_app();
        handle_click(&mut app, 8, 4);
        assert!(app.tasks[0].subtasks[0].checked);
        assert!(!app.tasks[0].checked);
    }

    #[test]
    fn test_click_expand_indicator() {
        let mut app = create_test_app();
        handle_click(&mut app, 1, 3);
        assert!(!app.tasks[0].expanded);
        handle_click(&mut app, 1, 3);
        assert!(app.tasks[0].expanded);
    }

    #[test]
    fn test_click_row_body_selects() {
        let mut app = create_test_app();
        handle_click(&mut app, 20, 4);
        assert_eq!(app.selected_index, 1);
        assert!(!app.tasks[0].subtasks[0].checked);
    }

    #[test]
    fn test_click_outside_targets_is_noop() {
        let mut app = create_test_app();
        handle_click(&mut app, 90, 20);
        handle_click(&mut app, 3, 30);
        assert!(!app.tasks[0].checked);
        assert_eq!(app.active_tab, TaskStatus::Todo);
    }

    #[test]
    fn test_click_tab() {
        let mut app = create_test_app();
        // " To Do (2) " occupies columns 1..12, separator at 12
        handle_click(&mut app, 14, 1);
        assert_eq!(app.active_tab, TaskStatus::Completed);
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("B"));
    }

    #[test]
    fn test_backdrop_click_closes_but_content_click_does_not() {
        let mut app = create_test_app();
        app.open_generate_modal();
        let rect = modal_rect(ModalKind::GenerateTask, app.viewport);

        handle_click(&mut app, rect.x + 2, rect.y + 2);
        assert_eq!(app.stage(), Some(Stage::Form));

        handle_click(&mut app, 0, 0);
        assert!(app.generate.is_none());
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_list_is_inert_behind_dialog() {
        let mut app = create_test_app();
        app.toggle_add_modal();
        // Outside the dialog: closes it rather than toggling the task
        handle_click(&mut app, 3, 3);
        assert!(!app.is_open(ModalKind::AddTask));
        assert!(!app.tasks[0].checked);
    }

    #[test]
    fn test_non_left_clicks_ignored() {
        let mut app = create_test_app();
        handle_mouse(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Right),
                column: 3,
                row: 3,
                modifiers: crossterm::event::KeyModifiers::NONE,
            },
        );
        assert!(!app.tasks[0].checked);
    }
}
