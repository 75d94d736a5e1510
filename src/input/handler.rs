use crate::app::AppState;
use crate::domain::{Stage, TaskStatus, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode() {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_add_task_mode(app, key),
        UiMode::GeneratingTask => handle_generate_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Check / uncheck
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Char('X') => {
            app.toggle_selected_status();
            Ok(false)
        }

        // Expand / collapse
        KeyCode::Enter | KeyCode::Left | KeyCode::Right => {
            app.toggle_expand_selected();
            Ok(false)
        }

        // Tabs
        KeyCode::Char('1') => {
            app.select_tab(TaskStatus::Todo);
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.select_tab(TaskStatus::Completed);
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.select_tab(TaskStatus::Overdue);
            Ok(false)
        }
        KeyCode::Tab => {
            app.next_tab();
            Ok(false)
        }
        KeyCode::BackTab => {
            app.prev_tab();
            Ok(false)
        }

        // Dialogs
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.toggle_add_modal();
            Ok(false)
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.open_generate_modal();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.open_edit_modal();
            Ok(false)
        }

        // Delete
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add-task dialog
fn handle_add_task_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_add_form(),
        KeyCode::Esc => app.close_top_modal(),
        KeyCode::Tab | KeyCode::BackTab => app.add_form_toggle_field(),
        KeyCode::Backspace => app.add_form_backspace(),
        KeyCode::Char(c) => app.add_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the generate-task dialog, per stage
fn handle_generate_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Esc {
        app.close_top_modal();
        return Ok(false);
    }

    match app.stage() {
        Some(Stage::Form) => match key.code {
            KeyCode::Enter => app.begin_generation(),
            KeyCode::Tab => app.generate_form_next_field(),
            KeyCode::BackTab => app.generate_form_prev_field(),
            KeyCode::Backspace => app.generate_form_backspace(),
            KeyCode::Char(c) => app.generate_form_add_char(c),
            _ => {}
        },
        Some(Stage::Preview) => match key.code {
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => app.confirm_generation(),
            KeyCode::Char('e') | KeyCode::Char('E') => app.edit_generation(),
            _ => {}
        },
        Some(Stage::Loading) | None => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{ModalKind, Task};

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn create_test_app() -> AppState {
        AppState::new(
            vec![
                Task::new("A", TaskStatus::Todo),
                Task::new("B", TaskStatus::Completed),
                Task::new("C", TaskStatus::Overdue),
            ],
            &AppConfig::default(),
            TaskStatus::Todo,
        )
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!press(&mut app, KeyCode::Down));
    }

    #[test]
    fn test_tab_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, TaskStatus::Completed);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, TaskStatus::Overdue);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, TaskStatus::Todo);
    }

    #[test]
    fn test_space_checks_selected_task() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.tasks[0].checked);
        assert!(app.tasks[0].removal.is_some());
    }

    #[test]
    fn test_typing_in_add_modal_does_not_trigger_shortcuts() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        for c in "quit".chars() {
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        assert_eq!(app.add_form.as_ref().unwrap().title, "quit");

        press(&mut app, KeyCode::Enter);
        assert!(!app.is_open(ModalKind::AddTask));
        assert_eq!(app.tasks.last().unwrap().title, "quit");
    }

    #[test]
    fn test_escape_closes_add_modal_only() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode(), UiMode::Normal);
        assert!(app.generate.is_none());
    }

    #[test]
    fn test_generate_keys_per_stage() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.generate.as_ref().unwrap().form.objective, "e");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stage(), Some(Stage::Loading));

        // Ignored while loading
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.stage(), Some(Stage::Loading));

        press(&mut app, KeyCode::Esc);
        assert!(app.generate.is_none());
        assert_eq!(app.ui_mode(), UiMode::Normal);
    }

    #[test]
    fn test_edit_and_delete_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.add_form.as_ref().unwrap().is_edit());
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('Z'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks[0].title, "Z");
        assert_eq!(app.tasks.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.tasks.len(), 2);
        assert!(app.rows().is_empty());
    }
}
