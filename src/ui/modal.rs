use crate::app::{AppState, GenerateModal};
use crate::domain::{ModalKind, Stage};
use crate::ui::{
    input_form::{field_lines, ADD_MODAL_HEIGHT},
    layout::create_modal_area,
    styles::{done_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub const GENERATE_MODAL_HEIGHT: u16 = 18;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Screen rect of a dialog, for backdrop hit testing
pub fn modal_rect(kind: ModalKind, area: Rect) -> Rect {
    match kind {
        ModalKind::AddTask => create_modal_area(area, ADD_MODAL_HEIGHT),
        ModalKind::GenerateTask => create_modal_area(area, GENERATE_MODAL_HEIGHT),
    }
}

/// Render the generate-task dialog in its current stage
pub fn render_generate_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(modal) = &app.generate {
        let modal_area = modal_rect(ModalKind::GenerateTask, area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let (title, lines) = match modal.stage {
            Stage::Form => (" Generate Task ", form_lines(modal)),
            Stage::Loading => (
                " Generating… ",
                loading_lines(modal, app.animation_frame, app.last_tick),
            ),
            Stage::Preview => (" Preview ", preview_lines(modal)),
        };

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

fn form_lines(modal: &GenerateModal) -> Vec<Line<'static>> {
    let fields = [
        ("Objective", &modal.form.objective),
        ("Due date", &modal.form.due_date),
        ("Priority", &modal.form.priority),
        ("Scope", &modal.form.scope),
    ];

    let mut lines = vec![Line::raw("")];
    for (idx, (label, value)) in fields.iter().enumerate() {
        lines.extend(field_lines(label, value, modal.editing_field == idx));
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw("Tab to switch fields  ·  Enter to generate  ·  Esc to close"));
    lines
}

fn loading_lines(modal: &GenerateModal, frame: u32, now: Instant) -> Vec<Line<'static>> {
    let spinner = SPINNER[(frame as usize) % SPINNER.len()];
    let remaining = modal
        .pending
        .as_ref()
        .map(|p| p.remaining(now).as_secs_f64())
        .unwrap_or(0.0);

    vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("  {} ", spinner), modal_title_style()),
            Span::raw(format!("Generating \"{}\"", modal.form.objective.trim())),
        ]),
        Line::raw(""),
        Line::raw(format!("  About {:.1}s left", remaining)),
        Line::raw(""),
        Line::raw("  Esc to cancel"),
    ]
}

fn preview_lines(modal: &GenerateModal) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];

    if let Some(plan) = &modal.preview {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(plan.title.clone(), modal_title_style()),
        ]));
        let due = plan
            .due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| String::from("none"));
        lines.push(Line::raw(format!(
            "  Due: {}   Priority: {}   Scope: {}",
            due,
            or_dash(&plan.priority),
            or_dash(&plan.scope)
        )));
        lines.push(Line::raw(""));
        for step in &plan.steps {
            lines.push(Line::from(vec![
                Span::styled("  [ ] ", done_style()),
                Span::raw(step.clone()),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" Confirm  "),
        Span::styled("[e]", modal_title_style()),
        Span::raw(" Edit  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Close"),
    ]));
    lines
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        String::from("-")
    } else {
        value.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::TaskStatus;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen_text(app: &AppState) -> String {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_generate_modal(f, app, f.size()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..40 {
            for x in 0..80 {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_each_stage() {
        let mut app = AppState::new(Vec::new(), &AppConfig::default(), TaskStatus::Todo);
        let start = Instant::now();

        app.open_generate_modal();
        for c in "Ship v1".chars() {
            app.generate_form_add_char(c);
        }
        assert!(screen_text(&app).contains("Objective: (editing)"));

        app.begin_generation_at(start);
        assert!(screen_text(&app).contains("Generating \"Ship v1\""));

        app.tick_at(start + Duration::from_secs(3));
        let text = screen_text(&app);
        assert!(text.contains("Preview"));
        assert!(text.contains("Confirm"));
    }

    #[test]
    fn test_modal_rect_heights() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(modal_rect(ModalKind::AddTask, area).height, ADD_MODAL_HEIGHT);
        assert_eq!(
            modal_rect(ModalKind::GenerateTask, area).height,
            GENERATE_MODAL_HEIGHT
        );
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash(" high "), "high");
    }
}
