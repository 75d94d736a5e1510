use crate::domain::{Stage, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hint text for the current mode
pub fn hints(mode: UiMode, stage: Option<Stage>) -> &'static str {
    match (mode, stage) {
        (UiMode::Normal, _) => {
            " ↑/↓ select   space check   enter expand   1-3/tab filter   a add   e edit   d delete   g generate   q quit"
        }
        (UiMode::AddingTask, _) => " tab switch field   enter save   esc close",
        (UiMode::GeneratingTask, Some(Stage::Loading)) => " generating…   esc close",
        (UiMode::GeneratingTask, Some(Stage::Preview)) => " enter/c confirm   e edit   esc close",
        (UiMode::GeneratingTask, _) => " tab/shift+tab switch field   enter generate   esc close",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, stage: Option<Stage>, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(mode, stage))).style(hint_style());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_stage() {
        assert!(hints(UiMode::Normal, None).contains("q quit"));
        assert!(hints(UiMode::GeneratingTask, Some(Stage::Preview)).contains("e edit"));
        assert!(hints(UiMode::GeneratingTask, Some(Stage::Form)).contains("enter generate"));
    }
}
