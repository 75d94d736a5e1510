use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub tab_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub footer_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Tab bar (1 row)
/// - Main area: List (70%) | Details (30%)
/// - Footer (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // List pane
            Constraint::Percentage(30), // Details pane
        ])
        .split(rows[2]);

    MainLayout {
        keybindings_area: rows[0],
        tab_area: rows[1],
        list_area: columns[0],
        details_area: columns[1],
        footer_area: rows[3],
    }
}

/// Create a centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Inner rect of a bordered block
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Whether a terminal cell lies inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
