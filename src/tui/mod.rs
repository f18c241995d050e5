//! Terminal User Interface
//!
//! Colorful TUI for the literacy adventure using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub gem: Color,
    pub success: Color,
    pub warning: Color,
    pub locked: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            gem: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            locked: Color::DarkGray,
            border: Color::DarkGray,
            header: Color::LightBlue,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                                                                  ║
║   ██╗     ██╗████████╗███████╗██████╗  █████╗  ██████╗██╗   ██╗  ║
║   ██║     ██║╚══██╔══╝██╔════╝██╔══██╗██╔══██╗██╔════╝╚██╗ ██╔╝  ║
║   ██║     ██║   ██║   █████╗  ██████╔╝███████║██║      ╚████╔╝   ║
║   ██║     ██║   ██║   ██╔══╝  ██╔══██╗██╔══██║██║       ╚██╔╝    ║
║   ███████╗██║   ██║   ███████╗██║  ██║██║  ██║╚██████╗   ██║     ║
║   ╚══════╝╚═╝   ╚═╝   ╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝   ╚═╝     ║
║                                                                  ║
║        ██████╗ ██╗   ██╗███████╗███████╗████████╗                ║
║        ██╔═══██╗██║   ██║██╔════╝██╔════╝╚══██╔══╝                ║
║        ██║   ██║██║   ██║█████╗  ███████╗   ██║                   ║
║        ██║▄▄ ██║██║   ██║██╔══╝  ╚════██║   ██║                   ║
║        ╚██████╔╝╚██████╔╝███████╗███████║   ██║                   ║
║         ╚══▀▀═╝  ╚═════╝ ╚══════╝╚══════╝   ╚═╝                   ║
║                                                                  ║
║           An Island Reading Adventure                            ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " LITERACY QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓  Choose from a list                                      ║
║  ←/→  Move the basket / pick a word block                     ║
║  Enter Select / Confirm                                       ║
║  Space Catch a falling letter                                 ║
║  Backspace  Take the last word back out                       ║
║  Esc   Leave a game and go back to the island map             ║
║  ?     Toggle this help                                       ║
║  q     Quit (from the island map)                             ║
╠═══════════════════════════════════════════════════════════════╣
║                    FOR TEACHERS                               ║
╠═══════════════════════════════════════════════════════════════╣
║  Ctrl+T  Open the class progress dashboard (password)         ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout: header, content, notice bar
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(3),   // Hint/notice bar
        ])
        .split(area)
        .to_vec()
}

/// Create the in-game content layout (play field + side panel)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72),  // Play field
            Constraint::Percentage(28),  // Score / status panel
        ])
        .split(area)
        .to_vec()
}
