//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A horizontal meter for happiness and round progress
pub struct MeterBar {
    value: u32,
    max: u32,
    label: String,
    color: Color,
    low_threshold: u32,
}

impl MeterBar {
    pub fn new(label: &str, value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max: max.max(1),
            label: label.to_string(),
            color: Color::Green,
            low_threshold: 0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Below this value the bar turns red.
    pub fn low_threshold(mut self, threshold: u32) -> Self {
        self.low_threshold = threshold;
        self
    }
}

impl Widget for MeterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.value <= self.low_threshold {
            Color::Red
        } else {
            self.color
        };

        let filled = (self.value as u16).saturating_mul(area.width - 2) / self.max as u16;

        let label = format!("{}: {}/{}", self.label, self.value, self.max);
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..(area.width - 2) {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// The gem tally shown in the header
pub struct GemCounter {
    gems: u32,
    color: Color,
}

impl GemCounter {
    pub fn new(gems: u32) -> Self {
        Self {
            gems,
            color: Color::Magenta,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for GemCounter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format!("◆ {} gems", self.gems);
        buf.set_string(area.x, area.y, &text, Style::default().fg(self.color));
    }
}

/// Double-bordered box for completion celebrations
pub struct CelebrationBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl CelebrationBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Green,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for CelebrationBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);

        // Top border with centered title
        buf.set_string(area.x, area.y, "╔", style);
        for x in 1..area.width - 1 {
            buf.set_string(area.x + x, area.y, "═", style);
        }
        buf.set_string(area.x + area.width - 1, area.y, "╗", style);

        if self.title.len() + 2 < area.width as usize {
            let title_start = (area.width as usize - self.title.len() - 2) / 2;
            buf.set_string(
                area.x + title_start as u16,
                area.y,
                format!(" {} ", self.title),
                style,
            );
        }

        // Sides
        for y in 1..area.height - 1 {
            buf.set_string(area.x, area.y + y, "║", style);
            buf.set_string(area.x + area.width - 1, area.y + y, "║", style);
        }

        // Bottom border
        buf.set_string(area.x, area.y + area.height - 1, "╚", style);
        for x in 1..area.width - 1 {
            buf.set_string(area.x + x, area.y + area.height - 1, "═", style);
        }
        buf.set_string(area.x + area.width - 1, area.y + area.height - 1, "╝", style);

        // Content
        for (i, line) in self.content.iter().enumerate() {
            if i as u16 + 1 < area.height - 1 {
                buf.set_string(
                    area.x + 2,
                    area.y + 1 + i as u16,
                    line,
                    Style::default().fg(Color::White),
                );
            }
        }
    }
}
