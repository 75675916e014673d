use ratatui::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub lane_border: Color,
    pub card_border: Color,
    pub drag_border: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1C, 0x1D, 0x22),
            text: Color::Rgb(0xC8, 0xC8, 0xD0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x78, 0x78, 0x84),
            highlight: Color::Rgb(0x4A, 0xDE, 0x80),
            lane_border: Color::Rgb(0x3A, 0x3C, 0x44),
            card_border: Color::Rgb(0x52, 0x54, 0x5E),
            drag_border: Color::Rgb(0x4A, 0xDE, 0x80),
            green: Color::Rgb(0x4A, 0xDE, 0x80),
            red: Color::Rgb(0xF8, 0x71, 0x71),
            yellow: Color::Rgb(0xFA, 0xCC, 0x15),
        }
    }
}
