//! Color palettes.

use ratatui::style::Color;

use crate::notifications::NotificationLevel;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Look up a palette by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "synthbrute" => Some(Self::synthbrute()),
            "plain" => Some(Self::plain()),
            _ => None,
        }
    }

    pub fn synthbrute() -> Self {
        Self {
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            success: Color::Rgb(0, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
            highlight_bg: Color::Rgb(42, 42, 42),
        }
    }

    /// Terminal default colors only.
    pub fn plain() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            success: Color::Green,
            error: Color::Red,
            info: Color::Reset,
            text: Color::Reset,
            text_dim: Color::DarkGray,
            border: Color::Reset,
            border_focus: Color::White,
            highlight_bg: Color::DarkGray,
        }
    }

    pub fn notification_color(&self, level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Info => self.info,
            NotificationLevel::Error => self.error,
            NotificationLevel::Success => self.success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert!(Theme::from_name("SynthBrute").is_some());
        assert!(Theme::from_name(" plain ").is_some());
        assert!(Theme::from_name("neon").is_none());
    }
}
