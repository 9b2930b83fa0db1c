use crossterm::style::Color as CrosstermColor;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Text field
    pub label: ColorPair,
    pub field: ColorPair,
    pub placeholder: ColorPair,

    // Day states
    pub selected: ColorPair,
    pub today: ColorPair,
    pub focused: ColorPair,
    pub day: ColorPair,
    pub weekend: ColorPair,

    // Popover chrome
    pub border: ColorPair,
    pub title: ColorPair,
    pub header: ColorPair,
    pub help_text: ColorPair,
    pub error_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    /// Convert to ratatui style with modifier
    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }
}

/// Convert crossterm color to ratatui color
pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                label: ColorPair::new(CrosstermColor::DarkCyan),
                field: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),

                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                focused: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 60, g: 60, b: 60 },
                ),
                day: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),

                border: ColorPair::new(CrosstermColor::DarkCyan),
                title: ColorPair::new(CrosstermColor::Cyan),
                header: ColorPair::new(CrosstermColor::DarkCyan),
                help_text: ColorPair::new(CrosstermColor::DarkGrey),
                error_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                label: ColorPair::new(CrosstermColor::DarkBlue),
                field: ColorPair::new(CrosstermColor::Black),
                placeholder: ColorPair::new(CrosstermColor::Grey),

                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                focused: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 220, g: 220, b: 220 },
                ),
                day: ColorPair::new(CrosstermColor::Black),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),

                border: ColorPair::new(CrosstermColor::DarkBlue),
                title: ColorPair::new(CrosstermColor::DarkBlue),
                header: ColorPair::new(CrosstermColor::DarkBlue),
                help_text: ColorPair::new(CrosstermColor::DarkGrey),
                error_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                label: ColorPair::new(CrosstermColor::White),
                field: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),

                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),
                focused: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 28, g: 28, b: 28 },
                ),
                day: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),

                border: ColorPair::new(CrosstermColor::White),
                title: ColorPair::new(CrosstermColor::White),
                header: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::Grey),
                error_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("minimal").name, "Minimal");
        assert_eq!(Theme::by_name("solarized").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }

    #[test]
    fn test_color_pair_conversion() {
        let style = ColorPair::with_bg(
            CrosstermColor::DarkBlue,
            CrosstermColor::Rgb { r: 1, g: 2, b: 3 },
        )
        .to_ratatui();
        assert_eq!(style.fg, Some(RatatuiColor::Blue));
        assert_eq!(style.bg, Some(RatatuiColor::Rgb(1, 2, 3)));

        let bold = ColorPair::new(CrosstermColor::White).to_ratatui_with_modifier(Modifier::BOLD);
        assert!(bold.add_modifier.contains(Modifier::BOLD));
    }
}
