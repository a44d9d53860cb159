use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub focus: FocusStyle,
    pub ballot: BallotStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
            focus: FocusStyle::default(),
            ballot: BallotStyle::default(),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self::default()
    }

    pub fn vibrant() -> Self {
        Self {
            name: "vibrant".to_string(),
            colors: ThemeColors {
                background: HexColor::new("#0a0a0f"),
                foreground: HexColor::new("#e0e0e0"),
                primary: HexColor::new("#ff6b6b"),
                accent: HexColor::new("#ffe66d"),
                success: HexColor::new("#95e1a3"),
                muted: HexColor::new("#6c757d"),
            },
            focus: FocusStyle {
                focused_border: HexColor::new("#ff6b6b"),
                unfocused_border: HexColor::new("#3d3d4d"),
                focused_title: HexColor::new("#ffe66d"),
                unfocused_title: HexColor::new("#6c757d"),
                use_bold_focused: true,
            },
            ballot: BallotStyle {
                selected_fg: HexColor::new("#0a0a0f"),
                selected_bg: HexColor::new("#ff6b6b"),
                voted_fg: HexColor::new("#95e1a3"),
                winner_fg: HexColor::new("#ffe66d"),
                winner_border: HexColor::new("#ffe66d"),
                ..Default::default()
            },
        }
    }

    /// Looks up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" | "dark" => Some(Self::dark()),
            "vibrant" => Some(Self::vibrant()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: HexColor,
    pub foreground: HexColor,
    pub primary: HexColor,
    pub accent: HexColor,
    pub success: HexColor,
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: HexColor::new("#1a1b26"),
            foreground: HexColor::new("#c0caf5"),
            primary: HexColor::new("#7aa2f7"),
            accent: HexColor::new("#bb9af7"),
            success: HexColor::new("#9ece6a"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStyle {
    pub focused_border: HexColor,
    pub unfocused_border: HexColor,
    pub focused_title: HexColor,
    pub unfocused_title: HexColor,
    pub use_bold_focused: bool,
}

impl Default for FocusStyle {
    fn default() -> Self {
        Self {
            focused_border: HexColor::new("#7aa2f7"),
            unfocused_border: HexColor::new("#3b4261"),
            focused_title: HexColor::new("#bb9af7"),
            unfocused_title: HexColor::new("#565f89"),
            use_bold_focused: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallotStyle {
    pub button_fg: HexColor,
    pub selected_fg: HexColor,
    pub selected_bg: HexColor,
    pub disabled_fg: HexColor,
    pub voted_fg: HexColor,
    pub winner_fg: HexColor,
    pub winner_border: HexColor,
}

impl Default for BallotStyle {
    fn default() -> Self {
        Self {
            button_fg: HexColor::new("#c0caf5"),
            selected_fg: HexColor::new("#1a1b26"),
            selected_bg: HexColor::new("#7aa2f7"),
            disabled_fg: HexColor::new("#565f89"),
            voted_fg: HexColor::new("#9ece6a"),
            winner_fg: HexColor::new("#e0af68"),
            winner_border: HexColor::new("#e0af68"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn to_color(&self) -> Color {
        self.parse_hex().unwrap_or(Color::Reset)
    }

    fn parse_hex(&self) -> Option<Color> {
        let hex = self.0.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_border.to_color()
        } else {
            self.focus.unfocused_border.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn title_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_title.to_color()
        } else {
            self.focus.unfocused_title.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Style for one ballot button given its interaction state.
    pub fn button_style(&self, enabled: bool, selected: bool) -> Style {
        if !enabled {
            Style::default()
                .fg(self.ballot.disabled_fg.to_color())
                .add_modifier(Modifier::DIM)
        } else if selected {
            Style::default()
                .fg(self.ballot.selected_fg.to_color())
                .bg(self.ballot.selected_bg.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.ballot.button_fg.to_color())
        }
    }

    pub fn winner_style(&self) -> Style {
        Style::default()
            .fg(self.ballot.winner_fg.to_color())
            .add_modifier(Modifier::BOLD)
    }
}
