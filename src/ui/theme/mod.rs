use crossterm::style::{Attribute, Attributes, Color, Colors, ContentStyle};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl From<Colors> for Style {
    fn from(colors: Colors) -> Self {
        Self {
            foreground: colors.foreground,
            background: colors.background,
            ..Default::default()
        }
    }
}

impl Style {
    pub fn to_content_style(&self, fallback: &Style) -> ContentStyle {
        let foreground_color = self.foreground.or(fallback.foreground);
        let background_color = self.background.or(fallback.background);
        let mut attributes = Attributes::default();

        if self.italic {
            attributes.set(Attribute::Italic);
        }

        if self.bold {
            attributes.set(Attribute::Bold);
        }

        ContentStyle {
            foreground_color,
            background_color,
            attributes,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

fn rgb(hex: u32) -> Option<Color> {
    Some(Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    })
}

fn colors(foreground: u32, background: u32) -> Colors {
    Colors {
        foreground: rgb(foreground),
        background: rgb(background),
    }
}

/// Key cap colors by progress state.
#[derive(Debug, Clone)]
pub struct KeyCapColors {
    pub pending: Colors,
    pub current: Colors,
    pub done: Colors,
    pub failed: Colors,
}

#[derive(Debug, Clone)]
pub struct SceneColors {
    pub text: Colors,
    pub cursor: Colors,
    pub highlight: Colors,
    pub mode: Colors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub base: Colors,
    pub muted: Colors,
    pub accent: Colors,
    pub success: Colors,
    pub error: Colors,
    pub warning: Colors,
    pub progress: Colors,
    pub keycap: KeyCapColors,
    pub scene: SceneColors,
}

impl Default for ThemeColors {
    fn default() -> Self {
        let background = 0x0a0a0a;
        Self {
            base: colors(0xe0e0e0, background),
            muted: colors(0x888888, background),
            accent: colors(0x569cd6, background),
            success: colors(0x4ade80, background),
            error: colors(0xf87171, background),
            warning: colors(0xeab308, background),
            progress: colors(0x4ade80, 0x2a2a2a),
            keycap: KeyCapColors {
                pending: colors(0x666666, 0x1a1a1a),
                current: colors(0xffffff, 0x3a3a3a),
                done: colors(0xffffff, 0x22c55e),
                failed: colors(0xffffff, 0xdc2626),
            },
            scene: SceneColors {
                text: colors(0xd4d4d4, 0x111111),
                cursor: colors(0x111111, 0xd4d4d4),
                highlight: colors(0xffffff, 0x264f78),
                mode: colors(0x111111, 0x569cd6),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: ThemeColors,
}

impl Theme {
    pub fn base_style(&self) -> Style {
        Style::from(self.colors.base)
    }

    pub fn muted_style(&self) -> Style {
        Style::from(self.colors.muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::from(self.colors.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::from(self.colors.success)
    }

    pub fn error_style(&self) -> Style {
        Style::from(self.colors.error)
    }
}
