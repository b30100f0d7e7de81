use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// RGB color specification.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night",
            primary: rgb(125, 207, 255),
            accent: rgb(255, 159, 196),
            text: rgb(169, 177, 214),
            text_muted: rgb(117, 121, 148),
            success: rgb(158, 206, 106),
            warning: rgb(255, 202, 40),
            error: rgb(247, 118, 142),
            border_active: rgb(125, 207, 255),
            border_normal: rgb(117, 121, 148),
            highlight_bg: rgb(125, 207, 255),
            highlight_fg: rgb(26, 27, 38),
        }
    }

    pub fn dracula() -> Self {
        Theme {
            name: "dracula",
            primary: rgb(189, 147, 249),
            accent: rgb(255, 121, 198),
            text: rgb(248, 248, 242),
            text_muted: rgb(98, 114, 164),
            success: rgb(80, 250, 123),
            warning: rgb(255, 184, 108),
            error: rgb(255, 85, 85),
            border_active: rgb(189, 147, 249),
            border_normal: rgb(98, 114, 164),
            highlight_bg: rgb(139, 233, 253),
            highlight_fg: rgb(40, 42, 54),
        }
    }

    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn",
            primary: rgb(161, 119, 255),
            accent: rgb(255, 109, 146),
            text: rgb(88, 82, 96),
            text_muted: rgb(152, 147, 165),
            success: rgb(59, 247, 209),
            warning: rgb(255, 210, 0),
            error: rgb(235, 111, 146),
            border_active: rgb(161, 119, 255),
            border_normal: rgb(88, 82, 96),
            highlight_bg: rgb(61, 174, 233),
            highlight_fg: rgb(0, 0, 0),
        }
    }

    /// Look up a theme by its configuration name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    pub fn available_themes() -> [&'static str; 3] {
        ["tokyo-night", "dracula", "rose-pine-dawn"]
    }
}
