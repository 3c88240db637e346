//! Theme colors for the menus and the console

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
}

impl ThemeKind {
    /// Unknown names fall back to Light.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            ThemeKind::Dark
        } else {
            ThemeKind::Light
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light",
            ThemeKind::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub kind: ThemeKind,
    /// Background color (RGB 0.0-1.0)
    pub bg: (f32, f32, f32),
    /// Foreground/text color
    pub fg: (f32, f32, f32),
    /// Muted text (console output, hints)
    pub fg_muted: (f32, f32, f32),
    /// General UI button background
    pub button_bg: (f32, f32, f32),
    /// General UI button hover background
    pub button_hover: (f32, f32, f32),
    /// General UI button foreground
    pub button_fg: (f32, f32, f32),
    /// Border color for UI elements
    pub border: (f32, f32, f32),
    /// Console panel background
    pub console_bg: (f32, f32, f32),
    /// Console error lines
    pub error: (f32, f32, f32),
    /// Cursor color
    pub cursor: (f32, f32, f32),
}

impl Theme {
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }

    /// Light theme (default)
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            bg: (0.98, 0.98, 0.98),   // #fafafa
            fg: (0.1, 0.1, 0.1),      // #1a1a1a
            fg_muted: (0.4, 0.4, 0.4),
            button_bg: (0.92, 0.92, 0.92),
            button_hover: (0.86, 0.86, 0.86),
            button_fg: (0.2, 0.4, 0.8), // Blue accent
            border: (0.8, 0.8, 0.8),
            console_bg: (0.94, 0.94, 0.94),
            error: (0.75, 0.1, 0.1),
            cursor: (0.2, 0.4, 0.8),
        }
    }

    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            bg: (0.12, 0.12, 0.13),
            fg: (0.92, 0.92, 0.92),
            fg_muted: (0.6, 0.6, 0.6),
            button_bg: (0.2, 0.2, 0.22),
            button_hover: (0.28, 0.28, 0.3),
            button_fg: (0.45, 0.65, 1.0),
            border: (0.3, 0.3, 0.32),
            console_bg: (0.08, 0.08, 0.09),
            error: (1.0, 0.45, 0.4),
            cursor: (0.45, 0.65, 1.0),
        }
    }
}

/// Color names `parse_color` knows, in the order the settings screen offers them.
pub const CLOCK_COLORS: [&str; 11] = [
    "Black", "White", "Red", "Green", "Blue", "Yellow", "Purple", "Orange", "Pink", "Brown", "Gray",
];

/// Clock text color from a color name or `#rrggbb`.
pub fn parse_color(name: &str) -> Option<(f32, f32, f32)> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        return Some((r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0));
    }

    let rgb: (u8, u8, u8) = match name.to_lowercase().as_str() {
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gray" | "grey" => (128, 128, 128),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        _ => return None,
    };
    Some((rgb.0 as f32 / 255.0, rgb.1 as f32 / 255.0, rgb.2 as f32 / 255.0))
}
