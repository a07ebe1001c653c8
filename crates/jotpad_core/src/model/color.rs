//! Fixed note color palette.

/// One selectable note color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub id: &'static str,
    /// CSS-style hex value stored on the note.
    pub value: &'static str,
    pub name: &'static str,
}

/// Color assigned to notes created without an explicit choice.
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Palette offered to users, in display order.
pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption {
        id: "default",
        value: DEFAULT_COLOR,
        name: "Default",
    },
    ColorOption {
        id: "coral",
        value: "#faafa8",
        name: "Coral",
    },
    ColorOption {
        id: "peach",
        value: "#f39f76",
        name: "Peach",
    },
    ColorOption {
        id: "sand",
        value: "#fff8b8",
        name: "Sand",
    },
    ColorOption {
        id: "mint",
        value: "#e2f6d3",
        name: "Mint",
    },
    ColorOption {
        id: "sage",
        value: "#b4ddd3",
        name: "Sage",
    },
    ColorOption {
        id: "fog",
        value: "#d4e4ed",
        name: "Fog",
    },
    ColorOption {
        id: "storm",
        value: "#aeccdc",
        name: "Storm",
    },
    ColorOption {
        id: "dusk",
        value: "#d3bfdb",
        name: "Dusk",
    },
    ColorOption {
        id: "blossom",
        value: "#f6e2dd",
        name: "Blossom",
    },
];

/// Returns the display name for a stored color value.
///
/// Matching ignores ASCII case so `#FAAFA8` and `#faafa8` resolve alike.
pub fn color_name(value: &str) -> Option<&'static str> {
    COLOR_OPTIONS
        .iter()
        .find(|option| option.value.eq_ignore_ascii_case(value.trim()))
        .map(|option| option.name)
}

/// Returns the palette entry at `index`, wrapping around the palette.
pub fn color_at(index: usize) -> &'static ColorOption {
    &COLOR_OPTIONS[index % COLOR_OPTIONS.len()]
}
