use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub name: &'static str,
    pub label: &'static str,
}

pub const THEMES: &[ThemeOption] = &[
    ThemeOption {
        name: "neutral",
        label: "Neutral",
    },
    ThemeOption {
        name: "zinc",
        label: "Zinc",
    },
    ThemeOption {
        name: "gray",
        label: "Gray",
    },
    ThemeOption {
        name: "slate",
        label: "Slate",
    },
];

pub const DEFAULT_THEME: &str = "slate";
