//! Theme: the light/dark display preference.

use std::fmt;

/// Class applied to `<body>` while the dark theme is active.
pub const DARK_BODY_CLASS: &str = "dark-theme";

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored preference. Anything but `dark` is light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Value persisted to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Text of the toggle control: it names the theme a click switches to.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Toggle Dark Mode",
            Self::Dark => "Toggle Light Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
