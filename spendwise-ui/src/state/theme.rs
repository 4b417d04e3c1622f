//! Colour theme
//!
//! The dark theme is a single class on `<body>`; the stylesheet does the rest.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Class toggled on `<body>`
    pub const BODY_CLASS: &'static str = "dark-mode";

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Whether `<body>` should carry `BODY_CLASS`
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_body_class() {
        let theme = Theme::default();
        assert!(!theme.is_dark());

        let theme = theme.toggled();
        assert!(theme.is_dark());

        let theme = theme.toggled();
        assert_eq!(theme, Theme::Light);
        assert!(!theme.is_dark());
    }
}
