use serde::Serialize;

/// Class toggled on the navigation container at narrow widths.
pub const COMPACT_NAV_CLASS: &str = "mobile-nav";

/// Class toggled on the body by the theme switch.
pub const DARK_THEME_CLASS: &str = "dark-theme";

pub fn is_compact(width: f64, breakpoint_px: f64) -> bool {
    width <= breakpoint_px
}

/// Compact-navigation flag as a pure function of the current width.
#[derive(Debug, Clone)]
pub struct ResponsiveLayout {
    breakpoint_px: f64,
    compact: Option<bool>,
}

impl ResponsiveLayout {
    pub fn new(breakpoint_px: f64) -> Self {
        Self {
            breakpoint_px,
            compact: None,
        }
    }

    /// Recomputes the flag. Returns the new value when it differs from the
    /// last one applied (always on the first call).
    pub fn apply(&mut self, width: f64) -> Option<bool> {
        let compact = is_compact(width, self.breakpoint_px);
        if self.compact == Some(compact) {
            return None;
        }
        self.compact = Some(compact);
        Some(compact)
    }

    pub fn is_compact(&self) -> bool {
        self.compact.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn breakpoint_is_inclusive() {
        for (w, expect) in [(320.0, true), (768.0, true), (769.0, false), (1920.0, false)] {
            assert_eq!(is_compact(w, 768.0), expect, "width {w}");
        }
    }

    #[test]
    fn apply_reports_only_changes() {
        let mut l = ResponsiveLayout::new(768.0);
        assert_eq!(l.apply(1920.0), Some(false));
        assert_eq!(l.apply(1024.0), None);
        assert_eq!(l.apply(768.0), Some(true));
        assert_eq!(l.apply(320.0), None);
        assert!(l.is_compact());
        assert_eq!(l.apply(769.0), Some(false));
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        let t = Theme::default();
        assert!(!t.is_dark());
        assert!(t.toggle().is_dark());
        assert_eq!(t.toggle().toggle(), t);
    }

    proptest! {
        #[test]
        fn flag_depends_only_on_current_width(widths in prop::collection::vec(0.0f64..4000.0, 1..30)) {
            let mut l = ResponsiveLayout::new(768.0);
            for w in widths {
                l.apply(w);
                prop_assert_eq!(l.is_compact(), w <= 768.0);
            }
        }
    }
}
