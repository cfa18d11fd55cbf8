use serde::{Deserialize, Serialize};

use crate::error::{PageError, Result};

/// Tunables for a page session. Every field has a default, so an empty JSON
/// object (or no config at all) reproduces the stock page behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Lower bound (inclusive) of the assistant reply delay.
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u32,
    /// Upper bound (exclusive) of the assistant reply delay.
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u32,
    /// How long a notification stays up when nothing pre-empts it.
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u32,
    #[serde(default = "default_welcome_delay_ms")]
    pub welcome_delay_ms: u32,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    /// Widths at or below this get the compact navigation layout.
    #[serde(default = "default_compact_breakpoint_px")]
    pub compact_breakpoint_px: f64,
    /// Fraction of a card that must be visible before it is revealed.
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Bottom root margin of the reveal observer; negative shrinks the viewport.
    #[serde(default = "default_reveal_bottom_margin_px")]
    pub reveal_bottom_margin_px: f64,
    #[serde(default = "default_typing_idle_ms")]
    pub typing_idle_ms: u32,
    /// Status text shown while the visitor types. `None` leaves the status
    /// untouched.
    #[serde(default)]
    pub typing_status: Option<String>,
    /// Fixed seed for reply delays and response choice. `None` seeds from the clock.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_reply_delay_min_ms() -> u32 {
    1000
}

fn default_reply_delay_max_ms() -> u32 {
    3000
}

fn default_notification_ms() -> u32 {
    3000
}

fn default_welcome_delay_ms() -> u32 {
    1000
}

fn default_welcome_message() -> String {
    "Welcome to Serenity Yoga Center!".to_string()
}

fn default_compact_breakpoint_px() -> f64 {
    768.0
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_bottom_margin_px() -> f64 {
    -50.0
}

fn default_typing_idle_ms() -> u32 {
    1000
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            notification_ms: default_notification_ms(),
            welcome_delay_ms: default_welcome_delay_ms(),
            welcome_message: default_welcome_message(),
            compact_breakpoint_px: default_compact_breakpoint_px(),
            reveal_threshold: default_reveal_threshold(),
            reveal_bottom_margin_px: default_reveal_bottom_margin_px(),
            typing_idle_ms: default_typing_idle_ms(),
            typing_status: None,
            rng_seed: None,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: PageConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.reply_delay_max_ms <= self.reply_delay_min_ms {
            return Err(PageError::InvalidConfig(format!(
                "reply_delay_max_ms ({}) must exceed reply_delay_min_ms ({})",
                self.reply_delay_max_ms, self.reply_delay_min_ms
            )));
        }
        if self.notification_ms == 0 {
            return Err(PageError::InvalidConfig(
                "notification_ms must be positive".to_string(),
            ));
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(PageError::InvalidConfig(format!(
                "reveal_threshold must be in (0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if !self.compact_breakpoint_px.is_finite() || self.compact_breakpoint_px < 0.0 {
            return Err(PageError::InvalidConfig(format!(
                "compact_breakpoint_px must be a non-negative width, got {}",
                self.compact_breakpoint_px
            )));
        }
        Ok(())
    }

    /// `rootMargin` string for an `IntersectionObserver`.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.reveal_bottom_margin_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = PageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PageConfig::default());
        assert_eq!(cfg.reply_delay_min_ms, 1000);
        assert_eq!(cfg.reply_delay_max_ms, 3000);
        assert_eq!(cfg.notification_ms, 3000);
        assert_eq!(cfg.welcome_message, "Welcome to Serenity Yoga Center!");
        assert_eq!(cfg.typing_status, None);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = PageConfig::from_json(r#"{"rng_seed": 9, "typing_status": "..."}"#).unwrap();
        assert_eq!(cfg.rng_seed, Some(9));
        assert_eq!(cfg.typing_status.as_deref(), Some("..."));
        assert_eq!(cfg.compact_breakpoint_px, 768.0);
    }

    #[test]
    fn inverted_delay_bounds_are_rejected() {
        let err = PageConfig::from_json(r#"{"reply_delay_min_ms": 3000, "reply_delay_max_ms": 1000}"#)
            .unwrap_err();
        assert!(matches!(err, PageError::InvalidConfig(_)));
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for raw in [r#"{"reveal_threshold": 0.0}"#, r#"{"reveal_threshold": 1.5}"#] {
            assert!(matches!(
                PageConfig::from_json(raw),
                Err(PageError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            PageConfig::from_json("{not json"),
            Err(PageError::ConfigParse(_))
        ));
    }

    #[test]
    fn root_margin_matches_observer_syntax() {
        assert_eq!(PageConfig::default().reveal_root_margin(), "0px 0px -50px 0px");
    }
}
