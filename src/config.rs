use log::Level;
use serde::Deserialize;

use crate::error::ConfigError;

/// Id of the optional inline JSON block that overrides [`PageConfig`].
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Local builds served by `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub behavior: Behavior,
    pub text: Text,
}

/// CSS selectors used to locate the elements the page scripts attach to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub nav_links: String,
    pub fade_targets: String,
    pub success_modal: String,
    pub error_modal: String,
    pub modal: String,
    pub close_button: String,
    pub modal_message: String,
    pub form: String,
    pub submit_button: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: "#navbar".to_string(),
            nav_links: "nav a".to_string(),
            fade_targets: ".fade-in".to_string(),
            success_modal: "#successModal".to_string(),
            error_modal: "#errorModal".to_string(),
            modal: ".modal".to_string(),
            close_button: ".close-btn".to_string(),
            modal_message: ".modal-body p".to_string(),
            form: ".contact-form".to_string(),
            submit_button: "button[type=\"submit\"]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Behavior {
    /// Vertical offset past which the navbar is styled as scrolled.
    pub scroll_threshold: f64,
    /// Fraction of the viewport height a fade target's top must be above.
    pub reveal_ratio: f64,
    pub auto_close_ms: u32,
    /// Matches the CSS transition on `.modal`.
    pub hide_transition_ms: u32,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            reveal_ratio: 0.85,
            auto_close_ms: 3000,
            hide_transition_ms: 420,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Text {
    pub sending_label: String,
    pub default_submit_label: String,
    pub failure_message: String,
    pub network_error_message: String,
    pub error_prefix: String,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            sending_label: "Sending...".to_string(),
            default_submit_label: "Send Message".to_string(),
            failure_message: "Failed to send message. Please try again.".to_string(),
            network_error_message: "Network error: could not send message.".to_string(),
            error_prefix: "❌ ".to_string(),
        }
    }
}

impl PageConfig {
    /// Parses an inline configuration block. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let behavior = &self.behavior;
        if !(behavior.reveal_ratio > 0.0 && behavior.reveal_ratio <= 1.0) {
            return Err(ConfigError::RevealRatio(behavior.reveal_ratio));
        }
        if !behavior.scroll_threshold.is_finite() || behavior.scroll_threshold < 0.0 {
            return Err(ConfigError::ScrollThreshold(behavior.scroll_threshold));
        }
        if behavior.auto_close_ms == 0 {
            return Err(ConfigError::ZeroDuration("auto_close_ms"));
        }
        if behavior.hide_transition_ms == 0 {
            return Err(ConfigError::ZeroDuration("hide_transition_ms"));
        }
        Ok(())
    }

    /// Like [`PageConfig::from_json`], but falls back to defaults with a warning.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Self::default(),
            Some(raw) => match Self::from_json(raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring inline page config: {}", e);
                    Self::default()
                }
            },
        }
    }
}
