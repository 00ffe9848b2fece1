use thiserror::Error;

/// Failures while locating the page and installing the behaviours.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("failed to attach `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reveal_ratio must be within (0, 1], got {0}")]
    RevealRatio(f64),
    #[error("scroll_threshold must be a non-negative number, got {0}")]
    ScrollThreshold(f64),
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Send(String),
}

