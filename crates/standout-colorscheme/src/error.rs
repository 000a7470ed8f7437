//! Error types for colorscheme construction and highlight resolution.
//!
//! - [`ConfigError`]: the configuration could not be turned into a
//!   [`Colorscheme`](crate::Colorscheme). Fatal; no partial scheme is returned.
//! - [`HighlightError`]: a single [`get_highlighting`](crate::Colorscheme::get_highlighting)
//!   call failed. The caller decides on a fallback.
//! - [`ValidationError`]: reported by the opt-in
//!   [`validate`](crate::Colorscheme::validate) pass.

use thiserror::Error;

/// Errors raised while building a colorscheme from configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("failed to parse {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// A hex color string is not a valid 24-bit number.
    #[error("invalid hex color '{value}' in '{owner}'")]
    InvalidHex { owner: String, value: String },

    /// A discrete gradient is malformed.
    #[error("invalid gradient '{gradient}': {message}")]
    InvalidGradient { gradient: String, message: String },

    /// Interpolated gradient stops violate the bounds or ordering rules.
    #[error("invalid stops in interpolated gradient '{gradient}': {message}")]
    InvalidStops { gradient: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            format: "YAML",
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

/// Errors raised while resolving a highlight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// None of the candidate groups exist.
    #[error("highlighting groups not found in colorscheme: {}", .groups.join(", "))]
    GroupsNotFound { groups: Vec<String> },

    /// A resolved group references a color or gradient that does not exist.
    #[error("color '{name}' not found in colorscheme")]
    UnknownColor { name: String },

    /// A group alias chain loops back on itself.
    #[error("cycle detected in group aliases: {}", .path.join(" -> "))]
    AliasCycle { path: Vec<String> },
}

/// Problems found by [`Colorscheme::validate`](crate::Colorscheme::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An alias references a group that doesn't exist.
    #[error("group '{from}' aliases non-existent group '{to}'")]
    UnresolvedAlias { from: String, to: String },

    /// A cycle was detected in alias resolution.
    #[error("cycle detected in group aliases: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// A group uses a color name that is neither a color nor a gradient.
    #[error("group '{group}' uses unknown color '{color}'")]
    UnknownColor { group: String, color: String },

    /// A mode translation substitutes a color with one that does not exist.
    #[error("mode '{mode}' translates '{from}' to unknown color '{to}'")]
    UnknownTranslatedColor {
        mode: String,
        from: String,
        to: String,
    },
}
