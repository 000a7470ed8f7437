//! Palette document: colors, gradients and interpolated gradients.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The palette document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// Named colors.
    pub colors: HashMap<String, ColorValue>,

    /// Discrete gradients, in two-list or legacy single-list form.
    #[serde(default)]
    pub gradients: HashMap<String, Vec<GradientList>>,

    /// Interpolated gradients as `[position, color]` stops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolated_gradients: Option<HashMap<String, Vec<(f64, StopColor)>>>,
}

impl ColorsConfig {
    /// Parses a palette document from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a palette document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A color literal: a palette index, optionally paired with a hex RGB value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// `244`: RGB comes from the palette table.
    Index(u8),
    /// `[1, "c00000"]`
    Pair(u8, String),
}

/// One list of a discrete gradient definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradientList {
    /// Palette indices.
    Cterm(Vec<u8>),
    /// Hex RGB values.
    Hex(Vec<String>),
}

/// Color of an interpolated gradient stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopColor {
    /// Hex RGB value.
    Hex(String),
    /// Palette index, converted through the palette table.
    Index(u8),
}
