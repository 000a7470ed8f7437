//! Group document: highlight groups and mode translations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::colors::ColorValue;
use crate::error::ConfigError;

/// The group document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsConfig {
    /// Global group table.
    pub groups: HashMap<String, GroupValue>,

    /// Per-mode overrides, keyed by mode name.
    #[serde(default)]
    pub mode_translations: HashMap<String, ModeTranslationConfig>,
}

impl GroupsConfig {
    /// Parses a group document from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a group document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A group entry: either an alias to another group or a full definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupValue {
    /// Name of another group.
    Alias(String),
    /// Concrete definition.
    Group(GroupDef),
}

/// A concrete group definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    pub fg: ColorRefValue,
    pub bg: ColorRefValue,
    /// Attribute names (`bold`, `italic`, `underline`); others are ignored.
    #[serde(default)]
    pub attrs: Vec<String>,
}

/// A color reference: a name from the palette, or an inline color literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorRefValue {
    Name(String),
    Literal(ColorValue),
}

/// Overrides applied while a mode is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTranslationConfig {
    /// Groups replaced wholesale in this mode.
    #[serde(default)]
    pub groups: HashMap<String, GroupValue>,

    /// Color name substitutions for groups taken from the global table.
    #[serde(default)]
    pub colors: HashMap<String, ColorRefValue>,
}
