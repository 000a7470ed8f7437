//! Value types stored in a [`Colorscheme`](super::Colorscheme).

use std::collections::HashMap;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::colorspace::{cterm_to_srgb, Rgb};

/// A color in both color spaces: a 256-color palette index and a 24-bit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub cterm: u8,
    pub rgb: Rgb,
}

impl Color {
    pub const fn new(cterm: u8, rgb: Rgb) -> Self {
        Self { cterm, rgb }
    }

    /// A palette color whose RGB value comes from the palette table.
    pub fn from_cterm(cterm: u8) -> Self {
        Self::new(cterm, cterm_to_srgb(cterm))
    }
}

/// A reference from a group to a color.
///
/// Names are looked up in the colorscheme at resolution time (and may point
/// to a gradient); inline literals are resolved once when the scheme is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorRef {
    Name(String),
    Resolved(Color),
}

impl ColorRef {
    /// The referenced name, if this is not an inline color.
    pub fn name(&self) -> Option<&str> {
        match self {
            ColorRef::Name(name) => Some(name),
            ColorRef::Resolved(_) => None,
        }
    }
}

impl From<&str> for ColorRef {
    fn from(name: &str) -> Self {
        ColorRef::Name(name.to_string())
    }
}

impl From<Color> for ColorRef {
    fn from(color: Color) -> Self {
        ColorRef::Resolved(color)
    }
}

/// Text attribute flags, encoded as the renderer bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Attrs(u8);

impl Attrs {
    pub const NONE: Attrs = Attrs(0);
    pub const BOLD: Attrs = Attrs(1);
    pub const ITALIC: Attrs = Attrs(2);
    pub const UNDERLINE: Attrs = Attrs(4);

    /// Builds flags from attribute names. Unknown names are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(Attrs::NONE, |attrs, name| match name.as_ref() {
                "bold" => attrs | Attrs::BOLD,
                "italic" => attrs | Attrs::ITALIC,
                "underline" => attrs | Attrs::UNDERLINE,
                _ => attrs,
            })
    }

    /// The raw bitmask: bold = 1, italic = 2, underline = 4.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Attrs) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Attrs {
    type Output = Attrs;

    fn bitor(self, rhs: Attrs) -> Attrs {
        Attrs(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attrs {
    fn bitor_assign(&mut self, rhs: Attrs) {
        self.0 |= rhs.0;
    }
}

/// A concrete highlight group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub fg: ColorRef,
    pub bg: ColorRef,
    pub attrs: Attrs,
}

/// A group table entry: a concrete group or an alias to another group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    Literal(Group),
    Alias(String),
}

impl From<Group> for GroupRef {
    fn from(group: Group) -> Self {
        GroupRef::Literal(group)
    }
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        GroupRef::Alias(name.to_string())
    }
}

/// Overrides active in one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeTranslation {
    pub groups: HashMap<String, GroupRef>,
    pub colors: HashMap<String, ColorRef>,
}

impl ModeTranslation {
    /// Applies the color substitution map to a reference.
    ///
    /// Only named references are substituted; inline colors pass through.
    pub fn translate<'a>(&'a self, color: &'a ColorRef) -> &'a ColorRef {
        match color {
            ColorRef::Name(name) => self.colors.get(name).unwrap_or(color),
            ColorRef::Resolved(_) => color,
        }
    }
}
