//! Highlight resolution: from candidate group names to concrete colors.
//!
//! [`Colorscheme::get_highlighting`] takes an ordered list of candidate
//! groups (most specific first), the active mode and an optional gradient
//! level, and produces a [`HighlightResult`].
//!
//! ## Resolution Order
//!
//! For each candidate:
//!
//! 1. Look the name up in the mode's group overrides, then in the global table
//! 2. Follow aliases, repeating step 1 for each target
//! 3. A name found nowhere means the candidate is skipped
//!
//! The first candidate that reaches a concrete group wins. If it came from the
//! global table, the mode's color substitutions are applied to its `fg`/`bg`.
//! Groups taken from a mode override are used as written.
//!
//! ## Colors
//!
//! Without a gradient level, `fg`/`bg` must name plain colors. With a level,
//! names may also refer to gradients (see [`Colorscheme::get_gradient`]).
//!
//! ```rust
//! use standout_colorscheme::Colorscheme;
//!
//! let scheme = Colorscheme::from_yaml(
//!     r#"
//!     groups:
//!       error: { fg: red, bg: red, attrs: [bold] }
//!     mode_translations:
//!       visual: { colors: { red: blue } }
//!     "#,
//!     r#"colors: { red: [1, "c00000"], blue: [4, "0000c0"] }"#,
//! ).unwrap();
//!
//! let hl = scheme.get_highlighting(&["missing", "error"], Some("visual"), None).unwrap();
//! assert_eq!(hl.fg.cterm, 4);
//! assert_eq!(hl.bg.rgb.to_u32(), 0x0000c0);
//! ```

use console::Style;
use tracing::trace;

use crate::error::HighlightError;
use crate::scheme::{Attrs, Color, ColorRef, Colorscheme, Group, GroupRef, ModeTranslation};

/// Concrete display attributes for one highlight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightResult {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
}

impl HighlightResult {
    /// Converts to a `console::Style` using the 256-color palette indices.
    pub fn to_console_style(&self) -> Style {
        let mut style = Style::new()
            .fg(console::Color::Color256(self.fg.cterm))
            .bg(console::Color::Color256(self.bg.cterm));
        if self.attrs.contains(Attrs::BOLD) {
            style = style.bold();
        }
        if self.attrs.contains(Attrs::ITALIC) {
            style = style.italic();
        }
        if self.attrs.contains(Attrs::UNDERLINE) {
            style = style.underlined();
        }
        style
    }
}

/// A concrete group reached by alias resolution.
struct ResolvedGroup<'a> {
    group: &'a Group,
    /// False when the group came from the mode's overrides.
    translate_colors: bool,
}

impl Colorscheme {
    /// Resolves the first candidate group that exists into concrete colors.
    ///
    /// # Errors
    ///
    /// - [`HighlightError::GroupsNotFound`] if no candidate resolves
    /// - [`HighlightError::UnknownColor`] if the winning group references a
    ///   missing color or gradient
    /// - [`HighlightError::AliasCycle`] if an alias chain loops. A cycle ends
    ///   the call even when a later candidate would resolve.
    pub fn get_highlighting<S: AsRef<str>>(
        &self,
        groups: &[S],
        mode: Option<&str>,
        gradient_level: Option<f64>,
    ) -> Result<HighlightResult, HighlightError> {
        let translation = mode.and_then(|mode| self.translation(mode));

        let mut resolved = None;
        for candidate in groups {
            if let Some(group) = self.resolve_group(candidate.as_ref(), translation)? {
                resolved = Some(group);
                break;
            }
        }

        let ResolvedGroup {
            group,
            translate_colors,
        } = resolved.ok_or_else(|| HighlightError::GroupsNotFound {
            groups: groups.iter().map(|g| g.as_ref().to_string()).collect(),
        })?;

        let (fg, bg) = match translation {
            Some(translation) if translate_colors => (
                translation.translate(&group.fg),
                translation.translate(&group.bg),
            ),
            _ => (&group.fg, &group.bg),
        };

        Ok(HighlightResult {
            fg: self.pick_color(fg, gradient_level)?,
            bg: self.pick_color(bg, gradient_level)?,
            attrs: group.attrs,
        })
    }

    /// Follows aliases from `name` to a concrete group.
    ///
    /// Returns `Ok(None)` if the name, or any alias target, is undefined.
    fn resolve_group<'a>(
        &'a self,
        name: &'a str,
        translation: Option<&'a ModeTranslation>,
    ) -> Result<Option<ResolvedGroup<'a>>, HighlightError> {
        let mut current = name;
        let mut path: Vec<&str> = Vec::new();

        loop {
            let seen = path.contains(&current);
            path.push(current);
            if seen {
                return Err(HighlightError::AliasCycle {
                    path: path.iter().map(|step| step.to_string()).collect(),
                });
            }

            let Some((value, from_override)) = self.lookup_group(current, translation) else {
                return Ok(None);
            };
            if from_override {
                trace!(group = current, "using mode group override");
            }

            match value {
                GroupRef::Literal(group) => {
                    return Ok(Some(ResolvedGroup {
                        group,
                        translate_colors: !from_override,
                    }))
                }
                GroupRef::Alias(next) => current = next.as_str(),
            }
        }
    }

    fn pick_color(&self, color: &ColorRef, level: Option<f64>) -> Result<Color, HighlightError> {
        match (color, level) {
            (ColorRef::Resolved(color), _) => Ok(*color),
            (ColorRef::Name(name), None) => self.lookup_color(name),
            (ColorRef::Name(name), Some(level)) => self.get_gradient(name, level),
        }
    }
}
