//! The [`Colorscheme`] store: construction, lookups and validation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::value::{Attrs, Color, ColorRef, Group, GroupRef, ModeTranslation};
use crate::colorspace::{cterm_to_srgb, NearestColorCache, Rgb};
use crate::config::{
    ColorRefValue, ColorValue, ColorsConfig, GradientList, GroupValue, GroupsConfig, StopColor,
};
use crate::error::{ConfigError, HighlightError, ValidationError};
use crate::gradient::{Gradient, InterpolatedGradient};

/// Colors, gradients, groups and mode translations, built once from configuration.
///
/// A colorscheme is immutable after construction and can be shared between
/// threads. The only mutable state is the nearest-color cache, which is
/// internally synchronized and may be shared between schemes with
/// [`with_cache`](Self::with_cache).
///
/// # Example
///
/// ```rust
/// use standout_colorscheme::Colorscheme;
///
/// let scheme = Colorscheme::from_yaml(
///     "groups: { error: { fg: red, bg: red, attrs: [bold] } }",
///     r#"colors: { red: [1, "c00000"] }"#,
/// ).unwrap();
///
/// let hl = scheme.get_highlighting(&["error"], None, None).unwrap();
/// assert_eq!(hl.fg.cterm, 1);
/// assert_eq!(hl.fg.rgb.to_u32(), 0xc00000);
/// assert_eq!(hl.attrs.bits(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Colorscheme {
    colors: HashMap<String, Color>,
    gradients: HashMap<String, Gradient>,
    interpolated_gradients: HashMap<String, InterpolatedGradient>,
    groups: HashMap<String, GroupRef>,
    translations: HashMap<String, ModeTranslation>,
    cache: Arc<NearestColorCache>,
}

impl Colorscheme {
    /// Builds a colorscheme from a group document and a palette document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a hex value is invalid, a discrete
    /// gradient is malformed, or interpolated gradient stops do not start at
    /// 0.0, end at 1.0 and strictly increase.
    pub fn new(groups: GroupsConfig, colors: ColorsConfig) -> Result<Self, ConfigError> {
        Self::with_cache(groups, colors, Arc::new(NearestColorCache::new()))
    }

    /// Like [`new`](Self::new), memoizing nearest-color searches in `cache`.
    pub fn with_cache(
        groups: GroupsConfig,
        colors: ColorsConfig,
        cache: Arc<NearestColorCache>,
    ) -> Result<Self, ConfigError> {
        let palette = colors
            .colors
            .iter()
            .map(|(name, value)| Ok((name.clone(), build_color(name, value)?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        let gradients = colors
            .gradients
            .iter()
            .map(|(name, lists)| Ok((name.clone(), build_gradient(name, lists)?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        let interpolated_gradients = colors
            .interpolated_gradients
            .iter()
            .flatten()
            .map(|(name, stops)| Ok((name.clone(), build_interpolated(name, stops)?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        let group_table = build_groups(&groups.groups)?;

        let translations = groups
            .mode_translations
            .iter()
            .map(|(mode, config)| {
                let colors = config
                    .colors
                    .iter()
                    .map(|(from, to)| {
                        let owner = format!("{}.colors.{}", mode, from);
                        Ok((from.clone(), build_color_ref(&owner, to)?))
                    })
                    .collect::<Result<HashMap<_, _>, ConfigError>>()?;
                let translation = ModeTranslation {
                    groups: build_groups(&config.groups)?,
                    colors,
                };
                Ok((mode.clone(), translation))
            })
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        debug!(
            colors = palette.len(),
            gradients = gradients.len(),
            interpolated_gradients = interpolated_gradients.len(),
            groups = group_table.len(),
            modes = translations.len(),
            "colorscheme built"
        );

        Ok(Self {
            colors: palette,
            gradients,
            interpolated_gradients,
            groups: group_table,
            translations,
            cache,
        })
    }

    /// Parses both documents from YAML and builds the colorscheme.
    pub fn from_yaml(groups_yaml: &str, colors_yaml: &str) -> Result<Self, ConfigError> {
        Self::new(
            GroupsConfig::from_yaml(groups_yaml)?,
            ColorsConfig::from_yaml(colors_yaml)?,
        )
    }

    /// Parses both documents from JSON and builds the colorscheme.
    pub fn from_json(groups_json: &str, colors_json: &str) -> Result<Self, ConfigError> {
        Self::new(
            GroupsConfig::from_json(groups_json)?,
            ColorsConfig::from_json(colors_json)?,
        )
    }

    /// The nearest-color cache used for interpolated gradients.
    pub fn cache(&self) -> &Arc<NearestColorCache> {
        &self.cache
    }

    /// Looks up a named color.
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Returns true if `name` is a color, gradient or interpolated gradient.
    pub fn has_color(&self, name: &str) -> bool {
        self.colors.contains_key(name)
            || self.gradients.contains_key(name)
            || self.interpolated_gradients.contains_key(name)
    }

    /// Returns true if the global group table defines `name`.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Names of the modes that have translations, sorted.
    pub fn modes(&self) -> Vec<&str> {
        let mut modes: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        modes.sort_unstable();
        modes
    }

    pub(crate) fn translation(&self, mode: &str) -> Option<&ModeTranslation> {
        self.translations.get(mode)
    }

    /// Finds a group entry, preferring the mode's overrides.
    ///
    /// The flag is true when the entry came from the mode's group map.
    pub(crate) fn lookup_group<'a>(
        &'a self,
        name: &str,
        translation: Option<&'a ModeTranslation>,
    ) -> Option<(&'a GroupRef, bool)> {
        match translation.and_then(|t| t.groups.get(name)) {
            Some(value) => Some((value, true)),
            None => self.groups.get(name).map(|value| (value, false)),
        }
    }

    pub(crate) fn lookup_color(&self, name: &str) -> Result<Color, HighlightError> {
        self.color(name).ok_or_else(|| HighlightError::UnknownColor {
            name: name.to_string(),
        })
    }

    /// Resolves a color or gradient name at `level` (0–100).
    ///
    /// Interpolated gradients take precedence, then discrete gradients, then
    /// plain colors (for which the level is irrelevant).
    pub fn get_gradient(&self, name: &str, level: f64) -> Result<Color, HighlightError> {
        if let Some(gradient) = self.interpolated_gradients.get(name) {
            let rgb = gradient.pick(level);
            return Ok(Color::new(self.cache.srgb_to_cterm(rgb), rgb));
        }

        if let Some(gradient) = self.gradients.get(name) {
            let (cterm, rgb) = gradient.pick(level);
            return Ok(Color::new(cterm, rgb));
        }

        self.lookup_color(name)
    }

    /// Checks group aliases and color references.
    ///
    /// Construction does not require references to resolve; unknown names are
    /// reported per call by [`get_highlighting`](Self::get_highlighting). Call
    /// this to catch inconsistencies up front. Returns the first problem
    /// found, visiting groups in name order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in sorted(&self.groups) {
            self.validate_group(name, value, None)?;
        }

        for (mode, translation) in sorted(&self.translations) {
            for (name, value) in sorted(&translation.groups) {
                self.validate_group(name, value, Some(translation))?;
            }
            for (from, to) in sorted(&translation.colors) {
                if let Some(target) = to.name() {
                    if !self.has_color(target) {
                        return Err(ValidationError::UnknownTranslatedColor {
                            mode: mode.clone(),
                            from: from.clone(),
                            to: target.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_group(
        &self,
        name: &str,
        value: &GroupRef,
        translation: Option<&ModeTranslation>,
    ) -> Result<(), ValidationError> {
        match value {
            GroupRef::Alias(target) => self.validate_alias_chain(name, target, translation),
            GroupRef::Literal(group) => {
                for color in [&group.fg, &group.bg] {
                    if let Some(color) = color.name() {
                        if !self.has_color(color) {
                            return Err(ValidationError::UnknownColor {
                                group: name.to_string(),
                                color: color.to_string(),
                            });
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Validates a single alias chain starting from `name` -> `target`.
    fn validate_alias_chain(
        &self,
        name: &str,
        target: &str,
        translation: Option<&ModeTranslation>,
    ) -> Result<(), ValidationError> {
        let mut current = target;
        let mut path = vec![name.to_string()];

        loop {
            let (value, _) = self.lookup_group(current, translation).ok_or_else(|| {
                ValidationError::UnresolvedAlias {
                    from: path.last().cloned().unwrap_or_default(),
                    to: current.to_string(),
                }
            })?;

            let seen = path.iter().any(|step| step == current);
            path.push(current.to_string());
            if seen {
                return Err(ValidationError::CycleDetected { path });
            }

            match value {
                GroupRef::Literal(_) => return Ok(()),
                GroupRef::Alias(next) => current = next.as_str(),
            }
        }
    }
}

fn sorted<V>(map: &HashMap<String, V>) -> Vec<(&String, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

// ─── Configuration conversion ───────────────────────────────────────────────

fn parse_hex(owner: &str, value: &str) -> Result<Rgb, ConfigError> {
    Rgb::from_hex(value).ok_or_else(|| ConfigError::InvalidHex {
        owner: owner.to_string(),
        value: value.to_string(),
    })
}

fn build_color(owner: &str, value: &ColorValue) -> Result<Color, ConfigError> {
    match value {
        ColorValue::Index(cterm) => Ok(Color::from_cterm(*cterm)),
        ColorValue::Pair(cterm, hex) => Ok(Color::new(*cterm, parse_hex(owner, hex)?)),
    }
}

fn build_color_ref(owner: &str, value: &ColorRefValue) -> Result<ColorRef, ConfigError> {
    match value {
        ColorRefValue::Name(name) => Ok(ColorRef::Name(name.clone())),
        ColorRefValue::Literal(color) => Ok(ColorRef::Resolved(build_color(owner, color)?)),
    }
}

fn build_groups(
    groups: &HashMap<String, GroupValue>,
) -> Result<HashMap<String, GroupRef>, ConfigError> {
    groups
        .iter()
        .map(|(name, value)| {
            let group = match value {
                GroupValue::Alias(target) => GroupRef::Alias(target.clone()),
                GroupValue::Group(def) => GroupRef::Literal(Group {
                    fg: build_color_ref(&format!("{}.fg", name), &def.fg)?,
                    bg: build_color_ref(&format!("{}.bg", name), &def.bg)?,
                    attrs: Attrs::from_names(&def.attrs),
                }),
            };
            Ok((name.clone(), group))
        })
        .collect()
}

/// Two lists are `[indices, hex colors]`; any other count is the legacy form
/// where the first list supplies the indices and RGB comes from the palette.
fn build_gradient(name: &str, lists: &[GradientList]) -> Result<Gradient, ConfigError> {
    match lists {
        [GradientList::Cterm(cterm), GradientList::Hex(hex)] => {
            let rgb = hex
                .iter()
                .map(|value| parse_hex(name, value))
                .collect::<Result<Vec<_>, _>>()?;
            Gradient::new(name, cterm.clone(), rgb)
        }
        [_, _] => Err(ConfigError::InvalidGradient {
            gradient: name.to_string(),
            message: "expected [palette indices, hex colors]".to_string(),
        }),
        [GradientList::Cterm(cterm), ..] => Gradient::from_cterm(name, cterm.clone()),
        _ => Err(ConfigError::InvalidGradient {
            gradient: name.to_string(),
            message: "expected a list of palette indices".to_string(),
        }),
    }
}

fn build_interpolated(
    name: &str,
    stops: &[(f64, StopColor)],
) -> Result<InterpolatedGradient, ConfigError> {
    let stops = stops
        .iter()
        .map(|(position, color)| {
            let rgb = match color {
                StopColor::Hex(hex) => parse_hex(name, hex)?,
                StopColor::Index(cterm) => cterm_to_srgb(*cterm),
            };
            Ok((*position, rgb))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    InterpolatedGradient::new(name, stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &str = r#"
        colors:
          red: [1, "c00000"]
          blue: [4, "0000c0"]
          gray: 244
        gradients:
          load: [[22, 28, 160], ["005f00", "008700", "d70000"]]
          legacy: [[22, 160]]
        interpolated_gradients:
          battery: [[0.0, "d70000"], [0.5, "ffaf00"], [1.0, 28]]
    "#;

    const GROUPS: &str = r#"
        groups:
          error: { fg: red, bg: gray, attrs: [bold] }
          warning: error
          critical: warning
        mode_translations:
          visual:
            colors: { red: blue }
    "#;

    fn scheme() -> Colorscheme {
        Colorscheme::from_yaml(GROUPS, COLORS).unwrap()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_colors_are_built() {
        let scheme = scheme();
        assert_eq!(scheme.color("red"), Some(Color::new(1, Rgb(0xc0, 0, 0))));
        assert_eq!(scheme.color("gray"), Some(Color::from_cterm(244)));
        assert_eq!(scheme.color("nope"), None);
    }

    #[test]
    fn test_tables_are_populated() {
        let scheme = scheme();
        assert!(scheme.has_group("error"));
        assert!(scheme.has_group("warning"));
        assert!(!scheme.has_group("nope"));
        assert!(scheme.has_color("load"));
        assert!(scheme.has_color("battery"));
        assert_eq!(scheme.modes(), vec!["visual"]);
    }

    #[test]
    fn test_invalid_hex_fails_construction() {
        let err = Colorscheme::from_yaml("groups: {}", r#"colors: { red: [1, "zz0000"] }"#)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidHex {
                owner: "red".to_string(),
                value: "zz0000".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_inline_hex_names_the_group() {
        let err = Colorscheme::from_yaml(
            r#"groups: { g: { fg: [1, "xyz"], bg: 0 } }"#,
            "colors: {}",
        )
        .unwrap_err();
        assert!(err.to_string().contains("g.fg"));
    }

    #[test]
    fn test_interpolated_stops_must_start_at_zero() {
        let err = Colorscheme::from_yaml(
            "groups: {}",
            r#"
            colors: {}
            interpolated_gradients:
              bad: [[0.1, "000000"], [1.0, "ffffff"]]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStops { .. }));
    }

    #[test]
    fn test_interpolated_stops_reject_nan() {
        let err = Colorscheme::from_yaml(
            "groups: {}",
            r#"
            colors: {}
            interpolated_gradients:
              bad: [[0.0, "000000"], [.nan, "808080"], [1.0, "ffffff"]]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidStops { ref gradient, .. } if gradient == "bad"
        ));
    }

    #[test]
    fn test_two_list_gradient_needs_hex_second_list() {
        let err = Colorscheme::from_yaml(
            "groups: {}",
            "colors: {}\ngradients: { bad: [[1, 2], [3, 4]] }",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGradient { .. }));
    }

    #[test]
    fn test_two_list_gradient_lengths_must_match() {
        let err = Colorscheme::from_yaml(
            "groups: {}",
            r#"
            colors: {}
            gradients: { bad: [[1, 2, 3], ["000000", "ffffff"]] }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGradient { .. }));
    }

    #[test]
    fn test_legacy_gradient_with_extra_lists_uses_first() {
        let scheme = Colorscheme::from_yaml(
            "groups: {}",
            "colors: {}\ngradients: { g: [[1, 4], [2], [3]] }",
        )
        .unwrap();
        assert_eq!(scheme.get_gradient("g", 100.0), Ok(Color::from_cterm(4)));
    }

    #[test]
    fn test_from_json() {
        let scheme = Colorscheme::from_json(
            r#"{"groups": {"error": {"fg": "red", "bg": "red"}}}"#,
            r#"{"colors": {"red": [1, "c00000"]}}"#,
        )
        .unwrap();
        assert!(scheme.has_group("error"));
    }

    #[test]
    fn test_shared_cache() {
        let cache = Arc::new(NearestColorCache::new());
        let a = Colorscheme::with_cache(
            GroupsConfig::from_yaml(GROUPS).unwrap(),
            ColorsConfig::from_yaml(COLORS).unwrap(),
            Arc::clone(&cache),
        )
        .unwrap();
        let b = Colorscheme::with_cache(
            GroupsConfig::from_yaml(GROUPS).unwrap(),
            ColorsConfig::from_yaml(COLORS).unwrap(),
            Arc::clone(&cache),
        )
        .unwrap();

        a.get_gradient("battery", 33.0).unwrap();
        b.get_gradient("battery", 33.0).unwrap();
        assert_eq!(cache.scan_count(), 1);
    }

    // =========================================================================
    // get_gradient
    // =========================================================================

    #[test]
    fn test_discrete_gradient_picks_both_lists() {
        let scheme = scheme();
        assert_eq!(
            scheme.get_gradient("load", 0.0),
            Ok(Color::new(22, Rgb::from_u32(0x005f00)))
        );
        assert_eq!(
            scheme.get_gradient("load", 50.0),
            Ok(Color::new(28, Rgb::from_u32(0x008700)))
        );
        assert_eq!(
            scheme.get_gradient("load", 100.0),
            Ok(Color::new(160, Rgb::from_u32(0xd70000)))
        );
    }

    #[test]
    fn test_legacy_gradient_derives_rgb() {
        let scheme = scheme();
        assert_eq!(scheme.get_gradient("legacy", 100.0), Ok(Color::from_cterm(160)));
    }

    #[test]
    fn test_interpolated_gradient_endpoints() {
        let scheme = scheme();
        let low = scheme.get_gradient("battery", 0.0).unwrap();
        assert_eq!(low.rgb, Rgb::from_u32(0xd70000));
        assert_eq!(low.cterm, 160);

        let high = scheme.get_gradient("battery", 100.0).unwrap();
        assert_eq!(high.rgb, cterm_to_srgb(28));
        assert_eq!(high.cterm, 28);
    }

    #[test]
    fn test_interpolated_gradient_uses_cache() {
        let scheme = scheme();
        let first = scheme.get_gradient("battery", 42.0).unwrap();
        let scans = scheme.cache().scan_count();
        let second = scheme.get_gradient("battery", 42.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(scheme.cache().scan_count(), scans);
    }

    #[test]
    fn test_gradient_falls_back_to_color() {
        assert_eq!(
            scheme().get_gradient("red", 70.0),
            Ok(Color::new(1, Rgb(0xc0, 0, 0)))
        );
    }

    #[test]
    fn test_gradient_unknown_name() {
        assert_eq!(
            scheme().get_gradient("nope", 10.0),
            Err(HighlightError::UnknownColor {
                name: "nope".to_string()
            })
        );
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn test_validate_ok() {
        assert!(scheme().validate().is_ok());
    }

    #[test]
    fn test_validate_dangling_alias() {
        let scheme = Colorscheme::from_yaml("groups: { orphan: missing }", "colors: {}").unwrap();
        assert_eq!(
            scheme.validate(),
            Err(ValidationError::UnresolvedAlias {
                from: "orphan".to_string(),
                to: "missing".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_cycle() {
        let scheme = Colorscheme::from_yaml("groups: { a: b, b: a }", "colors: {}").unwrap();
        match scheme.validate() {
            Err(ValidationError::CycleDetected { path }) => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("Expected CycleDetected, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_unknown_color() {
        let scheme = Colorscheme::from_yaml(
            "groups: { g: { fg: nope, bg: red } }",
            r#"colors: { red: [1, "c00000"] }"#,
        )
        .unwrap();
        assert_eq!(
            scheme.validate(),
            Err(ValidationError::UnknownColor {
                group: "g".to_string(),
                color: "nope".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_unknown_translated_color() {
        let scheme = Colorscheme::from_yaml(
            "groups: {}\nmode_translations: { visual: { colors: { red: purple } } }",
            r#"colors: { red: [1, "c00000"] }"#,
        )
        .unwrap();
        assert!(matches!(
            scheme.validate(),
            Err(ValidationError::UnknownTranslatedColor { .. })
        ));
    }

    #[test]
    fn test_validate_mode_alias_can_target_global_group() {
        let scheme = Colorscheme::from_yaml(
            r#"
            groups:
              error: { fg: red, bg: red }
            mode_translations:
              insert:
                groups: { warning: error }
            "#,
            r#"colors: { red: [1, "c00000"] }"#,
        )
        .unwrap();
        assert!(scheme.validate().is_ok());
    }
}
