//! # Standout Colorscheme - Highlight Group Resolution
//!
//! `standout-colorscheme` turns abstract highlight requests ("draw this as
//! `branch_clean`, falling back to `branch`") into concrete display
//! attributes: a foreground and background color, each carried both as a
//! 256-color palette index and as 24-bit RGB, plus bold/italic/underline flags.
//!
//! ## Core Concepts
//!
//! - [`Colorscheme`]: Colors, gradients, groups and mode translations, built once
//! - [`get_highlighting`](Colorscheme::get_highlighting): Resolve candidate groups
//! - [`Gradient`] / [`InterpolatedGradient`]: Level-driven colors (0–100)
//! - [`ModeTranslation`]: Per-mode group overrides and color substitutions
//! - [`colorspace`]: Palette table, CIE LAB nearest-color search, gamma blending
//!
//! ## Quick Start
//!
//! ```rust
//! use standout_colorscheme::{Attrs, Colorscheme};
//!
//! let colors = r#"
//! colors:
//!   red: [1, "c00000"]
//!   blue: [4, "0000c0"]
//!   black: 16
//! gradients:
//!   load: [[22, 28, 160], ["005f00", "008700", "d70000"]]
//! "#;
//!
//! let groups = r#"
//! groups:
//!   error: { fg: red, bg: black, attrs: [bold] }
//!   warning: error
//!   cpu: { fg: load, bg: black }
//! mode_translations:
//!   visual:
//!     colors: { red: blue }
//! "#;
//!
//! let scheme = Colorscheme::from_yaml(groups, colors).unwrap();
//!
//! let hl = scheme.get_highlighting(&["warning"], None, None).unwrap();
//! assert_eq!(hl.fg.cterm, 1);
//! assert!(hl.attrs.contains(Attrs::BOLD));
//!
//! let hl = scheme.get_highlighting(&["warning"], Some("visual"), None).unwrap();
//! assert_eq!(hl.fg.cterm, 4);
//!
//! let hl = scheme.get_highlighting(&["cpu"], None, Some(100.0)).unwrap();
//! assert_eq!(hl.fg.rgb.to_u32(), 0xd70000);
//! ```
//!
//! ## Configuration
//!
//! Schemes are built from two documents, a palette ([`ColorsConfig`]) and a
//! group table ([`GroupsConfig`]), in YAML or JSON. See [`config`] for the
//! accepted shapes.
//!
//! ## Rendering
//!
//! [`HighlightResult::to_console_style`] bridges a result to a
//! [`console::Style`] for direct terminal output.

pub mod colorspace;
pub mod config;
mod error;
pub mod gradient;
mod highlight;
pub mod scheme;

pub use error::{ConfigError, HighlightError, ValidationError};

pub use scheme::{Attrs, Color, ColorRef, Colorscheme, Group, GroupRef, ModeTranslation};

pub use highlight::HighlightResult;

pub use config::{ColorsConfig, GroupsConfig};

pub use colorspace::{cterm_to_srgb, srgb_lerp, NearestColorCache, Rgb};

pub use gradient::{
    pick_gradient_value, pick_interpolated_gradient, Gradient, InterpolatedGradient,
};
