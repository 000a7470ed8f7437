//! The colorscheme store.
//!
//! A [`Colorscheme`] owns everything needed to answer highlight requests:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | colors | color name | [`Color`] (palette index + RGB) |
//! | gradients | gradient name | [`Gradient`](crate::gradient::Gradient) |
//! | interpolated gradients | gradient name | [`InterpolatedGradient`](crate::gradient::InterpolatedGradient) |
//! | groups | group name | [`GroupRef`] (group or alias) |
//! | translations | mode name | [`ModeTranslation`] |
//!
//! All tables are filled once from [`ColorsConfig`](crate::config::ColorsConfig)
//! and [`GroupsConfig`](crate::config::GroupsConfig). Hex strings are parsed
//! and inline colors resolved at that point, so resolution never re-inspects
//! raw configuration.

mod colorscheme;
mod value;

pub use colorscheme::Colorscheme;
pub use value::{Attrs, Color, ColorRef, Group, GroupRef, ModeTranslation};
