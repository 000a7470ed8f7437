//! Configuration documents consumed by [`Colorscheme`](crate::Colorscheme).
//!
//! A colorscheme is built from two independent documents:
//!
//! - [`ColorsConfig`]: the palette. Named colors, discrete gradients and
//!   (optionally) interpolated gradients.
//! - [`GroupsConfig`]: highlight groups and per-mode translations.
//!
//! Both are plain serde types. Loading them from disk is left to the caller;
//! `from_yaml` / `from_json` helpers parse documents already in memory.
//!
//! ## Palette format
//!
//! ```yaml
//! colors:
//!   red: [1, "c00000"]      # palette index + hex
//!   gray: 244               # palette index only, RGB from the xterm table
//! gradients:
//!   load: [[22, 28, 160], ["005f00", "008700", "d70000"]]
//!   legacy: [[22, 28, 160]] # RGB derived from the indices
//! interpolated_gradients:
//!   battery: [[0.0, "d70000"], [0.5, "ffaf00"], [1.0, 28]]
//! ```
//!
//! ## Group format
//!
//! ```yaml
//! groups:
//!   error: { fg: red, bg: gray, attrs: [bold] }
//!   warning: error          # alias
//!   inline: { fg: [4, "0000c0"], bg: 236 }
//! mode_translations:
//!   visual:
//!     colors: { red: blue }
//!     groups:
//!       warning: { fg: gray, bg: red }
//! ```

mod colors;
mod groups;

pub use colors::{ColorValue, ColorsConfig, GradientList, StopColor};
pub use groups::{ColorRefValue, GroupDef, GroupValue, GroupsConfig, ModeTranslationConfig};
