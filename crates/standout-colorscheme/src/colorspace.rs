//! Conversions between the 256-color terminal palette, 24-bit sRGB and CIE LAB.
//!
//! # Two color spaces at once
//!
//! Every color a colorscheme hands out carries two representations: a
//! 256-color palette index ("cterm") for terminals that only understand the
//! xterm palette, and a packed 24-bit [`Rgb`] value for true-color terminals.
//! Going from cterm to RGB is a table lookup ([`cterm_to_srgb`]). Going the
//! other way is a search: the palette entry that *looks* closest to the RGB
//! value wins.
//!
//! # Why CIE LAB?
//!
//! Euclidean distance in RGB does not match perceived difference: two greens
//! that are far apart numerically may look nearly identical while a small step
//! in blue is obvious. LAB approximates a perceptually uniform space, so the
//! Euclidean distance there (delta-E) is a much better "looks closest" metric.
//!
//! The conversion used here is deliberately simple and matches existing
//! status-line colorschemes: channels are normalized to `0.0..=1.0` without
//! gamma decoding, multiplied by the sRGB → XYZ matrix, then mapped to LAB
//! against the reference white `(94.811, 100.0, 107.304)`.
//!
//! # Memoization
//!
//! A nearest-color search scans all 256 palette entries. Gradients produce
//! many distinct RGB values, so results are memoized in a
//! [`NearestColorCache`], an explicit, thread-safe object that a
//! [`Colorscheme`](crate::Colorscheme) owns or shares.
//!
//! ```rust
//! use standout_colorscheme::colorspace::{cterm_to_srgb, NearestColorCache, Rgb};
//!
//! assert_eq!(cterm_to_srgb(1), Rgb(0xc0, 0x00, 0x00));
//!
//! let cache = NearestColorCache::new();
//! assert_eq!(cache.srgb_to_cterm(Rgb(0xc0, 0x00, 0x00)), 1);
//! assert_eq!(cache.srgb_to_cterm(Rgb(0xc0, 0x00, 0x00)), 1);
//! assert_eq!(cache.scan_count(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── RGB type ───────────────────────────────────────────────────────────────

/// A 24-bit sRGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Unpacks a `0xRRGGBB` integer. Bits above the low 24 are ignored.
    pub const fn from_u32(packed: u32) -> Self {
        Rgb((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Packs the color as `0xRRGGBB`.
    pub const fn to_u32(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }

    /// Parses a hexadecimal color number such as `"c00000"` or `"#c00000"`.
    ///
    /// The digits are read as a single packed integer, so `"ff"` is
    /// `Rgb(0, 0, 255)`. At most six digits are accepted.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb::from_u32)
    }

    /// Channels normalized to `0.0..=1.0`.
    fn unpack(self) -> [f64; 3] {
        [
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        ]
    }

    /// Inverse of [`unpack`](Self::unpack); truncates each channel to 8 bits.
    fn pack(channels: [f64; 3]) -> Self {
        let quantize = |c: f64| (c * 255.0).clamp(0.0, 255.0) as u8;
        Rgb(
            quantize(channels[0]),
            quantize(channels[1]),
            quantize(channels[2]),
        )
    }

    /// Converts this color to CIE LAB (see the module docs for the exact transform).
    pub fn to_lab(self) -> Lab {
        let [r, g, b] = self.unpack();

        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = (x / XN).cbrt();
        let fy = (y / YN).cbrt();
        let fz = (z / ZN).cbrt();

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 300.0 * (fy - fz),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// ─── CIE LAB ────────────────────────────────────────────────────────────────

/// Reference white used for XYZ → LAB.
const XN: f64 = 94.811;
const YN: f64 = 100.0;
const ZN: f64 = 107.304;

/// A CIE LAB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Perceived color difference: the Euclidean distance between two LAB colors.
pub fn delta_e(a: &Lab, b: &Lab) -> f64 {
    ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
}

// ─── Palette table ──────────────────────────────────────────────────────────

/// The 256-color palette as packed sRGB.
#[rustfmt::skip]
const CTERM_TO_SRGB: [u32; 256] = [
    //    0         1         2         3         4         5         6         7         8         9
    0x000000, 0xc00000, 0x008000, 0x804000, 0x0000c0, 0xc000c0, 0x008080, 0xc0c0c0, 0x808080, 0xff6060, // 0
    0x00ff00, 0xffff00, 0x8080ff, 0xff40ff, 0x00ffff, 0xffffff, 0x000000, 0x00005f, 0x000087, 0x0000af, // 1
    0x0000d7, 0x0000ff, 0x005f00, 0x005f5f, 0x005f87, 0x005faf, 0x005fd7, 0x005fff, 0x008700, 0x00875f, // 2
    0x008787, 0x0087af, 0x0087d7, 0x0087ff, 0x00af00, 0x00af5f, 0x00af87, 0x00afaf, 0x00afd7, 0x00afff, // 3
    0x00d700, 0x00d75f, 0x00d787, 0x00d7af, 0x00d7d7, 0x00d7ff, 0x00ff00, 0x00ff5f, 0x00ff87, 0x00ffaf, // 4
    0x00ffd7, 0x00ffff, 0x5f0000, 0x5f005f, 0x5f0087, 0x5f00af, 0x5f00d7, 0x5f00ff, 0x5f5f00, 0x5f5f5f, // 5
    0x5f5f87, 0x5f5faf, 0x5f5fd7, 0x5f5fff, 0x5f8700, 0x5f875f, 0x5f8787, 0x5f87af, 0x5f87d7, 0x5f87ff, // 6
    0x5faf00, 0x5faf5f, 0x5faf87, 0x5fafaf, 0x5fafd7, 0x5fafff, 0x5fd700, 0x5fd75f, 0x5fd787, 0x5fd7af, // 7
    0x5fd7d7, 0x5fd7ff, 0x5fff00, 0x5fff5f, 0x5fff87, 0x5fffaf, 0x5fffd7, 0x5fffff, 0x870000, 0x87005f, // 8
    0x870087, 0x8700af, 0x8700d7, 0x8700ff, 0x875f00, 0x875f5f, 0x875f87, 0x875faf, 0x875fd7, 0x875fff, // 9
    0x878700, 0x87875f, 0x878787, 0x8787af, 0x8787d7, 0x8787ff, 0x87af00, 0x87af5f, 0x87af87, 0x87afaf, // 10
    0x87afd7, 0x87afff, 0x87d700, 0x87d75f, 0x87d787, 0x87d7af, 0x87d7d7, 0x87d7ff, 0x87ff00, 0x87ff5f, // 11
    0x87ff87, 0x87ffaf, 0x87ffd7, 0x87ffff, 0xaf0000, 0xaf005f, 0xaf0087, 0xaf00af, 0xaf00d7, 0xaf00ff, // 12
    0xaf5f00, 0xaf5f5f, 0xaf5f87, 0xaf5faf, 0xaf5fd7, 0xaf5fff, 0xaf8700, 0xaf875f, 0xaf8787, 0xaf87af, // 13
    0xaf87d7, 0xaf87ff, 0xafaf00, 0xafaf5f, 0xafaf87, 0xafafaf, 0xafafd7, 0xafafff, 0xafd700, 0xafd75f, // 14
    0xafd787, 0xafd7af, 0xafd7d7, 0xafd7ff, 0xafff00, 0xafff5f, 0xafff87, 0xafffaf, 0xafffd7, 0xafffff, // 15
    0xd70000, 0xd7005f, 0xd70087, 0xd700af, 0xd700d7, 0xd700ff, 0xd75f00, 0xd75f5f, 0xd75f87, 0xd75faf, // 16
    0xd75fd7, 0xd75fff, 0xd78700, 0xd7875f, 0xd78787, 0xd787af, 0xd787d7, 0xd787ff, 0xd7af00, 0xd7af5f, // 17
    0xd7af87, 0xd7afaf, 0xd7afd7, 0xd7afff, 0xd7d700, 0xd7d75f, 0xd7d787, 0xd7d7af, 0xd7d7d7, 0xd7d7ff, // 18
    0xd7ff00, 0xd7ff5f, 0xd7ff87, 0xd7ffaf, 0xd7ffd7, 0xd7ffff, 0xff0000, 0xff005f, 0xff0087, 0xff00af, // 19
    0xff00d7, 0xff00ff, 0xff5f00, 0xff5f5f, 0xff5f87, 0xff5faf, 0xff5fd7, 0xff5fff, 0xff8700, 0xff875f, // 20
    0xff8787, 0xff87af, 0xff87d7, 0xff87ff, 0xffaf00, 0xffaf5f, 0xffaf87, 0xffafaf, 0xffafd7, 0xffafff, // 21
    0xffd700, 0xffd75f, 0xffd787, 0xffd7af, 0xffd7d7, 0xffd7ff, 0xffff00, 0xffff5f, 0xffff87, 0xffffaf, // 22
    0xffffd7, 0xffffff, 0x080808, 0x121212, 0x1c1c1c, 0x262626, 0x303030, 0x3a3a3a, 0x444444, 0x4e4e4e, // 23
    0x585858, 0x626262, 0x6c6c6c, 0x767676, 0x808080, 0x8a8a8a, 0x949494, 0x9e9e9e, 0xa8a8a8, 0xb2b2b2, // 24
    0xbcbcbc, 0xc6c6c6, 0xd0d0d0, 0xdadada, 0xe4e4e4, 0xeeeeee,                                         // 25
];

/// LAB values of every palette entry, indexed like [`CTERM_TO_SRGB`].
static CTERM_TO_LAB: Lazy<Vec<Lab>> = Lazy::new(|| {
    CTERM_TO_SRGB
        .iter()
        .map(|&packed| Rgb::from_u32(packed).to_lab())
        .collect()
});

/// Returns the sRGB value of a palette index.
pub fn cterm_to_srgb(index: u8) -> Rgb {
    Rgb::from_u32(CTERM_TO_SRGB[usize::from(index)])
}

/// Finds the palette index perceptually closest to `rgb`, without caching.
///
/// Scans all 256 entries; ties go to the lowest index.
pub fn nearest_cterm(rgb: Rgb) -> u8 {
    let lab = rgb.to_lab();
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, candidate) in CTERM_TO_LAB.iter().enumerate() {
        let distance = delta_e(&lab, candidate);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best as u8
}

// ─── Nearest-color cache ────────────────────────────────────────────────────

/// Memoizes [`nearest_cterm`] results, keyed by the RGB input.
///
/// Entries are never evicted. The cache is safe to share between threads;
/// two threads racing on the same key both compute the same index and one
/// write wins, which is harmless.
#[derive(Debug, Default)]
pub struct NearestColorCache {
    entries: RwLock<HashMap<Rgb, u8>>,
    scans: AtomicUsize,
}

impl NearestColorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the palette index closest to `rgb`, scanning the palette only
    /// the first time a given value is seen.
    pub fn srgb_to_cterm(&self, rgb: Rgb) -> u8 {
        if let Some(&index) = self.read().get(&rgb) {
            return index;
        }

        let index = nearest_cterm(rgb);
        self.scans.fetch_add(1, Ordering::Relaxed);
        debug!(rgb = %rgb, cterm = index, "computed nearest palette color");

        *self.write().entry(rgb).or_insert(index)
    }

    /// Number of palette scans performed so far (i.e. cache misses).
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Number of memoized colors.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map only ever holds complete entries, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Rgb, u8>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Rgb, u8>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ─── Interpolation ──────────────────────────────────────────────────────────

/// Gamma used to linearize channels before blending.
const GAMMA: f64 = 2.2;

/// Gamma-correct linear interpolation between two colors.
///
/// `x = 0.0` yields `a` and `x = 1.0` yields `b`, each to within one channel
/// step: channels are truncated when repacked, so the gamma round trip can
/// land just below the input. Blending happens on gamma-decoded channels.
pub fn srgb_lerp(a: Rgb, b: Rgb, x: f64) -> Rgb {
    let a = a.unpack().map(|c| c.powf(GAMMA));
    let b = b.unpack().map(|c| c.powf(GAMMA));

    let mut mixed = [0.0; 3];
    for (i, channel) in mixed.iter_mut().enumerate() {
        let linear = (1.0 - x) * a[i] + x * b[i];
        *channel = linear.max(0.0).powf(1.0 / GAMMA);
    }

    Rgb::pack(mixed)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
