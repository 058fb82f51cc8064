// SPDX-License-Identifier: MIT
//
// Lossy color reduction: map an arbitrary `Color` onto a `Palette`
// index. `Palette` itself only does exact lookups; everything
// approximate lives here.

use crate::color::Color;
use crate::palette::Palette;

/// A strategy for reducing an arbitrary [`Color`] to a [`Palette`] index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Only succeed on an exact color match.
    Exact,
    /// Nearest palette entry by squared RGB distance.
    NearestRgb,
    /// Nearest palette entry by weighted HSV distance (hue is weighted
    /// most heavily, matching how the eye perceives color difference).
    NearestHsv,
    /// Exactly two palette entries: pick the darker for colors below
    /// the luminance threshold, the brighter otherwise.
    Monochrome,
}

/// Errors produced by [`quantize`].
#[derive(Debug, thiserror::Error)]
pub enum QuantizeError {
    #[error("monochrome quantization requires exactly 2 palette entries, found {0}")]
    NotMonochrome(usize),
    #[error("palette is empty")]
    EmptyPalette,
}

/// Reduce `color` to an index in `palette` using `strategy`.
///
/// Returns `Ok(None)` when `Strategy::Exact` finds no matching entry —
/// that is a valid "no match" outcome, not an error. `Err` is reserved
/// for strategy preconditions the palette doesn't satisfy (e.g.
/// `Monochrome` on a palette that isn't exactly 2 entries).
pub fn quantize(color: Color, palette: &Palette, strategy: Strategy) -> Result<Option<u16>, QuantizeError> {
    match strategy {
        Strategy::Exact => Ok(quantize_exact(color, palette)),
        Strategy::NearestRgb => Ok(quantize_nearest_rgb(color, palette)),
        Strategy::NearestHsv => Ok(quantize_nearest_hsv(color, palette)),
        Strategy::Monochrome => quantize_monochrome(color, palette).map(Some),
    }
}

/// Exact color match, or `None` if the palette has no such entry.
#[must_use]
pub fn quantize_exact(color: Color, palette: &Palette) -> Option<u16> {
    palette.index_of(color)
}

/// The palette index whose color is closest by squared RGB distance.
#[must_use]
pub fn quantize_nearest_rgb(color: Color, palette: &Palette) -> Option<u16> {
    palette
        .iter()
        .min_by_key(|&(_, c)| color.distance_rgb(c))
        .map(|(idx, _)| idx)
}

/// The palette index whose color is closest by weighted HSV distance
/// (see [`Color::distance_hsv`]).
#[must_use]
pub fn quantize_nearest_hsv(color: Color, palette: &Palette) -> Option<u16> {
    palette
        .iter()
        .min_by(|&(_, a), &(_, b)| {
            color
                .distance_hsv(a)
                .partial_cmp(&color.distance_hsv(b))
                .expect("distance_hsv never produces NaN for finite colors")
        })
        .map(|(idx, _)| idx)
}

/// Pick between exactly two palette entries by luminance threshold:
/// the darker entry below `threshold`, the brighter one at or above it.
pub fn quantize_monochrome(color: Color, palette: &Palette) -> Result<u16, QuantizeError> {
    quantize_monochrome_threshold(color, palette, 127.5)
}

/// [`quantize_monochrome`] with an explicit luminance threshold.
pub fn quantize_monochrome_threshold(
    color: Color,
    palette: &Palette,
    threshold: f64,
) -> Result<u16, QuantizeError> {
    let mut entries: Vec<_> = palette.iter().collect();
    if entries.len() != 2 {
        return Err(QuantizeError::NotMonochrome(entries.len()));
    }
    entries.sort_unstable_by_key(|&(idx, _)| idx);
    let (dark, bright) = (entries[0].0, entries[1].0);
    Ok(if color.luminance() < threshold { dark } else { bright })
}
