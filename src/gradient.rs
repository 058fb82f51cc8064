// SPDX-License-Identifier: MIT
//
// Gradient colorization: paint an ordered color sequence across a
// screen's already-written cells, by column, row, diagonal, or in
// sequence across printable "words".

use crate::cell::ColorField;
use crate::color::Color;
use crate::screen::Screen;

/// Direction of a diagonal gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// Top-left to bottom-right.
    TopLeftToBottomRight,
    /// Top-right to bottom-left.
    TopRightToBottomLeft,
}

/// Which gradient traversal to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Horizontal,
    Vertical,
    Diagonal(Diagonal),
    Words,
}

/// Errors from [`colorize`].
#[derive(Debug, thiserror::Error)]
pub enum GradientError {
    #[error("colorize mode {0:?} is not recognized")]
    UnknownMode(String),
}

/// Options controlling how a gradient is applied.
#[derive(Debug, Clone, Copy)]
pub struct ColorizeOptions {
    pub foreground: bool,
    pub background: bool,
    /// Skip cells whose `char` is `None`.
    pub only_if_set: bool,
    /// When set, blend the gradient color into the existing field
    /// rather than overwriting it outright.
    pub tint: Option<f64>,
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            foreground: true,
            background: false,
            only_if_set: true,
            tint: None,
        }
    }
}

/// Apply `gradient` to `screen` using `mode` and `options`.
pub fn colorize(screen: &mut Screen, gradient: &[Color], mode: Mode, options: ColorizeOptions) {
    if gradient.is_empty() {
        return;
    }
    match mode {
        Mode::Horizontal => apply_horizontal(screen, gradient, options),
        Mode::Vertical => apply_vertical(screen, gradient, options),
        Mode::Diagonal(direction) => apply_diagonal(screen, gradient, direction, options),
        Mode::Words => apply_words(screen, gradient, options),
    }
}

/// Parse a mode name the way the original tool's `colorize()` dispatcher
/// accepted aliases, for callers driving this from configuration text.
///
/// # Errors
///
/// Returns [`GradientError::UnknownMode`] for anything but
/// `hgrad`/`horizontal`, `vgrad`/`vertical`, `dgrad`/`diag`/`diagonal`
/// (optionally suffixed `:tlbr`/`:trbl`), or `words`.
pub fn parse_mode(name: &str) -> Result<Mode, GradientError> {
    let name = name.trim().to_ascii_lowercase();
    match name.as_str() {
        "hgrad" | "horizontal" => Ok(Mode::Horizontal),
        "vgrad" | "vertical" => Ok(Mode::Vertical),
        "dgrad" | "diag" | "diagonal" => Ok(Mode::Diagonal(Diagonal::TopLeftToBottomRight)),
        "dgrad:trbl" | "diag:trbl" | "diagonal:trbl" => Ok(Mode::Diagonal(Diagonal::TopRightToBottomLeft)),
        "words" => Ok(Mode::Words),
        other => Err(GradientError::UnknownMode(other.to_string())),
    }
}

fn apply_field(screen: &mut Screen, x: i64, y: i64, color: Color, options: &ColorizeOptions) {
    let Some(cell) = screen.get_cell(x, y) else { return };
    if options.only_if_set && cell.char.is_none() {
        return;
    }
    let mut next = cell;
    if options.foreground {
        next.fg = blended(color, cell.fg, options.tint);
    }
    if options.background {
        next.bg = blended(color, cell.bg, options.tint);
    }
    screen.set_cell(x, y, next);
}

fn blended(color: Color, existing: ColorField, tint: Option<f64>) -> ColorField {
    match tint {
        None => ColorField::Concrete(color),
        Some(t) => {
            let base = existing.resolve(color);
            ColorField::Concrete(color.blend(base, t))
        }
    }
}

fn apply_horizontal(screen: &mut Screen, gradient: &[Color], options: ColorizeOptions) {
    let width = screen.width() as i64;
    if width <= 1 {
        return;
    }
    let n = gradient.len() as i64;
    for y in 0..screen.height() as i64 {
        for x in 0..width {
            let idx = (x * (n - 1) / (width - 1)).clamp(0, n - 1);
            apply_field(screen, x, y, gradient[idx as usize], &options);
        }
    }
}

fn apply_vertical(screen: &mut Screen, gradient: &[Color], options: ColorizeOptions) {
    let height = screen.height() as i64;
    if height <= 1 {
        return;
    }
    let n = gradient.len() as i64;
    for y in 0..height {
        let idx = (y * (n - 1) / (height - 1)).clamp(0, n - 1);
        let color = gradient[idx as usize];
        for x in 0..screen.width() as i64 {
            apply_field(screen, x, y, color, &options);
        }
    }
}

fn apply_diagonal(screen: &mut Screen, gradient: &[Color], direction: Diagonal, options: ColorizeOptions) {
    let width = screen.width() as i64;
    let height = screen.height() as i64;
    if width <= 1 || height <= 1 {
        return;
    }
    let denom = (width - 1) + (height - 1);
    if denom <= 0 {
        return;
    }
    let n = gradient.len() as i64;
    for y in 0..height {
        for x in 0..width {
            let d = match direction {
                Diagonal::TopLeftToBottomRight => x + y,
                Diagonal::TopRightToBottomLeft => (width - 1 - x) + y,
            };
            let idx = (d * (n - 1) / denom).clamp(0, n - 1);
            apply_field(screen, x, y, gradient[idx as usize], &options);
        }
    }
}

fn apply_words(screen: &mut Screen, gradient: &[Color], options: ColorizeOptions) {
    let n = gradient.len() as i64;
    let mut idx = 0i64;
    for y in 0..screen.height() as i64 {
        for x in 0..screen.width() as i64 {
            let Some(cell) = screen.get_cell(x, y) else { continue };
            let Some(ch) = cell.char else { continue };
            if ch == ' ' {
                idx = 0;
                continue;
            }
            let color = gradient[idx.min(n - 1) as usize];
            apply_field(screen, x, y, color, &options);
            idx += 1;
        }
    }
}
