// SPDX-License-Identifier: MIT
//
// Palettes: exact, bijective mappings between small integer indices and
// `Color` values. A palette never approximates — it either holds a
// color at an index or it doesn't. Approximation (choosing the closest
// index for an arbitrary `Color`) lives one layer up, in `quantize`.

use std::collections::HashMap;

use crate::color::Color;

/// A finite, exact index ↔ [`Color`] mapping.
///
/// Indices need not be contiguous, though the canonical constructors
/// ([`Palette::cga16`], [`Palette::xterm256`]) produce dense `0..n` ranges.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    forward: HashMap<u16, Color>,
    reverse: HashMap<Color, u16>,
}

impl Palette {
    /// An empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from `(index, color)` pairs.
    ///
    /// Later entries win on index collisions. Reverse lookup
    /// ([`Palette::index_of`]) resolves color collisions to the
    /// lowest colliding index, since the pairs are inserted in order
    /// and a `HashMap` reverse-insert only overwrites forward.
    #[must_use]
    pub fn from_entries<I: IntoIterator<Item = (u16, Color)>>(entries: I) -> Self {
        let mut palette = Self::new();
        for (idx, color) in entries {
            palette.set(idx, color);
        }
        palette
    }

    /// Insert or overwrite a single `(index, color)` pair.
    pub fn set(&mut self, index: u16, color: Color) {
        self.forward.insert(index, color);
        self.reverse.entry(color).or_insert(index);
    }

    /// The color at `index`, if any.
    #[must_use]
    pub fn color_at(&self, index: u16) -> Option<Color> {
        self.forward.get(&index).copied()
    }

    /// The index holding exactly `color`, if any.
    #[must_use]
    pub fn index_of(&self, color: Color) -> Option<u16> {
        self.reverse.get(&color).copied()
    }

    /// Number of entries in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate `(index, color)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Color)> + '_ {
        let mut entries: Vec<_> = self.forward.iter().map(|(&i, &c)| (i, c)).collect();
        entries.sort_unstable_by_key(|&(i, _)| i);
        entries.into_iter()
    }

    /// The classic 16-color CGA/ANSI palette: indices 0-7 are the dim
    /// colors, 8-15 their bright counterparts, in the conventional
    /// black/red/green/yellow/blue/magenta/cyan/white order.
    #[must_use]
    pub fn cga16() -> Self {
        const HEX: [&str; 16] = [
            "#000000", "#aa0000", "#00aa00", "#aa5500", "#0000aa", "#aa00aa", "#00aaaa", "#aaaaaa",
            "#555555", "#ff5555", "#55ff55", "#ffff55", "#5555ff", "#ff55ff", "#55ffff", "#ffffff",
        ];
        let entries = HEX
            .iter()
            .enumerate()
            .map(|(i, h)| (i as u16, Color::from_hex(h).expect("literal hex is valid")));
        Self::from_entries(entries)
    }

    /// The 256-color xterm palette: 0-15 mirror [`Palette::cga16`],
    /// 16-231 are a 6×6×6 RGB cube, 232-255 are a 24-step grayscale ramp.
    #[must_use]
    pub fn xterm256() -> Self {
        const STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

        let mut palette = Self::cga16();

        let mut idx = 16u16;
        for r in 0..6 {
            for g in 0..6 {
                for b in 0..6 {
                    palette.set(idx, Color::rgb(STEPS[r], STEPS[g], STEPS[b]));
                    idx += 1;
                }
            }
        }

        for i in 0u16..24 {
            let level = 8 + (i as u32) * 10;
            let level = level as u8;
            palette.set(232 + i, Color::rgb(level, level, level));
        }

        palette
    }
}
