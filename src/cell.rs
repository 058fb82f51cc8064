// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of the document model.
//
// Every character position in a Screen is a Cell. It holds an optional
// Unicode codepoint, foreground and background color fields, and a
// text-attribute bitmask. The entire rendering pipeline exists to
// produce, diff, and emit these.
//
// Inherit vs concrete:
//
//   A cell's fg/bg are `ColorField`, not `Option<Color>` with a single
//   "unset" meaning. `ColorField::Inherit` means "use whatever the
//   emitter's current state already is" — the same thing a raw ANSI
//   stream means when it never issues an SGR color code. A bare
//   `Option<Color>` would conflate "inherit" with "explicitly reset to
//   terminal default", which are different instructions. This keeps
//   the emitter's per-cell compile rule total: every field always
//   says what to do, never "nothing in particular".
//
//   `Cell::default()` deliberately sets `bg` to a *concrete* black
//   rather than `Inherit`, while `fg` defaults to `Inherit`. That
//   asymmetry is intentional, not an oversight: clearing a region of
//   screen should paint the background, not leave stale terminal
//   state showing through, while leaving the foreground unset lets
//   unwritten cells pick up whatever color preceded them.

use crate::color::Color;

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters
    /// in the ANSI escape sequence standard.
    ///
    /// ```
    /// use ansi_screen::cell::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(style.contains(Attr::ITALIC));
    /// assert!(!style.contains(Attr::FAINT));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD      = 0x01;
        /// SGR 2 — decreased intensity (faint). Suppressed in DOS emission mode.
        const FAINT     = 0x02;
        /// SGR 3 — italic or oblique.
        const ITALIC    = 0x04;
        /// SGR 4 — underline.
        const UNDERLINE = 0x08;
        /// SGR 5 — blink. Suppressed in ICE color mode (the bit is repurposed
        /// for bright background).
        const BLINK     = 0x10;
        /// SGR 7 — swap foreground and background.
        const INVERSE   = 0x20;
        /// SGR 8 — invisible text.
        const CONCEAL   = 0x40;
        /// SGR 9 — crossed-out text.
        const STRIKE    = 0x80;
    }
}

impl Attr {
    /// Whether no attributes are set.
    #[inline]
    #[must_use]
    pub const fn is_empty_flags(self) -> bool {
        self.bits() == 0
    }
}

/// How a cell's color field should be resolved at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    /// Inherit whatever color the emitter currently has in effect.
    Inherit,
    /// Use exactly this color.
    Concrete(Color),
}

impl ColorField {
    /// The concrete color, or `default` if this field inherits.
    #[inline]
    #[must_use]
    pub fn resolve(self, default: Color) -> Color {
        match self {
            Self::Inherit => default,
            Self::Concrete(c) => c,
        }
    }

    /// Whether this field is `Inherit`.
    #[inline]
    #[must_use]
    pub const fn is_inherit(self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl From<Color> for ColorField {
    fn from(c: Color) -> Self {
        Self::Concrete(c)
    }
}

impl Default for ColorField {
    fn default() -> Self {
        Self::Inherit
    }
}

/// The terminal default foreground: CGA index 7, light gray.
pub const DEFAULT_FG: Color = Color::rgb(0xaa, 0xaa, 0xaa);

/// The terminal default background: CGA index 0, black.
pub const DEFAULT_BG: Color = Color::rgb(0x00, 0x00, 0x00);

/// A single cell in the document grid: a character, two color fields,
/// and a text-attribute mask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character occupying this cell, or `None` for an untouched cell.
    pub char: Option<char>,
    /// Foreground color field.
    pub fg: ColorField,
    /// Background color field.
    pub bg: ColorField,
    /// Text attributes.
    pub attrs: Attr,
}

/// Per-field change mask returned by [`Cell::diff`].
pub mod diff_bits {
    pub const CHAR: u8 = 0b0001;
    pub const FG: u8 = 0b0010;
    pub const BG: u8 = 0b0100;
    pub const ATTRS: u8 = 0b1000;
}

impl Cell {
    /// A brand-new, untouched cell: no character, foreground inherits,
    /// background is concrete black, no attributes.
    pub const EMPTY: Self = Self {
        char: None,
        fg: ColorField::Inherit,
        bg: ColorField::Concrete(DEFAULT_BG),
        attrs: Attr::empty(),
    };

    /// A cell holding just a character, otherwise identical to [`Cell::EMPTY`].
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            char: Some(ch),
            ..Self::EMPTY
        }
    }

    /// A fully specified cell.
    #[must_use]
    pub const fn styled(char: Option<char>, fg: ColorField, bg: ColorField, attrs: Attr) -> Self {
        Self { char, fg, bg, attrs }
    }

    /// Set the character, returning a new cell.
    #[inline]
    #[must_use]
    pub const fn with_char(self, char: Option<char>) -> Self {
        Self { char, ..self }
    }

    /// Set the foreground color field, returning a new cell.
    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: ColorField) -> Self {
        Self { fg, ..self }
    }

    /// Set the background color field, returning a new cell.
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: ColorField) -> Self {
        Self { bg, ..self }
    }

    /// Set the attributes, returning a new cell.
    #[inline]
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }

    /// Reset this cell to [`Cell::EMPTY`] in place.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// A 4-bit mask of which fields differ from `other`: bit 0 char, bit
    /// 1 fg, bit 2 bg, bit 3 attrs. A zero result means the cells are
    /// identical in every field the renderer cares about.
    #[must_use]
    pub fn diff(self, other: Self) -> u8 {
        let mut mask = 0u8;
        if self.char != other.char {
            mask |= diff_bits::CHAR;
        }
        if self.fg != other.fg {
            mask |= diff_bits::FG;
        }
        if self.bg != other.bg {
            mask |= diff_bits::BG;
        }
        if self.attrs != other.attrs {
            mask |= diff_bits::ATTRS;
        }
        mask
    }

    #[inline]
    #[must_use]
    pub fn char_changed(self, other: Self) -> bool {
        self.diff(other) & diff_bits::CHAR != 0
    }

    #[inline]
    #[must_use]
    pub fn fg_changed(self, other: Self) -> bool {
        self.diff(other) & diff_bits::FG != 0
    }

    #[inline]
    #[must_use]
    pub fn bg_changed(self, other: Self) -> bool {
        self.diff(other) & diff_bits::BG != 0
    }

    #[inline]
    #[must_use]
    pub fn attrs_changed(self, other: Self) -> bool {
        self.diff(other) & diff_bits::ATTRS != 0
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?}", self.char)?;
        if !self.fg.is_inherit() {
            write!(f, ", fg={:?}", self.fg)?;
        }
        if self.bg != ColorField::Concrete(DEFAULT_BG) {
            write!(f, ", bg={:?}", self.bg)?;
        }
        if !self.attrs.is_empty_flags() {
            write!(f, ", {:?}", self.attrs)?;
        }
        write!(f, ")")
    }
}
