// SPDX-License-Identifier: MIT
//
// Region operations: clear/copy/cut/paste over rectangular sub-regions
// of a Screen. Not part of the minimal Screen op set but present in the
// system this crate's model is drawn from, and useful enough (moving
// and compositing regions) to carry forward in the same idiom as the
// rest of the Screen API.

use crate::cell::{Cell, ColorField, DEFAULT_BG};
use crate::error::{Error, Result};
use crate::screen::Screen;

/// A region of a screen, in cell coordinates, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Region {
    #[must_use]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    /// The whole screen as a region.
    #[must_use]
    pub fn whole(screen: &Screen) -> Self {
        Self::new(0, 0, screen.width() as i64, screen.height() as i64)
    }
}

/// Flags controlling which fields `paste` treats as "see-through" —
/// where it leaves the destination cell's existing field untouched
/// instead of overwriting it from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transparency {
    /// A source cell whose `char` equals this is left untouched in the
    /// destination (its char, fg, bg, attrs are all skipped).
    pub transparent_char: Option<char>,
    pub fg: bool,
    pub bg: bool,
    pub attrs: bool,
}

/// Replace every cell in `region` with [`Cell::EMPTY`], except that
/// `bg` is set to concrete black rather than inheriting — matching the
/// asymmetry `Cell::EMPTY` itself already embeds, made explicit here
/// because a clear is a deliberate repaint, not an unwritten cell.
///
/// # Errors
///
/// Returns [`Error::BadConfig`] if `region` has non-positive width or height.
pub fn clear(screen: &mut Screen, region: Region) -> Result<()> {
    if region.width <= 0 || region.height <= 0 {
        return Err(Error::bad_config("clear region must have positive width and height"));
    }
    let cleared = Cell::styled(None, ColorField::Inherit, ColorField::Concrete(DEFAULT_BG), crate::cell::Attr::empty());
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            screen.set_cell(x, y, cleared);
        }
    }
    Ok(())
}

/// Deep-copy `region` out of `screen` into a freshly created screen of
/// matching dimensions.
///
/// # Errors
///
/// Returns [`Error::BadConfig`] if `region` has non-positive width or height.
pub fn copy(screen: &Screen, region: Region) -> Result<Screen> {
    if region.width <= 0 || region.height <= 0 {
        return Err(Error::bad_config("copy region must have positive width and height"));
    }
    let mut out = Screen::new(region.width as usize)?;
    for dy in 0..region.height {
        for dx in 0..region.width {
            let cell = screen.get_cell(region.x + dx, region.y + dy).unwrap_or(Cell::EMPTY);
            out.set_cell(dx, dy, cell);
        }
    }
    Ok(out)
}

/// [`copy`] followed by [`clear`] of the same region.
///
/// # Errors
///
/// Returns [`Error::BadConfig`] if `region` has non-positive width or height.
pub fn cut(screen: &mut Screen, region: Region) -> Result<Screen> {
    let copied = copy(screen, region)?;
    clear(screen, region)?;
    Ok(copied)
}

/// Composite `src` onto `dst` at `(dst_x, dst_y)`, respecting `transparency`.
pub fn paste(dst: &mut Screen, src: &Screen, dst_x: i64, dst_y: i64, transparency: Transparency) {
    for sy in 0..src.height() as i64 {
        for sx in 0..src.width() as i64 {
            let Some(source_cell) = src.get_cell(sx, sy) else { continue };
            if transparency.transparent_char.is_some() && source_cell.char == transparency.transparent_char {
                continue;
            }
            let (x, y) = (dst_x + sx, dst_y + sy);
            let existing = dst.get_cell(x, y).unwrap_or(Cell::EMPTY);
            let merged = Cell::styled(
                source_cell.char.or(existing.char),
                if transparency.fg { existing.fg } else { source_cell.fg },
                if transparency.bg { existing.bg } else { source_cell.bg },
                if transparency.attrs { existing.attrs } else { source_cell.attrs },
            );
            dst.set_cell(x, y, merged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_rejects_degenerate_region() {
        let mut screen = Screen::new(4).unwrap();
        assert!(clear(&mut screen, Region::new(0, 0, 0, 2)).is_err());
    }

    #[test]
    fn clear_paints_concrete_black_background() {
        let mut screen = Screen::new(4).unwrap();
        screen.put_text("abcd");
        clear(&mut screen, Region::new(0, 0, 4, 1)).unwrap();
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, None);
        assert_eq!(cell.bg, ColorField::Concrete(DEFAULT_BG));
        assert_eq!(cell.fg, ColorField::Inherit);
    }

    #[test]
    fn copy_extracts_a_region_verbatim() {
        let mut screen = Screen::new(4).unwrap();
        screen.put_text("abcd");
        let copied = copy(&screen, Region::new(1, 0, 2, 1)).unwrap();
        assert_eq!(copied.get_cell(0, 0).unwrap().char, Some('b'));
        assert_eq!(copied.get_cell(1, 0).unwrap().char, Some('c'));
    }

    #[test]
    fn cut_clears_the_source_region() {
        let mut screen = Screen::new(4).unwrap();
        screen.put_text("abcd");
        let cut_out = cut(&mut screen, Region::new(1, 0, 2, 1)).unwrap();
        assert_eq!(cut_out.get_cell(0, 0).unwrap().char, Some('b'));
        let cleared = screen.get_cell(1, 0).unwrap();
        assert_eq!(cleared.char, None);
        assert_eq!(cleared.bg, ColorField::Concrete(DEFAULT_BG));
        assert_eq!(cleared.fg, ColorField::Inherit);
    }

    #[test]
    fn copy_then_paste_reproduces_the_region_verbatim() {
        let mut screen = Screen::new(4).unwrap();
        screen.put_text("abcd");
        let copied = copy(&screen, Region::new(1, 0, 2, 1)).unwrap();

        let mut dst = Screen::new(2).unwrap();
        paste(&mut dst, &copied, 0, 0, Transparency::default());
        assert_eq!(dst.get_cell(0, 0).unwrap().char, Some('b'));
        assert_eq!(dst.get_cell(1, 0).unwrap().char, Some('c'));
    }

    #[test]
    fn paste_composites_onto_destination() {
        let mut dst = Screen::new(4).unwrap();
        dst.put_text("XXXX");
        let mut src = Screen::new(2).unwrap();
        src.put_text("ab");
        paste(&mut dst, &src, 1, 0, Transparency::default());
        assert_eq!(dst.get_cell(0, 0).unwrap().char, Some('X'));
        assert_eq!(dst.get_cell(1, 0).unwrap().char, Some('a'));
        assert_eq!(dst.get_cell(2, 0).unwrap().char, Some('b'));
    }

    #[test]
    fn paste_respects_transparent_char() {
        use crate::color::Color;

        let dst_fg = ColorField::Concrete(Color::rgb(0, 255, 0));
        let dst_bg = ColorField::Concrete(Color::rgb(0, 0, 255));
        let src_fg = ColorField::Concrete(Color::rgb(255, 0, 0));
        let src_bg = ColorField::Concrete(Color::rgb(255, 255, 0));

        let mut dst = Screen::new(3).unwrap();
        for x in 0..3 {
            dst.set_cell(x, 0, Cell::styled(Some('X'), dst_fg, dst_bg, crate::cell::Attr::empty()));
        }
        let mut src = Screen::new(3).unwrap();
        src.set_cell(0, 0, Cell::styled(Some('a'), src_fg, src_bg, crate::cell::Attr::empty()));
        src.set_cell(1, 0, Cell::styled(Some(' '), src_fg, src_bg, crate::cell::Attr::empty()));
        src.set_cell(2, 0, Cell::styled(Some('c'), src_fg, src_bg, crate::cell::Attr::empty()));

        paste(
            &mut dst,
            &src,
            0,
            0,
            Transparency {
                transparent_char: Some(' '),
                ..Default::default()
            },
        );

        // untouched middle cell: char, fg, and bg all still the dest's own.
        let middle = dst.get_cell(1, 0).unwrap();
        assert_eq!(middle.char, Some('X'));
        assert_eq!(middle.fg, dst_fg);
        assert_eq!(middle.bg, dst_bg);

        // overwritten cells: char and colors both come from the source.
        let first = dst.get_cell(0, 0).unwrap();
        assert_eq!(first.char, Some('a'));
        assert_eq!(first.fg, src_fg);
        assert_eq!(first.bg, src_bg);
    }
}
