// SPDX-License-Identifier: MIT
//
// Screen — a fixed-width, monotonically growing grid of cells, plus the
// cursor and graphics state an ANSI stream expects to mutate.
//
// Rows never shrink except through a full `cls`. `current_fg`/
// `current_bg`/`current_attrs` are always concrete: they are the
// running graphics state a parser or a caller has built up via SGR-like
// calls, and every `put_char` stamps them onto the cell it writes. A
// `Cell`'s own `Inherit` field is a different thing — it means "this
// particular cell never had that channel painted", which only
// `put_cell` and drawing ops can produce.

use log::trace;

use crate::cell::{Attr, Cell, ColorField, DEFAULT_BG, DEFAULT_FG};
use crate::color::Color;
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// A growing grid of [`Cell`]s with ANSI-style cursor and graphics state.
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    rows: Vec<Vec<Cell>>,
    cursor: Cursor,
    current_fg: Color,
    current_bg: Color,
    current_attrs: Attr,
}

impl Screen {
    /// Create an empty screen of the given width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadConfig`] if `width` is 0.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::bad_config("screen width must be > 0"));
        }
        Ok(Self {
            width,
            rows: Vec::new(),
            cursor: Cursor::new(),
            current_fg: DEFAULT_FG,
            current_bg: DEFAULT_BG,
            current_attrs: Attr::empty(),
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn current_fg(&self) -> Color {
        self.current_fg
    }

    #[inline]
    #[must_use]
    pub fn current_bg(&self) -> Color {
        self.current_bg
    }

    #[inline]
    #[must_use]
    pub fn current_attrs(&self) -> Attr {
        self.current_attrs
    }

    fn ensure_row(&mut self, y: usize) {
        if y >= self.rows.len() {
            self.rows.resize(y + 1, vec![Cell::EMPTY; self.width]);
        }
    }

    fn clamp_x(&self, x: i64) -> i64 {
        x.clamp(0, self.width as i64 - 1)
    }

    // ── Cell access ─────────────────────────────────────────────────

    /// The cell at `(x, y)`, or `None` if `x` is out of bounds or the
    /// row hasn't been grown yet.
    #[must_use]
    pub fn get_cell(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || x as usize >= self.width || y < 0 {
            return None;
        }
        self.rows.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Write a cell verbatim, without touching graphics state.
    ///
    /// Out-of-range `x` is a silent no-op. `y >= height` grows the
    /// screen's rows on demand.
    pub fn set_cell(&mut self, x: i64, y: i64, cell: Cell) {
        if x < 0 || x as usize >= self.width || y < 0 {
            return;
        }
        self.ensure_row(y as usize);
        self.rows[y as usize][x as usize] = cell;
    }

    /// Equivalent to [`Screen::set_cell`], kept as a distinct name to
    /// mirror the "writing" operation group.
    #[inline]
    pub fn put_cell(&mut self, x: i64, y: i64, cell: Cell) {
        self.set_cell(x, y, cell);
    }

    // ── Writing ─────────────────────────────────────────────────────

    /// Write one character at the cursor using the current graphics
    /// state, then advance the cursor, wrapping to the next row at the
    /// right edge.
    pub fn put_char(&mut self, ch: char) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        self.set_cell(
            x,
            y,
            Cell::styled(
                Some(ch),
                ColorField::Concrete(self.current_fg),
                ColorField::Concrete(self.current_bg),
                self.current_attrs,
            ),
        );
        self.cursor.x += 1;
        if self.cursor.x >= self.width as i64 {
            self.cursor.x = 0;
            self.cursor.y += 1;
        }
    }

    /// [`Screen::put_char`], but first verifies `s` holds exactly one
    /// code point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadInput`] if `s` is empty or holds more than
    /// one `char`.
    pub fn put_char_str(&mut self, s: &str) -> Result<()> {
        let mut chars = s.chars();
        let first = chars
            .next()
            .ok_or_else(|| Error::bad_input("put_char requires exactly one code point, got none"))?;
        if chars.next().is_some() {
            return Err(Error::bad_input("put_char requires exactly one code point, got more"));
        }
        self.put_char(first);
        Ok(())
    }

    /// Write a run of text: `\n` becomes [`Screen::newline`], `\r`
    /// becomes [`Screen::carriage_return`], everything else is written
    /// one code point at a time via [`Screen::put_char`].
    pub fn put_text(&mut self, s: &str) {
        for ch in s.chars() {
            match ch {
                '\n' => self.newline(),
                '\r' => self.carriage_return(),
                _ => self.put_char(ch),
            }
        }
    }

    // ── Cursor / positioning ────────────────────────────────────────

    pub fn cursor_goto(&mut self, x: i64, y: i64) {
        self.cursor.x = self.clamp_x(x);
        self.cursor.y = y.max(0);
        if self.cursor.y as usize >= self.rows.len() {
            self.ensure_row(self.cursor.y as usize);
        }
    }

    pub fn cursor_up(&mut self, n: i64) {
        self.cursor.y = (self.cursor.y - n).max(0);
    }

    pub fn cursor_down(&mut self, n: i64) {
        self.cursor.y += n;
        self.ensure_row(self.cursor.y as usize);
    }

    pub fn cursor_forward(&mut self, n: i64) {
        self.cursor.x = self.clamp_x(self.cursor.x + n);
    }

    pub fn cursor_back(&mut self, n: i64) {
        self.cursor.x = self.clamp_x(self.cursor.x - n);
    }

    pub fn cursor_next_line(&mut self, n: i64) {
        self.cursor_down(n);
        self.cursor.x = 0;
    }

    pub fn cursor_prev_line(&mut self, n: i64) {
        self.cursor_up(n);
        self.cursor.x = 0;
    }

    pub fn cursor_set_column(&mut self, x: i64) {
        self.cursor.x = self.clamp_x(x);
    }

    pub fn cursor_save(&mut self) {
        self.cursor.save();
    }

    pub fn cursor_restore(&mut self) {
        self.cursor.restore();
        self.cursor.x = self.clamp_x(self.cursor.x);
        self.cursor.y = self.cursor.y.max(0);
        self.ensure_row(self.cursor.y as usize);
    }

    pub fn carriage_return(&mut self) {
        self.cursor.x = 0;
    }

    pub fn line_feed(&mut self) {
        self.cursor.y += 1;
        self.ensure_row(self.cursor.y as usize);
    }

    pub fn newline(&mut self) {
        self.cursor.x = 0;
        self.line_feed();
    }

    // ── Graphics state ──────────────────────────────────────────────

    pub fn set_foreground(&mut self, color: Color) {
        self.current_fg = color;
    }

    pub fn set_background(&mut self, color: Color) {
        self.current_bg = color;
    }

    pub fn set_attrs(&mut self, attrs: Attr) {
        self.current_attrs = attrs;
    }

    pub fn add_attrs(&mut self, attrs: Attr) {
        self.current_attrs.insert(attrs);
    }

    pub fn clear_attrs(&mut self, attrs: Attr) {
        self.current_attrs.remove(attrs);
    }

    /// Reset the graphics state to the ANSI defaults: `fg = CGA[7]`,
    /// `bg = CGA[0]`, no attributes.
    pub fn reset_graphics(&mut self) {
        self.current_fg = DEFAULT_FG;
        self.current_bg = DEFAULT_BG;
        self.current_attrs = Attr::empty();
    }

    // ── Erasing ─────────────────────────────────────────────────────

    /// Clear every row, reset the cursor, and reset graphics state.
    pub fn cls(&mut self) {
        self.rows.clear();
        self.cursor.reset();
        self.reset_graphics();
        trace!("cls: screen cleared");
    }

    /// Replace row `y` with default cells. A no-op if `y` is beyond the
    /// current height.
    pub fn clear_row(&mut self, y: i64) {
        if y < 0 {
            return;
        }
        if let Some(row) = self.rows.get_mut(y as usize) {
            row.fill(Cell::EMPTY);
        }
    }

    /// Fill from the cursor to the last column of the cursor's row with
    /// spaces painted in the *current* graphics state.
    pub fn clear_to_end_of_line(&mut self) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        self.ensure_row(y as usize);
        let fill = Cell::styled(
            Some(' '),
            ColorField::Concrete(self.current_fg),
            ColorField::Concrete(self.current_bg),
            self.current_attrs,
        );
        for col in x.max(0)..self.width as i64 {
            self.set_cell(col, y, fill);
        }
    }

    /// [`Screen::clear_to_end_of_line`], then every later row becomes
    /// default cells.
    pub fn clear_to_end_of_screen(&mut self) {
        self.clear_to_end_of_line();
        let y = self.cursor.y;
        for row in (y + 1)..self.rows.len() as i64 {
            self.clear_row(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_bad_config() {
        assert!(matches!(Screen::new(0), Err(Error::BadConfig(_))));
    }

    #[test]
    fn rows_grow_on_demand() {
        let mut s = Screen::new(4).unwrap();
        assert_eq!(s.height(), 0);
        s.set_cell(0, 3, Cell::new('x'));
        assert_eq!(s.height(), 4);
        for y in 0..4 {
            assert_eq!(s.get_cell(0, y).unwrap().char.unwrap_or(' '), if y == 3 { 'x' } else { ' ' });
        }
    }

    #[test]
    fn out_of_range_set_cell_is_silent_no_op() {
        let mut s = Screen::new(4).unwrap();
        s.set_cell(-1, 0, Cell::new('x'));
        s.set_cell(10, 0, Cell::new('x'));
        assert_eq!(s.height(), 0);
    }

    #[test]
    fn put_char_writes_current_graphics_state_and_advances() {
        let mut s = Screen::new(2).unwrap();
        s.set_foreground(Color::rgb(1, 2, 3));
        s.put_char('A');
        let cell = s.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, Some('A'));
        assert_eq!(cell.fg, ColorField::Concrete(Color::rgb(1, 2, 3)));
        assert_eq!((s.cursor().x, s.cursor().y), (1, 0));
    }

    #[test]
    fn put_char_wraps_to_next_row() {
        let mut s = Screen::new(2).unwrap();
        s.put_char('A');
        s.put_char('B');
        assert_eq!((s.cursor().x, s.cursor().y), (0, 1));
        s.put_char('C');
        assert_eq!(s.get_cell(0, 1).unwrap().char, Some('C'));
    }

    #[test]
    fn put_char_str_rejects_non_singletons() {
        let mut s = Screen::new(4).unwrap();
        assert!(s.put_char_str("").is_err());
        assert!(s.put_char_str("ab").is_err());
        assert!(s.put_char_str("a").is_ok());
    }

    #[test]
    fn put_text_handles_newline_and_carriage_return() {
        let mut s = Screen::new(3).unwrap();
        s.put_text("ab\ncd\r e");
        assert_eq!(s.get_cell(0, 0).unwrap().char, Some('a'));
        assert_eq!(s.get_cell(1, 0).unwrap().char, Some('b'));
        assert_eq!(s.get_cell(0, 1).unwrap().char, Some('c'));
        assert_eq!(s.get_cell(1, 1).unwrap().char, Some('d'));
        // \r returns to column 0 of row 1, then ' ' overwrites 'c', then 'e' at column 1
        assert_eq!(s.get_cell(0, 1).unwrap().char, Some(' '));
        assert_eq!(s.get_cell(1, 1).unwrap().char, Some('e'));
    }

    #[test]
    fn cursor_forward_back_clamp_to_width() {
        let mut s = Screen::new(3).unwrap();
        s.cursor_forward(100);
        assert_eq!(s.cursor().x, 2);
        s.cursor_back(100);
        assert_eq!(s.cursor().x, 0);
    }

    #[test]
    fn cursor_save_restore_round_trips() {
        let mut s = Screen::new(5).unwrap();
        s.cursor_goto(3, 2);
        s.cursor_save();
        s.cursor_goto(0, 0);
        s.cursor_restore();
        assert_eq!((s.cursor().x, s.cursor().y), (3, 2));
    }

    #[test]
    fn newline_resets_column_and_advances_row() {
        let mut s = Screen::new(5).unwrap();
        s.cursor_goto(3, 0);
        s.newline();
        assert_eq!((s.cursor().x, s.cursor().y), (0, 1));
    }

    #[test]
    fn reset_graphics_restores_ansi_defaults() {
        let mut s = Screen::new(3).unwrap();
        s.set_foreground(Color::WHITE);
        s.add_attrs(Attr::BOLD);
        s.reset_graphics();
        assert_eq!(s.current_fg(), DEFAULT_FG);
        assert_eq!(s.current_bg(), DEFAULT_BG);
        assert!(s.current_attrs().is_empty_flags());
    }

    #[test]
    fn clear_to_end_of_line_paints_current_state() {
        let mut s = Screen::new(4).unwrap();
        s.put_text("abcd");
        s.cursor_goto(1, 0);
        s.set_background(Color::rgb(9, 9, 9));
        s.clear_to_end_of_line();
        assert_eq!(s.get_cell(0, 0).unwrap().char, Some('a'));
        assert_eq!(s.get_cell(1, 0).unwrap().char, Some(' '));
        assert_eq!(s.get_cell(1, 0).unwrap().bg, ColorField::Concrete(Color::rgb(9, 9, 9)));
        assert_eq!(s.get_cell(3, 0).unwrap().char, Some(' '));
    }

    #[test]
    fn clear_to_end_of_screen_clears_subsequent_rows() {
        let mut s = Screen::new(2).unwrap();
        s.put_text("ab\ncd\nef");
        s.cursor_goto(0, 1);
        s.clear_to_end_of_screen();
        assert_eq!(s.get_cell(0, 0).unwrap().char, Some('a'));
        assert_eq!(s.get_cell(0, 1).unwrap().char, Some(' '));
        assert_eq!(s.get_cell(0, 2).unwrap().char, None);
    }

    #[test]
    fn cls_clears_everything() {
        let mut s = Screen::new(2).unwrap();
        s.put_text("ab");
        s.cls();
        assert_eq!(s.height(), 0);
        assert_eq!((s.cursor().x, s.cursor().y), (0, 0));
    }
}
