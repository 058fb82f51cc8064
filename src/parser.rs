// SPDX-License-Identifier: MIT
//
// ANSIParser — a streaming CSI/SGR state machine that mutates a Screen.
//
// This is a document parser, not a terminal emulator: it never reads
// back from the terminal, never times out a dangling escape sequence,
// and never fails. Malformed or truncated sequences are silently
// ignored, by design — see the crate-level error handling notes.
//
// `feed` may be called repeatedly with arbitrary chunk boundaries; any
// partial CSI sequence is held as owned state between calls.

use log::debug;

use crate::cell::Attr;
use crate::color::Color;
use crate::palette::Palette;
use crate::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Esc,
    Csi,
}

/// A streaming parser that turns an ANSI/SGR byte stream into `Screen`
/// mutations.
///
/// One parser instance owns its partial-sequence state and should be
/// used with exactly one feed source.
pub struct AnsiParser {
    state: State,
    params: Vec<u32>,
    param_buf: String,
    ansi16: Palette,
    ansi256: Palette,
}

impl AnsiParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Text,
            params: Vec::new(),
            param_buf: String::new(),
            ansi16: Palette::cga16(),
            ansi256: Palette::xterm256(),
        }
    }

    /// Feed a chunk of text into the parser, mutating `screen` as
    /// complete sequences are recognized. Invalid UTF-8 is not a
    /// concern here: callers decode bytes to `&str` themselves (lossily,
    /// if needed) before calling this.
    pub fn feed(&mut self, screen: &mut Screen, data: &str) {
        for ch in data.chars() {
            self.process_char(screen, ch);
        }
    }

    fn process_char(&mut self, screen: &mut Screen, ch: char) {
        match self.state {
            State::Text => self.state_text(screen, ch),
            State::Esc => self.state_esc(screen, ch),
            State::Csi => self.state_csi(screen, ch),
        }
    }

    fn state_text(&mut self, screen: &mut Screen, ch: char) {
        match ch {
            '\x1b' => self.state = State::Esc,
            '\n' => screen.newline(),
            '\r' => screen.carriage_return(),
            _ => screen.put_char(ch),
        }
    }

    fn state_esc(&mut self, screen: &mut Screen, ch: char) {
        match ch {
            '[' => {
                self.state = State::Csi;
                self.params.clear();
                self.param_buf.clear();
            }
            '7' => {
                screen.cursor_save();
                self.state = State::Text;
            }
            '8' => {
                screen.cursor_restore();
                self.state = State::Text;
            }
            _ => {
                debug!("ignoring unsupported ESC follow-byte {ch:?}");
                self.state = State::Text;
            }
        }
    }

    fn state_csi(&mut self, screen: &mut Screen, ch: char) {
        if ch.is_ascii_digit() {
            self.param_buf.push(ch);
        } else if ch == ';' {
            self.flush_param();
        } else {
            self.flush_param();
            self.dispatch_csi(screen, ch);
            self.state = State::Text;
        }
    }

    fn flush_param(&mut self) {
        if self.param_buf.is_empty() {
            self.params.push(0);
        } else {
            // A malformed digit run too long for u32 silently clamps to
            // u32::MAX rather than failing; this is a document parser,
            // not a validator.
            self.params.push(self.param_buf.parse().unwrap_or(u32::MAX));
            self.param_buf.clear();
        }
    }

    fn dispatch_csi(&mut self, screen: &mut Screen, final_byte: char) {
        let params = if self.params.is_empty() { vec![0] } else { self.params.clone() };
        let p0 = params[0];

        match final_byte {
            'A' => screen.cursor_up(i64::from(if p0 == 0 { 1 } else { p0 })),
            'B' => screen.cursor_down(i64::from(if p0 == 0 { 1 } else { p0 })),
            'C' => screen.cursor_forward(i64::from(if p0 == 0 { 1 } else { p0 })),
            'D' => screen.cursor_back(i64::from(if p0 == 0 { 1 } else { p0 })),
            'H' | 'f' => {
                let y = params.first().copied().unwrap_or(1).saturating_sub(1);
                let x = params.get(1).copied().unwrap_or(1).saturating_sub(1);
                screen.cursor_goto(i64::from(x), i64::from(y));
            }
            'J' => match p0 {
                0 => screen.clear_to_end_of_screen(),
                2 => screen.cls(),
                _ => debug!("ignoring unknown ED parameter {p0}"),
            },
            'K' => screen.clear_to_end_of_line(),
            'm' => self.handle_sgr(screen, &params),
            other => debug!("ignoring unknown CSI final byte {other:?}"),
        }
    }

    fn handle_sgr(&self, screen: &mut Screen, params: &[u32]) {
        let params: &[u32] = if params.is_empty() { &[0] } else { params };

        let mut i = 0usize;
        while i < params.len() {
            let code = params[i];
            match code {
                0 => screen.reset_graphics(),
                1 => screen.add_attrs(Attr::BOLD),
                2 => screen.add_attrs(Attr::FAINT),
                3 => screen.add_attrs(Attr::ITALIC),
                4 => screen.add_attrs(Attr::UNDERLINE),
                5 => screen.add_attrs(Attr::BLINK),
                7 => screen.add_attrs(Attr::INVERSE),
                8 => screen.add_attrs(Attr::CONCEAL),
                9 => screen.add_attrs(Attr::STRIKE),
                22 => screen.clear_attrs(Attr::BOLD | Attr::FAINT),
                23 => screen.clear_attrs(Attr::ITALIC),
                24 => screen.clear_attrs(Attr::UNDERLINE),
                25 => screen.clear_attrs(Attr::BLINK),
                27 => screen.clear_attrs(Attr::INVERSE),
                28 => screen.clear_attrs(Attr::CONCEAL),
                29 => screen.clear_attrs(Attr::STRIKE),
                30..=37 => screen.set_foreground(self.ansi16_color(code - 30)),
                40..=47 => screen.set_background(self.ansi16_color(code - 40)),
                90..=97 => screen.set_foreground(self.ansi16_color(code - 90 + 8)),
                100..=107 => screen.set_background(self.ansi16_color(code - 100 + 8)),
                39 => screen.set_foreground(self.ansi16_color(7)),
                49 => screen.set_background(self.ansi16_color(0)),
                38 if i + 2 < params.len() && params[i + 1] == 5 => {
                    screen.set_foreground(self.ansi256_color(params[i + 2]));
                    i += 2;
                }
                48 if i + 2 < params.len() && params[i + 1] == 5 => {
                    screen.set_background(self.ansi256_color(params[i + 2]));
                    i += 2;
                }
                38 if i + 4 < params.len() && params[i + 1] == 2 => {
                    screen.set_foreground(rgb_from_params(&params[i + 2..i + 5]));
                    i += 4;
                }
                48 if i + 4 < params.len() && params[i + 1] == 2 => {
                    screen.set_background(rgb_from_params(&params[i + 2..i + 5]));
                    i += 4;
                }
                other => debug!("ignoring unknown SGR code {other}"),
            }
            i += 1;
        }
    }

    fn ansi16_color(&self, idx: u32) -> Color {
        self.ansi16.color_at(idx as u16).unwrap_or(Color::BLACK)
    }

    fn ansi256_color(&self, idx: u32) -> Color {
        self.ansi256.color_at(idx as u16).unwrap_or(Color::BLACK)
    }
}

impl Default for AnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_from_params(p: &[u32]) -> Color {
    Color::rgb(p[0] as u8, p[1] as u8, p[2] as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ColorField;

    #[test]
    fn parses_truecolor_sgr_then_char() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[38;2;10;20;30mA");
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, Some('A'));
        assert_eq!(cell.fg, ColorField::Concrete(Color::rgb(10, 20, 30)));
        assert_eq!(cell.bg, ColorField::Concrete(Color::BLACK));
    }

    #[test]
    fn partial_sequence_survives_feed_boundary() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[38;2;10;20");
        parser.feed(&mut screen, ";30mA");
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.fg, ColorField::Concrete(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn cga16_sgr_sets_foreground() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[31mX");
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.fg, ColorField::Concrete(Color::rgb(0xaa, 0x00, 0x00)));
    }

    #[test]
    fn bright_cga16_sgr_sets_foreground() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[91mX");
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.fg, ColorField::Concrete(Color::rgb(0xff, 0x55, 0x55)));
    }

    #[test]
    fn ansi256_sgr_sets_background() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[48;5;196mX");
        let cell = screen.get_cell(0, 0).unwrap();
        let expected = Palette::xterm256().color_at(196).unwrap();
        assert_eq!(cell.bg, ColorField::Concrete(expected));
    }

    #[test]
    fn truncated_extended_sequence_is_ignored_not_fatal() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        // 38;2 without enough r/g/b params — should be silently skipped,
        // leaving foreground at its untouched default.
        parser.feed(&mut screen, "\x1b[38;2;10mX");
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, Some('X'));
        assert_eq!(cell.fg, ColorField::Concrete(crate::cell::DEFAULT_FG));
    }

    #[test]
    fn reset_code_resets_graphics_state() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[1;31m");
        parser.feed(&mut screen, "\x1b[0mX");
        let cell = screen.get_cell(0, 0).unwrap();
        assert!(cell.attrs.is_empty_flags());
        assert_eq!(cell.fg, ColorField::Concrete(crate::cell::DEFAULT_FG));
    }

    #[test]
    fn newline_and_carriage_return_move_cursor() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "ab\ncd");
        assert_eq!(screen.get_cell(0, 1).unwrap().char, Some('c'));
    }

    #[test]
    fn cup_moves_cursor_one_indexed() {
        let mut screen = Screen::new(10).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[3;5HZ");
        assert_eq!(screen.get_cell(4, 2).unwrap().char, Some('Z'));
    }

    #[test]
    fn unknown_sgr_code_is_skipped_without_panicking() {
        let mut screen = Screen::new(4).unwrap();
        let mut parser = AnsiParser::new();
        parser.feed(&mut screen, "\x1b[63mX");
        assert_eq!(screen.get_cell(0, 0).unwrap().char, Some('X'));
    }
}
