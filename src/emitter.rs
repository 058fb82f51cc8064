// SPDX-License-Identifier: MIT
//
// ANSIEmitter — compiles a Screen's cells into ANSI bytes.
//
// Unlike `crate::parser`, which consumes ANSI and mutates a Screen,
// this module goes the other way: it walks a Screen (optionally
// clipped to a Box) and serializes it with the minimal SGR prefix
// needed to carry the terminal from its previously established state
// into each cell's compiled, intended state.
//
// This "compile, then diff against the last-emitted state" shape is
// the same trick `crate::output`-style stateful writers use for live
// frame rendering, just applied within a single pass over a Screen
// rather than across animation frames — there is no previous-frame
// buffer here, only the state this very emit() call has already
// produced.

use crate::cell::{Attr, Cell, ColorField};
use crate::color::Color;
use crate::palette::Palette;
use crate::quantize::quantize_nearest_hsv;
use crate::screen::Screen;

/// A clip rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Box {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Box {
    #[must_use]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn contains(self, x: i64, y: i64) -> bool {
        (self.x..self.x + self.width).contains(&x) && (self.y..self.y + self.height).contains(&y)
    }
}

/// How a compiled color is represented in ANSI space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnsiColor {
    Ansi16(u16),
    Ansi256(u16),
    Truecolor(u8, u8, u8),
    /// `base` is `0..=7`, `bright` is `0` or `1`.
    Dos(u8, u8),
}

/// The emitter's compiled, intended terminal state for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TerminalState {
    fg: AnsiColor,
    bg: AnsiColor,
    attrs: Attr,
}

const NEUTRAL_FG: AnsiColor = AnsiColor::Ansi16(7);
const NEUTRAL_BG: AnsiColor = AnsiColor::Ansi16(0);

impl TerminalState {
    const fn neutral() -> Self {
        Self {
            fg: NEUTRAL_FG,
            bg: NEUTRAL_BG,
            attrs: Attr::empty(),
        }
    }
}

/// Configuration for an [`AnsiEmitter`].
#[derive(Debug, Clone, Default)]
pub struct EmitterConfig {
    /// When set, colors are quantized into this palette's index space
    /// rather than minimized against the built-in 16/256 palettes.
    pub palette: Option<Palette>,
    /// CP437-ish / DOS SGR semantics: color is always 16-color CGA,
    /// brightness via the bold bit.
    pub dos_mode: bool,
    /// Under `dos_mode`, also use the blink bit for bright background
    /// (iCE colors) instead of emitting a real blink.
    pub ice_mode: bool,
}

/// Serializes a [`Screen`] into a minimal ANSI byte stream.
pub struct AnsiEmitter {
    config: EmitterConfig,
    ansi16: Palette,
    ansi256: Palette,
}

impl AnsiEmitter {
    #[must_use]
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            ansi16: Palette::cga16(),
            ansi256: Palette::xterm256(),
        }
    }

    /// Emit the entire screen.
    #[must_use]
    pub fn emit(&self, screen: &Screen) -> String {
        let box_ = Box::new(0, 0, screen.width() as i64, screen.height() as i64);
        self.emit_region(screen, box_)
    }

    /// Emit just the region described by `box_`.
    #[must_use]
    pub fn emit_region(&self, screen: &Screen, box_: Box) -> String {
        let mut out = String::new();
        out.push_str("\x1b[0m");

        let mut prev = TerminalState::neutral();

        for row in 0..box_.height {
            let y = box_.y + row;
            for col in 0..box_.width {
                let x = box_.x + col;
                let cell = screen.get_cell(x, y).unwrap_or(Cell::EMPTY);
                let desired = self.compile_cell(prev, cell);
                let seq = self.emit_transition(&mut prev, desired);
                out.push_str(&seq);

                let glyph = if self.dos_colors_match(desired.fg, desired.bg) {
                    '█'
                } else {
                    cell.char.unwrap_or(' ')
                };
                out.push(glyph);
            }
            out.push_str("\x1b[0m\n");
            // Every row starts fresh: the hard reset above means the next
            // row's first cell diffs against neutral state, not the last
            // cell of this row.
            prev = TerminalState::neutral();
        }

        out
    }

    // ── Compile: Cell -> TerminalState ──────────────────────────────

    fn compile_cell(&self, prev: TerminalState, cell: Cell) -> TerminalState {
        let mut attrs = cell.attrs;
        if self.config.dos_mode {
            attrs.remove(Attr::FAINT);
            if self.config.ice_mode {
                attrs.remove(Attr::BLINK);
            }
        }

        let fg = match cell.fg {
            ColorField::Inherit => prev.fg,
            ColorField::Concrete(c) => self.encode_color(c),
        };
        let bg = match cell.bg {
            ColorField::Inherit => prev.bg,
            ColorField::Concrete(c) => self.encode_color(c),
        };

        TerminalState { fg, bg, attrs }
    }

    fn dos_colors_match(&self, fg: AnsiColor, bg: AnsiColor) -> bool {
        matches!((fg, bg), (AnsiColor::Dos(fb, fbr), AnsiColor::Dos(bb, bbr)) if fb == bb && fbr == bbr)
    }

    fn encode_color(&self, color: Color) -> AnsiColor {
        if self.config.dos_mode {
            let idx = quantize_nearest_hsv(color, &self.ansi16).unwrap_or(7);
            return AnsiColor::Dos((idx & 0x07) as u8, u8::from(idx >= 8));
        }
        if let Some(palette) = &self.config.palette {
            let idx = quantize_nearest_hsv(color, palette).unwrap_or(0);
            return if idx < 16 { AnsiColor::Ansi16(idx) } else { AnsiColor::Ansi256(idx) };
        }
        if let Some(idx) = self.ansi16.index_of(color) {
            return AnsiColor::Ansi16(idx);
        }
        if let Some(idx) = self.ansi256.index_of(color) {
            return AnsiColor::Ansi256(idx);
        }
        AnsiColor::Truecolor(color.r, color.g, color.b)
    }

    // ── Emit: prev -> desired diff ───────────────────────────────────

    fn emit_transition(&self, prev: &mut TerminalState, desired: TerminalState) -> String {
        if self.config.dos_mode {
            if let (AnsiColor::Dos(_, 1), AnsiColor::Dos(_, 0)) = (prev.fg, desired.fg) {
                // Rebase to a DOS-kind neutral, not the ANSI16 one, so the
                // diff below compares like variants instead of manufacturing
                // a spurious bg code from an Ansi16/Dos mismatch.
                let reset_state = TerminalState {
                    fg: AnsiColor::Dos(7, 0),
                    bg: AnsiColor::Dos(0, 0),
                    attrs: Attr::empty(),
                };
                let sgr = self.build_sgr(reset_state, desired);
                *prev = desired;
                return format!("\x1b[0m{sgr}");
            }
        }
        let sgr = self.build_sgr(*prev, desired);
        *prev = desired;
        sgr
    }

    fn build_sgr(&self, prev: TerminalState, desired: TerminalState) -> String {
        let mut codes: Vec<String> = Vec::new();
        let mut reset = false;

        if desired.attrs != prev.attrs {
            if desired.attrs.is_empty_flags() {
                codes.push("0".to_string());
                reset = true;
            } else {
                if desired.attrs.contains(Attr::BOLD) {
                    codes.push("1".to_string());
                }
                if !self.config.dos_mode && desired.attrs.contains(Attr::FAINT) {
                    codes.push("2".to_string());
                }
                if desired.attrs.contains(Attr::ITALIC) {
                    codes.push("3".to_string());
                }
                if desired.attrs.contains(Attr::UNDERLINE) {
                    codes.push("4".to_string());
                }
                if desired.attrs.contains(Attr::BLINK) {
                    codes.push("5".to_string());
                }
                if desired.attrs.contains(Attr::INVERSE) {
                    codes.push("7".to_string());
                }
                if desired.attrs.contains(Attr::CONCEAL) {
                    codes.push("8".to_string());
                }
                if desired.attrs.contains(Attr::STRIKE) {
                    codes.push("9".to_string());
                }
            }
        }

        if desired.fg != prev.fg || reset {
            codes.extend(self.color_to_sgr(desired.fg, true));
        }
        if desired.bg != prev.bg || reset {
            codes.extend(self.color_to_sgr(desired.bg, false));
        }

        if codes.is_empty() {
            return String::new();
        }
        let mut out = String::from("\x1b[");
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            out.push_str(code);
        }
        out.push('m');
        out
    }

    fn color_to_sgr(&self, color: AnsiColor, fg: bool) -> Vec<String> {
        match color {
            AnsiColor::Ansi16(idx) => {
                let base = if idx < 8 {
                    (if fg { 30 } else { 40 }) + idx
                } else {
                    (if fg { 90 } else { 100 }) + (idx - 8)
                };
                vec![base.to_string()]
            }
            AnsiColor::Ansi256(idx) => {
                vec![format!("{};5;{idx}", if fg { 38 } else { 48 })]
            }
            AnsiColor::Truecolor(r, g, b) => {
                vec![format!("{};2;{r};{g};{b}", if fg { 38 } else { 48 })]
            }
            AnsiColor::Dos(base, bright) => {
                let mut seq = Vec::new();
                if fg {
                    if bright == 1 {
                        seq.push("1".to_string());
                    }
                    seq.push((30 + u16::from(base)).to_string());
                } else {
                    if bright == 1 && self.config.ice_mode {
                        seq.push("5".to_string());
                    }
                    seq.push((40 + u16::from(base)).to_string());
                }
                seq
            }
        }
    }
}
