// SPDX-License-Identifier: MIT
//
// ansi-screen — a lossless, document-oriented terminal-cell library.
//
// A coordinated triple sits at the core: a cell buffer (`Screen`), a
// streaming ANSI/SGR parser (`AnsiParser`) that mutates it, and a
// state-tracking emitter (`AnsiEmitter`) that re-serializes it with
// minimal escape sequences. Around that core sit drawing operations
// that share the same cell model: half-block pixel plotting
// (`pixel`), primitives and flood-fill (`primitives`), gradient
// colorization (`gradient`), and region copy/cut/paste (`clip`). A
// renderer-agnostic color model (`color`, `palette`, `quantize`)
// underpins all of it.
//
// This crate does not emulate a terminal: no cursor visibility,
// scrollback, mouse, or mode handling, and no input handling. It reads
// and writes ANSI byte streams as a data format, nothing more.

pub mod cell;
pub mod clip;
pub mod color;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod gradient;
pub mod palette;
pub mod parser;
pub mod pixel;
pub mod primitives;
pub mod quantize;
pub mod screen;

pub use cell::{Attr, Cell, ColorField};
pub use color::Color;
pub use cursor::Cursor;
pub use emitter::{AnsiEmitter, EmitterConfig};
pub use error::{Error, Result};
pub use palette::Palette;
pub use parser::AnsiParser;
pub use screen::Screen;
