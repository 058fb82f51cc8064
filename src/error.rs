// SPDX-License-Identifier: MIT
//
// Error kinds surfaced synchronously by the core. The parser is
// best-effort and never produces one of these — malformed or truncated
// input is silently ignored per its own state machine rules. Everything
// else in this crate is total once constructed with a valid config:
// these variants only arise at construction time or at a handful of
// explicit "this input is malformed" call sites.

/// Errors the core can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A constructor was given a configuration that cannot produce a
    /// working value: a non-positive screen width, an empty palette, an
    /// unrecognized quantize strategy or colorize mode, a monochrome
    /// quantizer given a palette that isn't exactly 2 colors, or star
    /// polygon parameters with `k <= 0 || k >= n`.
    #[error("bad configuration: {0}")]
    BadConfig(String),

    /// A call received a value it cannot act on: `put_char` given
    /// something other than exactly one code point, or a palette
    /// constructed from a non-integer/negative index.
    #[error("bad input: {0}")]
    BadInput(String),
}

impl Error {
    #[must_use]
    pub fn bad_config(msg: impl Into<String>) -> Self {
        Self::BadConfig(msg.into())
    }

    #[must_use]
    pub fn bad_input(msg: impl Into<String>) -> Self {
        Self::BadInput(msg.into())
    }
}

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, Error>;
