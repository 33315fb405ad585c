// SPDX-License-Identifier: MIT
//
// Color construction errors.
//
// Malformed input fails at construction time. There is no silent fallback
// to black or to the null color: a bad hex string or an unknown name is a
// bug in the caller's data and should surface immediately.

/// Errors produced while building a [`Color`](crate::color::Color).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Not a `#rgb` or `#rrggbb` string.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Channel arrays carry 3 to 7 slots (r, g, b, then jitter bounds).
    #[error("color arrays need 3 to 7 values, got {0}")]
    ArrayLength(usize),

    /// The palette has no color registered under this name.
    #[error("unknown color name: {0:?}")]
    UnknownName(String),

    /// A per-channel multiplier needs at least r, g and b.
    #[error("channel multiplier needs at least 3 values, got {0}")]
    TooFewChannels(usize),

    /// Packed integers hold at most 24 bits of color.
    #[error("packed color {0:#x} does not fit in 24 bits")]
    IntOutOfRange(i64),
}
