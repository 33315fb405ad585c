// SPDX-License-Identifier: MIT
//
// tile-color — color model for the tilegrid compositor.
//
// Channels are percentages (0–100) rather than bytes so that compositing
// math reads the same at any output depth. Colors quantize to 12-bit ints
// for the packed layer format and to 24-bit ints or css strings for
// everything else.
//
// A color may "dance": it carries per-channel jitter bounds that a random
// source realizes once per frame (`Color::bake`). The random source is
// always passed in, so tests and replays stay deterministic.

pub mod color;
pub mod error;
pub mod palette;
pub mod random;
pub mod separate;

pub use color::Color;
pub use error::ColorError;
pub use palette::{ColorValue, Palette};
pub use random::{RandomSource, SeededRandom};
pub use separate::{SeparateParams, separate, separate_with};
