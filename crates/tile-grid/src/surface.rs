// SPDX-License-Identifier: MIT
//
// Surface — what a layer draws onto.
//
// The real surface (GPU program, atlas texture, frame callback) lives
// outside this crate. A layer only needs two things from it: a way to turn
// characters into atlas indices, and a way to say "something changed,
// paint on the next frame". Render requests are a dirty flag, not a queue:
// any number of requests before the next paint collapse into one, and the
// paint always shows the latest state.

use std::cell::Cell;

use crate::glyph::{GlyphMap, GlyphResolver};

/// The rendering surface a [`Layer`](crate::layer::Layer) is bound to.
pub trait Surface: GlyphResolver {
    /// Ask for a repaint on the next frame. Idempotent until painted.
    fn request_render(&self);
}

// ─── RenderFlag ──────────────────────────────────────────────────────────────

/// Single-threaded dirty flag for coalescing render requests.
#[derive(Debug, Default)]
pub struct RenderFlag {
    pending: Cell<bool>,
}

impl RenderFlag {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Cell::new(false),
        }
    }

    /// Mark a repaint as pending.
    #[inline]
    pub fn request(&self) {
        self.pending.set(true);
    }

    /// Whether a repaint is pending.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clear the flag, returning whether it was set. Called by whoever paints.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

// ─── HeadlessSurface ─────────────────────────────────────────────────────────

/// A surface with a glyph table and a dirty flag but no pixels.
///
/// Enough for tests, diffing, and text-mode output of a layer.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub glyphs: GlyphMap,
    pub flag: RenderFlag,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(glyphs: GlyphMap) -> Self {
        Self {
            glyphs,
            flag: RenderFlag::new(),
        }
    }
}

impl GlyphResolver for HeadlessSurface {
    fn for_char(&self, ch: char) -> Option<u8> {
        self.glyphs.for_char(ch)
    }
}

impl Surface for HeadlessSurface {
    fn request_render(&self) {
        self.flag.request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce_until_taken() {
        let flag = RenderFlag::new();
        assert!(!flag.is_pending());
        flag.request();
        flag.request();
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());
        assert!(!flag.is_pending());
    }

    #[test]
    fn headless_surface_resolves_through_its_table() {
        let surface = HeadlessSurface::default();
        assert_eq!(surface.for_char('A'), Some(65));
        surface.request_render();
        assert!(surface.flag.is_pending());
    }
}
