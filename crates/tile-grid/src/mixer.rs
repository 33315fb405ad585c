// SPDX-License-Identifier: MIT
//
// Mixer — the compositing accumulator behind every grid cell.
//
// A mixer starts unset (no glyph, null colors) and is painted repeatedly
// during a frame: plain draws replace, sprites blend by opacity, and the
// color operations (multiply, mix, add) tint fg and bg independently. At
// the end of the frame it is either baked to plain ints for output or kept
// symbolic in a buffer for the next frame.
//
// Mixers are position-free; the buffer that owns them knows where they are.

use tile_color::{Color, RandomSource, SeparateParams, separate_with};

use crate::glyph::Glyph;

// ─── Sprite ──────────────────────────────────────────────────────────────────

/// A layer contribution blended onto a cell by [`Mixer::draw_sprite`].
///
/// Null colors leave the matching channel alone, so a sprite with only an
/// `fg` tints the glyph without touching the background.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sprite {
    /// Replaces the cell's glyph when set.
    pub ch: Option<Glyph>,
    /// Mixed onto the cell's foreground.
    pub fg: Color,
    /// Mixed onto the cell's background.
    pub bg: Color,
    /// Default opacity (0–100) when the caller does not pass one.
    pub opacity: Option<f32>,
}

impl Sprite {
    /// An opaque sprite.
    #[must_use]
    pub const fn new(ch: Option<Glyph>, fg: Color, bg: Color) -> Self {
        Self {
            ch,
            fg,
            bg,
            opacity: None,
        }
    }

    /// Return a copy with a default opacity.
    #[must_use]
    pub const fn with_opacity(self, opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..self
        }
    }
}

// ─── BakedCell ───────────────────────────────────────────────────────────────

/// A mixer flattened for output: glyph plus 12-bit `0xRGB` colors.
///
/// A null color bakes to 0, the same as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BakedCell {
    pub ch: Option<Glyph>,
    pub fg: u32,
    pub bg: u32,
}

// ─── Mixer ───────────────────────────────────────────────────────────────────

/// One cell's glyph and colors while a frame is being composed.
///
/// # Examples
///
/// ```
/// use tile_color::Color;
/// use tile_grid::glyph::Glyph;
/// use tile_grid::mixer::{Mixer, Sprite};
///
/// let mut cell = Mixer::new();
/// cell.draw(Some(Glyph::Char('@')), Some(Color::rgb(100.0, 0.0, 0.0)), Some(Color::BLACK));
///
/// // A half-transparent white sprite that only carries a foreground.
/// let glow = Sprite::new(None, Color::WHITE, Color::NULL).with_opacity(50.0);
/// cell.draw_sprite(&glow, None);
///
/// assert_eq!(cell.ch, Some(Glyph::Char('@')));
/// assert_eq!(cell.fg, Color::rgb(100.0, 50.0, 50.0));
/// assert_eq!(cell.bg, Color::BLACK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mixer {
    /// `None` while unset.
    pub ch: Option<Glyph>,
    pub fg: Color,
    pub bg: Color,
}

impl Mixer {
    /// An unset mixer: no glyph, null colors.
    pub const UNSET: Self = Self {
        ch: None,
        fg: Color::NULL,
        bg: Color::NULL,
    };

    /// A blacked-out mixer: blank glyph 0 on black.
    pub const BLACK: Self = Self {
        ch: Some(Glyph::Index(0)),
        fg: Color::BLACK,
        bg: Color::BLACK,
    };

    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::UNSET
    }

    /// Whether nothing has been drawn: no glyph and both colors null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.ch.is_none() && self.fg.is_null() && self.bg.is_null()
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// Replace whichever parts are given. `None` leaves that part alone.
    pub fn draw(&mut self, ch: Option<Glyph>, fg: Option<Color>, bg: Option<Color>) {
        if let Some(ch) = ch {
            self.ch = Some(ch);
        }
        if let Some(fg) = fg {
            self.fg = fg;
        }
        if let Some(bg) = bg {
            self.bg = bg;
        }
    }

    /// Blend a sprite on top of this cell.
    ///
    /// Opacity is `opacity` if given, else the sprite's own, else 100. At
    /// zero or below nothing changes, glyph included. Otherwise the glyph is
    /// replaced when the sprite has one, and fg/bg are mixed toward the
    /// sprite's colors by the opacity.
    pub fn draw_sprite(&mut self, sprite: &Sprite, opacity: Option<f32>) {
        let opacity = opacity.or(sprite.opacity).unwrap_or(100.0);
        if opacity <= 0.0 {
            return;
        }
        if let Some(ch) = sprite.ch {
            self.ch = Some(ch);
        }
        self.fg = self.fg.mix(sprite.fg, opacity);
        self.bg = self.bg.mix(sprite.bg, opacity);
    }

    /// Swap foreground and background.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.fg, &mut self.bg);
    }

    // ─── Tinting ─────────────────────────────────────────────────────────

    /// Multiply by `color`, blending `fg_pct` / `bg_pct` of the way from the
    /// current color to the multiplied one. A percent `<= 0` skips that side.
    pub fn multiply(&mut self, color: Color, fg_pct: f32, bg_pct: f32) {
        self.apply(fg_pct, bg_pct, |c, pct| c.mix(c.multiply(color), pct));
    }

    /// Mix `fg_pct` / `bg_pct` of the way toward `color`.
    pub fn mix(&mut self, color: Color, fg_pct: f32, bg_pct: f32) {
        self.apply(fg_pct, bg_pct, |c, pct| c.mix(color, pct));
    }

    /// Add `color` scaled by `fg_pct` / `bg_pct` percent.
    pub fn add(&mut self, color: Color, fg_pct: f32, bg_pct: f32) {
        self.apply(fg_pct, bg_pct, |c, pct| c.add(color, pct));
    }

    fn apply(&mut self, fg_pct: f32, bg_pct: f32, op: impl Fn(Color, f32) -> Color) {
        if fg_pct > 0.0 {
            self.fg = op(self.fg, fg_pct);
        }
        if bg_pct > 0.0 {
            self.bg = op(self.bg, bg_pct);
        }
    }

    /// Push fg and bg apart in luminosity until the glyph is legible.
    pub fn separate(&mut self, params: &SeparateParams) {
        (self.fg, self.bg) = separate_with(self.fg, self.bg, params);
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Realize both colors' jitter and quantize to 12-bit ints.
    ///
    /// The mixer itself keeps its dancing colors for the next frame.
    #[must_use]
    pub fn bake<R: RandomSource + ?Sized>(&self, rng: &mut R) -> BakedCell {
        BakedCell {
            ch: self.ch,
            fg: self.fg.bake(rng).to_int(),
            bg: self.bg.bake(rng).to_int(),
        }
    }

    /// Back to unset.
    pub fn nullify(&mut self) {
        *self = Self::UNSET;
    }

    /// Blank glyph 0, black on black.
    pub fn black_out(&mut self) {
        *self = Self::BLACK;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
