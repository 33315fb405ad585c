// SPDX-License-Identifier: MIT
//
// Text-mode renderer for a packed layer.
//
// Stands in for the GPU renderer: it reads the layer's per-vertex arrays
// (first vertex of each tile), looks glyph indices back up in the surface's
// table and writes 24-bit SGR escapes. Like a frame callback it only paints
// when the surface has a render pending, and clears the flag when it does.
//
// Colors are 12-bit in the layer; each nibble widens to a byte as `n * 17`
// so that 0xf maps to 255 exactly. Escapes are only emitted when a color
// differs from the previous tile's.

use std::io::{self, Write};
use std::rc::Rc;

use tile_grid::{HeadlessSurface, Layer};

/// Widen a 12-bit `0xRGB` to 8 bits per channel.
#[inline]
#[must_use]
pub const fn expand(rgb: u16) -> (u8, u8, u8) {
    (nibble(rgb, 8), nibble(rgb, 4), nibble(rgb, 0))
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn nibble(rgb: u16, shift: u16) -> u8 {
    // Safe: masked to 0..=15, and 15 * 17 = 255.
    ((rgb >> shift) & 0xF) as u8 * 17
}

fn fg(w: &mut impl Write, rgb: u16) -> io::Result<()> {
    let (r, g, b) = expand(rgb);
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

fn bg(w: &mut impl Write, rgb: u16) -> io::Result<()> {
    let (r, g, b) = expand(rgb);
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Paints layers bound to a [`HeadlessSurface`] as ANSI text.
pub struct AnsiRenderer {
    surface: Rc<HeadlessSurface>,
}

impl AnsiRenderer {
    #[must_use]
    pub const fn new(surface: Rc<HeadlessSurface>) -> Self {
        Self { surface }
    }

    /// Paint `layer` if a render is pending. Returns whether it painted.
    ///
    /// Rows end with an SGR reset and a newline.
    pub fn paint(&self, layer: &Layer, w: &mut impl Write) -> io::Result<bool> {
        if !self.surface.flag.take() {
            return Ok(false);
        }

        let width = usize::from(layer.width());
        for row in 0..usize::from(layer.height()) {
            let mut last: Option<(u16, u16)> = None;
            for col in 0..width {
                let Some((glyph, fg_rgb, bg_rgb)) = layer.tile(row * width + col) else {
                    continue;
                };
                let (last_fg, last_bg) = last.unzip();
                if last_fg != Some(fg_rgb) {
                    fg(w, fg_rgb)?;
                }
                if last_bg != Some(bg_rgb) {
                    bg(w, bg_rgb)?;
                }
                last = Some((fg_rgb, bg_rgb));

                let ch = self.surface.glyphs.char_for(glyph).unwrap_or(' ');
                write!(w, "{ch}")?;
            }
            reset(w)?;
            w.write_all(b"\n")?;
        }
        Ok(true)
    }
}
