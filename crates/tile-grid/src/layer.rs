// SPDX-License-Identifier: MIT
//
// Layer — the packed, GPU-facing form of a grid.
//
// Each tile is drawn as two triangles, so every tile owns six vertices and
// every per-tile attribute is repeated six times. A layer keeps three flat
// parallel arrays, one entry per vertex:
//
//   glyphs: [u8]   atlas index
//   fg:     [u16]  12-bit 0xRGB (the high nibble is spare)
//   bg:     [u16]  12-bit 0xRGB
//
//   tile i → vertices i*6 .. i*6+6, all six identical
//
// The renderer uploads these arrays as-is. Writes go through `set`, which
// fans one tile out to its six vertices, so the six copies never disagree.
//
// A layer is bound to one surface. Packing a buffer ends with a single
// render request; the surface repaints on its next frame. Once detached a
// layer cannot be drawn to again: writes nobody will see are an error.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};
use tile_color::{Color, RandomSource};

use crate::buffer::DataBuffer;
use crate::error::{GridError, Result};
use crate::glyph::Glyph;
use crate::mixer::{BakedCell, Mixer};
use crate::surface::Surface;

/// Vertices per tile: two triangles, no index buffer.
pub const VERTICES_PER_TILE: usize = 6;

/// Packed per-vertex tile data bound to a [`Surface`].
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use tile_color::Color;
/// use tile_grid::buffer::DataBuffer;
/// use tile_grid::glyph::Glyph;
/// use tile_grid::layer::Layer;
/// use tile_grid::surface::HeadlessSurface;
///
/// let surface = Rc::new(HeadlessSurface::default());
/// let mut layer = Layer::new(2, 1, surface.clone());
///
/// let mut buf = DataBuffer::new(2, 1);
/// buf.draw(0, 0, Some(Glyph::Char('A')), Some(Color::WHITE), Some(Color::BLACK)).unwrap();
/// layer.copy(&buf).unwrap();
///
/// assert_eq!(layer.tile(0), Some((65, 0xfff, 0x000)));
/// assert!(surface.flag.take());
/// ```
pub struct Layer {
    width: u16,
    height: u16,
    glyphs: Vec<u8>,
    fg: Vec<u16>,
    bg: Vec<u16>,
    surface: Option<Rc<dyn Surface>>,
}

impl Layer {
    /// A zeroed layer of `width × height` tiles bound to `surface`.
    #[must_use]
    pub fn new(width: u16, height: u16, surface: Rc<dyn Surface>) -> Self {
        let vertices = usize::from(width) * usize::from(height) * VERTICES_PER_TILE;
        Self {
            width,
            height,
            glyphs: vec![0; vertices],
            fg: vec![0; vertices],
            bg: vec![0; vertices],
            surface: Some(surface),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of tiles (`width × height`).
    #[inline]
    #[must_use]
    pub fn tile_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Per-vertex glyph indices.
    #[inline]
    #[must_use]
    pub fn glyphs(&self) -> &[u8] {
        &self.glyphs
    }

    /// Per-vertex foreground colors.
    #[inline]
    #[must_use]
    pub fn fg(&self) -> &[u16] {
        &self.fg
    }

    /// Per-vertex background colors.
    #[inline]
    #[must_use]
    pub fn bg(&self) -> &[u16] {
        &self.bg
    }

    /// `(glyph, fg, bg)` of a tile, read from its first vertex.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<(u8, u16, u16)> {
        let v = index.checked_mul(VERTICES_PER_TILE)?;
        Some((*self.glyphs.get(v)?, self.fg[v], self.bg[v]))
    }

    #[inline]
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.surface.is_none()
    }

    fn surface(&self) -> Result<Rc<dyn Surface>> {
        self.surface.clone().ok_or(GridError::Detached)
    }

    fn tile_out_of_bounds(&self, index: usize) -> GridError {
        let w = usize::from(self.width).max(1);
        GridError::OutOfBounds {
            x: index % w,
            y: index / w,
            width: self.width,
            height: self.height,
        }
    }

    // ─── Writing ─────────────────────────────────────────────────────────

    /// Write one tile to all six of its vertices.
    ///
    /// `fg` and `bg` are truncated to their low 16 bits. Does not request a
    /// render on its own.
    ///
    /// # Errors
    ///
    /// [`GridError::Detached`] once detached, [`GridError::OutOfBounds`]
    /// for a tile index past the end.
    pub fn set(&mut self, index: usize, glyph: u8, fg: u32, bg: u32) -> Result<()> {
        if self.is_detached() {
            return Err(GridError::Detached);
        }
        self.write_tile(index, glyph, fg, bg)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_tile(&mut self, index: usize, glyph: u8, fg: u32, bg: u32) -> Result<()> {
        if index >= self.tile_count() {
            return Err(self.tile_out_of_bounds(index));
        }
        let start = index * VERTICES_PER_TILE;
        let range = start..start + VERTICES_PER_TILE;
        // Masked to 16 bits before the cast.
        self.glyphs[range.clone()].fill(glyph);
        self.fg[range.clone()].fill((fg & 0xFFFF) as u16);
        self.bg[range].fill((bg & 0xFFFF) as u16);
        Ok(())
    }

    /// Write the tile at `(x, y)` and request a render.
    ///
    /// # Errors
    ///
    /// [`GridError::Detached`] once detached, [`GridError::OutOfBounds`]
    /// outside the grid.
    pub fn draw(&mut self, x: u16, y: u16, glyph: u8, fg: u32, bg: u32) -> Result<()> {
        let surface = self.surface()?;
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x: usize::from(x),
                y: usize::from(y),
                width: self.width,
                height: self.height,
            });
        }
        let index = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.write_tile(index, glyph, fg, bg)?;
        surface.request_render();
        Ok(())
    }

    /// Pack a buffer into the layer and request one render.
    ///
    /// Characters resolve through the surface's glyph table; unmapped ones
    /// and unset glyphs become glyph 0. Colors quantize to 12 bits, with
    /// null colors packing as 0.
    ///
    /// # Errors
    ///
    /// [`GridError::Detached`] once detached, [`GridError::SizeMismatch`]
    /// when the buffer is not the layer's size.
    pub fn copy(&mut self, buffer: &DataBuffer) -> Result<()> {
        self.pack(buffer, |m| BakedCell {
            ch: m.ch,
            fg: m.fg.to_int(),
            bg: m.bg.to_int(),
        })
    }

    /// [`copy`](Self::copy), realizing each color's jitter first.
    ///
    /// Cells are baked in row-major order, so a deterministic source gives
    /// a deterministic frame. The buffer keeps its dancing colors.
    ///
    /// # Errors
    ///
    /// Same as [`copy`](Self::copy).
    pub fn copy_baked<R: RandomSource + ?Sized>(
        &mut self,
        buffer: &DataBuffer,
        rng: &mut R,
    ) -> Result<()> {
        self.pack(buffer, |m| m.bake(rng))
    }

    fn pack(
        &mut self,
        buffer: &DataBuffer,
        mut bake: impl FnMut(&Mixer) -> BakedCell,
    ) -> Result<()> {
        let surface = self.surface()?;
        if buffer.size() != (self.width, self.height) {
            return Err(GridError::SizeMismatch {
                expected: (self.width, self.height),
                actual: buffer.size(),
            });
        }
        trace!("Layer: packing {} tiles", buffer.len());

        let mut unmapped = 0_usize;
        for (index, mixer) in buffer.cells().iter().enumerate() {
            let cell = bake(mixer);
            let glyph = match cell.ch {
                None => 0,
                Some(g) => g.resolve(&*surface).unwrap_or_else(|| {
                    if unmapped == 0 {
                        warn!("Layer: no glyph for {g}, drawing blank");
                    }
                    unmapped += 1;
                    0
                }),
            };
            self.write_tile(index, glyph, cell.fg, cell.bg)?;
        }
        if unmapped > 1 {
            warn!("Layer: {unmapped} cells had unmapped glyphs");
        }

        surface.request_render();
        Ok(())
    }

    // ─── Reading ─────────────────────────────────────────────────────────

    /// Rebuild a buffer from the packed tiles.
    ///
    /// The destination is resized to the layer first. Glyphs come back as
    /// [`Glyph::Index`], colors from the low 12 bits of each stored value;
    /// a color that was null when packed reads back as black. Works on a
    /// detached layer too.
    pub fn copy_to(&self, buffer: &mut DataBuffer) {
        buffer.resize(self.width, self.height);
        for (index, cell) in buffer.cells_mut().iter_mut().enumerate() {
            let v = index * VERTICES_PER_TILE;
            *cell = Mixer {
                ch: Some(Glyph::Index(self.glyphs[v])),
                fg: Color::from_nibbles(self.fg[v]),
                bg: Color::from_nibbles(self.bg[v]),
            };
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Release the surface. Every later write fails with
    /// [`GridError::Detached`].
    pub fn detach(&mut self) {
        if self.surface.take().is_some() {
            debug!("Layer: detached {}x{}", self.width, self.height);
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_detached() { "detached" } else { "bound" };
        write!(f, "Layer({}x{}, {state})", self.width, self.height)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
