// SPDX-License-Identifier: MIT
//
// DataBuffer — a free-standing 2D grid of mixers.
//
// Flat `Vec<Mixer>` with row-major indexing (`index = y * width + x`). The
// length always equals `width * height`.
//
// Resizing is flat: growing appends unset mixers to the end of the store and
// shrinking truncates it. Rows are not re-flowed, so a width change shifts
// existing content, and whatever a shrink cuts off is gone for good. A
// resize to the current size does nothing at all.
//
// Every coordinate is bounds-checked. An out-of-range cell is an error, not
// a wrap-around or a silent no-op.

use std::fmt;

use log::debug;
use tile_color::Color;

use crate::error::{GridError, Result};
use crate::glyph::Glyph;
use crate::mixer::{Mixer, Sprite};

/// A grid of [`Mixer`]s not attached to any surface.
///
/// Used on its own as a scratch grid (double buffering, diffing) or inside
/// a [`Buffer`](crate::bound::Buffer) bound to a layer.
///
/// # Examples
///
/// ```
/// use tile_color::Color;
/// use tile_grid::buffer::DataBuffer;
/// use tile_grid::glyph::Glyph;
///
/// let mut buf = DataBuffer::new(3, 3);
/// buf.fill(Some(Glyph::Index(1)), Some(Color::WHITE), Some(Color::BLACK));
///
/// let cell = buf.get(1, 1).unwrap();
/// assert_eq!(cell.ch, Some(Glyph::Index(1)));
/// assert_eq!(cell.fg.to_int(), 0xfff);
/// assert_eq!(cell.bg.to_int(), 0x000);
/// assert!(buf.get(3, 0).is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct DataBuffer {
    width: u16,
    height: u16,
    cells: Vec<Mixer>,
}

impl DataBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// A `width × height` grid of unset mixers.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Mixer::UNSET; area(width, height)],
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

    /// `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(x, y)` is inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: u16, y: u16) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            Err(GridError::OutOfBounds {
                x: usize::from(x),
                y: usize::from(y),
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The mixer at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] outside the grid.
    pub fn get(&self, x: u16, y: u16) -> Result<&Mixer> {
        let i = self.index(x, y)?;
        Ok(&self.cells[i])
    }

    /// The mixer at `(x, y)`, mutably.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] outside the grid.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Result<&mut Mixer> {
        let i = self.index(x, y)?;
        Ok(&mut self.cells[i])
    }

    /// All mixers in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Mixer] {
        &self.cells
    }

    /// All mixers in row-major order, mutably.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Mixer] {
        &mut self.cells
    }

    /// Iterate mixers with their `(x, y)` coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Mixer)> {
        let w = usize::from(self.width).max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            // Safe truncation: x < width (u16) and y < height (u16).
            ((i % w) as u16, (i / w) as u16, cell)
        })
    }

    // ─── Resize ──────────────────────────────────────────────────────────

    /// Change the grid size.
    ///
    /// Same size: nothing happens. Otherwise the flat store grows with
    /// unset mixers or is truncated.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        debug!(
            "DataBuffer: resize {}x{} -> {width}x{height}",
            self.width, self.height
        );
        self.width = width;
        self.height = height;
        self.cells.resize(area(width, height), Mixer::UNSET);
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// [`Mixer::draw`] at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] outside the grid.
    pub fn draw(
        &mut self,
        x: u16,
        y: u16,
        ch: Option<Glyph>,
        fg: Option<Color>,
        bg: Option<Color>,
    ) -> Result<()> {
        self.get_mut(x, y)?.draw(ch, fg, bg);
        Ok(())
    }

    /// [`Mixer::draw_sprite`] at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] outside the grid.
    pub fn draw_sprite(
        &mut self,
        x: u16,
        y: u16,
        sprite: &Sprite,
        opacity: Option<f32>,
    ) -> Result<()> {
        self.get_mut(x, y)?.draw_sprite(sprite, opacity);
        Ok(())
    }

    /// Draw the same parts on every cell. Replaces, never blends.
    pub fn fill(&mut self, ch: Option<Glyph>, fg: Option<Color>, bg: Option<Color>) {
        for cell in &mut self.cells {
            cell.draw(ch, fg, bg);
        }
    }

    /// Become a deep copy of `other`, resizing to its size first.
    pub fn copy_from(&mut self, other: &Self) {
        self.resize(other.width, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Blank glyph 0, black on black, everywhere.
    pub fn black_out_all(&mut self) {
        self.cells.fill(Mixer::BLACK);
    }

    /// Blank glyph 0, black on black, at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] outside the grid.
    pub fn black_out(&mut self, x: u16, y: u16) -> Result<()> {
        self.get_mut(x, y)?.black_out();
        Ok(())
    }

    /// Back to unset everywhere.
    pub fn nullify_all(&mut self) {
        self.cells.fill(Mixer::UNSET);
    }
}

impl fmt::Debug for DataBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataBuffer({}x{})", self.width, self.height)
    }
}

#[inline]
fn area(width: u16, height: u16) -> usize {
    usize::from(width) * usize::from(height)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
