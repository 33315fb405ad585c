// SPDX-License-Identifier: MIT
//
// Cell diffing between two scratch grids.
//
// Double-buffered callers keep last frame's grid and compare it with the
// new one to find the cells worth repainting. Colors are compared in their
// packed 12-bit form, which is what ends up on screen: two colors that
// quantize alike count as unchanged, and a null color compares equal to
// black. Glyphs are compared symbolically, without a resolver, so
// `Char('A')` and `Index(65)` differ even when they pack to the same tile.
// Diff grids that came from the same side of the pipeline.

use crate::buffer::DataBuffer;
use crate::error::{GridError, Result};
use crate::mixer::Mixer;

bitflags::bitflags! {
    /// Which parts of a cell changed.
    ///
    /// ```
    /// use tile_grid::diff::Changed;
    ///
    /// let c = Changed::FG | Changed::BG;
    /// assert!(c.contains(Changed::FG));
    /// assert!(!c.contains(Changed::GLYPH));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Changed: u8 {
        const GLYPH = 1 << 0;
        const FG    = 1 << 1;
        const BG    = 1 << 2;
    }
}

/// One cell that differs between two grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub changed: Changed,
}

/// Summary counts of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    /// Cells with at least one changed part.
    pub changed: usize,
    /// Cells identical in packed form.
    pub unchanged: usize,
}

impl DiffStats {
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.changed + self.unchanged
    }
}

fn compare(a: &Mixer, b: &Mixer) -> Changed {
    let mut changed = Changed::empty();
    if a.ch != b.ch {
        changed |= Changed::GLYPH;
    }
    if a.fg.to_int() != b.fg.to_int() {
        changed |= Changed::FG;
    }
    if a.bg.to_int() != b.bg.to_int() {
        changed |= Changed::BG;
    }
    changed
}

fn check_size(prev: &DataBuffer, next: &DataBuffer) -> Result<()> {
    if prev.size() == next.size() {
        Ok(())
    } else {
        Err(GridError::SizeMismatch {
            expected: prev.size(),
            actual: next.size(),
        })
    }
}

/// Every cell whose glyph or packed colors differ, in row-major order.
///
/// # Errors
///
/// [`GridError::SizeMismatch`] if the grids differ in size.
pub fn diff(prev: &DataBuffer, next: &DataBuffer) -> Result<Vec<CellChange>> {
    check_size(prev, next)?;
    Ok(prev
        .iter()
        .zip(next.cells())
        .filter_map(|((x, y, a), b)| {
            let changed = compare(a, b);
            (!changed.is_empty()).then_some(CellChange { x, y, changed })
        })
        .collect())
}

/// Count changed and unchanged cells without collecting them.
///
/// # Errors
///
/// [`GridError::SizeMismatch`] if the grids differ in size.
pub fn stats(prev: &DataBuffer, next: &DataBuffer) -> Result<DiffStats> {
    check_size(prev, next)?;
    let changed = prev
        .cells()
        .iter()
        .zip(next.cells())
        .filter(|(a, b)| !compare(a, b).is_empty())
        .count();
    Ok(DiffStats {
        changed,
        unchanged: prev.len() - changed,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
