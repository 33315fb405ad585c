// SPDX-License-Identifier: MIT
//
// Glyphs and glyph tables.
//
// A cell's glyph is either a character or a raw index into the surface's
// glyph atlas. Characters are resolved to indices when a buffer is packed
// into a layer; indices pass through untouched. The packed format stores a
// single byte per glyph, so an atlas holds at most 256 entries.
//
// Atlas tiles are one cell wide. Characters that take two terminal columns
// (CJK, most emoji) or none (combining marks, controls) have no place in a
// glyph table and are rejected when registered.

use std::collections::HashMap;
use std::fmt;

use unicode_width::UnicodeWidthChar;

use crate::error::{GridError, Result};

// ─── Glyph ───────────────────────────────────────────────────────────────────

/// What a cell shows: a character, or an atlas index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Resolved through the surface's [`GlyphResolver`] at pack time.
    Char(char),
    /// A direct atlas index.
    Index(u8),
}

impl Glyph {
    /// The atlas index for this glyph, if the resolver knows it.
    #[inline]
    #[must_use]
    pub fn resolve<R: GlyphResolver + ?Sized>(self, resolver: &R) -> Option<u8> {
        match self {
            Self::Char(ch) => resolver.for_char(ch),
            Self::Index(i) => Some(i),
        }
    }
}

impl From<char> for Glyph {
    fn from(ch: char) -> Self {
        Self::Char(ch)
    }
}

impl From<u8> for Glyph {
    fn from(index: u8) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Index(i) => write!(f, "#{i}"),
        }
    }
}

// ─── GlyphResolver ───────────────────────────────────────────────────────────

/// Maps characters to atlas indices.
pub trait GlyphResolver {
    /// The atlas index for `ch`, or `None` when the atlas has no such glyph.
    fn for_char(&self, ch: char) -> Option<u8>;
}

impl<F> GlyphResolver for F
where
    F: Fn(char) -> Option<u8>,
{
    fn for_char(&self, ch: char) -> Option<u8> {
        self(ch)
    }
}

// ─── GlyphMap ────────────────────────────────────────────────────────────────

/// Box-drawing, block and symbol glyphs placed after the ASCII range.
const EXTENDED: &[char] = &[
    '─', '│', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼', //
    '═', '║', '╔', '╗', '╚', '╝', //
    '░', '▒', '▓', '█', '▀', '▄', '▌', '▐', //
    '·', '•', '◆', '◇', '○', '●', '■', '□', '▲', '▼', '◀', '▶', //
    '♠', '♣', '♥', '♦', '≈', '°', '±', '÷', '×', '¤',
];

/// First atlas index of the extended glyphs.
pub const EXTENDED_BASE: u8 = 128;

/// A two-way character ↔ atlas index table.
///
/// The default table reserves index 0 as the blank tile, places printable
/// ASCII at its own code point and puts box-drawing, block and symbol
/// glyphs from index 128 on.
///
/// # Examples
///
/// ```
/// use tile_grid::glyph::{GlyphMap, GlyphResolver};
///
/// let mut map = GlyphMap::default();
/// assert_eq!(map.for_char('A'), Some(65));
/// assert_eq!(map.for_char('─'), Some(128));
/// assert_eq!(map.char_for(65), Some('A'));
///
/// map.insert('λ', 200).unwrap();
/// assert_eq!(map.for_char('λ'), Some(200));
/// assert!(map.insert('中', 201).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphMap {
    by_char: HashMap<char, u8>,
    by_index: Vec<Option<char>>,
}

impl GlyphMap {
    /// A table with nothing mapped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_char: HashMap::new(),
            by_index: vec![None; 256],
        }
    }

    /// Map `ch` to `index`, replacing whatever either side was mapped to.
    ///
    /// # Errors
    ///
    /// [`GridError::WideGlyph`] if `ch` is not exactly one column wide.
    pub fn insert(&mut self, ch: char, index: u8) -> Result<()> {
        if ch.width() != Some(1) {
            return Err(GridError::WideGlyph(ch));
        }
        if let Some(old) = self.by_index[usize::from(index)] {
            self.by_char.remove(&old);
        }
        if let Some(old) = self.by_char.insert(ch, index) {
            self.by_index[usize::from(old)] = None;
        }
        self.by_index[usize::from(index)] = Some(ch);
        Ok(())
    }

    /// The character registered at `index`, for reading packed tiles back.
    #[inline]
    #[must_use]
    pub fn char_for(&self, index: u8) -> Option<char> {
        self.by_index[usize::from(index)]
    }

    /// Number of mapped glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    /// Whether nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }
}

impl GlyphResolver for GlyphMap {
    #[inline]
    fn for_char(&self, ch: char) -> Option<u8> {
        self.by_char.get(&ch).copied()
    }
}

impl Default for GlyphMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for code in 0x20_u8..0x7f {
            map.by_char.insert(char::from(code), code);
            map.by_index[usize::from(code)] = Some(char::from(code));
        }
        for (ch, index) in EXTENDED.iter().zip(EXTENDED_BASE..) {
            map.by_char.insert(*ch, index);
            map.by_index[usize::from(index)] = Some(*ch);
        }
        map
    }
}

impl fmt::Debug for GlyphMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlyphMap({} glyphs)", self.len())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
