// SPDX-License-Identifier: MIT
//
// Named-color registry and the polymorphic color constructor.
//
// A palette maps lowercase names to colors. It is an explicit value, not a
// process-wide table: whoever builds colors from user data passes the
// palette in, and two palettes never see each other's names.

use std::collections::BTreeMap;

use log::debug;

use crate::color::Color;
use crate::error::ColorError;

// ─── ColorValue ──────────────────────────────────────────────────────────────

/// Anything [`Palette::make`] can turn into a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue<'a> {
    /// The null color.
    Null,
    /// 3 to 7 slots, see [`Color::from_array`].
    Array(&'a [f32]),
    /// `#rgb`, `#rrggbb` or a palette name.
    Str(&'a str),
    /// Packed integer, see [`Color::from_int`].
    Int(i64),
    /// An existing color, returned as-is.
    Color(Color),
}

impl<'a> From<&'a [f32]> for ColorValue<'a> {
    fn from(v: &'a [f32]) -> Self {
        Self::Array(v)
    }
}

impl<'a, const N: usize> From<&'a [f32; N]> for ColorValue<'a> {
    fn from(v: &'a [f32; N]) -> Self {
        Self::Array(v)
    }
}

impl<'a> From<&'a str> for ColorValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for ColorValue<'_> {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ColorValue<'_> {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<Color> for ColorValue<'_> {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl<'a, T: Into<ColorValue<'a>>> From<Option<T>> for ColorValue<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// A registry of named colors.
///
/// # Examples
///
/// ```
/// use tile_color::palette::Palette;
///
/// let mut palette = Palette::default();
/// palette.install("Moss", tile_color::Color::rgb(30.0, 45.0, 20.0));
///
/// let moss = palette.make("moss", false).unwrap();
/// assert_eq!(moss.css(), "#573");
/// assert!(palette.make("#f80", false).is_ok());
/// assert!(palette.make("no-such-color", false).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    /// A palette with no names at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// Register (or replace) a named color. Names are case-insensitive.
    pub fn install(&mut self, name: &str, color: Color) {
        let key = name.trim().to_ascii_lowercase();
        debug!("palette: install {key} = {color:?}");
        self.colors.insert(key, color);
    }

    /// Look up a name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(&name.trim().to_ascii_lowercase()).copied()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Build a color from any supported input.
    ///
    /// Strings starting with `#` are hex; any other string is a palette
    /// name. `base256` selects the 0–255 scale for arrays and forces 8-bit
    /// channels for small integers.
    ///
    /// # Errors
    ///
    /// Whatever the underlying constructor reports, or
    /// [`ColorError::UnknownName`] for a name this palette does not know.
    pub fn make<'a>(
        &self,
        value: impl Into<ColorValue<'a>>,
        base256: bool,
    ) -> Result<Color, ColorError> {
        match value.into() {
            ColorValue::Null => Ok(Color::NULL),
            ColorValue::Array(slots) => Color::from_array(slots, base256),
            ColorValue::Str(s) => {
                let s = s.trim();
                if s.starts_with('#') {
                    Color::from_hex(s)
                } else {
                    self.get(s).ok_or_else(|| ColorError::UnknownName(s.to_owned()))
                }
            }
            ColorValue::Int(v) => Color::from_int(v, base256),
            ColorValue::Color(c) => Ok(c),
        }
    }
}

impl Default for Palette {
    /// The standard named colors.
    fn default() -> Self {
        const NAMED: &[(&str, [f32; 3])] = &[
            ("black", [0.0, 0.0, 0.0]),
            ("white", [100.0, 100.0, 100.0]),
            ("gray", [50.0, 50.0, 50.0]),
            ("dark_gray", [25.0, 25.0, 25.0]),
            ("light_gray", [75.0, 75.0, 75.0]),
            ("red", [100.0, 0.0, 0.0]),
            ("orange", [100.0, 50.0, 0.0]),
            ("yellow", [100.0, 100.0, 0.0]),
            ("lime", [50.0, 100.0, 0.0]),
            ("green", [0.0, 100.0, 0.0]),
            ("teal", [0.0, 50.0, 50.0]),
            ("cyan", [0.0, 100.0, 100.0]),
            ("sky", [0.0, 50.0, 100.0]),
            ("blue", [0.0, 0.0, 100.0]),
            ("violet", [50.0, 0.0, 100.0]),
            ("magenta", [100.0, 0.0, 100.0]),
            ("pink", [100.0, 50.0, 75.0]),
            ("brown", [50.0, 25.0, 0.0]),
        ];

        let colors = NAMED
            .iter()
            .map(|&(name, [r, g, b])| (name.to_owned(), Color::rgb(r, g, b)))
            .collect();
        Self { colors }
    }
}
