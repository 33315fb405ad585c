// SPDX-License-Identifier: MIT
//
// tile-color color model — percentage channels with dancing jitter.
//
// Single-character variable names (r, g, b, h, s, l) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Every channel lives on a 0–100 scale. Arithmetic (add, mix, scale) may push
// a channel outside that range for a while; `clamp()` projects it back and
// the quantizers clamp on their own before rounding.
//
// A color carries seven slots:
//
//   [ r, g, b, rand, red_rand, green_rand, blue_rand ]
//
// The last four are jitter *bounds*, not realized offsets. A "dancing" color
// shimmers: once per frame `bake()` draws from a caller-supplied random
// source and produces a plain color with the jitter zeroed. A color with all
// four bounds at zero is an ordinary RGB color.
//
// The null color is a separate state ("unset", "transparent"). It is not a
// valid RGB value and it short-circuits compositing instead of erroring.
//
// Colors are `Copy` values: every operation returns a new color and leaves
// the receiver untouched.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;
use crate::random::RandomSource;

/// Number of slots in a color: three channels plus four jitter bounds.
pub const SLOTS: usize = 7;

/// Canonical string for the null color.
pub const NULL_CSS: &str = "null color";

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color on a 0–100 percentage scale with optional per-frame jitter.
///
/// # Examples
///
/// ```
/// use tile_color::color::Color;
///
/// let orange = Color::from_hex("#f80").unwrap();
/// assert_eq!(orange.r, 100.0);
/// assert_eq!(orange.g, 53.0);
/// assert_eq!(orange.to_int(), 0xf80);
///
/// // Mixing is linear on every slot.
/// let half = Color::rgb(100.0, 0.0, 0.0).mix(Color::WHITE, 50.0);
/// assert_eq!(half.css_long(), "#ff8080");
///
/// // Null is a state, not a value.
/// assert!(Color::NULL.is_null());
/// assert_eq!(Color::NULL.to_string(), "null color");
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Red, 0–100.
    pub r: f32,
    /// Green, 0–100.
    pub g: f32,
    /// Blue, 0–100.
    pub b: f32,

    /// Jitter bound shared by all three channels (luminosity shimmer).
    pub rand: f32,
    /// Jitter bound for red only.
    pub red_rand: f32,
    /// Jitter bound for green only.
    pub green_rand: f32,
    /// Jitter bound for blue only.
    pub blue_rand: f32,

    null: bool,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// The unset / transparent color.
    pub const NULL: Self = Self {
        r: -1.0,
        g: -1.0,
        b: -1.0,
        rand: 0.0,
        red_rand: 0.0,
        green_rand: 0.0,
        blue_rand: 0.0,
        null: true,
    };

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(100.0, 100.0, 100.0);

    /// A plain color from 0–100 channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r,
            g,
            b,
            rand: 0.0,
            red_rand: 0.0,
            green_rand: 0.0,
            blue_rand: 0.0,
            null: false,
        }
    }

    /// Return a copy with the given jitter bounds.
    ///
    /// `rand` is added equally to all channels when baked; the other three
    /// are independent per channel.
    #[inline]
    #[must_use]
    pub const fn dancing(self, rand: f32, red: f32, green: f32, blue: f32) -> Self {
        Self {
            rand,
            red_rand: red,
            green_rand: green,
            blue_rand: blue,
            ..self
        }
    }

    /// Build from 3 to 7 slots: `[r, g, b, rand, red_rand, green_rand, blue_rand]`.
    ///
    /// With `base256`, the r/g/b values are read on a 0–255 scale and
    /// converted with `round(v * 100 / 255)`. Jitter slots are never rescaled.
    ///
    /// # Errors
    ///
    /// [`ColorError::ArrayLength`] for fewer than 3 or more than 7 values.
    pub fn from_array(values: &[f32], base256: bool) -> Result<Self, ColorError> {
        if !(3..=SLOTS).contains(&values.len()) {
            return Err(ColorError::ArrayLength(values.len()));
        }
        let mut slots = [0.0; SLOTS];
        slots[..values.len()].copy_from_slice(values);
        if base256 {
            for v in &mut slots[..3] {
                *v = from_byte(*v);
            }
        }
        Ok(Self::from_slots(slots))
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional, case-insensitive).
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidHex`] for any other shape or a non-hex digit.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
    }

    /// Decode a packed integer.
    ///
    /// Negative values are the null color. Values up to `0xFFF` are 4-bit
    /// channels (`0xRGB`) unless `base256` forces 8-bit channels
    /// (`0xRRGGBB`); anything larger is always 8-bit.
    ///
    /// # Errors
    ///
    /// [`ColorError::IntOutOfRange`] above `0xFFFFFF`.
    pub fn from_int(value: i64, base256: bool) -> Result<Self, ColorError> {
        if value < 0 {
            return Ok(Self::NULL);
        }
        if value > 0xFF_FFFF {
            return Err(ColorError::IntOutOfRange(value));
        }
        // In range: 0 <= value <= 0xFFFFFF.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = value as u32;
        if v <= 0xFFF && !base256 {
            // Fits: v <= 0xFFF.
            #[allow(clippy::cast_possible_truncation)]
            let rgb = v as u16;
            Ok(Self::from_nibbles(rgb))
        } else {
            Ok(Self::rgb(
                from_byte_u32((v >> 16) & 0xFF),
                from_byte_u32((v >> 8) & 0xFF),
                from_byte_u32(v & 0xFF),
            ))
        }
    }

    /// Decode the low twelve bits as `0xRGB`, 4 bits per channel.
    ///
    /// Bits above `0xFFF` are ignored.
    #[must_use]
    pub fn from_nibbles(rgb: u16) -> Self {
        let v = u32::from(rgb);
        Self::rgb(
            from_nibble((v >> 8) & 0xF),
            from_nibble((v >> 4) & 0xF),
            from_nibble(v & 0xF),
        )
    }

    #[inline]
    const fn from_slots(s: [f32; SLOTS]) -> Self {
        Self {
            r: s[0],
            g: s[1],
            b: s[2],
            rand: s[3],
            red_rand: s[4],
            green_rand: s[5],
            blue_rand: s[6],
            null: false,
        }
    }

    /// All seven slots in order.
    #[inline]
    #[must_use]
    pub const fn slots(self) -> [f32; SLOTS] {
        [
            self.r,
            self.g,
            self.b,
            self.rand,
            self.red_rand,
            self.green_rand,
            self.blue_rand,
        ]
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this is the null color.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.null
    }

    /// Whether any jitter bound is nonzero.
    #[inline]
    #[must_use]
    pub fn is_dancing(self) -> bool {
        !self.null
            && (self.rand != 0.0
                || self.red_rand != 0.0
                || self.green_rand != 0.0
                || self.blue_rand != 0.0)
    }

    /// Hue, saturation and luminosity.
    ///
    /// Hue is in degrees `[0, 360)`; saturation and luminosity are on the
    /// 0–100 scale. Achromatic colors report hue 0. The null color reports
    /// `(0, 0, 0)`.
    #[must_use]
    pub fn hsl(self) -> (f32, f32, f32) {
        if self.null {
            return (0.0, 0.0, 0.0);
        }
        let (r, g, b) = (self.r, self.g, self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l <= 0.0 || l >= 100.0 {
            0.0
        } else if l > 50.0 {
            100.0 * d / (200.0 - max - min)
        } else {
            100.0 * d / (max + min)
        };

        #[allow(clippy::float_cmp)]
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Hue in degrees.
    #[inline]
    #[must_use]
    pub fn h(self) -> f32 {
        self.hsl().0
    }

    /// Saturation, 0–100.
    #[inline]
    #[must_use]
    pub fn s(self) -> f32 {
        self.hsl().1
    }

    /// Luminosity, `(min + max) / 2` on the 0–100 scale.
    #[inline]
    #[must_use]
    pub fn l(self) -> f32 {
        self.hsl().2
    }

    // ─── Range ───────────────────────────────────────────────────────────

    /// Project r, g and b into `[0, 100]`. Jitter bounds are left alone.
    #[must_use]
    pub fn clamp(self) -> Self {
        if self.null {
            return self;
        }
        Self {
            r: self.r.clamp(0.0, 100.0),
            g: self.g.clamp(0.0, 100.0),
            b: self.b.clamp(0.0, 100.0),
            ..self
        }
    }

    /// If the brightest channel exceeds 100, rescale r, g and b so it is
    /// exactly 100. Channel ratios (and so hue) are preserved.
    #[must_use]
    pub fn normalize(self) -> Self {
        if self.null {
            return self;
        }
        let max = self.r.max(self.g).max(self.b);
        if max <= 100.0 {
            return self;
        }
        let f = 100.0 / max;
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            ..self
        }
    }

    // ─── Composition ─────────────────────────────────────────────────────

    /// Interpolate every slot (jitter included) `percent` of the way to `other`.
    ///
    /// `percent` is clamped to `[0, 100]`. A null `other` leaves `self`
    /// unchanged. A null `self` is treated as black first, so mixing onto an
    /// unset color yields a real color; nullify explicitly afterwards if
    /// transparency is wanted.
    #[must_use]
    pub fn mix(self, other: Self, percent: f32) -> Self {
        if other.null {
            return self;
        }
        let base = if self.null { Self::BLACK } else { self };
        let t = percent.clamp(0.0, 100.0) / 100.0;
        let inv = 1.0 - t;
        let a = base.slots();
        let b = other.slots();
        Self::from_slots(std::array::from_fn(|i| a[i].mul_add(inv, b[i] * t)))
    }

    /// Move r, g and b `percent` of the way toward white.
    ///
    /// Jitter is untouched. No-op on null or a non-positive percent.
    #[must_use]
    pub fn lighten(self, percent: f32) -> Self {
        self.toward(100.0, percent)
    }

    /// Move r, g and b `percent` of the way toward black.
    ///
    /// Jitter is untouched. No-op on null or a non-positive percent.
    #[must_use]
    pub fn darken(self, percent: f32) -> Self {
        self.toward(0.0, percent)
    }

    fn toward(self, target: f32, percent: f32) -> Self {
        if self.null || percent <= 0.0 {
            return self;
        }
        let t = percent.min(100.0) / 100.0;
        let inv = 1.0 - t;
        Self {
            r: self.r.mul_add(inv, target * t),
            g: self.g.mul_add(inv, target * t),
            b: self.b.mul_add(inv, target * t),
            ..self
        }
    }

    /// Add `other`, scaled by `percent / 100`, to every slot. Unclamped.
    ///
    /// Pass `100.0` for a plain sum. A null `other` leaves `self` unchanged;
    /// a null `self` returns `other`.
    #[must_use]
    pub fn add(self, other: Self, percent: f32) -> Self {
        if other.null {
            return self;
        }
        if self.null {
            return other;
        }
        let f = percent / 100.0;
        let a = self.slots();
        let b = other.slots();
        Self::from_slots(std::array::from_fn(|i| b[i].mul_add(f, a[i])))
    }

    /// Multiply r, g and b by `percent / 100` (floored at 0).
    ///
    /// `scale(100.0)` returns `self` as-is.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn scale(self, percent: f32) -> Self {
        if self.null || percent == 100.0 {
            return self;
        }
        let f = percent.max(0.0) / 100.0;
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            ..self
        }
    }

    /// Channel-wise `self * other / 100`: `other` acts as a per-channel
    /// percentage. Either side null leaves `self` unchanged.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        if self.null || other.null {
            return self;
        }
        self.multiply_channels(other.r, other.g, other.b)
    }

    /// [`multiply`](Self::multiply) with raw percentages `[r, g, b, ..]`.
    ///
    /// # Errors
    ///
    /// [`ColorError::TooFewChannels`] when fewer than three values are given.
    pub fn multiply_by(self, factors: &[f32]) -> Result<Self, ColorError> {
        let [r, g, b, ..] = *factors else {
            return Err(ColorError::TooFewChannels(factors.len()));
        };
        if self.null {
            return Ok(self);
        }
        Ok(self.multiply_channels(r, g, b))
    }

    fn multiply_channels(self, r: f32, g: f32, b: f32) -> Self {
        Self {
            r: self.r * r / 100.0,
            g: self.g * g / 100.0,
            b: self.b * b / 100.0,
            ..self
        }
    }

    // ─── Jitter ──────────────────────────────────────────────────────────

    /// Realize the jitter bounds into a plain color.
    ///
    /// Draws one sample per nonzero bound, in slot order (`rand`, then red,
    /// green, blue), each realized as `floor(sample * bound)`. The shared
    /// `rand` offset is added to all three channels. The result has zeroed
    /// jitter, so baking it again is a no-op that draws nothing.
    #[must_use]
    pub fn bake<R: RandomSource + ?Sized>(self, rng: &mut R) -> Self {
        if !self.is_dancing() {
            return self;
        }
        let shared = jitter(rng, self.rand);
        let r = self.r + shared + jitter(rng, self.red_rand);
        let g = self.g + shared + jitter(rng, self.green_rand);
        let b = self.b + shared + jitter(rng, self.blue_rand);
        Self::rgb(r, g, b)
    }

    // ─── Quantization ────────────────────────────────────────────────────

    /// 12-bit `0xRGB`, each nibble `round(v / 100 * 15)` after clamping.
    ///
    /// The null color quantizes to 0; check [`is_null`](Self::is_null)
    /// first when the distinction matters.
    #[must_use]
    pub fn to_int(self) -> u32 {
        if self.null {
            return 0;
        }
        let [r, g, b] = self.quantize(15.0);
        (r << 8) | (g << 4) | b
    }

    /// 24-bit `0xRRGGBB`, each byte `round(v / 100 * 255)` after clamping.
    #[must_use]
    pub fn to_int_24(self) -> u32 {
        if self.null {
            return 0;
        }
        let [r, g, b] = self.quantize(255.0);
        (r << 16) | (g << 8) | b
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn quantize(self, max: f32) -> [u32; 3] {
        // Clamped to [0, max] before the cast.
        [self.r, self.g, self.b].map(|v| (v.clamp(0.0, 100.0) / 100.0 * max).round() as u32)
    }

    /// `#rgb` (12-bit) lowercase hex, or [`NULL_CSS`].
    #[must_use]
    pub fn css(self) -> String {
        if self.null {
            return NULL_CSS.to_owned();
        }
        format!("#{:03x}", self.to_int())
    }

    /// `#rrggbb` (24-bit) lowercase hex, or [`NULL_CSS`].
    #[must_use]
    pub fn css_long(self) -> String {
        if self.null {
            return NULL_CSS.to_owned();
        }
        format!("#{:06x}", self.to_int_24())
    }

    /// Compare against a css string: 6-digit form when the string is longer
    /// than 4 characters, 3-digit form otherwise. Case-insensitive.
    #[must_use]
    pub fn equals_css(self, css: &str) -> bool {
        let css = css.trim().to_ascii_lowercase();
        if self.null {
            return css == NULL_CSS;
        }
        if css.len() > 4 {
            self.css_long() == css
        } else {
            self.css() == css
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-3;
        match (self.null, other.null) {
            (true, true) => true,
            (false, false) => self
                .slots()
                .iter()
                .zip(other.slots())
                .all(|(a, b)| (a - b).abs() < EPS),
            _ => false,
        }
    }
}

impl Default for Color {
    /// Default is the null (unset) color.
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.null {
            return write!(f, "Color::NULL");
        }
        write!(f, "Color({:.1}, {:.1}, {:.1}", self.r, self.g, self.b)?;
        if self.is_dancing() {
            write!(
                f,
                " ~{}/{}/{}/{}",
                self.rand, self.red_rand, self.green_rand, self.blue_rand
            )?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Shortest arc between two hue angles, in degrees.
#[inline]
#[must_use]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

#[allow(clippy::cast_possible_truncation)]
fn jitter<R: RandomSource + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound == 0.0 {
        return 0.0;
    }
    // Bounds are small percentages; the product fits an f32 comfortably.
    (rng.random() * f64::from(bound)).floor() as f32
}

#[inline]
fn from_byte(v: f32) -> f32 {
    (v * 100.0 / 255.0).round()
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn from_byte_u32(v: u32) -> f32 {
    from_byte(v as f32)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn from_nibble(v: u32) -> f32 {
    (v as f32 * 100.0 / 15.0).round()
}

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #rgb
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb(
                from_nibble(r.into()),
                from_nibble(g.into()),
                from_nibble(b.into()),
            ))
        }
        // #rrggbb
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb(
                from_byte_u32(r.into()),
                from_byte_u32(g.into()),
                from_byte_u32(b.into()),
            ))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some((hi << 4) | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Sequence;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn short_hex_decodes_on_nibble_grid() {
        let c = Color::from_hex("#f80").unwrap();
        assert_eq!((c.r, c.g, c.b), (100.0, 53.0, 0.0));
        assert_eq!(c.to_int(), 0xf80);
    }

    #[test]
    fn long_hex_decodes_on_byte_grid() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!((c.r, c.g, c.b), (100.0, 50.0, 0.0));
        assert_eq!(c.css_long(), "#ff8000");
    }

    #[test]
    fn nibbles_ignore_bits_above_twelve() {
        assert_eq!(Color::from_nibbles(0x1f00), Color::rgb(100.0, 0.0, 0.0));
        assert_eq!(Color::from_nibbles(0xf80).to_int(), 0xf80);
        assert_eq!(Color::from_nibbles(0x4a7), Color::from_int(0x4a7, false).unwrap());
    }

    #[test]
    fn hex_is_case_insensitive_and_hash_optional() {
        assert_eq!(Color::from_hex("ABC").unwrap(), Color::from_hex("#abc").unwrap());
    }

    #[test]
    fn malformed_hex_is_an_error() {
        for bad in ["", "#", "#12", "#1234", "#12345", "#ggg", "red"] {
            assert_eq!(
                Color::from_hex(bad),
                Err(ColorError::InvalidHex(bad.to_owned())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_str_parses_hex() {
        let c: Color = " #00f ".parse().unwrap();
        assert_eq!(c.to_int(), 0x00f);
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn array_of_three_has_no_jitter() {
        let c = Color::from_array(&[10.0, 20.0, 30.0], false).unwrap();
        assert_eq!(c, Color::rgb(10.0, 20.0, 30.0));
        assert!(!c.is_dancing());
    }

    #[test]
    fn array_of_seven_fills_jitter() {
        let c = Color::from_array(&[10.0, 20.0, 30.0, 5.0, 1.0, 2.0, 3.0], false).unwrap();
        assert_eq!(c.slots(), [10.0, 20.0, 30.0, 5.0, 1.0, 2.0, 3.0]);
        assert!(c.is_dancing());
    }

    #[test]
    fn array_base256_rescales_channels_only() {
        let c = Color::from_array(&[255.0, 128.0, 0.0, 10.0], true).unwrap();
        assert_eq!(c.slots(), [100.0, 50.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn array_length_is_checked() {
        assert_eq!(
            Color::from_array(&[1.0, 2.0], false),
            Err(ColorError::ArrayLength(2))
        );
        assert_eq!(
            Color::from_array(&[0.0; 8], false),
            Err(ColorError::ArrayLength(8))
        );
    }

    #[test]
    fn int_small_is_nibbles() {
        let c = Color::from_int(0xfff, false).unwrap();
        assert_eq!(c, Color::WHITE);
        let c = Color::from_int(0x00f, false).unwrap();
        assert_eq!(c, Color::rgb(0.0, 0.0, 100.0));
    }

    #[test]
    fn int_base256_forces_bytes() {
        let c = Color::from_int(0xff, true).unwrap();
        assert_eq!(c, Color::rgb(0.0, 0.0, 100.0));
        let c = Color::from_int(0x0f0f, true).unwrap();
        assert_eq!(c, Color::rgb(0.0, 6.0, 6.0));
    }

    #[test]
    fn int_large_is_bytes() {
        let c = Color::from_int(0xff_8000, false).unwrap();
        assert_eq!(c, Color::rgb(100.0, 50.0, 0.0));
    }

    #[test]
    fn int_negative_is_null() {
        assert!(Color::from_int(-1, false).unwrap().is_null());
    }

    #[test]
    fn int_too_large_is_an_error() {
        assert_eq!(
            Color::from_int(0x100_0000, false),
            Err(ColorError::IntOutOfRange(0x100_0000))
        );
    }

    // ── Null ─────────────────────────────────────────────────────────────

    #[test]
    fn null_equals_only_null() {
        assert_eq!(Color::NULL, Color::NULL);
        assert_ne!(Color::NULL, Color::BLACK);
        assert_ne!(Color::BLACK, Color::NULL);
        assert_eq!(Color::default(), Color::NULL);
    }

    #[test]
    fn null_short_circuits_arithmetic() {
        let c = Color::rgb(40.0, 50.0, 60.0);
        assert_eq!(c.add(Color::NULL, 100.0), c);
        assert_eq!(c.multiply(Color::NULL), c);
        assert_eq!(c.mix(Color::NULL, 50.0), c);
        assert_eq!(Color::NULL.add(c, 100.0), c);
        assert!(Color::NULL.multiply(c).is_null());
        assert!(Color::NULL.scale(50.0).is_null());
        assert!(Color::NULL.lighten(50.0).is_null());
        assert!(Color::NULL.darken(50.0).is_null());
        assert!(Color::NULL.clamp().is_null());
        assert!(Color::NULL.normalize().is_null());
    }

    #[test]
    fn mixing_into_null_starts_from_black() {
        let mixed = Color::NULL.mix(Color::WHITE, 50.0);
        assert!(!mixed.is_null());
        assert_eq!(mixed, Color::rgb(50.0, 50.0, 50.0));
    }

    #[test]
    fn null_quantizes_to_zero_and_prints_sentinel() {
        assert_eq!(Color::NULL.to_int(), 0);
        assert_eq!(Color::NULL.to_int_24(), 0);
        assert_eq!(Color::NULL.css(), NULL_CSS);
        assert_eq!(Color::NULL.css_long(), NULL_CSS);
        assert!(Color::NULL.equals_css("null color"));
        assert!(!Color::NULL.equals_css("#000"));
    }

    // ── Composition ──────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints_are_exact() {
        let a = Color::rgb(10.0, 20.0, 30.0).dancing(4.0, 0.0, 0.0, 0.0);
        let b = Color::rgb(90.0, 80.0, 70.0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 100.0), b);
    }

    #[test]
    fn mix_interpolates_jitter_too() {
        let a = Color::rgb(0.0, 0.0, 0.0).dancing(10.0, 0.0, 0.0, 0.0);
        let b = Color::rgb(100.0, 100.0, 100.0);
        let m = a.mix(b, 50.0);
        assert!(approx_eq(m.rand, 5.0, 1e-4));
        assert!(approx_eq(m.r, 50.0, 1e-4));
    }

    #[test]
    fn mix_percent_is_clamped() {
        let a = Color::rgb(10.0, 10.0, 10.0);
        let b = Color::rgb(90.0, 90.0, 90.0);
        assert_eq!(a.mix(b, 250.0), b);
        assert_eq!(a.mix(b, -20.0), a);
    }

    #[test]
    fn lighten_and_darken_leave_jitter() {
        let c = Color::rgb(50.0, 50.0, 50.0).dancing(8.0, 1.0, 2.0, 3.0);
        let light = c.lighten(50.0);
        assert!(approx_eq(light.r, 75.0, 1e-4));
        assert_eq!(light.rand, 8.0);
        let dark = c.darken(50.0);
        assert!(approx_eq(dark.g, 25.0, 1e-4));
        assert_eq!(dark.blue_rand, 3.0);
    }

    #[test]
    fn lighten_non_positive_is_noop() {
        let c = Color::rgb(50.0, 40.0, 30.0);
        assert_eq!(c.lighten(0.0), c);
        assert_eq!(c.darken(-10.0), c);
    }

    #[test]
    fn add_is_scaled_and_unclamped() {
        let c = Color::rgb(80.0, 50.0, 10.0);
        let sum = c.add(Color::rgb(40.0, 40.0, 40.0), 100.0);
        assert_eq!(sum, Color::rgb(120.0, 90.0, 50.0));
        let half = c.add(Color::rgb(40.0, 40.0, 40.0), 50.0);
        assert_eq!(half, Color::rgb(100.0, 70.0, 30.0));
        assert_eq!(sum.clamp(), Color::rgb(100.0, 90.0, 50.0));
    }

    #[test]
    fn scale_hundred_is_identity() {
        let c = Color::rgb(33.0, 66.0, 99.0);
        assert_eq!(c.scale(100.0), c);
        assert_eq!(c.scale(50.0), Color::rgb(16.5, 33.0, 49.5));
        assert_eq!(c.scale(-5.0), Color::rgb(0.0, 0.0, 0.0));
    }

    #[test]
    fn multiply_treats_other_as_percentages() {
        let c = Color::rgb(80.0, 60.0, 40.0);
        let m = c.multiply(Color::rgb(50.0, 100.0, 0.0));
        assert_eq!(m, Color::rgb(40.0, 60.0, 0.0));
    }

    #[test]
    fn multiply_by_needs_three_channels() {
        let c = Color::rgb(80.0, 60.0, 40.0);
        assert_eq!(c.multiply_by(&[50.0, 50.0]), Err(ColorError::TooFewChannels(2)));
        assert_eq!(
            c.multiply_by(&[50.0, 50.0, 50.0, 999.0]).unwrap(),
            Color::rgb(40.0, 30.0, 20.0)
        );
    }

    #[test]
    fn normalize_caps_brightest_channel() {
        let c = Color::rgb(200.0, 100.0, 50.0).normalize();
        assert_eq!(c, Color::rgb(100.0, 50.0, 25.0));
        let in_range = Color::rgb(90.0, 10.0, 0.0);
        assert_eq!(in_range.normalize(), in_range);
    }

    #[test]
    fn clamp_projects_channels_only() {
        let c = Color::rgb(-5.0, 50.0, 130.0).dancing(200.0, 0.0, 0.0, 0.0);
        let clamped = c.clamp();
        assert_eq!((clamped.r, clamped.g, clamped.b), (0.0, 50.0, 100.0));
        assert_eq!(clamped.rand, 200.0);
    }

    // ── HSL ──────────────────────────────────────────────────────────────

    #[test]
    fn hsl_primaries() {
        let (h, s, l) = Color::rgb(100.0, 0.0, 0.0).hsl();
        assert!(approx_eq(h, 0.0, 1e-3) && approx_eq(s, 100.0, 1e-3) && approx_eq(l, 50.0, 1e-3));
        assert!(approx_eq(Color::rgb(0.0, 100.0, 0.0).h(), 120.0, 1e-3));
        assert!(approx_eq(Color::rgb(0.0, 0.0, 100.0).h(), 240.0, 1e-3));
        assert!(approx_eq(Color::rgb(100.0, 0.0, 100.0).h(), 300.0, 1e-3));
    }

    #[test]
    fn hsl_grays_have_no_saturation() {
        assert_eq!(Color::rgb(40.0, 40.0, 40.0).hsl(), (0.0, 0.0, 40.0));
        assert_eq!(Color::WHITE.s(), 0.0);
        assert_eq!(Color::WHITE.l(), 100.0);
    }

    #[test]
    fn luminosity_is_min_max_midpoint() {
        assert!(approx_eq(Color::rgb(80.0, 20.0, 50.0).l(), 50.0, 1e-4));
    }

    #[test]
    fn saturation_zero_when_luminosity_saturates() {
        // Out of range but l >= 100 must not divide by zero.
        assert_eq!(Color::rgb(150.0, 100.0, 50.0).s(), 0.0);
    }

    #[test]
    fn saturation_zero_when_luminosity_bottoms_out() {
        let (h, s, l) = Color::rgb(-10.0, 10.0, 0.0).hsl();
        assert_eq!((s, l), (0.0, 0.0));
        assert!(h.is_finite());
        assert_eq!(Color::rgb(-30.0, 10.0, 0.0).s(), 0.0);
    }

    // ── Bake ─────────────────────────────────────────────────────────────

    #[test]
    fn bake_shares_rand_across_channels() {
        let c = Color::rgb(10.0, 20.0, 30.0).dancing(10.0, 0.0, 0.0, 0.0);
        let mut seq = Sequence::new(vec![0.55]);
        let baked = c.bake(&mut seq);
        assert_eq!(baked, Color::rgb(15.0, 25.0, 35.0));
        assert_eq!(seq.drawn(), 1);
        assert!(!baked.is_dancing());
    }

    #[test]
    fn bake_draws_independent_channel_samples() {
        let c = Color::rgb(10.0, 20.0, 30.0).dancing(10.0, 20.0, 20.0, 20.0);
        let mut seq = Sequence::new(vec![0.5, 0.1, 0.5, 0.99]);
        let baked = c.bake(&mut seq);
        // shared = 5, red = 2, green = 10, blue = 19
        assert_eq!(baked, Color::rgb(17.0, 35.0, 54.0));
        assert_eq!(seq.drawn(), 4);
    }

    #[test]
    fn bake_only_draws_for_nonzero_bounds() {
        let c = Color::rgb(0.0, 0.0, 0.0).dancing(0.0, 0.0, 10.0, 0.0);
        let mut seq = Sequence::new(vec![0.5]);
        let baked = c.bake(&mut seq);
        assert_eq!(baked, Color::rgb(0.0, 5.0, 0.0));
        assert_eq!(seq.drawn(), 1);
    }

    #[test]
    fn bake_is_idempotent_and_leaves_original() {
        let c = Color::rgb(50.0, 50.0, 50.0).dancing(20.0, 0.0, 0.0, 0.0);
        let mut seq = Sequence::new(vec![0.3]);
        let once = c.bake(&mut seq);
        let twice = once.bake(&mut seq);
        assert_eq!(once, twice);
        assert_eq!(seq.drawn(), 1);
        assert!(c.is_dancing());
    }

    #[test]
    fn bake_plain_and_null_draw_nothing() {
        let mut seq = Sequence::new(vec![0.9]);
        let plain = Color::rgb(1.0, 2.0, 3.0);
        assert_eq!(plain.bake(&mut seq), plain);
        assert!(Color::NULL.bake(&mut seq).is_null());
        assert_eq!(seq.drawn(), 0);
    }

    // ── Quantization & CSS ───────────────────────────────────────────────

    #[test]
    fn quantization_clamps_and_rounds_half_away() {
        assert_eq!(Color::rgb(150.0, -20.0, 50.0).to_int(), 0xf08);
        assert_eq!(Color::rgb(150.0, -20.0, 50.0).to_int_24(), 0xff_0080);
    }

    #[test]
    fn css_is_zero_padded_lowercase() {
        let c = Color::rgb(0.0, 0.0, 100.0);
        assert_eq!(c.css(), "#00f");
        assert_eq!(c.css_long(), "#0000ff");
        assert_eq!(format!("{c}"), "#00f");
    }

    #[test]
    fn equals_css_picks_width_from_string() {
        let c = Color::from_hex("#f80").unwrap();
        assert!(c.equals_css("#f80"));
        assert!(c.equals_css("#FF8700"));
        assert!(!c.equals_css("#ff8800"));
    }

    #[test]
    fn debug_shows_jitter() {
        let c = Color::rgb(1.0, 2.0, 3.0).dancing(4.0, 0.0, 0.0, 0.0);
        assert_eq!(format!("{c:?}"), "Color(1.0, 2.0, 3.0 ~4/0/0/0)");
        assert_eq!(format!("{:?}", Color::NULL), "Color::NULL");
    }

    #[test]
    fn hue_distance_wraps() {
        assert!(approx_eq(hue_distance(350.0, 10.0), 20.0, 1e-4));
        assert!(approx_eq(hue_distance(0.0, 180.0), 180.0, 1e-4));
    }
}
