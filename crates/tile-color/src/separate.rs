// SPDX-License-Identifier: MIT
//
// Legibility separation for a foreground/background pair.
//
// Two colors that sit close in hue *and* close in luminosity are hard to
// tell apart on a glyph. `separate` pushes them apart along the luminosity
// axis only: the more saturated color is lightened, the less saturated one
// darkened, in small steps until the luminosity gap is wide enough.
//
// Pairs that already differ in hue by more than the threshold, or whose
// luminosity gap is already wide, come back clamped and otherwise untouched.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::{Color, hue_distance};

/// Tuning knobs for [`separate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparateParams {
    /// Hue distance (degrees) above which colors are already distinct.
    pub hue_threshold: f32,
    /// Target luminosity gap on the 0–100 scale.
    pub luminosity_gap: f32,
    /// Percent passed to `lighten`/`darken` per iteration.
    pub step: f32,
    /// Hard cap on iterations; the best effort so far is returned.
    pub max_iterations: u32,
}

impl Default for SeparateParams {
    fn default() -> Self {
        Self {
            hue_threshold: 45.0,
            luminosity_gap: 40.0,
            step: 5.0,
            max_iterations: 100,
        }
    }
}

/// [`separate_with`] using the default parameters.
#[must_use]
pub fn separate(a: Color, b: Color) -> (Color, Color) {
    separate_with(a, b, &SeparateParams::default())
}

/// Push two colors apart in luminosity until they are legible on each other.
///
/// Returns the adjusted pair in argument order. Either input being null
/// returns both inputs unchanged. Never fails: if the iteration cap is
/// reached the pair is returned as far as it got.
#[must_use]
pub fn separate_with(a: Color, b: Color, params: &SeparateParams) -> (Color, Color) {
    if a.is_null() || b.is_null() {
        return (a, b);
    }

    let a = a.clamp();
    let b = b.clamp();
    let (ha, sa, la) = a.hsl();
    let (hb, sb, lb) = b.hsl();

    if hue_distance(ha, hb) > params.hue_threshold || (la - lb).abs() >= params.luminosity_gap {
        return (a, b);
    }

    // Ties go to `a` as the less saturated side.
    let a_is_lo = sa <= sb;
    let (mut lo, mut hi) = if a_is_lo { (a, b) } else { (b, a) };

    let mut iterations = 0;
    while hi.l() - lo.l() < params.luminosity_gap {
        if iterations == params.max_iterations {
            warn!(
                "separate: gave up after {iterations} iterations ({} on {})",
                hi.css_long(),
                lo.css_long()
            );
            break;
        }
        hi = hi.lighten(params.step);
        lo = lo.darken(params.step);
        iterations += 1;
    }

    if a_is_lo { (lo, hi) } else { (hi, lo) }
}
