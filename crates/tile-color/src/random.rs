// SPDX-License-Identifier: MIT
//
// Random sources for color jitter.
//
// Baking a dancing color draws uniform samples in [0, 1). The source is
// always passed in by the caller, never read from a global, so tests can
// replay an exact sequence and applications can seed per frame.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A uniform random source producing samples in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next sample.
    fn random(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn random(&mut self) -> f64 {
        Standard.sample(self)
    }
}

// ─── SeededRandom ────────────────────────────────────────────────────────────

/// The default jitter source: a `StdRng`, seeded explicitly or from entropy.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// A reproducible source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn random(&mut self) -> f64 {
        Standard.sample(&mut self.rng)
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeededRandom")
    }
}

// ─── Sequence ────────────────────────────────────────────────────────────────

/// Replays a fixed list of samples, wrapping around at the end.
///
/// ```
/// use tile_color::random::{RandomSource, Sequence};
///
/// let mut seq = Sequence::new(vec![0.25, 0.75]);
/// assert_eq!(seq.random(), 0.25);
/// assert_eq!(seq.random(), 0.75);
/// assert_eq!(seq.random(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    samples: Vec<f64>,
    next: usize,
}

impl Sequence {
    /// Samples outside `[0, 1)` are clamped into it. An empty list yields 0.
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| s.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { samples, next: 0 }
    }

    /// How many samples have been drawn so far.
    #[must_use]
    pub const fn drawn(&self) -> usize {
        self.next
    }
}

impl RandomSource for Sequence {
    fn random(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.next % self.samples.len()];
        self.next += 1;
        sample
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
