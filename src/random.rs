//! Injectable random number source
//!
//! Every randomized decision in the crate (terrain picks, region groups,
//! glyph/colour truncation) goes through [`RandomSource::draw`], so tests can
//! substitute a deterministic source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform floats in `[min, max)`
///
/// Any `FnMut(f64, f64) -> f64` closure is a `RandomSource`:
///
/// ```rust
/// use voronoi_tilemap::RandomSource;
///
/// let mut always_min = |min: f64, _max: f64| min;
/// assert_eq!(always_min.rand_int(3, 9), 3);
/// ```
pub trait RandomSource {
    /// Draw a float between `min` and `max`
    fn draw(&mut self, min: f64, max: f64) -> f64;

    /// Draw an integer as `round(draw(min, max))`
    fn rand_int(&mut self, min: i64, max: i64) -> i64 {
        self.draw(min as f64, max as f64).round() as i64
    }
}

impl<F> RandomSource for F
where
    F: FnMut(f64, f64) -> f64,
{
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        self(min, max)
    }
}

/// Pick an index into a collection of `len` items
///
/// Uses `rand_int(0, len - 1)`, clamped so that an injected source returning
/// values outside the requested range still yields a valid index. Returns
/// `None` for an empty collection.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max = len as i64 - 1;
    Some(rng.rand_int(0, max).clamp(0, max) as usize)
}

/// Default random source backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Create a deterministic source from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        let unit: f64 = self.rng.gen();
        min + unit * (max - min)
    }
}
