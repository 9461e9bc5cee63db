//! Random sources for spin targets.
//!
//! The engine only asks for uniform floats, so tests can swap in a fixed
//! sequence and browsers can seed from the page's own generator.

/// Uniform random numbers for choosing spin targets
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Next integer in `[0, bound)`; returns 0 when `bound` is 0
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let scaled = (self.next_f64() * f64::from(bound)).floor() as u32;
        scaled.min(bound - 1)
    }
}

/// Seedable xorshift64 generator
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator from a seed (zero is remapped, xorshift sticks at 0)
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// Generate next random u64
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Get current state (for checkpointing)
    #[must_use]
    pub const fn state(&self) -> u64 {
        self.state
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RandomSource for Xorshift64 {
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits fill the mantissa exactly
        (self.next_u64() >> 11) as f64 / ((1u64 << 53) as f64)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
