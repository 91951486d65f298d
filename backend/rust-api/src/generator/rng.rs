//! Seeded pseudo-random stream shared by the browser client and the server.
//!
//! Both sides must produce the same sequence for the same seed, so every
//! operation here is plain 32-bit wrapping integer arithmetic. Changing any
//! constant breaks replay verification for every session already in flight.

const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hashes a string key into a 32-bit seed.
///
/// Polynomial rolling hash (`h * 31 + unit`) over UTF-16 code units so the
/// result matches what a JavaScript client computes with `charCodeAt`.
pub fn hash_seed(key: &str) -> u32 {
    key.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32))
}

/// Mulberry32 generator over a single 32-bit state word.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Stream for a string key, e.g. `"{seed}-{index}"`.
    pub fn from_key(key: &str) -> Self {
        Self::new(hash_seed(key))
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        (t ^ (t >> 14)) as f64 / TWO_POW_32
    }

    /// Integer in `[min, max]` inclusive. Consumes one draw.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        let span = (max - min + 1) as f64;
        min + (self.next_f64() * span).floor() as i64
    }

    /// Index in `[0, len)`. Consumes one draw.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64() * len as f64).floor() as usize).min(len - 1)
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.index(items.len())]
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fisher-Yates, walking from the tail.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
