//! Deterministic random number stream for combat resolution.
//!
//! Every battle consumes exactly one stream, seeded once from the combat
//! request. All randomness (initiative jitter, tie-breaks, variance rolls,
//! status and loot chances) is drawn from that stream in resolution order,
//! so the same seed always reproduces the same battle and rewards.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed they must
//! produce the same sequence of values. Closures `FnMut() -> f64` implement
//! [`CombatRng`] too, which keeps scripted draws trivial in tests.

use sha2::{Digest, Sha256};

/// Source of uniformly distributed draws in `[0, 1)`.
pub trait CombatRng {
    /// Returns the next draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns true with the given probability.
    ///
    /// Always consumes one draw, even for probabilities of 0 or 1, so that
    /// later rolls stay aligned regardless of data values.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Picks an index in `0..len` uniformly. Returns `None` for `len == 0`
    /// without consuming a draw.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_f64() * len as f64) as usize;
        Some(index.min(len - 1))
    }
}

impl<F> CombatRng for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Two outputs are combined into one 53-bit mantissa for
/// [`CombatRng::next_f64`].
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

impl CombatRng for PcgRng {
    fn next_f64(&mut self) -> f64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        let bits = ((high << 32) | low) >> 11;
        bits as f64 / (1u64 << 53) as f64
    }
}

/// Derives the combat seed from the request timestamp and participants.
///
/// The identifiers are length-prefixed before hashing so that
/// `("ab", "c")` and `("a", "bc")` never collide.
pub fn derive_seed(timestamp_ms: i64, character_id: &str, mission_id: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(timestamp_ms.to_le_bytes());
    for part in [character_id, mission_id] {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}
