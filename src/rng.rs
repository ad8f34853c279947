//! Deterministic RNG stream (§4.A).
//!
//! A resumable, seeded source of uniform doubles and 32-bit integers.
//! State is a PCG32 generator (two `u64`s: running state + stream
//! selector), so it round-trips through `serde` byte-for-byte and never
//! depends on the host platform's hardware entropy — the entire point is
//! that client and server, computing from the same saved state, draw
//! identical sequences.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Seeded, resumable PRNG. Never touches wall-clock time or OS entropy.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

/// Serializable snapshot of a [`DeterministicRng`]'s internal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState(Pcg32);

impl DeterministicRng {
    /// Derives a fresh stream from a domain seed string (an NPC id, a
    /// resource node coordinate, ...). The same seed string always yields
    /// the same stream, on any platform.
    pub fn from_seed_str(seed: &str) -> Self {
        let (state, stream) = fnv1a_128(seed.as_bytes());
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&state.to_le_bytes());
        bytes[8..16].copy_from_slice(&stream.to_le_bytes());
        Self {
            inner: Pcg32::from_seed(bytes),
        }
    }

    /// Restores a stream from a previously saved state. Drawing N values
    /// after this call reproduces exactly what the original stream would
    /// have drawn next.
    pub fn from_state(state: RngState) -> Self {
        Self { inner: state.0 }
    }

    /// Snapshots the current state for persistence.
    pub fn save_state(&self) -> RngState {
        RngState(self.inner.clone())
    }

    /// Draws a uniform double in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits of a 64-bit draw give a uniform double — the standard
        // construction used by every serious non-cryptographic PRNG wrapper.
        let bits = self.inner.next_u64() >> 11;
        (bits as f64) * (1.0 / (1u64 << 53) as f64)
    }

    /// Draws a 32-bit integer.
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

/// FNV-1a over arbitrary bytes, folded into a 128-bit (state, stream) pair.
/// Chosen over `std`'s randomized `HashMap` hasher because it must be
/// stable across processes and platforms.
fn fnv1a_128(bytes: &[u8]) -> (u64, u64) {
    const OFFSET_A: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut a = OFFSET_A;
    let mut b = OFFSET_A.rotate_left(32);
    for &byte in bytes {
        a ^= byte as u64;
        a = a.wrapping_mul(PRIME);
        b ^= (byte as u64).wrapping_add(1);
        b = b.wrapping_mul(PRIME).rotate_left(13);
    }
    (a, b | 1) // PCG stream selector must be odd
}
