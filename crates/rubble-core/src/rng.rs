//! Deterministic per-voxel PRNG.
//!
//! Pure function: `voxel_hash(index, stream, seed) -> u32`.
//! No state, so replaying the same inputs reproduces the same scene exactly.
//! Uses PCG-style mixing to produce well-distributed u32 values.

/// Hash stream for creation-time lightness jitter.
pub const STREAM_JITTER: u32 = 0;
/// First hash stream for dismantle impulses; six consecutive streams are used.
pub const STREAM_SCATTER: u32 = 16;
/// Hash stream for generator decorations (mist, leaves).
pub const STREAM_GENERATOR: u32 = 64;

/// Hash a voxel index, stream selector and seed into a deterministic pseudo-random u32.
pub fn voxel_hash(index: u32, stream: u32, seed: u32) -> u32 {
    // Combine inputs into a single seed using prime multipliers
    let mut state = index
        .wrapping_mul(0x9E3779B9)
        .wrapping_add(stream.wrapping_mul(0x517CC1B7))
        .wrapping_add(seed.wrapping_mul(0x2545F491));

    // PCG-style mixing rounds
    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);
    state = state.wrapping_mul(0x45D9F3B);
    state = state ^ (state >> 16);

    state
}

/// Convert a hash value to a float in [0, 1).
pub fn hash_to_unit(hash: u32) -> f32 {
    (hash >> 8) as f32 / 16_777_216.0 // 2^24
}

/// Convenience: `hash_to_unit(voxel_hash(..))`.
pub fn unit(index: u32, stream: u32, seed: u32) -> f32 {
    hash_to_unit(voxel_hash(index, stream, seed))
}
