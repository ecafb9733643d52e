//! Hashing and probe sequence computation.
//!
//! Keys are hashed twice with polynomial string hashes that differ only in their multiplier.
//! The first hash picks the starting slot, the second picks the stride between attempts.

/// Multiplier of the hash that selects the first slot of a probe sequence
pub const PRIME_A: u64 = 151;
/// Multiplier of the hash that selects the stride of a probe sequence
pub const PRIME_B: u64 = 163;

/// Polynomial hash of `s` in base `a`, reduced modulo `m`.
///
/// Computes `sum(a^(len - 1 - i) * s[i]) mod m` over the bytes of `s` with Horner's rule,
/// reducing after every byte so arbitrarily long keys cannot overflow. The result lies in
/// `[0, m)`; a modulus of zero yields zero.
#[must_use]
pub fn string_hash(s: &str, a: u64, m: usize) -> usize {
    let modulus = m as u128;
    let hash = s.bytes().fold(0_u128, |hash, byte| {
        hash.wrapping_mul(u128::from(a))
            .wrapping_add(u128::from(byte))
            .checked_rem(modulus)
            .unwrap_or(0)
    });
    narrow(hash)
}

/// Slot index for the `attempt`-th probe of `key` in a table of `size` slots.
///
/// `index = (hash_a + attempt * (hash_b + 1)) mod size`. The stride is at least one, so for a
/// prime `size` and a stride not congruent to zero the sequence visits every slot once within
/// `size` attempts.
#[must_use]
pub fn probe_index(key: &str, size: usize, attempt: usize) -> usize {
    let hash_a = string_hash(key, PRIME_A, size) as u128;
    let hash_b = string_hash(key, PRIME_B, size) as u128;
    let stride = hash_b.wrapping_add(1);

    let index = (attempt as u128)
        .wrapping_mul(stride)
        .wrapping_add(hash_a)
        .checked_rem(size as u128)
        .unwrap_or(0);
    narrow(index)
}

/// Converts a value reduced modulo a `usize` back to `usize`.
///
/// Both callers reduce modulo a `usize`, so the conversion cannot fail; zero is a valid slot in
/// every non-empty table should that ever change.
fn narrow(value: u128) -> usize {
    usize::try_from(value).unwrap_or(0)
}
