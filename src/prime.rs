//! Prime size selection for slot arrays.
//!
//! Double hashing only visits every slot when the step is coprime with the table size, so slot
//! arrays are always allocated with a prime length.

/// Miller-Rabin witnesses that are deterministic for every `n < 3.3 * 10^24`
const WITNESSES: [u128; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// `a * b mod m` for `a, b < m <= u64::MAX + 1`
fn mul_mod(a: u128, b: u128, m: u128) -> u128 {
    a.wrapping_mul(b).checked_rem(m).unwrap_or(0)
}

/// `base^exp mod m` by square-and-multiply
fn pow_mod(base: u128, exp: u128, m: u128) -> u128 {
    let mut result = 1_u128.checked_rem(m).unwrap_or(0);
    let mut base = base.checked_rem(m).unwrap_or(0);
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Returns `true` if `n` is prime.
///
/// Deterministic Miller-Rabin over the first twelve primes, exact for the whole `usize` range.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    let n = n as u128;
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n == p {
            return true;
        }
        if n.checked_rem(p) == Some(0) {
            return false;
        }
    }

    let n_minus_one = n.saturating_sub(1);
    let twos = n_minus_one.trailing_zeros();
    let odd = n_minus_one.checked_shr(twos).unwrap_or(0);

    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, odd, n);
        if x == 1 || x == n_minus_one {
            continue;
        }
        for _ in 1..twos {
            x = mul_mod(x, x, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`, or `None` when no such prime fits
/// in a `usize`.
///
/// Values below 2 yield 2.
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    (n.max(2)..=usize::MAX).find(|&candidate| is_prime(candidate))
}
