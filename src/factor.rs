//! # Prime factors and the greatest common factor
//!
//! Reduction of a fraction relies on `gcf`, which is computed by factoring both inputs with trial
//! division and intersecting the two factor lists as multisets. A prime that shows up twice in
//! both lists contributes twice, a prime that shows up twice in one list and once in the other
//! contributes once.
//!
//! Trial division costs `O(sqrt(n))` per input.

/// Prime factorization of `|n|`, smallest factor first, repeated factors repeated.
///
/// `1` and `-1` have no factors. `0` factors to `[0]`.
pub fn prime_factors(n: i64) -> Vec<u64> {
    let mut remaining = n.unsigned_abs();
    let mut factors = Vec::new();
    let mut factor = 2u64;
    // factor * factor <= remaining, without overflowing
    while factor <= remaining / factor {
        if remaining % factor == 0 {
            factors.push(factor);
            remaining /= factor;
        } else {
            factor += 1;
        }
    }

    if remaining != 1 {
        factors.push(remaining);
    }

    factors
}

/// Greatest common factor of `a` and `b`, always positive.
///
/// When either side is zero its only "factor" is `0`, so the result is `1` unless both are zero.
pub fn gcf(a: i64, b: i64) -> u64 {
    let mut unmatched = prime_factors(b);
    let mut common = Vec::new();
    for factor in prime_factors(a) {
        if let Some(idx) = unmatched.iter().position(|other| *other == factor) {
            common.push(factor);
            unmatched.remove(idx);
        }
    }

    if common.is_empty() {
        1
    } else {
        common.into_iter().product()
    }
}
