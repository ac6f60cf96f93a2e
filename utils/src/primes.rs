//! Parameter generation: primality testing, random primes, roots of unity
//! and cosets of the root-of-unity subgroup.
//!
//! Everything that needs randomness takes the generator explicitly; proving
//! and verifying never call into this module.

use crate::{
    biguint_helpers::BigUintHelpers,
    error::{ArithmeticError, Result},
    modular::{mod_exp, mod_exp_no_prime, mod_mul},
    polynomials::powers,
};
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::{CryptoRng, RngCore};

/// Number of entries in [SMALL_PRIMES]
pub const SMALL_PRIME_COUNT: usize = 1000;

/// Default number of Miller-Rabin rounds
pub const MILLER_RABIN_ROUNDS: usize = 10;

/// The first [SMALL_PRIME_COUNT] primes, used for trial division.
pub static SMALL_PRIMES: Lazy<Vec<u32>> = Lazy::new(|| {
    // the 1000th prime is 7919
    const LIMIT: usize = 7920;
    let mut composite = vec![false; LIMIT];
    let mut primes = Vec::with_capacity(SMALL_PRIME_COUNT);
    for i in 2..LIMIT {
        if composite[i] {
            continue;
        }
        primes.push(i as u32);
        for j in (i * i..LIMIT).step_by(i) {
            composite[j] = true;
        }
    }
    primes.truncate(SMALL_PRIME_COUNT);
    primes
});

/// Returns a built-in prime of the given bit size, if there is one.
///
/// The 256-bit prime is the Pallas base field modulus, for which `2^32`
/// divides `p - 1`, so it has roots of unity for every FFT size up to `2^32`.
pub fn large_prime(bits: u32) -> Option<BigUint> {
    let (digits, radix): (&[u8], u32) = match bits {
        256 => (
            b"40000000000000000000000000000000224698fc094cf91b992d30ed00000001",
            16,
        ),
        512 => (
            b"7635864884812004142213145685301029448842881628344592815941449459274259914524547966108634212485176614061528107597724921441853616604056938042089748208144233",
            10,
        ),
        1024 => (
            b"157504965780504614023334664722541728560981130710635270073862108646389561302305908561100988570988580155311773778914144313059319305341352463134445443240472104178221313037238198668989720238174409922800328630409834284445540338696349835638972137809943783541174306819552187964653302389983399933925385355609237488681",
            10,
        ),
        _ => return None,
    };
    BigUint::parse_bytes(digits, radix)
}

/// Samples a uniform integer in the inclusive range `[min, max]` by rejection.
pub fn random_biguint_range(
    min: &BigUint,
    max: &BigUint,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<BigUint> {
    if max < min {
        return Err(ArithmeticError::EmptyRange);
    }
    let span = max - min;
    let bits = span.bits();
    if bits == 0 {
        return Ok(min.clone());
    }
    let byte_length = span.byte_len();
    // mask the top byte so that each draw succeeds with probability > 1/2
    let top_bits = bits - 8 * (byte_length as u64 - 1);
    let mask = (0xffu16 >> (8 - top_bits)) as u8;

    let mut bytes = vec![0u8; byte_length];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[byte_length - 1] &= mask;
        let x = BigUint::from_bytes_le(&bytes);
        if x <= span {
            return Ok(min + x);
        }
    }
}

/// Samples a random integer of `byte_length` bytes. With
/// `enforce_full_length` the top bit is set, so the result has exactly
/// `8 · byte_length` bits.
pub fn random_biguint_length(
    byte_length: usize,
    enforce_full_length: bool,
    rng: &mut (impl RngCore + CryptoRng),
) -> BigUint {
    let mut bytes = vec![0u8; byte_length];
    rng.fill_bytes(&mut bytes);
    if enforce_full_length {
        if let Some(top) = bytes.last_mut() {
            *top |= 0x80;
        }
    }
    BigUint::from_bytes_le(&bytes)
}

/// Miller-Rabin primality test with `rounds` random witnesses, after trial
/// division by [SMALL_PRIMES].
///
/// A `false` is definite; a `true` is wrong with probability at most
/// `4^(-rounds)`.
pub fn miller_rabin_is_odd_prime(
    n: &BigUint,
    rounds: usize,
    rng: &mut (impl RngCore + CryptoRng),
) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    for &small in SMALL_PRIMES.iter() {
        if *n == BigUint::from(small) {
            return true;
        }
        if (n % small).is_zero() {
            return false;
        }
    }

    // n - 1 = 2^r · d with d odd
    let n_minus_one: BigUint = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;
    let two = BigUint::from(2u32);
    let n_minus_two = n - 2u32;

    'witness: for _ in 0..rounds {
        // n is larger than every small prime here, so the range is non-empty
        let Ok(a) = random_biguint_range(&two, &n_minus_two, rng) else {
            return false;
        };
        let mut x = mod_exp_no_prime(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = mod_mul(&x, &x, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// [miller_rabin_is_odd_prime] with [MILLER_RABIN_ROUNDS] rounds.
pub fn is_probable_prime(n: &BigUint, rng: &mut (impl RngCore + CryptoRng)) -> bool {
    miller_rabin_is_odd_prime(n, MILLER_RABIN_ROUNDS, rng)
}

/// Searches for a random prime of exactly `8 · byte_length` bits.
pub fn random_large_prime(
    byte_length: usize,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<BigUint> {
    if byte_length == 0 {
        return Err(ArithmeticError::EmptyRange);
    }
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let candidate = random_biguint_length(byte_length, true, rng) | BigUint::one();
        if is_probable_prime(&candidate, rng) {
            debug!("found a {byte_length}-byte prime after {attempts} candidates");
            return Ok(candidate);
        }
    }
}

/// Returns `(p - 1) / 2^k` if `2^k` divides `p - 1` and `k >= 1`.
fn subgroup_cofactor(k: u32, p: &BigUint) -> Result<BigUint> {
    if k < 1 || *p < BigUint::from(3u32) {
        return Err(ArithmeticError::RootOfUnityUnavailable(k));
    }
    let p_minus_one: BigUint = p - 1u32;
    match p_minus_one.trailing_zeros() {
        Some(two_adicity) if two_adicity >= u64::from(k) => Ok(p_minus_one >> k),
        _ => Err(ArithmeticError::RootOfUnityUnavailable(k)),
    }
}

/// Finds a primitive `2^k`-th root of unity modulo the prime `p`.
///
/// A random `x` raised to `(p-1)/2^k` has order dividing `2^k`; it is
/// primitive exactly when its `2^(k-1)`-th power is not `1`.
pub fn random_root_of_unity(
    k: u32,
    p: &BigUint,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<BigUint> {
    let m = subgroup_cofactor(k, p)?;
    let half_order = BigUint::one() << (k - 1);
    let max = p - 1u32;
    loop {
        let x = random_biguint_range(&BigUint::one(), &max, rng)?;
        let w = mod_exp(&x, &m, p);
        if !mod_exp(&w, &half_order, p).is_one() {
            return Ok(w);
        }
    }
}

/// The ordered subgroup `[1, w, …, w^(2^k - 1)]` for a random primitive
/// `2^k`-th root `w`.
pub fn all_roots_of_unity(
    k: u32,
    p: &BigUint,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Vec<BigUint>> {
    let n = 1usize
        .checked_shl(k)
        .filter(|n| *n != 0)
        .ok_or(ArithmeticError::RootOfUnityUnavailable(k))?;
    let w = random_root_of_unity(k, p, rng)?;
    Ok(powers(&w, n, p))
}

/// Builds `count` pairwise disjoint cosets `k_i · W` of the subgroup `w`.
///
/// Returns `(cosets, cofactors)` with `cofactors[0] = 1`, so the first coset
/// is `W` itself. Two cosets `k·W` and `k'·W` coincide iff `k^n = k'^n`, which
/// is how each new random cofactor is checked against the previous ones.
pub fn cosets(
    w: &[BigUint],
    p: &BigUint,
    count: usize,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<(Vec<Vec<BigUint>>, Vec<BigUint>)> {
    if count == 0 {
        return Ok((vec![], vec![]));
    }
    let n = w.len();
    if n == 0 {
        return Err(ArithmeticError::EmptyDomain);
    }
    if *p < BigUint::from(3u32) {
        return Err(ArithmeticError::EmptyRange);
    }
    let p_minus_one: BigUint = p - 1u32;
    let available = p_minus_one.clone() / n;
    if BigUint::from(count) > available {
        let available = usize::try_from(&available).unwrap_or(usize::MAX);
        return Err(ArithmeticError::TooManyCosets(count, available));
    }

    let n_big = BigUint::from(n);
    let mut cofactors = vec![BigUint::one()];
    let mut fingerprints = vec![BigUint::one()];
    let two = BigUint::from(2u32);
    while cofactors.len() < count {
        let k = random_biguint_range(&two, &p_minus_one, rng)?;
        let fingerprint = mod_exp(&k, &n_big, p);
        if !fingerprints.contains(&fingerprint) {
            cofactors.push(k);
            fingerprints.push(fingerprint);
        }
    }

    let cosets = cofactors
        .iter()
        .map(|k| w.iter().map(|wi| mod_mul(k, wi, p)).collect())
        .collect();
    Ok((cosets, cofactors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::make_test_rng;

    #[test]
    fn test_small_primes_table() {
        assert_eq!(SMALL_PRIMES.len(), SMALL_PRIME_COUNT);
        assert_eq!(SMALL_PRIMES[..5], [2, 3, 5, 7, 11]);
        assert_eq!(SMALL_PRIMES[SMALL_PRIME_COUNT - 1], 7919);
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = make_test_rng(None);
        let min = BigUint::from(10u32);
        let max = BigUint::from(300u32);
        for _ in 0..200 {
            let x = random_biguint_range(&min, &max, &mut rng).unwrap();
            assert!(x >= min && x <= max);
        }
        assert_eq!(
            random_biguint_range(&min, &min, &mut rng),
            Ok(min.clone())
        );
        assert_eq!(
            random_biguint_range(&max, &min, &mut rng),
            Err(ArithmeticError::EmptyRange)
        );
    }

    #[test]
    fn test_random_length_sets_top_bit() {
        let mut rng = make_test_rng(None);
        for _ in 0..20 {
            assert_eq!(random_biguint_length(16, true, &mut rng).bits(), 128);
        }
    }

    #[test]
    fn test_subgroup_cofactor() {
        let p = BigUint::from(337u32);
        // 336 = 2^4 · 21
        assert_eq!(subgroup_cofactor(4, &p), Ok(BigUint::from(21u32)));
        assert_eq!(
            subgroup_cofactor(5, &p),
            Err(ArithmeticError::RootOfUnityUnavailable(5))
        );
        assert_eq!(
            subgroup_cofactor(0, &p),
            Err(ArithmeticError::RootOfUnityUnavailable(0))
        );
    }
}
