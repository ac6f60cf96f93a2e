//! Canonicalised integer arithmetic modulo a prime.
//!
//! Every function in this module takes its operands as arbitrary-precision
//! integers and returns the representative in `[0, p)`. Signed values only
//! enter through [modulo], so a negative representation never reaches a
//! commitment or a transcript.

use crate::error::{ArithmeticError, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::mem;

/// Returns the canonical (non-negative) representative of `x` modulo `p`.
pub fn modulo(x: &BigInt, p: &BigUint) -> BigUint {
    let p = BigInt::from(p.clone());
    // mod_floor takes the sign of the divisor, which is positive here
    let (_, magnitude) = x.mod_floor(&p).into_parts();
    magnitude
}

pub fn mod_add(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

pub fn mod_sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a % p + p - b % p) % p
}

pub fn mod_mul(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

/// Computes `base^exponent mod p` assuming `p` is prime, so that the exponent
/// can first be reduced modulo `p - 1`.
pub fn mod_exp(base: &BigUint, exponent: &BigUint, p: &BigUint) -> BigUint {
    let base = base % p;
    if base.is_zero() {
        // the reduction below would turn 0^(p-1) into 0^0
        return if exponent.is_zero() {
            BigUint::one() % p
        } else {
            BigUint::zero()
        };
    }
    let exponent = exponent % (p - 1u32);
    mod_exp_no_prime(&base, &exponent, p)
}

/// Computes `base^exponent mod q` by square-and-multiply, without assuming
/// anything about `q`.
pub fn mod_exp_no_prime(base: &BigUint, exponent: &BigUint, q: &BigUint) -> BigUint {
    if q.is_one() {
        return BigUint::zero();
    }
    base.modpow(exponent, q)
}

/// Inverts `a` modulo `p` with the extended Euclidean algorithm.
///
/// # Errors
///
/// Returns [ArithmeticError::NonInvertibleElement] if `a ≡ 0 (mod p)` or if
/// `a` and `p` are not coprime.
pub fn mod_inverse(a: &BigUint, p: &BigUint) -> Result<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Err(ArithmeticError::NonInvertibleElement);
    }

    // invariant: old_s * a ≡ old_r (mod p)
    let (mut old_r, mut r) = (BigInt::from(a), BigInt::from(p.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(ArithmeticError::NonInvertibleElement);
    }
    Ok(modulo(&old_s, p))
}

/// Inverts every element of `values` with a single modular inversion.
///
/// With `prods[i] = a_0 ⋯ a_{i-1}`, the total product is inverted once and the
/// backward walk peels off `1/(a_0 ⋯ a_i)` one element at a time, so that
/// `1/a_i = prods[i] / (a_0 ⋯ a_i)`.
///
/// # Errors
///
/// Fails with [ArithmeticError::NonInvertibleElement] if any element is zero.
pub fn batch_inverse(values: &[BigUint], p: &BigUint) -> Result<Vec<BigUint>> {
    let n = values.len();
    if n == 0 {
        return Ok(vec![]);
    }

    let mut prods = Vec::with_capacity(n);
    let mut prod = BigUint::one();
    for a in values {
        prods.push(prod.clone());
        prod = mod_mul(&prod, a, p);
    }

    let mut inv_prod = mod_inverse(&prod, p)?;
    let mut inverses = vec![BigUint::zero(); n];
    for i in (0..n).rev() {
        inverses[i] = mod_mul(&prods[i], &inv_prod, p);
        inv_prod = mod_mul(&values[i], &inv_prod, p);
    }
    Ok(inverses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(x: u64) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn test_modulo_is_canonical() {
        let p = big(337);
        assert_eq!(modulo(&BigInt::from(-1), &p), big(336));
        assert_eq!(modulo(&BigInt::from(-337 * 3), &p), big(0));
        assert_eq!(modulo(&BigInt::from(1000), &p), big(1000 % 337));
    }

    #[test]
    fn test_mod_sub_wraps() {
        let p = big(337);
        assert_eq!(mod_sub(&big(3), &big(5), &p), big(335));
        assert_eq!(mod_sub(&big(5), &big(3), &p), big(2));
    }

    #[test]
    fn test_mod_exp() {
        let p = big(337);
        assert_eq!(mod_exp(&big(85), &big(8), &p), big(1));
        assert_eq!(mod_exp(&big(3), &big(0), &p), big(1));
        // Fermat: a^(p-1) = 1, but 0^(p-1) = 0
        assert_eq!(mod_exp(&big(5), &big(336), &p), big(1));
        assert_eq!(mod_exp(&big(0), &big(336), &p), big(0));
        assert_eq!(mod_exp(&big(0), &big(0), &p), big(1));
    }

    #[test]
    fn test_mod_exp_no_prime() {
        assert_eq!(mod_exp_no_prime(&big(2), &big(10), &big(1000)), big(24));
        assert_eq!(mod_exp_no_prime(&big(7), &big(3), &big(1)), big(0));
    }

    #[test]
    fn test_mod_inverse() {
        let p = big(337);
        for a in 1..337 {
            let inv = mod_inverse(&big(a), &p).unwrap();
            assert_eq!(mod_mul(&big(a), &inv, &p), big(1));
        }
        assert_eq!(
            mod_inverse(&big(0), &p),
            Err(ArithmeticError::NonInvertibleElement)
        );
        assert_eq!(
            mod_inverse(&big(674), &p),
            Err(ArithmeticError::NonInvertibleElement)
        );
        // not coprime
        assert_eq!(
            mod_inverse(&big(6), &big(9)),
            Err(ArithmeticError::NonInvertibleElement)
        );
    }

    #[test]
    fn test_batch_inverse_rejects_zero() {
        let p = big(337);
        assert_eq!(
            batch_inverse(&[big(3), big(0), big(7)], &p),
            Err(ArithmeticError::NonInvertibleElement)
        );
        assert_eq!(batch_inverse(&[], &p), Ok(vec![]));
    }
}
