//! Polynomials over `Z_p` as plain coefficient or evaluation vectors.
//!
//! A polynomial in coefficient form is stored in ascending degree. In
//! evaluation form it holds its values at the ordered roots of unity
//! `W = [1, ω, ω², …]`, and the helpers here work on that form directly:
//! pointwise vector algebra, evaluation at an arbitrary point without
//! interpolating first, and the rotation that realises `f(ωX)`.

use crate::{
    error::{ArithmeticError, Result},
    modular::{batch_inverse, mod_add, mod_exp, mod_inverse, mod_mul, mod_sub, modulo},
};
use itertools::{EitherOrBoth, Itertools};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Canonicalises every entry of a signed vector into `[0, p)`.
pub fn vector_mod(v: &[BigInt], p: &BigUint) -> Vec<BigUint> {
    v.iter().map(|x| modulo(x, p)).collect()
}

/// Pointwise `a + b`; the shorter operand is zero-extended.
pub fn vector_add(a: &[BigUint], b: &[BigUint], p: &BigUint) -> Vec<BigUint> {
    a.iter()
        .zip_longest(b)
        .map(|pair| match pair {
            EitherOrBoth::Both(x, y) => mod_add(x, y, p),
            EitherOrBoth::Left(x) | EitherOrBoth::Right(x) => x % p,
        })
        .collect()
}

/// Pointwise `a - b`; the shorter operand is zero-extended.
pub fn vector_sub(a: &[BigUint], b: &[BigUint], p: &BigUint) -> Vec<BigUint> {
    a.iter()
        .zip_longest(b)
        .map(|pair| match pair {
            EitherOrBoth::Both(x, y) => mod_sub(x, y, p),
            EitherOrBoth::Left(x) => x % p,
            EitherOrBoth::Right(y) => mod_sub(&BigUint::zero(), y, p),
        })
        .collect()
}

/// Pointwise `a · b`; the shorter operand is zero-extended.
pub fn vector_mul(a: &[BigUint], b: &[BigUint], p: &BigUint) -> Vec<BigUint> {
    a.iter()
        .zip_longest(b)
        .map(|pair| match pair {
            EitherOrBoth::Both(x, y) => mod_mul(x, y, p),
            _ => BigUint::zero(),
        })
        .collect()
}

/// Pointwise `a / b` with a single batched inversion of `b`.
pub fn vector_div(a: &[BigUint], b: &[BigUint], p: &BigUint) -> Result<Vec<BigUint>> {
    if a.len() != b.len() {
        return Err(ArithmeticError::LengthMismatch(a.len(), b.len()));
    }
    let b_inv = batch_inverse(b, p)?;
    Ok(vector_mul(a, &b_inv, p))
}

/// Multiplies every entry by the scalar `s`.
pub fn vector_scale(v: &[BigUint], s: &BigUint, p: &BigUint) -> Vec<BigUint> {
    v.iter().map(|x| mod_mul(x, s, p)).collect()
}

/// `[1, z, z², …, z^(n-1)]`
pub fn powers(z: &BigUint, n: usize, p: &BigUint) -> Vec<BigUint> {
    let mut res = Vec::with_capacity(n);
    let mut acc = BigUint::one() % p;
    for _ in 0..n {
        let next = mod_mul(&acc, z, p);
        res.push(acc);
        acc = next;
    }
    res
}

/// `Σ a_i · b_i` over the common prefix of both vectors.
pub fn inner_product(a: &[BigUint], b: &[BigUint], p: &BigUint) -> BigUint {
    a.iter()
        .zip(b)
        .fold(BigUint::zero(), |acc, (x, y)| (acc + x * y) % p)
}

/// Evaluates a polynomial in coefficient form at `z` (Horner).
pub fn eval_poly(f: &[BigUint], z: &BigUint, p: &BigUint) -> BigUint {
    f.iter()
        .rev()
        .fold(BigUint::zero(), |acc, c| (acc * z + c) % p)
}

/// Evaluates a polynomial given by its values on `w` at an arbitrary point,
/// without interpolating.
///
/// Uses `L_i(z) = (ω_i / n) · Π_{j≠i} (z - ω_j)`, with the products built from
/// prefix and suffix running products, so the only inversion is that of `n`.
/// Unlike [eval_poly_barycentric] this needs no special case when `z` is one of
/// the roots.
pub fn eval_poly_lagrange(
    values: &[BigUint],
    z: &BigUint,
    w: &[BigUint],
    p: &BigUint,
) -> Result<BigUint> {
    let n = w.len();
    if values.len() != n {
        return Err(ArithmeticError::LengthMismatch(values.len(), n));
    }
    if n == 0 {
        return Ok(BigUint::zero());
    }

    let diffs: Vec<_> = w.iter().map(|wi| mod_sub(z, wi, p)).collect();

    // suffix[i] = Π_{j>i} (z - ω_j)
    let mut suffix = vec![BigUint::one(); n];
    for i in (0..n - 1).rev() {
        suffix[i] = mod_mul(&suffix[i + 1], &diffs[i + 1], p);
    }

    let mut prefix = BigUint::one();
    let mut sum = BigUint::zero();
    for i in 0..n {
        let term = mod_mul(&mod_mul(&values[i], &w[i], p), &prefix, p);
        sum = mod_add(&sum, &mod_mul(&term, &suffix[i], p), p);
        prefix = mod_mul(&prefix, &diffs[i], p);
    }

    let n_inv = mod_inverse(&BigUint::from(n), p)?;
    Ok(mod_mul(&sum, &n_inv, p))
}

/// Evaluates a polynomial given by its values on `w` at `z` with the
/// barycentric formula `(z^n - 1)/n · Σ v_i·ω_i / (z - ω_i)`.
///
/// When `z` is one of the roots the stored value is returned directly.
pub fn eval_poly_barycentric(
    values: &[BigUint],
    z: &BigUint,
    w: &[BigUint],
    p: &BigUint,
) -> Result<BigUint> {
    let n = w.len();
    if values.len() != n {
        return Err(ArithmeticError::LengthMismatch(values.len(), n));
    }
    if n == 0 {
        return Ok(BigUint::zero());
    }
    let z = z % p;
    if let Some(i) = w.iter().position(|wi| *wi == z) {
        return Ok(values[i].clone());
    }

    let diffs: Vec<_> = w.iter().map(|wi| mod_sub(&z, wi, p)).collect();
    let inverses = batch_inverse(&diffs, p)?;
    let sum = values
        .iter()
        .zip(w)
        .zip(&inverses)
        .fold(BigUint::zero(), |acc, ((v, wi), inv)| {
            mod_add(&acc, &mod_mul(&mod_mul(v, wi, p), inv, p), p)
        });

    let n_big = BigUint::from(n);
    let vanishing = mod_sub(&mod_exp(&z, &n_big, p), &BigUint::one(), p);
    let n_inv = mod_inverse(&n_big, p)?;
    Ok(mod_mul(&mod_mul(&vanishing, &n_inv, p), &sum, p))
}

/// Divides `f` (coefficient form) by `X^n - 1` without multiplications.
///
/// Returns `(quotient, remainder)`, where the quotient has
/// `len(f) - n` coefficients (none if `f` is shorter) and the remainder exactly
/// `n`. A non-zero remainder means `f` did not vanish on the `n`-th roots of
/// unity.
pub fn divide_by_vanishing(
    f: &[BigUint],
    n: usize,
    p: &BigUint,
) -> Result<(Vec<BigUint>, Vec<BigUint>)> {
    if n == 0 {
        return Err(ArithmeticError::EmptyDomain);
    }
    let mut remainder: Vec<BigUint> = f.iter().map(|c| c % p).collect();
    let mut quotient = vec![BigUint::zero(); f.len().saturating_sub(n)];

    // X^n ≡ 1, so the top coefficient moves down by n into both halves
    for i in (n..f.len()).rev() {
        let c = std::mem::take(&mut remainder[i]);
        quotient[i - n] = mod_add(&quotient[i - n], &c, p);
        remainder[i - n] = mod_add(&remainder[i - n], &c, p);
    }

    remainder.resize(n, BigUint::zero());
    Ok((quotient, remainder))
}

/// Rotates an evaluation vector by one position, which turns the values of
/// `f(X)` on the roots of unity into the values of `f(ωX)`.
pub fn left_shift<T: Clone>(f: &[T]) -> Vec<T> {
    let mut shifted = f.to_vec();
    if !shifted.is_empty() {
        shifted.rotate_left(1);
    }
    shifted
}

/// Smallest power of two that is `>= n` (1 for `n = 0`).
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// Zero-pads `f` to the next power of two.
pub fn pad_power_of_two(f: &[BigUint]) -> Vec<BigUint> {
    let mut padded = f.to_vec();
    padded.resize(next_power_of_two(f.len()), BigUint::zero());
    padded
}

/// Zero-pads `f` to exactly `length` entries.
pub fn pad_length(f: &[BigUint], length: usize) -> Result<Vec<BigUint>> {
    if f.len() > length {
        return Err(ArithmeticError::PadTooShort(f.len(), length));
    }
    let mut padded = f.to_vec();
    padded.resize(length, BigUint::zero());
    Ok(padded)
}

/// Extends a permutation column to `n` entries, mapping every new cell
/// `i` to itself at index `offset + i`.
pub fn pad_permutation(perm: &[usize], n: usize, offset: usize) -> Result<Vec<usize>> {
    if perm.len() > n {
        return Err(ArithmeticError::PadTooShort(perm.len(), n));
    }
    Ok(perm
        .iter()
        .copied()
        .chain((perm.len()..n).map(|i| offset + i))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big_vec(v: &[u64]) -> Vec<BigUint> {
        v.iter().copied().map(BigUint::from).collect()
    }

    fn p() -> BigUint {
        BigUint::from(337u32)
    }

    // 85 generates the 8-th roots of unity mod 337
    fn roots() -> Vec<BigUint> {
        powers(&BigUint::from(85u32), 8, &p())
    }

    #[test]
    fn test_vector_ops_zero_extend() {
        let p = p();
        let a = big_vec(&[1, 2, 3]);
        let b = big_vec(&[5, 336]);
        assert_eq!(vector_add(&a, &b, &p), big_vec(&[6, 1, 3]));
        assert_eq!(vector_sub(&b, &a, &p), big_vec(&[4, 334, 334]));
        assert_eq!(vector_mul(&a, &b, &p), big_vec(&[5, 335, 0]));
    }

    #[test]
    fn test_vector_div() {
        let p = p();
        let a = big_vec(&[6, 10]);
        let b = big_vec(&[3, 5]);
        assert_eq!(vector_div(&a, &b, &p), Ok(big_vec(&[2, 2])));
        assert_eq!(
            vector_div(&a, &big_vec(&[3]), &p),
            Err(ArithmeticError::LengthMismatch(2, 1))
        );
        assert_eq!(
            vector_div(&a, &big_vec(&[3, 0]), &p),
            Err(ArithmeticError::NonInvertibleElement)
        );
    }

    #[test]
    fn test_vector_mod_negative() {
        let v = [BigInt::from(-5), BigInt::from(340)];
        assert_eq!(vector_mod(&v, &p()), big_vec(&[332, 3]));
    }

    #[test]
    fn test_eval_poly() {
        // 3 + 2x + x^2 at 5
        assert_eq!(
            eval_poly(&big_vec(&[3, 2, 1]), &BigUint::from(5u32), &p()),
            BigUint::from(38u32)
        );
        assert_eq!(eval_poly(&[], &BigUint::from(5u32), &p()), BigUint::zero());
    }

    #[test]
    fn test_lagrange_and_barycentric_agree_with_coefficients() {
        let p = p();
        let w = roots();
        let f = big_vec(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let values: Vec<_> = w.iter().map(|wi| eval_poly(&f, wi, &p)).collect();

        for z in [0u32, 2, 17, 336] {
            let z = BigUint::from(z);
            let expected = eval_poly(&f, &z, &p);
            assert_eq!(eval_poly_lagrange(&values, &z, &w, &p), Ok(expected.clone()));
            assert_eq!(eval_poly_barycentric(&values, &z, &w, &p), Ok(expected));
        }

        // at a root both return the stored value
        assert_eq!(eval_poly_lagrange(&values, &w[3], &w, &p), Ok(values[3].clone()));
        assert_eq!(
            eval_poly_barycentric(&values, &w[3], &w, &p),
            Ok(values[3].clone())
        );
    }

    #[test]
    fn test_divide_by_vanishing() {
        let p = p();
        // (X^2 - 1)(X + 2) = X^3 + 2X^2 - X - 2
        let f = big_vec(&[335, 336, 2, 1]);
        let (q, r) = divide_by_vanishing(&f, 2, &p).unwrap();
        assert_eq!(q, big_vec(&[2, 1]));
        assert_eq!(r, big_vec(&[0, 0]));

        // shorter than n: everything is remainder
        let (q, r) = divide_by_vanishing(&big_vec(&[7]), 4, &p).unwrap();
        assert!(q.is_empty());
        assert_eq!(r, big_vec(&[7, 0, 0, 0]));

        assert_eq!(
            divide_by_vanishing(&f, 0, &p),
            Err(ArithmeticError::EmptyDomain)
        );
    }

    #[test]
    fn test_left_shift() {
        assert_eq!(left_shift(&[1, 2, 3]), vec![2, 3, 1]);
        assert!(left_shift::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_padding() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(pad_power_of_two(&big_vec(&[1, 2, 3])), big_vec(&[1, 2, 3, 0]));
        assert_eq!(pad_length(&big_vec(&[1]), 3), Ok(big_vec(&[1, 0, 0])));
        assert_eq!(
            pad_length(&big_vec(&[1, 2]), 1),
            Err(ArithmeticError::PadTooShort(2, 1))
        );
        assert_eq!(pad_permutation(&[4, 0], 4, 8), Ok(vec![4, 0, 10, 11]));
        assert_eq!(
            pad_permutation(&[1, 2, 3], 2, 0),
            Err(ArithmeticError::PadTooShort(3, 2))
        );
    }
}
