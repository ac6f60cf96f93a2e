//! Radix-2 FFT between coefficient and evaluation form over the subgroup of
//! roots of unity `W = [1, ω, …, ω^(n-1)]`.
//!
//! The transform is the iterative form of the even/odd split: the input is
//! permuted into bit-reversed order, then `log2(n)` layers of butterflies
//! combine `even ± ω^j · odd`, reading each twiddle straight from `W`.

use crate::{
    error::{ArithmeticError, Result},
    math::log2_exact,
    modular::{mod_add, mod_inverse, mod_mul, mod_sub},
    polynomials::vector_scale,
};
use log::trace;
use num_bigint::BigUint;
use num_traits::Zero;
use rayon::prelude::*;

fn bit_reverse_permute<T>(a: &mut [T], log_n: u32) {
    if log_n == 0 {
        return;
    }
    for i in 0..a.len() {
        let j = i.reverse_bits() >> (usize::BITS - log_n);
        if i < j {
            a.swap(i, j);
        }
    }
}

/// Evaluates the coefficient vector `f` on every root in `w`, so that
/// `result[i] = f(w[i])`.
///
/// `w` must be the full ordered subgroup (its length a power of two). Shorter
/// `f` is zero-padded.
pub fn eval_poly_fft(f: &[BigUint], w: &[BigUint], p: &BigUint) -> Result<Vec<BigUint>> {
    let n = w.len();
    let log_n = log2_exact(n)?;
    if f.len() > n {
        return Err(ArithmeticError::DegreeTooLarge(f.len(), n));
    }
    trace!("fft of {} coefficients over {n} roots", f.len());

    let mut a: Vec<BigUint> = f.iter().map(|c| c % p).collect();
    a.resize(n, BigUint::zero());
    bit_reverse_permute(&mut a, log_n);

    for layer in 0..log_n {
        let half = 1 << layer;
        let len = 2 * half;
        let step = n / len;
        a.par_chunks_mut(len).for_each(|chunk| {
            let (lo, hi) = chunk.split_at_mut(half);
            for (j, (even, odd)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                let t = mod_mul(&w[j * step], odd, p);
                *odd = mod_sub(even, &t, p);
                *even = mod_add(even, &t, p);
            }
        });
    }
    Ok(a)
}

/// Inverse of [eval_poly_fft]: recovers the coefficients of the polynomial
/// taking `values[i]` at `w[i]`.
///
/// The forward transform over `W` lands on the values at `ω^(-i)`, so all but
/// the first entry are reversed before scaling by `n^-1`.
pub fn interpolate_ifft(values: &[BigUint], w: &[BigUint], p: &BigUint) -> Result<Vec<BigUint>> {
    let mut coefficients = eval_poly_fft(values, w, p)?;
    coefficients[1..].reverse();
    let n_inv = mod_inverse(&BigUint::from(w.len()), p)?;
    Ok(vector_scale(&coefficients, &n_inv, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomials::powers;

    fn big_vec(v: &[u64]) -> Vec<BigUint> {
        v.iter().copied().map(BigUint::from).collect()
    }

    #[test]
    fn test_small_fft() {
        let p = BigUint::from(337u32);
        let w = powers(&BigUint::from(85u32), 8, &p);
        let f = big_vec(&[3, 1, 4, 1, 5, 9, 2, 6]);

        let evals = eval_poly_fft(&f, &w, &p).unwrap();
        assert_eq!(evals, big_vec(&[31, 70, 109, 74, 334, 181, 232, 4]));
        assert_eq!(interpolate_ifft(&evals, &w, &p).unwrap(), f);
    }

    #[test]
    fn test_fft_pads_short_input() {
        let p = BigUint::from(337u32);
        let w = powers(&BigUint::from(85u32), 8, &p);
        // constant polynomial
        let evals = eval_poly_fft(&big_vec(&[7]), &w, &p).unwrap();
        assert_eq!(evals, big_vec(&[7; 8]));
    }

    #[test]
    fn test_fft_rejects_bad_sizes() {
        let p = BigUint::from(337u32);
        let w = powers(&BigUint::from(85u32), 8, &p);
        assert_eq!(
            eval_poly_fft(&big_vec(&[1; 9]), &w, &p),
            Err(ArithmeticError::DegreeTooLarge(9, 8))
        );
        assert_eq!(
            eval_poly_fft(&big_vec(&[1]), &w[..6], &p),
            Err(ArithmeticError::NotPowerOfTwo(6))
        );
        assert_eq!(
            eval_poly_fft(&big_vec(&[]), &[], &p),
            Err(ArithmeticError::NotPowerOfTwo(0))
        );
    }
}
