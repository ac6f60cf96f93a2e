use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use zkp_utils::{
    fft::{eval_poly_fft, interpolate_ifft},
    modular::{batch_inverse, mod_add, mod_inverse, mod_sub},
    polynomials::{divide_by_vanishing, eval_poly, eval_poly_lagrange, pad_length},
    primes::{all_roots_of_unity, large_prime},
    tests::make_test_rng,
};

const LOG_DOMAIN: u32 = 4;

static PALLAS: Lazy<BigUint> = Lazy::new(|| large_prime(256).unwrap());

static ROOTS: Lazy<Vec<BigUint>> = Lazy::new(|| {
    let mut rng = make_test_rng(Some([7u8; 32]));
    all_roots_of_unity(LOG_DOMAIN, &PALLAS, &mut rng).unwrap()
});

fn to_field(v: &[u64]) -> Vec<BigUint> {
    v.iter().map(|x| BigUint::from(*x) % &*PALLAS).collect()
}

#[test]
fn test_fft_matches_direct_evaluation() {
    let f = to_field(&[10, 0, 213, 0, 87691, 1, 5, 99]);
    let evals = eval_poly_fft(&f, &ROOTS, &PALLAS).unwrap();
    for (w, y) in ROOTS.iter().zip(&evals) {
        assert_eq!(eval_poly(&f, w, &PALLAS), *y);
    }
}

proptest! {
    #[test]
    fn test_fft_round_trip(coeffs in prop::collection::vec(any::<u64>(), 0..=16)) {
        let f = pad_length(&to_field(&coeffs), ROOTS.len()).unwrap();
        let evals = eval_poly_fft(&f, &ROOTS, &PALLAS).unwrap();
        prop_assert_eq!(interpolate_ifft(&evals, &ROOTS, &PALLAS).unwrap(), f);
    }
}

proptest! {
    #[test]
    fn test_lagrange_matches_coefficients(
        coeffs in prop::collection::vec(any::<u64>(), 16),
        z in any::<u64>(),
    ) {
        let f = to_field(&coeffs);
        let z = BigUint::from(z);
        let evals = eval_poly_fft(&f, &ROOTS, &PALLAS).unwrap();
        prop_assert_eq!(
            eval_poly_lagrange(&evals, &z, &ROOTS, &PALLAS).unwrap(),
            eval_poly(&f, &z, &PALLAS)
        );
    }
}

proptest! {
    #[test]
    fn test_batch_inverse_matches_single_inverse(
        values in prop::collection::vec(1..u64::MAX, 1..32)
    ) {
        let values = to_field(&values);
        let inverses = batch_inverse(&values, &PALLAS).unwrap();
        for (a, inv) in values.iter().zip(&inverses) {
            prop_assert_eq!(mod_inverse(a, &PALLAS).unwrap(), inv.clone());
        }
    }
}

proptest! {
    #[test]
    fn test_vanishing_division_identity(
        coeffs in prop::collection::vec(any::<u64>(), 0..48),
        n in 1usize..12,
    ) {
        let p = &*PALLAS;
        let f = to_field(&coeffs);
        let (q, r) = divide_by_vanishing(&f, n, p).unwrap();
        prop_assert_eq!(r.len(), n);

        // rebuild q·(X^n - 1) + r
        let mut rebuilt = r.clone();
        rebuilt.resize(f.len().max(n), BigUint::zero());
        for (i, qi) in q.iter().enumerate() {
            rebuilt[i + n] = mod_add(&rebuilt[i + n], qi, p);
            rebuilt[i] = mod_sub(&rebuilt[i], qi, p);
        }
        let expected = pad_length(&f, rebuilt.len()).unwrap();
        prop_assert_eq!(rebuilt, expected);
    }
}
