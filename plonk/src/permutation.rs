//! This module implements the permutation argument: the challenges `β, γ`
//! and the running product `z` that accumulates
//!
//! ```text
//! Π_j (w_j + β·id_j + γ) / Π_j (w_j + β·σ_j + γ)
//! ```
//!
//! row by row. `z` returns to one after the last row exactly when the
//! witness respects every copy constraint.

use crate::{
    circuit::Witness, constants::COLUMNS, constraints::ConstraintSystem, error::ProverError,
};
use num_bigint::BigUint;
use num_traits::One;
use rayon::prelude::*;
use zkp_poly_commitment::{CommitmentGroup, Transcript};
use zkp_utils::{
    modular::{batch_inverse, mod_add, mod_mul},
    ArithmeticError,
};

/// `β` and `γ`, each the challenge of the transcript extended by a distinct
/// tag. The transcript itself is left untouched.
pub fn challenges<G: CommitmentGroup>(transcript: &Transcript<G>) -> (BigUint, BigUint) {
    let fork = |tag: u32| {
        let mut fork = transcript.clone();
        fork.append_scalar(&BigUint::from(tag));
        fork.challenge()
    };
    (fork(0), fork(1))
}

/// `Π_j (wires[j] + β·shifts[j] + γ)`
pub fn grand_product_factor(
    wires: [&BigUint; COLUMNS],
    shifts: [&BigUint; COLUMNS],
    beta: &BigUint,
    gamma: &BigUint,
    p: &BigUint,
) -> BigUint {
    wires
        .into_iter()
        .zip(shifts)
        .fold(BigUint::one(), |acc, (w, s)| {
            let term = mod_add(&mod_add(w, &mod_mul(beta, s, p), p), gamma, p);
            mod_mul(&acc, &term, p)
        })
}

/// Computes the permutation aggregation polynomial `z` in evaluation form.
///
/// `witness` must already be padded to `cs.n` rows and reduced.
pub fn aggregation(
    cs: &ConstraintSystem,
    witness: &Witness,
    beta: &BigUint,
    gamma: &BigUint,
    p: &BigUint,
) -> Result<Vec<BigUint>, ProverError> {
    let n = cs.n;
    let row = |i: usize, shifts: &[Vec<BigUint>; COLUMNS]| {
        grand_product_factor(
            std::array::from_fn(|j| &witness[j][i]),
            std::array::from_fn(|j| &shifts[j][i]),
            beta,
            gamma,
            p,
        )
    };

    let numerators: Vec<_> = (0..n).into_par_iter().map(|i| row(i, &cs.id_evals)).collect();
    let denominators: Vec<_> = (0..n)
        .into_par_iter()
        .map(|i| row(i, &cs.sigma_evals))
        .collect();
    let inverses = batch_inverse(&denominators, p).map_err(|e| match e {
        ArithmeticError::NonInvertibleElement => ProverError::NonInvertible,
        e => ProverError::Arithmetic(e),
    })?;

    let mut z = Vec::with_capacity(n);
    let mut acc = BigUint::one();
    for (num, inv) in numerators.iter().zip(&inverses) {
        z.push(acc.clone());
        acc = mod_mul(&mod_mul(&acc, num, p), inv, p);
    }

    if !acc.is_one() {
        return Err(ProverError::Permutation("the copy constraints are not satisfied"));
    }
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, Selectors};
    use zkp_poly_commitment::{Basis, BasisConfig, Bn254Group};
    use zkp_utils::tests::make_test_rng;

    fn setup(permutation: [Vec<usize>; COLUMNS]) -> (Basis<Bn254Group>, ConstraintSystem) {
        let mut rng = make_test_rng(None);
        let config = BasisConfig {
            degree_bits: 3,
            max_columns: 3,
        };
        let basis = Basis::generate(Bn254Group::new(), &config, &mut rng).unwrap();
        let zeros = vec![BigUint::from(0u32); 2];
        let selectors = Selectors {
            ql: zeros.clone(),
            qr: zeros.clone(),
            qo: zeros.clone(),
            qm: zeros.clone(),
            qc: zeros,
        };
        let cs = ConstraintSystem::create(&basis, &Circuit::new(selectors, permutation)).unwrap();
        (basis, cs)
    }

    fn witness(rows: [[u32; 2]; COLUMNS]) -> Witness {
        rows.map(|column| column.into_iter().map(BigUint::from).collect())
    }

    #[test]
    fn test_identity_permutation_aggregates_to_one() {
        let (basis, cs) = setup(Default::default());
        let w = witness([[1, 2], [3, 4], [5, 6]]);
        let (beta, gamma) = (BigUint::from(7u32), BigUint::from(11u32));
        let z = aggregation(&cs, &w, &beta, &gamma, &basis.p).unwrap();
        assert_eq!(z, vec![BigUint::one(); 2]);
    }

    #[test]
    fn test_copied_cells_must_agree() {
        // (0, 0) and (1, 1) are copies of each other
        let (basis, cs) = setup([vec![3], vec![2, 0], vec![]]);
        let (beta, gamma) = (BigUint::from(7u32), BigUint::from(11u32));

        let w = witness([[8, 2], [3, 8], [5, 6]]);
        let z = aggregation(&cs, &w, &beta, &gamma, &basis.p).unwrap();
        assert!(z[0].is_one());
        assert!(!z[1].is_one());

        let w = witness([[8, 2], [3, 9], [5, 6]]);
        assert!(matches!(
            aggregation(&cs, &w, &beta, &gamma, &basis.p),
            Err(ProverError::Permutation(_))
        ));
    }

    #[test]
    fn test_grand_product_factor() {
        let p = BigUint::from(101u32);
        let [a, b, c] = [2u32, 3, 4].map(BigUint::from);
        let [s0, s1, s2] = [1u32, 5, 10].map(BigUint::from);
        let (beta, gamma) = (BigUint::from(2u32), BigUint::from(1u32));
        // (2 + 2 + 1)(3 + 10 + 1)(4 + 20 + 1) = 5·14·25 = 1750 = 33 mod 101
        assert_eq!(
            grand_product_factor([&a, &b, &c], [&s0, &s1, &s2], &beta, &gamma, &p),
            BigUint::from(33u32)
        );
    }
}
