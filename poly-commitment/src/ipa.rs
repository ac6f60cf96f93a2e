//! This module contains the implementation of the polynomial commitment scheme
//! called the Inner Product Argument (IPA) as described in [Efficient
//! Zero-Knowledge Arguments for Arithmetic Circuits in the Discrete Log
//! Setting](https://eprint.iacr.org/2016/263), without blinding.
//!
//! A polynomial `f` with coefficient vector `a` is committed to as
//! `C = ⟨a, G⟩`. Its evaluation at `z` is the inner product `⟨a, b⟩` with
//! `b = (1, z, z², …)`. Each round halves `a`, `b` and `G` using the
//! challenge `x` derived from the cross terms
//!
//! ```text
//! LA = ⟨a_lo, G_hi⟩   RA = ⟨a_hi, G_lo⟩   Lab = ⟨a_lo, b_hi⟩   Rab = ⟨a_hi, b_lo⟩
//! a' = a_lo + x·a_hi  b' = x·b_lo + b_hi  G' = x·G_lo + G_hi
//! ```
//!
//! so that `⟨a', G'⟩ = x·C + LA + x²·RA` and `⟨a', b'⟩ = x·v + Lab + x²·Rab`.
//! After `log2(n)` rounds a single scalar is left.

use crate::{
    basis::Basis,
    error::{CommitmentError, Result},
    group::CommitmentGroup,
    transcript::Transcript,
};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::One;
use rayon::prelude::*;
use zkp_utils::{
    modular::{mod_add, mod_mul},
    polynomials::{inner_product, pad_power_of_two, powers},
};

/// The four values sent in one folding round
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTerms<E> {
    pub la: E,
    pub ra: E,
    pub lab: BigUint,
    pub rab: BigUint,
}

/// Proof that a committed polynomial evaluates to a claimed value
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationProof<E> {
    /// The single scalar left after the last round
    pub a: BigUint,
    /// One entry per round, in order
    pub rounds: Vec<CrossTerms<E>>,
    /// Padded length of the coefficient vector (a power of two)
    pub length: usize,
}

/// An evaluation together with its proof
#[derive(Debug, Clone, PartialEq)]
pub struct Opening<E> {
    pub value: BigUint,
    pub proof: EvaluationProof<E>,
}

impl<G: CommitmentGroup> Basis<G> {
    /// Commits to the coefficient vector `f` against the first `len(f)`
    /// generators.
    pub fn commit(&self, f: &[BigUint]) -> Result<G::Element> {
        if f.len() > self.max_degree {
            return Err(CommitmentError::DegreeTooLarge(f.len(), self.max_degree));
        }
        let q = self.group.scalar_modulus();
        let f: Vec<_> = f.iter().map(|c| c % q).collect();
        Ok(self.group.inner_product_commit(&f, &self.g[..f.len()]))
    }

    /// Evaluates `f` at `z` and proves the evaluation.
    pub fn prove_eval(&self, f: &[BigUint], z: &BigUint) -> Result<Opening<G::Element>> {
        let group = &self.group;
        let q = group.scalar_modulus();

        let mut a = pad_power_of_two(&f.iter().map(|c| c % q).collect::<Vec<_>>());
        let length = a.len();
        if length > self.max_degree {
            return Err(CommitmentError::DegreeTooLarge(length, self.max_degree));
        }
        let mut b = powers(z, length, q);
        let mut g = self.g[..length].to_vec();
        let value = inner_product(&a, &b, q);

        let mut transcript: Transcript<G> = Transcript::new(self);
        let mut rounds = Vec::with_capacity(length.trailing_zeros() as usize);

        while a.len() > 1 {
            let half = a.len() / 2;
            let (a_lo, a_hi) = a.split_at(half);
            let (b_lo, b_hi) = b.split_at(half);
            let (g_lo, g_hi) = g.split_at(half);

            let (la, ra) = rayon::join(
                || group.inner_product_commit(a_lo, g_hi),
                || group.inner_product_commit(a_hi, g_lo),
            );
            let lab = inner_product(a_lo, b_hi, q);
            let rab = inner_product(a_hi, b_lo, q);

            transcript.append_points([&la, &ra]);
            transcript.append_scalars([&lab, &rab]);
            let x = transcript.challenge();
            trace!("ipa round {} of length {}", rounds.len(), 2 * half);

            // a_lo + x·a_hi
            let folded_a = a_lo
                .par_iter()
                .zip(a_hi)
                .map(|(lo, hi)| mod_add(lo, &mod_mul(&x, hi, q), q))
                .collect();
            // x·b_lo + b_hi
            let folded_b = b_lo
                .par_iter()
                .zip(b_hi)
                .map(|(lo, hi)| mod_add(&mod_mul(&x, lo, q), hi, q))
                .collect();
            // x·G_lo + G_hi
            let folded_g = group.add_vectors(&group.scalar_mul_vector(&x, g_lo), g_hi);

            a = folded_a;
            b = folded_b;
            g = folded_g;
            rounds.push(CrossTerms { la, ra, lab, rab });
        }

        let a = a.into_iter().next().unwrap_or_default();
        Ok(Opening {
            value,
            proof: EvaluationProof { a, rounds, length },
        })
    }

    /// Checks that `commitment` opens to `value` at `z`.
    ///
    /// Every challenge is recomputed from the proof's cross terms. Instead of
    /// folding the generators round by round, the verifier tracks the factor
    /// `x_prod[j]` each original position ends up multiplied by, and computes
    /// the final generator and evaluation base with one inner product each.
    ///
    /// A malformed proof is rejected, never an error.
    pub fn validate_eval(
        &self,
        commitment: &G::Element,
        z: &BigUint,
        value: &BigUint,
        proof: &EvaluationProof<G::Element>,
    ) -> bool {
        let group = &self.group;
        let q = group.scalar_modulus();
        let length = proof.length;

        if !length.is_power_of_two() || length > self.max_degree {
            debug!("ipa: invalid proof length {length}");
            return false;
        }
        if proof.rounds.len() != length.trailing_zeros() as usize {
            debug!(
                "ipa: expected {} rounds, got {}",
                length.trailing_zeros(),
                proof.rounds.len()
            );
            return false;
        }
        let canonical = |x: &BigUint| x < q;
        if !canonical(value)
            || !canonical(&proof.a)
            || !proof
                .rounds
                .iter()
                .all(|r| canonical(&r.lab) && canonical(&r.rab))
        {
            debug!("ipa: non-canonical scalar in proof");
            return false;
        }

        let mut transcript: Transcript<G> = Transcript::new(self);
        let mut acc_commitment = commitment.clone();
        let mut acc_value = value.clone();
        let mut x_prod = vec![BigUint::one(); length];

        let mut half = length;
        for round in &proof.rounds {
            half /= 2;
            transcript.append_points([&round.la, &round.ra]);
            transcript.append_scalars([&round.lab, &round.rab]);
            let x = transcript.challenge();
            let x2 = mod_mul(&x, &x, q);

            // positions in the low half of the current vector get scaled by x
            x_prod
                .par_iter_mut()
                .enumerate()
                .filter(|(j, _)| j & half == 0)
                .for_each(|(_, xp)| *xp = mod_mul(&x, xp, q));

            acc_commitment = group.sum([
                &group.scalar_mul(&x, &acc_commitment),
                &round.la,
                &group.scalar_mul(&x2, &round.ra),
            ]);
            acc_value = mod_add(
                &mod_add(&mod_mul(&x, &acc_value, q), &round.lab, q),
                &mod_mul(&x2, &round.rab, q),
                q,
            );
        }

        let g_final = group.inner_product_commit(&x_prod, &self.g[..length]);
        let b_final = inner_product(&x_prod, &powers(z, length, q), q);

        if acc_commitment != group.scalar_mul(&proof.a, &g_final) {
            debug!("ipa: commitment check failed");
            return false;
        }
        if acc_value != mod_mul(&proof.a, &b_final, q) {
            debug!("ipa: evaluation check failed");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ModpGroup;
    use zkp_utils::{polynomials::eval_poly, tests::make_test_rng};

    fn big_vec(v: &[u64]) -> Vec<BigUint> {
        v.iter().copied().map(BigUint::from).collect()
    }

    fn small_basis() -> Basis<ModpGroup> {
        // 2^61 - 1
        let group = ModpGroup::new(BigUint::from(2_305_843_009_213_693_951u64)).unwrap();
        let mut rng = make_test_rng(None);
        let g = (0..16).map(|_| group.random_element(&mut rng)).collect();
        Basis::commitment_key(group, g).unwrap()
    }

    #[test]
    fn test_opening_value_is_evaluation() {
        let basis = small_basis();
        let q = basis.group.scalar_modulus().clone();
        let f = big_vec(&[4, 8, 15, 16, 23]);
        let z = BigUint::from(42u32);
        let opening = basis.prove_eval(&f, &z).unwrap();
        assert_eq!(opening.value, eval_poly(&f, &z, &q));
        assert_eq!(opening.proof.length, 8);
        assert_eq!(opening.proof.rounds.len(), 3);
    }

    #[test]
    fn test_constant_polynomial_has_no_rounds() {
        let basis = small_basis();
        let f = big_vec(&[9]);
        let z = BigUint::from(3u32);
        let commitment = basis.commit(&f).unwrap();
        let opening = basis.prove_eval(&f, &z).unwrap();
        assert!(opening.proof.rounds.is_empty());
        assert!(basis.validate_eval(&commitment, &z, &opening.value, &opening.proof));
    }

    #[test]
    fn test_degree_too_large() {
        let basis = small_basis();
        let f = big_vec(&[1; 17]);
        assert_eq!(
            basis.commit(&f),
            Err(CommitmentError::DegreeTooLarge(17, 16))
        );
        assert!(matches!(
            basis.prove_eval(&f, &BigUint::from(1u32)),
            Err(CommitmentError::DegreeTooLarge(32, 16))
        ));
    }

    #[test]
    fn test_malformed_proofs_are_rejected() {
        let basis = small_basis();
        let f = big_vec(&[1, 2, 3, 4]);
        let z = BigUint::from(5u32);
        let commitment = basis.commit(&f).unwrap();
        let opening = basis.prove_eval(&f, &z).unwrap();
        assert!(basis.validate_eval(&commitment, &z, &opening.value, &opening.proof));

        let mut proof = opening.proof.clone();
        proof.length = 3;
        assert!(!basis.validate_eval(&commitment, &z, &opening.value, &proof));

        let mut proof = opening.proof.clone();
        proof.rounds.pop();
        assert!(!basis.validate_eval(&commitment, &z, &opening.value, &proof));

        let mut proof = opening.proof.clone();
        proof.a += basis.group.scalar_modulus();
        assert!(!basis.validate_eval(&commitment, &z, &opening.value, &proof));

        let mut proof = opening.proof;
        proof.length = 32;
        assert!(!basis.validate_eval(&commitment, &z, &opening.value, &proof));
    }
}
