//! This module implements the verifier.

use crate::{
    circuit::Circuit,
    constants::{COLUMNS, QUOTIENT_CHUNKS},
    constraints::{gate_equation, ConstraintSystem},
    error::VerifyError,
    permutation::{self, grand_product_factor},
    proof::Snark,
};
use log::debug;
use num_bigint::BigUint;
use num_traits::One;
use rayon::prelude::*;
use std::fmt::Debug;
use zkp_poly_commitment::{Basis, CommitmentGroup, Opening, Transcript};
use zkp_utils::{
    modular::{mod_add, mod_exp, mod_mul, mod_sub},
    polynomials::eval_poly_lagrange,
};

/// The result of a proof verification.
pub type Result<T> = core::result::Result<T, VerifyError>;

impl<E> Snark<E>
where
    E: Clone + Debug + PartialEq + Send + Sync,
{
    /// Checks the proof against `circuit`.
    ///
    /// Returns `Ok(false)` for any proof that does not verify, including a
    /// malformed one. An error means the circuit itself could not be set up
    /// on `basis`.
    pub fn verify<G>(&self, basis: &Basis<G>, circuit: &Circuit) -> Result<bool>
    where
        G: CommitmentGroup<Element = E>,
    {
        let cs = ConstraintSystem::create(basis, circuit)?;
        let p = &basis.p;
        let n = cs.n;

        if self.commitments.len() != COLUMNS + 1 + QUOTIENT_CHUNKS {
            debug!(
                "expected {} commitments, got {}",
                COLUMNS + 1 + QUOTIENT_CHUNKS,
                self.commitments.len()
            );
            return Ok(false);
        }
        if self.witness_openings.len() != COLUMNS
            || self.quotient_openings.len() != QUOTIENT_CHUNKS
        {
            debug!(
                "expected {COLUMNS} witness and {QUOTIENT_CHUNKS} quotient openings, got {} and {}",
                self.witness_openings.len(),
                self.quotient_openings.len()
            );
            return Ok(false);
        }

        let (witness_commitments, rest) = self.commitments.split_at(COLUMNS);
        let (z_commitment, quotient_commitments) = (&rest[0], &rest[1..]);

        // the challenges, each from the transcript prefix the prover had
        let mut transcript: Transcript<G> = Transcript::new(basis);
        transcript.append_points(witness_commitments);
        let (beta, gamma) = permutation::challenges(&transcript);
        transcript.append_point(z_commitment);
        let alpha = transcript.challenge();
        transcript.append_points(quotient_commitments);
        let zeta = transcript.challenge();
        let zeta_shifted = mod_mul(&zeta, &cs.omega, p);

        let mut openings: Vec<(&E, &BigUint, &Opening<E>)> = witness_commitments
            .iter()
            .zip(&self.witness_openings)
            .map(|(c, o)| (c, &zeta, o))
            .collect();
        openings.push((z_commitment, &zeta, &self.z_opening));
        openings.extend(
            quotient_commitments
                .iter()
                .zip(&self.quotient_openings)
                .map(|(c, o)| (c, &zeta, o)),
        );
        openings.push((z_commitment, &zeta_shifted, &self.z_shifted_opening));

        if !openings
            .par_iter()
            .all(|(c, x, o)| basis.validate_eval(c, x, &o.value, &o.proof))
        {
            debug!("an evaluation proof failed to verify");
            return Ok(false);
        }

        let wires: [&BigUint; COLUMNS] = std::array::from_fn(|j| &self.witness_openings[j].value);
        let z = &self.z_opening.value;
        let z_shifted = &self.z_shifted_opening.value;
        let [t_lo, t_mid, t_hi]: [&BigUint; QUOTIENT_CHUNKS] =
            std::array::from_fn(|k| &self.quotient_openings[k].value);

        let one = BigUint::one();
        let zeta_n = mod_exp(&zeta, &BigUint::from(n), p);
        let vanishing = mod_sub(&zeta_n, &one, p);

        let at_zeta = |evals: &Vec<BigUint>| eval_poly_lagrange(evals, &zeta, &cs.roots, p);
        let l0 = at_zeta(&cs.first_lagrange_evals())?;
        let selectors = cs
            .selectors
            .iter()
            .map(at_zeta)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        let sigma = cs
            .sigma_evals
            .iter()
            .map(at_zeta)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        let ids: [BigUint; COLUMNS] = std::array::from_fn(|j| mod_mul(&cs.cofactors[j], &zeta, p));

        let gate = gate_equation(
            wires,
            std::array::from_fn(|k| &selectors[k]),
            p,
        );
        let num = grand_product_factor(wires, std::array::from_fn(|j| &ids[j]), &beta, &gamma, p);
        let den = grand_product_factor(wires, std::array::from_fn(|j| &sigma[j]), &beta, &gamma, p);
        let perm = mod_sub(&mod_mul(z, &num, p), &mod_mul(z_shifted, &den, p), p);
        let boundary = mod_mul(&mod_sub(z, &one, p), &l0, p);

        let alpha2 = mod_mul(&alpha, &alpha, p);
        let lhs = mod_add(
            &mod_add(&gate, &mod_mul(&alpha, &perm, p), p),
            &mod_mul(&alpha2, &boundary, p),
            p,
        );

        // t(ζ) = t_lo(ζ) + ζ^n·t_mid(ζ) + ζ^2n·t_hi(ζ)
        let zeta_2n = mod_mul(&zeta_n, &zeta_n, p);
        let t = mod_add(
            &mod_add(t_lo, &mod_mul(&zeta_n, t_mid, p), p),
            &mod_mul(&zeta_2n, t_hi, p),
            p,
        );
        let rhs = mod_mul(&vanishing, &t, p);

        if lhs != rhs {
            debug!("the combined identity does not hold at ζ");
            return Ok(false);
        }
        Ok(true)
    }
}
