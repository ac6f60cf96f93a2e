//! This module implements the prover.

use crate::{
    circuit::{Circuit, Witness},
    constants::{COLUMNS, FFT_EXPANSION_FACTOR, QUOTIENT_CHUNKS, SELECTORS},
    constraints::{gate_equation, ConstraintSystem},
    error::ProverError,
    permutation::{self, grand_product_factor},
    proof::Snark,
};
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rayon::prelude::*;
use std::fmt::Debug;
use zkp_poly_commitment::{Basis, CommitmentGroup, Transcript};
use zkp_utils::{
    fft::{eval_poly_fft, interpolate_ifft},
    modular::{mod_mul, mod_sub},
    polynomials::{divide_by_vanishing, left_shift, pad_length, vector_scale},
};

impl<E> Snark<E>
where
    E: Clone + Debug + PartialEq + Send + Sync,
{
    /// Creates a proof that `witness` satisfies `circuit`.
    ///
    /// # Errors
    ///
    /// [ProverError::QuotientNotDivisible] (or [ProverError::Permutation] for
    /// a broken copy constraint) when the witness does not satisfy the
    /// circuit.
    pub fn create<G>(
        basis: &Basis<G>,
        circuit: &Circuit,
        witness: &Witness,
    ) -> Result<Self, ProverError>
    where
        G: CommitmentGroup<Element = E>,
    {
        let cs = ConstraintSystem::create(basis, circuit)?;
        let p = &basis.p;
        let n = cs.n;

        //~ 1. Pad the witness columns to the domain size and commit to their
        //~    interpolations.
        let mut padded: Witness = Default::default();
        for (j, (column, w)) in padded.iter_mut().zip(witness).enumerate() {
            if w.len() > n {
                return Err(ProverError::WitnessInconsistent(j, w.len(), n));
            }
            let reduced: Vec<_> = w.iter().map(|x| x % p).collect();
            *column = pad_length(&reduced, n)?;
        }
        let witness = padded;

        let witness_coeffs = witness
            .par_iter()
            .map(|w| interpolate_ifft(w, &cs.roots, p))
            .collect::<Result<Vec<_>, _>>()?;
        let witness_commitments = witness_coeffs
            .iter()
            .map(|f| basis.commit(f))
            .collect::<Result<Vec<_>, _>>()?;

        let mut transcript: Transcript<G> = Transcript::new(basis);
        transcript.append_points(&witness_commitments);
        debug!("round 1: committed to {COLUMNS} witness columns of {n} rows");

        //~ 2. Derive β and γ, and commit to the permutation aggregation.
        let (beta, gamma) = permutation::challenges(&transcript);
        let z = permutation::aggregation(&cs, &witness, &beta, &gamma, p)?;
        let z_coeffs = interpolate_ifft(&z, &cs.roots, p)?;
        let z_commitment = basis.commit(&z_coeffs)?;
        transcript.append_point(&z_commitment);
        debug!("round 2: committed to the permutation aggregation");

        //~ 3. Derive α, evaluate the combined identity on the expanded domain
        //~    and commit to its quotient by the vanishing polynomial.
        let alpha = transcript.challenge();
        let alpha2 = mod_mul(&alpha, &alpha, p);
        let domain = &cs.expanded_roots;
        let expand = |evals: &Vec<BigUint>| {
            interpolate_ifft(evals, &cs.roots, p).and_then(|f| eval_poly_fft(&f, domain, p))
        };

        let x_witness = witness_coeffs
            .par_iter()
            .map(|f| eval_poly_fft(f, domain, p))
            .collect::<Result<Vec<_>, _>>()?;
        let x_selectors = cs
            .selectors
            .par_iter()
            .map(expand)
            .collect::<Result<Vec<_>, _>>()?;
        let x_sigma = cs
            .sigma_evals
            .par_iter()
            .map(expand)
            .collect::<Result<Vec<_>, _>>()?;
        // id_j(X) = k_j·X
        let x_id: Vec<_> = cs
            .cofactors
            .iter()
            .map(|k| vector_scale(domain, k, p))
            .collect();
        let x_z = eval_poly_fft(&z_coeffs, domain, p)?;
        let x_z_shifted = expand(&left_shift(&z))?;
        let x_l0 = expand(&cs.first_lagrange_evals())?;

        let one = BigUint::one();
        let combined: Vec<BigUint> = (0..FFT_EXPANSION_FACTOR * n)
            .into_par_iter()
            .map(|i| {
                let wires: [&BigUint; COLUMNS] = std::array::from_fn(|j| &x_witness[j][i]);
                let selectors: [&BigUint; SELECTORS] = std::array::from_fn(|k| &x_selectors[k][i]);

                let gate = gate_equation(wires, selectors, p);
                let num = grand_product_factor(
                    wires,
                    std::array::from_fn(|j| &x_id[j][i]),
                    &beta,
                    &gamma,
                    p,
                );
                let den = grand_product_factor(
                    wires,
                    std::array::from_fn(|j| &x_sigma[j][i]),
                    &beta,
                    &gamma,
                    p,
                );
                let perm = mod_sub(
                    &mod_mul(&x_z[i], &num, p),
                    &mod_mul(&x_z_shifted[i], &den, p),
                    p,
                );
                let boundary = mod_mul(&mod_sub(&x_z[i], &one, p), &x_l0[i], p);

                (gate + &alpha * perm + &alpha2 * boundary) % p
            })
            .collect();

        let full_coeffs = interpolate_ifft(&combined, domain, p)?;
        let (quotient, remainder) = divide_by_vanishing(&full_coeffs, n, p)?;
        if remainder.iter().any(|r| !r.is_zero()) {
            debug!("round 3: the combined identity does not vanish on the domain");
            return Err(ProverError::QuotientNotDivisible);
        }
        debug_assert_eq!(quotient.len(), QUOTIENT_CHUNKS * n);

        let quotient_commitments = quotient
            .chunks(n)
            .map(|chunk| basis.commit(chunk))
            .collect::<Result<Vec<_>, _>>()?;
        transcript.append_points(&quotient_commitments);
        debug!("round 3: committed to {QUOTIENT_CHUNKS} quotient chunks");

        //~ 4. Derive ζ and open every committed polynomial there, and `z`
        //~    once more at ζ·ω.
        let zeta = transcript.challenge();
        let zeta_shifted = mod_mul(&zeta, &cs.omega, p);

        let witness_openings = witness_coeffs
            .par_iter()
            .map(|f| basis.prove_eval(f, &zeta))
            .collect::<Result<Vec<_>, _>>()?;
        let (z_opening, z_shifted_opening) = rayon::join(
            || basis.prove_eval(&z_coeffs, &zeta),
            || basis.prove_eval(&z_coeffs, &zeta_shifted),
        );
        let quotient_openings = quotient
            .par_chunks(n)
            .map(|chunk| basis.prove_eval(chunk, &zeta))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "round 4: opened {} evaluations",
            COLUMNS + 2 + QUOTIENT_CHUNKS
        );

        let mut commitments = witness_commitments;
        commitments.push(z_commitment);
        commitments.extend(quotient_commitments);

        Ok(Snark {
            commitments,
            witness_openings,
            z_opening: z_opening?,
            z_shifted_opening: z_shifted_opening?,
            quotient_openings,
        })
    }
}
