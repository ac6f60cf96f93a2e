//! This module implements the PLONK setup: the padded selectors and the
//! identity and copy permutations, in evaluation form on the circuit domain.

use crate::{
    circuit::Circuit,
    constants::{COLUMNS, FFT_EXPANSION_FACTOR, SELECTORS},
    error::SetupError,
};
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use zkp_poly_commitment::{Basis, CommitmentGroup};
use zkp_utils::polynomials::{pad_length, pad_permutation};

/// The shape of a circuit once it has been laid out on a domain of size `n`
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    /// Domain size, a power of two
    pub n: usize,
    /// The `n`-th roots of unity
    pub roots: Vec<BigUint>,
    /// The generator `ω` of `roots`
    pub omega: BigUint,
    /// The `4n`-th roots of unity the identities are evaluated on
    pub expanded_roots: Vec<BigUint>,
    /// The coset shift `k_j` of each column, `k_0 = 1`
    pub cofactors: [BigUint; COLUMNS],
    /// `ql, qr, qo, qm, qc`, zero-padded to `n`
    pub selectors: [Vec<BigUint>; SELECTORS],
    /// The copy permutation, padded with fixed points
    pub sigma: [Vec<usize>; COLUMNS],
    /// `id_j(ω^i) = k_j·ω^i`
    pub id_evals: [Vec<BigUint>; COLUMNS],
    /// `σ_j(ω^i) = k_{j'}·ω^{i'}` where `sigma[j][i] = j'·n + i'`
    pub sigma_evals: [Vec<BigUint>; COLUMNS],
}

impl ConstraintSystem {
    pub fn create<G: CommitmentGroup>(
        basis: &Basis<G>,
        circuit: &Circuit,
    ) -> Result<Self, SetupError> {
        if *basis.group.scalar_modulus() != basis.p {
            return Err(SetupError::ScalarFieldMismatch);
        }
        let p = &basis.p;

        let circuit_length = circuit.circuit_length();
        if circuit_length == 0 {
            return Err(SetupError::ConstraintSystem("the circuit has no gates".into()));
        }
        let n = circuit.domain_size();

        let cosets = basis.roots_subset(n, COLUMNS)?;
        let expanded_roots = basis.roots_of_unity(FFT_EXPANSION_FACTOR * n)?;
        let roots = cosets[0].clone();
        let omega = roots.get(1).cloned().unwrap_or_else(BigUint::one);
        let cofactors: [BigUint; COLUMNS] = std::array::from_fn(|j| basis.cofactors[j].clone());

        let mut selectors: [Vec<BigUint>; SELECTORS] = Default::default();
        for (padded, column) in selectors.iter_mut().zip(circuit.selectors.columns()) {
            let reduced: Vec<_> = column.iter().map(|x| x % p).collect();
            *padded = pad_length(&reduced, n)?;
        }

        let mut sigma: [Vec<usize>; COLUMNS] = Default::default();
        for (j, (padded, column)) in sigma.iter_mut().zip(&circuit.permutation).enumerate() {
            *padded = pad_permutation(column, n, j * n)?;
        }
        check_bijection(&sigma, n)?;

        // the concatenated cosets, indexed by j·n + i
        let coroots: Vec<&BigUint> = cosets.iter().flatten().collect();
        let id_evals = cosets.clone().try_into().map_err(|_| {
            SetupError::ConstraintSystem("the basis returned the wrong number of cosets".into())
        })?;
        let sigma_evals =
            std::array::from_fn(|j| sigma[j].iter().map(|&k| coroots[k].clone()).collect());

        debug!("constraint system of {circuit_length} gates on a domain of size {n}");
        Ok(ConstraintSystem {
            n,
            roots,
            omega,
            expanded_roots,
            cofactors,
            selectors,
            sigma,
            id_evals,
            sigma_evals,
        })
    }

    /// `L_0` in evaluation form: one at `ω^0`, zero elsewhere
    pub fn first_lagrange_evals(&self) -> Vec<BigUint> {
        let mut l0 = vec![BigUint::zero(); self.n];
        l0[0] = BigUint::one();
        l0
    }
}

/// The gate identity `a·b·qm + a·ql + b·qr + c·qo + qc` at one point, with
/// the selectors in the order `ql, qr, qo, qm, qc`.
pub fn gate_equation(
    [a, b, c]: [&BigUint; COLUMNS],
    [ql, qr, qo, qm, qc]: [&BigUint; SELECTORS],
    p: &BigUint,
) -> BigUint {
    (a * b * qm + a * ql + b * qr + c * qo + qc) % p
}

/// Checks that every index of `[0, COLUMNS·n)` occurs exactly once.
fn check_bijection(sigma: &[Vec<usize>; COLUMNS], n: usize) -> Result<(), SetupError> {
    let mut seen = vec![false; COLUMNS * n];
    for (j, column) in sigma.iter().enumerate() {
        for (i, &target) in column.iter().enumerate() {
            match seen.get_mut(target) {
                None => {
                    return Err(SetupError::Permutation(format!(
                        "cell ({j}, {i}) points to {target}, outside of [0, {})",
                        COLUMNS * n
                    )))
                }
                Some(true) => {
                    return Err(SetupError::Permutation(format!(
                        "index {target} is the image of more than one cell"
                    )))
                }
                Some(slot) => *slot = true,
            }
        }
    }
    Ok(())
}
