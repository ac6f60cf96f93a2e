//! A PLONK proof system over inner product argument commitments.
//!
//! A [Circuit] is laid out on the `n`-th roots of unity of a [Basis]; the
//! prover commits to the witness, the permutation aggregation and the
//! quotient, and opens them at a Fiat-Shamir point. Nothing is hidden: the
//! proofs are succinct but not zero-knowledge.

pub mod circuit;
pub mod constants;
pub mod constraints;
pub mod error;
pub mod permutation;
pub mod proof;
pub mod prover;
pub mod verifier;

pub use circuit::{Circuit, Selectors, Witness};
pub use error::{ProverError, SetupError, VerifyError};
pub use proof::Snark;

use zkp_poly_commitment::{Basis, CommitmentGroup};

/// Shorthand for [Snark::create]
pub fn prove<G: CommitmentGroup>(
    basis: &Basis<G>,
    circuit: &Circuit,
    witness: &Witness,
) -> Result<Snark<G::Element>, ProverError> {
    Snark::create(basis, circuit, witness)
}

/// Shorthand for [Snark::verify]
pub fn verify<G: CommitmentGroup>(
    basis: &Basis<G>,
    circuit: &Circuit,
    snark: &Snark<G::Element>,
) -> Result<bool, VerifyError> {
    snark.verify(basis, circuit)
}
