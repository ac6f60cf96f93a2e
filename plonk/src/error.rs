//! This module implements the [`ProverError`] type.

use thiserror::Error;
use zkp_poly_commitment::error::CommitmentError;
use zkp_utils::error::ArithmeticError;

/// Errors that can arise when creating a proof
#[derive(Error, Debug, Clone)]
pub enum ProverError {
    #[error("the circuit could not be set up: {0}")]
    Setup(#[from] SetupError),

    #[error("witness column {0} has {1} rows but the circuit has {2}")]
    WitnessInconsistent(usize, usize, usize),

    #[error("a permutation denominator is zero")]
    NonInvertible,

    #[error("the permutation was not constructed correctly: {0}")]
    Permutation(&'static str),

    #[error("the witness does not satisfy the circuit: the quotient has a non-zero remainder")]
    QuotientNotDivisible,

    #[error("the commitment scheme failed: {0}")]
    Commitment(#[from] CommitmentError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Errors that can arise when verifying a proof. A proof that does not
/// verify is not an error.
#[derive(Error, Debug, Clone)]
pub enum VerifyError {
    #[error("the circuit could not be set up: {0}")]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Errors that can arise when preparing the setup
#[derive(Error, Debug, Clone)]
pub enum SetupError {
    #[error("the constraint system could not be constructed: {0}")]
    ConstraintSystem(String),

    #[error("the basis does not support the circuit: {0}")]
    Basis(#[from] CommitmentError),

    #[error("the group's scalar field is not the field the polynomials live over")]
    ScalarFieldMismatch,

    #[error("the permutation is not a bijection: {0}")]
    Permutation(String),
}

impl From<ArithmeticError> for SetupError {
    fn from(e: ArithmeticError) -> Self {
        SetupError::ConstraintSystem(e.to_string())
    }
}
