use thiserror::Error;
use zkp_utils::error::ArithmeticError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("the group element is not valid (off the curve, outside the subgroup or out of range)")]
    InvalidGroupElement,

    #[error("expected {expected} coordinates for a group element, got {found}")]
    WrongCoordinateCount { expected: usize, found: usize },

    #[error("the basis modulus does not match the group's field modulus")]
    ModulusMismatch,

    #[error("a byte length of {0} is too small for values of {1} bytes")]
    ByteLengthTooSmall(usize, usize),

    #[error("the basis is malformed: {0}")]
    MalformedBasis(String),

    #[error("the basis has no roots of unity")]
    MissingRootsOfUnity,

    #[error("the polynomial has {0} coefficients but the basis supports at most {1}")]
    DegreeTooLarge(usize, usize),

    #[error("{0} columns were requested but the basis has {1}")]
    TooManyColumns(usize, usize),

    #[error("could not (de)serialize the basis: {0}")]
    Serialization(String),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

pub type Result<T> = std::result::Result<T, CommitmentError>;
