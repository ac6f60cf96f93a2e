//! This module implements the [`ArithmeticError`] type.

use thiserror::Error;

/// Errors that can arise from modular arithmetic, polynomial helpers and
/// parameter generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("the element has no inverse modulo the given modulus")]
    NonInvertibleElement,

    #[error("expected a power of two, got {0}")]
    NotPowerOfTwo(usize),

    #[error("the polynomial has {0} coefficients but only {1} roots of unity are available")]
    DegreeTooLarge(usize, usize),

    #[error("cannot pad a vector of length {0} down to length {1}")]
    PadTooShort(usize, usize),

    #[error("the vectors have mismatching lengths ({0} and {1})")]
    LengthMismatch(usize, usize),

    #[error("the vanishing polynomial X^n - 1 needs n > 0")]
    EmptyDomain,

    #[error("cannot sample from an empty range")]
    EmptyRange,

    #[error("there is no primitive 2^{0}-th root of unity in the field")]
    RootOfUnityUnavailable(u32),

    #[error("the field only has room for {1} disjoint cosets, {0} were requested")]
    TooManyCosets(usize, usize),
}

/// The result type used throughout the crate
pub type Result<T> = std::result::Result<T, ArithmeticError>;
