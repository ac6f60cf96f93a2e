use crate::error::{ArithmeticError, Result};

/// Returns `log2(n)` when `n` is a power of two.
pub fn log2_exact(n: usize) -> Result<u32> {
    if n.is_power_of_two() {
        Ok(n.trailing_zeros())
    } else {
        Err(ArithmeticError::NotPowerOfTwo(n))
    }
}
