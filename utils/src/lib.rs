pub mod biguint_helpers;
pub mod error;
pub mod fft;
pub mod math;
pub mod modular;
pub mod polynomials;
pub mod primes;

pub use biguint_helpers::BigUintHelpers;
pub use error::ArithmeticError;
pub use fft::{eval_poly_fft, interpolate_ifft};
pub use modular::{batch_inverse, mod_exp, mod_inverse, modulo};

/// Utils only for testing
pub mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Create a new test rng with a random seed, printing the seed so that a
    /// failing run can be replayed
    pub fn make_test_rng(seed: Option<[u8; 32]>) -> StdRng {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        eprintln!("Using seed {seed:?}");
        StdRng::from_seed(seed)
    }
}
