//! This module implements the data structures of a proof.

use zkp_poly_commitment::Opening;

/// A PLONK proof. Every opening is an evaluation at `ζ`, except
/// `z_shifted_opening` which is at `ζ·ω`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snark<E> {
    /// The witness commitments, then `z`, then the quotient chunks, in the
    /// order they entered the transcript
    pub commitments: Vec<E>,
    pub witness_openings: Vec<Opening<E>>,
    pub z_opening: Opening<E>,
    pub z_shifted_opening: Opening<E>,
    /// `t_lo`, `t_mid` and `t_hi`
    pub quotient_openings: Vec<Opening<E>>,
}
