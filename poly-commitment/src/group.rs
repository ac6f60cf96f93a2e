//! The group a commitment lives in.
//!
//! Commitments only need scalar multiplication and addition, so the rest of
//! the crate is written against [CommitmentGroup]. This module also provides
//! [ModpGroup], the multiplicative group of `Z_p`, written additively: its
//! "addition" is modular multiplication and its "scalar multiplication" is
//! modular exponentiation. The elliptic-curve realisation is in
//! [crate::curve].

use crate::error::{CommitmentError, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use std::fmt::Debug;
use zkp_utils::{
    modular::{mod_exp, mod_mul},
    primes::random_biguint_range,
};

/// A cyclic group used as the commitment key space.
///
/// Scalars are integers modulo [CommitmentGroup::scalar_modulus]; elements
/// are serialised as the integers returned by [CommitmentGroup::coordinates].
pub trait CommitmentGroup: Clone + Debug + Send + Sync {
    type Element: Clone + Debug + PartialEq + Send + Sync;

    /// The prime over which the group is defined.
    fn field_modulus(&self) -> &BigUint;

    /// The modulus scalars are reduced by.
    fn scalar_modulus(&self) -> &BigUint;

    fn identity(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn scalar_mul(&self, scalar: &BigUint, element: &Self::Element) -> Self::Element;

    /// The integers a group element is serialised as, in order.
    fn coordinates(&self, element: &Self::Element) -> Vec<BigUint>;

    /// Inverse of [CommitmentGroup::coordinates], rejecting anything that is
    /// not a valid group element.
    fn from_coordinates(&self, coordinates: &[BigUint]) -> Result<Self::Element>;

    /// Bit size of the modulus the coordinates are reduced by.
    fn coordinate_bits(&self) -> u64;

    fn random_element(&self, rng: &mut (impl RngCore + CryptoRng)) -> Self::Element;

    fn sum<'a>(&self, elements: impl IntoIterator<Item = &'a Self::Element>) -> Self::Element
    where
        Self::Element: 'a,
    {
        elements
            .into_iter()
            .fold(self.identity(), |acc, e| self.add(&acc, e))
    }

    fn scalar_mul_vector(&self, scalar: &BigUint, elements: &[Self::Element]) -> Vec<Self::Element> {
        elements
            .par_iter()
            .map(|e| self.scalar_mul(scalar, e))
            .collect()
    }

    fn add_vectors(&self, a: &[Self::Element], b: &[Self::Element]) -> Vec<Self::Element> {
        a.par_iter().zip(b).map(|(x, y)| self.add(x, y)).collect()
    }

    /// `Σ scalars[i] · elements[i]` over the common prefix of both slices.
    fn inner_product_commit(&self, scalars: &[BigUint], elements: &[Self::Element]) -> Self::Element {
        scalars
            .par_iter()
            .zip(elements)
            .map(|(s, e)| self.scalar_mul(s, e))
            .reduce(|| self.identity(), |a, b| self.add(&a, &b))
    }
}

/// The multiplicative group of `Z_p`, with scalars modulo `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModpGroup {
    p: BigUint,
    order: BigUint,
}

impl ModpGroup {
    pub fn new(p: BigUint) -> Result<Self> {
        if p < BigUint::from(3u32) {
            return Err(CommitmentError::MalformedBasis(format!(
                "{p} is too small for a multiplicative group"
            )));
        }
        let order = &p - 1u32;
        Ok(ModpGroup { p, order })
    }
}

impl CommitmentGroup for ModpGroup {
    type Element = BigUint;

    fn field_modulus(&self) -> &BigUint {
        &self.p
    }

    fn scalar_modulus(&self) -> &BigUint {
        &self.order
    }

    fn identity(&self) -> BigUint {
        BigUint::one()
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        mod_mul(a, b, &self.p)
    }

    fn scalar_mul(&self, scalar: &BigUint, element: &BigUint) -> BigUint {
        mod_exp(element, scalar, &self.p)
    }

    fn coordinates(&self, element: &BigUint) -> Vec<BigUint> {
        vec![element.clone()]
    }

    fn from_coordinates(&self, coordinates: &[BigUint]) -> Result<BigUint> {
        match coordinates {
            [x] if !x.is_zero() && *x < self.p => Ok(x.clone()),
            [_] => Err(CommitmentError::InvalidGroupElement),
            _ => Err(CommitmentError::WrongCoordinateCount {
                expected: 1,
                found: coordinates.len(),
            }),
        }
    }

    fn coordinate_bits(&self) -> u64 {
        self.p.bits()
    }

    fn random_element(&self, rng: &mut (impl RngCore + CryptoRng)) -> BigUint {
        // the range [2, p - 1] is non-empty since p >= 3
        random_biguint_range(&BigUint::from(2u32), &self.order, rng).unwrap_or_else(|_| self.identity())
    }
}
