//! Elliptic-curve commitment groups on top of arkworks short-Weierstrass
//! curves.
//!
//! Scalars are reduced modulo the prime order `r` of the curve group, and
//! polynomials committed to with such a group live in `Z_r`. Elements are
//! serialised as their affine `(x, y)` coordinates in the base field, with the
//! point at infinity encoded as `(0, 0)`.

use crate::{
    error::{CommitmentError, Result},
    group::CommitmentGroup,
};
use ark_ec::{
    short_weierstrass::{Affine, Projective, SWCurveConfig},
    AffineRepr, CurveGroup, VariableBaseMSM,
};
use ark_ff::{BigInteger, PrimeField, UniformRand};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use std::{fmt, marker::PhantomData};

/// BN254 G1
pub type Bn254Group = CurvePointGroup<ark_bn254::g1::Config>;

fn to_biguint<F: PrimeField>(x: &F) -> BigUint {
    BigUint::from_bytes_le(&x.into_bigint().to_bytes_le())
}

/// The prime-order group of points of an arkworks short-Weierstrass curve.
pub struct CurvePointGroup<P: SWCurveConfig> {
    scalar_modulus: BigUint,
    base_modulus: BigUint,
    _curve: PhantomData<P>,
}

impl<P: SWCurveConfig> CurvePointGroup<P>
where
    P::BaseField: PrimeField,
{
    pub fn new() -> Self {
        CurvePointGroup {
            scalar_modulus: BigUint::from_bytes_le(&P::ScalarField::MODULUS.to_bytes_le()),
            base_modulus: BigUint::from_bytes_le(&P::BaseField::MODULUS.to_bytes_le()),
            _curve: PhantomData,
        }
    }

    /// The modulus of the field the coordinates live in.
    pub fn base_modulus(&self) -> &BigUint {
        &self.base_modulus
    }

    fn to_scalar(scalar: &BigUint) -> P::ScalarField {
        P::ScalarField::from_le_bytes_mod_order(&scalar.to_bytes_le())
    }
}

impl<P: SWCurveConfig> Default for CurvePointGroup<P>
where
    P::BaseField: PrimeField,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SWCurveConfig> Clone for CurvePointGroup<P> {
    fn clone(&self) -> Self {
        CurvePointGroup {
            scalar_modulus: self.scalar_modulus.clone(),
            base_modulus: self.base_modulus.clone(),
            _curve: PhantomData,
        }
    }
}

impl<P: SWCurveConfig> fmt::Debug for CurvePointGroup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurvePointGroup")
            .field("scalar_modulus", &self.scalar_modulus)
            .field("base_modulus", &self.base_modulus)
            .finish()
    }
}

impl<P: SWCurveConfig> CommitmentGroup for CurvePointGroup<P>
where
    P::BaseField: PrimeField,
{
    type Element = Projective<P>;

    /// Polynomials committed to with a curve group live in the scalar field.
    fn field_modulus(&self) -> &BigUint {
        &self.scalar_modulus
    }

    fn scalar_modulus(&self) -> &BigUint {
        &self.scalar_modulus
    }

    fn identity(&self) -> Projective<P> {
        Projective::zero()
    }

    fn add(&self, a: &Projective<P>, b: &Projective<P>) -> Projective<P> {
        *a + b
    }

    fn scalar_mul(&self, scalar: &BigUint, element: &Projective<P>) -> Projective<P> {
        if scalar.is_zero() {
            return Projective::zero();
        }
        *element * Self::to_scalar(scalar)
    }

    fn coordinates(&self, element: &Projective<P>) -> Vec<BigUint> {
        match element.into_affine().xy() {
            Some((x, y)) => vec![to_biguint(x), to_biguint(y)],
            None => vec![BigUint::zero(), BigUint::zero()],
        }
    }

    fn from_coordinates(&self, coordinates: &[BigUint]) -> Result<Projective<P>> {
        let [x, y] = coordinates else {
            return Err(CommitmentError::WrongCoordinateCount {
                expected: 2,
                found: coordinates.len(),
            });
        };
        if x.is_zero() && y.is_zero() {
            return Ok(Projective::zero());
        }
        if *x >= self.base_modulus || *y >= self.base_modulus {
            return Err(CommitmentError::InvalidGroupElement);
        }
        let point = Affine::<P>::new_unchecked(
            P::BaseField::from_le_bytes_mod_order(&x.to_bytes_le()),
            P::BaseField::from_le_bytes_mod_order(&y.to_bytes_le()),
        );
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CommitmentError::InvalidGroupElement);
        }
        Ok(point.into_group())
    }

    fn coordinate_bits(&self) -> u64 {
        u64::from(P::BaseField::MODULUS_BIT_SIZE)
    }

    fn random_element(&self, rng: &mut (impl RngCore + CryptoRng)) -> Projective<P> {
        Projective::<P>::rand(rng)
    }

    /// Variable-base MSM over the common prefix of both slices.
    fn inner_product_commit(&self, scalars: &[BigUint], elements: &[Projective<P>]) -> Projective<P> {
        let len = scalars.len().min(elements.len());
        let bases = Projective::normalize_batch(&elements[..len]);
        let scalars: Vec<_> = scalars[..len].iter().map(Self::to_scalar).collect();
        Projective::<P>::msm_unchecked(&bases, &scalars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkp_utils::tests::make_test_rng;

    #[test]
    fn test_curve_coordinates_round_trip() {
        let group = Bn254Group::new();
        let mut rng = make_test_rng(None);
        let point = group.random_element(&mut rng);
        let coordinates = group.coordinates(&point);
        assert_eq!(coordinates.len(), 2);
        assert_eq!(group.from_coordinates(&coordinates), Ok(point));

        let identity = group.identity();
        assert_eq!(group.coordinates(&identity), vec![BigUint::zero(); 2]);
        assert_eq!(group.from_coordinates(&group.coordinates(&identity)), Ok(identity));
    }

    #[test]
    fn test_curve_rejects_invalid_points() {
        let group = Bn254Group::new();
        // (1, 1) is not on y^2 = x^3 + 3
        assert_eq!(
            group.from_coordinates(&[BigUint::from(1u32), BigUint::from(1u32)]),
            Err(CommitmentError::InvalidGroupElement)
        );
        assert_eq!(
            group.from_coordinates(&[group.base_modulus().clone(), BigUint::from(2u32)]),
            Err(CommitmentError::InvalidGroupElement)
        );
        assert!(matches!(
            group.from_coordinates(&[BigUint::from(1u32)]),
            Err(CommitmentError::WrongCoordinateCount { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_msm_matches_naive_sum() {
        let group = Bn254Group::new();
        let mut rng = make_test_rng(None);
        let elements: Vec<_> = (0..5).map(|_| group.random_element(&mut rng)).collect();
        let scalars: Vec<_> = [0u64, 1, 2, 12345, 7]
            .into_iter()
            .map(BigUint::from)
            .collect();

        let naive = group.sum(
            scalars
                .iter()
                .zip(&elements)
                .map(|(s, e)| group.scalar_mul(s, e))
                .collect::<Vec<_>>()
                .iter(),
        );
        assert_eq!(group.inner_product_commit(&scalars, &elements), naive);
        // the scalar modulus acts as zero
        let r = group.scalar_modulus().clone();
        assert_eq!(group.scalar_mul(&r, &elements[0]), group.identity());
    }
}
