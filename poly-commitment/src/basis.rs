//! The public parameters shared by every prover and verifier.
//!
//! A [Basis] bundles the commitment key `G`, the roots of unity `W` of the
//! largest supported FFT domain, and the cosets `k_i · W` that give each
//! PLONK wire column its own index space. It is built once (generated, or
//! loaded from a [BasisBlob]), validated, and then only ever borrowed.

use crate::{
    error::{CommitmentError, Result},
    group::CommitmentGroup,
};
use log::info;
use num_bigint::BigUint;
use num_traits::One;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use zkp_utils::{
    biguint_helpers::BigUintHelpers,
    error::ArithmeticError,
    modular::mod_mul,
    primes::{all_roots_of_unity, cosets},
};

/// Parameters for [Basis::generate]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasisConfig {
    /// The basis supports polynomials of up to `2^degree_bits` coefficients
    pub degree_bits: u32,
    /// Number of cosets, i.e. of PLONK wire columns
    pub max_columns: usize,
}

impl Default for BasisConfig {
    fn default() -> Self {
        BasisConfig {
            degree_bits: 10,
            max_columns: 10,
        }
    }
}

/// A group element in a persisted basis: a bare integer for `Z_p`, affine
/// coordinates for a curve.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlobElement {
    Point {
        #[serde_as(as = "DisplayFromStr")]
        x: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        y: BigUint,
    },
    Scalar(#[serde_as(as = "DisplayFromStr")] BigUint),
}

/// The persisted form of a [Basis]; all big integers are decimal strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasisBlob {
    #[serde_as(as = "DisplayFromStr")]
    pub p: BigUint,
    pub byte_length: usize,
    #[serde(rename = "G")]
    pub g: Vec<BlobElement>,
    #[serde(rename = "W", default)]
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub w: Vec<BigUint>,
    #[serde(default)]
    #[serde_as(as = "Vec<Vec<DisplayFromStr>>")]
    pub cosets: Vec<Vec<BigUint>>,
    #[serde(default)]
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub cofactors: Vec<BigUint>,
    pub max_degree: usize,
    #[serde(default)]
    pub max_columns: usize,
}

#[derive(Debug, Clone)]
pub struct Basis<G: CommitmentGroup> {
    pub group: G,
    /// The prime the committed polynomials live over
    pub p: BigUint,
    /// Width of every serialised integer in a transcript
    pub byte_length: usize,
    /// The commitment key
    pub g: Vec<G::Element>,
    /// `[1, ω, …, ω^(max_degree - 1)]`, or empty for a commitment-only basis
    pub w: Vec<BigUint>,
    /// `cosets[i] = cofactors[i] · w`
    pub cosets: Vec<Vec<BigUint>>,
    pub cofactors: Vec<BigUint>,
    pub max_degree: usize,
    pub max_columns: usize,
}

fn malformed(reason: impl Into<String>) -> CommitmentError {
    CommitmentError::MalformedBasis(reason.into())
}

impl<G: CommitmentGroup> Basis<G> {
    /// Assembles and validates a basis. `max_degree` is the length of `g`.
    pub fn new(
        group: G,
        byte_length: usize,
        g: Vec<G::Element>,
        w: Vec<BigUint>,
        cosets: Vec<Vec<BigUint>>,
        cofactors: Vec<BigUint>,
        max_columns: usize,
    ) -> Result<Self> {
        let p = group.field_modulus().clone();
        let max_degree = g.len();

        let needed = p.byte_len().max(group.coordinate_bits().div_ceil(8) as usize);
        if byte_length < needed {
            return Err(CommitmentError::ByteLengthTooSmall(byte_length, needed));
        }
        if g.is_empty() {
            return Err(malformed("the commitment key is empty"));
        }

        if !w.is_empty() {
            if w.len() != max_degree {
                return Err(malformed(format!(
                    "{} roots of unity for {max_degree} generators",
                    w.len()
                )));
            }
            if !max_degree.is_power_of_two() {
                return Err(ArithmeticError::NotPowerOfTwo(max_degree).into());
            }
            if !w[0].is_one() || w.iter().any(|wi| *wi >= p) {
                return Err(malformed("the roots of unity are not canonical"));
            }
        }

        if cosets.len() != cofactors.len() || cosets.len() < max_columns {
            return Err(malformed(format!(
                "{} cosets and {} cofactors for {max_columns} columns",
                cosets.len(),
                cofactors.len()
            )));
        }
        if cosets.iter().any(|coset| coset.len() != w.len()) {
            return Err(malformed("every coset must be as long as the roots of unity"));
        }
        let shifted = |k: &BigUint, coset: &[BigUint]| {
            coset
                .iter()
                .zip(&w)
                .all(|(x, wi)| *x == mod_mul(k, wi, &p))
        };
        if !cosets
            .iter()
            .zip(&cofactors)
            .all(|(coset, k)| shifted(k, coset))
        {
            return Err(malformed("a coset is not its cofactor times the roots of unity"));
        }

        Ok(Basis {
            group,
            p,
            byte_length,
            g,
            w,
            cosets,
            cofactors,
            max_degree,
            max_columns,
        })
    }

    /// A basis that can commit and open but carries no roots of unity, which
    /// is all the IPA needs.
    pub fn commitment_key(group: G, g: Vec<G::Element>) -> Result<Self> {
        let byte_length = group
            .field_modulus()
            .byte_len()
            .max(group.coordinate_bits().div_ceil(8) as usize);
        Self::new(group, byte_length, g, vec![], vec![], vec![], 0)
    }

    /// Generates a fresh basis: the roots of unity of order
    /// `2^degree_bits`, `max_columns` disjoint cosets and as many random
    /// generators as roots.
    pub fn generate(
        group: G,
        config: &BasisConfig,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<Self> {
        let p = group.field_modulus().clone();
        let w = all_roots_of_unity(config.degree_bits, &p, rng)?;
        let (cosets, cofactors) = cosets(&w, &p, config.max_columns, rng)?;
        let g: Vec<_> = (0..w.len()).map(|_| group.random_element(rng)).collect();

        let byte_length = p
            .byte_len()
            .max(group.coordinate_bits().div_ceil(8) as usize);
        info!(
            "generated a basis of degree {} with {} columns over a {}-bit prime",
            w.len(),
            config.max_columns,
            p.bits()
        );
        Self::new(group, byte_length, g, w, cosets, cofactors, config.max_columns)
    }

    pub fn from_blob(group: G, blob: &BasisBlob) -> Result<Self> {
        if blob.p != *group.field_modulus() {
            return Err(CommitmentError::ModulusMismatch);
        }
        if blob.g.len() != blob.max_degree {
            return Err(malformed(format!(
                "maxDegree is {} but there are {} generators",
                blob.max_degree,
                blob.g.len()
            )));
        }
        let g = blob
            .g
            .iter()
            .map(|element| match element {
                BlobElement::Scalar(x) => group.from_coordinates(std::slice::from_ref(x)),
                BlobElement::Point { x, y } => group.from_coordinates(&[x.clone(), y.clone()]),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            group,
            blob.byte_length,
            g,
            blob.w.clone(),
            blob.cosets.clone(),
            blob.cofactors.clone(),
            blob.max_columns,
        )
    }

    pub fn to_blob(&self) -> BasisBlob {
        let g = self
            .g
            .iter()
            .map(|element| {
                let mut coordinates = self.group.coordinates(element);
                if coordinates.len() == 2 {
                    let y = coordinates.pop().unwrap_or_default();
                    let x = coordinates.pop().unwrap_or_default();
                    BlobElement::Point { x, y }
                } else {
                    BlobElement::Scalar(coordinates.pop().unwrap_or_default())
                }
            })
            .collect();

        BasisBlob {
            p: self.p.clone(),
            byte_length: self.byte_length,
            g,
            w: self.w.clone(),
            cosets: self.cosets.clone(),
            cofactors: self.cofactors.clone(),
            max_degree: self.max_degree,
            max_columns: self.max_columns,
        }
    }

    pub fn from_json(group: G, json: &str) -> Result<Self> {
        let blob: BasisBlob =
            serde_json::from_str(json).map_err(|e| CommitmentError::Serialization(e.to_string()))?;
        Self::from_blob(group, &blob)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_blob())
            .map_err(|e| CommitmentError::Serialization(e.to_string()))
    }

    /// The roots of unity of order `degree`, shifted into each of the first
    /// `columns` cosets.
    ///
    /// Every `(max_degree / degree)`-th root of the full domain is a root of
    /// order `degree`, and the same stride applied to `k · W` yields
    /// `k · W_degree`.
    pub fn roots_subset(&self, degree: usize, columns: usize) -> Result<Vec<Vec<BigUint>>> {
        if self.w.is_empty() {
            return Err(CommitmentError::MissingRootsOfUnity);
        }
        if !degree.is_power_of_two() {
            return Err(ArithmeticError::NotPowerOfTwo(degree).into());
        }
        if degree > self.max_degree {
            return Err(CommitmentError::DegreeTooLarge(degree, self.max_degree));
        }
        if columns > self.max_columns {
            return Err(CommitmentError::TooManyColumns(columns, self.max_columns));
        }

        let step = self.max_degree / degree;
        Ok(self.cosets[..columns]
            .iter()
            .map(|coset| coset.iter().step_by(step).cloned().collect())
            .collect())
    }

    /// The roots of unity of order `degree`.
    pub fn roots_of_unity(&self, degree: usize) -> Result<Vec<BigUint>> {
        if self.w.is_empty() {
            return Err(CommitmentError::MissingRootsOfUnity);
        }
        if !degree.is_power_of_two() {
            return Err(ArithmeticError::NotPowerOfTwo(degree).into());
        }
        if degree > self.max_degree {
            return Err(CommitmentError::DegreeTooLarge(degree, self.max_degree));
        }
        Ok(self.w.iter().step_by(self.max_degree / degree).cloned().collect())
    }
}
