//! A PLONK circuit: one gate per row, described by its selector values, and
//! the copy constraints between wire cells.
//!
//! Row `i` enforces
//!
//! ```text
//! a·b·qm + a·ql + b·qr + c·qo + qc = 0
//! ```
//!
//! for the left, right and output wires `a`, `b`, `c`. Cell `i` of column
//! `j` has the index `j·n + i`; `permutation[j][i]` names the index of the
//! next cell in its copy cycle.

use crate::constants::{COLUMNS, SELECTORS};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// The wire values, one vector per column
pub type Witness = [Vec<BigUint>; COLUMNS];

/// Selector values per row, in evaluation form
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selectors {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub ql: Vec<BigUint>,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub qr: Vec<BigUint>,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub qo: Vec<BigUint>,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub qm: Vec<BigUint>,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub qc: Vec<BigUint>,
}

impl Selectors {
    /// The selectors in the order `ql, qr, qo, qm, qc`
    pub fn columns(&self) -> [&Vec<BigUint>; SELECTORS] {
        [&self.ql, &self.qr, &self.qo, &self.qm, &self.qc]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub selectors: Selectors,
    /// The copy constraints, in terms of `j·n + i` indices
    pub permutation: [Vec<usize>; COLUMNS],
    /// Number of gates; the length of `ql` when absent
    #[serde(default)]
    pub circuit_length: Option<usize>,
}

impl Circuit {
    pub fn new(selectors: Selectors, permutation: [Vec<usize>; COLUMNS]) -> Self {
        Circuit {
            selectors,
            permutation,
            circuit_length: None,
        }
    }

    pub fn circuit_length(&self) -> usize {
        self.circuit_length.unwrap_or(self.selectors.ql.len())
    }

    /// Size of the evaluation domain the circuit is padded to
    pub fn domain_size(&self) -> usize {
        self.circuit_length().next_power_of_two()
    }
}
