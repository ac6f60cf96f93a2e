pub mod basis;
pub mod curve;
pub mod error;
pub mod group;
pub mod ipa;
pub mod transcript;

pub use basis::{Basis, BasisBlob, BasisConfig};
pub use curve::{Bn254Group, CurvePointGroup};
pub use error::CommitmentError;
pub use group::{CommitmentGroup, ModpGroup};
pub use ipa::{CrossTerms, EvaluationProof, Opening};
pub use transcript::Transcript;
