//! Fiat-Shamir transcript.
//!
//! The transcript is the byte stream of every field and group element
//! appended so far, each integer encoded little-endian in exactly
//! `basis.byte_length` bytes. A challenge is the digest of the whole stream,
//! read as a little-endian integer and reduced modulo the group's scalar
//! modulus. Prover and verifier build their transcripts independently, so
//! both must append the same values in the same order.

use crate::{basis::Basis, group::CommitmentGroup};
use log::trace;
use num_bigint::BigUint;
use sha2::{Digest, Sha512};
use std::marker::PhantomData;
use zkp_utils::biguint_helpers::BigUintHelpers;

pub struct Transcript<'a, G: CommitmentGroup, D: Digest = Sha512> {
    basis: &'a Basis<G>,
    bytes: Vec<u8>,
    entries: usize,
    _digest: PhantomData<fn() -> D>,
}

impl<G: CommitmentGroup, D: Digest> Clone for Transcript<'_, G, D> {
    fn clone(&self) -> Self {
        Transcript {
            basis: self.basis,
            bytes: self.bytes.clone(),
            entries: self.entries,
            _digest: PhantomData,
        }
    }
}

impl<'a, G: CommitmentGroup, D: Digest> Transcript<'a, G, D> {
    pub fn new(basis: &'a Basis<G>) -> Self {
        Transcript {
            basis,
            bytes: vec![],
            entries: 0,
            _digest: PhantomData,
        }
    }

    fn push_integer(&mut self, x: &BigUint) {
        match x.to_bytes_le_padded(self.basis.byte_length) {
            Some(bytes) => self.bytes.extend(bytes),
            // only reachable for non-canonical values, which never match a
            // canonical encoding
            None => self.bytes.extend(x.to_bytes_le()),
        }
    }

    pub fn append_scalar(&mut self, x: &BigUint) {
        self.push_integer(x);
        self.entries += 1;
    }

    pub fn append_scalars<'b>(&mut self, xs: impl IntoIterator<Item = &'b BigUint>) {
        xs.into_iter().for_each(|x| self.append_scalar(x));
    }

    pub fn append_point(&mut self, point: &G::Element) {
        for coordinate in self.basis.group.coordinates(point) {
            self.push_integer(&coordinate);
        }
        self.entries += 1;
    }

    pub fn append_points<'b>(&mut self, points: impl IntoIterator<Item = &'b G::Element>)
    where
        G::Element: 'b,
    {
        points.into_iter().for_each(|p| self.append_point(p));
    }

    /// Number of appended entries
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// The challenge for everything appended so far.
    pub fn challenge(&self) -> BigUint {
        let digest = D::digest(&self.bytes);
        let challenge = BigUint::from_bytes_le(&digest) % self.basis.group.scalar_modulus();
        trace!("challenge after {} entries: {challenge}", self.entries);
        challenge
    }
}
