//! This module provides helpers to measure big integers and to encode them
//! with a fixed byte width.
use num_bigint::BigUint;

/// Helpers for BigUint
pub trait BigUintHelpers {
    /// Returns the minimum number of bits required to represent a BigUint.
    /// As opposed to BigUint::bits, this function returns 1 for the input zero
    fn bitlen(&self) -> usize;

    /// Returns the minimum number of bytes required to represent a BigUint,
    /// which is 1 for zero
    fn byte_len(&self) -> usize {
        self.bitlen().div_ceil(8)
    }

    /// Little-endian encoding zero-padded to exactly `width` bytes, or `None`
    /// if the value does not fit
    fn to_bytes_le_padded(&self, width: usize) -> Option<Vec<u8>>;
}

impl BigUintHelpers for BigUint {
    fn bitlen(&self) -> usize {
        if self.bits() == 0 {
            1
        } else {
            self.bits() as usize
        }
    }

    fn to_bytes_le_padded(&self, width: usize) -> Option<Vec<u8>> {
        let mut bytes = self.to_bytes_le();
        // zero encodes as [0]
        if bytes == [0u8] {
            bytes.clear();
        }
        if bytes.len() > width {
            return None;
        }
        bytes.resize(width, 0);
        Some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_encoding() {
        let x = BigUint::from(0x0102u32);
        assert_eq!(x.to_bytes_le_padded(4), Some(vec![2, 1, 0, 0]));
        assert_eq!(x.to_bytes_le_padded(2), Some(vec![2, 1]));
        assert_eq!(x.to_bytes_le_padded(1), None);
        assert_eq!(BigUint::from(0u32).to_bytes_le_padded(0), Some(vec![]));
        assert_eq!(BigUint::from(0u32).to_bytes_le_padded(3), Some(vec![0; 3]));
    }

    #[test]
    fn test_lengths() {
        assert_eq!(BigUint::from(0u32).bitlen(), 1);
        assert_eq!(BigUint::from(0u32).byte_len(), 1);
        assert_eq!(BigUint::from(255u32).byte_len(), 1);
        assert_eq!(BigUint::from(256u32).byte_len(), 2);
    }
}
