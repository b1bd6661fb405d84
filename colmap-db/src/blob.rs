// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Raw float-array encoding for BLOB columns.
//!
//! COLMAP stores numeric arrays as the bare little-endian byte
//! representation of their elements, with no header or length prefix. The
//! element width is fixed at 8 bytes (f64) at every encode/decode boundary;
//! narrower widths must never be introduced between storage and memory.

use crate::error::{Error, Result};

const ELEMENT_WIDTH: usize = size_of::<f64>();

/// Serialize a float slice to its raw little-endian bytes.
pub fn encode_f64s(values: &[f64]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(values.len() * ELEMENT_WIDTH);
    for value in values {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

/// Reinterpret a BLOB payload as f64 elements, inferring the count from the
/// byte length.
///
/// A length that is not a whole number of elements is an error, never a
/// silent truncation.
pub fn decode_f64s(blob: &[u8]) -> Result<Vec<f64>> {
    if blob.len() % ELEMENT_WIDTH != 0 {
        return Err(Error::BlobLength { len: blob.len() });
    }
    Ok(blob
        .chunks_exact(ELEMENT_WIDTH)
        .map(|chunk| {
            let mut bytes = [0u8; ELEMENT_WIDTH];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect())
}

/// Reinterpret a BLOB payload as exactly `N` f64 elements.
pub fn decode_f64_array<const N: usize>(blob: &[u8]) -> Result<[f64; N]> {
    let values = decode_f64s(blob)?;
    if values.len() != N {
        return Err(Error::BlobShape {
            expected: N,
            actual: values.len(),
        });
    }
    let mut out = [0.0; N];
    out.copy_from_slice(&values);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_exact() {
        let values = [0.0, -1.5, 1e-300, f64::MAX, f64::MIN_POSITIVE];
        let blob = encode_f64s(&values);
        assert_eq!(blob.len(), values.len() * 8);
        assert_eq!(decode_f64s(&blob).unwrap(), values);
    }

    #[test]
    fn test_roundtrip_preserves_nan_bits() {
        let values = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        let decoded = decode_f64s(&encode_f64s(&values)).unwrap();
        for (a, b) in values.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_empty_blob() {
        assert_eq!(decode_f64s(&[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_ragged_length_is_an_error() {
        let mut blob = encode_f64s(&[1.0, 2.0]);
        blob.pop();
        match decode_f64s(&blob) {
            Err(Error::BlobLength { len }) => assert_eq!(len, 15),
            other => panic!("expected BlobLength error, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_shape() {
        let blob = encode_f64s(&[0.1, 0.2, 0.3]);
        let position: [f64; 3] = decode_f64_array(&blob).unwrap();
        assert_eq!(position, [0.1, 0.2, 0.3]);

        match decode_f64_array::<4>(&blob) {
            Err(Error::BlobShape { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("expected BlobShape error, got {other:?}"),
        }
    }
}
