// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


//! Index generation for Bloom filter elements.
//!
//! Each of the `k` positions for an element is derived independently by salting the element with
//! the decimal form of its hash index and reducing the SHA-256 digest, read as a big-endian
//! unsigned integer, modulo the filter size. Filters only agree bit-for-bit when they were built
//! with the same scheme, so stored filters are tied to it.

use byteorder::BigEndian;
use byteorder::ByteOrder;
use sha2::Digest;
use sha2::Sha256;

/// Computes the bit position of `element` for hash function number `salt`.
///
/// Equivalent to `int(sha256(str(salt) + element), 16) % modulus`: the 256-bit digest is folded
/// one 64-bit word at a time, which keeps the remainder exact without big-integer arithmetic.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub(crate) fn salted_index(salt: u16, element: &str, modulus: u64) -> u64 {
    assert_ne!(modulus, 0, "modulus must be non-zero");

    let mut hasher = Sha256::new();
    hasher.update(salt.to_string().as_bytes());
    hasher.update(element.as_bytes());
    let digest = hasher.finalize();

    let modulus = u128::from(modulus);
    let mut rem = 0u128;
    for chunk in digest.chunks_exact(8) {
        let word = BigEndian::read_u64(chunk);
        // rem < modulus <= 2^64, so the shifted value fits in 128 bits.
        rem = ((rem << 64) | u128::from(word)) % modulus;
    }
    rem as u64
}

#[cfg(test)]
mod tests {
    use super::salted_index;

    #[test]
    fn test_known_positions() {
        let expected = [
            415, 477, 702, 283, 100, 247, 589, 685, 508, 990, 466, 974, 142, 908, 482,
        ];
        for (salt, want) in expected.into_iter().enumerate() {
            assert_eq!(salted_index(salt as u16, "ab", 1000), want);
        }

        assert_eq!(salted_index(0, "ab", 64), 63);
        assert_eq!(salted_index(1, "ab", 64), 53);
        assert_eq!(salted_index(2, "ab", 64), 14);
    }

    #[test]
    fn test_salts_are_independent() {
        let positions: Vec<u64> = (0..15).map(|i| salted_index(i, "ab", 1000)).collect();
        let first = positions[0];
        assert!(positions.iter().any(|&p| p != first));
    }

    #[test]
    fn test_modulus_one() {
        assert_eq!(salted_index(7, "zz", 1), 0);
    }
}
