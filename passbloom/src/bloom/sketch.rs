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


use super::FilterConfig;
use crate::error::Error;
use crate::hash::salted_index;

/// A Bloom filter over string elements.
///
/// Provides membership queries with:
/// - No false negatives (inserted elements always return `true`)
/// - Possible false positives
/// - Insert-only updates: bits are never cleared
///
/// Bits are packed into `u64` words; any bits past `capacity()` in the last word stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Number of hash functions to use (k)
    num_hashes: u16,
    /// Total number of bits in the filter (m)
    capacity_bits: u64,
    /// Count of bits set to 1
    num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    bit_array: Vec<u64>,
}

impl BloomFilter {
    /// Creates an empty filter with `num_bits` bits and `num_hashes` hash functions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::error::ErrorKind::InvalidConfig) if either parameter is
    /// zero or above the supported maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000, 15).unwrap();
    /// assert_eq!(filter.capacity(), 1000);
    /// assert!(filter.is_empty());
    ///
    /// assert!(BloomFilter::new(1000, 0).is_err());
    /// ```
    pub fn new(num_bits: u64, num_hashes: u16) -> Result<Self, Error> {
        FilterConfig::new(num_bits, num_hashes).map(Self::with_config)
    }

    /// Creates an empty filter from a validated configuration.
    pub fn with_config(config: FilterConfig) -> Self {
        let num_words = config.num_bits().div_ceil(64) as usize;
        BloomFilter {
            num_hashes: config.num_hashes(),
            capacity_bits: config.num_bits(),
            num_bits_set: 0,
            bit_array: vec![0u64; num_words],
        }
    }

    /// Returns the `k` bit positions for an element, in hash-function order.
    ///
    /// Positions may repeat; every position is in `[0, capacity())`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000, 15).unwrap();
    /// let positions = filter.indices_for("ab");
    /// assert_eq!(positions.len(), 15);
    /// assert!(positions.iter().all(|&p| p < 1000));
    /// ```
    pub fn indices_for(&self, element: &str) -> Vec<u64> {
        (0..self.num_hashes)
            .map(|i| salted_index(i, element, self.capacity_bits))
            .collect()
    }

    /// Inserts an element into the filter.
    ///
    /// After insertion, `might_contain(element)` will always return `true`. Inserting the same
    /// element again leaves the filter unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 15).unwrap();
    /// filter.insert("pa");
    /// assert!(filter.might_contain("pa"));
    /// ```
    pub fn insert(&mut self, element: &str) {
        for bit_index in self.indices_for(element) {
            self.set_bit(bit_index);
        }
    }

    /// Tests whether an element is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Element was **possibly** inserted (or false positive)
    /// - `false`: Element was **definitely not** inserted
    pub fn might_contain(&self, element: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        self.indices_for(element)
            .into_iter()
            .all(|bit_index| self.bit(bit_index))
    }

    /// Returns the value of the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    pub fn bit(&self, index: u64) -> bool {
        assert!(
            index < self.capacity_bits,
            "bit index {index} out of range for {} bits",
            self.capacity_bits
        );
        let word_index = (index >> 6) as usize; // Equivalent to index / 64
        let mask = 1u64 << (index & 63);
        (self.bit_array[word_index] & mask) != 0
    }

    /// Returns whether the filter is empty (no bits set).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the configuration this filter was built with.
    pub fn config(&self) -> FilterConfig {
        FilterConfig {
            num_bits: self.capacity_bits,
            num_hashes: self.num_hashes,
        }
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values above 0.5 indicate degraded false positive rates.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability as `load_factor^k`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(i32::from(self.num_hashes))
    }

    /// Renders the bit array as one `'0'` or `'1'` per bit, in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::BloomFilter;
    /// let filter = BloomFilter::new(8, 2).unwrap();
    /// assert_eq!(filter.to_bitstring(), "00000000");
    /// ```
    pub fn to_bitstring(&self) -> String {
        (0..self.capacity_bits)
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }

    /// Rebuilds a filter from its `'0'`/`'1'` rendering.
    ///
    /// The filter size is the length of `bits`. The hash count is not part of the rendering and
    /// must be supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidData`](crate::error::ErrorKind::InvalidData) if `bits` is empty or holds
    /// anything other than `'0'` and `'1'`, and
    /// [`InvalidConfig`](crate::error::ErrorKind::InvalidConfig) if `num_hashes` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::BloomFilter;
    /// let filter = BloomFilter::from_bitstring("0100", 15).unwrap();
    /// assert_eq!(filter.capacity(), 4);
    /// assert!(filter.bit(1));
    /// assert_eq!(filter.to_bitstring(), "0100");
    /// ```
    pub fn from_bitstring(bits: &str, num_hashes: u16) -> Result<Self, Error> {
        if bits.is_empty() {
            return Err(Error::deserial("bitstring is empty"));
        }

        let config = FilterConfig::new(bits.len() as u64, num_hashes)?;
        let mut filter = Self::with_config(config);
        for (index, byte) in bits.bytes().enumerate() {
            match byte {
                b'0' => {}
                b'1' => filter.set_bit(index as u64),
                _ => {
                    return Err(Error::deserial("bitstring must contain only '0' and '1'")
                        .with_context("offset", index));
                }
            }
        }
        Ok(filter)
    }

    /// Returns the packed words backing the bit array.
    pub(crate) fn words(&self) -> &[u64] {
        &self.bit_array
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index >> 6) as usize; // Equivalent to bit_index / 64
        let mask = 1u64 << (bit_index & 63);

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}
