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


use crate::error::Error;

/// Default bit-array length used when no configuration is supplied.
pub const DEFAULT_NUM_BITS: u64 = 1000;
/// Default number of hash functions used when no configuration is supplied.
pub const DEFAULT_NUM_HASHES: u16 = 15;

pub const MIN_NUM_BITS: u64 = 1;
pub const MAX_NUM_BITS: u64 = i32::MAX as u64 * 64;
pub const MIN_NUM_HASHES: u16 = 1;
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// Size and hash count shared by every filter that is meant to be compared.
///
/// Filters built from different configurations cannot be scored against each other, so callers
/// should create one `FilterConfig` and pass it to every construction and comparison entry point.
/// The default is 1000 bits with 15 hash functions.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// let config = FilterConfig::default();
/// assert_eq!(config.num_bits(), 1000);
/// assert_eq!(config.num_hashes(), 15);
///
/// let custom = FilterConfig::new(4096, 7).unwrap();
/// assert_eq!(custom.num_bits(), 4096);
///
/// assert!(FilterConfig::new(0, 7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterConfig {
    pub(super) num_bits: u64,
    pub(super) num_hashes: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            num_bits: DEFAULT_NUM_BITS,
            num_hashes: DEFAULT_NUM_HASHES,
        }
    }
}

impl FilterConfig {
    /// Creates a configuration with an explicit bit count and number of hash functions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::error::ErrorKind::InvalidConfig) if any of:
    /// - `num_bits` < MIN_NUM_BITS or `num_bits` > MAX_NUM_BITS
    /// - `num_hashes` < MIN_NUM_HASHES or `num_hashes` > MAX_NUM_HASHES
    pub fn new(num_bits: u64, num_hashes: u16) -> Result<Self, Error> {
        if num_bits < MIN_NUM_BITS {
            return Err(Error::invalid_config(format!(
                "num_bits must be at least {MIN_NUM_BITS}"
            )));
        }
        if num_bits > MAX_NUM_BITS {
            return Err(Error::invalid_config(format!(
                "num_bits must not exceed {MAX_NUM_BITS}"
            ))
            .with_context("num_bits", num_bits));
        }
        if num_hashes < MIN_NUM_HASHES {
            return Err(Error::invalid_config(format!(
                "num_hashes must be at least {MIN_NUM_HASHES}"
            )));
        }
        if num_hashes > MAX_NUM_HASHES {
            return Err(Error::invalid_config(format!(
                "num_hashes must not exceed {MAX_NUM_HASHES}"
            ))
            .with_context("num_hashes", num_hashes));
        }

        Ok(FilterConfig {
            num_bits,
            num_hashes,
        })
    }

    /// Creates a configuration sized for a target accuracy.
    ///
    /// Intended for corpus-level filters, where many passwords share one filter and the default
    /// 1000 bits would saturate.
    ///
    /// # Arguments
    ///
    /// - `max_items`: Maximum expected number of distinct bigrams
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::error::ErrorKind::InvalidConfig) if `max_items` is 0 or
    /// `fpp` is not in (0.0, 1.0].
    ///
    /// # Examples
    ///
    /// ```
    /// # use passbloom::bloom::FilterConfig;
    /// let config = FilterConfig::with_accuracy(1000, 0.01).unwrap();
    /// assert!(config.num_bits() > 9000 && config.num_bits() < 10000);
    /// assert_eq!(config.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::invalid_config("max_items must be greater than 0"));
        }
        if !(fpp > 0.0 && fpp <= 1.0) {
            return Err(Error::invalid_config(
                "fpp must be between 0.0 and 1.0 (inclusive of 1.0)",
            )
            .with_context("fpp", fpp));
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        let num_hashes = Self::suggest_num_hashes(max_items, num_bits);
        Self::new(num_bits, num_hashes)
    }

    /// Returns the bit-array length.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of hash functions.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Suggests optimal number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = max_items, p = fpp
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * fpp.ln() / ln2_squared).ceil() as u64;
        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Suggests optimal number of hash functions given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = max_items
    pub fn suggest_num_hashes(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items as f64;

        // Ceil to avoid selecting too few hashes.
        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }
}
