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


//! Bloom filter over password bigrams.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an element was inserted, `might_contain()` always returns `true`
//! - **Possible false positives**: `might_contain()` may return `true` for elements never inserted
//! - **Fixed size**: the bit array never grows, and bits are never cleared
//!
//! # Usage
//!
//! ```rust
//! use passbloom::bloom::BloomFilter;
//! use passbloom::bloom::FilterConfig;
//!
//! let mut filter = BloomFilter::with_config(FilterConfig::default());
//!
//! filter.insert("pa");
//! filter.insert("as");
//!
//! assert!(filter.might_contain("pa"));
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Implementation Details
//!
//! - Position `i` of an element is `SHA-256(decimal(i) ++ element) mod m`, for `i` in `0..k`
//! - Bits packed in `u64` words
//! - Text rendering as `'0'`/`'1'` characters for the filter store

mod config;
mod sketch;

pub use self::config::DEFAULT_NUM_BITS;
pub use self::config::DEFAULT_NUM_HASHES;
pub use self::config::FilterConfig;
pub use self::sketch::BloomFilter;
