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


//! Building Bloom filters from passwords.
//!
//! Two shapes of filter are produced here and they must not be mixed up:
//! [`filter_for_password`] encodes a single password and is what similarity scoring and the
//! filter store operate on, while [`filter_for_corpus`] folds the bigrams of many passwords into
//! one shared filter.

use crate::bigram::bigrams;
use crate::bloom::BloomFilter;
use crate::bloom::FilterConfig;

/// Builds the filter holding every bigram of one password.
///
/// The result depends only on `password` and `config`.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// # use passbloom::password::filter_for_password;
/// let config = FilterConfig::default();
/// let filter = filter_for_password("password1", config);
/// assert!(filter.might_contain("pa"));
/// assert_eq!(filter, filter_for_password("password1", config));
/// ```
pub fn filter_for_password(password: &str, config: FilterConfig) -> BloomFilter {
    let mut filter = BloomFilter::with_config(config);
    for bigram in bigrams(password) {
        filter.insert(bigram);
    }
    filter
}

/// Builds one filter holding the bigrams of every password in `passwords`.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// # use passbloom::password::filter_for_corpus;
/// let config = FilterConfig::with_accuracy(100, 0.01).unwrap();
/// let filter = filter_for_corpus(["letmein", "qwerty"], config);
/// assert!(filter.might_contain("le"));
/// assert!(filter.might_contain("qw"));
/// ```
pub fn filter_for_corpus<I, S>(passwords: I, config: FilterConfig) -> BloomFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filter = BloomFilter::with_config(config);
    for password in passwords {
        for bigram in bigrams(password.as_ref()) {
            filter.insert(bigram);
        }
    }
    filter
}
