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


//! Jaccard similarity between Bloom filters.
//!
//! The score of two filters is the popcount of their bitwise AND divided by the popcount of
//! their bitwise OR. Because both filters hash bigrams into the same positions, the score tracks
//! how many bigrams two passwords share without comparing the passwords themselves.

use crate::bloom::BloomFilter;
use crate::bloom::FilterConfig;
use crate::error::Error;
use crate::password::filter_for_password;

/// Computes the Jaccard coefficient of two filters' bit arrays.
///
/// Returns a value in `[0, 1]`, and exactly `0.0` when neither filter has any bit set. Only the
/// bit arrays take part: filters with different hash counts are still scored.
///
/// # Errors
///
/// Returns [`SizeMismatch`](crate::error::ErrorKind::SizeMismatch) if the filters do not have the
/// same capacity.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::{BloomFilter, FilterConfig};
/// # use passbloom::password::filter_for_password;
/// # use passbloom::similarity::jaccard;
/// let a = filter_for_password("monkey", FilterConfig::default());
/// assert_eq!(jaccard(&a, &a).unwrap(), 1.0);
///
/// let small = BloomFilter::new(500, 15).unwrap();
/// assert!(jaccard(&a, &small).is_err());
/// ```
pub fn jaccard(a: &BloomFilter, b: &BloomFilter) -> Result<f64, Error> {
    if a.capacity() != b.capacity() {
        return Err(Error::size_mismatch(a.capacity(), b.capacity()));
    }
    Ok(coefficient(a, b))
}

/// Scores two passwords by building a filter for each with `config`.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// # use passbloom::similarity::compare_passwords;
/// let score = compare_passwords("password1", "password2", FilterConfig::default());
/// assert_eq!(score, 0.784);
/// ```
pub fn compare_passwords(first: &str, second: &str, config: FilterConfig) -> f64 {
    let a = filter_for_password(first, config);
    let b = filter_for_password(second, config);
    coefficient(&a, &b)
}

/// Scores each candidate against `password`, keeping the candidates' order.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// # use passbloom::similarity::degree_of_similarity;
/// let scores = degree_of_similarity("summer", ["summer", "Summer1"], FilterConfig::default());
/// assert_eq!(scores[0], ("summer".to_string(), 1.0));
/// assert_eq!(scores[1].0, "Summer1");
/// ```
pub fn degree_of_similarity<I, S>(
    password: &str,
    candidates: I,
    config: FilterConfig,
) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let reference = filter_for_password(password, config);
    candidates
        .into_iter()
        .map(|candidate| {
            let candidate = candidate.into();
            let filter = filter_for_password(&candidate, config);
            let score = coefficient(&reference, &filter);
            (candidate, score)
        })
        .collect()
}

/// Jaccard coefficient of two filters already known to have equal capacity.
fn coefficient(a: &BloomFilter, b: &BloomFilter) -> f64 {
    debug_assert_eq!(a.capacity(), b.capacity());

    let mut intersection = 0u64;
    let mut union = 0u64;
    for (x, y) in a.words().iter().zip(b.words()) {
        intersection += u64::from((x & y).count_ones());
        union += u64::from((x | y).count_ones());
    }

    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use googletest::assert_that;
    use googletest::prelude::eq;
    use googletest::prelude::ge;
    use googletest::prelude::le;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_identical_filters() {
        let config = FilterConfig::default();
        let a = filter_for_password("iloveyou", config);
        assert_that!(jaccard(&a, &a.clone()).unwrap(), eq(1.0));
    }

    #[test]
    fn test_empty_filters() {
        let a = BloomFilter::new(1000, 15).unwrap();
        let b = BloomFilter::new(1000, 15).unwrap();
        assert_that!(jaccard(&a, &b).unwrap(), eq(0.0));
    }

    #[test]
    fn test_empty_against_non_empty() {
        let config = FilterConfig::default();
        let a = filter_for_password("ab", config);
        let b = filter_for_password("a", config);
        assert_that!(jaccard(&a, &b).unwrap(), eq(0.0));
    }

    #[test]
    fn test_symmetry() {
        let config = FilterConfig::new(100, 3).unwrap();
        let a = filter_for_password("abc", config);
        let b = filter_for_password("abd", config);
        let ab = jaccard(&a, &b).unwrap();
        let ba = jaccard(&b, &a).unwrap();
        assert_that!(ab, eq(ba));
        assert_that!(ab, eq(0.375));
    }

    #[test]
    fn test_size_mismatch() {
        let a = BloomFilter::new(1000, 15).unwrap();
        let b = BloomFilter::new(500, 15).unwrap();
        let err = jaccard(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_hash_count_is_ignored() {
        let a = BloomFilter::from_bitstring("1100", 15).unwrap();
        let b = BloomFilter::from_bitstring("0110", 3).unwrap();
        assert_that!(jaccard(&a, &b).unwrap(), eq(1.0 / 3.0));
    }

    #[test]
    fn test_compare_passwords_known_value() {
        let config = FilterConfig::default();
        assert_that!(compare_passwords("password1", "password2", config), eq(0.784));
        assert_that!(compare_passwords("password1", "password1", config), eq(1.0));
    }

    #[test]
    fn test_compare_passwords_in_range() {
        let config = FilterConfig::new(64, 2).unwrap();
        for (a, b) in [("abc", "xyz"), ("letmein", "letmein!"), ("", "q")] {
            let score = compare_passwords(a, b, config);
            assert_that!(score, ge(0.0));
            assert_that!(score, le(1.0));
        }
    }

    #[test]
    fn test_degree_of_similarity_preserves_order() {
        let config = FilterConfig::default();
        let scores = degree_of_similarity("password1", ["zzzz", "password2", "password1"], config);
        let names: Vec<&str> = scores.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zzzz", "password2", "password1"]);
        assert_that!(scores[1].1, eq(0.784));
        assert_that!(scores[2].1, eq(1.0));
    }

    #[test]
    fn test_degree_of_similarity_empty() {
        let scores = degree_of_similarity("abc", Vec::<String>::new(), FilterConfig::default());
        assert!(scores.is_empty());
    }
}
