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


//! Bigram decomposition of passwords.

use std::iter;

/// Returns every two-character window of `password`, in order.
///
/// A password of `n` characters yields `n - 1` bigrams; duplicates are kept. Passwords shorter
/// than two characters yield nothing. Windows are taken over Unicode scalar values, not bytes.
///
/// # Examples
///
/// ```
/// # use passbloom::bigram::bigrams;
/// assert_eq!(bigrams("abc"), vec!["ab", "bc"]);
/// assert!(bigrams("a").is_empty());
/// ```
pub fn bigrams(password: &str) -> Vec<&str> {
    let boundaries: Vec<usize> = password
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(iter::once(password.len()))
        .collect();

    boundaries
        .windows(3)
        .map(|w| &password[w[0]..w[2]])
        .collect()
}
