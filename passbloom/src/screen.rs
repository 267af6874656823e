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


//! Screening a password against reference filter stores.
//!
//! [`screen`] builds the filter of the input password once, loads each store in turn and keeps
//! every stored password whose Jaccard score reaches the threshold. A store that cannot be read
//! is reported in [`ScreenReport::failures`] and the remaining stores are still screened.
//!
//! # Usage
//!
//! ```rust
//! # use passbloom::bloom::FilterConfig;
//! # use passbloom::screen::{screen, ScreenConfig};
//! # use passbloom::store::FilterStore;
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("beta1.txt");
//! FilterStore::new(&path)
//!     .persist_passwords(["password1", "zxcvbnm"], FilterConfig::default())
//!     .unwrap();
//!
//! let report = screen("password2", [&path], &ScreenConfig::default());
//! assert!(report.is_clean());
//! assert_eq!(report.matches.len(), 1);
//! assert_eq!(report.matches[0].password, "password1");
//! ```

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::bloom::FilterConfig;
use crate::error::Error;
use crate::password::filter_for_password;
use crate::similarity::jaccard;
use crate::store::FilterStore;

/// Default minimum score for a stored password to count as similar.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Parameters for [`screen`].
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::FilterConfig;
/// # use passbloom::screen::ScreenConfig;
/// let config = ScreenConfig::default().with_threshold(0.9).unwrap();
/// assert_eq!(config.threshold(), 0.9);
/// assert_eq!(config.filter(), FilterConfig::default());
///
/// assert!(ScreenConfig::default().with_threshold(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenConfig {
    filter: FilterConfig,
    threshold: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            filter: FilterConfig::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ScreenConfig {
    /// Sets the filter configuration used for the input password and for loaded filters.
    ///
    /// It should match the configuration the stores were generated with; stored filters of a
    /// different size are skipped.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the minimum score (inclusive) for a match.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::error::ErrorKind::InvalidConfig) unless `threshold` is a
    /// number in `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_config("threshold must be between 0.0 and 1.0")
                .with_context("threshold", threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Returns the filter configuration.
    pub fn filter(&self) -> FilterConfig {
        self.filter
    }

    /// Returns the match threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// A stored password whose filter scored at or above the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The stored password.
    pub password: String,
    /// Jaccard score against the input password.
    pub score: f64,
    /// The store the password was found in.
    pub store: PathBuf,
}

/// A store that could not be screened.
#[derive(Debug)]
pub struct StoreFailure {
    /// Path of the store.
    pub store: PathBuf,
    /// Why loading it failed.
    pub error: Error,
}

/// Outcome of [`screen`].
#[derive(Debug, Default)]
pub struct ScreenReport {
    /// Matches in store order; within a store, sorted by password rather than file order.
    pub matches: Vec<Match>,
    /// Stores that failed to load, in store order.
    pub failures: Vec<StoreFailure>,
    /// Records skipped because their filter size differs from the input filter's.
    pub skipped: usize,
}

impl ScreenReport {
    /// Returns true if every store was loaded and every record was scored.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }

    /// Returns true if at least one similar password was found.
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Screens `password` against every store in `stores`.
///
/// Matches from one store are sorted by password (see [`FilterStore::load_all`]), not kept in
/// the order the records appear in the file.
///
/// An empty [`ScreenReport::matches`] means no similar password was found. Failures never abort
/// the run: an unreadable store is recorded and skipped, and a record whose size differs from
/// the input filter is counted in [`ScreenReport::skipped`].
pub fn screen<I, P>(password: &str, stores: I, config: &ScreenConfig) -> ScreenReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let input = filter_for_password(password, config.filter);
    let mut report = ScreenReport::default();

    for path in stores {
        let store = FilterStore::new(path.as_ref()).with_num_hashes(config.filter.num_hashes());
        let filters = match store.load_all() {
            Ok(filters) => filters,
            Err(err) => {
                warn!(store = %store.path().display(), error = %err, "Failed to load filter store, skipping");
                report.failures.push(StoreFailure {
                    store: store.path().to_path_buf(),
                    error: err,
                });
                continue;
            }
        };

        let before = report.matches.len();
        for (stored, filter) in filters {
            match jaccard(&input, &filter) {
                Ok(score) if score >= config.threshold => report.matches.push(Match {
                    password: stored,
                    score,
                    store: store.path().to_path_buf(),
                }),
                Ok(_) => {}
                Err(err) => {
                    warn!(store = %store.path().display(), error = %err, "Skipping stored filter");
                    report.skipped += 1;
                }
            }
        }
        debug!(
            store = %store.path().display(),
            matches = report.matches.len() - before,
            "Screened filter store"
        );
    }

    report
}
