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


mod common;

use common::test_data;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::near;
use passbloom::bloom::FilterConfig;
use passbloom::error::ErrorKind;
use passbloom::password::filter_for_password;
use passbloom::screen::ScreenConfig;
use passbloom::screen::screen;
use passbloom::store::FilterStore;

#[test]
fn test_single_record_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.txt");
    let filter = filter_for_password("password1", FilterConfig::default());
    FilterStore::new(&path)
        .persist([("password1", &filter)])
        .unwrap();

    let report = screen("password1", [&path], &ScreenConfig::default());
    let matches: Vec<(&str, f64)> = report
        .matches
        .iter()
        .map(|m| (m.password.as_str(), m.score))
        .collect();
    assert_eq!(matches, vec![("password1", 1.0)]);
    assert!(report.is_clean());
}

#[test]
fn test_reference_store() {
    let report = screen("password1", [test_data("beta1.txt")], &ScreenConfig::default());
    assert!(report.is_clean());
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches[0].password, "password1");
    assert_that!(report.matches[0].score, eq(1.0));
    assert_eq!(report.matches[1].password, "password12");
    assert_that!(report.matches[1].score, near(0.8951612903225806, 1e-12));
}

#[test]
fn test_threshold_is_inclusive() {
    let config = ScreenConfig::default().with_threshold(0.784).unwrap();
    let report = screen("password2", [test_data("beta1.txt")], &config);
    let passwords: Vec<&str> = report.matches.iter().map(|m| m.password.as_str()).collect();
    assert_eq!(passwords, vec!["password1"]);
}

#[test]
fn test_no_similar_password() {
    let report = screen("zq", [test_data("beta1.txt")], &ScreenConfig::default());
    assert!(!report.has_matches());
    assert!(report.is_clean());
}

#[test]
fn test_results_follow_store_order() {
    let stores = [test_data("mixed_widths.txt"), test_data("beta1.txt")];
    let report = screen("password2", &stores, &ScreenConfig::default());

    let found: Vec<(&str, &str)> = report
        .matches
        .iter()
        .map(|m| {
            let store = m.store.file_name().and_then(|n| n.to_str()).unwrap();
            (store, m.password.as_str())
        })
        .collect();
    assert_eq!(
        found,
        vec![
            ("mixed_widths.txt", "password1"),
            ("mixed_widths.txt", "password9"),
            ("beta1.txt", "password1"),
            ("beta1.txt", "password12"),
        ]
    );
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_failed_store_does_not_stop_screening() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let stores = [missing.clone(), test_data("beta1.txt")];

    let report = screen("letmein", &stores, &ScreenConfig::default());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].store, missing);
    assert_eq!(report.failures[0].error.kind(), ErrorKind::IoFailure);

    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].password, "letmein!");
    assert_that!(report.matches[0].score, near(0.86, 1e-12));
}

#[test]
fn test_screen_is_stable() {
    let stores = [test_data("beta1.txt")];
    let config = ScreenConfig::default().with_threshold(0.0).unwrap();
    let first = screen("sunshine1", &stores, &config);
    let second = screen("sunshine1", &stores, &config);
    assert_eq!(first.matches, second.matches);
    assert_eq!(first.matches.len(), 5);
}

#[test]
fn test_matches_sorted_by_password_within_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.txt");
    let config = FilterConfig::default();
    let password1 = filter_for_password("password1", config);
    let password2 = filter_for_password("password2", config);
    FilterStore::new(&path)
        .persist([
            ("password2", &password2),
            ("password1", &password1),
            ("password2", &password2),
        ])
        .unwrap();

    let report = screen("password1", [&path], &ScreenConfig::default());
    let passwords: Vec<&str> = report.matches.iter().map(|m| m.password.as_str()).collect();
    assert_eq!(passwords, vec!["password1", "password2"]);
}
