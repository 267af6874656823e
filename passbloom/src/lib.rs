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


//! # passbloom
//!
//! Estimates how structurally close two passwords are without comparing them directly. Each
//! password is broken into its character bigrams, the bigrams are inserted into a Bloom filter,
//! and two passwords are scored by the Jaccard coefficient of their filters' bit arrays.
//!
//! This library is divided into modules that constitute distinct groups of functionality:
//!
//! - [`bloom`]: the Bloom filter and its configuration
//! - [`bigram`] and [`password`]: turning passwords into filters
//! - [`similarity`]: scoring filters and passwords against each other
//! - [`store`]: the text format for persisted filters
//! - [`screen`]: checking a password against reference stores
//! - [`corpus`]: pulling fixed-length passwords out of a raw corpus
//!
//! ```rust
//! use passbloom::bloom::FilterConfig;
//! use passbloom::similarity::compare_passwords;
//!
//! let score = compare_passwords("password1", "password2", FilterConfig::default());
//! assert!(score > 0.7);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bigram;
pub mod bloom;
pub mod corpus;
pub mod error;
pub mod password;
pub mod screen;
pub mod similarity;
pub mod store;

mod hash;
