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


//! Filter store: persisted `(password, filter)` records.
//!
//! A store is a plain text file with one record per line:
//!
//! ```text
//! <password>,<bitstring>
//! ```
//!
//! where `bitstring` renders the filter's bit array as one `'0'` or `'1'` per bit. There is no
//! header. The width of each bitstring is the size of the filter that produced it, and records
//! in one file are not required to share a width.
//!
//! The hash count is not recorded. Filters loaded from a store take it from
//! [`FilterStore::with_num_hashes`], which defaults to 15. Scoring only reads the bit array, so a
//! wrong hash count only matters for elements inserted after loading.
//!
//! # Usage
//!
//! ```rust
//! # use passbloom::bloom::FilterConfig;
//! # use passbloom::store::FilterStore;
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("store.txt");
//! let store = FilterStore::new(&path);
//! store
//!     .persist_passwords(["password1", "123456"], FilterConfig::default())
//!     .unwrap();
//!
//! let filter = store.load_one("123456").unwrap().unwrap();
//! assert_eq!(filter.capacity(), 1000);
//! assert!(store.load_one("qwerty").unwrap().is_none());
//! assert_eq!(store.load_all().unwrap().len(), 2);
//! ```

mod file;
mod record;

pub use self::file::FilterStore;
pub use self::record::decode_record;
pub use self::record::encode_record;
