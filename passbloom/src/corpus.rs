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


//! Extracting fixed-length passwords from a raw corpus.
//!
//! Corpus files such as leaked password lists hold one password per line in no particular
//! encoding. Bytes are decoded as Latin-1 so every line yields a password and no line is lost to
//! decoding errors.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::error::ErrorKind;

/// Collects up to `count` passwords of exactly `length` characters from `reader`, sorted.
///
/// Each line is decoded as Latin-1 and stripped of surrounding whitespace before its length is
/// checked. Reading stops as soon as `count` passwords are found.
///
/// # Errors
///
/// Returns [`IoFailure`](crate::error::ErrorKind::IoFailure) if reading fails.
///
/// # Examples
///
/// ```
/// # use passbloom::corpus::extract_passwords;
/// let corpus = "123456\npassword\nabc\nqwerty\niloveyou\n";
/// let passwords = extract_passwords(corpus.as_bytes(), 6, 10).unwrap();
/// assert_eq!(passwords, vec!["123456", "qwerty"]);
/// ```
pub fn extract_passwords<R: BufRead>(
    mut reader: R,
    length: usize,
    count: usize,
) -> Result<Vec<String>, Error> {
    let mut passwords = Vec::new();
    let mut buf = Vec::new();

    while passwords.len() < count {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|e| {
            Error::new(ErrorKind::IoFailure, "failed to read corpus").set_source(e)
        })?;
        if read == 0 {
            break;
        }

        let line: String = buf.iter().map(|&b| char::from(b)).collect();
        let password = line.trim();
        if password.chars().count() == length {
            passwords.push(password.to_string());
        }
    }

    passwords.sort();
    Ok(passwords)
}

/// Opens the corpus at `path` and runs [`extract_passwords`] on it.
pub fn extract_passwords_from_file(
    path: impl AsRef<Path>,
    length: usize,
    count: usize,
) -> Result<Vec<String>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::IoFailure, "failed to open corpus")
            .with_context("path", path.display())
            .set_source(e)
    })?;

    let passwords = extract_passwords(BufReader::new(file), length, count)
        .map_err(|e| e.with_context("path", path.display()))?;
    debug!(path = %path.display(), length, found = passwords.len(), "Extracted passwords");
    Ok(passwords)
}
