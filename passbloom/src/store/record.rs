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


use crate::bloom::BloomFilter;
use crate::error::Error;

const SEPARATOR: char = ',';

/// Renders one store record, without the trailing newline.
///
/// # Errors
///
/// Returns [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the password holds a
/// `','`, `'\n'` or `'\r'`, any of which would make the record unreadable.
///
/// # Examples
///
/// ```
/// # use passbloom::bloom::BloomFilter;
/// # use passbloom::store::encode_record;
/// let filter = BloomFilter::from_bitstring("0110", 15).unwrap();
/// assert_eq!(encode_record("hunter2", &filter).unwrap(), "hunter2,0110");
/// assert!(encode_record("a,b", &filter).is_err());
/// ```
pub fn encode_record(password: &str, filter: &BloomFilter) -> Result<String, Error> {
    if let Some(c) = password
        .chars()
        .find(|&c| c == SEPARATOR || c == '\n' || c == '\r')
    {
        return Err(
            Error::invalid_argument("password cannot be stored in a filter store")
                .with_context("character", c.escape_default()),
        );
    }

    let bits = filter.to_bitstring();
    let mut line = String::with_capacity(password.len() + 1 + bits.len());
    line.push_str(password);
    line.push(SEPARATOR);
    line.push_str(&bits);
    Ok(line)
}

/// Parses one store record into its password and filter.
///
/// `line` must not include the line terminator. The filter size is the bitstring width;
/// `num_hashes` is applied to the rebuilt filter.
///
/// # Errors
///
/// Returns [`InvalidData`](crate::error::ErrorKind::InvalidData) if the line does not hold
/// exactly one `','` or the bitstring is empty or not binary.
///
/// # Examples
///
/// ```
/// # use passbloom::store::decode_record;
/// let (password, filter) = decode_record("hunter2,0110", 15).unwrap();
/// assert_eq!(password, "hunter2");
/// assert_eq!(filter.capacity(), 4);
/// ```
pub fn decode_record(line: &str, num_hashes: u16) -> Result<(&str, BloomFilter), Error> {
    let (password, bits) = split_record(line)?;
    let filter = BloomFilter::from_bitstring(bits, num_hashes)?;
    Ok((password, filter))
}

/// Splits a record into password and bitstring without decoding the bits.
pub(super) fn split_record(line: &str) -> Result<(&str, &str), Error> {
    match line.split_once(SEPARATOR) {
        Some((password, bits)) if !bits.contains(SEPARATOR) => Ok((password, bits)),
        _ => Err(Error::deserial(format!(
            "record must have the form <password>{SEPARATOR}<bitstring>"
        ))),
    }
}
