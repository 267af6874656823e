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


use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use super::record::encode_record;
use super::record::split_record;
use crate::bloom::BloomFilter;
use crate::bloom::DEFAULT_NUM_HASHES;
use crate::bloom::FilterConfig;
use crate::error::Error;
use crate::password::filter_for_password;

/// A filter store file.
///
/// Every call opens the file, reads or writes it completely and closes it again; no state is
/// kept between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStore {
    path: PathBuf,
    num_hashes: u16,
}

impl FilterStore {
    /// Creates a handle for the store at `path`. The file is not touched.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilterStore {
            path: path.into(),
            num_hashes: DEFAULT_NUM_HASHES,
        }
    }

    /// Sets the hash count given to filters loaded from this store (default: 15).
    pub fn with_num_hashes(mut self, num_hashes: u16) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Returns the store's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the hash count given to loaded filters.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Writes one record per `(password, filter)` pair, replacing any existing file.
    ///
    /// Returns the number of records written. Writes are not atomic: on error the file may hold
    /// a prefix of the records.
    ///
    /// # Errors
    ///
    /// Returns [`IoFailure`](crate::error::ErrorKind::IoFailure) if the file cannot be written,
    /// and [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) for a password that
    /// cannot be stored (see [`encode_record`](super::encode_record)).
    pub fn persist<I, P, F>(&self, records: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = (P, F)>,
        P: AsRef<str>,
        F: Borrow<BloomFilter>,
    {
        let file = File::create(&self.path).map_err(|e| Error::io("create", &self.path, e))?;
        let mut writer = BufWriter::new(file);

        let mut written = 0;
        for (password, filter) in records {
            let line = encode_record(password.as_ref(), filter.borrow())
                .map_err(|e| e.with_context("path", self.path.display()))?;
            writeln!(writer, "{line}").map_err(|e| Error::io("write", &self.path, e))?;
            written += 1;
        }
        writer
            .flush()
            .map_err(|e| Error::io("write", &self.path, e))?;

        debug!(path = %self.path.display(), records = written, "Persisted filter store");
        Ok(written)
    }

    /// Builds a per-password filter for each password and persists them all.
    ///
    /// This is how reference stores are generated from an extracted corpus.
    pub fn persist_passwords<I, S>(
        &self,
        passwords: I,
        config: FilterConfig,
    ) -> Result<usize, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.persist(passwords.into_iter().map(|password| {
            let filter = filter_for_password(password.as_ref(), config);
            (password, filter)
        }))
    }

    /// Returns the filter of the first record whose password equals `password`.
    ///
    /// Returns `Ok(None)` when no record matches. Records after the match are not read.
    ///
    /// # Errors
    ///
    /// Returns [`IoFailure`](crate::error::ErrorKind::IoFailure) if the file cannot be read and
    /// [`InvalidData`](crate::error::ErrorKind::InvalidData) if a record up to and including the
    /// match is malformed.
    pub fn load_one(&self, password: &str) -> Result<Option<BloomFilter>, Error> {
        let reader = self.open()?;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.read_error(index, e))?;
            if line.is_empty() {
                continue;
            }

            let (stored, bits) =
                split_record(&line).map_err(|e| self.with_location(e, index))?;
            if stored == password {
                let filter = BloomFilter::from_bitstring(bits, self.num_hashes)
                    .map_err(|e| self.with_location(e, index))?;
                debug!(path = %self.path.display(), line = index + 1, "Found stored filter");
                return Ok(Some(filter));
            }
        }
        Ok(None)
    }

    /// Loads every record, keyed by password.
    ///
    /// When a password appears more than once, the last record wins. The returned map is sorted
    /// by password, not by position in the file.
    ///
    /// # Errors
    ///
    /// Returns [`IoFailure`](crate::error::ErrorKind::IoFailure) if the file cannot be read and
    /// [`InvalidData`](crate::error::ErrorKind::InvalidData) if any record is malformed.
    pub fn load_all(&self) -> Result<BTreeMap<String, BloomFilter>, Error> {
        let reader = self.open()?;
        let mut filters = BTreeMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.read_error(index, e))?;
            if line.is_empty() {
                continue;
            }

            let (password, bits) =
                split_record(&line).map_err(|e| self.with_location(e, index))?;
            let filter = BloomFilter::from_bitstring(bits, self.num_hashes)
                .map_err(|e| self.with_location(e, index))?;
            filters.insert(password.to_string(), filter);
        }

        debug!(path = %self.path.display(), records = filters.len(), "Loaded filter store");
        Ok(filters)
    }

    fn open(&self) -> Result<BufReader<File>, Error> {
        let file = File::open(&self.path).map_err(|e| Error::io("open", &self.path, e))?;
        Ok(BufReader::new(file))
    }

    fn read_error(&self, index: usize, err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::InvalidData {
            self.with_location(Error::deserial("record is not valid UTF-8"), index)
        } else {
            Error::io("read", &self.path, err).with_context("line", index + 1)
        }
    }

    fn with_location(&self, err: Error, index: usize) -> Error {
        err.with_context("path", self.path.display())
            .with_context("line", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_persist_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "stale,0\nstale2,1\n").unwrap();

        let store = FilterStore::new(&path);
        let filter = BloomFilter::from_bitstring("0101", 15).unwrap();
        assert_eq!(store.persist([("fresh", &filter)]).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh,0101\n");
    }

    #[test]
    fn test_persist_rejects_comma() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilterStore::new(dir.path().join("store.txt"));
        let filter = BloomFilter::new(8, 1).unwrap();
        let err = store.persist([("a,b", filter)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_persist_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilterStore::new(dir.path().join("missing").join("store.txt"));
        let err = store.persist(Vec::<(&str, BloomFilter)>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_load_one_first_match_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "a,10\nb,01\na,11\n").unwrap();

        let store = FilterStore::new(&path);
        let filter = store.load_one("a").unwrap().unwrap();
        assert_eq!(filter.to_bitstring(), "10");
        assert_eq!(filter.num_hashes(), DEFAULT_NUM_HASHES);
        assert!(store.load_one("c").unwrap().is_none());
    }

    #[test]
    fn test_load_one_stops_at_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "a,10\nbroken line\n").unwrap();

        let store = FilterStore::new(&path);
        assert!(store.load_one("a").unwrap().is_some());
        let err = store.load_one("z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.context("line"), Some("2"));
    }

    #[test]
    fn test_load_all_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "a,10\nb,011\na,11\n").unwrap();

        let filters = FilterStore::new(&path).with_num_hashes(4).load_all().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters["a"].to_bitstring(), "11");
        assert_eq!(filters["b"].capacity(), 3);
        assert_eq!(filters["b"].num_hashes(), 4);
    }

    #[test]
    fn test_load_all_sorted_by_password() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "password2,10\npassword1,01\npassword2,11\n").unwrap();

        let filters = FilterStore::new(&path).load_all().unwrap();
        let passwords: Vec<&str> = filters.keys().map(String::as_str).collect();
        assert_eq!(passwords, vec!["password1", "password2"]);
        assert_eq!(filters["password2"].to_bitstring(), "11");
    }

    #[test]
    fn test_load_handles_crlf_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, "a,10\r\n\r\nb,01\r\n").unwrap();

        let filters = FilterStore::new(&path).load_all().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters["b"].to_bitstring(), "01");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilterStore::new(dir.path().join("absent.txt"));
        assert_eq!(store.load_all().unwrap_err().kind(), ErrorKind::IoFailure);
        assert_eq!(store.load_one("a").unwrap_err().kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.txt");
        fs::write(&path, b"\xff\xfe,01\n").unwrap();

        let err = FilterStore::new(&path).load_all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
