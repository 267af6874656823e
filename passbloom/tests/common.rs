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


use std::path::PathBuf;

pub fn test_data(name: &str) -> PathBuf {
    const TEST_DATA_DIR: &str = "tests/test_data";

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(TEST_DATA_DIR)
        .join(name);

    if !path.exists() {
        panic!(
            r#"test data file not found: {}

            Store fixtures are checked in under tests/test_data. Each line holds a password and
            the '0'/'1' rendering of its bigram filter (1000 bits, 15 hashes unless noted).
        "#,
            path.display(),
        );
    }

    path
}
