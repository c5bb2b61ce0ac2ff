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

#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Number of low-frequency items in [`skewed_stream`].
pub const LIGHT_ITEMS: usize = 1000;

/// Heavy items of [`skewed_stream`] and their counts, heaviest first.
pub const HEAVY_ITEMS: [(&str, i64); 3] = [
    ("heavy3", 90_000),
    ("heavy2", 50_000),
    ("heavy1", 10_000),
];

/// A stream of thousands of light items counted 1..100 times each, followed by
/// three heavy items with well separated counts.
pub fn skewed_stream(seed: u64) -> Vec<(String, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stream: Vec<(String, i64)> = (0..LIGHT_ITEMS)
        .map(|i| (format!("foo{i}bar"), rng.random_range(1..100)))
        .collect();
    stream.extend(
        HEAVY_ITEMS
            .iter()
            .rev()
            .map(|(value, count)| (value.to_string(), *count)),
    );
    stream
}

/// Sum of all counts in a stream.
pub fn stream_total(stream: &[(String, i64)]) -> u64 {
    stream.iter().map(|(_, count)| *count as u64).sum()
}

/// A row hasher that maps every value below the sketch width to its own column.
pub fn identity_hasher(value: &u64, _row: usize) -> u64 {
    *value
}
