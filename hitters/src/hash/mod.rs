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

//! Per-row hash strategies for the Count-Min sketch.
//!
//! A sketch of depth `d` needs `d` independent hash functions. They are modeled
//! as a single strategy parameterized by the row index; the sketch reduces each
//! result modulo its width.
//!
//! Any `Fn(&T, usize) -> u64` closure is a strategy:
//!
//! ```rust
//! # use hitters::hash::RowHasher;
//! let hasher = |value: &u64, row: usize| value.wrapping_mul(31).wrapping_add(row as u64);
//! assert_eq!(hasher.hash_row(&2, 1), 63);
//! ```

use std::hash::Hash;
use std::hash::Hasher;

/// Default seed for [`Murmur3RowHasher`].
pub const DEFAULT_HASH_SEED: u32 = 0;

/// Maps an item and a row index to a hash value.
///
/// Implementations must be deterministic: the same `(item, row)` pair has to
/// produce the same value for the lifetime of a sketch, otherwise estimates are
/// meaningless. Different rows should behave as independent functions.
pub trait RowHasher<T: ?Sized> {
    /// Hashes `item` for the given `row`.
    fn hash_row(&self, item: &T, row: usize) -> u64;
}

impl<T, F> RowHasher<T> for F
where
    T: ?Sized,
    F: Fn(&T, usize) -> u64,
{
    fn hash_row(&self, item: &T, row: usize) -> u64 {
        self(item, row)
    }
}

/// MurmurHash3 (x64, 128-bit) over the item's [`Hash`] output, salted with the row.
///
/// Only the low 64 bits of the 128-bit digest are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3RowHasher {
    seed: u32,
}

impl Murmur3RowHasher {
    /// Creates a hasher with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3RowHasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_HASH_SEED)
    }
}

impl<T: Hash + ?Sized> RowHasher<T> for Murmur3RowHasher {
    fn hash_row(&self, item: &T, row: usize) -> u64 {
        let mut hasher = mur3::Hasher128::with_seed(self.seed);
        item.hash(&mut hasher);
        hasher.write_u64(row as u64);
        let (h1, _) = hasher.finish128();
        h1
    }
}
