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

use std::fmt;
use std::hash::Hash;

use crate::countmin::CountMinSketch;
use crate::countmin::CountMinSketchBuilder;
use crate::countmin::Estimate;
use crate::error::Error;
use crate::hash::RowHasher;
use crate::heavyhitters::HeavyHitter;
use crate::heavyhitters::TopKIndex;

/// Number of entries returned by [`HeavyHitterTracker::heavy_hitters`] when no limit is given.
pub const DEFAULT_HEAVY_HITTERS_LIMIT: usize = 100;

/// Tracks the most frequent items of a stream on top of a Count-Min sketch.
///
/// All operations take `&self`; the tracker can be shared between threads
/// (e.g. behind an `Arc`) when `T` and `H` are `Send + Sync`.
pub struct HeavyHitterTracker<T, H> {
    sketch: CountMinSketch<T, H, TopKIndex<T>>,
}

impl<T: Eq + Hash + Clone, H> HeavyHitterTracker<T, H> {
    /// Creates a tracker over a `width × depth` sketch that keeps the top
    /// `max_items` items.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `width`, `depth` or `max_items` is zero.
    pub fn new(width: usize, depth: usize, max_items: usize, hasher: H) -> Result<Self, Error> {
        let index = TopKIndex::new(max_items)?;
        let sketch = CountMinSketchBuilder::new()
            .width(width)
            .depth(depth)
            .hasher(hasher)
            .observer(index)
            .build()?;
        log::debug!("creating heavy hitter tracker: max_items={max_items}");
        Ok(Self { sketch })
    }

    /// Returns the maximum number of tracked items.
    pub fn max_items(&self) -> usize {
        self.sketch.read_observer(|index, _| index.max_items())
    }

    /// Returns the number of currently tracked items.
    pub fn len(&self) -> usize {
        self.sketch.read_observer(|index, _| index.len())
    }

    /// Returns true if no item is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sum of all amounts added so far.
    pub fn total_count(&self) -> u64 {
        self.sketch.total_count()
    }

    /// Returns the underlying sketch.
    pub fn sketch(&self) -> &CountMinSketch<T, H, TopKIndex<T>> {
        &self.sketch
    }

    /// Returns a snapshot of the top entries, highest count first.
    ///
    /// At most `limit` entries are copied, or [`DEFAULT_HEAVY_HITTERS_LIMIT`] when
    /// `limit` is `None`. The entries and the total count are read under the same
    /// lock, and later updates do not affect the returned snapshot.
    pub fn heavy_hitters(&self, limit: Option<usize>) -> HeavyHitters<T> {
        let limit = limit.unwrap_or(DEFAULT_HEAVY_HITTERS_LIMIT);
        self.sketch.read_observer(|index, total_count| HeavyHitters {
            entries: index.top(limit).to_vec(),
            total_count,
        })
    }
}

impl<T, H> HeavyHitterTracker<T, H>
where
    T: Eq + Hash + Clone,
    H: RowHasher<T>,
{
    /// Adds one to the count of `value`.
    pub fn add(&self, value: &T) -> Result<Estimate, Error> {
        self.sketch.add(value)
    }

    /// Adds `amount` to the count of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// if `amount` is negative; neither the sketch nor the tracked items change.
    pub fn add_with_amount(&self, value: &T, amount: i64) -> Result<Estimate, Error> {
        self.sketch.add_with_amount(value, amount)
    }

    /// Returns the current estimate for `value` without changing any count.
    pub fn estimate(&self, value: &T) -> Result<Estimate, Error> {
        self.sketch.estimate(value)
    }
}

impl<T, H> fmt::Debug for HeavyHitterTracker<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeavyHitterTracker")
            .field("sketch", &self.sketch)
            .finish()
    }
}

/// Point-in-time copy of a tracker's top entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyHitters<T> {
    entries: Vec<HeavyHitter<T>>,
    total_count: u64,
}

impl<T> HeavyHitters<T> {
    /// Returns the entries, highest count first.
    pub fn entries(&self) -> &[HeavyHitter<T>] {
        &self.entries
    }

    /// Returns the tracker's total count when the snapshot was taken.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries, highest count first.
    pub fn iter(&self) -> std::slice::Iter<'_, HeavyHitter<T>> {
        self.entries.iter()
    }
}

impl<T> IntoIterator for HeavyHitters<T> {
    type Item = HeavyHitter<T>;
    type IntoIter = std::vec::IntoIter<HeavyHitter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a HeavyHitters<T> {
    type Item = &'a HeavyHitter<T>;
    type IntoIter = std::slice::Iter<'a, HeavyHitter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
