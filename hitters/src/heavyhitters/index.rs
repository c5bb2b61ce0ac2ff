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

use std::collections::HashMap;
use std::hash::Hash;

use crate::countmin::UpdateObserver;
use crate::error::Error;

/// A tracked item and its estimated count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeavyHitter<T> {
    value: T,
    count: u64,
}

impl<T> HeavyHitter<T> {
    fn new(value: T, count: u64) -> Self {
        Self { value, count }
    }

    /// Returns the item.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the estimated count.
    ///
    /// This is the sketch's minimum estimate: it may exceed the true count but is
    /// never below it.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Consumes the entry, returning the item.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Bounded list of items ordered by descending estimated count.
///
/// Entries live in a vector kept sorted at all times, with a map from item to
/// its slot. An update only ever moves an entry toward the front, one adjacent
/// swap at a time; eviction pops the tail.
///
/// # Precondition
///
/// Counts reported for an item must never decrease between updates. That holds
/// for a Count-Min sketch that only accepts non-negative amounts, and it is what
/// makes front-only sifting sufficient. A variant with decay or negative amounts
/// would need a full reposition instead.
#[derive(Debug, Clone)]
pub struct TopKIndex<T> {
    max_items: usize,
    positions: HashMap<T, usize>,
    entries: Vec<HeavyHitter<T>>,
}

impl<T: Eq + Hash + Clone> TopKIndex<T> {
    /// Creates an empty index holding at most `max_items` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `max_items` is zero.
    pub fn new(max_items: usize) -> Result<Self, Error> {
        if max_items < 1 {
            return Err(Error::config_invalid("max_items must be at least 1")
                .with_context("max_items", max_items));
        }
        Ok(Self {
            max_items,
            positions: HashMap::new(),
            entries: Vec::new(),
        })
    }

    /// Returns the maximum number of tracked items.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Returns the number of tracked items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no item is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first `limit` entries, highest count first.
    pub fn top(&self, limit: usize) -> &[HeavyHitter<T>] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Returns the tracked count of `value`, if it is tracked.
    pub fn get(&self, value: &T) -> Option<u64> {
        self.positions.get(value).map(|&pos| self.entries[pos].count)
    }

    fn record(&mut self, value: &T, count: u64) {
        if let Some(&pos) = self.positions.get(value) {
            debug_assert!(self.entries[pos].count <= count, "tracked count decreased");
            self.entries[pos].count = count;
            self.sift_toward_front(pos);
            return;
        }

        let pos = self.entries.len();
        self.entries.push(HeavyHitter::new(value.clone(), count));
        self.positions.insert(value.clone(), pos);
        self.sift_toward_front(pos);

        if self.entries.len() > self.max_items {
            if let Some(evicted) = self.entries.pop() {
                self.positions.remove(&evicted.value);
                log::trace!("evicted heavy hitter with count {}", evicted.count);
            }
        }
    }

    fn sift_toward_front(&mut self, mut pos: usize) {
        while pos > 0 && self.entries[pos - 1].count < self.entries[pos].count {
            self.entries.swap(pos - 1, pos);
            if let Some(slot) = self.positions.get_mut(&self.entries[pos].value) {
                *slot = pos;
            }
            pos -= 1;
        }
        if let Some(slot) = self.positions.get_mut(&self.entries[pos].value) {
            *slot = pos;
        }
    }
}

impl<T: Eq + Hash + Clone> UpdateObserver<T> for TopKIndex<T> {
    /// Refreshes `value`'s entry, inserting it if it is new.
    ///
    /// Reads (`amount == 0`) go through here too, so an item that is only looked
    /// up can enter the list; it is evicted at once if it ranks last in a full list.
    fn on_update(&mut self, value: &T, _amount: u64, min_count: u64, _total_count: u64) {
        self.record(value, min_count);
    }
}
