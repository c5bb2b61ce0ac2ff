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
use std::marker::PhantomData;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::countmin::CountMinSketchBuilder;
use crate::countmin::Estimate;
use crate::countmin::NoopObserver;
use crate::countmin::UpdateObserver;
use crate::error::Error;
use crate::hash::RowHasher;

// Depths up to this size keep per-call scratch buffers on the stack.
const INLINE_DEPTH: usize = 8;

type RowBuffer<V> = SmallVec<[V; INLINE_DEPTH]>;

/// Thread-safe Count-Min sketch.
///
/// The counter matrix, the running total and the observer sit behind a single
/// mutex, so every update is applied atomically and observed in a total order.
/// Per-row hashes are computed before the lock is taken.
pub struct CountMinSketch<T: ?Sized, H, O = NoopObserver> {
    width: usize,
    depth: usize,
    hasher: H,
    state: Mutex<SketchState<O>>,
    _item: PhantomData<fn(&T)>,
}

struct SketchState<O> {
    /// Row-major counters, `depth` rows of `width` cells.
    counts: Vec<u64>,
    total_count: u64,
    observer: O,
}

impl<T: ?Sized, H> CountMinSketch<T, H> {
    /// Creates a sketch with `width` counters per row and `depth` rows.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `width` or `depth` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hitters::countmin::CountMinSketch;
    /// # use hitters::error::ErrorKind;
    /// # use hitters::hash::Murmur3RowHasher;
    /// let err = CountMinSketch::<str, _>::new(0, 4, Murmur3RowHasher::default()).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    /// ```
    pub fn new(width: usize, depth: usize, hasher: H) -> Result<Self, Error> {
        CountMinSketchBuilder::new()
            .width(width)
            .depth(depth)
            .hasher(hasher)
            .build()
    }

    /// Returns a builder for creating a sketch.
    pub fn builder() -> CountMinSketchBuilder<H> {
        CountMinSketchBuilder::new()
    }
}

impl<T: ?Sized, H, O> CountMinSketch<T, H, O> {
    pub(super) fn from_parts(width: usize, depth: usize, hasher: H, observer: O) -> Self {
        log::debug!("creating count-min sketch: width={width}, depth={depth}");
        Self {
            width,
            depth,
            hasher,
            state: Mutex::new(SketchState {
                counts: vec![0; width * depth],
                total_count: 0,
                observer,
            }),
            _item: PhantomData,
        }
    }

    /// Returns the number of counters per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the hash strategy.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the sum of all amounts added so far.
    pub fn total_count(&self) -> u64 {
        self.state.lock().total_count
    }

    /// Returns true if nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Runs `f` with the observer and the current total count, under the sketch's lock.
    ///
    /// No update can interleave with `f`, so whatever it reads is consistent with
    /// the counters at a single point in time.
    pub fn read_observer<R>(&self, f: impl FnOnce(&O, u64) -> R) -> R {
        let state = self.state.lock();
        f(&state.observer, state.total_count)
    }
}

impl<T, H, O> CountMinSketch<T, H, O>
where
    T: ?Sized,
    H: RowHasher<T>,
    O: UpdateObserver<T>,
{
    /// Adds one to the count of `value` and returns its new estimate.
    pub fn add(&self, value: &T) -> Result<Estimate, Error> {
        self.add_with_amount(value, 1)
    }

    /// Adds `amount` to the count of `value` and returns its new estimate.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// if `amount` is negative or would overflow the total count. The sketch is
    /// left untouched in both cases.
    pub fn add_with_amount(&self, value: &T, amount: i64) -> Result<Estimate, Error> {
        let amount = u64::try_from(amount).map_err(|err| {
            Error::invalid_argument("amount must not be negative")
                .with_context("amount", amount)
                .set_source(err)
        })?;
        let width = self.width as u64;
        let columns: RowBuffer<usize> = (0..self.depth)
            .map(|row| (self.hasher.hash_row(value, row) % width) as usize)
            .collect();

        let mut row_counts: RowBuffer<i64> = SmallVec::with_capacity(self.depth);
        let (min_count, total_count) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            // every cell is bounded by the total, so only the total needs checking
            let Some(total_count) = state.total_count.checked_add(amount) else {
                return Err(Error::invalid_argument("total count would overflow")
                    .with_context("amount", amount)
                    .with_context("total_count", state.total_count));
            };
            state.total_count = total_count;
            let mut min_count = u64::MAX;
            for (row, column) in columns.iter().enumerate() {
                let cell = &mut state.counts[row * self.width + column];
                *cell += amount;
                let count = *cell;
                min_count = min_count.min(count);
                row_counts.push(noise_corrected(count, total_count, self.width));
            }
            state.observer.on_update(value, amount, min_count, total_count);
            (min_count, total_count)
        };

        let mean_count = median(&mut row_counts);
        Ok(Estimate::new(min_count, mean_count, total_count))
    }

    /// Returns the current estimate for `value` without changing any count.
    ///
    /// This is an update by zero: it takes the lock so that the row counters and
    /// the total count are read together, and the observer sees it as well.
    pub fn estimate(&self, value: &T) -> Result<Estimate, Error> {
        self.add_with_amount(value, 0)
    }
}

impl<T: ?Sized, H, O> fmt::Debug for CountMinSketch<T, H, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountMinSketch")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("total_count", &self.total_count())
            .finish_non_exhaustive()
    }
}

/// Removes the expected collision noise from a single row counter.
///
/// Every other item in the stream lands in one of the `width - 1` other cells of
/// the row with equal probability; what remains after subtracting their share is
/// this row's guess for the item. A single-column row has no other cells.
fn noise_corrected(count: u64, total_count: u64, width: usize) -> i64 {
    let count_i64 = i64::try_from(count).unwrap_or(i64::MAX);
    if width == 1 {
        return count_i64;
    }
    let noise = (total_count - count) / (width as u64 - 1);
    count_i64.saturating_sub(i64::try_from(noise).unwrap_or(i64::MAX))
}

/// Exact median by partition-based selection. Reorders `values`.
///
/// With an even number of values, returns the truncated mean of the two middle ones.
fn median(values: &mut [i64]) -> i64 {
    debug_assert!(!values.is_empty());
    let len = values.len();
    let mid = len / 2;
    let (lower, upper, _) = values.select_nth_unstable(mid);
    let upper = *upper;
    if len % 2 == 1 {
        return upper;
    }
    // everything left of `mid` is <= upper, so its max is the lower middle value
    let lower = lower.iter().copied().max().unwrap_or(upper);
    ((i128::from(lower) + i128::from(upper)) / 2) as i64
}
