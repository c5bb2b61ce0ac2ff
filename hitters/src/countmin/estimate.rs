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

/// Result of adding to, or reading from, a Count-Min sketch.
///
/// An estimate is a snapshot: it is computed under the sketch's lock and does not
/// change when the sketch is updated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Estimate {
    min_count: u64,
    mean_count: i64,
    total_count: u64,
}

impl Estimate {
    pub(crate) fn new(min_count: u64, mean_count: i64, total_count: u64) -> Self {
        Self {
            min_count,
            mean_count,
            total_count,
        }
    }

    /// Returns the minimum counter across rows.
    ///
    /// This never underestimates: it is at least the number of times the item was
    /// actually added. Use it when an upper bound is required, e.g. for ranking.
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// Returns the median of the noise-corrected row counts.
    ///
    /// Each row's counter has the expected contribution of colliding items removed,
    /// so this tracks the true count more closely than [`min_count`](Self::min_count)
    /// on a saturated sketch. It may be lower than the true count, or negative.
    pub fn mean_count(&self) -> i64 {
        self.mean_count
    }

    /// Returns the sum of all amounts added to the sketch when this estimate was taken.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns [`mean_count`](Self::mean_count) as a fraction of the total count.
    ///
    /// Returns `0.0` for an empty sketch.
    pub fn frequency(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.mean_count as f64 / self.total_count as f64
        }
    }
}
