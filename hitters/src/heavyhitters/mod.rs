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

//! Top-K tracking of the most frequent items in a stream.
//!
//! A [`HeavyHitterTracker`] is a Count-Min sketch with an attached [`TopKIndex`].
//! The index keeps at most `max_items` entries ordered by descending estimated
//! count, and is updated inside the sketch's critical section, so its counts are
//! always the sketch's own minimum estimates.
//!
//! # Usage
//!
//! ```rust
//! # use hitters::hash::Murmur3RowHasher;
//! # use hitters::heavyhitters::HeavyHitterTracker;
//! let tracker = HeavyHitterTracker::new(1024, 4, 2, Murmur3RowHasher::default()).unwrap();
//! tracker.add_with_amount(&"a", 10).unwrap();
//! tracker.add_with_amount(&"b", 3).unwrap();
//! tracker.add_with_amount(&"c", 7).unwrap();
//!
//! let top = tracker.heavy_hitters(None);
//! let values: Vec<_> = top.iter().map(|hitter| *hitter.value()).collect();
//! assert_eq!(values, ["a", "c"]);
//! assert_eq!(top.total_count(), 20);
//! ```

mod index;
mod tracker;

pub use self::index::HeavyHitter;
pub use self::index::TopKIndex;
pub use self::tracker::DEFAULT_HEAVY_HITTERS_LIMIT;
pub use self::tracker::HeavyHitterTracker;
pub use self::tracker::HeavyHitters;
