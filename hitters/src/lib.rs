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

//! Approximate frequency counting with a bounded top-K tracker.
//!
//! - [`countmin`]: a thread-safe Count-Min sketch returning both the classic
//!   minimum estimate and a noise-corrected median estimate.
//! - [`heavyhitters`]: a tracker that keeps the most frequent items of a stream
//!   in sync with the sketch it is built on.
//! - [`hash`]: the per-row hash strategies the sketch is parameterized by.
//!
//! # Usage
//!
//! ```rust
//! use hitters::hash::Murmur3RowHasher;
//! use hitters::heavyhitters::HeavyHitterTracker;
//!
//! let tracker = HeavyHitterTracker::new(2048, 5, 10, Murmur3RowHasher::default()).unwrap();
//! for word in "the cat and the hat and the bat".split_whitespace() {
//!     tracker.add(&word.to_string()).unwrap();
//! }
//!
//! let top = tracker.heavy_hitters(Some(1));
//! assert_eq!(top.entries()[0].value(), "the");
//! assert_eq!(top.entries()[0].count(), 3);
//! ```

#![deny(missing_docs)]

pub mod countmin;
pub mod error;
pub mod hash;
pub mod heavyhitters;
