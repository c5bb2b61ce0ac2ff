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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The Count-Min sketch keeps a `width × depth` matrix of counters and answers
//! "how many times has this item been seen" with a bounded overestimate. Every
//! estimate carries two views of the count:
//!
//! - the classic minimum over rows, which never underestimates, and
//! - a noise-corrected median over rows, which subtracts the expected collision
//!   noise and is closer to the true count once the matrix saturates, at the cost
//!   of sometimes underestimating or going negative.
//!
//! All operations take `&self` and may be called from any number of threads.
//!
//! # Usage
//!
//! ```rust
//! # use hitters::countmin::CountMinSketch;
//! # use hitters::hash::Murmur3RowHasher;
//! let sketch = CountMinSketch::new(256, 5, Murmur3RowHasher::default()).unwrap();
//! sketch.add("apple").unwrap();
//! sketch.add_with_amount("banana", 3).unwrap();
//!
//! let banana = sketch.estimate("banana").unwrap();
//! assert!(banana.min_count() >= 3);
//! assert_eq!(banana.total_count(), 4);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! # use hitters::countmin::{suggest_depth, suggest_width, CountMinSketchBuilder};
//! # use hitters::hash::Murmur3RowHasher;
//! let sketch = CountMinSketchBuilder::new()
//!     .width(suggest_width(0.01))
//!     .depth(suggest_depth(0.99))
//!     .hasher(Murmur3RowHasher::default())
//!     .build::<str>()
//!     .unwrap();
//! assert_eq!(sketch.width(), 272);
//! assert_eq!(sketch.depth(), 5);
//! ```

mod builder;
mod estimate;
mod observer;
mod sketch;

pub use self::builder::CountMinSketchBuilder;
pub use self::builder::DEFAULT_DEPTH;
pub use self::builder::DEFAULT_WIDTH;
pub use self::estimate::Estimate;
pub use self::observer::NoopObserver;
pub use self::observer::UpdateObserver;
pub use self::sketch::CountMinSketch;

/// Suggests a width so that the minimum estimate overshoots by at most
/// `relative_error * total_count` with high probability.
///
/// # Panics
///
/// Panics if `relative_error` is not in `(0.0, 1.0)`.
pub fn suggest_width(relative_error: f64) -> usize {
    assert!(
        relative_error > 0.0 && relative_error < 1.0,
        "relative_error must be in (0.0, 1.0)"
    );
    (std::f64::consts::E / relative_error).ceil() as usize
}

/// Suggests a depth so that the width's error bound holds with the given confidence.
///
/// # Panics
///
/// Panics if `confidence` is not in `(0.0, 1.0)`.
pub fn suggest_depth(confidence: f64) -> usize {
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0.0, 1.0)"
    );
    ((1.0 / (1.0 - confidence)).ln().ceil() as usize).max(1)
}
