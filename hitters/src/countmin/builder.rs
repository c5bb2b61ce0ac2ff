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

use crate::countmin::NoopObserver;
use crate::countmin::sketch::CountMinSketch;
use crate::error::Error;

/// Default number of counters per row.
pub const DEFAULT_WIDTH: usize = 1024;

/// Default number of rows.
pub const DEFAULT_DEPTH: usize = 4;

/// Builder for creating Count-Min sketches.
///
/// The hash strategy has no default and must be set before [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use hitters::countmin::CountMinSketchBuilder;
/// use hitters::hash::Murmur3RowHasher;
///
/// let sketch = CountMinSketchBuilder::new()
///     .width(512)
///     .depth(6)
///     .hasher(Murmur3RowHasher::with_seed(7))
///     .build::<u64>()
///     .unwrap();
///
/// sketch.add(&9).unwrap();
/// assert_eq!(sketch.estimate(&9).unwrap().min_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountMinSketchBuilder<H, O = NoopObserver> {
    width: usize,
    depth: usize,
    hasher: Option<H>,
    observer: O,
}

impl<H> Default for CountMinSketchBuilder<H> {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            hasher: None,
            observer: NoopObserver,
        }
    }
}

impl<H> CountMinSketchBuilder<H> {
    /// Creates a builder with the default width and depth and no hasher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H, O> CountMinSketchBuilder<H, O> {
    /// Sets the number of counters per row.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the number of rows, i.e. the number of hash functions.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the per-row hash strategy.
    pub fn hasher(mut self, hasher: H) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Sets the observer notified after every update.
    pub fn observer<P>(self, observer: P) -> CountMinSketchBuilder<H, P> {
        CountMinSketchBuilder {
            width: self.width,
            depth: self.depth,
            hasher: self.hasher,
            observer,
        }
    }

    /// Builds the sketch.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the width or depth is zero, or if no hasher was set.
    pub fn build<T: ?Sized>(self) -> Result<CountMinSketch<T, H, O>, Error> {
        if self.width < 1 {
            return Err(Error::config_invalid("width must be at least 1")
                .with_context("width", self.width));
        }
        if self.depth < 1 {
            return Err(Error::config_invalid("depth must be at least 1")
                .with_context("depth", self.depth));
        }
        let hasher = self
            .hasher
            .ok_or_else(|| Error::config_invalid("hash function is required"))?;
        Ok(CountMinSketch::from_parts(
            self.width,
            self.depth,
            hasher,
            self.observer,
        ))
    }
}
