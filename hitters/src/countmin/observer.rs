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

/// Hook invoked after every sketch update, while the sketch's lock is still held.
///
/// The observer lives inside the sketch's critical section. No other thread can
/// update the sketch between the counter update and the matching `on_update` call,
/// so whatever the observer derives from `min_count` is never stale relative to
/// the counters. Implementations must not call back into the sketch.
///
/// Closures with the matching signature are observers too.
pub trait UpdateObserver<T: ?Sized> {
    /// Called with the updated item, the amount added, the item's new minimum
    /// count, and the sketch's new total count.
    ///
    /// Reads (`amount == 0`) are reported as well.
    fn on_update(&mut self, value: &T, amount: u64, min_count: u64, total_count: u64);
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoopObserver;

impl<T: ?Sized> UpdateObserver<T> for NoopObserver {
    fn on_update(&mut self, _: &T, _: u64, _: u64, _: u64) {}
}

impl<T, F> UpdateObserver<T> for F
where
    T: ?Sized,
    F: FnMut(&T, u64, u64, u64),
{
    fn on_update(&mut self, value: &T, amount: u64, min_count: u64, total_count: u64) {
        self(value, amount, min_count, total_count)
    }
}
