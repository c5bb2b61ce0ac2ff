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

mod common;

use common::HEAVY_ITEMS;
use common::identity_hasher;
use common::skewed_stream;
use common::stream_total;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;
use hitters::error::ErrorKind;
use hitters::hash::Murmur3RowHasher;
use hitters::heavyhitters::DEFAULT_HEAVY_HITTERS_LIMIT;
use hitters::heavyhitters::HeavyHitterTracker;
use hitters::heavyhitters::HeavyHitters;

fn assert_sorted<T>(snapshot: &HeavyHitters<T>) {
    for pair in snapshot.entries().windows(2) {
        assert!(pair[0].count() >= pair[1].count(), "snapshot is not sorted");
    }
}

fn values<T: Clone>(snapshot: &HeavyHitters<T>) -> Vec<T> {
    snapshot.iter().map(|hitter| hitter.value().clone()).collect()
}

#[test]
fn test_zero_max_items_is_rejected() {
    let err = HeavyHitterTracker::<u64, _>::new(16, 2, 0, identity_hasher).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));
    assert_that!(err.message(), contains_substring("max_items"));
}

#[test]
fn test_sketch_config_is_validated() {
    let err = HeavyHitterTracker::<u64, _>::new(0, 2, 5, identity_hasher).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));
    let err = HeavyHitterTracker::<u64, _>::new(16, 0, 5, identity_hasher).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));
}

#[test]
fn test_negative_amount_leaves_tracker_unchanged() {
    let tracker = HeavyHitterTracker::new(16, 2, 4, identity_hasher).unwrap();
    tracker.add_with_amount(&3, 2).unwrap();

    let err = tracker.add_with_amount(&5, -1).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidArgument));
    assert_that!(tracker.total_count(), eq(2));
    assert_that!(tracker.len(), eq(1));
}

#[test]
fn test_tracks_top_items_in_order() {
    let tracker = HeavyHitterTracker::new(64, 2, 3, identity_hasher).unwrap();
    for (value, count) in [(1u64, 4), (2, 9), (3, 1), (4, 7), (5, 2)] {
        tracker.add_with_amount(&value, count).unwrap();
    }
    let top = tracker.heavy_hitters(None);
    assert_eq!(values(&top), [2, 4, 1]);
    let counts: Vec<u64> = top.iter().map(|hitter| hitter.count()).collect();
    assert_eq!(counts, [9, 7, 4]);
    assert_that!(top.total_count(), eq(23));
    assert_that!(tracker.len(), eq(3));
    assert_that!(tracker.max_items(), eq(3));
}

#[test]
fn test_rising_item_overtakes_and_stale_items_are_evicted() {
    let tracker = HeavyHitterTracker::new(64, 2, 2, identity_hasher).unwrap();
    tracker.add_with_amount(&1, 5).unwrap();
    tracker.add_with_amount(&2, 3).unwrap();
    assert_eq!(values(&tracker.heavy_hitters(None)), [1, 2]);

    for _ in 0..4 {
        tracker.add(&2).unwrap();
    }
    assert_eq!(values(&tracker.heavy_hitters(None)), [2, 1]);

    // 1 is never seen again and drops out once two items outrank it
    tracker.add_with_amount(&3, 6).unwrap();
    assert_eq!(values(&tracker.heavy_hitters(None)), [2, 3]);
}

#[test]
fn test_reads_track_untracked_items() {
    let tracker = HeavyHitterTracker::new(64, 2, 2, identity_hasher).unwrap();
    tracker.add(&1).unwrap();
    let estimate = tracker.estimate(&9).unwrap();
    assert_that!(estimate.min_count(), eq(0));
    assert_that!(tracker.len(), eq(2));
    assert_eq!(values(&tracker.heavy_hitters(None)), [1, 9]);
    assert_that!(tracker.total_count(), eq(1));

    // a full index drops a newcomer that ranks last
    tracker.add_with_amount(&9, 3).unwrap();
    tracker.estimate(&5).unwrap();
    assert_that!(tracker.len(), eq(2));
    assert_eq!(values(&tracker.heavy_hitters(None)), [9, 1]);
}

#[test]
fn test_limit_and_default_cap() {
    let tracker = HeavyHitterTracker::new(512, 2, 150, identity_hasher).unwrap();
    for value in 0..200u64 {
        tracker.add_with_amount(&value, value as i64 + 1).unwrap();
    }
    assert_that!(tracker.len(), eq(150));

    let capped = tracker.heavy_hitters(None);
    assert_that!(capped.len(), eq(DEFAULT_HEAVY_HITTERS_LIMIT));
    assert_eq!(capped.entries()[0].value(), &199);
    assert_sorted(&capped);

    assert_that!(tracker.heavy_hitters(Some(150)).len(), eq(150));
    assert_that!(tracker.heavy_hitters(Some(500)).len(), eq(150));
    assert!(tracker.heavy_hitters(Some(0)).is_empty());
}

#[test]
fn test_heavy_hitters_on_skewed_stream() {
    let stream = skewed_stream(123);
    let tracker = HeavyHitterTracker::new(100, 8, 10, Murmur3RowHasher::default()).unwrap();
    for (value, count) in &stream {
        let before = tracker.estimate(value).unwrap();
        let after = tracker.add_with_amount(value, *count).unwrap();
        assert_that!(after.min_count(), eq(before.min_count() + *count as u64));
        assert_that!(after.total_count(), eq(before.total_count() + *count as u64));
    }

    // reads refresh tracked counts to the sketch's current estimate
    let expected: Vec<(String, u64)> = HEAVY_ITEMS
        .iter()
        .map(|(value, _)| {
            let value = value.to_string();
            let count = tracker.estimate(&value).unwrap().min_count();
            (value, count)
        })
        .collect();

    let top = tracker.heavy_hitters(Some(3));
    let actual: Vec<(String, u64)> = top
        .iter()
        .map(|hitter| (hitter.value().clone(), hitter.count()))
        .collect();
    assert_eq!(actual, expected);
    assert_that!(top.total_count(), eq(stream_total(&stream)));

    let all = tracker.heavy_hitters(None);
    assert_that!(all.len(), eq(10));
    assert_sorted(&all);
}

#[test]
fn test_snapshot_is_isolated_from_later_updates() {
    let tracker = HeavyHitterTracker::new(64, 2, 3, identity_hasher).unwrap();
    tracker.add_with_amount(&1, 5).unwrap();
    tracker.add_with_amount(&2, 3).unwrap();

    let snapshot = tracker.heavy_hitters(None);
    let copy = snapshot.clone();

    tracker.add_with_amount(&2, 10).unwrap();
    tracker.add_with_amount(&7, 20).unwrap();

    assert_eq!(snapshot, copy);
    assert_eq!(values(&snapshot), [1, 2]);
    assert_that!(snapshot.total_count(), eq(8));
    assert_eq!(values(&tracker.heavy_hitters(None)), [7, 2, 1]);
}

#[test]
fn test_snapshot_into_iter() {
    let tracker = HeavyHitterTracker::new(64, 2, 3, identity_hasher).unwrap();
    tracker.add_with_amount(&4, 2).unwrap();
    tracker.add_with_amount(&6, 3).unwrap();

    let owned: Vec<u64> = tracker
        .heavy_hitters(None)
        .into_iter()
        .map(|hitter| hitter.into_value())
        .collect();
    assert_eq!(owned, [6, 4]);
}
