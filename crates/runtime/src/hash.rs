// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hashing of join keys.
//!
//! Bucket assignment for the partitioned strategies uses xxHash3 with a
//! fixed seed, so a key lands in the same bucket on both sides of a join
//! and across runs.

use core::hash::{Hash, Hasher};

use reljoin_type::Value;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash64(pub u64);

impl From<u64> for Hash64 {
	fn from(value: u64) -> Self {
		Hash64(value)
	}
}

impl From<Hash64> for u64 {
	fn from(hash: Hash64) -> Self {
		hash.0
	}
}

impl Hash for Hash64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.0)
	}
}

/// Compute xxHash3 64-bit hash of a key.
#[inline]
pub fn hash_value(value: &Value) -> Hash64 {
	let mut hasher = Xxh3::new();
	value.hash(&mut hasher);
	Hash64(hasher.finish())
}

/// The bucket in `0..partitions` a key belongs to.
///
/// `partitions` must be non-zero; strategies reject a zero count when they
/// are constructed.
#[inline]
pub fn partition_of(value: &Value, partitions: usize) -> usize {
	debug_assert!(partitions > 0, "partition count must be positive");
	(hash_value(value).0 % partitions as u64) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hash_value_is_deterministic() {
		assert_eq!(hash_value(&Value::utf8("po1k23")), hash_value(&Value::utf8("po1k23")));
		assert_ne!(hash_value(&Value::int8(1)), hash_value(&Value::int8(2)));
	}

	#[test]
	fn test_equal_floats_share_a_bucket() {
		for partitions in 1..16 {
			assert_eq!(
				partition_of(&Value::float8(0.0), partitions),
				partition_of(&Value::float8(-0.0), partitions)
			);
		}
	}

	#[test]
	fn test_partition_in_range() {
		for key in 0..1000i64 {
			assert!(partition_of(&Value::int8(key), 7) < 7);
		}
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic(expected = "partition count must be positive")]
	fn test_zero_partitions_is_rejected_in_debug_builds() {
		partition_of(&Value::int8(1), 0);
	}

	#[test]
	fn test_partition_spreads_keys() {
		let mut seen = [false; 5];
		for key in 0..100i64 {
			seen[partition_of(&Value::int8(key), 5)] = true;
		}
		assert!(seen.iter().all(|s| *s));
	}

	#[test]
	fn test_hash64_conversions() {
		let value: u64 = 12345;
		let hash = Hash64::from(value);
		assert_eq!(u64::from(hash), value);
	}
}
