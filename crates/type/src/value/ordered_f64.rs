// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

const CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

/// An `f64` usable as a join key.
///
/// `-0.0` is stored as `0.0` and every NaN as one canonical NaN, so that
/// equality, hashing and ordering all agree on the bit pattern.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}
}

impl From<f64> for OrderedF64 {
	fn from(value: f64) -> Self {
		if value.is_nan() {
			OrderedF64(f64::from_bits(CANONICAL_NAN))
		} else if value == 0.0 {
			OrderedF64(0.0)
		} else {
			OrderedF64(value)
		}
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.0.to_bits())
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
