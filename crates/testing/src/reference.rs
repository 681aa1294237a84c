// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A nested-loop equi-join used as the oracle for every strategy.

use reljoin_type::{Dataset, Row, Tuple, Value};

/// Every pair with equal keys, as untyped rows, in left-major order.
///
/// # Panics
///
/// Panics if a key index is out of range; callers pass valid indices.
pub fn nested_loop_join<L: Tuple, R: Tuple>(
	left: &Dataset<L>,
	right: &Dataset<R>,
	build_key: usize,
	probe_key: usize,
) -> Vec<Row> {
	let mut result = Vec::new();
	for l in left {
		let left_key = l.field(build_key).expect("build key in range");
		for r in right {
			let right_key = r.field(probe_key).expect("probe key in range");
			if left_key == right_key {
				let mut values = l.values();
				values.extend(
					r.values().into_iter().enumerate().filter(|(idx, _)| *idx != probe_key).map(|(_, v)| v),
				);
				result.push(Row::new(values));
			}
		}
	}
	result
}

/// Rows converted to untyped form and sorted, for order-independent comparison.
pub fn sorted<T: Tuple>(rows: impl IntoIterator<Item = T>) -> Vec<Row> {
	let mut rows: Vec<Row> = rows.into_iter().map(|r| Row::new(r.values())).collect();
	rows.sort();
	rows
}

/// Keys of `rows` at `index`, in order.
pub fn keys<T: Tuple>(rows: &[T], index: usize) -> Vec<Value> {
	rows.iter().map(|r| r.field(index).expect("key in range")).collect()
}
