// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use reljoin_type::{Dataset, FromTuple, Result, Tuple, Value, key_at};
use tracing::{instrument, trace};

use crate::join::common::{JoinAlgorithm, build_result, combine};

/// Single-pass build/probe join.
///
/// Output follows the probe order; for each probe row, matching build rows
/// appear in build order.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashJoin;

impl<L, R, O> JoinAlgorithm<L, R, O> for HashJoin
where
	L: Tuple,
	R: Tuple,
	O: FromTuple,
{
	fn name(&self) -> &'static str {
		"Hash Join"
	}

	#[instrument(name = "join::hash", level = "debug", skip_all, fields(left = left.len(), right = right.len()))]
	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>> {
		hash_join_rows(left, right, build_key, probe_key).map(Dataset::new)
	}
}

/// Builds a multi-map from `left` keyed at `build_key`, then probes it with
/// every row of `right`.
pub(crate) fn hash_join_rows<L, R, O>(
	left: impl IntoIterator<Item = L>,
	right: impl IntoIterator<Item = R>,
	build_key: usize,
	probe_key: usize,
) -> Result<Vec<O>>
where
	L: Tuple,
	R: Tuple,
	O: FromTuple,
{
	let mut table: HashMap<Value, Vec<L>> = HashMap::new();
	for row in left {
		let key = key_at(&row, build_key)?;
		table.entry(key).or_default().push(row);
	}

	trace!(keys = table.len(), "hash table built");

	let mut result = Vec::new();
	for row in right {
		let key = key_at(&row, probe_key)?;
		if let Some(bucket) = table.get(&key) {
			for build in bucket {
				result.push(build_result(combine(build, &row, probe_key))?);
			}
		}
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use reljoin_testing::fixture::{UserOrder, orders, users};
	use reljoin_type::{Error, Row, row};

	use super::*;

	#[test]
	fn test_reference_scenario_in_probe_order() {
		let result: Dataset<UserOrder> = HashJoin.join(&users(), &orders(), 0, 0).unwrap();
		assert_eq!(
			result.into_rows(),
			vec![
				UserOrder::new(2, "Bob", 200.0),
				UserOrder::new(2, "Bobby", 200.0),
				UserOrder::new(3, "Charlie", 300.0),
				UserOrder::new(2, "Bob", 250.0),
				UserOrder::new(2, "Bobby", 250.0),
			]
		);
	}

	#[test]
	fn test_no_matches() {
		let left = Dataset::new(vec![row![1i64]]);
		let right = Dataset::new(vec![row![2i64]]);
		let result: Dataset<Row> = HashJoin.join(&left, &right, 0, 0).unwrap();
		assert!(result.is_empty());
	}

	#[test]
	fn test_bad_probe_index_with_empty_build_side() {
		let left: Dataset<Row> = Dataset::empty();
		let right = Dataset::new(vec![row![1i64]]);
		let err = JoinAlgorithm::<Row, Row, Row>::join(&HashJoin, &left, &right, 0, 4).unwrap_err();
		assert!(matches!(
			err,
			Error::IndexOutOfRange {
				index: 4,
				arity: 1
			}
		));
	}

	#[test]
	fn test_bad_build_index_on_empty_side_is_not_observed() {
		let left: Dataset<Row> = Dataset::empty();
		let right = Dataset::new(vec![row![1i64]]);
		let result: Dataset<Row> = HashJoin.join(&left, &right, 9, 0).unwrap();
		assert!(result.is_empty());
	}

	#[test]
	fn test_join_borrowed_rows() {
		let users = users();
		let orders = orders();
		let left: Dataset<_> = users.iter().collect();
		let right: Dataset<_> = orders.iter().collect();
		let result: Dataset<UserOrder> = HashJoin.join(&left, &right, 0, 0).unwrap();
		assert_eq!(result.len(), 5);
	}
}
