// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reljoin::{Dataset, Error, JoinAlgorithm, JoinConfig, JoinStrategy, MemoryStorage, ParallelHashJoin, Row, row};
use reljoin_testing::fixture::{Order, User, UserOrder, keyed_rows, orders, users};

fn algorithm<L, R, O>(strategy: JoinStrategy) -> Box<dyn JoinAlgorithm<L, R, O>>
where
	L: reljoin::Tuple + serde::Serialize + serde::de::DeserializeOwned + Sync,
	R: reljoin::Tuple + serde::Serialize + serde::de::DeserializeOwned + Sync,
	O: reljoin::FromTuple + Send,
{
	let config = JoinConfig::builder().memory_limit(2).partitions(3).workers(2).build().unwrap();
	strategy.algorithm_with_storage(&config, Arc::new(MemoryStorage::new())).unwrap()
}

#[test]
fn test_build_index_out_of_range() {
	let left = keyed_rows(5, 2, "l");
	let right = keyed_rows(5, 2, "r");
	for strategy in JoinStrategy::ALL {
		let err = algorithm::<Row, Row, Row>(strategy).join(&left, &right, 3, 0).unwrap_err();
		assert!(
			matches!(
				err,
				Error::IndexOutOfRange {
					index: 3,
					arity: 3
				}
			),
			"{strategy}: {err}"
		);
	}
}

#[test]
fn test_probe_index_out_of_range() {
	let left = keyed_rows(5, 2, "l");
	let right = keyed_rows(5, 2, "r");
	for strategy in JoinStrategy::ALL {
		let err = algorithm::<Row, Row, Row>(strategy).join(&left, &right, 0, 10).unwrap_err();
		assert!(
			matches!(
				err,
				Error::IndexOutOfRange {
					index: 10,
					arity: 3
				}
			),
			"{strategy}: {err}"
		);
	}
}

#[test]
fn test_probe_index_checked_even_when_build_side_is_empty() {
	let left: Dataset<Row> = Dataset::empty();
	let right = Dataset::new(vec![row![1i64]]);
	for strategy in JoinStrategy::ALL {
		let err = algorithm::<Row, Row, Row>(strategy).join(&left, &right, 0, 1).unwrap_err();
		assert!(matches!(err, Error::IndexOutOfRange { .. }), "{strategy}: {err}");
	}
}

#[test]
fn test_bad_index_on_an_empty_side_is_never_observed() {
	let left = Dataset::new(vec![row![1i64]]);
	let right: Dataset<Row> = Dataset::empty();
	for strategy in JoinStrategy::ALL {
		let result = algorithm::<Row, Row, Row>(strategy).join(&left, &right, 0, 42).unwrap();
		assert!(result.is_empty(), "{strategy}");
	}
}

#[test]
fn test_result_arity_mismatch() {
	let left = Dataset::new(vec![row![2i64, "Bob", "extra"]]);
	let right = Dataset::new(vec![row![2i64, 200.0]]);
	for strategy in JoinStrategy::ALL {
		let err = algorithm::<Row, Row, UserOrder>(strategy).join(&left, &right, 0, 0).unwrap_err();
		assert!(
			matches!(
				err.root_cause(),
				Error::ResultArityMismatch {
					expected: 3,
					actual: 4
				}
			),
			"{strategy}: {err}"
		);
	}
}

#[test]
fn test_result_field_type_mismatch() {
	for strategy in JoinStrategy::ALL {
		let err = algorithm::<User, User, UserOrder>(strategy).join(&users(), &users(), 0, 0).unwrap_err();
		assert!(
			matches!(
				err.root_cause(),
				Error::FieldTypeMismatch {
					index: 2,
					..
				}
			),
			"{strategy}: {err}"
		);
	}
}

#[test]
fn test_parallel_failure_is_reported_as_worker_failure() {
	let join = ParallelHashJoin::with_workers(3).unwrap();
	let left = keyed_rows(30, 5, "l");
	let right = keyed_rows(30, 5, "r");
	let err = JoinAlgorithm::<Row, Row, UserOrder>::join(&join, &left, &right, 0, 0).unwrap_err();

	let Error::WorkerFailure {
		worker,
		cause,
	} = &err
	else {
		panic!("expected a worker failure, got {err}");
	};
	assert!(*worker < 3);
	assert!(matches!(
		**cause,
		Error::ResultArityMismatch {
			expected: 3,
			actual: 5
		}
	));
	assert!(err.to_string().starts_with(&format!("worker {worker} failed")));
}

#[test]
fn test_typed_inputs_never_fail_on_valid_schema() {
	for strategy in JoinStrategy::ALL {
		let result = algorithm::<User, Order, UserOrder>(strategy).join(&users(), &orders(), 0, 0).unwrap();
		assert_eq!(result.len(), 5, "{strategy}");
	}
}

#[test]
fn test_invalid_config() {
	let err = JoinConfig::builder().partitions(0).build().unwrap_err();
	assert!(matches!(err, Error::InvalidConfig(_)));

	let config = JoinConfig {
		workers: 0,
		..JoinConfig::default()
	};
	for strategy in JoinStrategy::ALL {
		let result = strategy.algorithm_with_storage::<Row, Row, Row>(&config, Arc::new(MemoryStorage::new()));
		assert!(matches!(result, Err(Error::InvalidConfig(_))), "{strategy}");
	}
}
