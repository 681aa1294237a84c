// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reljoin::{
	Dataset, Error, FileStorage, JoinAlgorithm, JoinConfig, JoinStrategy, MemoryStorage, Row, TempStorage, row,
};
use reljoin_testing::{
	fixture::{Order, User, UserOrder, keyed_rows, orders, users},
	init_tracing,
	storage::FailingStorage,
	tempdir::{remaining_files, temp_dir},
};

fn spilling() -> impl Iterator<Item = JoinStrategy> {
	JoinStrategy::ALL.into_iter().filter(|strategy| strategy.spills())
}

fn config() -> JoinConfig {
	JoinConfig::builder().memory_limit(4).partitions(3).build().unwrap()
}

#[test]
fn test_file_stores_removed_after_success() {
	init_tracing();
	temp_dir(|path| {
		let config = JoinConfig::builder().memory_limit(4).partitions(3).temp_dir(path).build().unwrap();
		let left = keyed_rows(30, 6, "l");
		let right = keyed_rows(20, 6, "r");
		for strategy in spilling() {
			let algorithm = strategy.algorithm::<Row, Row, Row>(&config).unwrap();
			let result = algorithm.join(&left, &right, 0, 0).unwrap();
			assert!(!result.is_empty());
			assert_eq!(remaining_files(path)?, Vec::<String>::new(), "{strategy}");
		}
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_file_stores_removed_after_error() {
	temp_dir(|path| {
		let storage = Arc::new(FileStorage::new(path.join("spill")));
		let left = keyed_rows(30, 6, "l");
		let right = keyed_rows(20, 6, "r");
		for strategy in spilling() {
			let algorithm = strategy.algorithm_with_storage::<Row, Row, Row>(&config(), storage.clone()).unwrap();
			let err = algorithm.join(&left, &right, 0, 9).unwrap_err();
			assert!(matches!(err, Error::IndexOutOfRange { .. }), "{strategy}");
			assert_eq!(remaining_files(path)?, Vec::<String>::new(), "{strategy}");
			assert!(storage.list().unwrap().is_empty(), "{strategy}");
		}
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_foreign_files_are_left_alone() {
	temp_dir(|path| {
		std::fs::write(path.join("keep.txt"), b"not a spill file")?;
		let storage = Arc::new(FileStorage::new(path));
		for strategy in spilling() {
			let algorithm =
				strategy.algorithm_with_storage::<User, Order, UserOrder>(&config(), storage.clone()).unwrap();
			algorithm.join(&users(), &orders(), 0, 0).unwrap();
		}
		let remaining = remaining_files(path)?;
		assert_eq!(remaining.len(), 1);
		assert!(remaining[0].ends_with("keep.txt"));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_stores_removed_after_result_construction_failure() {
	let left = Dataset::new(vec![row![1i64, "a", "b"], row![2i64, "c", "d"]]);
	let right = Dataset::new(vec![row![1i64, 1.0], row![2i64, 2.0]]);
	for strategy in spilling() {
		let storage = MemoryStorage::new();
		let algorithm =
			strategy.algorithm_with_storage::<Row, Row, UserOrder>(&config(), Arc::new(storage.clone())).unwrap();
		let err = algorithm.join(&left, &right, 0, 0).unwrap_err();
		assert!(matches!(err, Error::ResultArityMismatch { .. }), "{strategy}");
		assert!(storage.list().unwrap().is_empty(), "{strategy}");
		assert_eq!(storage.bytes(), 0, "{strategy}");
	}
}

#[test]
fn test_stores_removed_when_creation_fails_midway() {
	for strategy in spilling() {
		let storage = Arc::new(FailingStorage::new().fail_create_after(2));
		let algorithm = strategy.algorithm_with_storage::<Row, Row, UserOrder>(&config(), storage.clone()).unwrap();
		let err = algorithm.join(&keyed_rows(20, 4, "l"), &keyed_rows(20, 4, "r"), 0, 0).unwrap_err();
		assert!(matches!(err, Error::Resource { .. }), "{strategy}");
		assert!(storage.created() > 2, "{strategy}");
		assert!(storage.inner().list().unwrap().is_empty(), "{strategy}");
	}
}

#[test]
fn test_stores_removed_when_writes_fail() {
	for strategy in spilling() {
		let storage = Arc::new(FailingStorage::new().fail_writes());
		let algorithm = strategy.algorithm_with_storage::<User, Order, UserOrder>(&config(), storage.clone()).unwrap();
		let err = algorithm.join(&users(), &orders(), 0, 0).unwrap_err();
		assert!(matches!(err, Error::Resource { .. }), "{strategy}");
		assert!(storage.created() > 0, "{strategy}");
		assert!(storage.inner().list().unwrap().is_empty(), "{strategy}");
	}
}

#[test]
fn test_removal_failure_does_not_mask_the_result() {
	for strategy in spilling() {
		let storage = Arc::new(FailingStorage::new().fail_removes());
		let algorithm = strategy.algorithm_with_storage::<User, Order, UserOrder>(&config(), storage.clone()).unwrap();
		let result = algorithm.join(&users(), &orders(), 0, 0).unwrap();
		assert_eq!(result.len(), 5, "{strategy}");
		assert_eq!(storage.inner().list().unwrap().len(), storage.created(), "{strategy}");
	}
}

#[test]
fn test_concurrent_joins_share_a_directory() {
	temp_dir(|path| {
		let config = JoinConfig::builder().memory_limit(3).partitions(4).temp_dir(path).build().unwrap();
		std::thread::scope(|s| {
			for strategy in spilling() {
				for _ in 0..3 {
					let config = &config;
					s.spawn(move || {
						let left = keyed_rows(40, 7, "l");
						let right = keyed_rows(40, 7, "r");
						let algorithm = strategy.algorithm::<Row, Row, Row>(config).unwrap();
						let result = algorithm.join(&left, &right, 0, 0).unwrap();
						assert!(!result.is_empty());
					});
				}
			}
		});
		assert_eq!(remaining_files(path)?, Vec::<String>::new());
		Ok(())
	})
	.unwrap();
}
