// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reljoin::{ExternalSorter, FileStorage, MemoryStorage, Row, SpillScope, TempStorage, Value};
use reljoin_testing::{
	fixture::{User, keyed_rows, middle_keyed_rows, users},
	reference::{keys, sorted},
	tempdir::{remaining_files, temp_dir},
};

fn assert_sorted_permutation(input: &[Row], output: &[Row], key: usize) {
	let output_keys = keys(output, key);
	assert!(output_keys.windows(2).all(|w| w[0] <= w[1]), "keys out of order: {output_keys:?}");
	assert_eq!(sorted(output.iter()), sorted(input.iter()));
}

#[test]
fn test_merged_stream_is_a_sorted_permutation() {
	for (rows, memory_limit) in [(20, 10), (21, 10), (100, 7), (64, 1), (33, 16)] {
		let storage = MemoryStorage::new();
		let mut scope = SpillScope::new(Arc::new(storage.clone()), "test");
		let input = keyed_rows(rows, 13, "x");

		let merged = ExternalSorter::new(memory_limit).unwrap().sort(&mut scope, &input, 0, "sort").unwrap();
		assert_eq!(merged.runs(), rows.div_ceil(memory_limit));
		let output: Vec<Row> = merged.map(|entry| entry.map(|(_, row)| row)).collect::<reljoin::Result<_>>().unwrap();

		assert_sorted_permutation(input.rows(), &output, 0);
		assert!(scope.release().is_empty());
		assert!(storage.list().unwrap().is_empty());
	}
}

#[test]
fn test_merge_keeps_input_order_within_a_key() {
	let mut scope = SpillScope::new(Arc::new(MemoryStorage::new()), "test");
	let input = keyed_rows(60, 4, "x");

	let output: Vec<Row> = ExternalSorter::new(9)
		.unwrap()
		.sort(&mut scope, &input, 0, "sort")
		.unwrap()
		.map(|entry| entry.unwrap().1)
		.collect();

	for key in 0..4i64 {
		let seqs: Vec<Value> = output
			.iter()
			.filter(|row| row.get(0) == Some(&Value::int8(key)))
			.map(|row| row.get(2).cloned().unwrap())
			.collect();
		assert!(seqs.windows(2).all(|w| w[0] < w[1]), "key {key}: {seqs:?}");
	}
}

#[test]
fn test_sort_on_a_middle_key() {
	let mut scope = SpillScope::new(Arc::new(MemoryStorage::new()), "test");
	let input = middle_keyed_rows(45, 6);
	let output: Vec<Row> = ExternalSorter::new(5)
		.unwrap()
		.sort(&mut scope, &input, 1, "sort")
		.unwrap()
		.map(|entry| entry.unwrap().1)
		.collect();
	assert_sorted_permutation(input.rows(), &output, 1);
}

#[test]
fn test_typed_rows_through_files() {
	temp_dir(|path| {
		let mut scope = SpillScope::new(Arc::new(FileStorage::new(path)), "test");
		let input = users();
		let merged = ExternalSorter::new(1).unwrap().sort(&mut scope, &input, 1, "sort").unwrap();
		assert_eq!(merged.runs(), 4);
		assert_eq!(remaining_files(path)?.len(), 4);

		let names: Vec<String> = merged.map(|entry| entry.unwrap().1.name).collect();
		assert_eq!(names, vec!["Alice", "Bob", "Bobby", "Charlie"]);

		assert!(scope.release().is_empty());
		assert!(remaining_files(path)?.is_empty());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_dropping_the_scope_removes_runs() {
	let storage = MemoryStorage::new();
	{
		let mut scope = SpillScope::new(Arc::new(storage.clone()), "test");
		let input: Vec<User> = users().into_rows();
		let _merged = ExternalSorter::new(2).unwrap().sort(&mut scope, &input, 0, "sort").unwrap();
		assert_eq!(storage.list().unwrap().len(), 2);
	}
	assert!(storage.list().unwrap().is_empty());
}
