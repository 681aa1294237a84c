// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, collections::BinaryHeap};

use reljoin_spill::SpillReader;
use reljoin_type::{Result, Tuple, Value, key_at};
use serde::de::DeserializeOwned;

/// Lazy k-way merge of sorted runs, yielding `(key, row)` in key order.
///
/// Equal keys come out in run order, so the merge is stable with respect to
/// the input the runs were cut from. Holds one row per run in memory.
pub struct MergedRuns<T> {
	runs: Vec<SpillReader<T>>,
	heap: BinaryHeap<Head<T>>,
	key: usize,
	failed: bool,
}

struct Head<T> {
	key: Value,
	run: usize,
	row: T,
}

impl<T> PartialEq for Head<T> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.run == other.run
	}
}

impl<T> Eq for Head<T> {}

impl<T> PartialOrd for Head<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> Ord for Head<T> {
	// reversed: BinaryHeap is a max-heap
	fn cmp(&self, other: &Self) -> Ordering {
		other.key.cmp(&self.key).then_with(|| other.run.cmp(&self.run))
	}
}

impl<T> MergedRuns<T>
where
	T: Tuple + DeserializeOwned,
{
	pub(crate) fn new(mut runs: Vec<SpillReader<T>>, key: usize) -> Result<Self> {
		let mut heap = BinaryHeap::with_capacity(runs.len());
		for (run, reader) in runs.iter_mut().enumerate() {
			if let Some(row) = reader.next().transpose()? {
				heap.push(Head {
					key: key_at(&row, key)?,
					run,
					row,
				});
			}
		}

		Ok(Self {
			runs,
			heap,
			key,
			failed: false,
		})
	}

	/// Number of sorted runs being merged.
	pub fn runs(&self) -> usize {
		self.runs.len()
	}

	fn refill(&mut self, run: usize) -> Result<()> {
		if let Some(row) = self.runs[run].next().transpose()? {
			self.heap.push(Head {
				key: key_at(&row, self.key)?,
				run,
				row,
			});
		}
		Ok(())
	}
}

impl<T> Iterator for MergedRuns<T>
where
	T: Tuple + DeserializeOwned,
{
	type Item = Result<(Value, T)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let head = self.heap.pop()?;
		if let Err(err) = self.refill(head.run) {
			self.failed = true;
			return Some(Err(err));
		}

		Some(Ok((head.key, head.row)))
	}
}
