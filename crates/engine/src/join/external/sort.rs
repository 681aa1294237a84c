// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reljoin_spill::{SpillScope, StoreName};
use reljoin_type::{Error, Result, Tuple, Value, key_at};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::join::external::merge::MergedRuns;

/// Sorts rows in chunks of at most `memory_limit` rows, spilling each chunk as
/// a sorted run, and merges the runs back into one ordered stream.
#[derive(Debug, Clone, Copy)]
pub struct ExternalSorter {
	memory_limit: usize,
}

impl ExternalSorter {
	pub fn new(memory_limit: usize) -> Result<Self> {
		if memory_limit == 0 {
			return Err(Error::InvalidConfig("memory limit must be at least one row".to_string()));
		}
		Ok(Self {
			memory_limit,
		})
	}

	pub fn memory_limit(&self) -> usize {
		self.memory_limit
	}

	/// Spills `rows` as sorted runs owned by `scope` and returns their merge.
	///
	/// The returned stream reads from the runs, so `scope` must not be
	/// released before the stream is consumed.
	pub fn sort<'a, T>(
		&self,
		scope: &mut SpillScope,
		rows: impl IntoIterator<Item = &'a T>,
		key: usize,
		prefix: &str,
	) -> Result<MergedRuns<T>>
	where
		T: Tuple + Serialize + DeserializeOwned + 'a,
	{
		let mut runs = Vec::new();
		let mut buffer: Vec<(Value, &T)> = Vec::with_capacity(self.memory_limit);
		let mut total = 0usize;

		for row in rows {
			buffer.push((key_at(row, key)?, row));
			total += 1;
			if buffer.len() == self.memory_limit {
				runs.push(spill_run(scope, &mut buffer, prefix)?);
			}
		}
		if !buffer.is_empty() {
			runs.push(spill_run(scope, &mut buffer, prefix)?);
		}

		debug!(prefix, rows = total, runs = runs.len(), memory_limit = self.memory_limit, "sorted runs written");

		let readers = runs.iter().map(|name| scope.reader(name)).collect::<Result<Vec<_>>>()?;
		MergedRuns::new(readers, key)
	}
}

/// Stable-sorts the buffer by key, writes it to a fresh store and clears it.
fn spill_run<T>(scope: &mut SpillScope, buffer: &mut Vec<(Value, &T)>, prefix: &str) -> Result<StoreName>
where
	T: Serialize,
{
	buffer.sort_by(|a, b| a.0.cmp(&b.0));

	let mut writer = scope.create::<T>(prefix)?;
	for (_, row) in buffer.iter() {
		writer.push(row)?;
	}
	let name = writer.name().clone();
	let rows = writer.finish()?;
	trace!(store = %name, rows, "run spilled");

	buffer.clear();
	Ok(name)
}
