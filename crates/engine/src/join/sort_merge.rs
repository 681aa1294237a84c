// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use reljoin_type::{Dataset, FromTuple, Result, Tuple, Value, key_at};
use tracing::{instrument, trace};

use crate::join::common::{JoinAlgorithm, build_result, combine};

/// Sorts both inputs by key, then merges them.
///
/// Output is ordered by key. Within a key, left rows vary slowest and both
/// sides keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortMergeJoin;

impl<L, R, O> JoinAlgorithm<L, R, O> for SortMergeJoin
where
	L: Tuple,
	R: Tuple,
	O: FromTuple,
{
	fn name(&self) -> &'static str {
		"Sort Merge Join"
	}

	#[instrument(name = "join::sort_merge", level = "debug", skip_all, fields(left = left.len(), right = right.len()))]
	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>> {
		let left = sort_by_key(left, build_key)?;
		let right = sort_by_key(right, probe_key)?;
		merge_join(left.into_iter().map(Ok), right.into_iter().map(Ok), probe_key).map(Dataset::new)
	}
}

/// Pairs each row with its key and stable-sorts by key.
pub(crate) fn sort_by_key<T: Tuple>(rows: impl IntoIterator<Item = T>, key: usize) -> Result<Vec<(Value, T)>> {
	let mut keyed = rows.into_iter().map(|row| Ok((key_at(&row, key)?, row))).collect::<Result<Vec<_>>>()?;
	keyed.sort_by(|a, b| a.0.cmp(&b.0));
	Ok(keyed)
}

/// Merges two key-ordered streams of `(key, row)` pairs.
///
/// Only the current run of equal keys on each side is held in memory, so
/// the streams may come straight from disk.
pub(crate) fn merge_join<L, R, O>(
	left: impl Iterator<Item = Result<(Value, L)>>,
	right: impl Iterator<Item = Result<(Value, R)>>,
	probe_key: usize,
) -> Result<Vec<O>>
where
	L: Tuple,
	R: Tuple,
	O: FromTuple,
{
	let mut left = Cursor::new(left)?;
	let mut right = Cursor::new(right)?;
	let mut result = Vec::new();
	let mut groups = 0usize;

	while let (Some(l), Some(r)) = (left.key(), right.key()) {
		match l.cmp(r) {
			Ordering::Less => left.advance()?,
			Ordering::Greater => right.advance()?,
			Ordering::Equal => {
				let build = left.take_run()?;
				let probe = right.take_run()?;
				for l in &build {
					for r in &probe {
						result.push(build_result(combine(l, r, probe_key))?);
					}
				}
				groups += 1;
			}
		}
	}

	trace!(groups, rows = result.len(), "merge finished");
	Ok(result)
}

struct Cursor<T, I> {
	rows: I,
	head: Option<(Value, T)>,
}

impl<T, I> Cursor<T, I>
where
	I: Iterator<Item = Result<(Value, T)>>,
{
	fn new(mut rows: I) -> Result<Self> {
		let head = rows.next().transpose()?;
		Ok(Self {
			rows,
			head,
		})
	}

	fn key(&self) -> Option<&Value> {
		self.head.as_ref().map(|(key, _)| key)
	}

	fn advance(&mut self) -> Result<()> {
		self.head = self.rows.next().transpose()?;
		Ok(())
	}

	/// Takes the head and every following row with the same key.
	fn take_run(&mut self) -> Result<Vec<T>> {
		let Some((key, row)) = self.head.take() else {
			return Ok(Vec::new());
		};

		let mut run = vec![row];
		loop {
			match self.rows.next().transpose()? {
				Some((next, row)) if next == key => run.push(row),
				next => {
					self.head = next;
					return Ok(run);
				}
			}
		}
	}
}
