// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	panic::{self, AssertUnwindSafe},
	sync::atomic::{AtomicBool, Ordering},
};

use crossbeam_channel::{Receiver, unbounded};
use reljoin_runtime::{ComputePool, partition_of};
use reljoin_type::{Dataset, Error, FromTuple, Result, Tuple, key_at};
use tracing::{debug, error, instrument, trace};

use crate::{
	config::JoinConfig,
	join::{common::JoinAlgorithm, hash::hash_join_rows},
};

/// Hash join split across a fixed pool of workers by a hash of the key.
///
/// Both inputs are partitioned once, then worker `w` joins bucket `w` of
/// each side. Results are concatenated in worker order. The first failing
/// worker fails the whole join; workers that have not started by then are
/// skipped.
pub struct ParallelHashJoin {
	pool: ComputePool,
	buckets: usize,
}

impl ParallelHashJoin {
	pub fn new(config: &JoinConfig) -> Result<Self> {
		Self::with_workers(config.workers)
	}

	pub fn with_workers(workers: usize) -> Result<Self> {
		Ok(Self {
			pool: ComputePool::new(workers)?,
			buckets: workers,
		})
	}

	/// More buckets than threads, so some buckets queue behind others.
	#[cfg(test)]
	fn with_pool(pool: ComputePool, buckets: usize) -> Self {
		Self {
			pool,
			buckets,
		}
	}

	pub fn workers(&self) -> usize {
		self.pool.threads()
	}
}

type WorkerResult<O> = (usize, Result<Vec<O>>);

impl<L, R, O> JoinAlgorithm<L, R, O> for ParallelHashJoin
where
	L: Tuple + Sync,
	R: Tuple + Sync,
	O: FromTuple + Send,
{
	fn name(&self) -> &'static str {
		"Parallel Hash Join"
	}

	#[instrument(name = "join::parallel_hash", level = "debug", skip_all, fields(
		workers = self.workers(),
		left = left.len(),
		right = right.len(),
	))]
	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>> {
		let buckets = self.buckets;
		let build = partition_refs(left, build_key, buckets)?;
		let probe = partition_refs(right, probe_key, buckets)?;

		let cancelled = AtomicBool::new(false);
		let (tx, rx) = unbounded::<WorkerResult<O>>();

		let result = self.pool.scope(|s| {
			for (worker, (build, probe)) in build.into_iter().zip(probe).enumerate() {
				let tx = tx.clone();
				let cancelled = &cancelled;
				s.spawn(move |_| {
					if cancelled.load(Ordering::Acquire) {
						trace!(worker, "skipped after cancellation");
						return;
					}
					debug!(worker, build = build.len(), probe = probe.len(), "worker started");

					let result = panic::catch_unwind(AssertUnwindSafe(|| {
						hash_join_rows::<_, _, O>(build, probe, build_key, probe_key)
					}))
					.unwrap_or_else(|payload| {
						Err(Error::WorkerPanicked {
							message: panic_message(payload),
						})
					});
					if result.is_err() {
						cancelled.store(true, Ordering::Release);
					}
					// the receiver is gone once the driver has failed
					let _ = tx.send((worker, result));
				});
			}
			drop(tx);
			collect(rx, buckets)
		});

		result.map(Dataset::new)
	}
}

/// Splits `rows` by key hash into `count` buckets of borrowed rows.
fn partition_refs<T: Tuple>(rows: &Dataset<T>, key: usize, count: usize) -> Result<Vec<Vec<&T>>> {
	let mut buckets: Vec<Vec<&T>> = (0..count).map(|_| Vec::new()).collect();
	for row in rows {
		buckets[partition_of(&key_at(row, key)?, count)].push(row);
	}
	Ok(buckets)
}

/// Waits for every worker, or returns at the first failure. The failing
/// worker has already raised the cancellation flag.
fn collect<O>(rx: Receiver<WorkerResult<O>>, buckets: usize) -> Result<Vec<O>> {
	let mut slots: Vec<Option<Vec<O>>> = (0..buckets).map(|_| None).collect();

	for (worker, result) in rx {
		match result {
			Ok(rows) => {
				trace!(worker, rows = rows.len(), "worker finished");
				slots[worker] = Some(rows);
			}
			Err(err) => {
				error!(worker, error = %err, "join worker failed");
				return Err(Error::WorkerFailure {
					worker,
					cause: Box::new(err),
				});
			}
		}
	}

	Ok(slots.into_iter().flatten().flatten().collect())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"worker panicked".to_string()
	}
}
