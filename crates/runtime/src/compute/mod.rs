// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Compute pool for CPU-bound join work, backed by rayon.

use std::sync::Arc;

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use reljoin_type::{Error, Result};
use tracing::debug;

/// A dedicated rayon [`ThreadPool`] with a fixed number of workers.
///
/// Cloning is cheap; clones share the same threads.
#[derive(Clone)]
pub struct ComputePool {
	inner: Arc<ThreadPool>,
	threads: usize,
}

impl ComputePool {
	/// Creates a new compute pool with `threads` worker threads.
	pub fn new(threads: usize) -> Result<Self> {
		if threads == 0 {
			return Err(Error::InvalidConfig("worker count must be positive".to_string()));
		}

		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|i| format!("join-worker-{i}"))
			.build()
			.map_err(|e| Error::WorkerPool(e.to_string()))?;

		debug!(threads, "compute pool started");

		Ok(Self {
			inner: Arc::new(pool),
			threads,
		})
	}

	pub fn threads(&self) -> usize {
		self.threads
	}

	/// Runs `op` on the calling thread with a scope whose spawned tasks
	/// execute on the pool and may borrow from the caller. Returns once every
	/// spawned task has finished.
	///
	/// `op` may block (for example on a channel fed by the spawned tasks)
	/// without occupying a pool thread.
	pub fn scope<'scope, R, F>(&self, op: F) -> R
	where
		F: FnOnce(&Scope<'scope>) -> R,
	{
		self.inner.in_place_scope(op)
	}
}
