// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reljoin_runtime::partition_of;
use reljoin_spill::{SpillScope, StoreName, TempStorage};
use reljoin_type::{Dataset, Error, FromTuple, Result, Tuple, key_at};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use crate::{
	config::JoinConfig,
	join::{common::JoinAlgorithm, hash::HashJoin, sort_merge::SortMergeJoin},
};

/// Grace partitioning with bucket pairs joined by [`HashJoin`].
pub type GraceHashJoin = GraceJoin<HashJoin>;

/// Grace partitioning with bucket pairs joined by [`SortMergeJoin`].
pub type GraceSortMergeJoin = GraceJoin<SortMergeJoin>;

/// Partitions both inputs into temporary stores by a hash of the key, then
/// joins one bucket pair at a time with the inner strategy `J`.
///
/// Rows can only match within the same bucket, so peak memory is bounded by
/// the largest bucket pair. Output is grouped by bucket, in bucket order.
pub struct GraceJoin<J> {
	inner: J,
	partitions: usize,
	storage: Arc<dyn TempStorage>,
	name: &'static str,
}

impl GraceHashJoin {
	pub fn new(config: &JoinConfig) -> Result<Self> {
		Self::with_storage(config, config.storage())
	}

	pub fn with_storage(config: &JoinConfig, storage: Arc<dyn TempStorage>) -> Result<Self> {
		Self::build(HashJoin, config, storage, "Grace Hash Join")
	}
}

impl GraceSortMergeJoin {
	pub fn new(config: &JoinConfig) -> Result<Self> {
		Self::with_storage(config, config.storage())
	}

	pub fn with_storage(config: &JoinConfig, storage: Arc<dyn TempStorage>) -> Result<Self> {
		Self::build(SortMergeJoin, config, storage, "Grace Sort-Merge Join")
	}
}

impl<J> GraceJoin<J> {
	fn build(inner: J, config: &JoinConfig, storage: Arc<dyn TempStorage>, name: &'static str) -> Result<Self> {
		if config.partitions == 0 {
			return Err(Error::InvalidConfig("partition count must be positive".to_string()));
		}
		Ok(Self {
			inner,
			partitions: config.partitions,
			storage,
			name,
		})
	}

	pub fn partitions(&self) -> usize {
		self.partitions
	}

	fn run<L, R, O>(
		&self,
		scope: &mut SpillScope,
		left: &Dataset<L>,
		right: &Dataset<R>,
		build_key: usize,
		probe_key: usize,
	) -> Result<Vec<O>>
	where
		L: Tuple + Serialize + DeserializeOwned,
		R: Tuple + Serialize + DeserializeOwned,
		J: JoinAlgorithm<L, R, O>,
	{
		let build = partition(scope, left, build_key, self.partitions, "grace-build")?;
		let probe = partition(scope, right, probe_key, self.partitions, "grace-probe")?;

		let mut result = Vec::new();
		for (bucket, (build, probe)) in build.iter().zip(&probe).enumerate() {
			let build: Dataset<L> = scope.reader(build)?.collect::<Result<_>>()?;
			let probe: Dataset<R> = scope.reader(probe)?.collect::<Result<_>>()?;
			trace!(bucket, build = build.len(), probe = probe.len(), "joining bucket");

			result.extend(self.inner.join(&build, &probe, build_key, probe_key)?);
		}
		Ok(result)
	}
}

impl<L, R, O, J> JoinAlgorithm<L, R, O> for GraceJoin<J>
where
	L: Tuple + Serialize + DeserializeOwned,
	R: Tuple + Serialize + DeserializeOwned,
	O: FromTuple,
	J: JoinAlgorithm<L, R, O>,
{
	fn name(&self) -> &'static str {
		self.name
	}

	#[instrument(name = "join::grace", level = "debug", skip_all, fields(
		strategy = self.name,
		partitions = self.partitions,
		left = left.len(),
		right = right.len(),
	))]
	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>> {
		let mut scope = SpillScope::new(self.storage.clone(), self.name);
		let result = self.run(&mut scope, left, right, build_key, probe_key);

		let failures = scope.release();
		if !failures.is_empty() {
			warn!(failed = failures.len(), "partitions could not be removed");
		}

		result.map(Dataset::new)
	}
}

/// Writes every row into the store of its bucket; one store per bucket.
fn partition<T>(
	scope: &mut SpillScope,
	rows: &Dataset<T>,
	key: usize,
	partitions: usize,
	prefix: &str,
) -> Result<Vec<StoreName>>
where
	T: Tuple + Serialize,
{
	let mut writers =
		(0..partitions).map(|bucket| scope.create::<T>(&format!("{prefix}-{bucket}"))).collect::<Result<Vec<_>>>()?;

	for row in rows {
		let bucket = partition_of(&key_at(row, key)?, partitions);
		writers[bucket].push(row)?;
	}

	let mut stores = Vec::with_capacity(partitions);
	for writer in writers {
		let name = writer.name().clone();
		let rows = writer.finish()?;
		trace!(store = %name, rows, "partition written");
		stores.push(name);
	}

	debug!(prefix, rows = rows.len(), partitions, "input partitioned");
	Ok(stores)
}
