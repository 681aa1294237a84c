// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod merge;
mod sort;

use std::sync::Arc;

pub use merge::MergedRuns;
pub use sort::ExternalSorter;

use reljoin_spill::{SpillScope, TempStorage};
use reljoin_type::{Dataset, FromTuple, Result, Tuple};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

use crate::{
	config::JoinConfig,
	join::{common::JoinAlgorithm, sort_merge::merge_join},
};

/// Sort-merge join for inputs larger than memory.
///
/// Each input is cut into sorted runs of at most `memory_limit` rows held in
/// temporary storage. The merged runs of both sides are streamed through the
/// merge join, so only one row per run and the current key group are kept in
/// memory. Output is ordered by key.
pub struct ExternalSortMergeJoin {
	sorter: ExternalSorter,
	storage: Arc<dyn TempStorage>,
}

impl ExternalSortMergeJoin {
	pub fn new(config: &JoinConfig) -> Result<Self> {
		Self::with_storage(config, config.storage())
	}

	pub fn with_storage(config: &JoinConfig, storage: Arc<dyn TempStorage>) -> Result<Self> {
		Ok(Self {
			sorter: ExternalSorter::new(config.memory_limit)?,
			storage,
		})
	}

	pub fn sorter(&self) -> &ExternalSorter {
		&self.sorter
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
		O: FromTuple,
	{
		let build = self.sorter.sort(scope, left, build_key, "external-build")?;
		let probe = self.sorter.sort(scope, right, probe_key, "external-probe")?;
		merge_join(build, probe, probe_key)
	}
}

impl<L, R, O> JoinAlgorithm<L, R, O> for ExternalSortMergeJoin
where
	L: Tuple + Serialize + DeserializeOwned,
	R: Tuple + Serialize + DeserializeOwned,
	O: FromTuple,
{
	fn name(&self) -> &'static str {
		"External Sort-Merge Join"
	}

	#[instrument(name = "join::external_sort_merge", level = "debug", skip_all, fields(
		memory_limit = self.sorter.memory_limit(),
		left = left.len(),
		right = right.len(),
	))]
	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>> {
		let mut scope = SpillScope::new(self.storage.clone(), "external-sort-merge");
		let result = self.run(&mut scope, left, right, build_key, probe_key);

		let failures = scope.release();
		if !failures.is_empty() {
			warn!(failed = failures.len(), "sorted runs could not be removed");
		}

		result.map(Dataset::new)
	}
}
