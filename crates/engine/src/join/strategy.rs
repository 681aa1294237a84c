// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
	sync::Arc,
};

use reljoin_spill::TempStorage;
use reljoin_type::{Error, FromTuple, Result, Tuple};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
	config::JoinConfig,
	join::{
		common::JoinAlgorithm,
		external::ExternalSortMergeJoin,
		grace::{GraceHashJoin, GraceSortMergeJoin},
		hash::HashJoin,
		parallel::ParallelHashJoin,
		sort_merge::SortMergeJoin,
	},
};

/// Runtime selection of a join strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinStrategy {
	Hash,
	SortMerge,
	GraceHash,
	GraceSortMerge,
	ExternalSortMerge,
	ParallelHash,
}

impl JoinStrategy {
	pub const ALL: [JoinStrategy; 6] = [
		JoinStrategy::Hash,
		JoinStrategy::SortMerge,
		JoinStrategy::GraceHash,
		JoinStrategy::GraceSortMerge,
		JoinStrategy::ExternalSortMerge,
		JoinStrategy::ParallelHash,
	];

	pub fn name(self) -> &'static str {
		match self {
			JoinStrategy::Hash => "Hash Join",
			JoinStrategy::SortMerge => "Sort Merge Join",
			JoinStrategy::GraceHash => "Grace Hash Join",
			JoinStrategy::GraceSortMerge => "Grace Sort-Merge Join",
			JoinStrategy::ExternalSortMerge => "External Sort-Merge Join",
			JoinStrategy::ParallelHash => "Parallel Hash Join",
		}
	}

	fn id(self) -> &'static str {
		match self {
			JoinStrategy::Hash => "hash",
			JoinStrategy::SortMerge => "sort-merge",
			JoinStrategy::GraceHash => "grace-hash",
			JoinStrategy::GraceSortMerge => "grace-sort-merge",
			JoinStrategy::ExternalSortMerge => "external-sort-merge",
			JoinStrategy::ParallelHash => "parallel-hash",
		}
	}

	/// Whether the strategy writes rows to temporary storage.
	pub fn spills(self) -> bool {
		matches!(self, JoinStrategy::GraceHash | JoinStrategy::GraceSortMerge | JoinStrategy::ExternalSortMerge)
	}

	/// Builds the strategy from `config`, spilling to a file storage rooted at
	/// the configured temporary directory.
	pub fn algorithm<L, R, O>(self, config: &JoinConfig) -> Result<Box<dyn JoinAlgorithm<L, R, O>>>
	where
		L: Tuple + Serialize + DeserializeOwned + Sync,
		R: Tuple + Serialize + DeserializeOwned + Sync,
		O: FromTuple + Send,
	{
		self.algorithm_with_storage(config, config.storage())
	}

	pub fn algorithm_with_storage<L, R, O>(
		self,
		config: &JoinConfig,
		storage: Arc<dyn TempStorage>,
	) -> Result<Box<dyn JoinAlgorithm<L, R, O>>>
	where
		L: Tuple + Serialize + DeserializeOwned + Sync,
		R: Tuple + Serialize + DeserializeOwned + Sync,
		O: FromTuple + Send,
	{
		config.validate()?;
		let algorithm: Box<dyn JoinAlgorithm<L, R, O>> = match self {
			JoinStrategy::Hash => Box::new(HashJoin),
			JoinStrategy::SortMerge => Box::new(SortMergeJoin),
			JoinStrategy::GraceHash => Box::new(GraceHashJoin::with_storage(config, storage)?),
			JoinStrategy::GraceSortMerge => Box::new(GraceSortMergeJoin::with_storage(config, storage)?),
			JoinStrategy::ExternalSortMerge => Box::new(ExternalSortMergeJoin::with_storage(config, storage)?),
			JoinStrategy::ParallelHash => Box::new(ParallelHashJoin::new(config)?),
		};
		Ok(algorithm)
	}
}

impl Display for JoinStrategy {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for JoinStrategy {
	type Err = Error;

	/// Accepts the kebab-case id (`grace-hash`) or the display name
	/// (`Grace Hash Join`), case-insensitively.
	fn from_str(s: &str) -> Result<Self> {
		let s = s.trim();
		JoinStrategy::ALL
			.into_iter()
			.find(|strategy| strategy.id().eq_ignore_ascii_case(s) || strategy.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::InvalidConfig(format!("unknown join strategy '{s}'")))
	}
}
