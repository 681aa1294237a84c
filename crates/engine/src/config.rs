// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Configuration consumed by the join strategies.

use std::{env, path::PathBuf, sync::Arc};

use reljoin_spill::{FileStorage, TempStorage};
use reljoin_type::{Error, Result};

pub const DEFAULT_MEMORY_LIMIT: usize = 10;
pub const DEFAULT_PARTITIONS: usize = 5;

/// One worker fewer than the available cores, but at least one.
pub fn default_workers() -> usize {
	num_cpus::get().saturating_sub(1).max(1)
}

/// Configuration for the join strategies.
#[derive(Debug, Clone)]
pub struct JoinConfig {
	/// Rows held in memory per sorted run by the external sort-merge join.
	pub memory_limit: usize,
	/// Buckets per input for the grace joins.
	pub partitions: usize,
	/// Worker threads for the parallel hash join.
	pub workers: usize,
	/// Directory holding temporary stores of the file-backed storage.
	pub temp_dir: PathBuf,
}

impl Default for JoinConfig {
	fn default() -> Self {
		Self {
			memory_limit: DEFAULT_MEMORY_LIMIT,
			partitions: DEFAULT_PARTITIONS,
			workers: default_workers(),
			temp_dir: env::temp_dir().join("reljoin"),
		}
	}
}

impl JoinConfig {
	pub fn builder() -> JoinConfigBuilder {
		JoinConfigBuilder::new()
	}

	pub fn validate(&self) -> Result<()> {
		if self.memory_limit == 0 {
			return Err(Error::InvalidConfig("memory limit must be at least one row".to_string()));
		}
		if self.partitions == 0 {
			return Err(Error::InvalidConfig("partition count must be positive".to_string()));
		}
		if self.workers == 0 {
			return Err(Error::InvalidConfig("worker count must be positive".to_string()));
		}
		Ok(())
	}

	/// File-backed temporary storage rooted at [`JoinConfig::temp_dir`].
	pub fn storage(&self) -> Arc<dyn TempStorage> {
		Arc::new(FileStorage::new(self.temp_dir.clone()))
	}
}

/// Builder for [`JoinConfig`]; unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct JoinConfigBuilder {
	memory_limit: Option<usize>,
	partitions: Option<usize>,
	workers: Option<usize>,
	temp_dir: Option<PathBuf>,
}

impl JoinConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the number of rows buffered per sorted run.
	pub fn memory_limit(mut self, rows: usize) -> Self {
		self.memory_limit = Some(rows);
		self
	}

	/// Set the number of grace partitions per input.
	pub fn partitions(mut self, count: usize) -> Self {
		self.partitions = Some(count);
		self
	}

	/// Set the number of parallel hash join workers.
	pub fn workers(mut self, count: usize) -> Self {
		self.workers = Some(count);
		self
	}

	/// Set the directory for file-backed temporary stores.
	pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
		self.temp_dir = Some(path.into());
		self
	}

	pub fn build(self) -> Result<JoinConfig> {
		let defaults = JoinConfig::default();
		let config = JoinConfig {
			memory_limit: self.memory_limit.unwrap_or(defaults.memory_limit),
			partitions: self.partitions.unwrap_or(defaults.partitions),
			workers: self.workers.unwrap_or(defaults.workers),
			temp_dir: self.temp_dir.unwrap_or(defaults.temp_dir),
		};
		config.validate()?;
		Ok(config)
	}
}
