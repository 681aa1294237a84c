// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reljoin_type::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{trace, warn};

use crate::{
	codec::{SpillReader, SpillWriter},
	storage::{StoreName, TempStorage},
};

/// Owns every store created through it for the duration of one join.
///
/// [`SpillScope::release`] removes them all. A scope dropped without being
/// released releases itself, so stores are removed on early returns and
/// panics as well.
pub struct SpillScope {
	storage: Arc<dyn TempStorage>,
	stores: Vec<StoreName>,
	label: &'static str,
}

impl SpillScope {
	pub fn new(storage: Arc<dyn TempStorage>, label: &'static str) -> Self {
		Self {
			storage,
			stores: Vec::new(),
			label,
		}
	}

	/// Creates a store owned by this scope and opens it for writing.
	pub fn create<T: Serialize>(&mut self, prefix: &str) -> Result<SpillWriter<T>> {
		let name = self.storage.create(prefix)?;
		self.stores.push(name.clone());
		let out = self.storage.writer(&name)?;
		Ok(SpillWriter::new(name, out))
	}

	pub fn reader<T: DeserializeOwned>(&self, name: &StoreName) -> Result<SpillReader<T>> {
		let input = self.storage.reader(name)?;
		Ok(SpillReader::new(name.clone(), input))
	}

	pub fn stores(&self) -> &[StoreName] {
		&self.stores
	}

	/// Removes every owned store, continuing past failures.
	///
	/// Each failure is logged as a warning and returned.
	pub fn release(&mut self) -> Vec<Error> {
		let mut failures = Vec::new();
		let count = self.stores.len();

		for name in self.stores.drain(..) {
			if let Err(err) = self.storage.remove(&name) {
				warn!(scope = self.label, store = %name, error = %err, "failed to remove temporary store");
				failures.push(err);
			}
		}

		trace!(scope = self.label, removed = count - failures.len(), failed = failures.len(), "released stores");
		failures
	}
}

impl Drop for SpillScope {
	fn drop(&mut self) {
		if !self.stores.is_empty() {
			self.release();
		}
	}
}
