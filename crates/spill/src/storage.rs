// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	io::{Read, Write},
};

use reljoin_type::Result;
use uuid::Uuid;

/// Name of a transient store, unique per created store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreName(String);

impl StoreName {
	/// A fresh name of the form `{prefix}-{uuid}`.
	pub fn unique(prefix: &str) -> Self {
		StoreName(format!("{prefix}-{}", Uuid::new_v4()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for StoreName {
	fn from(name: String) -> Self {
		StoreName(name)
	}
}

impl Display for StoreName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Create, write, read and delete named transient stores of bytes.
///
/// Implementations must be safe to share between concurrent joins; names
/// returned by [`TempStorage::create`] never collide.
pub trait TempStorage: Send + Sync {
	fn create(&self, prefix: &str) -> Result<StoreName>;

	/// Opens the store for appending.
	fn writer(&self, name: &StoreName) -> Result<Box<dyn Write + Send>>;

	/// Opens the store for reading from the start.
	fn reader(&self, name: &StoreName) -> Result<Box<dyn Read + Send>>;

	fn remove(&self, name: &StoreName) -> Result<()>;

	/// Every store currently present.
	fn list(&self) -> Result<Vec<StoreName>>;
}
