// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	io::{self, Cursor, ErrorKind, Read, Write},
	sync::Arc,
};

use parking_lot::Mutex;
use reljoin_type::{Error, Result};

use crate::storage::{StoreName, TempStorage};

type Buffer = Arc<Mutex<Vec<u8>>>;

/// Stores held in process memory.
///
/// Useful for partitioning without disk I/O and for observing which stores
/// a join leaves behind.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
	stores: Arc<Mutex<HashMap<StoreName, Buffer>>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total number of bytes across all live stores.
	pub fn bytes(&self) -> usize {
		self.stores.lock().values().map(|buffer| buffer.lock().len()).sum()
	}

	fn buffer(&self, name: &StoreName, operation: &'static str) -> Result<Buffer> {
		self.stores
			.lock()
			.get(name)
			.cloned()
			.ok_or_else(|| Error::resource(operation, name.as_str(), io::Error::from(ErrorKind::NotFound)))
	}
}

struct MemoryWriter {
	buffer: Buffer,
}

impl Write for MemoryWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.buffer.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl TempStorage for MemoryStorage {
	fn create(&self, prefix: &str) -> Result<StoreName> {
		let name = StoreName::unique(prefix);
		self.stores.lock().insert(name.clone(), Buffer::default());
		Ok(name)
	}

	fn writer(&self, name: &StoreName) -> Result<Box<dyn Write + Send>> {
		let buffer = self.buffer(name, "open for writing")?;
		Ok(Box::new(MemoryWriter {
			buffer,
		}))
	}

	fn reader(&self, name: &StoreName) -> Result<Box<dyn Read + Send>> {
		let bytes = self.buffer(name, "open for reading")?.lock().clone();
		Ok(Box::new(Cursor::new(bytes)))
	}

	fn remove(&self, name: &StoreName) -> Result<()> {
		match self.stores.lock().remove(name) {
			Some(_) => Ok(()),
			None => Err(Error::resource("remove", name.as_str(), io::Error::from(ErrorKind::NotFound))),
		}
	}

	fn list(&self) -> Result<Vec<StoreName>> {
		let mut names: Vec<_> = self.stores.lock().keys().cloned().collect();
		names.sort();
		Ok(names)
	}
}
