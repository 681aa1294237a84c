// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Temporary storage that fails on demand.

use std::{
	io::{self, Read, Write},
	sync::atomic::{AtomicUsize, Ordering},
};

use reljoin_spill::{MemoryStorage, StoreName, TempStorage};
use reljoin_type::{Error, Result};

/// A [`MemoryStorage`] with injected failures.
#[derive(Debug, Default)]
pub struct FailingStorage {
	inner: MemoryStorage,
	create_limit: Option<usize>,
	fail_writes: bool,
	fail_removes: bool,
	created: AtomicUsize,
}

impl FailingStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allow `limit` stores to be created, fail every creation after that.
	pub fn fail_create_after(mut self, limit: usize) -> Self {
		self.create_limit = Some(limit);
		self
	}

	/// Every writer fails when data reaches it.
	pub fn fail_writes(mut self) -> Self {
		self.fail_writes = true;
		self
	}

	/// Every removal fails and leaves the store in place.
	pub fn fail_removes(mut self) -> Self {
		self.fail_removes = true;
		self
	}

	/// The storage holding the stores, to observe what is left behind.
	pub fn inner(&self) -> &MemoryStorage {
		&self.inner
	}

	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}
}

struct BrokenWriter;

impl Write for BrokenWriter {
	fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
		Err(io::Error::other("injected write failure"))
	}

	fn flush(&mut self) -> io::Result<()> {
		Err(io::Error::other("injected flush failure"))
	}
}

impl TempStorage for FailingStorage {
	fn create(&self, prefix: &str) -> Result<StoreName> {
		let created = self.created.fetch_add(1, Ordering::SeqCst);
		if self.create_limit.is_some_and(|limit| created >= limit) {
			return Err(Error::resource("create", prefix, io::Error::other("injected create failure")));
		}
		self.inner.create(prefix)
	}

	fn writer(&self, name: &StoreName) -> Result<Box<dyn Write + Send>> {
		if self.fail_writes {
			return Ok(Box::new(BrokenWriter));
		}
		self.inner.writer(name)
	}

	fn reader(&self, name: &StoreName) -> Result<Box<dyn Read + Send>> {
		self.inner.reader(name)
	}

	fn remove(&self, name: &StoreName) -> Result<()> {
		if self.fail_removes {
			return Err(Error::resource("remove", name.as_str(), io::Error::other("injected remove failure")));
		}
		self.inner.remove(name)
	}

	fn list(&self) -> Result<Vec<StoreName>> {
		self.inner.list()
	}
}
