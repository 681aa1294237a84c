// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Row framing on top of a store.
//!
//! Every row is one frame: a little-endian `u32` byte length followed by
//! the postcard encoding of the row.

use std::{
	io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
	marker::PhantomData,
};

use reljoin_type::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

use crate::storage::StoreName;

const HEADER_LEN: usize = 4;

pub struct SpillWriter<T> {
	name: StoreName,
	out: BufWriter<Box<dyn Write + Send>>,
	rows: usize,
	_row: PhantomData<fn(&T)>,
}

impl<T: Serialize> SpillWriter<T> {
	pub fn new(name: StoreName, out: Box<dyn Write + Send>) -> Self {
		Self {
			name,
			out: BufWriter::new(out),
			rows: 0,
			_row: PhantomData,
		}
	}

	pub fn name(&self) -> &StoreName {
		&self.name
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn push(&mut self, row: &T) -> Result<()> {
		let bytes = postcard::to_stdvec(row).map_err(|source| Error::Codec {
			store: self.name.to_string(),
			source,
		})?;

		let len = u32::try_from(bytes.len()).map_err(|_| {
			Error::resource(
				"write",
				self.name.as_str(),
				io::Error::new(ErrorKind::InvalidInput, "row exceeds the maximum frame size"),
			)
		})?;

		self.out.write_all(&len.to_le_bytes()).map_err(|e| Error::resource("write", self.name.as_str(), e))?;
		self.out.write_all(&bytes).map_err(|e| Error::resource("write", self.name.as_str(), e))?;
		self.rows += 1;
		Ok(())
	}

	/// Flushes buffered frames and closes the handle, returning the row count.
	pub fn finish(mut self) -> Result<usize> {
		self.out.flush().map_err(|e| Error::resource("flush", self.name.as_str(), e))?;
		Ok(self.rows)
	}
}

/// Forward-only iterator over the rows of a store.
///
/// Yields `Err` at most once; iteration stops after the first failure.
pub struct SpillReader<T> {
	name: StoreName,
	input: BufReader<Box<dyn Read + Send>>,
	buffer: Vec<u8>,
	done: bool,
	_row: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> SpillReader<T> {
	pub fn new(name: StoreName, input: Box<dyn Read + Send>) -> Self {
		Self {
			name,
			input: BufReader::new(input),
			buffer: Vec::new(),
			done: false,
			_row: PhantomData,
		}
	}

	pub fn name(&self) -> &StoreName {
		&self.name
	}

	fn truncated(&self) -> Error {
		Error::Codec {
			store: self.name.to_string(),
			source: postcard::Error::DeserializeUnexpectedEnd,
		}
	}

	fn read_header(&mut self) -> Result<Option<usize>> {
		let mut header = [0u8; HEADER_LEN];
		let mut filled = 0;
		while filled < HEADER_LEN {
			match self.input.read(&mut header[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(Error::resource("read", self.name.as_str(), e)),
			}
		}

		match filled {
			0 => Ok(None),
			HEADER_LEN => Ok(Some(u32::from_le_bytes(header) as usize)),
			_ => Err(self.truncated()),
		}
	}

	fn read_frame(&mut self) -> Result<Option<T>> {
		let Some(len) = self.read_header()? else {
			return Ok(None);
		};

		self.buffer.resize(len, 0);
		if let Err(e) = self.input.read_exact(&mut self.buffer) {
			return Err(match e.kind() {
				ErrorKind::UnexpectedEof => self.truncated(),
				_ => Error::resource("read", self.name.as_str(), e),
			});
		}

		postcard::from_bytes(&self.buffer).map(Some).map_err(|source| Error::Codec {
			store: self.name.to_string(),
			source,
		})
	}
}

impl<T: DeserializeOwned> Iterator for SpillReader<T> {
	type Item = Result<T>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		match self.read_frame() {
			Ok(Some(row)) => Some(Ok(row)),
			Ok(None) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}
