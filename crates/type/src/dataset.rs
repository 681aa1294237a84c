// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::slice;

use serde::{Deserialize, Serialize};

use crate::{
	error::{Error, Result},
	row::Tuple,
};

/// An ordered, immutable collection of rows sharing one schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset<T> {
	rows: Vec<T>,
}

impl<T> Dataset<T> {
	/// Wraps `rows` as they are.
	///
	/// Rows of one dataset are expected to share an arity, but `new`, `From`
	/// and `FromIterator` do not check it. Use [`Dataset::try_new`] for rows
	/// from an untrusted source.
	pub fn new(rows: Vec<T>) -> Self {
		Self {
			rows,
		}
	}

	pub fn empty() -> Self {
		Self {
			rows: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn iter(&self) -> slice::Iter<'_, T> {
		self.rows.iter()
	}

	pub fn rows(&self) -> &[T] {
		&self.rows
	}

	pub fn into_rows(self) -> Vec<T> {
		self.rows
	}
}

impl<T: Tuple> Dataset<T> {
	/// Like [`Dataset::new`], but rejects rows whose arity differs from the first row.
	pub fn try_new(rows: Vec<T>) -> Result<Self> {
		if let Some(first) = rows.first() {
			let expected = first.arity();
			for (row, value) in rows.iter().enumerate() {
				let actual = value.arity();
				if actual != expected {
					return Err(Error::RaggedDataset {
						row,
						expected,
						actual,
					});
				}
			}
		}
		Ok(Self::new(rows))
	}
}

impl<T> Default for Dataset<T> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<T> From<Vec<T>> for Dataset<T> {
	fn from(rows: Vec<T>) -> Self {
		Self::new(rows)
	}
}

impl<T> FromIterator<T> for Dataset<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<'a, T> IntoIterator for &'a Dataset<T> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.iter()
	}
}

impl<T> IntoIterator for Dataset<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.into_iter()
	}
}
