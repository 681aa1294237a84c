// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::io;

use crate::value::Type;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("key index {index} is out of range for a row with {arity} fields")]
	IndexOutOfRange {
		index: usize,
		arity: usize,
	},

	#[error("result schema expects {expected} fields but the combined row has {actual}")]
	ResultArityMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("result field {index} expects {expected}, found {found}")]
	FieldTypeMismatch {
		index: usize,
		expected: &'static str,
		found: Type,
	},

	#[error("row {row} has {actual} fields, dataset rows have {expected}")]
	RaggedDataset {
		row: usize,
		expected: usize,
		actual: usize,
	},

	#[error("worker {worker} failed: {cause}")]
	WorkerFailure {
		worker: usize,
		#[source]
		cause: Box<Error>,
	},

	#[error("worker panicked: {message}")]
	WorkerPanicked {
		message: String,
	},

	#[error("temporary storage failed to {operation} `{store}`: {source}")]
	Resource {
		operation: &'static str,
		store: String,
		#[source]
		source: io::Error,
	},

	#[error("failed to encode or decode a row in `{store}`: {source}")]
	Codec {
		store: String,
		#[source]
		source: postcard::Error,
	},

	#[error("invalid join configuration: {0}")]
	InvalidConfig(String),

	#[error("failed to start worker pool: {0}")]
	WorkerPool(String),
}

impl Error {
	pub fn resource(operation: &'static str, store: impl Into<String>, source: io::Error) -> Self {
		Error::Resource {
			operation,
			store: store.into(),
			source,
		}
	}

	/// The error a worker originally raised, looking through `WorkerFailure`.
	pub fn root_cause(&self) -> &Error {
		match self {
			Error::WorkerFailure {
				cause,
				..
			} => cause.root_cause(),
			other => other,
		}
	}
}
