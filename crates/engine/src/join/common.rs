// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reljoin_type::{Dataset, Error, FromTuple, Result, Tuple, Value};

/// An inner equi-join strategy.
///
/// `left` is the build side and `right` the probe side. The result holds one
/// row per pair whose key at `build_key` equals the key at `probe_key`, made
/// of every left field followed by every right field except the probe key.
pub trait JoinAlgorithm<L, R, O> {
	fn name(&self) -> &'static str;

	fn join(&self, left: &Dataset<L>, right: &Dataset<R>, build_key: usize, probe_key: usize) -> Result<Dataset<O>>;
}

/// Left fields followed by the right fields, without the probe key.
pub fn combine<L, R>(left: &L, right: &R, probe_key: usize) -> Vec<Value>
where
	L: Tuple + ?Sized,
	R: Tuple + ?Sized,
{
	let mut values = left.values();
	values.reserve(right.arity().saturating_sub(1));
	values.extend(right.values().into_iter().enumerate().filter(|(idx, _)| *idx != probe_key).map(|(_, v)| v));
	values
}

/// Constructs a result row, failing when the combined fields do not match
/// the arity `O` declares.
pub fn build_result<O: FromTuple>(values: Vec<Value>) -> Result<O> {
	if let Some(expected) = O::ARITY {
		if values.len() != expected {
			return Err(Error::ResultArityMismatch {
				expected,
				actual: values.len(),
			});
		}
	}
	O::from_values(values)
}
