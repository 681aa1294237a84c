// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Sample schemas and datasets.

use reljoin_type::{Dataset, Row, row, tuple};
use serde::{Deserialize, Serialize};

tuple! {
	#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
	pub struct User {
		pub id: i64,
		pub name: String,
	}
}

tuple! {
	#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
	pub struct Order {
		pub id: i64,
		pub value: f64,
	}
}

tuple! {
	#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
	pub struct UserOrder {
		pub id: i64,
		pub name: String,
		pub value: f64,
	}
}

impl User {
	pub fn new(id: i64, name: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
		}
	}
}

impl Order {
	pub fn new(id: i64, value: f64) -> Self {
		Self {
			id,
			value,
		}
	}
}

impl UserOrder {
	pub fn new(id: i64, name: &str, value: f64) -> Self {
		Self {
			id,
			name: name.to_string(),
			value,
		}
	}
}

/// Build side of the reference scenario, with a duplicated key.
pub fn users() -> Dataset<User> {
	Dataset::new(vec![User::new(1, "Alice"), User::new(2, "Bob"), User::new(2, "Bobby"), User::new(3, "Charlie")])
}

/// Probe side of the reference scenario, with a duplicated key.
pub fn orders() -> Dataset<Order> {
	Dataset::new(vec![Order::new(4, 100.0), Order::new(2, 200.0), Order::new(3, 300.0), Order::new(2, 250.0)])
}

/// Expected result of joining [`users`] with [`orders`] on their ids.
pub fn user_orders() -> Vec<UserOrder> {
	vec![
		UserOrder::new(2, "Bob", 200.0),
		UserOrder::new(2, "Bob", 250.0),
		UserOrder::new(2, "Bobby", 200.0),
		UserOrder::new(2, "Bobby", 250.0),
		UserOrder::new(3, "Charlie", 300.0),
	]
}

/// `rows` untyped rows `(key, label, seq)` with keys cycling through `0..keys`
/// in a scrambled but deterministic order.
pub fn keyed_rows(rows: usize, keys: usize, label: &str) -> Dataset<Row> {
	let keys = keys.max(1);
	(0..rows).map(|seq| row![((seq * 7919 + 13) % keys) as i64, format!("{label}-{seq}"), seq as u64]).collect()
}

/// Untyped rows whose key sits in the middle of the row, at index 1.
pub fn middle_keyed_rows(rows: usize, keys: usize) -> Dataset<Row> {
	let keys = keys.max(1);
	(0..rows).map(|seq| row![seq as f64 * 0.5, ((seq * 31) % keys) as i64, seq % 2 == 0]).collect()
}
