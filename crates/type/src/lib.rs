// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Row model shared by every join strategy.
//!
//! A join consumes two [`Dataset`]s whose rows implement [`Tuple`] and
//! produces a dataset of rows implementing [`FromTuple`]. Fields are
//! addressed by position and carried as [`Value`]s.

pub mod dataset;
pub mod error;
pub mod row;
pub mod value;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use row::{FromTuple, Row, Tuple, key_at};
pub use value::{FromValue, IntoValue, OrderedF64, Type, Value};
