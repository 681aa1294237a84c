// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Classical relational equi-joins.
//!
//! ```
//! use reljoin::{Dataset, HashJoin, JoinAlgorithm, Row, row};
//!
//! let users = Dataset::new(vec![row![1i64, "Alice"], row![2i64, "Bob"]]);
//! let orders = Dataset::new(vec![row![2i64, 200.0]]);
//!
//! let result: Dataset<Row> = HashJoin.join(&users, &orders, 0, 0).unwrap();
//! assert_eq!(result.rows(), &[row![2i64, "Bob", 200.0]]);
//! ```

pub use reljoin_engine as engine;
pub use reljoin_engine::{
	ExternalSortMergeJoin, ExternalSorter, GraceHashJoin, GraceJoin, GraceSortMergeJoin, HashJoin, JoinAlgorithm,
	JoinConfig, JoinConfigBuilder, JoinStrategy, MergedRuns, ParallelHashJoin, SortMergeJoin,
};
pub use reljoin_runtime as runtime;
pub use reljoin_spill as spill;
pub use reljoin_spill::{FileStorage, MemoryStorage, SpillScope, StoreName, TempStorage};
pub use reljoin_type as r#type;
pub use reljoin_type::{
	Dataset, Error, FromTuple, FromValue, IntoValue, OrderedF64, Result, Row, Tuple, Type, Value, key_at, row, tuple,
};
