// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Inner equi-join strategies over [`Dataset`](reljoin_type::Dataset)s.
//!
//! Every strategy implements [`JoinAlgorithm`]. [`HashJoin`] and
//! [`SortMergeJoin`] work fully in memory; the grace joins and
//! [`ExternalSortMergeJoin`] bound memory by spilling rows to temporary
//! storage; [`ParallelHashJoin`] divides the work across a thread pool.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod config;
pub mod join;

pub use config::{JoinConfig, JoinConfigBuilder};
pub use join::{
	ExternalSortMergeJoin, ExternalSorter, GraceHashJoin, GraceJoin, GraceSortMergeJoin, HashJoin, JoinAlgorithm,
	JoinStrategy, MergedRuns, ParallelHashJoin, SortMergeJoin, build_result, combine,
};
