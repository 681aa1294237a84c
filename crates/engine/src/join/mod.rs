// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;
mod external;
mod grace;
mod hash;
mod parallel;
mod sort_merge;
mod strategy;

pub use common::{JoinAlgorithm, build_result, combine};
pub use external::{ExternalSortMergeJoin, ExternalSorter, MergedRuns};
pub use grace::{GraceHashJoin, GraceJoin, GraceSortMergeJoin};
pub use hash::HashJoin;
pub use parallel::ParallelHashJoin;
pub use sort_merge::SortMergeJoin;
pub use strategy::JoinStrategy;
