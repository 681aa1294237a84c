// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Temporary row storage for joins that do not fit in memory.
//!
//! This crate provides:
//! - [`TempStorage`], the capability to create, write, read and delete named
//!   transient stores, with a file-backed and an in-memory implementation
//! - [`SpillWriter`] / [`SpillReader`], a length-prefixed postcard encoding of
//!   rows on top of any store
//! - [`SpillScope`], which owns every store created during one join and
//!   removes them on every exit path

mod codec;
mod file;
mod memory;
mod scope;
mod storage;

pub use codec::{SpillReader, SpillWriter};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use scope::SpillScope;
pub use storage::{StoreName, TempStorage};
