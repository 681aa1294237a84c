// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod fixture;
pub mod reference;
pub mod storage;
pub mod tempdir;

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}
