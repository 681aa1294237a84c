// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{env, fs, path::Path};

use uuid::Uuid;

/// Runs `f` with a fresh, uniquely named directory that is removed afterwards.
pub fn temp_dir<F>(f: F) -> std::io::Result<()>
where
	F: FnOnce(&Path) -> std::io::Result<()>,
{
	let mut path = env::temp_dir();
	path.push(format!("reljoin-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

/// Files left in `path`, recursively, sorted.
pub fn remaining_files(path: &Path) -> std::io::Result<Vec<String>> {
	let mut files = Vec::new();
	if !path.exists() {
		return Ok(files);
	}
	for entry in fs::read_dir(path)? {
		let entry = entry?;
		let entry_path = entry.path();
		if entry_path.is_dir() {
			files.extend(remaining_files(&entry_path)?);
		} else {
			files.push(entry_path.display().to_string());
		}
	}
	files.sort();
	Ok(files)
}
