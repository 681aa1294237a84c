// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::{self, File, OpenOptions},
	io::{ErrorKind, Read, Write},
	path::{Path, PathBuf},
};

use reljoin_type::{Error, Result};
use tracing::trace;

use crate::storage::{StoreName, TempStorage};

const EXTENSION: &str = "spill";

/// One `.spill` file per store under a root directory.
///
/// The directory is created on first use and left in place; only the
/// files this storage creates are ever removed.
#[derive(Debug, Clone)]
pub struct FileStorage {
	root: PathBuf,
}

impl FileStorage {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	fn path(&self, name: &StoreName) -> PathBuf {
		self.root.join(format!("{name}.{EXTENSION}"))
	}
}

impl TempStorage for FileStorage {
	fn create(&self, prefix: &str) -> Result<StoreName> {
		fs::create_dir_all(&self.root)
			.map_err(|e| Error::resource("create", self.root.display().to_string(), e))?;

		let name = StoreName::unique(prefix);
		let path = self.path(&name);
		File::create_new(&path).map_err(|e| Error::resource("create", name.as_str(), e))?;

		trace!(path = %path.display(), "created spill file");
		Ok(name)
	}

	fn writer(&self, name: &StoreName) -> Result<Box<dyn Write + Send>> {
		let file = OpenOptions::new()
			.append(true)
			.open(self.path(name))
			.map_err(|e| Error::resource("open for writing", name.as_str(), e))?;
		Ok(Box::new(file))
	}

	fn reader(&self, name: &StoreName) -> Result<Box<dyn Read + Send>> {
		let file = File::open(self.path(name)).map_err(|e| Error::resource("open for reading", name.as_str(), e))?;
		Ok(Box::new(file))
	}

	fn remove(&self, name: &StoreName) -> Result<()> {
		fs::remove_file(self.path(name)).map_err(|e| Error::resource("remove", name.as_str(), e))?;
		trace!(store = %name, "removed spill file");
		Ok(())
	}

	fn list(&self) -> Result<Vec<StoreName>> {
		let entries = match fs::read_dir(&self.root) {
			Ok(entries) => entries,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
			Err(e) => return Err(Error::resource("list", self.root.display().to_string(), e)),
		};

		let mut names = Vec::new();
		for entry in entries {
			let path = entry.map_err(|e| Error::resource("list", self.root.display().to_string(), e))?.path();
			if path.extension().is_some_and(|ext| ext == EXTENSION) {
				if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
					names.push(StoreName::from(stem.to_string()));
				}
			}
		}
		names.sort();
		Ok(names)
	}
}
