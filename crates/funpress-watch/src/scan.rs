// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory scanning for printable photographs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::Result;

/// File extensions recognised as photographs, compared case-insensitively.
const VALID_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A photograph discovered in the watched folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
	pub name: String,
	pub path: PathBuf,
}

impl ImageFile {
	fn from_path(path: PathBuf) -> Self {
		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		Self { name, path }
	}
}

/// Whether `path` exists and is a directory.
pub fn folder_exists(path: &Path) -> bool {
	if path.as_os_str().is_empty() {
		return false;
	}
	path.is_dir()
}

/// Whether the file can be opened for exclusive read-write access.
///
/// A photograph still being flushed by a camera import is typically held
/// open by the writer; such files report unavailable and get picked up on
/// a later poll once the writer lets go. On Windows the open demands
/// exclusive sharing so a file with any open handle is rejected. Unix has
/// no mandatory sharing, so there the check only catches files the
/// process cannot open at all.
pub fn is_file_available(path: &Path) -> bool {
	if path.as_os_str().is_empty() {
		debug!("file path is empty");
		return false;
	}

	match open_exclusive(path) {
		Ok(_) => true,
		Err(err) => {
			debug!(path = %path.display(), error = %err, "file is not available");
			false
		}
	}
}

fn open_exclusive(path: &Path) -> std::io::Result<fs::File> {
	let mut options = OpenOptions::new();
	options.read(true).write(true);

	#[cfg(windows)]
	{
		use std::os::windows::fs::OpenOptionsExt;
		// Deny sharing entirely; the default shares read, write and delete.
		options.share_mode(0);
	}

	options.open(path)
}

/// Recursively collect image files under `dir`, ordered by last-modified
/// time with the oldest first.
pub fn scan_images(dir: &Path) -> Result<Vec<ImageFile>> {
	let mut found: Vec<(PathBuf, SystemTime)> = Vec::new();
	collect_images(dir, &mut found)?;
	found.sort_by_key(|(_, modified)| *modified);

	Ok(found
		.into_iter()
		.map(|(path, _)| ImageFile::from_path(path))
		.collect())
}

fn collect_images(dir: &Path, found: &mut Vec<(PathBuf, SystemTime)>) -> Result<()> {
	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_dir() {
			collect_images(&path, found)?;
		} else if has_image_extension(&path) {
			let modified = entry
				.metadata()
				.and_then(|meta| meta.modified())
				.unwrap_or(SystemTime::UNIX_EPOCH);
			found.push((path, modified));
		}
	}

	Ok(())
}

fn has_image_extension(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| VALID_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
		.unwrap_or(false)
}
