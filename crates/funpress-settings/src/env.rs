// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application environment: the well-known folders under the base
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{RESULTS_FOLDER_NAME, SETTINGS_FOLDER_NAME, TEMPLATES_FOLDER_NAME};

/// Resolves the application's on-disk layout.
#[derive(Debug, Clone)]
pub struct AppEnvironment {
	base: PathBuf,
}

impl AppEnvironment {
	/// Root the environment at an explicit base directory.
	pub fn new(base: impl Into<PathBuf>) -> Self {
		Self { base: base.into() }
	}

	/// Root the environment under the platform data directory
	/// (`~/.local/share/funpress` on Linux).
	pub fn from_user_data_dir() -> Self {
		let base = dirs::data_dir()
			.unwrap_or_else(std::env::temp_dir)
			.join("funpress");
		Self { base }
	}

	pub fn base_path(&self) -> &Path {
		&self.base
	}

	pub fn templates_path(&self) -> PathBuf {
		self.base.join(TEMPLATES_FOLDER_NAME)
	}

	pub fn results_path(&self) -> PathBuf {
		self.base.join(RESULTS_FOLDER_NAME)
	}

	pub fn settings_path(&self) -> PathBuf {
		self.base.join(SETTINGS_FOLDER_NAME)
	}

	/// Create the well-known folders if they are absent.
	pub fn ensure_dirs(&self) -> Result<()> {
		for dir in [
			self.templates_path(),
			self.results_path(),
			self.settings_path(),
		] {
			fs::create_dir_all(dir)?;
		}
		Ok(())
	}
}
