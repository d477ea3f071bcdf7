// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for folder watching.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur while scanning or watching a folder.
#[derive(Debug, Error)]
pub enum WatchError {
	#[error("folder not found: {0}")]
	FolderNotFound(PathBuf),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
