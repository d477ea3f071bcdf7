// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder watcher for FunPress.
//!
//! Watches the operator-selected folder of photographs by polling it on a
//! fixed interval through a [`funpress_jobs::JobRegistry`] job, and
//! reconciles an in-memory image list against what is on disk. Changes
//! are emitted as [`WatchEvent`]s on an mpsc channel.

pub mod error;
pub mod scan;
pub mod watcher;

pub use error::{Result, WatchError};
pub use scan::{folder_exists, is_file_available, scan_images, ImageFile};
pub use watcher::{FolderWatcher, WatchEvent, POLL_INTERVAL, TRACK_FILES_JOB};
