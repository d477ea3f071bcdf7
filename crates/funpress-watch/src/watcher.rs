// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folder watcher: polls the selected folder and reconciles the image list.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use funpress_jobs::{CancellationToken, JobError, JobRegistry};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::error::{Result, WatchError};
use crate::scan::{folder_exists, scan_images, ImageFile};

/// Registry key of the folder-tracking job.
pub const TRACK_FILES_JOB: &str = "track-new-files";

/// How often the watched folder is rescanned.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Change notification emitted as the watched folder is reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
	Added(ImageFile),
	Removed(ImageFile),
}

struct WatchState {
	folder: Option<PathBuf>,
	images: Vec<ImageFile>,
}

/// Watches one folder of photographs at a time.
///
/// Selecting a folder registers a recurring scan job under
/// [`TRACK_FILES_JOB`] in the shared [`JobRegistry`]; re-selecting
/// finishes the previous job first, so at most one watch is live. Every
/// list change is emitted as a [`WatchEvent`] on the channel handed to
/// [`FolderWatcher::new`].
pub struct FolderWatcher {
	registry: Arc<JobRegistry>,
	state: Arc<Mutex<WatchState>>,
	events: UnboundedSender<WatchEvent>,
	poll_interval: Duration,
}

impl FolderWatcher {
	/// Watch with the default [`POLL_INTERVAL`].
	pub fn new(registry: Arc<JobRegistry>, events: UnboundedSender<WatchEvent>) -> Self {
		Self::with_poll_interval(registry, events, POLL_INTERVAL)
	}

	/// Watch with a custom rescan interval.
	pub fn with_poll_interval(
		registry: Arc<JobRegistry>,
		events: UnboundedSender<WatchEvent>,
		poll_interval: Duration,
	) -> Self {
		Self {
			registry,
			state: Arc::new(Mutex::new(WatchState {
				folder: None,
				images: Vec::new(),
			})),
			events,
			poll_interval,
		}
	}

	/// Select `path` as the watched folder.
	///
	/// Any previous watch job is finished and the image list cleared. The
	/// folder is scanned once up front (each hit emits
	/// [`WatchEvent::Added`]), then the poll job is started with one
	/// interval's grace before its first rescan. Returns the initial
	/// image list, ordered oldest first.
	pub fn select_folder(&self, path: &Path) -> Result<Vec<ImageFile>> {
		if !folder_exists(path) {
			return Err(WatchError::FolderNotFound(path.to_path_buf()));
		}

		if self.registry.is_job_exist(TRACK_FILES_JOB) {
			self.registry.finish_job(TRACK_FILES_JOB);
		}

		{
			let mut state = lock_state(&self.state);
			state.folder = Some(path.to_path_buf());
			state.images.clear();
		}

		let state = Arc::clone(&self.state);
		let events = self.events.clone();
		self.registry
			.create_job(TRACK_FILES_JOB, self.poll_interval, move |token| {
				let state = Arc::clone(&state);
				let events = events.clone();
				async move { check_new_images(&token, &state, &events) }
			});

		let images = scan_images(path)?;
		{
			let mut state = lock_state(&self.state);
			for image in &images {
				let _ = self.events.send(WatchEvent::Added(image.clone()));
			}
			state.images = images.clone();
		}

		self.registry.start_job(TRACK_FILES_JOB, false);

		info!(folder = %path.display(), images = images.len(), "folder selected");
		Ok(images)
	}

	/// The currently watched folder, if any.
	pub fn folder(&self) -> Option<PathBuf> {
		lock_state(&self.state).folder.clone()
	}

	/// Snapshot of the reconciled image list.
	pub fn images(&self) -> Vec<ImageFile> {
		lock_state(&self.state).images.clone()
	}

	/// Stop watching. Returns true when a watch job existed and was
	/// finished.
	pub fn stop(&self) -> bool {
		self.registry.finish_job(TRACK_FILES_JOB)
	}
}

/// One poll tick: rescan the folder and reconcile the image list.
///
/// Additions are matched by file name, removals by path, mirroring how
/// the operator-facing list treats renames as a remove plus an add. A
/// scan failure surfaces as a work error and terminates the poll loop;
/// the job entry stays registered until the watcher is re-selected.
fn check_new_images(
	token: &CancellationToken,
	state: &Mutex<WatchState>,
	events: &UnboundedSender<WatchEvent>,
) -> funpress_jobs::Result<()> {
	if token.is_cancelled() {
		return Ok(());
	}

	let folder = match lock_state(state).folder.clone() {
		Some(folder) => folder,
		None => return Ok(()),
	};

	let on_disk = scan_images(&folder).map_err(|err| JobError::Failed(err.to_string()))?;

	let mut state = lock_state(state);
	if on_disk.len() > state.images.len() {
		for image in on_disk {
			if state.images.iter().any(|existing| existing.name == image.name) {
				continue;
			}

			debug!(image = %image.path.display(), "new image discovered");
			let _ = events.send(WatchEvent::Added(image.clone()));
			state.images.push(image);
		}
	} else if on_disk.len() < state.images.len() {
		let removed: Vec<ImageFile> = state
			.images
			.iter()
			.filter(|existing| on_disk.iter().all(|image| image.path != existing.path))
			.cloned()
			.collect();

		for image in removed {
			debug!(image = %image.path.display(), "image removed from folder");
			state.images.retain(|existing| existing.path != image.path);
			let _ = events.send(WatchEvent::Removed(image));
		}
	}

	Ok(())
}

fn lock_state(state: &Mutex<WatchState>) -> MutexGuard<'_, WatchState> {
	state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
