// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON persistence for user settings.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use crate::env::AppEnvironment;
use crate::error::Result;
use crate::model::{UserSettings, USER_SETTINGS_FILE_NAME};

/// Loads and saves [`UserSettings`], caching the last value seen.
pub struct SettingsStore {
	env: AppEnvironment,
	cached: Mutex<Option<UserSettings>>,
}

impl SettingsStore {
	pub fn new(env: AppEnvironment) -> Self {
		Self {
			env,
			cached: Mutex::new(None),
		}
	}

	/// Load settings, preferring the cached copy over a disk read.
	///
	/// Returns `Ok(None)` when no settings file exists yet; a corrupt
	/// file is a [`crate::SettingsError::Serialization`] error.
	pub fn load(&self) -> Result<Option<UserSettings>> {
		let mut cached = lock_cached(&self.cached);
		if let Some(settings) = cached.as_ref() {
			return Ok(Some(settings.clone()));
		}

		let path = self.settings_file();
		if !path.exists() {
			warn!(path = %path.display(), "settings file does not exist");
			return Ok(None);
		}

		let data = fs::read_to_string(&path)?;
		let settings: UserSettings = serde_json::from_str(&data)?;
		*cached = Some(settings.clone());

		Ok(Some(settings))
	}

	/// Persist `settings` and refresh the cache.
	pub fn save(&self, settings: &UserSettings) -> Result<()> {
		self.env.ensure_dirs()?;

		let data = serde_json::to_string_pretty(settings)?;
		fs::write(self.settings_file(), data)?;

		*lock_cached(&self.cached) = Some(settings.clone());

		info!("user settings saved");
		Ok(())
	}

	fn settings_file(&self) -> PathBuf {
		self.env.settings_path().join(USER_SETTINGS_FILE_NAME)
	}
}

fn lock_cached(cached: &Mutex<Option<UserSettings>>) -> MutexGuard<'_, Option<UserSettings>> {
	cached.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
