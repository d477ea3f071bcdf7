// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User settings model and application constants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Display name of the application.
pub const APPLICATION_NAME: &str = "Fun Press";

/// File name the user settings are persisted under.
pub const USER_SETTINGS_FILE_NAME: &str = "user-settings.json";

pub const TEMPLATES_FOLDER_NAME: &str = "Templates";
pub const RESULTS_FOLDER_NAME: &str = "Results";
pub const SETTINGS_FOLDER_NAME: &str = "Settings";

/// What happens to a composited image once it is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterActionKind {
	#[default]
	None,
	Preview,
	Print,
}

/// Operator preferences persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
	pub printer_name: Option<String>,
	pub printer_action: PrinterActionKind,
	pub folder_path: Option<PathBuf>,
}
