// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User settings and application environment for FunPress.
//!
//! [`AppEnvironment`] resolves the application's on-disk layout (the
//! `Templates`, `Results` and `Settings` folders under a base directory);
//! [`SettingsStore`] persists [`UserSettings`] as JSON inside the
//! settings folder, keeping an in-memory copy of the last value seen.

pub mod env;
pub mod error;
pub mod model;
pub mod store;

pub use env::AppEnvironment;
pub use error::{Result, SettingsError};
pub use model::{PrinterActionKind, UserSettings, APPLICATION_NAME};
pub use store::SettingsStore;
