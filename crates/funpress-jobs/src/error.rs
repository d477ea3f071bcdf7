// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the job subsystem.

use thiserror::Error;

/// Result type for job operations.
pub type Result<T> = std::result::Result<T, JobError>;

/// Errors produced by delays and work functions.
///
/// Cancellation is modelled as an error variant so it short-circuits
/// through `?`, but it is never treated as a failure: the container logs
/// it at trace level and ends the loop quietly.
#[derive(Debug, Error)]
pub enum JobError {
	#[error("operation cancelled")]
	Cancelled,

	#[error("job failed: {0}")]
	Failed(String),
}
