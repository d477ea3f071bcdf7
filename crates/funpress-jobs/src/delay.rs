// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cancellable timed suspension and condition polling.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{JobError, Result};

/// Suspend the current task for `duration`.
///
/// Resolves early with [`JobError::Cancelled`] when `cancel` fires before
/// the duration elapses.
pub async fn delay(duration: Duration, cancel: &CancellationToken) -> Result<()> {
	tokio::select! {
		_ = cancel.cancelled() => Err(JobError::Cancelled),
		_ = tokio::time::sleep(duration) => Ok(()),
	}
}

/// Poll `condition` until it returns false.
///
/// While the condition holds, sleeps one `polling_interval` between
/// evaluations. Returns normally both when the condition turns false and
/// when `cancel` fires; cancellation is logged at debug level and never
/// surfaced to the caller. A condition that never turns false and is
/// never cancelled suspends indefinitely - bounding it is the caller's
/// responsibility.
pub async fn wait_for_condition<F>(
	mut condition: F,
	polling_interval: Duration,
	cancel: &CancellationToken,
) where
	F: FnMut() -> bool,
{
	while condition() {
		if cancel.is_cancelled() {
			debug!("condition wait cancelled");
			return;
		}

		if delay(polling_interval, cancel).await.is_err() {
			debug!("condition wait cancelled during delay");
			return;
		}
	}
}
