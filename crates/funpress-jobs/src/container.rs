// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single named recurring unit of work.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use crate::delay::delay;
use crate::error::{JobError, Result};

/// The cancellable unit of logic a job repeatedly executes.
pub type WorkFn = Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// One named recurring task: an interval, a work function, and the
/// cancellation handle of the currently running loop.
///
/// Lifecycle is Idle -> Running -> Stopped with no re-entry: a stopped
/// container is discarded, and a new one is created under the same key to
/// resume.
pub struct JobContainer {
	key: String,
	interval: Duration,
	work: WorkFn,
	cancel: Mutex<CancellationToken>,
}

impl JobContainer {
	pub fn new(key: impl Into<String>, interval: Duration, work: WorkFn) -> Self {
		Self {
			key: key.into(),
			interval,
			work,
			cancel: Mutex::new(CancellationToken::new()),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Launch the detached polling loop.
	///
	/// A fresh cancellation handle is installed on every start. When
	/// `run_immediately` is false the loop waits one interval before the
	/// first invocation. The work function and the subsequent delay run
	/// strictly sequentially: the next invocation never begins before the
	/// previous one finishes.
	///
	/// Cancellation anywhere in the loop ends it quietly at trace level;
	/// any other work error ends it with a warning tagged with the job
	/// key. Nothing escapes to the caller either way. A loop killed by a
	/// work error stays registered until explicitly removed - callers
	/// recover by finishing and re-creating the job.
	pub fn start(&self, run_immediately: bool) {
		let token = CancellationToken::new();
		*lock_cancel(&self.cancel) = token.clone();

		let key = self.key.clone();
		let interval = self.interval;
		let work = Arc::clone(&self.work);

		tokio::spawn(async move {
			if token.is_cancelled() {
				trace!(key = %key, "cancel requested before job loop began");
				return;
			}

			if !run_immediately && delay(interval, &token).await.is_err() {
				trace!(key = %key, "job loop cancelled during initial delay");
				return;
			}

			while !token.is_cancelled() {
				match (work)(token.clone()).await {
					Ok(()) => {}
					Err(JobError::Cancelled) => {
						trace!(key = %key, "job work cancelled");
						return;
					}
					Err(err) => {
						warn!(key = %key, error = %err, "error in job task");
						return;
					}
				}

				if delay(interval, &token).await.is_err() {
					trace!(key = %key, "job loop cancelled during interval delay");
					return;
				}
			}

			trace!(key = %key, "job loop observed cancellation");
		});
	}

	/// Signal cancellation to the running loop.
	///
	/// Fire-and-forget: this does not wait for the loop to observe the
	/// signal. No new work invocation begins after this returns; an
	/// in-flight invocation may still run to completion or to its own
	/// cancellation check.
	pub fn stop(&self) {
		lock_cancel(&self.cancel).cancel();
	}
}

fn lock_cancel(cancel: &Mutex<CancellationToken>) -> std::sync::MutexGuard<'_, CancellationToken> {
	cancel.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn counting_work(count: &Arc<AtomicUsize>) -> WorkFn {
		let count = Arc::clone(count);
		Arc::new(move |_token| {
			let count = Arc::clone(&count);
			Box::pin(async move {
				count.fetch_add(1, Ordering::SeqCst);
				Ok(())
			})
		})
	}

	#[tokio::test(start_paused = true)]
	async fn test_run_immediately_invokes_before_any_delay() {
		let count = Arc::new(AtomicUsize::new(0));
		let container = JobContainer::new("immediate", Duration::from_secs(10), counting_work(&count));

		container.start(true);
		tokio::time::sleep(Duration::from_millis(1)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_deferred_start_waits_one_interval() {
		let count = Arc::new(AtomicUsize::new(0));
		let container = JobContainer::new("deferred", Duration::from_secs(2), counting_work(&count));

		container.start(false);

		tokio::time::sleep(Duration::from_secs(1)).await;
		assert_eq!(count.load(Ordering::SeqCst), 0);

		tokio::time::sleep(Duration::from_millis(1500)).await;
		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_stop_prevents_further_invocations() {
		let count = Arc::new(AtomicUsize::new(0));
		let container = JobContainer::new("stopped", Duration::from_secs(1), counting_work(&count));

		container.start(true);
		tokio::time::sleep(Duration::from_millis(1)).await;
		assert_eq!(count.load(Ordering::SeqCst), 1);

		container.stop();
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_stop_before_first_run_suppresses_work() {
		let count = Arc::new(AtomicUsize::new(0));
		let container = JobContainer::new("early-stop", Duration::from_secs(2), counting_work(&count));

		container.start(false);
		container.stop();
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn test_failing_work_terminates_loop_after_first_invocation() {
		let count = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&count);
		let work: WorkFn = Arc::new(move |_token| {
			let counter = Arc::clone(&counter);
			Box::pin(async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Err(JobError::Failed("boom".into()))
			})
		});
		let container = JobContainer::new("failing", Duration::from_secs(1), work);

		container.start(true);
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_work_returning_cancelled_ends_loop_quietly() {
		let count = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&count);
		let work: WorkFn = Arc::new(move |_token| {
			let counter = Arc::clone(&counter);
			Box::pin(async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Err(JobError::Cancelled)
			})
		});
		let container = JobContainer::new("self-cancelling", Duration::from_secs(1), work);

		container.start(true);
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}
}
