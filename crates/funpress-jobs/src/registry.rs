// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Keyed lifecycle management over job containers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::container::{JobContainer, WorkFn};
use crate::error::Result;

/// Keyed collection of [`JobContainer`]s.
///
/// One registry instance is shared per process: foreground callers issue
/// create/start/finish while job loops run in the background. A key maps
/// to at most one live job at a time; re-creating under the same key
/// requires finishing the previous one first.
///
/// Every operation returns a boolean success indicator. Internal errors
/// (a poisoned map lock) are logged at error level and reported as
/// `false`; nothing is propagated. Membership checks are advisory: the
/// map can change concurrently between a check and a follow-up call.
pub struct JobRegistry {
	jobs: RwLock<HashMap<String, Arc<JobContainer>>>,
}

impl JobRegistry {
	pub fn new() -> Self {
		Self {
			jobs: RwLock::new(HashMap::new()),
		}
	}

	/// Whether a job is registered under `key` at the instant of the call.
	pub fn is_job_exist(&self, key: &str) -> bool {
		match self.jobs.read() {
			Ok(jobs) => jobs.contains_key(key),
			Err(err) => {
				error!(key = %key, error = %err, "job map lock poisoned");
				false
			}
		}
	}

	/// Register a job under `key` without starting it.
	///
	/// Returns false when the key is already taken; insertion happens
	/// atomically under the map's write lock, so a caller losing the race
	/// for a key also gets false and its container is discarded unstarted.
	pub fn create_job<F, Fut>(&self, key: &str, interval: Duration, work: F) -> bool
	where
		F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<()>> + Send + 'static,
	{
		let mut jobs = match self.jobs.write() {
			Ok(jobs) => jobs,
			Err(err) => {
				error!(key = %key, error = %err, "job map lock poisoned");
				return false;
			}
		};

		if jobs.contains_key(key) {
			debug!(key = %key, "job already exists");
			return false;
		}

		let work: WorkFn = Arc::new(move |token| Box::pin(work(token)));
		jobs.insert(
			key.to_string(),
			Arc::new(JobContainer::new(key, interval, work)),
		);

		info!(key = %key, interval_ms = interval.as_millis() as u64, "job created");
		true
	}

	/// Start the job registered under `key`.
	///
	/// Returns false, with no side effects, when the key is absent.
	pub fn start_job(&self, key: &str, run_immediately: bool) -> bool {
		let job = match self.jobs.read() {
			Ok(jobs) => match jobs.get(key) {
				Some(job) => Arc::clone(job),
				None => {
					debug!(key = %key, "job does not exist");
					return false;
				}
			},
			Err(err) => {
				error!(key = %key, error = %err, "job map lock poisoned");
				return false;
			}
		};

		job.start(run_immediately);

		info!(key = %key, "job started");
		true
	}

	/// Remove the job registered under `key` and stop it.
	///
	/// The entry is removed before the container is stopped: once removed
	/// no other caller can observe or re-stop it. Stopping does not wait
	/// for an in-flight work invocation to finish.
	pub fn finish_job(&self, key: &str) -> bool {
		let job = match self.jobs.write() {
			Ok(mut jobs) => match jobs.remove(key) {
				Some(job) => job,
				None => {
					debug!(key = %key, "job does not exist");
					return false;
				}
			},
			Err(err) => {
				error!(key = %key, error = %err, "job map lock poisoned");
				return false;
			}
		};

		job.stop();

		info!(key = %key, "job removed");
		true
	}

	/// Stop and remove every registered job.
	///
	/// Returns false when the registry is empty. The backing map is
	/// swapped for an empty one under the write lock, then the drained
	/// containers are stopped outside it - jobs created concurrently
	/// after the swap land in the fresh map and are unaffected.
	pub fn finish_all_jobs(&self) -> bool {
		let drained = match self.jobs.write() {
			Ok(mut jobs) => {
				if jobs.is_empty() {
					debug!("no jobs registered");
					return false;
				}
				std::mem::take(&mut *jobs)
			}
			Err(err) => {
				error!(error = %err, "job map lock poisoned");
				return false;
			}
		};

		for job in drained.values() {
			job.stop();
		}

		info!(count = drained.len(), "all jobs removed");
		true
	}
}

impl Default for JobRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn counting_job(registry: &JobRegistry, key: &str, interval: Duration) -> Arc<AtomicUsize> {
		let count = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&count);
		let created = registry.create_job(key, interval, move |_token| {
			let counter = Arc::clone(&counter);
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Ok(())
			}
		});
		assert!(created);
		count
	}

	#[tokio::test]
	async fn test_create_job_twice_returns_true_then_false() {
		let registry = JobRegistry::new();

		assert!(registry.create_job("poll", Duration::from_secs(2), |_| async { Ok(()) }));
		assert!(!registry.create_job("poll", Duration::from_secs(2), |_| async { Ok(()) }));
	}

	#[tokio::test]
	async fn test_create_job_after_finish_succeeds_again() {
		let registry = JobRegistry::new();

		assert!(registry.create_job("poll", Duration::from_secs(2), |_| async { Ok(()) }));
		assert!(registry.finish_job("poll"));
		assert!(registry.create_job("poll", Duration::from_secs(2), |_| async { Ok(()) }));
	}

	#[tokio::test]
	async fn test_is_job_exist_tracks_membership() {
		let registry = JobRegistry::new();

		assert!(!registry.is_job_exist("poll"));
		registry.create_job("poll", Duration::from_secs(2), |_| async { Ok(()) });
		assert!(registry.is_job_exist("poll"));
		registry.finish_job("poll");
		assert!(!registry.is_job_exist("poll"));
	}

	#[tokio::test]
	async fn test_start_job_on_absent_key_returns_false() {
		let registry = JobRegistry::new();

		assert!(!registry.start_job("missing", true));
	}

	#[tokio::test]
	async fn test_finish_job_on_absent_key_returns_false() {
		let registry = JobRegistry::new();

		assert!(!registry.finish_job("missing"));
	}

	#[tokio::test]
	async fn test_finish_all_jobs_on_empty_registry_returns_false() {
		let registry = JobRegistry::new();

		assert!(!registry.finish_all_jobs());
	}

	#[tokio::test]
	async fn test_finish_all_jobs_clears_membership() {
		let registry = JobRegistry::new();
		registry.create_job("a", Duration::from_secs(1), |_| async { Ok(()) });
		registry.create_job("b", Duration::from_secs(1), |_| async { Ok(()) });

		assert!(registry.finish_all_jobs());
		assert!(!registry.is_job_exist("a"));
		assert!(!registry.is_job_exist("b"));
		assert!(!registry.finish_all_jobs());
	}

	#[tokio::test(start_paused = true)]
	async fn test_periodic_invocation_count() {
		let registry = JobRegistry::new();
		let count = counting_job(&registry, "poll", Duration::from_secs(2));

		assert!(registry.start_job("poll", true));
		tokio::time::sleep(Duration::from_secs(5)).await;

		// Invocations at t=0, t=2 and t=4.
		assert_eq!(count.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn test_deferred_job_waits_one_interval() {
		let registry = JobRegistry::new();
		let count = counting_job(&registry, "poll", Duration::from_secs(2));

		assert!(registry.start_job("poll", false));

		tokio::time::sleep(Duration::from_secs(1)).await;
		assert_eq!(count.load(Ordering::SeqCst), 0);

		tokio::time::sleep(Duration::from_secs(2)).await;
		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_finish_job_stops_further_invocations() {
		let registry = JobRegistry::new();
		let count = counting_job(&registry, "poll", Duration::from_secs(1));

		registry.start_job("poll", true);
		tokio::time::sleep(Duration::from_millis(1)).await;
		assert_eq!(count.load(Ordering::SeqCst), 1);

		assert!(registry.finish_job("poll"));
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_finish_all_jobs_stops_running_loops() {
		let registry = JobRegistry::new();
		let count_a = counting_job(&registry, "a", Duration::from_secs(1));
		let count_b = counting_job(&registry, "b", Duration::from_secs(1));
		registry.start_job("a", true);
		registry.start_job("b", true);
		tokio::time::sleep(Duration::from_millis(1)).await;

		assert!(registry.finish_all_jobs());
		let after_a = count_a.load(Ordering::SeqCst);
		let after_b = count_b.load(Ordering::SeqCst);
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count_a.load(Ordering::SeqCst), after_a);
		assert_eq!(count_b.load(Ordering::SeqCst), after_b);
	}

	#[tokio::test(start_paused = true)]
	async fn test_failing_job_is_invoked_once_and_stays_registered() {
		let registry = JobRegistry::new();
		let count = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&count);
		registry.create_job("flaky", Duration::from_secs(1), move |_token| {
			let counter = Arc::clone(&counter);
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
				Err(crate::error::JobError::Failed("boom".into()))
			}
		});

		registry.start_job("flaky", true);
		tokio::time::sleep(Duration::from_secs(10)).await;

		assert_eq!(count.load(Ordering::SeqCst), 1);
		// The dead loop leaves its entry dangling until explicitly removed.
		assert!(registry.is_job_exist("flaky"));
		assert!(registry.finish_job("flaky"));
	}
}
