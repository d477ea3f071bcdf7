// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recurring background job scheduler for FunPress.
//!
//! A [`JobRegistry`] maps string keys to [`JobContainer`]s, each of which
//! runs one cancellable work function on a fixed interval in a detached
//! tokio task. Registry operations return boolean success indicators and
//! never propagate errors to callers; failures are logged locally.
//!
//! The [`delay`] module provides the cancellable suspension primitives the
//! container (and work functions) build on.

pub mod container;
pub mod delay;
pub mod error;
pub mod registry;

pub use container::{JobContainer, WorkFn};
pub use delay::{delay, wait_for_condition};
pub use error::{JobError, Result};
pub use registry::JobRegistry;

pub use tokio_util::sync::CancellationToken;
