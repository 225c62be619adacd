// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io;

/// The result type for fallible clock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when starting a [`ClockService`](crate::ClockService).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use recall_clock::{ClockService, ErrorKind};
///
/// let error = ClockService::builder()
///     .tick_interval(Duration::ZERO)
///     .start()
///     .unwrap_err();
///
/// assert!(matches!(error.kind(), ErrorKind::ZeroTickInterval));
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorKind);

/// The reason a clock operation failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The configured tick interval was zero, which would turn the ticker into a busy loop.
    #[error("the clock tick interval must be greater than zero")]
    ZeroTickInterval,

    /// The operating system refused to create the ticker thread.
    #[error("failed to spawn the clock ticker thread")]
    Spawn(#[source] io::Error),
}

impl Error {
    pub(crate) const fn zero_tick_interval() -> Self {
        Self(ErrorKind::ZeroTickInterval)
    }

    pub(crate) const fn spawn(error: io::Error) -> Self {
        Self(ErrorKind::Spawn(error))
    }

    /// Returns the reason for this error.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}
