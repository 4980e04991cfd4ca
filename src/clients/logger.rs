//! Client logging hooks.
//!
//! This module provides the [`Logger`] capability that callers can inject
//! into a client to observe what it does: every received HTTP response,
//! every retry, and every unsupported API version. Clients without a logger
//! use [`NoopLogger`].
//!
//! Events are built on the stack, handed to the logger synchronously and
//! dropped; they borrow from the request being executed and are never stored.
//!
//! # Example
//!
//! ```rust
//! use storefront_api_client::clients::{ClientLogger, LogContent};
//!
//! let logger = ClientLogger::new(|content: &LogContent<'_>| {
//!     if let LogContent::HttpRetry { retry_attempt, max_retries, .. } = content {
//!         println!("retry {retry_attempt} of {max_retries}");
//!     }
//! });
//! # let _ = logger;
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// A structured event emitted by a client.
#[derive(Clone, Copy, Debug)]
pub enum LogContent<'a> {
    /// A physical HTTP attempt completed with a response, whatever its status.
    HttpResponse {
        /// The request that was sent.
        request: &'a HttpRequest,
        /// The response that was received.
        response: &'a HttpResponse,
    },

    /// A physical HTTP attempt is about to be retried.
    HttpRetry {
        /// The request being retried.
        request: &'a HttpRequest,
        /// The response of the failed attempt, absent when the attempt
        /// failed before a response was received.
        last_response: Option<&'a HttpResponse>,
        /// The 1-based index of the attempt that failed.
        retry_attempt: u32,
        /// The retry budget of the call.
        max_retries: u32,
    },

    /// The configured or requested API version is outside the supported window.
    UnsupportedApiVersion {
        /// The requested version.
        api_version: &'a str,
        /// The currently supported versions.
        supported_api_versions: &'a [String],
    },
}

impl LogContent<'_> {
    /// Returns the event type name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HttpResponse { .. } => "HTTP-Response",
            Self::HttpRetry { .. } => "HTTP-Retry",
            Self::UnsupportedApiVersion { .. } => "UNSUPPORTED_API_VERSION",
        }
    }
}

/// A sink for client events.
///
/// Closures taking `&LogContent<'_>` implement this trait.
pub trait Logger: Send + Sync {
    /// Handles a single event.
    fn log(&self, content: &LogContent<'_>);
}

impl<F> Logger for F
where
    F: Fn(&LogContent<'_>) + Send + Sync,
{
    fn log(&self, content: &LogContent<'_>) {
        self(content);
    }
}

/// A logger that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _content: &LogContent<'_>) {}
}

/// Shared handle to the logger of a client.
///
/// A panic raised by the wrapped logger is caught and reported through
/// `tracing`, so a faulty logger cannot abort a request or its retries.
#[derive(Clone)]
pub struct ClientLogger {
    inner: Arc<dyn Logger>,
}

impl ClientLogger {
    /// Wraps a logger.
    #[must_use]
    pub fn new<L: Logger + 'static>(logger: L) -> Self {
        Self {
            inner: Arc::new(logger),
        }
    }

    /// Wraps an already shared logger.
    #[must_use]
    pub fn from_arc(logger: Arc<dyn Logger>) -> Self {
        Self { inner: logger }
    }

    /// Hands `content` to the wrapped logger.
    pub fn log(&self, content: &LogContent<'_>) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.inner.log(content)));
        if result.is_err() {
            tracing::warn!(
                event = content.kind(),
                "Client logger panicked while handling an event; the event was dropped"
            );
        }
    }
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self::new(NoopLogger)
    }
}

impl fmt::Debug for ClientLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientLogger")
    }
}

// Verify ClientLogger is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientLogger>();
};
