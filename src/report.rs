//! Host-facing sinks for progress messages and failures.

use std::sync::{Arc, Mutex};
use crate::error::{ClassifiedError, Result};

/// Receives formatted progress text.
///
/// Delivery is best-effort: implementations swallow their own failures and
/// never report back to the caller.
pub trait Logger: Send + Sync {
	fn log_message(&self, text: &str);
}

/// Logger shared between a driver and its host.
pub type SharedLogger = Arc<dyn Logger>;

/// Forwards every message to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
	fn log_message(&self, text: &str) {
		tracing::info!(target: "echolane", "{text}");
	}
}

/// Keeps messages in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
	lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of everything logged so far.
	pub fn lines(&self) -> Vec<String> {
		match self.lines.lock() {
			Ok(lines) => lines.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.lines().iter().any(|line| line.contains(needle))
	}
}

impl Logger for MemoryLogger {
	fn log_message(&self, text: &str) {
		// A poisoned lock drops the message.
		if let Ok(mut lines) = self.lines.lock() {
			lines.push(text.to_owned());
		}
	}
}

/// Receives the classified failure that ended a driver invocation.
pub trait ErrorSink {
	fn report(&self, error: &ClassifiedError);
}

/// Surfaces failures as ordinary log lines, the way a host that only has a
/// text log would show them.
pub struct LogErrorSink {
	log: SharedLogger,
}

impl LogErrorSink {
	pub fn new(log: SharedLogger) -> Self {
		Self { log }
	}
}

impl ErrorSink for LogErrorSink {
	fn report(&self, error: &ClassifiedError) {
		self.log.log_message(error.message());
	}
}

/// Hands a failed result to `sink` exactly once and returns the success value.
pub fn surface<T>(result: Result<T>, sink: &dyn ErrorSink) -> Option<T> {
	match result {
		Ok(value) => Some(value),
		Err(err) => {
			let classified = err.classify();
			tracing::debug!(kind = ?classified.kind(), "{classified}");
			sink.report(&classified);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{ErrorKind, SocketError};

	struct Collect(Mutex<Vec<ClassifiedError>>);

	impl ErrorSink for Collect {
		fn report(&self, error: &ClassifiedError) {
			self.0.lock().unwrap().push(error.clone());
		}
	}

	#[test]
	fn surface_reports_once() {
		let sink = Collect(Mutex::new(Vec::new()));
		let out: Option<()> = surface(Err(SocketError::Accept { errno: libc::EBADF }), &sink);
		assert!(out.is_none());

		let seen = sink.0.lock().unwrap();
		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0].kind(), ErrorKind::SystemCall);
		assert_eq!(seen[0].message(), "accept() failed: bad file descriptor");
	}

	#[test]
	fn surface_passes_success_through() {
		let sink = Collect(Mutex::new(Vec::new()));
		assert_eq!(surface(Ok(7), &sink), Some(7));
		assert!(sink.0.lock().unwrap().is_empty());
	}

	#[test]
	fn log_sink_writes_message() {
		let log = Arc::new(MemoryLogger::new());
		let sink = LogErrorSink::new(log.clone());
		let _: Option<()> = surface(Err(SocketError::Naming { reason: "name is too big" }), &sink);
		assert_eq!(log.lines(), vec!["name is too big".to_string()]);
	}
}
