// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for submission attempts.
#[derive(Debug, Default)]
pub struct SubmissionMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	throttled: AtomicU64,
}
impl SubmissionMetrics {
	/// Returns the total number of submission attempts.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of documents the API accepted.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of submissions that failed for any reason other than local throttling.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of submissions rejected locally by the quota.
	pub fn throttled(&self) -> u64 {
		self.throttled.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_throttled(&self) {
		self.throttled.fetch_add(1, Ordering::Relaxed);
	}
}
