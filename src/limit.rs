//! Fixed-window admission control for outbound API calls.
//!
//! [`RateLimiter`] hands out at most `capacity` permits per window. Acquisition never
//! blocks: callers either get a permit or are told to come back later. A single
//! background [`ResetTask`] restores the full capacity once per period, regardless of how
//! many permits are outstanding, so the limiter bounds request *initiations* per window
//! rather than true concurrency. Across a reset boundary a caller can therefore start up
//! to `2 * capacity - 1` requests in quick succession.

// std
use std::sync::Weak;
// crates.io
use tokio::{
	runtime::Handle,
	task::JoinHandle,
	time::{self, Instant, MissedTickBehavior},
};
// self
use crate::{_prelude::*, error::ConfigError};

/// Counter of available permits guarded by a single lock shared by acquire, release, and
/// reset.
#[derive(Debug)]
pub struct RateLimiter {
	capacity: usize,
	available: Mutex<usize>,
}
impl RateLimiter {
	/// Creates a limiter with `capacity` permits available immediately.
	pub fn new(capacity: u32) -> Result<Self, ConfigError> {
		if capacity == 0 {
			return Err(ConfigError::InvalidRequestLimit { limit: capacity });
		}

		let capacity = capacity as usize;

		Ok(Self { capacity, available: Mutex::new(capacity) })
	}

	/// Permits restored by every reset.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Permits left in the current window.
	pub fn available(&self) -> usize {
		*self.available.lock()
	}

	/// Consumes one permit if any is left; never waits.
	pub fn acquire(&self) -> bool {
		let mut available = self.available.lock();

		if *available == 0 {
			return false;
		}

		*available -= 1;

		true
	}

	/// Returns one permit to the current window, saturating at capacity.
	pub fn release(&self) {
		let mut available = self.available.lock();

		*available = (*available + 1).min(self.capacity);
	}

	/// Restores the full capacity; outstanding permits are forgotten.
	pub fn reset(&self) {
		*self.available.lock() = self.capacity;
	}

	/// Consumes one permit wrapped in a guard that releases it on drop.
	///
	/// The guard also fires when the owning future is cancelled or unwinds, which keeps
	/// permit accounting balanced on every exit path.
	pub fn try_permit(&self) -> Option<Permit<'_>> {
		self.acquire().then(|| Permit { limiter: self })
	}

	/// Spawns the periodic reset on the ambient tokio runtime.
	///
	/// The first reset fires one full `period` after this call. The task holds only a weak
	/// reference, so it also exits once the limiter itself is dropped.
	pub fn spawn_reset(self: &Arc<Self>, period: Duration) -> Result<ResetTask, ConfigError> {
		let runtime = Handle::try_current().map_err(|_| ConfigError::MissingRuntime)?;
		let limiter = Arc::downgrade(self);
		let handle = runtime.spawn(reset_loop(limiter, period));

		Ok(ResetTask(Mutex::new(Some(handle))))
	}
}

async fn reset_loop(limiter: Weak<RateLimiter>, period: Duration) {
	let mut ticker = time::interval_at(Instant::now() + period, period);

	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	loop {
		ticker.tick().await;

		let Some(strong) = limiter.upgrade() else { break };

		strong.reset();

		#[cfg(feature = "tracing")]
		tracing::debug!(capacity = strong.capacity, "request quota window reset");
	}
}

/// RAII permit returned by [`RateLimiter::try_permit`].
#[must_use = "dropping the permit releases it immediately"]
pub struct Permit<'a> {
	limiter: &'a RateLimiter,
}
impl Debug for Permit<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Permit(..)")
	}
}
impl Drop for Permit<'_> {
	fn drop(&mut self) {
		self.limiter.release();
	}
}

/// Handle to the background reset task; stopping it is idempotent.
#[derive(Debug)]
pub struct ResetTask(Mutex<Option<JoinHandle<()>>>);
impl ResetTask {
	/// Stops the periodic reset. In-flight requests are unaffected.
	pub fn shutdown(&self) {
		if let Some(handle) = self.0.lock().take() {
			handle.abort();
		}
	}

	/// Returns `true` once [`ResetTask::shutdown`] has been called or the task exited.
	pub fn is_stopped(&self) -> bool {
		self.0.lock().as_ref().is_none_or(JoinHandle::is_finished)
	}
}
impl Drop for ResetTask {
	fn drop(&mut self) {
		self.shutdown();
	}
}
