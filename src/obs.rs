//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to emit structured spans named `crpt_api.call` with the
//!   `operation` and `stage` fields, plus debug events for quota resets and local rejections.
//! - Enable `metrics` to increment the `crpt_api_call_total` counter for every
//!   attempt/success/failure/throttled outcome, labeled by `operation` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Remote operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Certificate challenge + token exchange.
	Authenticate,
	/// Document creation.
	Submit,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Authenticate => "authenticate",
			Operation::Submit => "submit",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Rejected locally by the request quota; nothing was sent.
	Throttled,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
			Outcome::Throttled => "throttled",
		}
	}

	/// Terminal outcome for a finished call.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Outcome::Success,
			Err(Error::RateLimited) => Outcome::Throttled,
			Err(_) => Outcome::Failure,
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
