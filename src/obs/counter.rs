// self
use crate::{
	_prelude::*,
	obs::{Operation, Outcome},
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"crpt_api_call_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records the terminal outcome of a finished call.
pub fn record_result<T>(operation: Operation, result: &Result<T>) {
	record_call_outcome(operation, Outcome::of(result));
}
