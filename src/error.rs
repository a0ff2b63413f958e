//! Client-level error types shared across authentication, submission, and configuration.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Variants are grouped by what the caller should do next: retry later
/// ([`Error::RateLimited`], [`Error::Transport`]), fix the request
/// ([`Error::SubmissionRejected`], [`Error::AuthenticationFailed`], [`Error::Decode`]),
/// or fix the setup ([`Error::InvalidConfiguration`], [`Error::NotAuthenticated`]).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal at construction.
	#[error(transparent)]
	InvalidConfiguration(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Certificate signer could not produce a signature.
	#[error(transparent)]
	Signing(#[from] crate::auth::SignerError),
	/// Outbound payload could not be serialized.
	#[error("Request payload could not be encoded.")]
	Encode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},

	/// No bearer token is held; call `authenticate` first.
	#[error("Authentication token is missing; authenticate first.")]
	NotAuthenticated,
	/// Local request quota for the current window is exhausted; no request was sent.
	#[error("Request rate limit exceeded; try again later.")]
	RateLimited,
	/// The document endpoint answered with an error status.
	#[error("Document submission was rejected with status {status}: {message}.")]
	SubmissionRejected {
		/// HTTP status code returned by the API.
		status: u16,
		/// Remote-supplied message, verbatim.
		message: String,
	},
	/// The certificate authentication exchange failed.
	#[error("Authentication failed: {message}.")]
	AuthenticationFailed {
		/// HTTP status code, when the failure came with an error status.
		status: Option<u16>,
		/// Remote-supplied message, verbatim.
		message: String,
	},
}
impl Error {
	/// Returns `true` when repeating the same call later may succeed.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::RateLimited | Self::Transport(_) => true,
			Self::SubmissionRejected { status, .. } => is_retryable_status(*status),
			Self::AuthenticationFailed { status: Some(status), .. } =>
				is_retryable_status(*status),
			_ => false,
		}
	}

	/// HTTP status code attached to the failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::SubmissionRejected { status, .. } => Some(*status),
			Self::AuthenticationFailed { status, .. } => *status,
			Self::Decode(e) => Some(e.status),
			_ => None,
		}
	}
}

fn is_retryable_status(status: u16) -> bool {
	status == 429 || status >= 500
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The per-window request limit must be positive.
	#[error("Request limit must be positive, got {limit}.")]
	InvalidRequestLimit {
		/// Rejected limit.
		limit: u32,
	},
	/// Base URL (or an endpoint derived from it) cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The periodic quota reset needs a running tokio runtime.
	#[error("A tokio runtime is required to schedule the quota reset.")]
	MissingRuntime,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response body could not be decoded into the expected shape.
#[derive(Debug, ThisError)]
#[error("API returned a malformed body (status {status}).")]
pub struct DecodeError {
	/// HTTP status code of the offending response.
	pub status: u16,
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
