//! Single-call request execution and response classification.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{DecodeError, TransportError},
	http::{ApiHttpClient, ApiRequest, HttpResponse},
};

/// Status codes at or above this value carry an [`ApiErrorEnvelope`].
const ERROR_STATUS_FLOOR: u16 = 400;

/// Failure modes of [`RequestExecutor::execute`].
#[derive(Debug, ThisError)]
pub enum ExecutorError {
	/// No response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered with an error status.
	#[error("API returned status {status}: {message}.")]
	Remote {
		/// HTTP status code.
		status: u16,
		/// Remote-supplied message, verbatim.
		message: String,
	},
	/// The body matched neither the success shape nor the error envelope.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl ExecutorError {
	/// Surfaces the failure as a rejected document submission.
	pub fn into_submission_error(self) -> Error {
		match self {
			Self::Transport(e) => Error::Transport(e),
			Self::Remote { status, message } => Error::SubmissionRejected { status, message },
			Self::Decode(e) => Error::Decode(e),
		}
	}

	/// Surfaces the failure as a failed authentication exchange.
	pub fn into_authentication_error(self) -> Error {
		match self {
			Self::Transport(e) => Error::Transport(e),
			Self::Remote { status, message } =>
				Error::AuthenticationFailed { status: Some(status), message },
			Self::Decode(e) => Error::Decode(e),
		}
	}
}

/// Error body the API returns alongside a `>= 400` status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorEnvelope {
	/// Primary human-readable message.
	#[serde(default)]
	pub error_message: Option<String>,
	/// Secondary description some endpoints send instead.
	#[serde(default)]
	pub description: Option<String>,
}
impl ApiErrorEnvelope {
	/// Best available message; empty when the API sent none.
	pub fn into_message(self) -> String {
		self.error_message.or(self.description).unwrap_or_default()
	}
}

/// Stateless executor that sends one request and decodes its outcome.
///
/// Safe to share across concurrent callers; the only state is the shared transport.
#[derive(Debug)]
pub struct RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
}
impl<C> RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Wraps a transport.
	pub fn new(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into() }
	}

	/// Shared transport handle.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Sends `request`, decoding a `< 400` body as `T` and a `>= 400` body as an
	/// [`ApiErrorEnvelope`].
	pub async fn execute<T>(&self, request: ApiRequest) -> Result<T, ExecutorError>
	where
		T: DeserializeOwned,
	{
		let response = self.http_client.call(request).await.map_err(TransportError::network)?;

		classify(response)
	}
}

/// Maps a raw response onto the executor's success/error contract.
pub fn classify<T>(response: HttpResponse) -> Result<T, ExecutorError>
where
	T: DeserializeOwned,
{
	let HttpResponse { status, body } = response;

	if status >= ERROR_STATUS_FLOOR {
		let envelope = decode::<ApiErrorEnvelope>(status, &body)?;

		return Err(ExecutorError::Remote { status, message: envelope.into_message() });
	}

	Ok(decode(status, &body)?)
}

fn decode<T>(status: u16, body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError { status, source })
}
