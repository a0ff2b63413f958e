//! Transport primitives for API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the transport-neutral [`ApiRequest`] and
//! [`HttpResponse`] so downstream crates can plug in custom HTTP stacks (or in-process
//! fakes) without touching the classification logic in
//! [`RequestExecutor`](crate::executor::RequestExecutor). Implementations only move bytes:
//! they must return every HTTP response, whatever its status, and report an error solely
//! when no response was received.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, CONTENT_TYPE};
// self
use crate::{_prelude::*, auth::TokenSecret};

#[cfg(feature = "reqwest")]
const JSON: &str = "application/json";

/// Boxed future returned by [`ApiHttpClient::call`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing API calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared by the authentication and
/// submission paths and by any number of concurrent callers.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the raw response.
	fn call(&self, request: ApiRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST` with a JSON body.
	Post,
}
impl Method {
	/// Returns the canonical verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-neutral description of a single API call.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Bearer credential sent in the `Authorization` header, if any.
	pub bearer: Option<TokenSecret>,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Builds a body-less `GET`.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, bearer: None, body: None }
	}

	/// Builds a `POST` carrying an already serialized JSON body.
	pub fn post(url: Url, body: Vec<u8>) -> Self {
		Self { method: Method::Post, url, bearer: None, body: Some(body) }
	}

	/// Attaches a bearer credential.
	pub fn with_bearer(mut self, token: TokenSecret) -> Self {
		self.bearer = Some(token);

		self
	}
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// Numeric HTTP status.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose calls are bounded by `timeout`, when provided.
	pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, crate::error::ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn call(&self, request: ApiRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let mut builder = match request.method {
				Method::Get => self.0.get(request.url),
				Method::Post => self.0.post(request.url),
			}
			.header(ACCEPT, JSON);

			if let Some(token) = &request.bearer {
				builder = builder.bearer_auth(token.expose());
			}
			if let Some(body) = request.body {
				builder = builder.header(CONTENT_TYPE, JSON).body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_builders_set_method_and_body() {
		let url = Url::parse("https://example.com/auth/cert/key").expect("URL should parse.");
		let get = ApiRequest::get(url.clone());

		assert_eq!(get.method, Method::Get);
		assert!(get.body.is_none());
		assert!(get.bearer.is_none());

		let post = ApiRequest::post(url, b"{}".to_vec()).with_bearer(TokenSecret::new("t-1"));

		assert_eq!(post.method.to_string(), "POST");
		assert_eq!(post.body.as_deref(), Some(&b"{}"[..]));
		assert_eq!(post.bearer.as_ref().map(TokenSecret::expose), Some("t-1"));
	}

	#[test]
	fn request_debug_redacts_bearer() {
		let url = Url::parse("https://example.com/").expect("URL should parse.");
		let request = ApiRequest::get(url).with_bearer(TokenSecret::new("super-secret"));

		assert!(!format!("{request:?}").contains("super-secret"));
	}
}
