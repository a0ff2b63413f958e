//! Two-step certificate authentication and bearer token ownership.
//!
//! [`AuthSession::authenticate`] fetches a challenge (`{uuid, data}`), has the caller's
//! [`CertificateSigner`] sign `data`, and trades `{uuid, data: signature}` for a bearer
//! token. Neither step is throttled by the submission quota. The session is the single
//! owner of the token: readers observe either the previous or the new value, and at most
//! one exchange runs at a time.

// self
use crate::{
	_prelude::*,
	auth::{CertificateSigner, TokenSecret},
	config::Endpoints,
	executor::RequestExecutor,
	http::{ApiHttpClient, ApiRequest},
	obs::{self, CallSpan, Operation, Outcome},
};

#[derive(Debug, Deserialize)]
struct CertChallenge {
	uuid: String,
	data: String,
}

#[derive(Debug, Serialize)]
struct CertExchange<'a> {
	uuid: &'a str,
	data: &'a str,
}

/// Token endpoint reply; a 2xx status may still carry an error envelope instead of a token.
#[derive(Debug, Deserialize)]
struct TokenReply {
	#[serde(default)]
	token: Option<String>,
	#[serde(default)]
	code: Option<String>,
	#[serde(default)]
	error_message: Option<String>,
	#[serde(default)]
	description: Option<String>,
}
impl TokenReply {
	fn into_token(self) -> Result<TokenSecret> {
		match self.token {
			Some(token) if !token.is_empty() => Ok(TokenSecret::new(token)),
			_ => {
				let message = self
					.error_message
					.or(self.description)
					.or_else(|| self.code.map(|code| format!("error code {code}")))
					.unwrap_or_else(|| "token endpoint returned no token".into());

				Err(Error::AuthenticationFailed { status: None, message })
			},
		}
	}
}

/// Holds the current bearer token and runs the certificate exchange that replaces it.
#[derive(Debug)]
pub struct AuthSession<C>
where
	C: ?Sized + ApiHttpClient,
{
	executor: Arc<RequestExecutor<C>>,
	endpoints: Arc<Endpoints>,
	token: RwLock<Option<TokenSecret>>,
	exchange_guard: AsyncMutex<()>,
}
impl<C> AuthSession<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an unauthenticated session.
	pub fn new(executor: Arc<RequestExecutor<C>>, endpoints: Arc<Endpoints>) -> Self {
		Self { executor, endpoints, token: RwLock::new(None), exchange_guard: AsyncMutex::new(()) }
	}

	/// Returns a snapshot of the current token.
	pub fn token(&self) -> Option<TokenSecret> {
		self.token.read().clone()
	}

	/// Returns `true` once a non-empty token is held.
	pub fn is_authenticated(&self) -> bool {
		self.token.read().as_ref().is_some_and(|token| !token.is_empty())
	}

	/// Installs a token obtained out of band.
	pub fn set_token(&self, token: TokenSecret) {
		*self.token.write() = Some(token);
	}

	/// Forgets the current token; later submissions fail with [`Error::NotAuthenticated`].
	pub fn clear(&self) {
		*self.token.write() = None;
	}

	/// Runs the challenge/sign/exchange protocol and stores the resulting token.
	///
	/// On failure the previously held token, if any, is kept. No retry is attempted.
	pub async fn authenticate(&self, signer: &dyn CertificateSigner) -> Result<TokenSecret> {
		const OPERATION: Operation = Operation::Authenticate;

		let span = CallSpan::new(OPERATION, "authenticate");

		obs::record_call_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let _exchange = self.exchange_guard.lock().await;
				let challenge: CertChallenge = self
					.executor
					.execute(ApiRequest::get(self.endpoints.cert_key.clone()))
					.await
					.map_err(|e| e.into_authentication_error())?;
				let signature = signer.sign(&challenge.data)?;
				let body =
					serde_json::to_vec(&CertExchange { uuid: &challenge.uuid, data: &signature })
						.map_err(|source| Error::Encode { source })?;
				let reply: TokenReply = self
					.executor
					.execute(ApiRequest::post(self.endpoints.cert_token.clone(), body))
					.await
					.map_err(|e| e.into_authentication_error())?;
				let token = reply.into_token()?;

				self.set_token(token.clone());

				Ok(token)
			})
			.await;

		obs::record_result(OPERATION, &result);

		result
	}
}
