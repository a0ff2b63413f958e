//! Client facade wiring the limiter, executor, session, and submitter together.

// self
use crate::{
	_prelude::*,
	auth::{AuthSession, CertificateSigner, TokenSecret},
	config::{ClientConfig, Endpoints},
	executor::RequestExecutor,
	http::ApiHttpClient,
	limit::{RateLimiter, ResetTask},
	model::{Document, DocumentFormat, DocumentType, ProductGroup, SubmissionResult},
	submit::{DocumentPayload, DocumentSubmitter, SubmissionMetrics},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestCrptClient = CrptClient<ReqwestHttpClient>;

/// Thread-safe API client with a self-imposed request quota.
///
/// One instance is meant to be shared (behind `Arc` or by reference) by every task that
/// submits documents. Construction spawns the quota reset task on the ambient tokio
/// runtime; [`CrptClient::shutdown`] (or dropping the client) stops it.
#[derive(Debug)]
pub struct CrptClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	config: ClientConfig,
	endpoints: Arc<Endpoints>,
	limiter: Arc<RateLimiter>,
	session: Arc<AuthSession<C>>,
	submitter: DocumentSubmitter<C>,
	reset_task: ResetTask,
}
impl<C> CrptClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that sends every request through `http_client`.
	///
	/// Must be called from within a tokio runtime.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		config.validate()?;

		let endpoints = Arc::new(config.endpoints()?);
		let limiter = Arc::new(RateLimiter::new(config.request_limit)?);
		let reset_task = limiter.spawn_reset(config.period.as_duration())?;
		let executor = Arc::new(RequestExecutor::new(http_client));
		let session = Arc::new(AuthSession::new(executor.clone(), endpoints.clone()));
		let submitter =
			DocumentSubmitter::new(executor, limiter.clone(), session.clone(), endpoints.clone());

		Ok(Self { config, endpoints, limiter, session, submitter, reset_task })
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Resolved endpoint URLs.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Shared request quota.
	pub fn limiter(&self) -> &Arc<RateLimiter> {
		&self.limiter
	}

	/// Token owner; hand this to other components that need the bearer token.
	pub fn session(&self) -> &Arc<AuthSession<C>> {
		&self.session
	}

	/// Submission counters.
	pub fn metrics(&self) -> &Arc<SubmissionMetrics> {
		self.submitter.metrics()
	}

	/// Authenticates with the caller's certificate and stores the token.
	pub async fn authenticate(&self, signer: &dyn CertificateSigner) -> Result<TokenSecret> {
		self.session.authenticate(signer).await
	}

	/// Submits an already-encoded document.
	pub async fn create_document(
		&self,
		format: DocumentFormat,
		product_document: impl Into<String>,
		signature: impl Into<String>,
		document_type: DocumentType,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		let payload = DocumentPayload::new(format, document_type, product_document);

		self.submitter.submit(payload, signature, product_group).await
	}

	/// Submits a payload built by the caller.
	pub async fn submit(
		&self,
		document: DocumentPayload,
		signature: impl Into<String>,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		self.submitter.submit(document, signature, product_group).await
	}

	/// Encodes `document` and submits it as an introduce-goods document.
	pub async fn create_introduce_goods_document(
		&self,
		document: &Document,
		signature: impl Into<String>,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		self.submitter.submit_introduce_goods(document, signature, product_group).await
	}

	/// Stops the quota reset task. Idempotent; in-flight requests keep running.
	pub fn shutdown(&self) {
		self.reset_task.shutdown();
	}

	/// Returns `true` once the quota reset task has stopped.
	pub fn is_shut_down(&self) -> bool {
		self.reset_task.is_stopped()
	}
}
#[cfg(feature = "reqwest")]
impl CrptClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport.
	///
	/// Honors [`ClientConfig::timeout`]. Must be called from within a tokio runtime.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Self::with_http_client(config, http_client)
	}
}
