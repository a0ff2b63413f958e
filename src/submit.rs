//! Quota-guarded document submission.
//!
//! [`DocumentSubmitter::submit`] checks for a bearer token, takes one permit from the
//! shared [`RateLimiter`], and only then talks to the network. The permit is held by a
//! guard for the duration of the call, so it is returned exactly once whether the
//! request succeeds, fails, panics, or the caller drops the future mid-flight.

mod stats;

pub use stats::*;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::AuthSession,
	config::Endpoints,
	executor::RequestExecutor,
	http::{ApiHttpClient, ApiRequest},
	limit::RateLimiter,
	model::{
		Document, DocumentFormat, DocumentType, ProductGroup, SubmissionRequest, SubmissionResult,
	},
	obs::{self, CallSpan, Operation},
};

/// Already-encoded document content plus the codes describing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPayload {
	/// Payload encoding.
	pub format: DocumentFormat,
	/// Document type code.
	pub document_type: DocumentType,
	/// Base64-encoded document content.
	pub content_base64: String,
}
impl DocumentPayload {
	/// Wraps content the caller has already encoded.
	pub fn new(
		format: DocumentFormat,
		document_type: DocumentType,
		content_base64: impl Into<String>,
	) -> Self {
		Self { format, document_type, content_base64: content_base64.into() }
	}

	/// Serializes `document` to JSON and base64-encodes it as a `MANUAL`
	/// `LP_INTRODUCE_GOODS` payload.
	pub fn introduce_goods(document: &Document) -> Result<Self> {
		let json = serde_json::to_vec(document).map_err(|source| Error::Encode { source })?;

		Ok(Self::new(DocumentFormat::Manual, DocumentType::LpIntroduceGoods, STANDARD.encode(json)))
	}
}

/// Submits documents under the shared request quota.
#[derive(Debug)]
pub struct DocumentSubmitter<C>
where
	C: ?Sized + ApiHttpClient,
{
	executor: Arc<RequestExecutor<C>>,
	limiter: Arc<RateLimiter>,
	session: Arc<AuthSession<C>>,
	endpoints: Arc<Endpoints>,
	metrics: Arc<SubmissionMetrics>,
}
impl<C> DocumentSubmitter<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Wires a submitter to its collaborators.
	pub fn new(
		executor: Arc<RequestExecutor<C>>,
		limiter: Arc<RateLimiter>,
		session: Arc<AuthSession<C>>,
		endpoints: Arc<Endpoints>,
	) -> Self {
		Self { executor, limiter, session, endpoints, metrics: Default::default() }
	}

	/// Counters for this submitter.
	pub fn metrics(&self) -> &Arc<SubmissionMetrics> {
		&self.metrics
	}

	/// Submits one document.
	///
	/// Fails with [`Error::NotAuthenticated`] before touching the quota when no token is
	/// held, and with [`Error::RateLimited`] without sending anything when the current
	/// window is exhausted. Error statuses from the API surface as
	/// [`Error::SubmissionRejected`].
	pub async fn submit(
		&self,
		document: DocumentPayload,
		signature: impl Into<String>,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		const OPERATION: Operation = Operation::Submit;

		let span = CallSpan::new(OPERATION, "submit");
		let signature = signature.into();

		obs::record_call_outcome(OPERATION, obs::Outcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(self.dispatch(document, signature, product_group)).await;

		match &result {
			Ok(_) => self.metrics.record_success(),
			Err(Error::RateLimited) => self.metrics.record_throttled(),
			Err(_) => self.metrics.record_failure(),
		}

		obs::record_result(OPERATION, &result);

		result
	}

	/// Encodes `document` and submits it as an introduce-goods document.
	pub async fn submit_introduce_goods(
		&self,
		document: &Document,
		signature: impl Into<String>,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		let payload = DocumentPayload::introduce_goods(document)?;

		self.submit(payload, signature, product_group).await
	}

	async fn dispatch(
		&self,
		document: DocumentPayload,
		signature: String,
		product_group: ProductGroup,
	) -> Result<SubmissionResult> {
		let token = self
			.session
			.token()
			.filter(|token| !token.is_empty())
			.ok_or(Error::NotAuthenticated)?;
		let Some(_permit) = self.limiter.try_permit() else {
			#[cfg(feature = "tracing")]
			tracing::debug!(
				capacity = self.limiter.capacity(),
				"request quota exhausted; submission rejected locally"
			);

			return Err(Error::RateLimited);
		};
		let request = SubmissionRequest {
			format: document.format,
			payload_base64: document.content_base64,
			product_group,
			signature_base64: signature,
			document_type: document.document_type,
		};
		let body = serde_json::to_vec(&request).map_err(|source| Error::Encode { source })?;
		let url = self.endpoints.create_document_for(product_group);

		self.executor
			.execute(ApiRequest::post(url, body).with_bearer(token))
			.await
			.map_err(|e| e.into_submission_error())
	}
}
