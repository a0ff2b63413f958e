// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::macros::date;
// self
use crpt_api::{
	_preludet::*,
	auth::TokenSecret,
	client::ReqwestCrptClient,
	model::{Document, DocumentFormat, DocumentType, Product, ProductGroup},
	submit::DocumentPayload,
};

const CREATE_PATH: &str = "/lk/documents/create";

fn authenticated_client(server: &MockServer, request_limit: u32) -> ReqwestCrptClient {
	let client = build_reqwest_test_client(&server.base_url(), request_limit);

	client.session().set_token(TokenSecret::new("token-1"));

	client
}

#[tokio::test]
async fn submit_returns_document_id() {
	let server = MockServer::start_async().await;
	let client = authenticated_client(&server, 3);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(CREATE_PATH)
				.query_param("pg", "milk")
				.header("authorization", "Bearer token-1")
				.json_body(json!({
					"document_format": "MANUAL",
					"product_document": "eyJ9",
					"product_group": "milk",
					"signature": "c2ln",
					"type": "LP_INTRODUCE_GOODS",
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"document_id\":\"doc-1\",\"status\":\"ACCEPTED\"}");
		})
		.await;
	let result = client
		.create_document(
			DocumentFormat::Manual,
			"eyJ9",
			"c2ln",
			DocumentType::LpIntroduceGoods,
			ProductGroup::Milk,
		)
		.await
		.expect("Submission should succeed.");

	assert_eq!(result.document_id, "doc-1");
	assert_eq!(result.status, "ACCEPTED");
	assert_eq!(client.limiter().available(), 3, "Permit must be returned after completion.");
	assert_eq!(client.metrics().attempts(), 1);
	assert_eq!(client.metrics().successes(), 1);

	mock.assert_async().await;
}

#[tokio::test]
async fn rejected_submission_surfaces_status_and_message() {
	let server = MockServer::start_async().await;
	let client = authenticated_client(&server, 3);

	server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH);
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"error_message\":\"forbidden\"}");
		})
		.await;

	let payload = DocumentPayload::new(DocumentFormat::Xml, DocumentType::LpShipGoods, "PHhtbC8+");
	let err = client
		.submit(payload, "c2ln", ProductGroup::Shoes)
		.await
		.expect_err("Forbidden submission must fail.");

	match err {
		Error::SubmissionRejected { status, ref message } => {
			assert_eq!(status, 403);
			assert_eq!(message, "forbidden");
		},
		ref other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(!err.is_retryable());
	assert_eq!(client.limiter().available(), 3);
	assert_eq!(client.metrics().failures(), 1);
}

#[tokio::test]
async fn server_errors_are_retryable_rejections() {
	let server = MockServer::start_async().await;
	let client = authenticated_client(&server, 1);

	server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH);
			then.status(502).body("{\"description\":\"upstream unavailable\"}");
		})
		.await;

	let payload = DocumentPayload::new(DocumentFormat::Csv, DocumentType::LpAcceptGoods, "YSxi");
	let err = client
		.submit(payload, "c2ln", ProductGroup::Electronics)
		.await
		.expect_err("Upstream failure must surface.");

	assert!(matches!(
		err,
		Error::SubmissionRejected { status: 502, ref message } if message == "upstream unavailable"
	));
	assert!(err.is_retryable());
	assert_eq!(client.limiter().available(), 1);
}

#[tokio::test]
async fn unauthenticated_submission_never_touches_quota_or_network() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 2);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH);
			then.status(200).body("{\"document_id\":\"never\",\"status\":\"ACCEPTED\"}");
		})
		.await;
	let payload =
		DocumentPayload::new(DocumentFormat::Manual, DocumentType::LpIntroduceGoods, "e30=");
	let err = client
		.submit(payload, "c2ln", ProductGroup::Tobacco)
		.await
		.expect_err("Submission without a token must fail.");

	assert!(matches!(err, Error::NotAuthenticated));
	assert_eq!(client.limiter().available(), 2);
	assert_eq!(client.metrics().failures(), 1);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn exhausted_window_rejects_locally() {
	let server = MockServer::start_async().await;
	let client = authenticated_client(&server, 1);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH);
			then.status(200).body("{\"document_id\":\"never\",\"status\":\"ACCEPTED\"}");
		})
		.await;

	assert!(client.limiter().acquire(), "Test should drain the single permit.");

	let payload =
		DocumentPayload::new(DocumentFormat::Manual, DocumentType::LpIntroduceGoods, "e30=");
	let err = client
		.submit(payload, "c2ln", ProductGroup::Perfumery)
		.await
		.expect_err("Exhausted window must reject.");

	assert!(matches!(err, Error::RateLimited));
	assert!(err.is_retryable());
	assert_eq!(client.limiter().available(), 0, "Rejected calls must not release a permit.");
	assert_eq!(client.metrics().throttled(), 1);
	assert_eq!(client.metrics().failures(), 0, "Local throttling is not a failure.");

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn introduce_goods_document_is_encoded_for_the_wire() {
	let server = MockServer::start_async().await;
	let client = authenticated_client(&server, 2);
	let document = Document::introduce_goods(
		"doc-7",
		"7700000000",
		"7700000001",
		"7700000002",
		"OWN_PRODUCTION",
		date!(2024 - 05 - 01),
		"reg-9",
		date!(2024 - 05 - 02),
	)
	.with_product(Product::with_uit(
		"0104600000000001",
		"6401",
		"7700000001",
		"7700000002",
		date!(2024 - 04 - 30),
	));
	let expected =
		DocumentPayload::introduce_goods(&document).expect("Document should encode for the wire.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(CREATE_PATH)
				.query_param("pg", "clothes")
				.json_body(json!({
					"document_format": "MANUAL",
					"product_document": expected.content_base64,
					"product_group": "clothes",
					"signature": "c2ln",
					"type": "LP_INTRODUCE_GOODS",
				}));
			then.status(200).body("{\"document_id\":\"doc-7\",\"status\":\"IN_PROGRESS\"}");
		})
		.await;
	let result = client
		.create_introduce_goods_document(&document, "c2ln", ProductGroup::Clothes)
		.await
		.expect("Introduce-goods submission should succeed.");

	assert_eq!(result.document_id, "doc-7");
	assert_eq!(result.status, "IN_PROGRESS");

	mock.assert_async().await;
}

#[tokio::test]
async fn authenticated_flow_sends_issued_token() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 2);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(200).body("{\"uuid\":\"uuid-9\",\"data\":\"challenge-9\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/cert/");
			then.status(200).body("{\"token\":\"token-9\"}");
		})
		.await;

	let submission = server
		.mock_async(|when, then| {
			when.method(POST).path(CREATE_PATH).header("authorization", "Bearer token-9");
			then.status(200).body("{\"document_id\":\"doc-9\",\"status\":\"IN_PROGRESS\"}");
		})
		.await;
	let signer = |data: &str| Ok::<_, std::io::Error>(format!("signed:{data}"));

	client.authenticate(&signer).await.expect("Authentication should succeed.");

	let result = client
		.create_document(
			DocumentFormat::Manual,
			"e30=",
			"c2ln",
			DocumentType::LpIntroduceGoods,
			ProductGroup::Tires,
		)
		.await
		.expect("Submission should succeed.");

	assert_eq!(result.document_id, "doc-9");

	submission.assert_async().await;
}
