// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use crpt_api::{
	_preludet::*,
	auth::{SignerError, TokenSecret},
};

fn signer(data: &str) -> std::result::Result<String, SignerError> {
	Ok(format!("signed:{data}"))
}

#[tokio::test]
async fn authenticate_stores_token_after_exchange() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 5);
	let challenge = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"uuid\":\"uuid-1\",\"data\":\"challenge-1\"}");
		})
		.await;
	let exchange = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/cert/")
				.json_body(json!({ "uuid": "uuid-1", "data": "signed:challenge-1" }));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token\":\"token-1\"}");
		})
		.await;

	assert!(!client.session().is_authenticated());

	let token = client.authenticate(&signer).await.expect("Authentication should succeed.");

	assert_eq!(token.expose(), "token-1");
	assert_eq!(
		client.session().token().as_ref().map(TokenSecret::expose),
		Some("token-1"),
		"Session must hold the freshly issued token."
	);

	challenge.assert_async().await;
	exchange.assert_async().await;
}

#[tokio::test]
async fn challenge_error_maps_to_authentication_failed() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 5);
	let challenge = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error_message\":\"certificate unknown\"}");
		})
		.await;
	let exchange = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/cert/");
			then.status(200).body("{\"token\":\"never\"}");
		})
		.await;
	let err = client.authenticate(&signer).await.expect_err("Challenge failure must surface.");

	match err {
		Error::AuthenticationFailed { status, message } => {
			assert_eq!(status, Some(401));
			assert_eq!(message, "certificate unknown");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	challenge.assert_async().await;
	exchange.assert_calls_async(0).await;

	assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn token_envelope_without_token_fails() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 5);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(200).body("{\"uuid\":\"uuid-2\",\"data\":\"challenge-2\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/cert/");
			then.status(200).body(concat!(
				"{\"code\":\"4\",\"error_message\":\"signature rejected\",",
				"\"description\":\"check the certificate chain\"}",
			));
		})
		.await;

	let err = client.authenticate(&signer).await.expect_err("Envelope without token must fail.");

	assert!(matches!(
		err,
		Error::AuthenticationFailed { status: None, ref message } if message == "signature rejected"
	));
	assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn signer_failure_skips_exchange() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 5);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(200).body("{\"uuid\":\"uuid-3\",\"data\":\"challenge-3\"}");
		})
		.await;

	let exchange = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/cert/");
			then.status(200).body("{\"token\":\"never\"}");
		})
		.await;
	let broken = |_: &str| Err::<String, _>("hardware token not inserted");
	let err = client.authenticate(&broken).await.expect_err("Signer failure must surface.");

	assert!(matches!(err, Error::Signing(_)));

	exchange.assert_calls_async(0).await;
}

#[tokio::test]
async fn failed_reauthentication_keeps_previous_token() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 5);

	client.session().set_token(TokenSecret::new("token-old"));
	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(503).body("{\"error_message\":\"maintenance\"}");
		})
		.await;

	let err = client.authenticate(&signer).await.expect_err("Outage must surface.");

	assert!(err.is_retryable());
	assert_eq!(client.session().token().as_ref().map(TokenSecret::expose), Some("token-old"));
}

#[tokio::test]
async fn authentication_ignores_submission_quota() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url(), 1);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/cert/key");
			then.status(200).body("{\"uuid\":\"uuid-4\",\"data\":\"challenge-4\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/cert/");
			then.status(200).body("{\"token\":\"token-4\"}");
		})
		.await;

	assert!(client.limiter().acquire(), "Test should drain the single permit.");

	let token = client
		.authenticate(&signer)
		.await
		.expect("Authentication must not consume submission permits.");

	assert_eq!(token.expose(), "token-4");
	assert_eq!(client.limiter().available(), 0);
}
