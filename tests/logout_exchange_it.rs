#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use clef_api::{
	client::ReqwestClefClient,
	config::ClefConfig,
	error::{Error, ErrorKind},
	provider::DEFAULT_LOGOUT_TOKEN_MESSAGE,
};

const APP_ID: &str = "logout-app";
const APP_SECRET: &str = "logout-secret";

fn build_client(server: &MockServer) -> ReqwestClefClient {
	ReqwestClefClient::new(ClefConfig::new(APP_ID, APP_SECRET).with_root(server.url("/api/")))
		.expect("Client should build against the mock server.")
}

#[tokio::test]
async fn logout_token_exchanges_for_clef_id() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let logout = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v1/logout")
				.body(format!("logout_token=t&app_id={APP_ID}&app_secret={APP_SECRET}"));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "clef_id": "12345" }));
		})
		.await;
	let clef_id = client.exchange_logout_token("t").await.expect("Logout should succeed.");

	assert_eq!(clef_id.as_str(), "12345");

	logout.assert_calls_async(1).await;
}

#[tokio::test]
async fn logout_bad_request_defaults_to_invalid_logout_token() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/logout");
			then.status(400).body("");
		})
		.await;
	let err = client.exchange_logout_token("expired").await.expect_err("Logout should fail.");

	assert!(matches!(
		err,
		Error::InvalidLogoutToken { ref message } if message == DEFAULT_LOGOUT_TOKEN_MESSAGE
	));

	logout.assert_calls_async(1).await;
}

#[tokio::test]
async fn logout_unknown_bad_request_message_keeps_provider_text() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/logout");
			then.status(400).json_body(json!({ "error": "Logout token already used." }));
		})
		.await;
	let err = client.exchange_logout_token("reused").await.expect_err("Logout should fail.");

	assert_eq!(err.kind(), ErrorKind::InvalidLogoutToken);
	assert_eq!(err.message(), Some("Logout token already used."));

	logout.assert_async().await;
}

#[tokio::test]
async fn logout_unexpected_status_is_generic() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/logout");
			then.status(503).json_body(json!({ "error": "Invalid Logout Token." }));
		})
		.await;
	let err = client.exchange_logout_token("t").await.expect_err("Logout should fail.");

	assert!(matches!(err, Error::Api { status: Some(503), message: None }));

	logout.assert_async().await;
}
