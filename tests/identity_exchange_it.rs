#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use clef_api::{
	client::ReqwestClefClient,
	config::ClefConfig,
	error::{CONNECTION_MESSAGE, Error, ErrorKind},
	provider::{INVALID_TOKEN_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE},
};

const APP_ID: &str = "4f318ac177a9391c2e0d221203725ffd";
const APP_SECRET: &str = "2125d80f4583c52c46f8084bcc030c9b";
const CODE: &str = "code_1234567890";

fn build_client(server: &MockServer) -> ReqwestClefClient {
	ReqwestClefClient::new(ClefConfig::new(APP_ID, APP_SECRET).with_root(server.url("/api")))
		.expect("Client should build against the mock server.")
}

#[tokio::test]
async fn handshake_returns_info_object() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let authorize = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v1/authorize")
				.header("content-type", "application/x-www-form-urlencoded")
				.body(format!("code={CODE}&app_id={APP_ID}&app_secret={APP_SECRET}"));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "access_token": "tok" }));
		})
		.await;
	let info = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/info").query_param("access_token", "tok");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": true,
				"info": { "id": "12345", "first_name": "Alex" },
			}));
		})
		.await;
	let identity =
		client.exchange_code_for_identity(CODE).await.expect("Handshake should succeed.");

	authorize.assert_calls_async(1).await;
	info.assert_calls_async(1).await;

	assert_eq!(
		serde_json::Value::Object(identity.into_inner()),
		json!({ "id": "12345", "first_name": "Alex" })
	);
}

#[tokio::test]
async fn invalid_code_never_reaches_info() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let authorize = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/authorize");
			then.status(403)
				.header("content-type", "application/json")
				.json_body(json!({ "error": "Invalid OAuth Code." }));
		})
		.await;
	let info = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/info");
			then.status(200).json_body(json!({ "info": {} }));
		})
		.await;
	let err = client
		.exchange_code_for_identity(CODE)
		.await
		.expect_err("Invalid OAuth code should surface.");

	assert!(matches!(
		err,
		Error::InvalidOAuthCode { ref message } if message == "Invalid OAuth Code."
	));

	authorize.assert_calls_async(1).await;
	info.assert_calls_async(0).await;
}

#[tokio::test]
async fn credential_errors_are_distinguished() {
	for (message, kind) in [
		("Invalid App ID.", ErrorKind::InvalidAppId),
		("Invalid App Secret.", ErrorKind::InvalidAppSecret),
		("Invalid App.", ErrorKind::InvalidApp),
	] {
		let server = MockServer::start_async().await;
		let client = build_client(&server);
		let authorize = server
			.mock_async(|when, then| {
				when.method(POST).path("/api/v1/authorize");
				then.status(403).json_body(json!({ "error": message }));
			})
			.await;
		let err = client
			.exchange_code_for_identity(CODE)
			.await
			.expect_err("Credential problems should surface.");

		assert_eq!(err.kind(), kind, "message: {message}");
		assert_eq!(err.message(), Some(message));

		authorize.assert_calls_async(1).await;
	}
}

#[tokio::test]
async fn invalid_token_message_is_replaced() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let info = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/info").query_param("access_token", "token_1234567890");
			then.status(403).json_body(json!({ "error": "Invalid token." }));
		})
		.await;
	let err = client
		.lookup_identity_by_token("token_1234567890")
		.await
		.expect_err("Invalid token should surface.");

	assert_eq!(err.kind(), ErrorKind::InvalidOAuthToken);
	assert_eq!(err.to_string(), INVALID_TOKEN_MESSAGE);

	info.assert_async().await;
}

#[tokio::test]
async fn server_and_routing_failures_use_fixed_messages() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let authorize = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/authorize");
			then.status(500).body("<html>oops</html>");
		})
		.await;
	let err = client.exchange_code_for_identity(CODE).await.expect_err("HTTP 500 should fail.");

	assert_eq!(err.kind(), ErrorKind::Server);
	assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);

	authorize.assert_async().await;

	// Nothing is mounted under this root, so the mock server answers 404.
	let misrouted =
		ReqwestClefClient::new(ClefConfig::new(APP_ID, APP_SECRET).with_root(server.url("/wrong")))
			.expect("Client should build against the mock server.");
	let err = misrouted
		.lookup_identity_by_token("tok")
		.await
		.expect_err("Unmounted endpoint should fail.");

	assert_eq!(err.kind(), ErrorKind::NotFound);
	assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn unreachable_root_is_a_connection_error() {
	let port = std::net::TcpListener::bind("127.0.0.1:0")
		.and_then(|listener| listener.local_addr())
		.expect("Ephemeral port should be available.")
		.port();
	let client = ReqwestClefClient::new(
		ClefConfig::new(APP_ID, APP_SECRET).with_root(format!("http://127.0.0.1:{port}/api")),
	)
	.expect("Client should build against a closed port.");
	let err = client
		.exchange_code_for_identity(CODE)
		.await
		.expect_err("Closed port should fail at the transport.");

	assert!(matches!(err, Error::Connection(_)));
	assert_eq!(err.to_string(), CONNECTION_MESSAGE);
}
