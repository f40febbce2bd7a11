//! The Clef API client and the invoke-and-classify path shared by every operation.
//!
//! Operations live in submodules (`identity`, `logout`) as further `impl` blocks on
//! [`ClefClient`]; each builds its parameters and goes through [`ClefClient::call`], which sends
//! exactly one request, classifies the response, and records the outcome.

mod identity;
mod logout;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::{ClefConfig, Credentials},
	http::{self, ApiHttpClient, HttpMethod},
	obs::{self, CallKind, CallOutcome, CallSpan},
	provider::{self, Endpoints, JsonObject, ProviderResponse},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestClefClient = ClefClient<ReqwestHttpClient>;

/// Client for the Clef API.
///
/// The client is immutable after construction: credentials and endpoints are fixed, and the
/// transport is shared behind an [`Arc`]. Clones are cheap and may be used from many tasks at
/// once. Hosts construct one value at startup and keep it in their own application state.
pub struct ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	credentials: Credentials,
	endpoints: Endpoints,
}
impl<C> ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that sends every request through `http_client`.
	pub fn with_http_client(config: ClefConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let endpoints = config.endpoints()?;

		Ok(Self { http_client: http_client.into(), credentials: config.credentials, endpoints })
	}

	/// Application credentials sent with authorize and logout calls.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Endpoint set derived at construction.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Transport used for every call.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Sends one request and classifies the response.
	///
	/// This is the only path to the transport; transport failures, non-200 responses, and
	/// unreadable payloads all surface as [`Error`] without retries.
	pub(crate) async fn call(
		&self,
		kind: CallKind,
		stage: &'static str,
		method: HttpMethod,
		url: &Url,
		params: &[(&str, &str)],
	) -> Result<JsonObject> {
		let span = CallSpan::new(kind, stage);
		let mut status = None;

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = http::build_request(method, url, params)?;
				let response =
					self.http_client.execute(request).await.map_err(http::map_transport_error)?;
				let response = ProviderResponse::from_http(&response);

				status = Some(response.status);

				provider::classify(response)
			})
			.await;

		match &result {
			Ok(_) => {
				obs::record_call_outcome(kind, CallOutcome::Success);
				obs::trace_call_success(kind);
			},
			Err(e) => {
				obs::record_call_outcome(kind, CallOutcome::Failure);
				obs::trace_call_failure(kind, e.kind(), status);
			},
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl ClefClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClefConfig) -> Result<Self> {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			credentials: self.credentials.clone(),
			endpoints: self.endpoints.clone(),
		}
	}
}
impl<C> Debug for ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClefClient")
			.field("app_id", &self.credentials.app_id)
			.field("app_secret_set", &!self.credentials.app_secret.is_empty())
			.field("api", &self.endpoints.api.as_str())
			.finish()
	}
}

/// Decodes a success payload into `T`, reporting the failing path on mismatch.
fn decode_payload<T>(payload: JsonObject) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(Value::Object(payload)).map_err(|e| {
		Error::malformed_payload(format_args!(
			"a payload that could not be decoded at `{}`: {}",
			e.path(),
			e.inner()
		))
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::RecordingHttpClient, error::ErrorKind};

	fn client(transport: RecordingHttpClient) -> ClefClient<RecordingHttpClient> {
		ClefClient::with_http_client(ClefConfig::new("fake_id", "fake_secret"), transport)
			.expect("Client should build with the default root.")
	}

	#[tokio::test]
	async fn call_returns_classified_payload() {
		let client = client(RecordingHttpClient::default().respond_json(200, serde_json::json!({
			"success": true,
		})));
		let info = client.endpoints().info.clone();
		let payload = client
			.call(CallKind::Info, "test", HttpMethod::Get, &info, &[("access_token", "tok")])
			.await
			.expect("HTTP 200 should succeed.");

		assert_eq!(payload.get("success"), Some(&Value::Bool(true)));

		let requests = client.http_client().requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, "GET");
		assert_eq!(requests[0].url.as_str(), "https://clef.io/api/v1/info?access_token=tok");
	}

	#[tokio::test]
	async fn call_normalizes_transport_failure() {
		let client = client(RecordingHttpClient::default().fail("connection refused"));
		let logout = client.endpoints().logout.clone();
		let err = client
			.call(CallKind::Logout, "test", HttpMethod::Post, &logout, &[])
			.await
			.expect_err("Transport failure should surface.");

		assert_eq!(err.kind(), ErrorKind::Connection);
	}

	#[test]
	fn decode_payload_reports_missing_field() {
		#[derive(Debug, Deserialize)]
		struct Needs {
			#[allow(dead_code)]
			info: JsonObject,
		}

		let err =
			decode_payload::<Needs>(JsonObject::new()).expect_err("Missing field should fail.");

		assert!(matches!(err, Error::Api { status: Some(200), .. }));
		assert!(err.to_string().contains("info"), "unexpected message: {err}");
	}

	#[test]
	fn debug_output_hides_secret() {
		let client = client(RecordingHttpClient::default());
		let rendered = format!("{client:?}");

		assert!(rendered.contains("fake_id"));
		assert!(!rendered.contains("fake_secret"));
	}

	#[test]
	fn invalid_root_fails_construction() {
		let config = ClefConfig::new("id", "secret").with_root("not a url");
		let err = ClefClient::<RecordingHttpClient>::with_http_client(
			config,
			RecordingHttpClient::default(),
		)
		.expect_err("Invalid root should be rejected.");

		assert_eq!(err.kind(), ErrorKind::Config);
	}
}
