//! Transport primitives for Clef API calls.
//!
//! The client depends on a single capability, [`ApiHttpClient::execute`]: send one
//! [`HttpRequest`] and return the [`HttpResponse`] (any status) or a transport failure. Request
//! and response types are the `http` crate types re-exported by [`oauth2`], and failures use
//! [`HttpClientError`], so custom transports plug in the same way they would for `oauth2`.

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderValue, Request, header::CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'c, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'c + Send>>;

/// Abstraction over HTTP transports capable of executing Clef API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients and
/// tasks. They perform exactly one attempt per call and return non-2xx responses as `Ok`;
/// classification happens in the client.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves to the raw response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// HTTP verbs used by the Clef API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel as an `application/x-www-form-urlencoded` body.
	Post,
}
impl HttpMethod {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Builds the request for `method` against `url`, serializing `params` per the method.
pub fn build_request(
	method: HttpMethod,
	url: &Url,
	params: &[(&str, &str)],
) -> Result<HttpRequest, ConfigError> {
	let request = match method {
		HttpMethod::Get => {
			let mut url = url.clone();

			url.query_pairs_mut().extend_pairs(params);

			Request::get(url.as_str()).body(Vec::new())?
		},
		HttpMethod::Post => {
			let body = url::form_urlencoded::Serializer::new(String::new())
				.extend_pairs(params)
				.finish();

			Request::post(url.as_str())
				.header(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"))
				.body(body.into_bytes())?
		},
	};

	Ok(request)
}

/// Normalizes a transport failure into the crate error taxonomy.
///
/// Network and IO failures become [`Error::Connection`]; a request the transport could not
/// even encode is a local [`ConfigError`].
pub fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized transport failure".into() }.into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure timeouts, proxies, or redirect policy on the wrapped client; the Clef client
/// itself sets none of them.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client from a reqwest builder, surfacing builder failures as [`ConfigError`].
	pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, ConfigError> {
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
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ErrorKind;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn get_params_go_in_query_string() {
		let request = build_request(
			HttpMethod::Get,
			&url("https://clef.io/api/v1/info"),
			&[("access_token", "tok en")],
		)
		.expect("GET request should build.");

		assert_eq!(request.method(), oauth2::http::Method::GET);
		assert_eq!(request.uri(), "https://clef.io/api/v1/info?access_token=tok+en");
		assert!(request.body().is_empty());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
	}

	#[test]
	fn post_params_are_form_encoded() {
		let request = build_request(
			HttpMethod::Post,
			&url("https://clef.io/api/v1/logout"),
			&[("logout_token", "t"), ("app_id", "id&1"), ("app_secret", "")],
		)
		.expect("POST request should build.");

		assert_eq!(request.method(), oauth2::http::Method::POST);
		assert_eq!(request.uri(), "https://clef.io/api/v1/logout");
		assert_eq!(request.body().as_slice(), b"logout_token=t&app_id=id%261&app_secret=");
		assert_eq!(
			request.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
			Some("application/x-www-form-urlencoded")
		);
	}

	#[test]
	fn transport_failures_normalize_to_connection() {
		let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
		let mapped = map_transport_error::<std::io::Error>(HttpClientError::Io(io));
		let boxed = map_transport_error(HttpClientError::Reqwest(Box::new(std::io::Error::other(
			"dns failure",
		))));
		let other = map_transport_error::<std::io::Error>(HttpClientError::Other("boom".into()));

		assert_eq!(mapped.kind(), ErrorKind::Connection);
		assert_eq!(boxed.kind(), ErrorKind::Connection);
		assert_eq!(other.kind(), ErrorKind::Connection);
	}
}
