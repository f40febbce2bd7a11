//! Async client for the Clef API: exchange OAuth codes for user identities, turn remote-logout
//! tokens into Clef user ids, and get every provider failure back as a precise error kind.
//!
//! ```no_run
//! # async fn callback(code: &str) -> clef_api::error::Result<()> {
//! use clef_api::{client::ClefClient, config::ClefConfig};
//!
//! let client = ClefClient::new(ClefConfig::new("app-id", "app-secret"))?;
//! let identity = client.exchange_code_for_identity(code).await?;
//!
//! println!("Welcome back, {}.", identity.first_name().unwrap_or("friend"));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and an in-memory transport for tests; enabled via `cfg(test)` or
	//! the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::{BTreeMap, VecDeque};
	// crates.io
	use oauth2::{HttpClientError, HttpRequest, HttpResponse, http::StatusCode};
	use parking_lot::Mutex;
	// self
	use crate::http::{ApiHttpClient, HttpFuture};

	/// Request captured by [`RecordingHttpClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method token (`GET`, `POST`).
		pub method: String,
		/// Full request URL, query string included.
		pub url: Url,
		/// Raw request body.
		pub body: Vec<u8>,
	}
	impl RecordedRequest {
		/// Decodes the parameters from the query string (GET) or the form body (POST).
		pub fn params(&self) -> BTreeMap<String, String> {
			if self.method == "GET" {
				self.url.query_pairs().into_owned().collect()
			} else {
				url::form_urlencoded::parse(&self.body).into_owned().collect()
			}
		}
	}

	enum Scripted {
		Respond { status: u16, body: Vec<u8> },
		Fail(String),
	}

	/// Transport that replays scripted responses in FIFO order and records every request.
	///
	/// Once the script is exhausted, further requests fail with a transport error.
	#[derive(Default)]
	pub struct RecordingHttpClient {
		script: Mutex<VecDeque<Scripted>>,
		requests: Mutex<Vec<RecordedRequest>>,
	}
	impl RecordingHttpClient {
		/// Queues a response with a JSON body.
		pub fn respond_json(self, status: u16, body: Value) -> Self {
			self.respond_raw(status, body.to_string())
		}

		/// Queues a response with an arbitrary body.
		pub fn respond_raw(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
			self.script.lock().push_back(Scripted::Respond { status, body: body.into() });

			self
		}

		/// Queues a transport failure.
		pub fn fail(self, message: impl Into<String>) -> Self {
			self.script.lock().push_back(Scripted::Fail(message.into()));

			self
		}

		/// Returns every request seen so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}
	}
	impl ApiHttpClient for RecordingHttpClient {
		type TransportError = std::io::Error;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			let recorded = RecordedRequest {
				method: request.method().as_str().to_owned(),
				url: Url::parse(&request.uri().to_string())
					.expect("Recorded request URI should be absolute."),
				body: request.body().clone(),
			};

			self.requests.lock().push(recorded);

			let next = self.script.lock().pop_front();

			Box::pin(async move {
				match next {
					Some(Scripted::Respond { status, body }) => {
						let mut response = HttpResponse::new(body);

						*response.status_mut() = StatusCode::from_u16(status)
							.expect("Scripted status should be a valid HTTP status.");

						Ok(response)
					},
					Some(Scripted::Fail(message)) =>
						Err(HttpClientError::Io(std::io::Error::other(message))),
					None => Err(HttpClientError::Other("No scripted response left.".into())),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use {oauth2, url};
#[cfg(test)] use {color_eyre as _, httpmock as _};
