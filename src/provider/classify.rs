//! Response classification: HTTP status + `error` message → payload or [`Error`].
//!
//! Clef reuses status codes across unrelated failures (credential problems and OAuth-code
//! problems are both 403), so only the exact `error` string disambiguates them. The lookup is
//! restricted to the status a message is documented under, and each status has its own
//! fallback when the message is unknown or missing:
//!
//! | status | known message            | unknown / absent message |
//! |--------|--------------------------|--------------------------|
//! | 200    | -                        | payload returned as-is   |
//! | 500    | -                        | [`Error::Server`]        |
//! | 403    | matching 403 kind        | [`Error::Api`]           |
//! | 400    | matching 400 kind        | [`Error::InvalidLogoutToken`] |
//! | 404    | -                        | [`Error::NotFound`]      |
//! | other  | -                        | [`Error::Api`]           |

// crates.io
use oauth2::HttpResponse;
// self
use crate::{_prelude::*, provider::JsonObject};

/// Message attached to [`Error::Server`].
pub const SERVER_ERROR_MESSAGE: &str = "Clef servers are down.";
/// Message attached to [`Error::NotFound`].
pub const NOT_FOUND_MESSAGE: &str =
	"Unable to retrieve the page. Are you sure the Clef API endpoint is configured right?";
/// Message attached to [`Error::InvalidOAuthToken`] in place of Clef's own wording.
pub const INVALID_TOKEN_MESSAGE: &str =
	"Something went wrong at Clef. Unable to retrieve user information with this token.";
/// Message attached to [`Error::InvalidLogoutToken`] when a 400 response carries no message.
pub const DEFAULT_LOGOUT_TOKEN_MESSAGE: &str = "Invalid Logout Token.";

/// Status code and decoded body of a single Clef response.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// Decoded JSON body; `None` when the body was empty or not JSON.
	pub body: Option<Value>,
}
impl ProviderResponse {
	/// Creates a response from an already-decoded body.
	pub fn new(status: u16, body: Option<Value>) -> Self {
		Self { status, body }
	}

	/// Decodes `bytes` leniently: anything that is not valid JSON becomes an absent body.
	pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
		Self::new(status, serde_json::from_slice(bytes).ok())
	}

	/// Builds a response from a transport-level [`HttpResponse`].
	pub fn from_http(response: &HttpResponse) -> Self {
		Self::from_bytes(response.status().as_u16(), response.body())
	}

	/// Returns the provider's `error` field when it is a string.
	pub fn error_message(&self) -> Option<&str> {
		self.body.as_ref()?.get("error")?.as_str()
	}
}

/// Exact `error` strings Clef is known to return, each tied to one [`Error`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderMessage {
	/// `Invalid App ID.`
	InvalidAppId,
	/// `Invalid App Secret.`
	InvalidAppSecret,
	/// `Invalid App.`
	InvalidApp,
	/// `Invalid OAuth Code.`
	InvalidOAuthCode,
	/// `Invalid token.`
	InvalidToken,
	/// `Invalid logout hook URL.`
	InvalidLogoutHookUrl,
	/// `Invalid Logout Token.`
	InvalidLogoutToken,
}
impl ProviderMessage {
	/// Every known message, in table order.
	pub const ALL: [Self; 7] = [
		Self::InvalidAppId,
		Self::InvalidAppSecret,
		Self::InvalidApp,
		Self::InvalidOAuthCode,
		Self::InvalidToken,
		Self::InvalidLogoutHookUrl,
		Self::InvalidLogoutToken,
	];

	/// Returns the exact wire string.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InvalidAppId => "Invalid App ID.",
			Self::InvalidAppSecret => "Invalid App Secret.",
			Self::InvalidApp => "Invalid App.",
			Self::InvalidOAuthCode => "Invalid OAuth Code.",
			Self::InvalidToken => "Invalid token.",
			Self::InvalidLogoutHookUrl => "Invalid logout hook URL.",
			Self::InvalidLogoutToken => "Invalid Logout Token.",
		}
	}

	/// HTTP status the message is eligible under.
	pub const fn status(self) -> u16 {
		match self {
			Self::InvalidLogoutHookUrl | Self::InvalidLogoutToken => 400,
			_ => 403,
		}
	}

	/// Matches `message` exactly (case and punctuation included).
	pub fn parse(message: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|known| known.as_str() == message)
	}

	/// Matches `message` among the messages eligible under `status`.
	pub fn lookup(status: u16, message: &str) -> Option<Self> {
		Self::parse(message).filter(|known| known.status() == status)
	}

	/// Converts the message into its error variant.
	///
	/// The token message is replaced with [`INVALID_TOKEN_MESSAGE`]; every other variant keeps
	/// the provider's wording.
	pub fn into_error(self) -> Error {
		let message = self.as_str().to_owned();

		match self {
			Self::InvalidAppId => Error::InvalidAppId { message },
			Self::InvalidAppSecret => Error::InvalidAppSecret { message },
			Self::InvalidApp => Error::InvalidApp { message },
			Self::InvalidOAuthCode => Error::InvalidOAuthCode { message },
			Self::InvalidToken => Error::InvalidOAuthToken { message: INVALID_TOKEN_MESSAGE.into() },
			Self::InvalidLogoutHookUrl => Error::InvalidLogoutHookUrl { message },
			Self::InvalidLogoutToken => Error::InvalidLogoutToken { message },
		}
	}
}
impl Display for ProviderMessage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classifies a provider response.
///
/// Returns the decoded JSON object for HTTP 200 and the matching [`Error`] otherwise. Pure and
/// synchronous; callers decide what to do with the outcome.
pub fn classify(response: ProviderResponse) -> Result<JsonObject> {
	match response.status {
		200 => match response.body {
			Some(Value::Object(payload)) => Ok(payload),
			Some(_) => Err(Error::malformed_payload("a success payload that is not a JSON object")),
			None => Err(Error::malformed_payload("an empty or non-JSON success payload")),
		},
		500 => Err(Error::Server { message: SERVER_ERROR_MESSAGE.into() }),
		403 => Err(classify_forbidden(response.error_message())),
		400 => Err(classify_bad_request(response.error_message())),
		404 => Err(Error::NotFound { message: NOT_FOUND_MESSAGE.into() }),
		status => Err(Error::Api { status: Some(status), message: None }),
	}
}

fn classify_forbidden(message: Option<&str>) -> Error {
	match message.and_then(|text| ProviderMessage::lookup(403, text)) {
		Some(known) => known.into_error(),
		None => Error::Api { status: Some(403), message: message.map(ToOwned::to_owned) },
	}
}

fn classify_bad_request(message: Option<&str>) -> Error {
	match message.and_then(|text| ProviderMessage::lookup(400, text)) {
		Some(known) => known.into_error(),
		None => Error::InvalidLogoutToken {
			message: message.unwrap_or(DEFAULT_LOGOUT_TOKEN_MESSAGE).to_owned(),
		},
	}
}
