//! Client-level error types covering provider rejections, transport failures, and local setup.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message attached to every [`Error::Connection`].
pub const CONNECTION_MESSAGE: &str =
	"Clef encountered a network connectivity problem. Are you sure you are connected to the Internet?";

/// Canonical error exposed by every public operation.
///
/// Each variant corresponds to exactly one [`ErrorKind`]. Provider-originated variants keep
/// the message Clef returned (or the fixed wording the classifier substitutes) so hosts can
/// surface it without re-deriving anything from the HTTP response.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Clef does not recognize the application identifier.
	#[error("{message}")]
	InvalidAppId {
		/// Provider-supplied message.
		message: String,
	},
	/// Clef rejected the application secret.
	#[error("{message}")]
	InvalidAppSecret {
		/// Provider-supplied message.
		message: String,
	},
	/// The application itself is not usable (disabled, misconfigured, ...).
	#[error("{message}")]
	InvalidApp {
		/// Provider-supplied message.
		message: String,
	},
	/// The authorization code is unknown, expired, or already redeemed.
	#[error("{message}")]
	InvalidOAuthCode {
		/// Provider-supplied message.
		message: String,
	},
	/// The access token cannot be used to read user information.
	#[error("{message}")]
	InvalidOAuthToken {
		/// Fixed explanatory message; the provider's own wording is discarded.
		message: String,
	},
	/// The logout hook URL registered for the application is invalid.
	#[error("{message}")]
	InvalidLogoutHookUrl {
		/// Provider-supplied message.
		message: String,
	},
	/// The logout token posted to the webhook could not be exchanged.
	#[error("{message}")]
	InvalidLogoutToken {
		/// Provider-supplied message, or the default wording when Clef sent none.
		message: String,
	},
	/// Clef answered with HTTP 500.
	#[error("{message}")]
	Server {
		/// Fixed message describing the outage.
		message: String,
	},
	/// Clef answered with HTTP 404, usually a misconfigured root URL.
	#[error("{message}")]
	NotFound {
		/// Fixed message pointing at the endpoint configuration.
		message: String,
	},
	/// Transport failure (DNS, TCP, TLS, IO) before any HTTP status was received.
	#[error("{}", CONNECTION_MESSAGE)]
	Connection(#[from] TransportError),
	/// Generic provider failure that matches no specific kind.
	#[error("{}", describe_api_error(.status, .message))]
	Api {
		/// HTTP status code, when the failure came from a provider response.
		status: Option<u16>,
		/// Provider- or client-supplied detail, if any.
		message: Option<String>,
	},
	/// Local configuration problem; the provider was never contacted.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the fieldless kind of this error.
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidAppId { .. } => ErrorKind::InvalidAppId,
			Self::InvalidAppSecret { .. } => ErrorKind::InvalidAppSecret,
			Self::InvalidApp { .. } => ErrorKind::InvalidApp,
			Self::InvalidOAuthCode { .. } => ErrorKind::InvalidOAuthCode,
			Self::InvalidOAuthToken { .. } => ErrorKind::InvalidOAuthToken,
			Self::InvalidLogoutHookUrl { .. } => ErrorKind::InvalidLogoutHookUrl,
			Self::InvalidLogoutToken { .. } => ErrorKind::InvalidLogoutToken,
			Self::Server { .. } => ErrorKind::Server,
			Self::NotFound { .. } => ErrorKind::NotFound,
			Self::Connection(_) => ErrorKind::Connection,
			Self::Api { .. } => ErrorKind::Api,
			Self::Config(_) => ErrorKind::Config,
		}
	}

	/// Returns the human-readable message carried by the error, if any.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::InvalidAppId { message }
			| Self::InvalidAppSecret { message }
			| Self::InvalidApp { message }
			| Self::InvalidOAuthCode { message }
			| Self::InvalidOAuthToken { message }
			| Self::InvalidLogoutHookUrl { message }
			| Self::InvalidLogoutToken { message }
			| Self::Server { message }
			| Self::NotFound { message } => Some(message),
			Self::Connection(_) => Some(CONNECTION_MESSAGE),
			Self::Api { message, .. } => message.as_deref(),
			Self::Config(_) => None,
		}
	}

	/// Builds the generic [`Error::Api`] used for unreadable success payloads.
	pub(crate) fn malformed_payload(detail: impl Display) -> Self {
		Self::Api { status: Some(200), message: Some(format!("Clef returned {detail}.")) }
	}
}

fn describe_api_error(status: &Option<u16>, message: &Option<String>) -> String {
	match (status, message) {
		(_, Some(message)) => message.clone(),
		(Some(status), None) => format!("Clef API request failed with HTTP status {status}."),
		(None, None) => "Clef API request failed.".into(),
	}
}

/// Fieldless discriminant of [`Error`], convenient for matching and labeling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// See [`Error::InvalidAppId`].
	InvalidAppId,
	/// See [`Error::InvalidAppSecret`].
	InvalidAppSecret,
	/// See [`Error::InvalidApp`].
	InvalidApp,
	/// See [`Error::InvalidOAuthCode`].
	InvalidOAuthCode,
	/// See [`Error::InvalidOAuthToken`].
	InvalidOAuthToken,
	/// See [`Error::InvalidLogoutHookUrl`].
	InvalidLogoutHookUrl,
	/// See [`Error::InvalidLogoutToken`].
	InvalidLogoutToken,
	/// See [`Error::Server`].
	Server,
	/// See [`Error::NotFound`].
	NotFound,
	/// See [`Error::Connection`].
	Connection,
	/// See [`Error::Api`].
	Api,
	/// See [`Error::Config`].
	Config,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InvalidAppId => "invalid_app_id",
			Self::InvalidAppSecret => "invalid_app_secret",
			Self::InvalidApp => "invalid_app",
			Self::InvalidOAuthCode => "invalid_oauth_code",
			Self::InvalidOAuthToken => "invalid_oauth_token",
			Self::InvalidLogoutHookUrl => "invalid_logout_hook_url",
			Self::InvalidLogoutToken => "invalid_logout_token",
			Self::Server => "server",
			Self::NotFound => "not_found",
			Self::Connection => "connection",
			Self::Api => "api",
			Self::Config => "config",
		}
	}

	/// Groups the kind by what the host usually has to fix.
	pub const fn category(self) -> ErrorCategory {
		match self {
			Self::InvalidAppId | Self::InvalidAppSecret | Self::InvalidApp => ErrorCategory::Setup,
			Self::InvalidOAuthCode => ErrorCategory::Code,
			Self::InvalidOAuthToken => ErrorCategory::Token,
			Self::InvalidLogoutHookUrl | Self::InvalidLogoutToken => ErrorCategory::Logout,
			Self::Server | Self::NotFound | Self::Api => ErrorCategory::Provider,
			Self::Connection => ErrorCategory::Transport,
			Self::Config => ErrorCategory::Config,
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Coarse grouping of [`ErrorKind`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
	/// Application credentials or registration are wrong.
	Setup,
	/// The authorization code handed to the callback is unusable.
	Code,
	/// The access token is unusable.
	Token,
	/// Remote logout configuration or token problems.
	Logout,
	/// Clef failed or answered with something unexpected.
	Provider,
	/// The request never produced an HTTP response.
	Transport,
	/// Local configuration problem.
	Config,
}

/// Configuration and request-construction failures raised before contacting Clef.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Root URL override cannot be parsed into endpoint URLs.
	#[error("Root URL `{root}` cannot be used to build Clef endpoints.")]
	InvalidRoot {
		/// Root value that failed to parse.
		root: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO), all surfaced as [`Error::Connection`].
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Clef API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Clef API.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure it could not express as an error value.
	#[error("HTTP client error occurred while calling the Clef API: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
