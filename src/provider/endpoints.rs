//! Versioned endpoint URLs derived from a root URL.

// self
use crate::{_prelude::*, error::ConfigError};

/// Canonical root used when no override is configured.
pub const DEFAULT_ROOT: &str = "https://clef.io/api";
/// API version segment inserted between the root and every endpoint path.
pub const API_VERSION: &str = "v1";

/// Endpoint set shared by every call a client makes.
///
/// All URLs share the `root/v1` prefix. Construction only parses URLs; it never contacts the
/// provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Versioned API prefix, e.g. `https://clef.io/api/v1`.
	pub api: Url,
	/// Authorization-code exchange endpoint.
	pub authorize: Url,
	/// User information endpoint.
	pub info: Url,
	/// Logout-token exchange endpoint.
	pub logout: Url,
}
impl Endpoints {
	/// Derives the endpoint set from an optional root override.
	///
	/// `None` and the empty string both select [`DEFAULT_ROOT`]. Trailing slashes on the root
	/// are ignored so the joined paths never contain `//`.
	pub fn new(root: Option<&str>) -> Result<Self, ConfigError> {
		let root = match root.map(str::trim) {
			Some(root) if !root.is_empty() => root,
			_ => DEFAULT_ROOT,
		};
		let prefix = format!("{}/{API_VERSION}", root.trim_end_matches('/'));
		let parse = |path: &str| {
			let raw = if path.is_empty() { prefix.clone() } else { format!("{prefix}/{path}") };

			Url::parse(&raw)
				.map_err(|source| ConfigError::InvalidRoot { root: root.to_owned(), source })
		};

		Ok(Self {
			api: parse("")?,
			authorize: parse("authorize")?,
			info: parse("info")?,
			logout: parse("logout")?,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_root_builds_clef_urls() {
		let endpoints = Endpoints::new(None).expect("Default endpoints should build.");

		assert_eq!(endpoints.api.as_str(), "https://clef.io/api/v1");
		assert_eq!(endpoints.authorize.as_str(), "https://clef.io/api/v1/authorize");
		assert_eq!(endpoints.info.as_str(), "https://clef.io/api/v1/info");
		assert_eq!(endpoints.logout.as_str(), "https://clef.io/api/v1/logout");
		assert_eq!(Endpoints::new(Some("")).expect("Empty root should fall back."), endpoints);
	}

	#[test]
	fn trailing_slash_does_not_change_urls() {
		let bare =
			Endpoints::new(Some("https://example.com")).expect("Bare root should build endpoints.");
		let slashed = Endpoints::new(Some("https://example.com/"))
			.expect("Slashed root should build endpoints.");

		assert_eq!(bare.authorize.as_str(), "https://example.com/v1/authorize");
		assert_eq!(bare, slashed);
	}

	#[test]
	fn root_override_keeps_path_prefix() {
		let endpoints = Endpoints::new(Some("https://getclef.com/api/"))
			.expect("Root with a path should build endpoints.");

		assert_eq!(endpoints.api.as_str(), "https://getclef.com/api/v1");
		assert_eq!(endpoints.logout.as_str(), "https://getclef.com/api/v1/logout");
	}

	#[test]
	fn relative_root_is_rejected() {
		let err = Endpoints::new(Some("clef.io/api")).expect_err("Relative root should fail.");

		assert!(matches!(err, ConfigError::InvalidRoot { ref root, .. } if root == "clef.io/api"));
	}
}
