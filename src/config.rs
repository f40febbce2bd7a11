//! Client configuration: application credentials plus an optional root URL override.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError, provider::Endpoints};

/// Application credentials issued by Clef out of band.
///
/// Neither value is validated locally; Clef reports bad credentials on the first call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Application identifier (`app_id` on the wire).
	pub app_id: String,
	/// Application secret (`app_secret` on the wire).
	pub app_secret: Secret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<Secret>) -> Self {
		Self { app_id: app_id.into(), app_secret: app_secret.into() }
	}
}

/// Serializable client configuration.
///
/// Hosts usually deserialize this from their own configuration file:
///
/// ```
/// let config: clef_api::config::ClefConfig = serde_json::from_str(
/// 	r#"{ "app_id": "4f318ac177a9391c2e0d221203725ffd", "app_secret": "secret" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.endpoints().unwrap().info.as_str(), "https://clef.io/api/v1/info");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClefConfig {
	/// Application credentials.
	#[serde(flatten)]
	pub credentials: Credentials,
	/// Root URL override; `None` selects [`DEFAULT_ROOT`](crate::provider::DEFAULT_ROOT).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub root: Option<String>,
}
impl ClefConfig {
	/// Creates a configuration targeting the default root.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<Secret>) -> Self {
		Self { credentials: Credentials::new(app_id, app_secret), root: None }
	}

	/// Overrides the root URL, e.g. to point at a stub provider in tests.
	pub fn with_root(mut self, root: impl Into<String>) -> Self {
		self.root = Some(root.into());

		self
	}

	/// Derives the endpoint set for this configuration.
	pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
		Endpoints::new(self.root.as_deref())
	}
}
