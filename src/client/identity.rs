//! Authorization-code handshake and user information lookup.
//!
//! [`ClefClient::exchange_code_for_identity`] posts the code to `authorize`, then reads the
//! user from `info` with the returned access token. The second call only runs when the first
//! one succeeded. [`ClefClient::lookup_identity_by_token`] skips the handshake for callers that
//! already hold a token.

// self
use crate::{
	_prelude::*,
	auth::{Secret, UserIdentity},
	client::{ClefClient, decode_payload},
	http::{ApiHttpClient, HttpMethod},
	obs::CallKind,
	provider::JsonObject,
};

#[derive(Deserialize)]
struct InfoPayload {
	info: UserIdentity,
}

impl<C> ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Exchanges an authorization code (the `code` query parameter of the OAuth redirect) for
	/// the user's identity.
	pub async fn exchange_code_for_identity(&self, code: &str) -> Result<UserIdentity> {
		const STAGE: &str = "exchange_code_for_identity";

		let access_token = self.fetch_access_token(STAGE, code).await?;

		self.fetch_identity(STAGE, &access_token).await
	}

	/// Reads the user's identity with an access token obtained earlier.
	pub async fn lookup_identity_by_token(&self, access_token: &str) -> Result<UserIdentity> {
		self.fetch_identity("lookup_identity_by_token", &Secret::new(access_token)).await
	}

	async fn fetch_access_token(&self, stage: &'static str, code: &str) -> Result<Secret> {
		let payload = self
			.call(
				CallKind::Authorize,
				stage,
				HttpMethod::Post,
				&self.endpoints.authorize,
				&[
					("code", code),
					("app_id", self.credentials.app_id.as_str()),
					("app_secret", self.credentials.app_secret.expose()),
				],
			)
			.await?;

		Ok(access_token_of(&payload))
	}

	async fn fetch_identity(
		&self,
		stage: &'static str,
		access_token: &Secret,
	) -> Result<UserIdentity> {
		let payload = self
			.call(
				CallKind::Info,
				stage,
				HttpMethod::Get,
				&self.endpoints.info,
				&[("access_token", access_token.expose())],
			)
			.await?;

		decode_payload::<InfoPayload>(payload).map(|payload| payload.info)
	}
}

/// A missing or non-string `access_token` is the empty token; Clef rejects it on `info`.
fn access_token_of(payload: &JsonObject) -> Secret {
	payload.get("access_token").and_then(Value::as_str).map(Secret::from).unwrap_or_default()
}
