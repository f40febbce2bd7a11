//! Remote logout: exchange the token Clef posts to the logout hook for the user's `clef_id`.

// self
use crate::{
	_prelude::*,
	auth::ClefId,
	client::{ClefClient, decode_payload},
	http::{ApiHttpClient, HttpMethod},
	obs::CallKind,
};

#[derive(Deserialize)]
struct LogoutPayload {
	clef_id: ClefId,
}

impl<C> ClefClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Exchanges the `logout_token` Clef posted to the host's logout hook for the identifier of
	/// the user who logged out.
	pub async fn exchange_logout_token(&self, logout_token: &str) -> Result<ClefId> {
		let payload = self
			.call(
				CallKind::Logout,
				"exchange_logout_token",
				HttpMethod::Post,
				&self.endpoints.logout,
				&[
					("logout_token", logout_token),
					("app_id", self.credentials.app_id.as_str()),
					("app_secret", self.credentials.app_secret.expose()),
				],
			)
			.await?;

		decode_payload::<LogoutPayload>(payload).map(|payload| payload.clef_id)
	}
}
