//! Sketches the two host endpoints a Clef integration needs, around one shared client.
//!
//! 1. Build a [`ClefClient`] once at startup and keep it in the host's state (no globals).
//! 2. The OAuth redirect handler passes the `code` query parameter to
//!    [`ClefClient::exchange_code_for_identity`] and opens a session for the returned user.
//! 3. The logout webhook passes the posted `logout_token` to
//!    [`ClefClient::exchange_logout_token`] and drops every session of that Clef user.
//!
//! Run with `cargo run --example host_callbacks -- login <code>` or
//! `cargo run --example host_callbacks -- logout <logout_token>`; set `CLEF_APP_ID`,
//! `CLEF_APP_SECRET`, and optionally `CLEF_ROOT`.

// std
use std::{collections::HashMap, env};
// crates.io
use color_eyre::{Result, eyre::bail};
// self
use clef_api::{
	client::{ClefClient, ReqwestClefClient},
	config::ClefConfig,
	error::{Error, ErrorCategory},
};

struct HostState {
	clef: ReqwestClefClient,
	sessions: HashMap<String, String>,
}
impl HostState {
	async fn oauth_callback(&mut self, code: &str) -> Result<()> {
		match self.clef.exchange_code_for_identity(code).await {
			Ok(identity) => {
				let id = identity.id().unwrap_or_default().to_owned();
				let name = identity.first_name().unwrap_or("there").to_owned();

				println!("Logged in Clef user {id}; hello {name}.");

				self.sessions.insert(id, name);

				Ok(())
			},
			Err(e) => report(e),
		}
	}

	async fn logout_hook(&mut self, logout_token: &str) -> Result<()> {
		match self.clef.exchange_logout_token(logout_token).await {
			Ok(clef_id) => {
				let dropped = self.sessions.remove(clef_id.as_str()).is_some();

				println!("Clef user {clef_id} logged out remotely (session dropped: {dropped}).");

				Ok(())
			},
			Err(e) => report(e),
		}
	}
}

fn report(e: Error) -> Result<()> {
	match e.kind().category() {
		ErrorCategory::Setup => bail!("Check CLEF_APP_ID / CLEF_APP_SECRET: {e}"),
		ErrorCategory::Transport | ErrorCategory::Provider =>
			bail!("Clef is unavailable right now: {e}"),
		_ => {
			println!("Rejected by Clef ({}): {e}", e.kind());

			Ok(())
		},
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut config = ClefConfig::new(
		env::var("CLEF_APP_ID").unwrap_or_default(),
		env::var("CLEF_APP_SECRET").unwrap_or_default(),
	);

	if let Ok(root) = env::var("CLEF_ROOT") {
		config = config.with_root(root);
	}

	let mut state = HostState { clef: ClefClient::new(config)?, sessions: HashMap::new() };
	let args = env::args().skip(1).collect::<Vec<_>>();

	match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
		["login", code] => state.oauth_callback(code).await,
		["logout", token] => state.logout_hook(token).await,
		_ => {
			println!("usage: host_callbacks (login <code> | logout <logout_token>)");

			Ok(())
		},
	}
}
