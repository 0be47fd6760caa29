//! Command-line surfaces of the two tools.

// std
use std::{convert::Infallible, path::PathBuf, time::Duration};
// crates.io
use clap::{ArgAction, Parser};
// self
use crate::{
	http::client::{ClientOptions, DEFAULT_TIMEOUT},
	iam::{
		client::{DEFAULT_REGION, IamConfig},
		sigv4::Credentials,
	},
	provider::report::RunSummary,
	token::config::FetcherConfig,
};

/// `true`, `1` and `yes` (any case) are true; every other value is false.
pub fn parse_truthy(value: &str) -> std::result::Result<bool, Infallible> {
	Ok(matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

/// Parse the process arguments, exiting 1 on usage errors and 0 after `--help`/`--version`.
pub fn parse_or_exit<P>() -> P
where
	P: Parser,
{
	P::try_parse().unwrap_or_else(|e| exit_on_parse_error(e))
}

/// Print a clap error and exit; usage errors exit 1 rather than clap's default of 2.
pub fn exit_on_parse_error(err: clap::Error) -> ! {
	let _ = err.print();

	std::process::exit(if err.use_stderr() { 1 } else { 0 })
}

/// Fetch an OIDC access token with the password grant and decode it.
#[derive(Debug, Parser)]
#[command(name = "radosgw-get-token", version)]
pub struct TokenCli {
	/// Provider (realm) URL the token endpoint path is appended to.
	#[arg(long, env = "RADOSGW_OIDC_PROVIDER", value_name = "URL")]
	pub provider_url: Option<String>,
	/// OAuth client identifier.
	#[arg(long, env = "RADOSGW_OIDC_CLIENT_ID")]
	pub client_id: Option<String>,
	/// OAuth client secret.
	#[arg(long, env = "RADOSGW_OIDC_CLIENT_SECRET", hide_env_values = true)]
	pub client_secret: Option<String>,
	/// Resource owner username.
	#[arg(long, env = "RADOSGW_OIDC_USERNAME")]
	pub username: Option<String>,
	/// Resource owner password.
	#[arg(long, env = "RADOSGW_OIDC_PASSWORD", hide_env_values = true)]
	pub password: Option<String>,
	/// Requested scope; add `offline_access` for a refresh token.
	#[arg(long, env = "RADOSGW_OIDC_SCOPE")]
	pub scope: Option<String>,
	/// Verify the provider's TLS certificate (true/1/yes).
	#[arg(
		long,
		env = "RADOSGW_SSL_VERIFY",
		value_name = "BOOL",
		value_parser = parse_truthy,
		action = ArgAction::Set
	)]
	pub ssl_verify: Option<bool>,
	/// Log request details to stderr.
	#[arg(short, long)]
	pub verbose: bool,
}
impl TokenCli {
	/// Apply the given overrides on top of the compiled-in defaults.
	pub fn into_config(self) -> FetcherConfig {
		let mut config = FetcherConfig::default();

		if let Some(v) = self.provider_url {
			config.provider_url = v;
		}
		if let Some(v) = self.client_id {
			config.client_id = v;
		}
		if let Some(v) = self.client_secret {
			config.client_secret = v;
		}
		if let Some(v) = self.username {
			config.username = v;
		}
		if let Some(v) = self.password {
			config.password = v;
		}
		if let Some(v) = self.scope {
			config.scope = v;
		}
		if let Some(v) = self.ssl_verify {
			config.ssl_verify = v;
		}

		config
	}
}

/// Reconcile the gateway's IAM OIDC provider with the client IDs and thumbprints in two files.
///
/// The provider is deleted and recreated when either list differs, after confirmation.
#[derive(Debug, Parser)]
#[command(
	name = "radosgw-oidc-provider",
	version,
	after_help = "Example:\n  radosgw-oidc-provider https://s3.example.com \
	              https://idp.example.com/realms/ops ADMINKEY ADMINSECRET \
	              client_ids.txt thumbprints.txt true"
)]
pub struct ProviderCli {
	/// Gateway endpoint, e.g. `https://s3.example.com`.
	pub s3_server: String,
	/// Issuer URL of the OIDC provider.
	pub oidc_url: String,
	/// IAM access key ID.
	pub iam_client_id: String,
	/// IAM secret access key.
	pub iam_client_password: String,
	/// File with one client ID per line.
	pub client_ids_file: PathBuf,
	/// File with one thumbprint per line.
	pub thumbprints_file: PathBuf,
	/// Verify the gateway's TLS certificate (true/1/yes).
	#[arg(value_parser = parse_truthy, action = ArgAction::Set)]
	pub ssl_verify: bool,
	/// Region placed in the request signature.
	#[arg(long, default_value = DEFAULT_REGION)]
	pub region: String,
	/// Per-request timeout, at least one second.
	#[arg(
		long,
		value_name = "SECONDS",
		default_value_t = DEFAULT_TIMEOUT.as_secs(),
		value_parser = clap::value_parser!(u64).range(1..)
	)]
	pub timeout_secs: u64,
	/// Recreate a drifted provider without prompting.
	#[arg(short, long)]
	pub yes: bool,
	/// Log request details to stderr.
	#[arg(short, long)]
	pub verbose: bool,
}
impl ProviderCli {
	/// IAM connection settings for these arguments.
	pub fn iam_config(&self) -> crate::Result<IamConfig> {
		let credentials = Credentials::new(&self.iam_client_id, &self.iam_client_password);
		let transport = ClientOptions::new(self.ssl_verify)
			.with_timeout(Duration::from_secs(self.timeout_secs));

		Ok(IamConfig::new(&self.s3_server, credentials)?
			.with_region(&self.region)
			.with_transport(transport))
	}

	/// Inputs echoed at the start of a run.
	pub fn summary(&self) -> RunSummary<'_> {
		RunSummary {
			s3_server: &self.s3_server,
			oidc_url: &self.oidc_url,
			iam_client_id: &self.iam_client_id,
			client_ids_file: &self.client_ids_file,
			thumbprints_file: &self.thumbprints_file,
			ssl_verify: self.ssl_verify,
		}
	}
}
