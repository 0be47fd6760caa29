//! Fetch an OIDC access token with the password grant and print it, decoded, for inspection.

// std
use std::{io, process::ExitCode};
// crates.io
use radosgw_oidc::{
	Result,
	cli::{self, TokenCli},
	http::client::ClientOptions,
	observability,
	token::{client, config::FetcherConfig, report},
};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = cli::parse_or_exit::<TokenCli>();

	observability::init_tracing(cli.verbose);

	let config = cli.into_config();

	match run(&config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			let _ = report::write_failure(&mut io::stderr(), &e);

			ExitCode::from(e.exit_code())
		},
	}
}

async fn run(config: &FetcherConfig) -> Result<()> {
	config.validate()?;

	let mut diag = io::stderr();

	report::write_request_summary(&mut diag, config)?;

	let http = ClientOptions::new(config.ssl_verify).build()?;
	let response = client::fetch_token(&http, config).await?;

	report::write_token(&mut io::stdout(), &mut diag, &response)
}
