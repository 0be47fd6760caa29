//! Reconcile the gateway's IAM OIDC provider with the client IDs and thumbprints in two files.

// std
use std::{
	io::{self, Write},
	process::ExitCode,
};
// crates.io
use radosgw_oidc::{
	Error, Result,
	cli::{self, ProviderCli},
	iam::client::IamClient,
	observability,
	provider::{
		confirm::{Preset, TerminalPrompt},
		desired::DesiredState,
		reconcile::{Outcome, Reconciler},
		report,
	},
};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = cli::parse_or_exit::<ProviderCli>();

	observability::init_tracing(cli.verbose);

	match run(&cli).await {
		Ok(outcome) => {
			tracing::debug!(?outcome, "reconciliation finished");

			ExitCode::SUCCESS
		},
		Err(Error::Aborted) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("✗ Error: {e}");

			ExitCode::from(e.exit_code())
		},
	}
}

async fn run(cli: &ProviderCli) -> Result<Outcome> {
	let desired = DesiredState::load(&cli.client_ids_file, &cli.thumbprints_file)?;
	let mut out = io::stdout();

	writeln!(
		out,
		"Loaded {} client IDs from {}",
		desired.client_ids.len(),
		cli.client_ids_file.display()
	)?;
	writeln!(
		out,
		"Loaded {} thumbprints from {}",
		desired.thumbprints.len(),
		cli.thumbprints_file.display()
	)?;
	report::write_configuration(&mut out, &cli.summary(), &desired)?;
	report::banner(&mut out, "STEP 1: SETUP IAM CLIENT")?;

	let iam = IamClient::new(cli.iam_config()?)?;

	writeln!(out, "✓ IAM client created successfully")?;

	if cli.yes {
		Reconciler::new(&iam, Preset(true), out).run(&cli.oidc_url, &desired).await
	} else {
		Reconciler::new(&iam, TerminalPrompt, out).run(&cli.oidc_url, &desired).await
	}
}
