//! Console report of a reconciliation run.

// std
use std::{collections::BTreeSet, io::Write, path::Path};
// self
use crate::{
	_prelude::*,
	iam::wire::ProviderDetail,
	provider::{
		desired::DesiredState,
		drift::{Drift, ListDrift},
	},
};

const RULE_WIDTH: usize = 60;

/// Inputs of a run, echoed before any call is made.
#[derive(Clone, Copy, Debug)]
pub struct RunSummary<'a> {
	/// Gateway endpoint.
	pub s3_server: &'a str,
	/// Issuer URL of the provider.
	pub oidc_url: &'a str,
	/// IAM access key identifier.
	pub iam_client_id: &'a str,
	/// Client ID list file.
	pub client_ids_file: &'a Path,
	/// Thumbprint list file.
	pub thumbprints_file: &'a Path,
	/// TLS verification setting.
	pub ssl_verify: bool,
}

/// Section header framed by horizontal rules.
pub fn banner(out: &mut impl Write, title: &str) -> Result<()> {
	let rule = "=".repeat(RULE_WIDTH);

	writeln!(out)?;
	writeln!(out, "{rule}")?;
	writeln!(out, "{title}")?;
	writeln!(out, "{rule}")?;

	Ok(())
}

/// One-based numbered listing.
pub fn numbered(out: &mut impl Write, indent: &str, values: &[String]) -> Result<()> {
	for (i, value) in values.iter().enumerate() {
		writeln!(out, "{indent}{:2}. {value}", i + 1)?;
	}

	Ok(())
}

/// Configuration summary and the desired lists.
pub fn write_configuration(
	out: &mut impl Write,
	summary: &RunSummary<'_>,
	desired: &DesiredState,
) -> Result<()> {
	banner(out, "OIDC PROVIDER MANAGEMENT")?;
	writeln!(out)?;
	writeln!(out, "Configuration:")?;
	writeln!(out, "  S3 Server: {}", summary.s3_server)?;
	writeln!(out, "  OIDC URL: {}", summary.oidc_url)?;
	writeln!(out, "  IAM Client ID: {}", summary.iam_client_id)?;
	writeln!(out, "  Client IDs File: {}", summary.client_ids_file.display())?;
	writeln!(out, "  Thumbprints File: {}", summary.thumbprints_file.display())?;
	writeln!(out, "  SSL Verify: {}", summary.ssl_verify)?;
	writeln!(out)?;
	writeln!(out, "Client IDs ({}):", desired.client_ids.len())?;
	numbered(out, "  ", &desired.client_ids)?;
	writeln!(out)?;
	writeln!(out, "Thumbprints ({}):", desired.thumbprints.len())?;
	numbered(out, "  ", &desired.thumbprints)?;

	Ok(())
}

/// Both lists of a provider, indented under a heading.
pub fn write_lists(
	out: &mut impl Write,
	indent: &str,
	client_ids: &[String],
	thumbprints: &[String],
) -> Result<()> {
	let nested = format!("{indent}  ");

	writeln!(out, "{indent}Client IDs ({}):", client_ids.len())?;
	numbered(out, &nested, client_ids)?;
	writeln!(out, "{indent}Thumbprints ({}):", thumbprints.len())?;
	numbered(out, &nested, thumbprints)?;

	Ok(())
}

/// Live provider configuration.
pub fn write_current(out: &mut impl Write, detail: &ProviderDetail) -> Result<()> {
	writeln!(out)?;
	writeln!(out, "Current configuration:")?;
	write_lists(out, "  ", &detail.client_ids, &detail.thumbprints)
}

/// Per-list differences that force a recreation.
pub fn write_drift(out: &mut impl Write, drift: &Drift) -> Result<()> {
	writeln!(out)?;
	writeln!(out, "Configuration changes needed:")?;
	write_list_drift(out, "Client IDs", &drift.client_ids)?;
	write_list_drift(out, "Thumbprints", &drift.thumbprints)?;

	Ok(())
}

/// Final state read back after creation.
pub fn write_final(out: &mut impl Write, arn: &str, detail: &ProviderDetail) -> Result<()> {
	writeln!(out, "✓ OIDC provider verification successful")?;
	writeln!(out)?;
	writeln!(out, "Final configuration:")?;
	writeln!(out, "  Provider ARN: {arn}")?;
	writeln!(out, "  URL: {}", detail.url.as_deref().unwrap_or("-"))?;
	write_lists(out, "  ", &detail.client_ids, &detail.thumbprints)?;
	writeln!(out, "  Created: {}", detail.create_date.as_deref().unwrap_or("-"))?;

	Ok(())
}

fn write_list_drift(out: &mut impl Write, name: &str, drift: &ListDrift) -> Result<()> {
	if drift.is_empty() {
		return Ok(());
	}

	writeln!(out, "  • {name} differ")?;

	if !drift.adding.is_empty() {
		writeln!(out, "    + Adding: {}", joined(&drift.adding))?;
	}
	if !drift.removing.is_empty() {
		writeln!(out, "    - Removing: {}", joined(&drift.removing))?;
	}

	Ok(())
}

fn joined(values: &BTreeSet<String>) -> String {
	values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
