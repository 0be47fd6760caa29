//! Delete-then-create reconciliation of one OIDC provider.
//!
//! The gateway cannot update a provider in place. When the live client IDs or thumbprints differ
//! from the desired sets, the provider is deleted and recreated after the operator confirms.
//! Nothing guards the window between the lookup and the recreation against concurrent changes
//! by another actor.

// std
use std::io::Write;
// self
use crate::{
	_prelude::*,
	iam::api::OidcProviderApi,
	provider::{
		arn,
		confirm::Confirmation,
		desired::DesiredState,
		drift::Drift,
		report,
	},
	security,
};

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// The provider already matched; nothing was changed.
	InSync {
		/// ARN of the matching provider.
		arn: String,
	},
	/// No provider existed; one was created.
	Created {
		/// ARN of the new provider.
		arn: String,
	},
	/// A drifted provider was deleted and created again.
	Recreated {
		/// ARN of the new provider.
		arn: String,
	},
}
impl Outcome {
	/// ARN of the provider the run ended with.
	pub fn arn(&self) -> &str {
		match self {
			Self::InSync { arn } | Self::Created { arn } | Self::Recreated { arn } => arn,
		}
	}
}

/// Drives one reconciliation against an IAM API, asking `confirm` before destructive steps and
/// writing the console report to `out`.
#[derive(Debug)]
pub struct Reconciler<'a, A, C, W> {
	api: &'a A,
	confirm: C,
	out: W,
}
impl<'a, A, C, W> Reconciler<'a, A, C, W>
where
	A: OidcProviderApi,
	C: Confirmation,
	W: Write,
{
	/// Create a reconciler.
	pub fn new(api: &'a A, confirm: C, out: W) -> Self {
		Self { api, confirm, out }
	}

	/// Give back the report sink.
	pub fn into_output(self) -> W {
		self.out
	}

	/// Bring the provider for `issuer` in line with `desired`.
	///
	/// Listing, inspecting and creating are fatal on failure. A failed delete and a failed
	/// read-back after creation are reported as warnings. A declined confirmation yields
	/// [`Error::Aborted`] without any change.
	pub async fn run(&mut self, issuer: &str, desired: &DesiredState) -> Result<Outcome> {
		let expected = arn::provider_arn(issuer);

		security::warn_insecure_issuer(issuer);
		security::warn_malformed_thumbprints(&desired.thumbprints);

		report::banner(&mut self.out, "STEP 2: CHECK EXISTING OIDC PROVIDER")?;

		let existing = self.find(&expected).await?;

		if let Some(arn) = &existing {
			writeln!(self.out, "Found existing OIDC provider: {arn}")?;

			let current = self.api.get_provider(arn).await?;

			report::write_current(&mut self.out, &current)?;

			let drift = Drift::between(&current, desired);

			if drift.in_sync() {
				writeln!(self.out)?;
				writeln!(self.out, "✓ Configuration already matches - no changes needed!")?;
				tracing::info!(%arn, "provider already in sync");

				return Ok(Outcome::InSync { arn: arn.clone() });
			}

			report::write_drift(&mut self.out, &drift)?;
			self.confirm_recreation().await?;
		} else {
			writeln!(self.out, "No existing OIDC provider found")?;
		}

		report::banner(&mut self.out, "STEP 4: MANAGE OIDC PROVIDER")?;

		if let Some(arn) = &existing {
			self.delete(arn).await?;
		}

		let created = self.create(issuer, desired).await?;

		if created != expected {
			tracing::warn!(
				%expected,
				%created,
				"gateway assigned an unexpected ARN; later runs will not find this provider"
			);
		}

		self.verify(&created).await?;

		report::banner(&mut self.out, "MANAGEMENT COMPLETE! ✓")?;
		writeln!(self.out)?;
		writeln!(self.out, "OIDC provider successfully configured at: {created}")?;
		writeln!(self.out, "The provider is ready for use with IAM roles and STS operations.")?;

		Ok(match existing {
			Some(_) => Outcome::Recreated { arn: created },
			None => Outcome::Created { arn: created },
		})
	}

	async fn find(&mut self, expected: &str) -> Result<Option<String>> {
		let arns = self.api.list_providers().await?;

		tracing::debug!(count = arns.len(), %expected, "providers listed");

		Ok(arns.into_iter().find(|arn| arn == expected))
	}

	async fn confirm_recreation(&mut self) -> Result<()> {
		report::banner(&mut self.out, "STEP 3: CONFIRMATION")?;
		writeln!(self.out, "OIDC provider update required!")?;
		writeln!(
			self.out,
			"RadosGW does not support updating OIDC providers - recreation is needed."
		)?;
		writeln!(
			self.out,
			"This will temporarily break authentication until recreation is complete."
		)?;
		writeln!(self.out)?;
		self.out.flush()?;

		if self.confirm.confirm("Do you want to recreate the OIDC provider?").await? {
			writeln!(self.out, "Proceeding with recreation...")?;

			Ok(())
		} else {
			writeln!(self.out, "Operation cancelled")?;

			Err(Error::Aborted)
		}
	}

	async fn delete(&mut self, arn: &str) -> Result<()> {
		writeln!(self.out, "Deleting existing OIDC provider: {arn}")?;

		match self.api.delete_provider(arn).await {
			Ok(()) => writeln!(self.out, "✓ Successfully deleted old OIDC provider")?,
			Err(e) => {
				tracing::warn!(%arn, error = %e, "delete failed, attempting creation anyway");
				writeln!(self.out, "Warning: Could not delete OIDC provider: {e}")?;
			},
		}

		Ok(())
	}

	async fn create(&mut self, issuer: &str, desired: &DesiredState) -> Result<String> {
		writeln!(self.out)?;
		writeln!(self.out, "Creating OIDC provider with URL: {issuer}")?;
		writeln!(self.out, "Client IDs to configure ({}):", desired.client_ids.len())?;
		report::numbered(&mut self.out, "  ", &desired.client_ids)?;
		writeln!(self.out, "Thumbprints to configure ({}):", desired.thumbprints.len())?;
		report::numbered(&mut self.out, "  ", &desired.thumbprints)?;

		let arn =
			self.api.create_provider(issuer, &desired.client_ids, &desired.thumbprints).await?;

		writeln!(self.out)?;
		writeln!(self.out, "✓ Successfully created OIDC provider: {arn}")?;

		Ok(arn)
	}

	async fn verify(&mut self, arn: &str) -> Result<()> {
		report::banner(&mut self.out, "STEP 5: VERIFICATION")?;

		match self.api.get_provider(arn).await {
			Ok(detail) => report::write_final(&mut self.out, arn, &detail)?,
			Err(e) => {
				tracing::warn!(%arn, error = %e, "verification failed");
				writeln!(self.out, "Warning: Could not verify OIDC provider: {e}")?;
			},
		}

		Ok(())
	}
}
