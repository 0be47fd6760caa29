//! Operator confirmation before destructive steps.

// crates.io
use dialoguer::Confirm;
// self
use crate::_prelude::*;

/// Source of yes/no answers.
#[allow(async_fn_in_trait)]
pub trait Confirmation {
	/// Ask the question; only an explicit yes returns `true`.
	async fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interactive terminal prompt defaulting to "no".
///
/// A prompt that cannot be shown (no terminal attached, stdin closed) counts as "no".
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPrompt;
impl Confirmation for TerminalPrompt {
	async fn confirm(&mut self, prompt: &str) -> Result<bool> {
		let prompt = prompt.to_owned();
		let answer = tokio::task::spawn_blocking(move || {
			Confirm::new().with_prompt(prompt).default(false).wait_for_newline(true).interact()
		})
		.await
		.map_err(std::io::Error::other)?;

		match answer {
			Ok(answer) => Ok(answer),
			Err(e) => {
				tracing::warn!(error = %e, "confirmation prompt unavailable, treating as no");

				Ok(false)
			},
		}
	}
}

/// Fixed answer, for unattended runs (`--yes`) and tests.
#[derive(Clone, Copy, Debug)]
pub struct Preset(pub bool);
impl Confirmation for Preset {
	async fn confirm(&mut self, prompt: &str) -> Result<bool> {
		tracing::debug!(prompt, answer = self.0, "confirmation answered in advance");

		Ok(self.0)
	}
}
