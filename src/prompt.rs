// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Yes/no confirmation before destructive overwrites.

use crate::error::Result;

/// Asks the operator to confirm an overwrite
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompts on the terminal. Anything but an explicit yes is a no.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Answers yes without asking, for unattended runs
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookoutError;

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("anything").unwrap());
    }

    #[test]
    fn test_terminal_failure_is_prompt_error() {
        let err: LookoutError = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "not a terminal",
        ))
        .into();

        assert!(matches!(err, LookoutError::PromptError(_)));
        assert!(err.to_string().contains("not a terminal"));
    }
}
