//! Validated quiz submission.
//!
//! The input gate for the whole flow: a [`Submission`] can only be built
//! through [`Submission::parse`], so anything that reaches the payment
//! provider has a non-empty name and email and a non-negative score.
//! Creating a checkout session costs a provider API call; garbage input
//! must be rejected before that point.

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// A validated `{name, email, score}` quiz result.
///
/// Never persisted on its own; immediately folded into the payment
/// session's metadata by the session manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    name: String,
    email: String,
    score: u32,
}

impl Submission {
    /// Parse raw client input into a validated submission.
    ///
    /// Both strings are trimmed before the emptiness check. The score
    /// arrives as a signed integer from JSON and must be non-negative.
    pub fn parse(name: &str, email: &str, score: i64) -> Result<Self, CheckoutError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CheckoutError::validation("name", "cannot be empty"));
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(CheckoutError::validation("email", "cannot be empty"));
        }

        let score = u32::try_from(score)
            .map_err(|_| CheckoutError::validation("score", "must be a non-negative integer"))?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
