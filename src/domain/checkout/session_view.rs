//! Read model returned by the payment status oracle.

use serde::{Deserialize, Serialize};

/// Client-facing view of a payment session's state.
///
/// `paid: false` means a real session that has not completed payment.
/// An unknown session id is a `SessionNotFound` error, never this view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusView {
    pub paid: bool,
    pub name: String,
    pub score: u32,
    pub email: String,
}
