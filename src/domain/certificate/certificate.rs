//! Certificate value type.
//!
//! A certificate is a derived, stateless artifact: rendered fresh on every
//! request from the paid session's metadata, never stored server-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The data a certificate is rendered from.
///
/// Rendering is deterministic given these three fields; two certificates
/// built from the same values produce equivalent documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    recipient_name: String,
    score: u32,
    issued_on: NaiveDate,
}

impl Certificate {
    pub fn new(recipient_name: impl Into<String>, score: u32, issued_on: NaiveDate) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            score,
            issued_on,
        }
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    /// Issuance date in the certificate's display format (dd/mm/yyyy).
    pub fn issued_on_display(&self) -> String {
        self.issued_on.format("%d/%m/%Y").to_string()
    }

    /// Suggested download filename for the certificate of a session.
    pub fn filename(session_id: &str) -> String {
        format!("certificado-{}.pdf", session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    #[test]
    fn display_date_uses_day_month_year() {
        let cert = Certificate::new("Ana", 3, test_date());
        assert_eq!(cert.issued_on_display(), "09/03/2026");
    }

    #[test]
    fn filename_embeds_session_id() {
        assert_eq!(
            Certificate::filename("cs_test_abc"),
            "certificado-cs_test_abc.pdf"
        );
    }

    #[test]
    fn same_inputs_compare_equal() {
        let a = Certificate::new("Ana", 3, test_date());
        let b = Certificate::new("Ana", 3, test_date());
        assert_eq!(a, b);
    }
}
