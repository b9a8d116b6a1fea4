//! Stripe-specific types for webhook handling.
//!
//! These types represent Stripe API objects as they arrive in webhook
//! payloads and REST responses. They are designed to:
//! - Parse actual Stripe JSON accurately
//! - Map to domain types for further processing

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    MissingHeader,
    /// Missing timestamp component (t=...).
    MissingTimestamp,
    /// Missing v1 signature component.
    MissingV1Signature,
    /// Invalid timestamp format.
    InvalidTimestamp,
    /// Invalid signature format (not valid hex).
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "Missing Stripe-Signature header"),
            Self::MissingTimestamp => write!(f, "Missing timestamp (t=) in signature"),
            Self::MissingV1Signature => write!(f, "Missing v1 signature in header"),
            Self::InvalidTimestamp => write!(f, "Invalid timestamp format"),
            Self::InvalidSignatureFormat => write!(f, "Invalid signature format (not valid hex)"),
        }
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed Stripe-Signature header components.
///
/// The header format is: `t=timestamp,v1=signature[,v0=legacy_signature]`
///
/// # Example
///
/// ```ignore
/// let header = "t=1704067200,v1=abc123def456...";
/// let parsed = SignatureHeader::parse(header)?;
/// assert_eq!(parsed.timestamp, 1704067200);
/// ```
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe generated the event.
    pub timestamp: i64,

    /// Primary v1 signature (HMAC-SHA256, hex-encoded).
    pub v1_signature: Vec<u8>,

    /// Legacy v0 signature (deprecated, may be absent).
    pub v0_signature: Option<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    ///
    /// # Format
    ///
    /// ```text
    /// t=<timestamp>,v1=<signature>[,v0=<legacy_signature>]
    /// ```
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;
        let mut v0_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::MissingTimestamp)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex_decode(value.trim()).ok_or(SignatureParseError::InvalidSignatureFormat)?,
                    );
                }
                "v0" => {
                    v0_signature = Some(
                        hex_decode(value.trim()).ok_or(SignatureParseError::InvalidSignatureFormat)?,
                    );
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or(SignatureParseError::MissingTimestamp)?,
            v1_signature: v1_signature.ok_or(SignatureParseError::MissingV1Signature)?,
            v0_signature,
        })
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw Stripe webhook event as received from the API.
///
/// This represents the full event envelope containing metadata and payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,

    /// Number of retries for this webhook delivery.
    #[serde(default)]
    pub pending_webhooks: i32,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,

    /// Previous values for updated fields (on update events).
    pub previous_attributes: Option<serde_json::Value>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Object type (always "checkout.session").
    pub object: String,

    /// Hosted checkout page URL (present while the session is open).
    pub url: Option<String>,

    /// Customer email used during checkout.
    pub customer_email: Option<String>,

    /// Session payment status (paid, unpaid, no_payment_required).
    pub payment_status: String,

    /// Session status (open, complete, expired).
    pub status: String,

    /// Payment mode (payment, setup, subscription).
    pub mode: String,

    /// Custom metadata attached to the session.
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,

    /// Success URL for redirect after checkout.
    pub success_url: Option<String>,

    /// Cancel URL for redirect if checkout is abandoned.
    pub cancel_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ════════════════════════════════════════════════════════════════════════════
    // SignatureHeader Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_signature_header_valid() {
        let header = "t=1704067200,v1=5d41402abc4b2a76b9719d911017c592";
        let parsed = SignatureHeader::parse(header).unwrap();

        assert_eq!(parsed.timestamp, 1704067200);
        assert_eq!(
            hex_encode(&parsed.v1_signature),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert!(parsed.v0_signature.is_none());
    }

    #[test]
    fn parse_signature_header_with_v0() {
        let header = "t=1704067200,v1=5d41402abc4b2a76b9719d911017c592,v0=aabbccdd";
        let parsed = SignatureHeader::parse(header).unwrap();

        assert_eq!(parsed.timestamp, 1704067200);
        assert!(parsed.v0_signature.is_some());
        assert_eq!(hex_encode(&parsed.v0_signature.unwrap()), "aabbccdd");
    }

    #[test]
    fn parse_signature_header_missing_timestamp() {
        let header = "v1=5d41402abc4b2a76b9719d911017c592";
        let result = SignatureHeader::parse(header);
        assert!(matches!(result, Err(SignatureParseError::MissingTimestamp)));
    }

    #[test]
    fn parse_signature_header_missing_v1() {
        let header = "t=1704067200,v0=aabbccdd";
        let result = SignatureHeader::parse(header);
        assert!(matches!(result, Err(SignatureParseError::MissingV1Signature)));
    }

    #[test]
    fn parse_signature_header_empty() {
        let result = SignatureHeader::parse("");
        assert!(matches!(result, Err(SignatureParseError::MissingHeader)));
    }

    #[test]
    fn parse_signature_header_invalid_timestamp() {
        let header = "t=not_a_number,v1=5d41402abc4b2a76b9719d911017c592";
        let result = SignatureHeader::parse(header);
        assert!(matches!(result, Err(SignatureParseError::InvalidTimestamp)));
    }

    #[test]
    fn parse_signature_header_invalid_hex() {
        let header = "t=1704067200,v1=not_valid_hex_xyz";
        let result = SignatureHeader::parse(header);
        assert!(matches!(
            result,
            Err(SignatureParseError::InvalidSignatureFormat)
        ));
    }

    #[test]
    fn parse_signature_header_non_ascii_hex() {
        let header = "t=1704067200,v1=€€€€";
        let result = SignatureHeader::parse(header);
        assert!(matches!(
            result,
            Err(SignatureParseError::InvalidSignatureFormat)
        ));
    }

    #[test]
    fn parse_signature_header_odd_length_hex() {
        let header = "t=1704067200,v1=abc";
        let result = SignatureHeader::parse(header);
        assert!(matches!(
            result,
            Err(SignatureParseError::InvalidSignatureFormat)
        ));
    }

    proptest! {
        #[test]
        fn parse_never_panics_on_arbitrary_headers(header in ".{0,128}") {
            let _ = SignatureHeader::parse(&header);
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Hex Encoding Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn hex_encode_empty() {
        assert_eq!(hex_encode(&[]), "");
    }

    #[test]
    fn hex_encode_bytes() {
        assert_eq!(hex_encode(&[0x00, 0xff, 0x10]), "00ff10");
    }

    #[test]
    fn hex_decode_roundtrip() {
        let original = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded = hex_encode(&original);
        let decoded = hex_decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Event Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_checkout_session_completed_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "cs_test_abc123",
                    "object": "checkout.session",
                    "customer_email": "ana@x.com",
                    "payment_status": "paid",
                    "status": "complete",
                    "mode": "payment",
                    "metadata": {
                        "name": "Ana",
                        "score": "3"
                    }
                }
            },
            "livemode": false,
            "pending_webhooks": 0
        }"#;

        let event: StripeWebhookEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.event_type, "checkout.session.completed");
        assert_eq!(event.created, 1704067200);
        assert!(!event.livemode);

        let session: StripeCheckoutSession = serde_json::from_value(event.data.object).unwrap();
        assert_eq!(session.id, "cs_test_abc123");
        assert_eq!(session.payment_status, "paid");
        assert_eq!(session.metadata.get("name").unwrap(), "Ana");
        assert_eq!(session.metadata.get("score").unwrap(), "3");
    }

    #[test]
    fn parse_checkout_session_object() {
        let json = r#"{
            "id": "cs_test_abc",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_abc",
            "customer_email": "test@example.com",
            "payment_status": "unpaid",
            "status": "open",
            "mode": "payment",
            "metadata": {
                "name": "Ana",
                "score": "7"
            },
            "success_url": "https://example.com/success.html?session_id={CHECKOUT_SESSION_ID}",
            "cancel_url": "https://example.com/index.html#pagamento-cancelado"
        }"#;

        let session: StripeCheckoutSession = serde_json::from_str(json).unwrap();

        assert_eq!(session.id, "cs_test_abc");
        assert_eq!(
            session.url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_abc")
        );
        assert_eq!(session.customer_email, Some("test@example.com".to_string()));
        assert_eq!(session.payment_status, "unpaid");
        assert_eq!(session.status, "open");
        assert_eq!(session.mode, "payment");
        assert_eq!(session.metadata.get("score").unwrap(), "7");
    }

    #[test]
    fn parse_session_with_missing_metadata_defaults_to_empty() {
        let json = r#"{
            "id": "cs_minimal",
            "object": "checkout.session",
            "payment_status": "unpaid",
            "status": "open",
            "mode": "payment"
        }"#;

        let session: StripeCheckoutSession = serde_json::from_str(json).unwrap();
        assert!(session.metadata.is_empty());
        assert!(session.url.is_none());
        assert!(session.customer_email.is_none());
    }
}
