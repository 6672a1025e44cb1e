// --- File: crates/bluepay_gateway/src/response.rs ---
//! Parsed gateway responses.
//!
//! BluePay answers every POST — approvals, declines and even HTTP error
//! statuses — with a URL-query-encoded body (`STATUS=1&MESSAGE=APPROVED&...`).
//! [`GatewayResponse`] parses that once into an immutable map and exposes the
//! documented keys through accessors; a missing key reads as the empty
//! string, never an error.

use std::collections::HashMap;

/// One parsed response, created per call and discarded after use.
#[derive(Debug, Clone, Default)]
pub struct GatewayResponse {
    params: HashMap<String, String>,
}

impl GatewayResponse {
    /// Parses a query-encoded response body. Unparseable bodies yield an
    /// empty response (all accessors return "").
    pub fn parse(body: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(body.trim_start_matches('&')).unwrap_or_default();
        GatewayResponse {
            params: pairs.into_iter().collect(),
        }
    }

    /// Builds a response carrying only a MESSAGE, used when the transport
    /// failed before any body arrived.
    pub fn from_transport_error(message: &str) -> Self {
        let mut response = GatewayResponse::default();
        response
            .params
            .insert("MESSAGE".to_string(), message.to_string());
        response
    }

    /// Substitutes `message` when the parsed body produced no MESSAGE field,
    /// so transport-level error text survives into the normal field model.
    pub(crate) fn set_fallback_message(&mut self, message: &str) {
        if self.message().is_empty() {
            self.params
                .insert("MESSAGE".to_string(), message.to_string());
        }
    }

    fn get(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or("")
    }

    /// True when the request was approved. A DUPLICATE message means the
    /// gateway's replay protection matched an earlier transaction; that is
    /// explicitly not success even though STATUS reads approved.
    pub fn is_successful(&self) -> bool {
        self.status() == "1" && self.message() != "DUPLICATE"
    }

    /// True when a rebilling sequence is no longer running.
    pub fn is_successful_cancel_recurring(&self) -> bool {
        self.status() == "stopped" || self.status() == "deleted"
    }

    /// Status code: "1" approved, "0" declined, "E" and everything else error.
    pub fn status(&self) -> &str {
        self.get("STATUS")
    }

    /// The ID the gateway assigned to this transaction.
    pub fn transaction_id(&self) -> &str {
        self.get("TRANS_ID")
    }

    /// Human-readable description of the transaction status.
    pub fn message(&self) -> &str {
        self.get("MESSAGE")
    }

    /// Address Verification System response code.
    pub fn avs(&self) -> &str {
        self.get("AVS")
    }

    /// Card Verification Value 2 response code.
    pub fn cvv2(&self) -> &str {
        self.get("CVV2")
    }

    /// ID of the newly-created rebilling sequence.
    pub fn rebill_id(&self) -> &str {
        self.get("REBID")
    }

    /// Auth code for a successful AUTH transaction.
    pub fn auth_code(&self) -> &str {
        self.get("AUTH_CODE")
    }

    /// The card number masked with 'X' as appropriate.
    pub fn card_mask(&self) -> &str {
        self.get("PAYMENT_ACCOUNT_MASK")
    }

    /// Card type (VISA, MC, DISC, AMEX, ACH, ...).
    pub fn card_type(&self) -> &str {
        self.get("CARD_TYPE")
    }

    /// Country of the card issuer.
    pub fn card_country(&self) -> &str {
        self.get("CARD_COUNTRY")
    }

    /// Bank identification number of the issuing bank.
    pub fn bank_id(&self) -> &str {
        self.get("BIN")
    }

    /// The customer's bank name.
    pub fn bank_name(&self) -> &str {
        self.get("BANK_NAME")
    }

    /// Tilde-separated processing-network data (e.g. `6~V~X~~~~~~~~A~N~~~Y~C`).
    pub fn bank_information(&self) -> &str {
        self.get("BINDATA")
    }

    /// ID of the transaction a rebilling sequence was created from.
    pub fn template_id(&self) -> &str {
        self.get("TEMPLATE_ID")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_encoded_mapping() {
        let body = serde_urlencoded::to_string([
            ("STATUS", "1"),
            ("MESSAGE", "APPROVED"),
            ("TRANS_ID", "12345"),
        ])
        .unwrap();
        let response = GatewayResponse::parse(&body);
        assert_eq!(response.status(), "1");
        assert_eq!(response.message(), "APPROVED");
        assert_eq!(response.transaction_id(), "12345");
    }

    #[test]
    fn missing_keys_read_as_empty_string() {
        let response = GatewayResponse::parse("STATUS=1");
        assert_eq!(response.message(), "");
        assert_eq!(response.rebill_id(), "");
        assert_eq!(response.template_id(), "");
    }

    #[test]
    fn parse_decodes_percent_encoding() {
        let response = GatewayResponse::parse("MESSAGE=Approved%20Sale&STATUS=1");
        assert_eq!(response.message(), "Approved Sale");
    }

    #[test]
    fn parse_tolerates_leading_ampersand() {
        // The legacy form builder prefixed every pair with '&'.
        let response = GatewayResponse::parse("&STATUS=1&MESSAGE=APPROVED");
        assert_eq!(response.status(), "1");
    }

    #[test]
    fn is_successful_requires_approved_non_duplicate() {
        assert!(GatewayResponse::parse("STATUS=1&MESSAGE=APPROVED").is_successful());
        assert!(!GatewayResponse::parse("STATUS=1&MESSAGE=DUPLICATE").is_successful());
        assert!(!GatewayResponse::parse("STATUS=0&MESSAGE=DECLINED").is_successful());
        assert!(!GatewayResponse::parse("STATUS=E&MESSAGE=ERROR").is_successful());
    }

    #[test]
    fn cancel_recurring_success_is_stopped_or_deleted() {
        assert!(GatewayResponse::parse("STATUS=stopped").is_successful_cancel_recurring());
        assert!(GatewayResponse::parse("STATUS=deleted").is_successful_cancel_recurring());
        assert!(!GatewayResponse::parse("STATUS=active").is_successful_cancel_recurring());
        assert!(!GatewayResponse::parse("STATUS=1").is_successful_cancel_recurring());
    }

    #[test]
    fn fallback_message_only_fills_gaps() {
        let mut response = GatewayResponse::parse("STATUS=E");
        response.set_fallback_message("connection reset");
        assert_eq!(response.message(), "connection reset");

        let mut response = GatewayResponse::parse("STATUS=E&MESSAGE=SECURITY%20VIOLATION");
        response.set_fallback_message("connection reset");
        assert_eq!(response.message(), "SECURITY VIOLATION");
    }
}
