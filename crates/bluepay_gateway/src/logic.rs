// --- File: crates/bluepay_gateway/src/logic.rs ---

use std::collections::HashMap;

use bluepay_config::{BluePayConfig, TransactMode};
use bluepay_common::HTTP_CLIENT;
use tracing::{info, warn};

use crate::error::BluePayError;
use crate::models::{Amount, RebillNotification, RebillSchedule, SaleRequest};
use crate::response::GatewayResponse;
use crate::seal::{constant_time_eq, stamp_seal, transaction_seal};

/// Standard transaction endpoint (SALE/AUTH/CAPTURE/REFUND/VOID).
pub const TRANSACTION_URL: &str = "https://secure.bluepay.com/interfaces/bp20post";
/// Rebilling administration endpoint (GET/SET on rebill sequences).
pub const REBILLING_URL: &str = "https://secure.bluepay.com/interfaces/bp20rebadmin";

/// BluePay 2.0 API protocol version marker.
const VERSION: &str = "3";
/// Declaration of which fields the transaction seal digests, sent verbatim.
const TPS_DEF: &str = "ACCOUNT_ID MODE TRANS_TYPE AMOUNT MASTER_ID";

/// Rebilling admin verbs. The verb is part of the signed string, so it is an
/// enum rather than a free-form parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebillVerb {
    Get,
    Set,
}

impl RebillVerb {
    fn as_str(&self) -> &'static str {
        match self {
            RebillVerb::Get => "GET",
            RebillVerb::Set => "SET",
        }
    }
}

/// The BluePay gateway client.
///
/// Holds the merchant credentials and the endpoint pair; each operation
/// builds its own request parameters and returns a fresh
/// [`GatewayResponse`], so one client can be shared across concurrent calls.
#[derive(Debug, Clone)]
pub struct BluePayClient {
    account_id: String,
    user_id: String,
    secret_key: String,
    sandbox: bool,
    transaction_url: String,
    rebilling_url: String,
}

impl BluePayClient {
    pub fn new(account_id: String, user_id: String, secret_key: String, sandbox: bool) -> Self {
        BluePayClient {
            account_id,
            user_id,
            secret_key,
            sandbox,
            transaction_url: TRANSACTION_URL.to_string(),
            rebilling_url: REBILLING_URL.to_string(),
        }
    }

    pub fn from_config(config: &BluePayConfig, secret_key: String) -> Self {
        BluePayClient::new(
            config.account_id.clone(),
            config.user_id.clone(),
            secret_key,
            config.use_sandbox,
        )
    }

    /// Overrides both endpoints. Integration tests point this at a local
    /// mock server; production code keeps the defaults.
    pub fn with_endpoints(mut self, transaction_url: &str, rebilling_url: &str) -> Self {
        self.transaction_url = transaction_url.to_string();
        self.rebilling_url = rebilling_url.to_string();
        self
    }

    fn mode(&self) -> &'static str {
        if self.sandbox {
            "TEST"
        } else {
            "LIVE"
        }
    }

    // --- Operations ---

    /// Authorization or sale (authorization and capture) transaction.
    ///
    /// Sends SALE when `capture` is true, AUTH otherwise.
    pub async fn sale(
        &self,
        request: &SaleRequest,
        capture: bool,
    ) -> Result<GatewayResponse, BluePayError> {
        let fields = sale_fields(request);
        self.submit(
            if capture { "SALE" } else { "AUTH" },
            &request.amount.to_wire(),
            "",
            fields,
        )
        .await
    }

    /// Submits an ordinary payment using the merchant's configured transact
    /// mode: `Authorize` reserves the funds (AUTH), `AuthorizeAndCapture`
    /// settles immediately (SALE).
    pub async fn process_payment(
        &self,
        request: &SaleRequest,
        mode: TransactMode,
    ) -> Result<GatewayResponse, BluePayError> {
        self.sale(request, mode == TransactMode::AuthorizeAndCapture)
            .await
    }

    /// Sale with a rebilling schedule attached: a captured SALE plus the
    /// DO_REBILL scheduling fields. The response's REBID identifies the
    /// created sequence.
    pub async fn sale_recurring(
        &self,
        request: &SaleRequest,
        schedule: &RebillSchedule,
    ) -> Result<GatewayResponse, BluePayError> {
        let mut fields = sale_fields(request);
        fields.push(("DO_REBILL", "1".to_string()));
        fields.push(("REB_FIRST_DATE", schedule.first_date.to_wire()));
        fields.push(("REB_EXPR", schedule.expression.to_wire()));
        if let Some(cycles) = schedule.cycles {
            fields.push(("REB_CYCLES", cycles.to_string()));
        }
        fields.push(("REB_AMOUNT", schedule.amount.to_wire()));

        self.submit("SALE", &request.amount.to_wire(), "", fields)
            .await
    }

    /// Captures a previously authorized transaction.
    pub async fn capture(
        &self,
        master_id: &str,
        amount: Amount,
    ) -> Result<GatewayResponse, BluePayError> {
        let fields = vec![
            ("MASTER_ID", master_id.to_string()),
            ("AMOUNT", amount.to_wire()),
        ];
        self.submit("CAPTURE", &amount.to_wire(), master_id, fields)
            .await
    }

    /// Refunds a captured transaction. With `None` the AMOUNT field is not
    /// sent at all and the gateway applies its own default (full refund).
    pub async fn refund(
        &self,
        master_id: &str,
        amount: Option<Amount>,
    ) -> Result<GatewayResponse, BluePayError> {
        let mut fields = vec![("MASTER_ID", master_id.to_string())];
        if let Some(amount) = amount {
            fields.push(("AMOUNT", amount.to_wire()));
        }
        let amount_wire = amount.map(|a| a.to_wire()).unwrap_or_default();
        self.submit("REFUND", &amount_wire, master_id, fields).await
    }

    /// Voids an authorized or captured transaction.
    pub async fn void(&self, master_id: &str) -> Result<GatewayResponse, BluePayError> {
        let fields = vec![("MASTER_ID", master_id.to_string())];
        self.submit("VOID", "", master_id, fields).await
    }

    /// Cancels a rebilling sequence.
    ///
    /// Looks the sequence up first; if it is already stopped or deleted the
    /// cancellation is satisfied and no SET is issued. Otherwise one
    /// STATUS=STOPPED SET follows, and the returned response is whatever that
    /// SET produced — callers re-check via
    /// [`GatewayResponse::is_successful_cancel_recurring`].
    pub async fn cancel_recurring(
        &self,
        rebill_id: &str,
    ) -> Result<GatewayResponse, BluePayError> {
        let lookup = self.rebill_admin(RebillVerb::Get, rebill_id, None).await?;
        if lookup.is_successful_cancel_recurring() {
            return Ok(lookup);
        }

        self.rebill_admin(RebillVerb::Set, rebill_id, Some("STOPPED"))
            .await
    }

    /// Returns the ID of the transaction a rebilling sequence was created
    /// from, or `""` when the sequence is unknown.
    pub async fn template_id(&self, rebill_id: &str) -> Result<String, BluePayError> {
        let response = self.rebill_admin(RebillVerb::Get, rebill_id, None).await?;
        Ok(response.template_id().to_string())
    }

    /// Verifies the BP_STAMP on an inbound rebilling notification.
    ///
    /// BP_STAMP_DEF names, in order, the fields whose values were folded onto
    /// the secret key to produce BP_STAMP; the expectation is recomputed from
    /// the supplied fields and compared exactly.
    pub fn verify_stamp(&self, params: &HashMap<String, String>) -> bool {
        let stamp_def = params.get("BP_STAMP_DEF").map(String::as_str).unwrap_or("");
        let values = stamp_def
            .split_whitespace()
            .map(|name| params.get(name).map(String::as_str).unwrap_or(""));
        let expected = stamp_seal(&self.secret_key, values);

        let provided = params.get("BP_STAMP").map(String::as_str).unwrap_or("");
        constant_time_eq(expected.as_bytes(), provided.as_bytes())
    }

    // --- Utilities ---

    /// Adds the common bp20post parameters (identity, mode, version, seal)
    /// and posts to the standard transaction endpoint.
    ///
    /// `amount` / `master_id` are the exact strings digested into the seal;
    /// operations that do not send those fields pass `""`.
    async fn submit(
        &self,
        trans_type: &str,
        amount: &str,
        master_id: &str,
        mut fields: Vec<(&'static str, String)>,
    ) -> Result<GatewayResponse, BluePayError> {
        let seal = transaction_seal(
            &self.secret_key,
            &self.account_id,
            self.mode(),
            trans_type,
            amount,
            master_id,
        );

        fields.push(("ACCOUNT_ID", self.account_id.clone()));
        fields.push(("USER_ID", self.user_id.clone()));
        fields.push(("MODE", self.mode().to_string()));
        fields.push(("TRANS_TYPE", trans_type.to_string()));
        fields.push(("VERSION", VERSION.to_string()));
        fields.push(("TPS_DEF", TPS_DEF.to_string()));
        fields.push(("TAMPER_PROOF_SEAL", seal));

        self.post_form(&self.transaction_url, &fields).await
    }

    /// One GET/SET against the rebilling admin endpoint, signed with the
    /// secret-prefixed recipe (`secret + account_id + verb + rebill_id`).
    async fn rebill_admin(
        &self,
        verb: RebillVerb,
        rebill_id: &str,
        status: Option<&str>,
    ) -> Result<GatewayResponse, BluePayError> {
        let seal = stamp_seal(
            &self.secret_key,
            [self.account_id.as_str(), verb.as_str(), rebill_id],
        );

        let mut fields = vec![
            ("ACCOUNT_ID", self.account_id.clone()),
            ("USER_ID", self.user_id.clone()),
            ("TRANS_TYPE", verb.as_str().to_string()),
            ("REBILL_ID", rebill_id.to_string()),
        ];
        if let Some(status) = status {
            fields.push(("STATUS", status.to_string()));
        }
        fields.push(("TAMPER_PROOF_SEAL", seal));

        self.post_form(&self.rebilling_url, &fields).await
    }

    /// Single-shot POST of a URL-encoded form. No retries; a transport
    /// failure becomes a response whose MESSAGE carries the error text, and
    /// error-status bodies are parsed exactly like success bodies (the
    /// gateway returns structured bodies on HTTP errors too).
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
    ) -> Result<GatewayResponse, BluePayError> {
        let body = serde_urlencoded::to_string(fields)
            .map_err(|e| BluePayError::EncodingError(e.to_string()))?;

        let result = HTTP_CLIENT
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("BluePay request to {} failed: {}", url, e);
                return Ok(GatewayResponse::from_transport_error(&e.to_string()));
            }
        };

        let status = response.status();
        let body_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read BluePay response body: {}", e);
                return Ok(GatewayResponse::from_transport_error(&e.to_string()));
            }
        };

        let mut parsed = GatewayResponse::parse(&body_text);
        if !status.is_success() {
            warn!("BluePay answered HTTP {}: {}", status, body_text);
            parsed.set_fallback_message(&format!("HTTP {}", status));
        } else {
            info!(
                "BluePay response: status='{}' trans_id='{}'",
                parsed.status(),
                parsed.transaction_id()
            );
        }
        Ok(parsed)
    }
}

/// The payment, customer and order fields shared by SALE and AUTH.
fn sale_fields(request: &SaleRequest) -> Vec<(&'static str, String)> {
    vec![
        ("PAYMENT_TYPE", "CREDIT".to_string()),
        ("AMOUNT", request.amount.to_wire()),
        ("PAYMENT_ACCOUNT", request.card.number.clone()),
        ("CARD_EXPIRE", request.card.expiry.to_wire()),
        ("CARD_CVV2", request.card.cvv2.clone()),
        ("NAME1", request.billing.first_name.clone()),
        ("NAME2", request.billing.last_name.clone()),
        ("ADDR1", request.billing.address1.clone()),
        ("ADDR2", request.billing.address2.clone()),
        ("CITY", request.billing.city.clone()),
        ("STATE", request.billing.state.clone()),
        ("COUNTRY", request.billing.country.clone()),
        ("ZIP", request.billing.zip.clone()),
        ("EMAIL", request.billing.email.clone()),
        ("PHONE", request.billing.phone.clone()),
        ("CUSTOM_ID", request.custom_id1.clone()),
        ("CUSTOM_ID2", request.custom_id2.clone()),
        ("CUSTOMER_IP", request.customer_ip.clone()),
        ("ORDER_ID", request.order_id.clone()),
        ("INVOICE_ID", request.invoice_id.clone()),
    ]
}

/// Pulls the rebilling fields out of a verified notification form.
pub fn rebill_notification(params: &HashMap<String, String>) -> RebillNotification {
    RebillNotification {
        rebill_id: params.get("rebill_id").cloned().unwrap_or_default(),
        status: params
            .get("status")
            .and_then(|status| status.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RebillStatus;
    use crate::seal::stamp_seal;

    fn client() -> BluePayClient {
        BluePayClient::new(
            "100200300".to_string(),
            "1001".to_string(),
            "SECRET".to_string(),
            true,
        )
    }

    fn stamped_params(secret: &str) -> HashMap<String, String> {
        // BP_STAMP over secret + "x" + "y", the documented recipe
        let mut params = HashMap::new();
        params.insert("BP_STAMP_DEF".to_string(), "FIELD_A FIELD_B".to_string());
        params.insert("FIELD_A".to_string(), "x".to_string());
        params.insert("FIELD_B".to_string(), "y".to_string());
        params.insert("BP_STAMP".to_string(), stamp_seal(secret, ["x", "y"]));
        params
    }

    #[test]
    fn verify_stamp_accepts_matching_seal() {
        assert!(client().verify_stamp(&stamped_params("SECRET")));
    }

    #[test]
    fn verify_stamp_rejects_mutated_stamp() {
        let mut params = stamped_params("SECRET");
        let stamp = params.get_mut("BP_STAMP").unwrap();
        // flip one hex character
        let flipped = if stamp.starts_with('A') { "B" } else { "A" };
        stamp.replace_range(0..1, flipped);
        assert!(!client().verify_stamp(&params));
    }

    #[test]
    fn verify_stamp_rejects_reordered_fields() {
        let mut params = stamped_params("SECRET");
        params.insert("BP_STAMP_DEF".to_string(), "FIELD_B FIELD_A".to_string());
        assert!(!client().verify_stamp(&params));
    }

    #[test]
    fn verify_stamp_rejects_changed_value() {
        let mut params = stamped_params("SECRET");
        params.insert("FIELD_B".to_string(), "z".to_string());
        assert!(!client().verify_stamp(&params));
    }

    #[test]
    fn verify_stamp_rejects_wrong_secret() {
        assert!(!client().verify_stamp(&stamped_params("OTHER")));
    }

    #[test]
    fn verify_stamp_rejects_missing_stamp() {
        let mut params = stamped_params("SECRET");
        params.remove("BP_STAMP");
        assert!(!client().verify_stamp(&params));
    }

    #[test]
    fn rebill_notification_extracts_known_fields() {
        let mut params = HashMap::new();
        params.insert("rebill_id".to_string(), "1234".to_string());
        params.insert("status".to_string(), "stopped".to_string());
        let notification = rebill_notification(&params);
        assert_eq!(notification.rebill_id, "1234");
        assert_eq!(notification.status, Some(RebillStatus::Stopped));
    }

    #[test]
    fn rebill_notification_tolerates_unknown_status() {
        let mut params = HashMap::new();
        params.insert("rebill_id".to_string(), "1234".to_string());
        params.insert("status".to_string(), "bogus".to_string());
        let notification = rebill_notification(&params);
        assert_eq!(notification.status, None);
    }
}
