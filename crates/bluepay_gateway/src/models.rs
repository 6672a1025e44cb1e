// --- File: crates/bluepay_gateway/src/models.rs ---

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Wire value types ---
// Amounts, expiry dates and rebill periods stay typed until the moment they
// are written into the form body; only `to_wire` produces gateway strings.

/// A settlement amount in USD cents. BluePay settles in USD with two-decimal
/// formatting; currency conversion happens upstream of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Amount(i64);

// Deserialization goes through `from_cents` so the non-negative invariant
// holds for amounts arriving in serialized requests too.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Amount::from_cents)
    }
}

impl Amount {
    pub fn from_cents(cents: i64) -> Self {
        Amount(cents.max(0))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Renders the gateway wire format, e.g. `1050` -> `"10.50"`.
    pub fn to_wire(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// Card expiry; serialized as MMYY on the wire (CARD_EXPIRE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardExpiry {
    pub month: u8,
    pub year: u16,
}

impl CardExpiry {
    pub fn to_wire(&self) -> String {
        format!("{:02}{:02}", self.month, self.year % 100)
    }
}

/// Rebill cycle period unit. Wire names are the upstream platform's plural
/// period names with the trailing `s` stripped and upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum RebillPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl RebillPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebillPeriod::Day => "DAY",
            RebillPeriod::Week => "WEEK",
            RebillPeriod::Month => "MONTH",
            RebillPeriod::Year => "YEAR",
        }
    }
}

/// A rebill interval expression, e.g. `"1 MONTH"` or `"3 WEEK"`.
/// Used both for REB_EXPR and for REB_FIRST_DATE (the first rebill fires one
/// interval after the initial sale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RebillExpression {
    pub length: u32,
    pub period: RebillPeriod,
}

impl RebillExpression {
    pub fn new(length: u32, period: RebillPeriod) -> Self {
        RebillExpression { length, period }
    }

    pub fn to_wire(&self) -> String {
        format!("{} {}", self.length, self.period.as_str())
    }
}

/// Scheduling fields for a recurring sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RebillSchedule {
    pub first_date: RebillExpression,
    pub expression: RebillExpression,
    /// Number of follow-up charges. The initial sale is not counted, so a
    /// subscription of N total cycles passes N - 1 here; `None` rebills until
    /// stopped.
    pub cycles: Option<u32>,
    pub amount: Amount,
}

impl RebillSchedule {
    /// The common case: rebill the sale amount every `expression`, starting
    /// one interval from now.
    pub fn every(expression: RebillExpression, cycles: Option<u32>, amount: Amount) -> Self {
        RebillSchedule {
            first_date: expression,
            expression,
            cycles,
            amount,
        }
    }
}

// --- Per-operation request structs ---

/// Card payment details (PAYMENT_ACCOUNT / CARD_EXPIRE / CARD_CVV2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardDetails {
    pub number: String,
    pub expiry: CardExpiry,
    pub cvv2: String,
}

/// Customer billing fields. None of these are validated here; BluePay's AVS
/// answers in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BillingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    /// State/province abbreviation.
    pub state: String,
    /// Three-letter ISO country code.
    pub country: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

/// Everything a SALE/AUTH submission carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SaleRequest {
    pub card: CardDetails,
    pub billing: BillingAddress,
    pub amount: Amount,
    pub order_id: String,
    pub invoice_id: String,
    pub customer_ip: String,
    /// Merchant-defined identifier (the upstream platform stores the customer id here).
    pub custom_id1: String,
    /// Second merchant-defined identifier (customer GUID upstream).
    pub custom_id2: String,
}

// --- Webhook types ---

/// Rebill status vocabulary reported by BluePay's rebilling notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum RebillStatus {
    Active,
    Expired,
    Failed,
    Error,
    Deleted,
    Stopped,
}

impl RebillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebillStatus::Active => "active",
            RebillStatus::Expired => "expired",
            RebillStatus::Failed => "failed",
            RebillStatus::Error => "error",
            RebillStatus::Deleted => "deleted",
            RebillStatus::Stopped => "stopped",
        }
    }
}

impl FromStr for RebillStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(RebillStatus::Active),
            "expired" => Ok(RebillStatus::Expired),
            "failed" => Ok(RebillStatus::Failed),
            "error" => Ok(RebillStatus::Error),
            "deleted" => Ok(RebillStatus::Deleted),
            "stopped" => Ok(RebillStatus::Stopped),
            _ => Err(()),
        }
    }
}

/// A verified rebilling notification, reduced to the fields order processing
/// cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RebillNotification {
    pub rebill_id: String,
    pub status: Option<RebillStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_formats_two_decimals() {
        assert_eq!(Amount::from_cents(1).to_wire(), "0.01");
        assert_eq!(Amount::from_cents(1000).to_wire(), "10.00");
        assert_eq!(Amount::from_cents(1050).to_wire(), "10.50");
        assert_eq!(Amount::from_cents(199).to_wire(), "1.99");
    }

    #[test]
    fn amount_is_clamped_non_negative() {
        assert_eq!(Amount::from_cents(-500).to_wire(), "0.00");
    }

    #[test]
    fn amount_deserialization_clamps_too() {
        let amount: Amount = serde_json::from_str("-550").unwrap();
        assert_eq!(amount.to_wire(), "0.00");
        let amount: Amount = serde_json::from_str("1050").unwrap();
        assert_eq!(amount.to_wire(), "10.50");
    }

    #[test]
    fn card_expiry_formats_mmyy() {
        let exp = CardExpiry { month: 1, year: 2027 };
        assert_eq!(exp.to_wire(), "0127");
        let exp = CardExpiry { month: 12, year: 2030 };
        assert_eq!(exp.to_wire(), "1230");
    }

    #[test]
    fn rebill_expression_formats_singular_upper() {
        assert_eq!(
            RebillExpression::new(1, RebillPeriod::Month).to_wire(),
            "1 MONTH"
        );
        assert_eq!(
            RebillExpression::new(3, RebillPeriod::Week).to_wire(),
            "3 WEEK"
        );
        assert_eq!(
            RebillExpression::new(14, RebillPeriod::Day).to_wire(),
            "14 DAY"
        );
    }

    #[test]
    fn rebill_status_round_trips_lowercase_names() {
        for s in ["active", "expired", "failed", "error", "deleted", "stopped"] {
            let parsed: RebillStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("STOPPED".parse::<RebillStatus>().is_err());
    }
}
