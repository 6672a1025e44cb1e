// --- File: crates/bluepay_gateway/src/seal.rs ---
//! Tamper-proof seal construction.
//!
//! BluePay signs requests with an HMAC-SHA512 over a documented concatenation
//! of field values, hex-encoded upper-case. Two recipes exist and they are
//! deliberately kept as two separate functions:
//!
//! * [`transaction_seal`] — the fixed five-field recipe of the bp20post
//!   endpoint (`ACCOUNT_ID MODE TRANS_TYPE AMOUNT MASTER_ID`), where the
//!   secret only keys the HMAC;
//! * [`stamp_seal`] — the secret-prefixed schema recipe used by the rebilling
//!   admin endpoint and by inbound BP_STAMP webhook verification, where the
//!   secret is also folded into the signed string itself.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

fn hmac_upper_hex(secret_key: &str, message: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Seal for standard bp20post transactions.
///
/// The message is `account_id + mode + trans_type + amount + master_id`, with
/// absent amount/master-id contributing empty strings. Deterministic: equal
/// inputs always produce the same 128-char upper-hex digest.
pub fn transaction_seal(
    secret_key: &str,
    account_id: &str,
    mode: &str,
    trans_type: &str,
    amount: &str,
    master_id: &str,
) -> String {
    let message = format!("{account_id}{mode}{trans_type}{amount}{master_id}");
    hmac_upper_hex(secret_key, &message)
}

/// Secret-prefixed schema seal: HMAC over `secret_key` followed by each part
/// in order. The parts are caller-defined — the rebill admin recipe passes
/// `[account_id, verb, rebill_id]`, webhook verification passes the values of
/// the fields named in BP_STAMP_DEF.
pub fn stamp_seal<'a, I>(secret_key: &str, parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut message = String::from(secret_key);
    for part in parts {
        message.push_str(part);
    }
    hmac_upper_hex(secret_key, &message)
}

/// Helper for constant-time string comparison.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
