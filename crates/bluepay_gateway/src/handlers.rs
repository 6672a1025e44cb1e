// --- File: crates/bluepay_gateway/src/handlers.rs ---

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form};
use bluepay_config::AppConfig;
use tracing::{error, info, warn};

use crate::logic::{rebill_notification, BluePayClient};
use crate::models::RebillStatus;

// Define shared state needed by BluePay handlers
#[derive(Clone)]
pub struct BluePayState {
    pub config: Arc<AppConfig>,
}

/// Handler for BluePay rebilling notifications.
///
/// BluePay POSTs a form carrying BP_STAMP_DEF/BP_STAMP plus the rebill
/// fields. Anything short of a verified, resolvable notification is logged
/// and dropped — the endpoint always answers 200 so the gateway does not
/// keep retrying a notification we will never accept.
#[axum::debug_handler]
pub async fn rebilling_webhook_handler(
    State(state): State<Arc<BluePayState>>,
    Form(params): Form<HashMap<String, String>>,
) -> StatusCode {
    let Some(bluepay_config) = state.config.bluepay.as_ref() else {
        error!("BluePay rebilling notification received but BluePay is not configured");
        return StatusCode::OK;
    };

    let secret_key = match bluepay_config::secret_key() {
        Ok(secret_key) => secret_key,
        Err(e) => {
            error!("BluePay rebilling notification dropped: {}", e);
            return StatusCode::OK;
        }
    };

    let client = BluePayClient::from_config(bluepay_config, secret_key);

    if !client.verify_stamp(&params) {
        error!("BluePay recurring error: the notification has been tampered with");
        return StatusCode::OK;
    }

    let notification = rebill_notification(&params);

    // Resolve the transaction the rebill sequence was created from; order
    // processing upstream keys on that authorization id.
    let auth_id = client
        .template_id(&notification.rebill_id)
        .await
        .unwrap_or_default();
    if auth_id.is_empty() {
        error!(
            "BluePay recurring error: the initial transaction for rebill {} was not found",
            notification.rebill_id
        );
        return StatusCode::OK;
    }

    match notification.status {
        Some(RebillStatus::Active) | Some(RebillStatus::Expired) => {
            info!(
                "BluePay recurring payment for transaction {} (rebill {}) succeeded",
                auth_id, notification.rebill_id
            );
        }
        Some(RebillStatus::Failed) | Some(RebillStatus::Error) => {
            warn!(
                "BluePay recurring payment for transaction {} (rebill {}) failed: {}",
                auth_id,
                notification.rebill_id,
                notification.status.map(|s| s.as_str()).unwrap_or("")
            );
        }
        Some(RebillStatus::Deleted) | Some(RebillStatus::Stopped) => {
            info!(
                "BluePay recurring order for transaction {} was {}",
                auth_id,
                notification.status.map(|s| s.as_str()).unwrap_or("")
            );
        }
        None => {
            warn!(
                "BluePay rebilling notification for {} carried an unknown status",
                notification.rebill_id
            );
        }
    }

    StatusCode::OK
}
