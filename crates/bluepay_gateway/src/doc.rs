// --- File: crates/bluepay_gateway/src/doc.rs ---
#![allow(dead_code)] // Allow dead code for doc functions

#[cfg(feature = "openapi")]
use crate::models::RebillNotification;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

// Define a dummy function with the handler's attributes for utoipa
#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/api/bluepay/rebilling",
    responses(
        (status = 200, description = "Notification accepted (always 200; tampered or unresolvable notifications are logged and dropped)")
    ),
    tag = "BluePay"
)]
fn doc_rebilling_webhook_handler() {}

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_rebilling_webhook_handler
    ),
    components(
        schemas(RebillNotification)
    ),
    tags(
        (name = "BluePay", description = "BluePay Payment Gateway API")
    )
)]
pub struct BluePayApiDoc;
