// --- File: crates/bluepay_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which transaction type an ordinary payment submits.
///
/// `Authorize` sends AUTH (funds reserved, captured later), `AuthorizeAndCapture`
/// sends SALE (funds captured immediately).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactMode {
    Authorize,
    AuthorizeAndCapture,
}

impl Default for TransactMode {
    fn default() -> Self {
        TransactMode::Authorize
    }
}

// --- BluePay Config ---
// Holds non-secret BluePay config. The secret key is loaded directly from the
// env var BLUEPAY_SECRET_KEY and is never part of the config files.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BluePayConfig {
    pub account_id: String, // Mandatory
    pub user_id: String,    // Mandatory
    /// Route requests to the TEST environment instead of LIVE.
    #[serde(default = "default_use_sandbox")]
    pub use_sandbox: bool,
    #[serde(default)]
    pub transact_mode: TransactMode,
}

fn default_use_sandbox() -> bool {
    true
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_bluepay: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub bluepay: Option<BluePayConfig>,
}
