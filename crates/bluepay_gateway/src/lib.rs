// --- File: crates/bluepay_gateway/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod response;
pub mod routes;
pub mod seal;

pub use error::BluePayError;
pub use logic::{BluePayClient, REBILLING_URL, TRANSACTION_URL};
pub use models::{
    Amount, BillingAddress, CardDetails, CardExpiry, RebillExpression, RebillNotification,
    RebillPeriod, RebillSchedule, RebillStatus, SaleRequest,
};
pub use response::GatewayResponse;
pub use routes::routes;
