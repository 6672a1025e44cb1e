// --- File: crates/bluepay_common/src/http.rs ---

pub mod client;
