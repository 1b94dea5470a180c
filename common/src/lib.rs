//! Platform-independent core of the restaurant ordering client.
//!
//! Everything here compiles natively and to wasm: the records exchanged
//! with the backend, the order progress and cart identity models, the
//! persisted application context and the poll scheduling rules. The Yew
//! frontend only wires these to the browser.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod model;
pub mod polling;
pub mod progress;
pub mod requests;
pub mod responses;
pub mod schedule;
pub mod store;
