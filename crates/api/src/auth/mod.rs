//! Authentication primitives.
//!
//! - [`session_token`] -- verification of the session tokens the Shopify
//!   admin hands the embedded app.

pub mod session_token;
