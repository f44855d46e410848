//! Request extractors for authentication.
//!
//! - [`auth::ShopSession`] -- Extracts the authenticated shop from a Shopify
//!   session token.

pub mod auth;
