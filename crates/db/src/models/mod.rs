//! Row structs and their conversions into the core schema types.
//!
//! Rows carry JSONB columns as raw `serde_json::Value`; the conversions
//! decode them leniently so one corrupt row cannot break a listing.

pub mod dashboard;
pub mod form;
pub mod response;
pub mod status;
