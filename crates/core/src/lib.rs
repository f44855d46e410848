//! Formify domain core.
//!
//! Holds the form schema and submission contract shared by the admin
//! editor, the persistence layer, the public endpoints and the storefront
//! renderer. Nothing in this crate performs I/O.

pub mod editor;
pub mod error;
pub mod form;
pub mod normalize;
pub mod render;
pub mod settings;
pub mod submission;
pub mod types;
pub mod validation;
