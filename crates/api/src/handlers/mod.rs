//! HTTP handlers, grouped by surface.
//!
//! Admin handlers take a [`crate::middleware::auth::ShopSession`] and only
//! ever read or write that shop's rows. Public handlers are unauthenticated
//! and only see active forms.

pub mod dashboard;
pub mod forms;
pub mod public;
pub mod responses;

use formify_core::error::CoreError;
use formify_core::types::{parse_id, DbId};

use crate::error::AppError;

/// Parse an id from a path or query string, mapping garbage to `missing`.
///
/// An unparseable id cannot name an existing row, so it gets the same
/// error as an id that does not resolve.
pub(crate) fn parse_id_or(raw: &str, missing: CoreError) -> Result<DbId, AppError> {
    parse_id(raw).ok_or(AppError::Core(missing))
}
