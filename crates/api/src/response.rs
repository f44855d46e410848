//! Shared response bodies for API handlers.
//!
//! Entities are returned as bare JSON (no envelope); mutations without an
//! entity to return answer with one of the acknowledgements below.

use formify_core::types::DbId;
use serde::Serialize;

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": true, "id": ... }` for a stored submission.
#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub success: bool,
    pub id: DbId,
}

impl SubmittedResponse {
    pub fn new(id: DbId) -> Self {
        Self { success: true, id }
    }
}
