/// Domain-level error taxonomy.
///
/// Storage failures are not represented here; the HTTP layer wraps
/// `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing or a payload has the wrong shape.
    #[error("{0}")]
    InvalidPayload(String),

    /// The entity does not exist, or is not visible to the caller.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Mutations scoped by shop that matched no row.
    #[error("{entity} not found or unauthorized")]
    NotFoundOrUnauthorized { entity: &'static str },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the `Form` not-found error used across handlers.
    pub fn form_not_found() -> Self {
        CoreError::NotFound { entity: "Form" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_public_contract() {
        assert_eq!(CoreError::form_not_found().to_string(), "Form not found");
        assert_eq!(
            CoreError::NotFoundOrUnauthorized { entity: "Form" }.to_string(),
            "Form not found or unauthorized"
        );
        assert_eq!(
            CoreError::InvalidPayload("Missing title or questions".into()).to_string(),
            "Missing title or questions"
        );
    }
}
