/// Form and response primary keys are UUIDs generated by the server.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new time-ordered identifier.
///
/// UUID v7 sorts by creation time, so `ORDER BY created_at DESC, id DESC`
/// breaks timestamp ties in insertion order.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

/// Parse an identifier received in a path or query string.
///
/// Returns `None` for anything that is not a UUID; callers treat that the
/// same as an id that does not exist.
pub fn parse_id(raw: &str) -> Option<DbId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}
