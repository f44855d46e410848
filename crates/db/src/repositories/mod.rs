//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Admin-facing methods take the
//! authenticated shop and never touch another tenant's rows.

pub mod dashboard_repo;
pub mod form_repo;
pub mod response_repo;

pub use dashboard_repo::DashboardRepo;
pub use form_repo::FormRepo;
pub use response_repo::ResponseRepo;
