//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the
//! corresponding `*_statuses` table.

use formify_core::form::FormStatus;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant by its database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                $(
                    if id == $val {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Form publication status (`form_statuses`).
    FormStatusId {
        Active = 1,
        Inactive = 2,
    }
}

impl From<FormStatus> for FormStatusId {
    fn from(status: FormStatus) -> Self {
        match status {
            FormStatus::Active => FormStatusId::Active,
            FormStatus::Inactive => FormStatusId::Inactive,
        }
    }
}

impl From<FormStatusId> for FormStatus {
    fn from(status: FormStatusId) -> Self {
        match status {
            FormStatusId::Active => FormStatus::Active,
            FormStatusId::Inactive => FormStatus::Inactive,
        }
    }
}

/// Map a stored status id to the schema status.
///
/// Unknown ids are treated as inactive so they are never served publicly.
pub fn form_status_from_id(id: StatusId) -> FormStatus {
    FormStatusId::from_id(id)
        .map(FormStatus::from)
        .unwrap_or_else(|| {
            tracing::warn!(status_id = id, "Unknown form status id");
            FormStatus::Inactive
        })
}
