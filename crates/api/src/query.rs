//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Optional `?shop=` filter.
///
/// On admin routes it must match the session's shop; on public routes it
/// restricts the lookup to that shop's forms.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    pub shop: Option<String>,
}

impl ShopParams {
    /// The shop, ignoring a blank value.
    pub fn shop(&self) -> Option<&str> {
        self.shop.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// `?id=` for delete endpoints that take the id as a query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}
