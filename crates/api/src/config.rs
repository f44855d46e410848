use std::str::FromStr;

use crate::auth::session_token::ShopifyConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the Shopify credentials has a local-development
/// default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the admin API. Public storefront routes allow
    /// any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Externally reachable base URL of this server, without a trailing
    /// slash. Rendered forms and the embed script submit here.
    pub public_app_url: String,
    pub shopify: ShopifyConfig,
}

impl ServerConfig {
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `3000`                       |
    /// | `CORS_ORIGINS`         | `https://admin.shopify.com`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `PUBLIC_APP_URL`       | `http://localhost:{PORT}`    |
    ///
    /// `CORS_ORIGINS` is comma-separated. See [`ShopifyConfig::from_env`]
    /// for the credentials.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers or missing credentials.
    pub fn from_env() -> Self {
        let port: u16 = parse_var("PORT", 3000);

        Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            cors_origins: split_list(&var_or("CORS_ORIGINS", "https://admin.shopify.com")),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30),
            public_app_url: var_or("PUBLIC_APP_URL", &format!("http://localhost:{port}"))
                .trim_end_matches('/')
                .to_string(),
            shopify: ShopifyConfig::from_env(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} is not valid ({raw:?}): {e}")),
        Err(_) => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_list(" https://admin.shopify.com, ,http://localhost:3000 "),
            vec!["https://admin.shopify.com", "http://localhost:3000"]
        );
        assert!(split_list("").is_empty());
    }
}
