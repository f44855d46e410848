use std::sync::Arc;

use formify_core::render::{FormRenderer, RenderContext};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: formify_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Compiled storefront templates.
    pub renderer: Arc<FormRenderer>,
}

impl AppState {
    /// Build state from a pool and configuration, compiling the templates.
    pub fn new(
        pool: formify_db::DbPool,
        config: ServerConfig,
    ) -> Result<Self, formify_core::error::CoreError> {
        Ok(Self {
            pool,
            config: Arc::new(config),
            renderer: Arc::new(FormRenderer::new()?),
        })
    }

    /// Where rendered forms should send their submissions.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.config.public_app_url.clone())
    }
}
