//! Application state shared across handlers

use std::sync::Arc;

use crate::catalog::CatalogService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}
