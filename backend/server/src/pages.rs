//! Content pages, each rendered from `<TEMPLATE_DIR>/<name>.html`.
use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{MethodRouter, get},
};
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// Path and template of every page without a form handler.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "index"),
    ("/about-us", "about-us"),
    ("/professionals", "professionals"),
    ("/products-and-services", "products-and-services"),
    ("/thank-you-professionals", "thank-you-professionals"),
    ("/platform-t&c", "platform-t&c"),
    ("/privacy-policy", "privacy-policy"),
    ("/survey-t&c", "survey-t&c"),
];

pub fn page(template: &'static str) -> MethodRouter<Arc<AppState>> {
    get(move |State(state): State<Arc<AppState>>| render(state, template))
}

async fn render(state: Arc<AppState>, template: &str) -> Result<Html<String>, AppError> {
    let path = state.config.template_dir.join(format!("{template}.html"));

    tokio::fs::read_to_string(&path)
        .await
        .map(Html)
        .map_err(|e| {
            warn!("Failed to read template {}: {e}", path.display());
            AppError::NotFound
        })
}
