//! Backend of the professional-services portal: content pages, the contact
//! form, newsletter subscriptions and the professionals survey that issues
//! Temporary Registration Numbers (TRNs).
//!
//!
//!
//! # General Infrastructure
//! - One axum server renders the pages and accepts every form post
//! - Forms post `application/x-www-form-urlencoded`, multi-select answers as repeated keys
//! - Every form answers with a JSON notice: `{status, message}` plus `trn` for surveys
//! - Redis holds the submissions; see [`database`] for the layout
//!
//!
//!
//! # Routes
//!
//! | Path | GET | POST |
//! |---|---|---|
//! | `/`, `/about-us`, `/professionals`, `/products-and-services` | page | |
//! | `/thank-you-professionals`, `/platform-t&c`, `/privacy-policy`, `/survey-t&c` | page | |
//! | `/contact-us` | page | contact message |
//! | `/register` | page | always rejected |
//! | `/login` | page | always rejected |
//! | `/submit-survey` | | survey intake |
//! | `/subscribe` | | newsletter subscription |
//! | `/static/*` | site assets | |
//! | `/health` | `200` | |
//!
//!
//!
//! # Notes
//!
//! ## Register and login
//! Permanent membership is not open yet. Both endpoints answer `401` with a fixed
//! message and never touch storage; the survey's TRN stands in for registration.
//!
//! ## Duplicate submitters
//! The duplicate check runs before anything else so a returning submitter is told
//! they are registered rather than which question they skipped.
//!
//!
//!
//! # Setup
//!
//! Environment, also read from `.env`:
//! - `RUST_PORT`: listen port, default `5000`
//! - `REDIS_URL`: default `redis://127.0.0.1:6379`
//! - `STATIC_DIR`: default `static`
//! - `TEMPLATE_DIR`: default `templates`
//! - `RUST_LOG`: tracing filter, e.g. `info`
//!
//! Run the server.
//! ```sh
//! RUST_LOG=info cargo run -p portal
//! ```
//!
//! Submit a sample survey to it.
//! ```sh
//! cargo run -p tester -- survey
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod account;
pub mod config;
pub mod contact;
pub mod database;
pub mod error;
pub mod models;
pub mod pages;
pub mod routes;
pub mod state;
pub mod store;
pub mod subscription;
pub mod survey;
pub mod utils;
pub mod validation;

use pages::{PAGES, page};
use routes::{
    contact_handler, health_handler, login_handler, not_found_handler, register_handler,
    subscribe_handler, survey_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let pages = PAGES
        .iter()
        .fold(Router::new(), |router, &(path, template)| {
            router.route(path, page(template))
        });

    pages
        .route("/contact-us", page("contact-us").post(contact_handler))
        .route("/register", page("register").post(register_handler))
        .route("/login", page("login").post(login_handler))
        .route("/submit-survey", post(survey_handler))
        .route("/subscribe", post(subscribe_handler))
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
