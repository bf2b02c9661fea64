mod health_check;
mod home;
pub(crate) mod pages;
mod subscriptions;

use std::sync::Arc;

use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub fn get_router(app_state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", get(home::home))
        .route("/health", get(health_check::health_check))
        .merge(subscriptions::router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub(crate) fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
