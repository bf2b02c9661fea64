mod detail;
mod new;

use crate::app_state::AppState;
use axum::routing::get;
use std::sync::Arc;

pub fn router() -> axum::routing::Router<Arc<AppState>> {
    axum::Router::new()
        .route(
            "/inscricao/",
            get(new::subscription_form).post(new::subscribe),
        )
        .route("/inscricao/{id}/", get(detail::subscription_detail))
}
