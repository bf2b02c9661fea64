use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::{
    acknowledgement::{self, SUCCESS_MESSAGE},
    app_state::AppState,
    domain::SubscriptionId,
    routers::pages,
    utils::AppError,
};

#[instrument(name = "Showing a subscription", skip(app_state, headers))]
pub(crate) async fn subscription_detail(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id: SubscriptionId = id.parse().map_err(|_| AppError::E404)?;

    let subscription = app_state
        .workflow
        .detail(id)
        .await
        .context("Failed to fetch the subscription.")?
        .ok_or(AppError::E404)?;

    let token = acknowledgement::token_from_cookies(&headers);
    let acknowledged = token
        .as_deref()
        .is_some_and(|token| app_state.acknowledgements.consume(token, id));
    let message = acknowledged.then_some(SUCCESS_MESSAGE);

    let mut response =
        Html(pages::subscription_detail(&subscription, message)).into_response();
    if token.is_some() {
        response.headers_mut().insert(
            SET_COOKIE,
            HeaderValue::try_from(acknowledgement::clear_cookie_value())
                .context("Cleared cookie is not a valid header value")?,
        );
    }

    Ok(response)
}
