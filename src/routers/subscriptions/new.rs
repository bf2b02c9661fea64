use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Form, State, rejection::FormRejection},
    http::{
        HeaderValue, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    acknowledgement,
    app_state::AppState,
    domain::{FormErrors, SubscriptionForm},
    routers::pages,
    utils::AppError,
    workflow::Submission,
};

pub(crate) const MALFORMED_FORM_MESSAGE: &str =
    "Não foi possível ler o formulário. Preencha os campos novamente.";

#[derive(Deserialize)]
pub(crate) struct SubmittedForm {
    #[serde(default)]
    csrfmiddlewaretoken: String,
    #[serde(flatten)]
    form: SubscriptionForm,
}

fn render_form(
    app_state: &AppState,
    form: &SubscriptionForm,
    errors: &FormErrors,
) -> Html<String> {
    let token = app_state.csrf_tokens.issue();
    Html(pages::subscription_form(form, errors, &token))
}

pub(crate) async fn subscription_form(
    State(app_state): State<Arc<AppState>>,
) -> Html<String> {
    render_form(&app_state, &SubscriptionForm::default(), &FormErrors::default())
}

#[instrument(
    name = "Adding a new subscription",
    skip_all,
    fields(
        request_id = %uuid::Uuid::new_v4(),
        subscriber_email = tracing::field::Empty,
        subscriber_name = tracing::field::Empty
    )
)]
pub(crate) async fn subscribe(
    State(app_state): State<Arc<AppState>>,
    submitted: Result<Form<SubmittedForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(SubmittedForm {
        csrfmiddlewaretoken,
        form,
    }) = match submitted {
        Ok(submitted) => submitted,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed subscription form");
            let mut errors = FormErrors::default();
            errors.add_non_field(MALFORMED_FORM_MESSAGE);
            return Ok(
                render_form(&app_state, &SubscriptionForm::default(), &errors)
                    .into_response(),
            );
        }
    };

    if !app_state.csrf_tokens.verify(&csrfmiddlewaretoken) {
        tracing::warn!("Rejected subscription form without a valid CSRF token");
        return Err(AppError::E403);
    }

    let span = tracing::Span::current();
    span.record("subscriber_email", tracing::field::display(&form.email));
    span.record("subscriber_name", tracing::field::display(&form.name));

    let subscription = match app_state
        .workflow
        .submit(&form)
        .await
        .context("Failed to complete the subscription.")?
    {
        Submission::Accepted(subscription) => subscription,
        Submission::Rejected(errors) => {
            return Ok(render_form(&app_state, &form, &errors).into_response());
        }
    };

    let token = app_state.acknowledgements.issue(subscription.id);
    let location = HeaderValue::try_from(subscription.absolute_url())
        .context("Detail url is not a valid header value")?;
    let cookie =
        HeaderValue::try_from(acknowledgement::set_cookie_value(&token))
            .context("Acknowledgement cookie is not a valid header value")?;

    Ok((StatusCode::FOUND, [(LOCATION, location), (SET_COOKIE, cookie)])
        .into_response())
}
