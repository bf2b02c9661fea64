use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::routers::{error_chain_fmt, pages};

#[derive(thiserror::Error)]
pub enum AppError {
    #[error("CSRF verification failed.")]
    E403,
    #[error("Not found.")]
    E404,
    #[error(transparent)]
    E500(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::E403 => StatusCode::FORBIDDEN,
            Self::E404 => StatusCode::NOT_FOUND,
            Self::E500(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = match &self {
            Self::E403 => pages::error_page(
                "Acesso negado",
                "Falha na verificação CSRF. A solicitação foi abortada.",
            ),
            Self::E404 => pages::error_page(
                "Página não encontrada",
                "A página que você procura não existe.",
            ),
            Self::E500(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Request failed"
                );
                pages::error_page(
                    "Erro interno",
                    "Não foi possível concluir a sua solicitação.",
                )
            }
        };

        let status_code = self.status_code();
        let mut response = (status_code, Html(body)).into_response();
        response
            .extensions_mut()
            .insert(std::sync::Arc::new(anyhow::anyhow!(self)));

        response
    }
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
