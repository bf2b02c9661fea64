use async_trait::async_trait;
use tracing::instrument;

use crate::domain::NewSubscription;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::email_client::EmailClient;
use crate::routers::error_chain_fmt;
use crate::utils::escape_html;

pub const CONFIRMATION_SUBJECT: &str = "Confirmação de Inscrição";

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to dispatch the confirmation email.")]
    Transport(#[source] anyhow::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Sends the confirmation of a validated subscription. Implementations must
/// send exactly one message per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        subscription: &NewSubscription,
    ) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationMessage {
    pub subject: &'static str,
    pub sender: SubscriberEmail,
    pub recipients: [SubscriberEmail; 2],
    pub text_body: String,
    pub html_body: String,
}

impl ConfirmationMessage {
    pub fn new(organizer: &SubscriberEmail, subscription: &NewSubscription) -> Self {
        let name = subscription.name.as_ref();
        let cpf = subscription.cpf.as_ref();
        let email = subscription.email.as_ref();
        let phone = subscription.phone.as_ref();

        let text_body = format!(
            "Olá! Tudo bem?\n\n\
            Muito obrigado por se inscrever no Eventex.\n\n\
            Estes foram os dados que você nos forneceu em sua inscrição:\n\n\
            Nome: {name}\n\
            CPF: {cpf}\n\
            Email: {email}\n\
            Telefone: {phone}\n\n\
            Em até 48h úteis a nossa equipe entrará em contato com você \
            para concluirmos a sua matrícula.\n\n\
            Atenciosamente,\n\
            Equipe Eventex"
        );
        let html_body = format!(
            "<p>Olá! Tudo bem?</p>\
            <p>Muito obrigado por se inscrever no Eventex.</p>\
            <p>Estes foram os dados que você nos forneceu em sua inscrição:</p>\
            <ul>\
            <li>Nome: {}</li>\
            <li>CPF: {}</li>\
            <li>Email: {}</li>\
            <li>Telefone: {}</li>\
            </ul>\
            <p>Em até 48h úteis a nossa equipe entrará em contato com você \
            para concluirmos a sua matrícula.</p>\
            <p>Atenciosamente,<br />Equipe Eventex</p>",
            escape_html(name),
            escape_html(cpf),
            escape_html(email),
            escape_html(phone),
        );

        Self {
            subject: CONFIRMATION_SUBJECT,
            sender: organizer.clone(),
            recipients: [organizer.clone(), subscription.email.clone()],
            text_body,
            html_body,
        }
    }
}

pub struct EmailNotifier {
    email_client: EmailClient,
}

impl EmailNotifier {
    pub fn new(email_client: EmailClient) -> Self {
        Self { email_client }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    #[instrument(
        name = "Send subscription confirmation email",
        skip(self, subscription),
        fields(subscriber_email = %subscription.email)
    )]
    async fn notify(
        &self,
        subscription: &NewSubscription,
    ) -> Result<(), DispatchError> {
        let message =
            ConfirmationMessage::new(self.email_client.sender(), subscription);

        self.email_client
            .send_email(
                &message.recipients,
                message.subject,
                &message.text_body,
                &message.html_body,
            )
            .await
            .map_err(|e| DispatchError::Transport(e.into()))
    }
}
