use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretBox};
use serde::Serialize;

use crate::domain::subscriber_email::SubscriberEmail;

pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: SubscriberEmail,
    server_token: SecretBox<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    html_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        sender: SubscriberEmail,
        server_token: SecretBox<String>,
        timeout_milliseconds: u64,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_milliseconds))
            .build()
            .context("Failed to build the email HTTP client")?;
        let endpoint = Url::parse(base_url)
            .and_then(|url| url.join("email"))
            .with_context(|| format!("Invalid email API base url {base_url}"))?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            server_token,
        })
    }

    pub fn sender(&self) -> &SubscriberEmail {
        &self.sender
    }

    /// Sends one message addressed to every recipient, in order.
    pub async fn send_email(
        &self,
        recipients: &[SubscriberEmail],
        subject: &str,
        raw_content: &str,
        html_content: &str,
    ) -> Result<(), reqwest::Error> {
        let to = recipients
            .iter()
            .map(|recipient| recipient.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");

        let request = SendEmailRequest {
            from: self.sender.as_ref(),
            to: &to,
            subject,
            text_body: raw_content,
            html_body: html_content,
        };

        self.http_client
            .post(self.endpoint.clone())
            .header("X-Server-Token", self.server_token.expose_secret())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
