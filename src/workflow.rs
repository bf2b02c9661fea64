use std::sync::Arc;

use tracing::instrument;

use crate::domain::{FormErrors, Subscription, SubscriptionForm, SubscriptionId, validate};
use crate::notifier::{DispatchError, Notifier};
use crate::repository::{RepositoryError, SubscriptionRepository};
use crate::routers::error_chain_fmt;

#[derive(Debug)]
pub enum Submission {
    Accepted(Subscription),
    Rejected(FormErrors),
}

#[derive(thiserror::Error)]
pub enum SubscriptionError {
    #[error("Failed to store the subscription.")]
    Persistence(#[source] RepositoryError),
    #[error(
        "Subscription {subscription_id} was stored but the confirmation \
        email could not be sent."
    )]
    Dispatch {
        subscription_id: SubscriptionId,
        #[source]
        source: DispatchError,
    },
}

impl std::fmt::Debug for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct SubscriptionWorkflow {
    repository: Arc<dyn SubscriptionRepository>,
    notifier: Arc<dyn Notifier>,
}

impl SubscriptionWorkflow {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Validates the form, then stores and confirms a valid subscription.
    /// Invalid forms have no side effects.
    #[instrument(
        name = "Submit subscription form",
        skip(self, form),
        fields(subscriber_email = %form.email)
    )]
    pub async fn submit(
        &self,
        form: &SubscriptionForm,
    ) -> Result<Submission, SubscriptionError> {
        let new_subscription = match validate(form) {
            Ok(new_subscription) => new_subscription,
            Err(errors) => {
                tracing::info!(%errors, "Rejected invalid subscription form");
                return Ok(Submission::Rejected(errors));
            }
        };

        let subscription = self
            .repository
            .create(&new_subscription)
            .await
            .map_err(SubscriptionError::Persistence)?;
        tracing::info!(subscription_id = %subscription.id, "Stored subscription");

        self.notifier.notify(&new_subscription).await.map_err(|source| {
            SubscriptionError::Dispatch {
                subscription_id: subscription.id,
                source,
            }
        })?;

        Ok(Submission::Accepted(subscription))
    }

    #[instrument(name = "Fetch subscription detail", skip(self))]
    pub async fn detail(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        self.repository.get(id).await
    }
}
