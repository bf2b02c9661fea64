use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{RepositoryError, SubscriptionRepository};
use crate::domain::{NewSubscription, Subscription, SubscriptionId};

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    // Identifiers are the 1-based position in the vector.
    subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<Subscription>>, RepositoryError>
    {
        self.subscriptions
            .lock()
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    #[tracing::instrument(name = "Store subscription in memory", skip_all)]
    async fn create(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        let mut subscriptions = self.lock()?;
        let id = i64::try_from(subscriptions.len() + 1)
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        let stored = Subscription {
            id: SubscriptionId::from(id),
            name: subscription.name.as_ref().to_string(),
            cpf: subscription.cpf.as_ref().to_string(),
            email: subscription.email.as_ref().to_string(),
            phone: subscription.phone.as_ref().to_string(),
            created_at: OffsetDateTime::now_utc(),
            paid: false,
        };
        subscriptions.push(stored.clone());

        Ok(stored)
    }

    async fn get(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let subscriptions = self.lock()?;
        let found = usize::try_from(id.into_inner())
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| subscriptions.get(index))
            .cloned();

        Ok(found)
    }

    async fn exists(&self) -> Result<bool, RepositoryError> {
        Ok(!self.lock()?.is_empty())
    }
}
