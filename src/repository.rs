mod in_memory;
mod postgres;

pub use in_memory::InMemorySubscriptionRepository;
pub use postgres::PostgresSubscriptionRepository;

use async_trait::async_trait;

use crate::domain::{NewSubscription, Subscription, SubscriptionId};
use crate::routers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error("A database error was encountered while accessing subscriptions.")]
    Database(#[from] sqlx::Error),
    #[error("Subscription storage is unavailable: {0}")]
    Unavailable(String),
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Storage for subscriptions. `create` must be atomic: a record is either
/// fully stored with a fresh identifier or not stored at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RepositoryError>;

    async fn get(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, RepositoryError>;

    async fn exists(&self) -> Result<bool, RepositoryError>;
}
