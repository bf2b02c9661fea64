use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::instrument;

use super::{RepositoryError, SubscriptionRepository};
use crate::domain::{NewSubscription, Subscription, SubscriptionId};

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SubscriptionRecord {
    id: i64,
    name: String,
    cpf: String,
    email: String,
    phone: String,
    created_at: OffsetDateTime,
    paid: bool,
}

impl From<SubscriptionRecord> for Subscription {
    fn from(r: SubscriptionRecord) -> Self {
        Self {
            id: SubscriptionId::from(r.id),
            name: r.name,
            cpf: r.cpf,
            email: r.email,
            phone: r.phone,
            created_at: r.created_at,
            paid: r.paid,
        }
    }
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    #[instrument(
        name = "Inserting a new subscription in the database",
        skip(self, subscription)
    )]
    async fn create(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        // id, created_at and paid come from column defaults
        let record = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            INSERT INTO subscriptions (name, cpf, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, cpf, email, phone, created_at, paid
            "#,
        )
        .bind(subscription.name.as_ref())
        .bind(subscription.cpf.as_ref())
        .bind(subscription.email.as_ref())
        .bind(subscription.phone.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {e:?}");
            e
        })?;

        Ok(record.into())
    }

    #[instrument(name = "Fetch subscription by id", skip(self))]
    async fn get(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let record = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT id, name, cpf, email, phone, created_at, paid
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Subscription::from))
    }

    #[instrument(name = "Check whether any subscription exists", skip(self))]
    async fn exists(&self) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM subscriptions)")
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
