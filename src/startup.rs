use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::IntoMakeService;
use axum::serve::Serve;
use sqlx::PgPool;

use crate::acknowledgement::AcknowledgementStore;
use crate::app_state::AppState;
use crate::configuration::{Settings, StorageBackend};
use crate::csrf::CsrfTokens;
use crate::notifier::EmailNotifier;
use crate::repository::{
    InMemorySubscriptionRepository, PostgresSubscriptionRepository,
    SubscriptionRepository,
};
use crate::routers;
use crate::workflow::SubscriptionWorkflow;

type Server = Serve<tokio::net::TcpListener, IntoMakeService<Router>, Router>;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, anyhow::Error> {
        let repository = Self::get_repository(&settings)?;
        Self::build_with_repository(settings, repository).await
    }

    /// Like `build`, with the storage backend supplied by the caller.
    pub async fn build_with_repository(
        settings: Settings,
        repository: Arc<dyn SubscriptionRepository>,
    ) -> Result<Self, anyhow::Error> {
        let addr = std::net::SocketAddr::from((
            settings.app_settings.host,
            settings.app_settings.port,
        ));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        let email_client = settings.email_client.client()?;
        let notifier = Arc::new(EmailNotifier::new(email_client));

        let app_state = Arc::new(AppState {
            workflow: SubscriptionWorkflow::new(repository, notifier),
            acknowledgements: AcknowledgementStore::new(),
            csrf_tokens: CsrfTokens::new(),
        });

        let app = routers::get_router(app_state);
        let server = axum::serve(listener, app.into_make_service());

        Ok(Self {
            port: server.local_addr()?.port(),
            server,
        })
    }

    fn get_repository(
        settings: &Settings,
    ) -> Result<Arc<dyn SubscriptionRepository>, anyhow::Error> {
        let storage = settings.app_settings.storage;
        tracing::info!(?storage, "Selecting subscription storage");

        Ok(match storage {
            StorageBackend::Postgres => {
                let db_url = settings.database.get_connection();
                let pool = PgPool::connect_lazy(&db_url)
                    .context("Failed to connect to the database")?;
                Arc::new(PostgresSubscriptionRepository::new(pool))
            }
            StorageBackend::InMemory => {
                Arc::new(InMemorySubscriptionRepository::new())
            }
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), anyhow::Error> {
        tracing::info!("Listening on {}", self.server.local_addr()?);
        self.server.await.context("Server stopped unexpectedly")
    }
}
