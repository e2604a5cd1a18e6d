use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    routing::{get, post},
    Router,
};
use chatstream_api::auth::PasswordHasher;
use chatstream_api::config::{SessionSettings, StorageBackend};
use chatstream_api::db::{self, MemoryUserStore, PgUserStore, UserStore};
use chatstream_api::{Settings, UserService};
use tower_http::trace::TraceLayer;
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::handlers;

/// Shared handler state.
pub struct AppState<S> {
    pub service: Arc<UserService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// Build the router with the session layer applied.
pub fn app<S, T>(service: UserService<S>, session_store: T, settings: &SessionSettings) -> Router
where
    S: UserStore,
    T: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(settings.cookie_name.clone())
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.inactivity_days)));

    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .route("/logout", post(handlers::logout::<S>))
        .route("/authentication", get(handlers::get_authentication::<S>))
        .route("/user/{id}", get(handlers::get_user::<S>))
        .route("/users", get(handlers::get_users::<S>))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire up storage from `settings` and serve until ctrl-c.
pub async fn launch(settings: Settings) -> anyhow::Result<()> {
    let hasher = PasswordHasher::from_settings(&settings.password)?;

    match settings.storage.backend {
        StorageBackend::Postgres => {
            let pool = db::connect(&settings.database)
                .await
                .context("Failed to connect to database")?;

            let session_store = PostgresStore::new(pool.clone());
            session_store
                .migrate()
                .await
                .context("Failed to migrate session store")?;
            let deletion_task = tokio::task::spawn(delete_expired_sessions(session_store.clone()));

            let service = UserService::new(PgUserStore::new(pool), hasher);
            let result = serve(app(service, session_store, &settings.session), &settings).await;
            deletion_task.abort();
            result
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users and sessions are lost on restart");
            let service = UserService::new(MemoryUserStore::new(), hasher);
            serve(app(service, MemoryStore::default(), &settings.session), &settings).await
        }
    }
}

async fn serve(router: Router, settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Sweep expired session records once a minute.
async fn delete_expired_sessions(store: PostgresStore) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            tracing::warn!("Failed to delete expired sessions: {}", e);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
