use axum::middleware;
use axum::routing::post;
use axum::Router;
use outlay::auth;
use outlay::config::Config;
use outlay::db::{create_pool, migrations};
use outlay::handlers;
use outlay::services::mailer::Mailer;
use outlay::state::AppState;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_cookies::CookieManagerLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outlay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting Outlay on {}", config.address());

    let db = create_pool(&config.database_path).expect("Failed to create database pool");

    {
        let conn = db.get().expect("Failed to get database connection");
        migrations::run_migrations(&conn).expect("Failed to run migrations");
    }

    let mailer = Mailer::from_config(&config).expect("Failed to configure mailer");

    let state = AppState {
        db,
        config: Arc::new(config.clone()),
        sessions: Arc::new(Mutex::new(HashSet::new())),
        mailer: Arc::new(mailer),
    };

    let app = Router::new()
        .merge(handlers::routes())
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(CookieManagerLayer::new())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.address())
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", config.address());

    axum::serve(listener, app).await.expect("Server error");
}
