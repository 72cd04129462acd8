//! Server binary: load config, open the SQLite pool, create tables, serve.

use items_api::{app, apply_migrations, connect, load_from_env, open_session, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("items_api=info,tower_http=info")),
        )
        .init();

    let config = load_from_env()?;
    let pool = connect(&config).await?;
    {
        let mut session = open_session(&pool).await?;
        apply_migrations(&mut session).await?;
    }

    let router = app(AppState::new(pool), &config);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
