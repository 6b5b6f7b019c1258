use anyhow::Context;

use tradelane_api::app::{build_app, services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tradelane_observability::init();

    let addr = std::env::var("TRADELANE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let dev = match std::env::var("DATABASE_URL") {
        Ok(url) => services::postgres_deps(&url)
            .await
            .context("connecting to postgres")?,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; orders are stored in memory");
            services::in_memory_deps()
        }
    };

    if std::env::var("TRADELANE_DEV_SEED").is_ok() {
        services::seed_dev_fixtures(&dev);
    }

    let app = build_app(dev.deps);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
