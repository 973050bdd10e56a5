use invoicedesk_api::app::{build_app, services::AppServices};
use invoicedesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invoicedesk_observability::init();

    let config = AppConfig::from_env()?;
    if config.database.is_none() {
        tracing::warn!("DATABASE_URL not set; using in-memory invoice store");
    }

    let services = AppServices::from_config(&config)?;
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
