use chatstream_api::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads `.env` as well, so RUST_LOG set there applies to the filter below.
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("chatstream_server=info,chatstream_api=info,tower_http=debug")
            }),
        )
        .init();

    chatstream_server::launch(settings).await
}
