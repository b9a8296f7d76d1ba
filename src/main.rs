use anyhow::Context;
use estate_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load estate settings")?;
    estate_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "estate-app bootstrap starting"
    );

    estate_app::app::serve(settings).await
}
