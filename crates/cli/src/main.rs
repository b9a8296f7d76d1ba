use anyhow::Context;
use clap::{Parser, Subcommand};
use estate_kernel::settings::Settings;

/// Estate service command-line entrypoint
#[derive(Debug, Parser)]
#[command(name = "estate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C or SIGTERM
    Serve,
    /// Print every mounted route
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load estate settings")?;

    match cli.command {
        Command::Serve => {
            estate_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "estate CLI serving");
            estate_app::app::serve(settings).await
        }
        Command::Routes => {
            let registry = estate_app::app::registry();
            for line in estate_app::app::route_lines(&registry, &settings) {
                println!("{line}");
            }
            Ok(())
        }
    }
}
