//! Application bootstrap shared by the server binary and the CLI.

use anyhow::Context;
use estate_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every resource module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize modules, serve until a shutdown signal arrives, then stop modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let registry = registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;

    let served =
        estate_http::start_server(&registry, &settings, estate_http::shutdown_signal()).await;

    // Stop modules even if the server failed; report the server error first.
    let stopped = registry.stop_modules().await;
    served?;
    stopped.context("module shutdown failed")?;

    tracing::info!("estate-app stopped");
    Ok(())
}

/// Full route table as `(method, path, operation)` lines, honoring the API prefix
pub fn route_lines(registry: &ModuleRegistry, settings: &Settings) -> Vec<String> {
    registry
        .route_table()
        .into_iter()
        .map(|(module, route)| {
            let mount = format!("{}/{}", settings.server.api_prefix, module);
            let path = if route.path == "/" {
                mount
            } else {
                format!("{mount}{}", route.path)
            };
            format!("{:<7} {:<24} {}", route.method, path, route.operation)
        })
        .collect()
}
