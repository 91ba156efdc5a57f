// SPDX-License-Identifier: LGPL-3.0-only
//! `npclip-service`: publishes the clipboard service on the session bus.
//!
//! Usage: `npclip-service [CONFIG.toml]...`. Extra configuration files are
//! merged after the standard XDG locations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use env_logger::Env;
use npclip_services::{ClipboardBusService, ClipboardService, SettingsRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut settings = SettingsRegistry::new()
        .await
        .context("Failed to load settings")?;

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    for result in settings.load_from_paths_async(paths).await {
        result?;
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level())).init();

    let service = Arc::new(ClipboardService::from_settings(&settings));
    let bus = ClipboardBusService::start_with_settings(service, &settings).await?;

    bus.run_until(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
        log::info!("Ctrl+C pressed, exiting...");
    })
    .await?;

    Ok(())
}
