use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use admin_core::HttpDictionaryService;
use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::PersistedAdminSettings;
use crate::controller::{events::UiEvent, orchestration::QueueBridge};
use crate::ui::AdminApp;

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();
    let settings = config::load_settings(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = HttpDictionaryService::new(&settings.api_base_url, settings.api_token.clone())
        .context("failed to configure dictionary api client")?;
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(service));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dictionary Admin")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    let startup_dictionary = settings.dictionary_url.clone();
    eframe::run_native(
        "Dictionary Admin",
        options,
        Box::new(move |cc| {
            let persisted = cc
                .storage
                .and_then(|storage| PersistedAdminSettings::read(storage));
            Ok(Box::new(AdminApp::new(
                QueueBridge::new(cmd_tx),
                ui_rx,
                startup_dictionary,
                persisted,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop shell failed: {err}"))
}
