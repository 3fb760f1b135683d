use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{PersistedDesktopSettings, SETTINGS_STORAGE_KEY};
use crate::ui::{StartupConfig, SwapDeskApp};

#[derive(Parser, Debug)]
#[command(
    name = "swapdesk",
    about = "Desktop interface for a pre-deployed swap-selling contract"
)]
struct Args {
    /// Path to a TOML settings file (defaults to the per-user config dir).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,
    /// Override the signer private key (hex).
    #[arg(long)]
    signer_key: Option<String>,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("swapdesk").join("swapdesk.toml"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let startup = StartupConfig {
        config_path: args.config.or_else(default_config_path),
        rpc_url: args.rpc_url,
        signer_key: args.signer_key,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Swap Sell Desk")
            .with_inner_size([560.0, 760.0])
            .with_min_inner_size([480.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Swap Sell Desk",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            Ok(Box::new(SwapDeskApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
}
