use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use arboard::Clipboard;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::Modal;
use serde::{Deserialize, Serialize};

use chain_client::{load_settings, SessionClient, TokenSlot};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_bootstrap_failure, UiError, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "swapdesk.desktop.settings";

const ACTIVITY_LOG_CAP: usize = 100;

/// Startup overrides collected from the command line; everything else comes
/// from the settings file and environment.
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub config_path: Option<PathBuf>,
    pub rpc_url: Option<String>,
    pub signer_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedDesktopSettings {
    pub sell_amount: String,
    pub show_activity: bool,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self {
            sell_amount: String::new(),
            show_activity: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppViewState {
    /// Waiting for the wallet session; stays here forever if bootstrap fails.
    Connecting,
    Main,
}

#[derive(Debug, Clone)]
struct ActionAlert {
    title: String,
    message: String,
    is_error: bool,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Provider => "Provider error",
        UiErrorCategory::Revert => "Transaction failed",
        UiErrorCategory::Validation => "Validation error",
        UiErrorCategory::Unknown => "Unexpected error",
    }
}

pub fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

pub struct SwapDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view_state: AppViewState,
    account: String,
    chain_id: u64,
    pair_address: String,
    sell_amount: String,
    balances: Option<(String, String)>,
    alert: Option<ActionAlert>,
    status: String,
    activity: Vec<String>,
    show_activity: bool,
}

impl SwapDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedDesktopSettings>,
    ) -> Self {
        let persisted = persisted.unwrap_or_default();
        Self {
            cmd_tx,
            ui_rx,
            view_state: AppViewState::Connecting,
            account: String::new(),
            chain_id: 0,
            pair_address: String::new(),
            sell_amount: persisted.sell_amount,
            balances: None,
            alert: None,
            status: String::new(),
            activity: Vec::new(),
            show_activity: persisted.show_activity,
        }
    }

    fn push_activity(&mut self, line: impl Into<String>) {
        self.activity
            .push(format!("[{}] {}", Local::now().format("%H:%M:%S"), line.into()));
        if self.activity.len() > ACTIVITY_LOG_CAP {
            let overflow = self.activity.len() - ACTIVITY_LOG_CAP;
            self.activity.drain(..overflow);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SessionReady {
                    account,
                    chain_id,
                    pair_address,
                } => {
                    self.account = account;
                    self.chain_id = chain_id;
                    self.pair_address = pair_address;
                    self.view_state = AppViewState::Main;
                    self.status = "Wallet session established".to_string();
                    self.push_activity(format!(
                        "connected as {} on chain {}",
                        short_address(&self.account),
                        self.chain_id
                    ));
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ActionCompleted { title, detail } => {
                    self.status = detail.clone();
                    self.push_activity(detail.clone());
                    self.alert = Some(ActionAlert {
                        title: title.to_string(),
                        message: detail,
                        is_error: false,
                    });
                }
                UiEvent::BalancesUpdated { token0, token1 } => {
                    self.status = "Balances refreshed".to_string();
                    self.push_activity(format!("balances: token0 {token0}, token1 {token1}"));
                    self.balances = Some((token0, token1));
                }
                UiEvent::Error(err) => {
                    let message = if err.context() == UiErrorContext::Bootstrap {
                        classify_bootstrap_failure(err.message())
                    } else {
                        err.message().to_string()
                    };
                    self.status = message.clone();
                    self.push_activity(message.clone());
                    self.alert = Some(ActionAlert {
                        title: err_label(err.category()).to_string(),
                        message,
                        is_error: true,
                    });
                }
            }
        }
    }

    fn copy_account_to_clipboard(&mut self) {
        if let Ok(mut clipboard) = Clipboard::new() {
            let _ = clipboard.set_text(self.account.clone());
            self.status = "Account address copied to clipboard".to_string();
        }
    }

    fn render_connecting(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(180.0);
                ui.spinner();
                ui.add_space(12.0);
                ui.label("Connecting wallet session...");
                if !self.status.is_empty() {
                    ui.add_space(8.0);
                    ui.weak(&self.status);
                }
            });
        });
    }

    fn render_main(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("pair {}", short_address(&self.pair_address)));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Swap Sell Desk");
            ui.horizontal(|ui| {
                ui.label("Account:");
                ui.monospace(short_address(&self.account));
                if ui.small_button("copy").clicked() {
                    self.copy_account_to_clipboard();
                }
                ui.weak(format!("chain {}", self.chain_id));
            });
            ui.separator();

            ui.label("Test tokens");
            ui.horizontal(|ui| {
                if ui.button("Mint 100 token0").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Mint {
                            slot: TokenSlot::Token0,
                        },
                        &mut self.status,
                    );
                }
                if ui.button("Mint 100 token1").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Mint {
                            slot: TokenSlot::Token1,
                        },
                        &mut self.status,
                    );
                }
            });
            ui.add_space(8.0);

            ui.label("Allowances");
            ui.horizontal(|ui| {
                if ui.button("Approve max token0").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::ApproveMax {
                            slot: TokenSlot::Token0,
                        },
                        &mut self.status,
                    );
                }
                if ui.button("Approve max token1").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::ApproveMax {
                            slot: TokenSlot::Token1,
                        },
                        &mut self.status,
                    );
                }
            });
            ui.add_space(8.0);

            ui.label("Sell");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.sell_amount)
                        .hint_text("Amount to sell")
                        .desired_width(140.0),
                );
                if ui.button("Sell token0").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Sell {
                            slot: TokenSlot::Token0,
                            amount_text: self.sell_amount.clone(),
                        },
                        &mut self.status,
                    );
                }
                if ui.button("Sell token1").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Sell {
                            slot: TokenSlot::Token1,
                            amount_text: self.sell_amount.clone(),
                        },
                        &mut self.status,
                    );
                }
            });
            ui.add_space(8.0);

            if ui.button("Execute swap").clicked() {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::ExecuteSwap, &mut self.status);
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Balances");
                if ui.small_button("refresh").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::RefreshBalances,
                        &mut self.status,
                    );
                }
            });
            match &self.balances {
                Some((token0, token1)) => {
                    ui.monospace(format!("token0: {token0}"));
                    ui.monospace(format!("token1: {token1}"));
                }
                None => {
                    ui.weak("not fetched");
                }
            }

            ui.add_space(8.0);
            ui.checkbox(&mut self.show_activity, "Show activity");
            if self.show_activity {
                egui::ScrollArea::vertical()
                    .max_height(140.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.activity {
                            ui.weak(line);
                        }
                    });
            }
        });
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alert.clone() else {
            return;
        };
        let modal = Modal::new(egui::Id::new("action_alert")).show(ctx, |ui| {
            ui.set_max_width(380.0);
            if alert.is_error {
                ui.colored_label(ui.visuals().error_fg_color, &alert.title);
            } else {
                ui.strong(&alert.title);
            }
            ui.add_space(6.0);
            ui.label(&alert.message);
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                self.alert = None;
            }
        });
        if modal.should_close() {
            self.alert = None;
        }
    }
}

impl eframe::App for SwapDeskApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedDesktopSettings {
            sell_amount: self.sell_amount.clone(),
            show_activity: self.show_activity,
        };
        if let Ok(text) = serde_json::to_string(&persisted) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.view_state {
            AppViewState::Connecting => self.render_connecting(ctx),
            AppViewState::Main => self.render_main(ctx),
        }

        self.render_alert(ctx);

        // Events arrive from the backend thread; repaint even without input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

pub fn start_backend_bridge(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    startup: StartupConfig,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::Bootstrap,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut settings = load_settings(startup.config_path.as_deref());
            if let Some(rpc_url) = startup.rpc_url {
                settings.rpc_url = rpc_url;
            }
            if let Some(signer_key) = startup.signer_key {
                settings.signer_key = signer_key;
            }

            let client = match SessionClient::connect(&settings).await {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    // No retry: the UI keeps its connecting view until
                    // relaunch, and no contract call is ever issued.
                    tracing::error!("wallet session bootstrap failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Bootstrap,
                        format!("{err:#}"),
                    )));
                    return;
                }
            };

            let info = client.info();
            let _ = ui_tx.try_send(UiEvent::SessionReady {
                account: info.account.to_string(),
                chain_id: info.chain_id,
                pair_address: settings.pair_address.clone(),
            });

            // One spawned task per command: rapid clicks issue overlapping
            // in-flight transactions with no mutual exclusion.
            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    run_backend_command(client, ui_tx, cmd).await;
                });
            }
        });
    });
}

async fn run_backend_command(
    client: Arc<SessionClient>,
    ui_tx: Sender<UiEvent>,
    cmd: BackendCommand,
) {
    match cmd {
        BackendCommand::Mint { slot } => {
            tracing::info!(token = slot.label(), "backend: mint");
            match client.mint_test_tokens(slot).await {
                Ok(tx_hash) => {
                    let _ = ui_tx.try_send(UiEvent::ActionCompleted {
                        title: "Mint",
                        detail: format!("Minted 100 {} (tx {tx_hash})", slot.label()),
                    });
                }
                Err(err) => {
                    tracing::error!(token = slot.label(), "backend: mint failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Mint,
                        format!("{err:#}"),
                    )));
                }
            }
        }
        BackendCommand::ApproveMax { slot } => {
            tracing::info!(token = slot.label(), "backend: approve_max");
            match client.approve_max(slot).await {
                Ok(tx_hash) => {
                    let _ = ui_tx.try_send(UiEvent::ActionCompleted {
                        title: "Approve",
                        detail: format!(
                            "Approved maximum {} allowance (tx {tx_hash})",
                            slot.label()
                        ),
                    });
                }
                Err(err) => {
                    tracing::error!(token = slot.label(), "backend: approve_max failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Approve,
                        format!("{err:#}"),
                    )));
                }
            }
        }
        BackendCommand::Sell { slot, amount_text } => {
            tracing::info!(token = slot.label(), amount = %amount_text, "backend: sell");
            match client.sell_tokens(slot, &amount_text).await {
                Ok(tx_hash) => {
                    let _ = ui_tx.try_send(UiEvent::ActionCompleted {
                        title: "Sell",
                        detail: format!("Sold {amount_text} {} (tx {tx_hash})", slot.label()),
                    });
                }
                Err(err) => {
                    tracing::error!(token = slot.label(), "backend: sell failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Sell,
                        format!("{err:#}"),
                    )));
                }
            }
        }
        BackendCommand::ExecuteSwap => {
            tracing::info!("backend: execute_swap");
            match client.execute_swap().await {
                Ok(tx_hash) => {
                    let _ = ui_tx.try_send(UiEvent::ActionCompleted {
                        title: "Execute swap",
                        detail: format!("Swap executed (tx {tx_hash})"),
                    });
                }
                Err(err) => {
                    tracing::error!("backend: execute_swap failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Execute,
                        format!("{err:#}"),
                    )));
                }
            }
        }
        BackendCommand::RefreshBalances => {
            tracing::info!("backend: refresh_balances");
            match client.balances().await {
                Ok(balances) => {
                    let _ = ui_tx.try_send(UiEvent::BalancesUpdated {
                        token0: balances.token0,
                        token1: balances.token1,
                    });
                }
                Err(err) => {
                    tracing::error!("backend: refresh_balances failed: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Balances,
                        format!("{err:#}"),
                    )));
                }
            }
        }
    }
}
