//! Perch - floating always-on-top video window
//!
//! Opens the site in a borderless webview and injects the content runtime,
//! which reports video dimensions and drag deltas back over IPC.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use perch_core::WindowStateStore;
use tauri::{App, Manager};
use tracing::{info, warn};
use url::Url;

use bundle::ContentBundle;
use commands::AppState;
use config::ShellConfig;

mod bundle;
mod commands;
mod config;
mod menu;
mod window;

/// Perch - floating video window
#[derive(Parser, Debug)]
#[command(name = "perch")]
#[command(version)]
#[command(about = "Floating always-on-top video window", long_about = None)]
struct Cli {
    /// Page to open instead of the configured start URL
    #[arg(short, long)]
    url: Option<Url>,

    /// Directory holding perch_content.js and perch_content_bg.wasm
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Config file (defaults to config.json in the app config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forget the saved window frame
    #[arg(long)]
    reset_window: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug,perch=trace"
    } else {
        "info,perch=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        )
        .init();

    info!(version = perch_core::VERSION, "Starting Perch");

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::aspect_ratio,
            commands::window_drag,
        ])
        .setup(move |app| {
            setup(app, &cli)?;
            info!("Perch initialized");
            Ok(())
        })
        .on_page_load(window::on_page_load)
        .on_window_event(window::on_event)
        .on_menu_event(menu::on_event)
        .run(tauri::generate_context!())
        .context("error while running Perch")
}

fn setup(app: &mut App, cli: &Cli) -> anyhow::Result<()> {
    let config_dir = app
        .path()
        .app_config_dir()
        .context("resolving app config directory")?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join(ShellConfig::FILE));
    let mut shell = ShellConfig::load(&config_path)?;
    if let Some(url) = &cli.url {
        shell.site.start_url = url.clone();
    }
    if let Some(dir) = &cli.content_dir {
        shell.content_dir = Some(dir.clone());
    }
    shell.validate()?;

    let store = WindowStateStore::in_dir(&config_dir);
    if cli.reset_window {
        store.clear()?;
        info!("Saved window frame cleared");
    }
    let saved = store.load().unwrap_or_else(|err| {
        warn!(error = %err, "Could not read saved window frame");
        None
    });

    let script = init_script(app, &shell);
    let frame = window::initial_frame(app.handle(), &shell.window, saved.as_ref())?;

    app.manage(AppState::new(shell.site.clone(), shell.window.clone(), store));
    window::create(app.handle(), &shell, frame, script)?;
    app.set_menu(menu::build(app.handle())?)?;
    Ok(())
}

/// The content runtime script, or `None` to run the page unaugmented
fn init_script(app: &App, shell: &ShellConfig) -> Option<String> {
    let dir = match &shell.content_dir {
        Some(dir) => dir.clone(),
        None => match app.path().resource_dir() {
            Ok(resources) => resources.join("content"),
            Err(err) => {
                warn!(error = %err, "No resource directory, running without content runtime");
                return None;
            }
        },
    };

    let script = ContentBundle::load(&dir)
        .and_then(|bundle| bundle.init_script(&shell.content_config()));
    match script {
        Ok(script) => Some(script),
        Err(err) => {
            warn!(error = %err, "Content runtime unavailable, page runs unaugmented");
            None
        }
    }
}
