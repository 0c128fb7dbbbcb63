#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use livebet_business::BusinessConfig;
use livebet_ui::LivebetApp;
use livebet_ui::state::State;

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let config = BusinessConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring invalid LIVEBET_* environment: {e}");
        BusinessConfig::default()
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "livebet admin",
        native_options,
        Box::new(move |_cc| {
            let state = State::new(config, handle);
            Ok(Box::new(LivebetApp::new(state)))
        }),
    )
}
