//! Cultural Timeline
//!
//! An interactive, pannable and zoomable timeline of civilizations and the
//! lineages between them.

mod app;
mod components;
mod constants;
mod core;
mod error;
mod hotkeys;
mod state;
mod timeline;
mod utils;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::AppStartup;
use crate::state::{Dataset, TimelineSettings};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Info for this crate, warn for the webview stack
            "cultural_timeline=info,warn".into()
        }))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = TimelineSettings::load();
    let dataset = match Dataset::builtin() {
        Ok(dataset) => dataset,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        civilizations = dataset.civilizations.len(),
        eras = dataset.eras.len(),
        "dataset loaded"
    );

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Cultural Timeline")
                .with_inner_size(LogicalSize::new(1280.0, 800.0))
                .with_resizable(true),
        )
        .with_menu(None);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(AppStartup { dataset, settings })
        .launch(app::App);
}
