use std::sync::Arc;

use clap::Parser;
use projdesk_events::NotificationBus;
use projdesk_gateway::RestGateway;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod confirm;
mod handlers;
mod render;

use cli::Cli;
use config::ConsoleConfig;
use handlers::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ConsoleConfig::from_env()?;

    // --- Tracing ---
    init_tracing(config.json_logs);
    tracing::debug!(api_url = %config.api_url, "Loaded console configuration");

    let cli = Cli::parse();

    // --- Gateway & notifications ---
    let gateway = RestGateway::new(config.api_url.clone(), config.request_timeout())?;
    let bus = Arc::new(NotificationBus::default());
    let mut notifications = bus.subscribe();

    let ctx = Context {
        config,
        gateway: Arc::new(gateway),
        bus,
    };

    let result = handlers::dispatch(cli.command, &ctx).await;
    print_notifications(&mut notifications);
    result
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "projdesk=info,projdesk_state=info,projdesk_gateway=info".into()
    });

    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}

/// Print every notification the command produced.
fn print_notifications(rx: &mut broadcast::Receiver<projdesk_events::Notification>) {
    while let Ok(notification) = rx.try_recv() {
        eprintln!("{}", render::notification(&notification));
    }
}
