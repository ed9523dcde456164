//! pdf-picker - Entry point

use pdf_picker::process::send_notification;
use pdf_picker::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_picker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    match pdf_picker::run(&cli) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "done");
            Ok(())
        }
        Err(e) => {
            if !cli.no_notify {
                send_notification(&e.to_string());
            }
            Err(e.into())
        }
    }
}
