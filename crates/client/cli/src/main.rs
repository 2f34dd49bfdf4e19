//! Headless skirmish simulator for the JABS combat engine.
mod app;
mod config;

use anyhow::Result;
use app::Skirmish;
use config::SimConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(&config)?;

    let mut skirmish = Skirmish::load(&config)?;
    let summary = skirmish.run(config.frames);
    skirmish.save_loadouts(config.save_dir.as_deref())?;

    println!("{summary}");
    Ok(())
}

/// Logs go to stderr, and additionally to `<log_dir>/jabs-sim.log` when a log
/// directory is configured. The returned guard flushes the file writer on drop.
fn setup_logging(
    config: &SimConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "jabs-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/jabs-sim.log", dir.display());
    }

    Ok(guard)
}
