use {
    anyhow::Context,
    clap::Parser,
    rotee::{config::Config, recover, signal, tee_rotate},
    tracing::debug,
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Stdout carries the duplicated stream; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tokio::fs::create_dir_all(&config.dir)
        .await
        .with_context(|| config.dir.display().to_string())?;

    recover::finalize_stale(&config.dir, config.output_error).await?;

    let events = signal::spawn(config.ignore).context("signal setup")?;

    debug!(dir = %config.dir.display(), prefix = %config.prefix, "starting");

    tee_rotate(&config, events).await
}
