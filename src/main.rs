use anyhow::Result;
use clap::Parser;
use mftracker::{config::Config, report::run};
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    // ─── 2) config ───────────────────────────────────────────────────
    let config = Config::parse();

    // ─── 3) batch, tables, csv, chart ────────────────────────────────
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out)?;

    info!("all done");
    Ok(())
}
