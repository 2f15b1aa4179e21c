//! tempdash_agent: headless publisher for tempdash viewers.
//!
//! Run with:  `RUST_LOG=info tempdash_agent --port 3232`

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tempdash_agent::cli::{parse_args, usage};
use tempdash_agent::router;
use tempdash_agent::sampler::spawn_json_cache;
use tempdash_agent::state::AppState;
use tempdash_core::config::{config_path, load_config};
use tempdash_core::Scheduler;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    if args.help {
        let prog = env::args().next().unwrap_or_else(|| "tempdash_agent".into());
        eprintln!("{}", usage(&prog));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = args.config.clone().unwrap_or_else(config_path);
    let mut cfg = load_config(&path)
        .with_context(|| format!("loading config {}", path.display()))?;
    args.overrides.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;

    let scheduler = Scheduler::from_config(&cfg)?.spawn();
    let state = AppState::new(scheduler.feed(), cfg);
    let cache = spawn_json_cache(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        "tempdash agent v{} serving ws://{}/ws",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;

    scheduler.shutdown().await;
    let _ = cache.await;
    Ok(())
}
