//! Entry point for the tempdash TUI. Parses args, resolves config and runs the App.

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tempdash::app::App;
use tempdash::cli::{parse_args, usage};
use tempdash::feed::Feed;
use tempdash_core::config::{config_dir, config_path, load_config, save_config};
use tempdash_core::Scheduler;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    if parsed.help {
        let prog = env::args().next().unwrap_or_else(|| "tempdash".into());
        eprintln!("{}", usage(&prog));
        return Ok(());
    }

    init_logging();

    let path = parsed.config.clone().unwrap_or_else(config_path);
    let mut cfg = match load_config(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot load config {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    parsed.overrides.apply(&mut cfg);
    if let Err(e) = cfg.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }
    if parsed.save {
        save_config(&path, &cfg)?;
        tracing::info!("saved config to {}", path.display());
    }
    if parsed.dry_run {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let (mut feed, window_size) = match parsed.url.as_deref() {
        Some(url) => Feed::remote(url).await?,
        None => (
            Feed::local(Scheduler::from_config(&cfg)?.spawn()),
            Some(cfg.window_size),
        ),
    };

    let mut app = App::new(feed.label(), window_size);
    let res = app.run(&mut feed).await;
    feed.close().await;
    res
}

// Logs go to a file so they don't tear the terminal UI; only when RUST_LOG is set.
fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }
    let dir = config_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tempdash.log"))
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
