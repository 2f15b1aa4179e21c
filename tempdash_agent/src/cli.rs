//! Agent command-line parsing.

use std::path::PathBuf;

use tempdash_core::ConfigOverrides;

pub const DEFAULT_PORT: u16 = 3232;

#[derive(Debug, PartialEq)]
pub struct AgentArgs {
    pub port: u16,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub help: bool,
}

impl Default for AgentArgs {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config: None,
            overrides: ConfigOverrides::default(),
            help: false,
        }
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--port N|-p N] [--interval SECS|-i SECS] [--window N|-w N] [--seed N] [--config PATH|-c PATH]"
    )
}

fn value<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, String> {
    let v = v.ok_or_else(|| format!("missing value for {flag}"))?;
    v.parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: {v}"))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<AgentArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "tempdash_agent".into());
    let mut out = AgentArgs::default();

    while let Some(a) = it.next() {
        let (flag, inline) = match a.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (a.clone(), None),
        };
        let mut next = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => out.help = true,
            "--port" | "-p" => out.port = value(&flag, next())?,
            "--interval" | "-i" => out.overrides.update_interval_secs = Some(value(&flag, next())?),
            "--window" | "-w" => out.overrides.window_size = Some(value(&flag, next())?),
            "--seed" => out.overrides.seed = Some(value(&flag, next())?),
            "--config" | "-c" => out.config = Some(PathBuf::from(value::<String>(&flag, next())?)),
            _ => return Err(format!("Unexpected argument '{a}'. {}", usage(&prog))),
        }
    }
    Ok(out)
}
