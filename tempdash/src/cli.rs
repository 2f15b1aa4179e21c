//! Command-line parsing for the dashboard.

use std::path::PathBuf;

use tempdash_core::ConfigOverrides;

#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub url: Option<String>,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub save: bool,
    pub dry_run: bool,
    pub help: bool,
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--interval SECS|-i SECS] [--window N|-w N] [--seed N] [--config PATH|-c PATH] [--save] [--dry-run] [ws://HOST:PORT/ws]"
    )
}

pub fn number<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, String> {
    let v = v.ok_or_else(|| format!("missing value for {flag}"))?;
    v.parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: {v}"))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "tempdash".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value form
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => out.help = true,
            "--save" => out.save = true,
            "--dry-run" => out.dry_run = true,
            "--interval" | "-i" => {
                out.overrides.update_interval_secs = Some(number(&flag, inline.or_else(|| it.next()))?)
            }
            "--window" | "-w" => {
                out.overrides.window_size = Some(number(&flag, inline.or_else(|| it.next()))?)
            }
            "--seed" => out.overrides.seed = Some(number(&flag, inline.or_else(|| it.next()))?),
            "--config" | "-c" => {
                let v = inline
                    .or_else(|| it.next())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| format!("missing value for {flag}"))?;
                out.config = Some(PathBuf::from(v));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. {}", usage(&prog)));
            }
            _ => {
                if out.url.is_some() {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
                let parsed = url::Url::parse(&arg).map_err(|e| format!("invalid URL '{arg}': {e}"))?;
                if parsed.scheme() != "ws" {
                    return Err(format!("unsupported URL scheme '{}' (expected ws://)", parsed.scheme()));
                }
                out.url = Some(arg);
            }
        }
    }
    Ok(out)
}
