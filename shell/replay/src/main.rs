//! Shell Replay
//!
//! Runs a surface event script against a headless shell and prints one JSON
//! snapshot record per line.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script file at a phone-sized viewport
//! shell-replay --width 390 script.jsonl
//!
//! # Read from stdin, keep autoplay running for ten seconds
//! cat script.jsonl | shell-replay --until-ms 10000
//!
//! # With verbose logging (logs go to stderr)
//! RUST_LOG=debug shell-replay script.jsonl
//! ```
//!
//! # Environment Variables
//!
//! - `SAMVAAD_BREAKPOINT`, `SAMVAAD_NOISE_THRESHOLD`, `SAMVAAD_NEAR_TOP`,
//!   `SAMVAAD_AUTOPLAY_MS`: configuration overrides
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use shell_core::config::{default_config_path, load_config_from_path, ConfigOverrides};
use shell_core::IndexPolicy;
use shell_replay::{parse_script, Replay, ReplayOptions};

/// Replay a surface event script against the Samvaad shell
#[derive(Debug, Parser)]
#[command(name = "shell-replay", version, about)]
struct Args {
    /// Script file (JSON lines); reads stdin when omitted or `-`
    script: Option<PathBuf>,

    /// Config file (defaults to $XDG_CONFIG_HOME/samvaad/shell.toml)
    #[arg(long, env = "SAMVAAD_CONFIG")]
    config: Option<PathBuf>,

    /// Viewport width reported at mount, in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Scroll offset reported at mount, in pixels
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Simulate an environment with no window
    #[arg(long)]
    windowless: bool,

    /// Compact/desktop breakpoint override
    #[arg(long)]
    breakpoint: Option<u32>,

    /// Scroll noise threshold override
    #[arg(long)]
    noise_threshold: Option<f64>,

    /// Autoplay interval override in milliseconds
    #[arg(long)]
    autoplay_ms: Option<u64>,

    /// Disable autoplay
    #[arg(long)]
    no_autoplay: bool,

    /// Out-of-range index handling: strict or clamp
    #[arg(long, value_parser = parse_index_policy)]
    index_policy: Option<IndexPolicy>,

    /// Keep firing autoplay ticks until this many milliseconds after mount
    #[arg(long)]
    until_ms: Option<u64>,

    /// Pretty-print each record
    #[arg(long)]
    pretty: bool,
}

fn parse_index_policy(value: &str) -> Result<IndexPolicy, String> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Ok(IndexPolicy::Strict),
        "clamp" => Ok(IndexPolicy::Clamp),
        other => Err(format!("unknown index policy '{other}' (expected strict or clamp)")),
    }
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(px) = self.breakpoint {
            overrides = overrides.with_breakpoint_px(px);
        }
        if let Some(px) = self.noise_threshold {
            overrides = overrides.with_noise_threshold_px(px);
        }
        if let Some(ms) = self.autoplay_ms {
            overrides = overrides.with_autoplay_interval_ms(ms);
        }
        if self.no_autoplay {
            overrides = overrides.with_autoplay(false);
        }
        if let Some(policy) = self.index_policy {
            overrides = overrides.with_index_policy(policy);
        }
        overrides
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shell_replay=info".parse()?)
                .add_directive("shell_core=warn".parse()?),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(config_path).context("Failed to load configuration")?;
    args.overrides()
        .apply(&mut config)
        .context("Invalid command-line override")?;
    info!(source = %config.source(), "Configuration resolved");

    let steps = match args.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            parse_script(BufReader::new(file))?
        }
        _ => parse_script(io::stdin().lock())?,
    };

    let options = ReplayOptions {
        width: (!args.windowless).then_some(args.width),
        offset: args.offset,
        until_ms: args.until_ms,
    };
    let records = Replay::new(config.shell, config.content, options).run(&steps);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        if args.pretty {
            serde_json::to_writer_pretty(&mut out, record)?;
        } else {
            serde_json::to_writer(&mut out, record)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
