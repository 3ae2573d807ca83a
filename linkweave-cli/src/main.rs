//! # linkweave CLI
//!
//! Command-line interface for the linkweave static site generator.

mod commands;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-src notes`)
const SINGLE_DASH_FLAGS: &[&str] = &["src", "dst", "tpl", "config"];

#[derive(Parser)]
#[command(name = "linkweave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where the notes are
    #[arg(long, value_name = "DIR")]
    src: Option<PathBuf>,

    /// Where the generated html goes (removed and recreated on every run)
    #[arg(long, value_name = "DIR")]
    dst: Option<PathBuf>,

    /// Path of the page template
    #[arg(long, value_name = "FILE")]
    tpl: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_flags(std::env::args_os()));

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    commands::build_site(commands::BuildOptions {
        src: cli.src,
        dst: cli.dst,
        tpl: cli.tpl,
        config: cli.config,
    })
}

/// Rewrite `-src`, `-dst=...` and friends to their `--` form
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if SINGLE_DASH_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
