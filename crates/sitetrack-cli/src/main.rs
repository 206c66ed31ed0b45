use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod util;

use cli::{Cli, Commands};
use commands::{RecordArgs, StatsArgs};
use config::Config;
use format::FormatOptions;
use util::{resolve_data_file, resolve_env, resolve_format, resolve_now};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "sitetrack", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so JSON and CSV on stdout stay parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let data_file = resolve_data_file(cli.data_file.as_deref(), &config);
    let no_color = cli.no_color || config.no_color;
    let output = cli.output.as_ref();

    if let Some(path) = output {
        tracing::debug!("Output will be written to: {}", path.display());
    }
    tracing::debug!("Using storage file {}", data_file.display());

    match cli.command {
        Commands::Record {
            env,
            output: out,
            at,
        } => {
            let opts = FormatOptions::new(no_color).with_compact(out.compact);
            commands::cmd_record(RecordArgs {
                data_file: &data_file,
                env: resolve_env(&env, &config),
                now: resolve_now(at.as_deref())?,
                format: resolve_format(&out, &config),
                output,
                opts: &opts,
            })?;
        }
        Commands::Stats {
            env,
            output: out,
            at,
        } => {
            let opts = FormatOptions::new(no_color).with_compact(out.compact);
            commands::cmd_stats(StatsArgs {
                data_file: &data_file,
                env: resolve_env(&env, &config),
                now: resolve_now(at.as_deref())?,
                format: resolve_format(&out, &config),
                output,
                opts: &opts,
            })?;
        }
        Commands::Classify { env, output: out } => {
            let opts = FormatOptions::new(no_color).with_compact(out.compact);
            commands::cmd_classify(
                &resolve_env(&env, &config),
                resolve_format(&out, &config),
                output,
                &opts,
            )?;
        }
        Commands::Identity => {
            commands::cmd_identity(&data_file, output, &FormatOptions::new(no_color))?;
        }
        Commands::Export { period, no_header } => {
            commands::cmd_export(&data_file, period, no_header, output)?;
        }
        Commands::Config { action } => {
            commands::cmd_config(action)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
