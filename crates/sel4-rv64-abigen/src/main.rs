// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `abigen` - render the seL4 RISC-V64 ABI for a kernel configuration.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sel4_rv64_abigen::{Format, GenerateOptions, Overrides, generate};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// TOML file with a `[kernel]` table of build options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Kernel saves FPU context in the TCB.
    #[arg(long)]
    fpu: bool,
    /// Kernel uses MCS scheduling.
    #[arg(long)]
    mcs: bool,
    /// Kernel has benchmark instrumentation.
    #[arg(long)]
    benchmarks: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Header)]
    format: Format,
    /// Output file (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = GenerateOptions {
        config_path: args.config,
        overrides: Overrides {
            fpu: args.fpu,
            mcs: args.mcs,
            benchmarks: args.benchmarks,
        },
        format: args.format,
    };
    let output = generate(&options)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = output.len(), "wrote ABI");
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(output.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}
