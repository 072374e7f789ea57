// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Host tooling for the seL4 RISC-V64 ABI definitions.
//!
//! `abigen` resolves a kernel build configuration and renders the ABI it
//! implies, so the kernel's C build and Rust user runtimes are built from
//! the same definitions.

pub mod config;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sel4_rv64_abi::BuildConfig;

pub use config::{ConfigFile, Overrides};
pub use render::Format;

/// Options for one `abigen` run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Configuration file, if any.
    pub config_path: Option<PathBuf>,
    /// Options enabled on the command line.
    pub overrides: Overrides,
    /// Output format.
    pub format: Format,
}

/// Renders the ABI for an already resolved configuration.
#[inline]
pub fn generate_for(config: BuildConfig, format: Format) -> Result<String> {
    let abi = config.resolve();
    tracing::debug!(
        fault_kinds = abi.fault_kinds().count(),
        ?format,
        "rendering ABI"
    );
    render::render(&abi, format).context("failed to render ABI")
}

/// Resolves the configuration described by `options` and renders it.
#[inline]
pub fn generate(options: &GenerateOptions) -> Result<String> {
    let config = config::resolve(options.config_path.as_deref(), options.overrides)?;
    generate_for(config, options.format)
}
