// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Build configuration files.
//!
//! A configuration file mirrors the kernel options that affect the ABI:
//!
//! ```toml
//! [kernel]
//! fpu = true
//! mcs = true
//! benchmarks = false
//! ```
//!
//! Missing keys default to `false`. Unknown keys are rejected so a typo
//! cannot silently produce the wrong header.

use std::path::Path;

use anyhow::{Context, Result};
use sel4_rv64_abi::BuildConfig;
use serde::Deserialize;

/// Parsed configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Kernel build options.
    pub kernel: KernelOptions,
}

/// The `[kernel]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelOptions {
    /// Kernel saves FPU context.
    pub fpu: bool,
    /// Kernel uses MCS scheduling.
    pub mcs: bool,
    /// Kernel has benchmark instrumentation.
    pub benchmarks: bool,
}

impl ConfigFile {
    /// Parses a configuration from TOML text.
    #[inline]
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid ABI configuration")
    }

    /// Reads and parses a configuration file.
    #[inline]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Returns the build configuration described by this file.
    #[inline]
    #[must_use]
    pub const fn build_config(&self) -> BuildConfig {
        BuildConfig {
            fpu: self.kernel.fpu,
            mcs: self.kernel.mcs,
            benchmarks: self.kernel.benchmarks,
        }
    }
}

/// Options enabled on the command line.
///
/// Flags can only switch options on; a file's `true` is never overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--fpu`
    pub fpu: bool,
    /// `--mcs`
    pub mcs: bool,
    /// `--benchmarks`
    pub benchmarks: bool,
}

impl Overrides {
    /// Applies these overrides on top of `base`.
    #[inline]
    #[must_use]
    pub const fn apply(self, base: BuildConfig) -> BuildConfig {
        base.with_fpu(base.fpu || self.fpu)
            .with_mcs(base.mcs || self.mcs)
            .with_benchmarks(base.benchmarks || self.benchmarks)
    }
}

/// Resolves the build configuration from an optional file and CLI overrides.
#[inline]
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<BuildConfig> {
    let base = match path {
        Some(path) => ConfigFile::load(path)?.build_config(),
        None => BuildConfig::BASE,
    };
    let config = overrides.apply(base);
    tracing::debug!(?config, file = ?path, "resolved build configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn empty_file_is_base_config() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file.build_config(), BuildConfig::BASE);
    }

    #[test]
    fn parses_kernel_table() {
        let file = ConfigFile::parse("[kernel]\nfpu = true\nmcs = true\n").unwrap();
        let config = file.build_config();
        assert!(config.fpu);
        assert!(config.mcs);
        assert!(!config.benchmarks);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ConfigFile::parse("[kernel]\nmsc = true\n").unwrap_err();
        assert!(format!("{err:#}").contains("msc"));
        ConfigFile::parse("[kernal]\n").unwrap_err();
    }

    #[test]
    fn rejects_wrong_types() {
        ConfigFile::parse("[kernel]\nfpu = \"yes\"\n").unwrap_err();
    }

    #[test]
    fn overrides_only_enable() {
        let base = BuildConfig::BASE.with_fpu(true);
        let config = Overrides {
            mcs: true,
            ..Overrides::default()
        }
        .apply(base);
        assert!(config.fpu);
        assert!(config.mcs);
        assert!(!config.benchmarks);
    }

    #[test]
    fn resolve_without_file() {
        let config = resolve(
            None,
            Overrides {
                benchmarks: true,
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(config, BuildConfig::BASE.with_benchmarks(true));
    }

    #[test]
    fn resolve_missing_file_fails() {
        let err = resolve(Some(Path::new("/nonexistent/abi.toml")), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
