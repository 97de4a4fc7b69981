// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Scan | Branches | Options
//! ```

use std::process::ExitCode;

use reposcan::cli::global::GlobalOptions;
use reposcan::cli::{self, Command};
use reposcan::cmd::branches::run_branches_command;
use reposcan::cmd::config::run_options_command;
use reposcan::cmd::scan::run_scan_command;
use reposcan::config::Config;
use reposcan::config::loader::ConfigLoader;
use reposcan::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config)
}

fn build_log_config(global: &GlobalOptions, config: &Config) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(config.global.output_log_level);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(config.global.file_log_level);

    let log_file = global.log_file.clone().or_else(|| {
        let configured = &config.global.log_file;
        (!configured.as_os_str().is_empty()).then(|| configured.clone())
    });

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file.map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Scan(args)) => run_scan_command(args, config),
        Some(Command::Branches(args)) => run_branches_command(args, config),
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(global: &GlobalOptions) -> reposcan::error::Result<Config> {
    let mut loader = ConfigLoader::new().add_toml_file_optional("reposcan.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix("REPOSCAN").build()
}
