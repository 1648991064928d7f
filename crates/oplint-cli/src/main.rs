//! # oplint entry point
//!
//! Parses the single config-file argument, initializes tracing from the
//! config's `verbose` flag, and runs the check suites.
//!
//! Exit codes: 0 when every check passed, 1 on findings or a fatal run
//! error, 2 on a usage error (missing, non-`.json`, or nonexistent config
//! path).

use std::process::ExitCode;

use clap::Parser;
use oplint_core::Config;
use tracing_subscriber::EnvFilter;

/// openEO process linter
///
/// Checks openEO process definitions and subtype schemas: JSON-Schema
/// compilation with the openEO vocabulary, structural rules, markdown and
/// spelling of all embedded text, and cross-references between processes.
#[derive(Parser, Debug)]
#[command(name = "oplint", version, about, long_about = None)]
struct Cli {
    /// Path to the JSON run configuration file.
    config: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let path = match Config::resolve_path(&cli.config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    println!("Reading config: {}", path.display());
    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(if e.is_usage() { 2 } else { 1 });
        }
    };

    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match oplint_cli::run(&config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_takes_a_single_config_path() {
        let cli = Cli::parse_from(["oplint", "config.json"]);
        assert_eq!(cli.config, "config.json");
    }

    #[test]
    fn cli_requires_the_config_argument() {
        assert!(Cli::try_parse_from(["oplint"]).is_err());
    }
}
