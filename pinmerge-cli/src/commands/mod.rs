//! CLI command implementations

use clap::Subcommand;

use crate::error::CliResult;

pub mod convert;
pub mod filter;
pub mod generate_config;
pub mod timesteps;
pub mod validate;
pub mod vocab;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert mixed-script lines into aligned pinyin token sequences
    Convert(convert::ConvertArgs),

    /// Drop (or keep only) lines with excessive n-gram repetition
    Filter(filter::FilterArgs),

    /// Inspect a tokenizer vocabulary and encode lines with it
    Vocab(vocab::VocabArgs),

    /// Print a sampling timestep schedule
    Timesteps(timesteps::TimestepsArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Convert(args) => args.execute(),
            Commands::Filter(args) => args.execute(),
            Commands::Vocab(args) => args.execute(),
            Commands::Timesteps(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Map `-v` occurrences to a log level name
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` still takes precedence. A logger installed earlier in the
/// process is left in place.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let env = env_logger::Env::default().default_filter_or(log_level(verbose));
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(3), "trace");
        assert_eq!(log_level(9), "trace");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(1, false);
        init_logging(2, false);
        init_logging(0, true);
    }

    #[test]
    fn test_commands_debug_format() {
        let cmd = Commands::Timesteps(timesteps::TimestepsArgs {
            steps: 16,
            list: false,
            format: timesteps::ScheduleFormat::Text,
        });
        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("Timesteps"));

        let cmd = Commands::Validate(validate::ValidateArgs {
            config: PathBuf::from("pinmerge.toml"),
        });
        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("pinmerge.toml"));
    }
}
