//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the punctuation map, corrections and performance settings");
        println!("2. Validate your configuration:");
        println!("   pinmerge validate --config {}", self.output.display());
        println!("3. Use it for conversion:");
        println!(
            "   pinmerge convert -i input.txt --config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template with every section at its default value
fn generate_template() -> String {
    let defaults = CliConfig::default();
    format!(
        r#"# pinmerge configuration

# Punctuation replaced in the input before romanization.
# Keys must be single characters. An empty table disables replacement.
[normalization.punctuation]
";" = ","
"“" = '"'
"”" = '"'
"‘" = "'"
"’" = "'"

# Readings substituted in the sentence-level stream (TONE3 style)
[corrections.readings]
shei2 = "shui2"

[alignment]
# "per-line": only mismatched lines fall back to context-free readings
# "batch": a mismatch on the last line of a file makes the whole file fall back
policy = "per-line"
# Romanize pure East-Asian segments as a whole
polyphone = true

# Data-quality gate used by `pinmerge filter`
[repetition]
window = {window}
tolerance = {tolerance}

[performance]
# "sequential", "parallel" or "adaptive"
execution_mode = "adaptive"
# Lines per file at which adaptive mode switches to parallel
parallel_threshold = {threshold}
# 0 = one thread per CPU
worker_threads = 0

[output]
separator = "{separator}"
pretty_json = {pretty}
"#,
        window = defaults.core.repetition.window,
        tolerance = defaults.core.repetition.tolerance,
        threshold = defaults.performance.parallel_threshold,
        separator = defaults.output.separator,
        pretty = defaults.output.pretty_json,
    )
}
