//! Timesteps command implementation

use anyhow::Result;
use clap::Args;
use pinmerge_core::epss_timesteps;
use pinmerge_core::schedule::tabulated_steps;

/// Arguments for the timesteps command
#[derive(Debug, Args)]
pub struct TimestepsArgs {
    /// Number of sampling steps
    #[arg(short, long, default_value_t = 32)]
    pub steps: usize,

    /// List the step counts that have a tabulated schedule
    #[arg(short, long)]
    pub list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ScheduleFormat,
}

/// Supported schedule output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScheduleFormat {
    /// Space-separated values on one line
    Text,
    /// JSON array
    Json,
}

impl TimestepsArgs {
    /// Execute the timesteps command
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> Result<String> {
        if self.list {
            let steps: Vec<usize> = tabulated_steps().collect();
            return Ok(match self.format {
                ScheduleFormat::Text => join(&steps),
                ScheduleFormat::Json => serde_json::to_string(&steps)?,
            });
        }

        let schedule = epss_timesteps(self.steps).to_vec();
        Ok(match self.format {
            ScheduleFormat::Text => join(&schedule),
            ScheduleFormat::Json => serde_json::to_string(&schedule)?,
        })
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
