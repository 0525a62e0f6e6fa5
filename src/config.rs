use crate::strategy::Strategy;

use anyhow::anyhow;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "graph_search",
    about = "Best-first graph search over random sliding-tile puzzles.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Number of random puzzles to solve")]
    pub trials: Option<usize>,

    #[arg(long, help = "Width of the square board (3 for the 8-puzzle)")]
    pub board_size: Option<usize>,

    #[arg(
        long,
        help = "Strategies to run on every puzzle",
        value_enum,
        value_delimiter = ','
    )]
    pub strategies: Vec<Strategy>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Stop a search after this many frontier pops")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Write the summary as JSON to this path")]
    pub output_path: Option<String>,

    #[arg(long, help = "Log the moves of every solution", default_value_t = false)]
    pub verbose: bool,

    #[arg(long, help = "Log every popped search node", default_value_t = false)]
    pub debug: bool,

    #[arg(long, help = "Log filter, e.g. info or graph_search=debug")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub trials: usize,
    pub board_size: usize,
    pub strategies: Vec<Strategy>,
    pub seed: u64,
    pub max_expansions: Option<usize>,
    pub output_path: Option<String>,
    pub verbose: bool,
    pub debug: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trials: 31,
            board_size: 3,
            strategies: Strategy::ALL.to_vec(),
            seed: 0,
            max_expansions: None,
            output_path: None,
            verbose: false,
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply every flag given on the command line, then validate.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(trials) = cli.trials {
            self.trials = trials;
        }
        if let Some(board_size) = cli.board_size {
            self.board_size = board_size;
        }
        if !cli.strategies.is_empty() {
            self.strategies = cli.strategies.clone();
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if cli.max_expansions.is_some() {
            self.max_expansions = cli.max_expansions;
        }
        if cli.output_path.is_some() {
            self.output_path = cli.output_path.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        self.verbose |= cli.verbose;
        self.debug |= cli.debug;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trials == 0 {
            return Err(anyhow!("Number of trials must be at least 1"));
        }
        if !(2..=16).contains(&self.board_size) {
            return Err(anyhow!(
                "Board size must be between 2 and 16, got {}",
                self.board_size
            ));
        }
        if self.strategies.is_empty() {
            return Err(anyhow!("At least one strategy must be selected"));
        }
        if self.max_expansions == Some(0) {
            return Err(anyhow!("Expansion limit must be positive"));
        }
        Ok(())
    }
}
