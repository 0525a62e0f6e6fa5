use graph_search::config::{Cli, Config};
use graph_search::problem::Problem;
use graph_search::puzzle::NPuzzle;
use graph_search::search::GraphSearch;
use graph_search::stat::{Collector, Stats};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut collector = Collector::default();
    let total_start = Instant::now();

    for trial in 0..config.trials {
        let puzzle = NPuzzle::random(config.board_size, config.strategies[0], &mut rng)?;
        info!(
            "Problem {}: initial state\n{}",
            trial + 1,
            puzzle.initial_state()
        );

        for &strategy in &config.strategies {
            let problem = puzzle.with_strategy(strategy);
            let mut pops = 0;
            // Solutions are logged below as board grids instead of state dumps.
            let report = GraphSearch::new(&problem)
                .debug(config.debug)
                .run_with(|_| {
                    pops += 1;
                    match config.max_expansions {
                        Some(limit) if pops > limit => ControlFlow::Break(()),
                        _ => ControlFlow::Continue(()),
                    }
                })?;

            if config.verbose {
                if let Some(path) = report.path() {
                    info!(
                        "{strategy} solution in {} moves\n{}",
                        path.len() - 1,
                        NPuzzle::describe_path(path)
                    );
                }
            }

            let stats = Stats::from_report(&report);
            if !stats.solved {
                warn!("{strategy} gave up on problem {}: {:?}", trial + 1, report.outcome);
            }
            info!(
                "Finished {strategy}: {} moves, {} explored, {:.4}s",
                stats.plan_len, stats.explored, stats.elapsed_s
            );
            collector.record(strategy, stats);
        }
    }

    info!(
        "Total time to run all trials: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    collector.print();

    if let Some(output_path) = &config.output_path {
        collector.write_json(Path::new(output_path))?;
        info!("Summary written to {output_path}");
    }

    Ok(())
}
