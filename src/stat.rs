use crate::common::SearchReport;
use crate::problem::Problem;
use crate::strategy::Strategy;

use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Measurements of one search run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub solved: bool,
    pub plan_len: usize,
    pub explored: usize,
    pub expanded: usize,
    pub elapsed_s: f64,
}

impl Stats {
    pub fn from_report<P: Problem>(report: &SearchReport<P>) -> Self {
        let solution = report.solution();
        Stats {
            solved: solution.is_some(),
            plan_len: solution.map_or(0, |actions| actions.len()),
            explored: report.explored,
            expanded: report.expanded,
            elapsed_s: report.elapsed.as_secs_f64(),
        }
    }
}

/// Mean and sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub stdev: f64,
}

impl Summary {
    pub fn of(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Summary::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let stdev = if samples.len() < 2 {
            0.0
        } else {
            let squares: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
            (squares / (n - 1.0)).sqrt()
        };
        Summary { mean, stdev }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub runs: usize,
    pub unsolved: usize,
    pub plan_len: Summary,
    pub explored: Summary,
    pub elapsed_s: Summary,
}

/// Runs collected per strategy across all trials.
#[derive(Debug, Default)]
pub struct Collector {
    runs: BTreeMap<String, Vec<Stats>>,
}

impl Collector {
    pub fn record(&mut self, strategy: Strategy, stats: Stats) {
        self.runs.entry(strategy.to_string()).or_default().push(stats);
    }

    pub fn summarize(&self) -> BTreeMap<String, StrategySummary> {
        self.runs
            .iter()
            .map(|(strategy, runs)| {
                let solved: Vec<&Stats> = runs.iter().filter(|stats| stats.solved).collect();
                let column = |field: fn(&Stats) -> f64| -> Vec<f64> {
                    solved.iter().map(|stats| field(stats)).collect()
                };
                let summary = StrategySummary {
                    runs: runs.len(),
                    unsolved: runs.len() - solved.len(),
                    plan_len: Summary::of(&column(|stats| stats.plan_len as f64)),
                    explored: Summary::of(&column(|stats| stats.explored as f64)),
                    elapsed_s: Summary::of(&column(|stats| stats.elapsed_s)),
                };
                (strategy.clone(), summary)
            })
            .collect()
    }

    pub fn print(&self) {
        for (strategy, summary) in self.summarize() {
            info!(
                "{strategy}: runs {} unsolved {} | plan length mean {:.2} stdev {:.2} | explored mean {:.1} stdev {:.1} | seconds mean {:.4} stdev {:.4}",
                summary.runs,
                summary.unsolved,
                summary.plan_len.mean,
                summary.plan_len.stdev,
                summary.explored.mean,
                summary.explored.stdev,
                summary.elapsed_s.mean,
                summary.elapsed_s.stdev,
            );
        }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.summarize())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(plan_len: usize, explored: usize) -> Stats {
        Stats {
            solved: true,
            plan_len,
            explored,
            expanded: explored,
            elapsed_s: 0.5,
        }
    }

    #[test]
    fn test_summary_of_samples() {
        let summary = Summary::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(summary.mean, 5.0);
        assert!((summary.stdev - 2.138089935).abs() < 1e-6);
    }

    #[test]
    fn test_summary_edge_cases() {
        assert_eq!(Summary::of(&[]), Summary::default());
        assert_eq!(Summary::of(&[3.0]), Summary { mean: 3.0, stdev: 0.0 });
    }

    #[test]
    fn test_collector_groups_by_strategy() {
        let mut collector = Collector::default();
        collector.record(Strategy::BreadthFirst, run(4, 10));
        collector.record(Strategy::BreadthFirst, run(6, 30));
        collector.record(Strategy::Manhattan, run(4, 5));
        collector.record(Strategy::Manhattan, Stats::default());

        let summary = collector.summarize();
        let breadth_first = &summary["breadth-first"];
        assert_eq!(breadth_first.runs, 2);
        assert_eq!(breadth_first.plan_len.mean, 5.0);
        assert_eq!(breadth_first.explored.mean, 20.0);

        let manhattan = &summary["manhattan"];
        assert_eq!(manhattan.runs, 2);
        assert_eq!(manhattan.unsolved, 1);
        assert_eq!(manhattan.plan_len, Summary { mean: 4.0, stdev: 0.0 });
    }

    #[test]
    fn test_write_json() {
        let mut collector = Collector::default();
        collector.record(Strategy::DepthFirst, run(12, 100));
        let path = std::env::temp_dir().join("graph_search_stat_test.json");
        collector.write_json(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["depth-first"]["runs"], 1);
        assert_eq!(written["depth-first"]["plan_len"]["mean"], 12.0);
        std::fs::remove_file(path).unwrap();
    }
}
