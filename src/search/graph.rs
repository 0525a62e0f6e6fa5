use super::{ExploredSet, PriorityFrontier, SearchNode};
use crate::common::{SearchOutcome, SearchReport};
use crate::error::SearchError;
use crate::problem::Problem;

use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Best-first graph search over a [`Problem`].
///
/// A child's state is marked explored when the child is generated, not when
/// it is expanded. A state already in the frontier is therefore never
/// replaced by a cheaper duplicate found later; with cost functions that are
/// not monotone this can return a costlier goal than A* with re-opening would.
pub struct GraphSearch<'p, P: Problem> {
    problem: &'p P,
    verbose: bool,
    debug: bool,
}

impl<'p, P: Problem> GraphSearch<'p, P> {
    pub fn new(problem: &'p P) -> Self {
        GraphSearch {
            problem,
            verbose: false,
            debug: false,
        }
    }

    /// Log the solution moves once a goal is found.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Log every popped node.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn run(&self) -> Result<SearchReport<P>, SearchError> {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Run the search, calling `hook` once per popped node before the goal
    /// test. Returning `ControlFlow::Break` stops with [`SearchOutcome::Aborted`].
    #[instrument(skip_all, name = "graph_search", level = "debug")]
    pub fn run_with<F>(&self, mut hook: F) -> Result<SearchReport<P>, SearchError>
    where
        F: FnMut(&SearchNode<P>) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut frontier = PriorityFrontier::new();
        let mut explored = ExploredSet::new();
        let mut expanded = 0;

        let root = SearchNode::root(self.problem, self.problem.initial_state().clone());
        frontier.push(Rc::new(root));

        let outcome = loop {
            if frontier.is_empty() {
                break SearchOutcome::NoSolution;
            }
            let node = frontier.pop()?;
            expanded += 1;

            if self.debug {
                debug!("popped node: {node:?}");
            }

            if hook(node.as_ref()).is_break() {
                debug!("search aborted after {expanded} pops");
                break SearchOutcome::Aborted;
            }

            if self.problem.goal_test(node.state()) {
                break SearchOutcome::Solved(node.path());
            }

            for child in node.expand(self.problem) {
                if explored.exists(child.state()) {
                    continue;
                }
                explored.add(child.state().clone());
                frontier.push(Rc::new(child));
            }
            trace!("frontier size {}", frontier.len());
        };

        let report = SearchReport {
            outcome,
            explored: explored.len(),
            expanded,
            frontier_high_water: frontier.high_water(),
            elapsed: start.elapsed(),
        };

        if self.verbose {
            log_outcome(&report);
        }
        Ok(report)
    }
}

// States are only known to be `Debug` here; callers with displayable states
// can render the path themselves.
fn log_outcome<P: Problem>(report: &SearchReport<P>) {
    match &report.outcome {
        SearchOutcome::Solved(path) => {
            info!("Solution in {} moves", path.len() - 1);
            info!("Initial state {:?}", path[0].state());
            for (step, node) in path.iter().enumerate().skip(1) {
                if let Some(action) = node.action() {
                    info!("Move {step} - {action:?}: {:?}", node.state());
                }
            }
        }
        SearchOutcome::NoSolution => info!("No solution found"),
        SearchOutcome::Aborted => info!("Search aborted"),
    }
}

/// Run a best-first search with no hook.
pub fn graph_search<P: Problem>(
    problem: &P,
    verbose: bool,
    debug: bool,
) -> Result<SearchReport<P>, SearchError> {
    GraphSearch::new(problem).verbose(verbose).debug(debug).run()
}
