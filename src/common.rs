use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::problem::Problem;
use crate::search::SearchNode;

/// Real-valued path cost and heuristic estimate.
pub type Cost = f64;

/// Nodes from the root to the goal, root first.
pub type NodePath<P> = Vec<Rc<SearchNode<P>>>;

pub enum SearchOutcome<P: Problem> {
    Solved(NodePath<P>),
    // Frontier exhausted without reaching a goal.
    NoSolution,
    // The per-pop hook asked the search to stop.
    Aborted,
}

impl<P: Problem> SearchOutcome<P> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }
}

/// Result of one search invocation.
pub struct SearchReport<P: Problem> {
    pub outcome: SearchOutcome<P>,
    /// Distinct states added to the explored set.
    pub explored: usize,
    /// Nodes popped from the frontier.
    pub expanded: usize,
    pub frontier_high_water: usize,
    pub elapsed: Duration,
}

// `P` itself need not implement Debug.
impl<P: Problem> fmt::Debug for SearchOutcome<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Solved(path) => f.debug_tuple("Solved").field(path).finish(),
            SearchOutcome::NoSolution => f.write_str("NoSolution"),
            SearchOutcome::Aborted => f.write_str("Aborted"),
        }
    }
}

impl<P: Problem> fmt::Debug for SearchReport<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchReport")
            .field("outcome", &self.outcome)
            .field("explored", &self.explored)
            .field("expanded", &self.expanded)
            .field("frontier_high_water", &self.frontier_high_water)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

impl<P: Problem> SearchReport<P> {
    pub fn path(&self) -> Option<&NodePath<P>> {
        match &self.outcome {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    /// Actions along the solution path, excluding the root.
    pub fn solution(&self) -> Option<Vec<P::Action>> {
        self.path()
            .and_then(|path| path.last())
            .map(|goal| goal.solution())
    }

    /// `(path_or_none, explored_count, elapsed)`.
    pub fn into_parts(self) -> (Option<NodePath<P>>, usize, Duration) {
        let path = match self.outcome {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        };
        (path, self.explored, self.elapsed)
    }
}
