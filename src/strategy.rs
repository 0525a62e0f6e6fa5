use crate::common::Cost;
use crate::problem::Problem;
use crate::puzzle::{Move, NPuzzle};
use crate::search::SearchNode;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of cost functions that decides the order nodes leave the frontier.
pub trait CostModel<P: Problem> {
    /// Cost of one edge; the engine adds it to the parent's `g`.
    fn g(&self, parent: &SearchNode<P>, action: &P::Action, child: &SearchNode<P>) -> Cost;

    fn h(&self, node: &SearchNode<P>) -> Cost;
}

/// Unit edges, no estimate: nodes leave the frontier level by level.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl<P: Problem> CostModel<P> for BreadthFirst {
    fn g(&self, _parent: &SearchNode<P>, _action: &P::Action, _child: &SearchNode<P>) -> Cost {
        1.0
    }

    fn h(&self, _node: &SearchNode<P>) -> Cost {
        0.0
    }
}

/// Free edges and `h = -depth`: the deepest node is always cheapest.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl<P: Problem> CostModel<P> for DepthFirst {
    fn g(&self, _parent: &SearchNode<P>, _action: &P::Action, _child: &SearchNode<P>) -> Cost {
        0.0
    }

    fn h(&self, node: &SearchNode<P>) -> Cost {
        -(node.depth() as Cost)
    }
}

/// Unit edges plus the city-block distance of every tile to its goal cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl CostModel<NPuzzle> for Manhattan {
    fn g(&self, _parent: &SearchNode<NPuzzle>, _action: &Move, _child: &SearchNode<NPuzzle>) -> Cost {
        1.0
    }

    fn h(&self, node: &SearchNode<NPuzzle>) -> Cost {
        node.state().manhattan_distance() as Cost
    }
}

/// Selects one of the cost models above by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Manhattan,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Manhattan,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::Manhattan => "manhattan",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::TileBoard;
    use std::rc::Rc;

    fn problem(strategy: Strategy) -> NPuzzle {
        let board = TileBoard::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        NPuzzle::new(board, strategy)
    }

    #[test]
    fn test_breadth_first_costs() {
        let problem = problem(Strategy::BreadthFirst);
        let root = Rc::new(SearchNode::root(&problem, problem.initial_state().clone()));
        let child = Rc::new(root.expand(&problem).next().unwrap());
        let grandchild = child.expand(&problem).next().unwrap();

        assert_eq!(root.f(), 0.0);
        assert_eq!(child.g(), 1.0);
        assert_eq!(child.h(), 0.0);
        assert_eq!(grandchild.g(), 2.0);
    }

    #[test]
    fn test_depth_first_costs() {
        let problem = problem(Strategy::DepthFirst);
        let root = Rc::new(SearchNode::root(&problem, problem.initial_state().clone()));
        let child = Rc::new(root.expand(&problem).next().unwrap());
        let grandchild = child.expand(&problem).next().unwrap();

        assert_eq!(child.g(), 0.0);
        assert_eq!(child.f(), -1.0);
        assert_eq!(grandchild.f(), -2.0);
    }

    #[test]
    fn test_manhattan_costs() {
        let problem = problem(Strategy::Manhattan);
        let root = Rc::new(SearchNode::root(&problem, problem.initial_state().clone()));
        // 5 is one row below its cell, 8 one column right of it.
        assert_eq!(root.h(), 2.0);

        let costs: Vec<(Cost, Cost)> = root.expand(&problem).map(|child| (child.g(), child.h())).collect();
        // Down moves 5 home; Right moves 6 away; Up moves 2 away; Left moves 4 away.
        assert_eq!(costs, vec![(1.0, 1.0), (1.0, 3.0), (1.0, 3.0), (1.0, 3.0)]);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::DepthFirst.to_string(), "depth-first");
        let parsed: Strategy = serde_yaml::from_str("manhattan").unwrap();
        assert_eq!(parsed, Strategy::Manhattan);
        assert_eq!(
            Strategy::from_str("breadth-first", true).unwrap(),
            Strategy::BreadthFirst
        );
    }
}
