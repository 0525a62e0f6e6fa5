use std::fmt::Debug;
use std::hash::Hash;

use crate::common::Cost;
use crate::search::SearchNode;

/// A search problem: initial state, legal actions, transition function,
/// goal predicate, and the two cost functions that decide the frontier order.
///
/// Swapping `step_cost`/`heuristic` is all it takes to turn the same
/// engine into breadth-first, depth-first, or A* search.
pub trait Problem: Sized {
    /// States are immutable values; equal states must hash equally.
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    fn initial_state(&self) -> &Self::State;

    /// Legal actions in `state`, in the order children should be generated.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// Cost of the single edge `parent --action--> child`.
    ///
    /// The engine adds this to `parent.g()`; it must not be cumulative.
    /// `child` is fully linked (state, parent, action, depth); only its costs
    /// are still zero.
    fn step_cost(
        &self,
        parent: &SearchNode<Self>,
        action: &Self::Action,
        child: &SearchNode<Self>,
    ) -> Cost;

    /// Estimate from `node` to the nearest goal. `node.g()` is already set.
    fn heuristic(&self, node: &SearchNode<Self>) -> Cost;
}
