use crate::common::Cost;
use crate::error::SearchError;
use crate::problem::Problem;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A vertex of the search tree.
///
/// Children hold an `Rc` to their parent so a path stays traceable after the
/// parent has left the frontier. Costs are computed once in the constructor
/// and never change afterwards, which keeps the frontier order stable.
pub struct SearchNode<P: Problem> {
    state: P::State,
    parent: Option<Rc<SearchNode<P>>>,
    action: Option<P::Action>,
    depth: usize,
    g: Cost,
    h: Cost,
    f: Cost,
}

impl<P: Problem> SearchNode<P> {
    /// Build a node, validating that `parent` and `action` are given together.
    pub fn new(
        problem: &P,
        state: P::State,
        parent: Option<Rc<SearchNode<P>>>,
        action: Option<P::Action>,
    ) -> Result<Self, SearchError> {
        match (parent, action) {
            (None, None) => Ok(Self::root(problem, state)),
            (Some(parent), Some(action)) => Ok(Self::derive(problem, state, parent, action)),
            (Some(_), None) => Err(SearchError::MissingAction),
            (None, Some(_)) => Err(SearchError::ActionWithoutParent),
        }
    }

    pub fn root(problem: &P, state: P::State) -> Self {
        let mut node = SearchNode {
            state,
            parent: None,
            action: None,
            depth: 0,
            g: 0.0,
            h: 0.0,
            f: 0.0,
        };
        node.h = problem.heuristic(&node);
        node.f = node.g + node.h;
        node
    }

    fn derive(problem: &P, state: P::State, parent: Rc<SearchNode<P>>, action: P::Action) -> Self {
        let mut node = SearchNode {
            state,
            parent: Some(Rc::clone(&parent)),
            action: Some(action.clone()),
            depth: parent.depth + 1,
            g: 0.0,
            h: 0.0,
            f: 0.0,
        };
        node.g = parent.g + problem.step_cost(&parent, &action, &node);
        node.h = problem.heuristic(&node);
        node.f = node.g + node.h;
        node
    }

    /// Child reached from this node by `action`.
    pub fn child(self: &Rc<Self>, problem: &P, action: P::Action) -> Self {
        let state = problem.result(&self.state, &action);
        Self::derive(problem, state, Rc::clone(self), action)
    }

    /// Lazily generate one child per legal action, in the problem's order.
    ///
    /// Nothing is cached; each call asks the problem again.
    pub fn expand<'a>(self: &'a Rc<Self>, problem: &'a P) -> impl Iterator<Item = Self> + 'a {
        problem
            .actions(&self.state)
            .into_iter()
            .map(move |action| self.child(problem, action))
    }

    /// Nodes from the root to this node, root first.
    pub fn path(self: &Rc<Self>) -> Vec<Rc<Self>> {
        let mut path = vec![Rc::clone(self)];
        let mut current = self;
        while let Some(parent) = &current.parent {
            path.push(Rc::clone(parent));
            current = parent;
        }
        path.reverse();
        path
    }

    /// Actions that lead from the root to this node.
    pub fn solution(&self) -> Vec<P::Action> {
        let mut actions = Vec::with_capacity(self.depth);
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            current = node.parent.as_deref();
        }
        actions.reverse();
        actions
    }

    pub fn state(&self) -> &P::State {
        &self.state
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode<P>>> {
        self.parent.as_ref()
    }

    pub fn action(&self) -> Option<&P::Action> {
        self.action.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn g(&self) -> Cost {
        self.g
    }

    pub fn h(&self) -> Cost {
        self.h
    }

    pub fn f(&self) -> Cost {
        self.f
    }

    /// Order by estimated total cost only.
    ///
    /// Kept apart from `PartialOrd`, since equality is defined on the state.
    pub fn cmp_f(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f)
    }
}

// Equality and hashing look at the state only, so two nodes reached by
// different paths compare equal.
impl<P: Problem> PartialEq for SearchNode<P> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<P: Problem> Eq for SearchNode<P> {}

impl<P: Problem> Hash for SearchNode<P> {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.state.hash(hasher);
    }
}

// Unlink parents one at a time; a recursive drop of a long depth-first
// chain would overflow the stack.
impl<P: Problem> Drop for SearchNode<P> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl<P: Problem> fmt::Debug for SearchNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchNode")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("depth", &self.depth)
            .field("g", &self.g)
            .field("h", &self.h)
            .field("f", &self.f)
            .finish()
    }
}

impl<P: Problem> fmt::Display for SearchNode<P>
where
    P::State: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "f={:.1} (g={:.1} + h={:.1})", self.f, self.g, self.h)?;
        write!(f, "{}", self.state)
    }
}
