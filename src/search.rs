mod explored;
mod frontier;
mod graph;
mod node;

pub use explored::ExploredSet;
pub use frontier::PriorityFrontier;
pub use graph::{graph_search, GraphSearch};
pub use node::SearchNode;
