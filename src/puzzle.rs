use crate::common::Cost;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchNode;
use crate::strategy::{BreadthFirst, CostModel, DepthFirst, Manhattan, Strategy};

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::rc::Rc;

const BLANK: u8 = 0;

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Down,
    Right,
    Up,
    Left,
}

impl Move {
    /// Enumeration order of legal moves.
    pub const ORDER: [Move; 4] = [Move::Down, Move::Right, Move::Up, Move::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Down => (1, 0),
            Move::Right => (0, 1),
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
        }
    }
}

/// Square sliding-tile board, row-major, `0` is the blank.
///
/// The goal has tiles `1..n*n` in order with the blank in the last cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileBoard {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
}

impl TileBoard {
    pub fn new(size: usize, tiles: Vec<u8>) -> Result<Self, SearchError> {
        if !(2..=16).contains(&size) {
            return Err(SearchError::InvalidBoard {
                reason: format!("board size must be between 2 and 16, got {size}"),
            });
        }
        if tiles.len() != size * size {
            return Err(SearchError::InvalidBoard {
                reason: format!("expected {} tiles, got {}", size * size, tiles.len()),
            });
        }
        let mut seen = vec![false; tiles.len()];
        for &tile in &tiles {
            match seen.get_mut(tile as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(SearchError::InvalidBoard {
                        reason: format!("tile {tile} is out of range or repeated"),
                    })
                }
            }
        }
        let blank = tiles
            .iter()
            .position(|&tile| tile == BLANK)
            .ok_or_else(|| SearchError::InvalidBoard {
                reason: "no blank".to_string(),
            })?;
        Ok(TileBoard { size, tiles, blank })
    }

    pub fn goal(size: usize) -> Result<Self, SearchError> {
        let cells = size * size;
        let tiles = (1..cells).chain(std::iter::once(0)).map(|tile| tile as u8).collect();
        Self::new(size, tiles)
    }

    /// Uniformly shuffled board, fixed up to be solvable.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, SearchError> {
        let mut tiles: Vec<u8> = (0..size * size).map(|tile| tile as u8).collect();
        tiles.shuffle(rng);
        let mut board = Self::new(size, tiles)?;
        if !board.is_solvable() {
            // Swapping two tiles flips the inversion parity.
            let (first, second) = board.first_two_tiles();
            board.tiles.swap(first, second);
        }
        Ok(board)
    }

    fn first_two_tiles(&self) -> (usize, usize) {
        let mut cells = (0..self.tiles.len()).filter(|&cell| cell != self.blank);
        // A board has at least four cells, so three are tiles.
        let first = cells.next().unwrap_or(0);
        let second = cells.next().unwrap_or(1);
        (first, second)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Row and column of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles
            .iter()
            .enumerate()
            .all(|(cell, &tile)| if cell == last { tile == BLANK } else { tile as usize == cell + 1 })
    }

    /// Pairs of tiles that appear in the wrong order, ignoring the blank.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&tile| tile != BLANK).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| a > b).count())
            .sum()
    }

    /// Whether the goal is reachable from this board.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_row_from_bottom = self.size - self.blank().0;
            (inversions + blank_row_from_bottom) % 2 == 1
        }
    }

    /// Legal moves of the blank, in [`Move::ORDER`].
    pub fn actions(&self) -> Vec<Move> {
        Move::ORDER
            .into_iter()
            .filter(|&mv| self.target(mv).is_some())
            .collect()
    }

    fn target(&self, mv: Move) -> Option<usize> {
        let (row, col) = self.blank();
        let (dr, dc) = mv.delta();
        let row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;
        Some(row * self.size + col)
    }

    /// Board after sliding the blank, or `None` if the move leaves the board.
    pub fn try_move(&self, mv: Move) -> Option<TileBoard> {
        let target = self.target(mv)?;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(TileBoard {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Sum over tiles of the city-block distance to the goal cell.
    pub fn manhattan_distance(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(cell, &tile)| {
                let home = tile as usize - 1;
                let (row, col) = (cell / self.size, cell % self.size);
                let (home_row, home_col) = (home / self.size, home % self.size);
                row.abs_diff(home_row) + col.abs_diff(home_col)
            })
            .sum()
    }
}

impl fmt::Display for TileBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size) {
            let cells: Vec<String> = row
                .iter()
                .map(|&tile| if tile == BLANK { ".".to_string() } else { tile.to_string() })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Sliding-tile puzzle searched with one of the built-in strategies.
#[derive(Debug, Clone)]
pub struct NPuzzle {
    initial: TileBoard,
    strategy: Strategy,
}

impl NPuzzle {
    pub fn new(initial: TileBoard, strategy: Strategy) -> Self {
        NPuzzle { initial, strategy }
    }

    pub fn random<R: Rng + ?Sized>(
        size: usize,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<Self, SearchError> {
        Ok(Self::new(TileBoard::random(size, rng)?, strategy))
    }

    /// Same board, different cost model.
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self::new(self.initial.clone(), strategy)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Every board along `path` as a grid, each headed by the move that made it.
    pub fn describe_path(path: &[Rc<SearchNode<NPuzzle>>]) -> String {
        let mut out = String::new();
        for (step, node) in path.iter().enumerate() {
            match node.action() {
                Some(action) => out.push_str(&format!("Move {step} - {action:?}\n")),
                None => out.push_str("Initial state\n"),
            }
            out.push_str(&node.state().to_string());
        }
        out
    }
}

impl Problem for NPuzzle {
    type State = TileBoard;
    type Action = Move;

    fn initial_state(&self) -> &TileBoard {
        &self.initial
    }

    fn actions(&self, state: &TileBoard) -> Vec<Move> {
        state.actions()
    }

    fn result(&self, state: &TileBoard, action: &Move) -> TileBoard {
        // Moves come from `actions`, so the fallback is never taken in a search.
        state.try_move(*action).unwrap_or_else(|| state.clone())
    }

    fn goal_test(&self, state: &TileBoard) -> bool {
        state.is_goal()
    }

    fn step_cost(&self, parent: &SearchNode<Self>, action: &Move, child: &SearchNode<Self>) -> Cost {
        match self.strategy {
            Strategy::BreadthFirst => BreadthFirst.g(parent, action, child),
            Strategy::DepthFirst => DepthFirst.g(parent, action, child),
            Strategy::Manhattan => Manhattan.g(parent, action, child),
        }
    }

    fn heuristic(&self, node: &SearchNode<Self>) -> Cost {
        match self.strategy {
            Strategy::BreadthFirst => BreadthFirst.h(node),
            Strategy::DepthFirst => DepthFirst.h(node),
            Strategy::Manhattan => Manhattan.h(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SearchOutcome;
    use crate::search::graph_search;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(size: usize, tiles: &[u8]) -> TileBoard {
        TileBoard::new(size, tiles.to_vec()).unwrap()
    }

    #[test]
    fn test_rejects_malformed_boards() {
        assert!(TileBoard::new(3, vec![1, 2, 3]).is_err());
        assert!(TileBoard::new(2, vec![1, 1, 2, 0]).is_err());
        assert!(TileBoard::new(2, vec![1, 2, 3, 4]).is_err());
        assert!(TileBoard::new(1, vec![0]).is_err());
    }

    #[test]
    fn test_goal_board() {
        let goal = TileBoard::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(goal.is_goal());
        assert_eq!(goal.manhattan_distance(), 0);
        assert_eq!(goal.blank(), (2, 2));
        assert_eq!(goal.to_string(), "1 2 3\n4 5 6\n7 8 .\n");
    }

    #[test]
    fn test_actions_order() {
        let center = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(center.actions(), Move::ORDER.to_vec());

        let corner = board(3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(corner.actions(), vec![Move::Down, Move::Right]);

        let goal = TileBoard::goal(3).unwrap();
        assert_eq!(goal.actions(), vec![Move::Up, Move::Left]);
        assert!(goal.try_move(Move::Down).is_none());
    }

    #[test]
    fn test_try_move_swaps_blank() {
        let start = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let moved = start.try_move(Move::Right).unwrap();
        assert!(moved.is_goal());
        assert_eq!(moved.blank(), (2, 2));
        assert_eq!(moved.try_move(Move::Left).unwrap(), start);
    }

    #[test]
    fn test_solvability() {
        assert!(TileBoard::goal(3).unwrap().is_solvable());
        assert!(!board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]).is_solvable());
        assert!(board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).is_solvable());

        assert!(TileBoard::goal(2).unwrap().is_solvable());
        assert!(board(2, &[1, 2, 0, 3]).is_solvable());
        assert!(!board(2, &[2, 1, 3, 0]).is_solvable());

        let goal = TileBoard::goal(4).unwrap();
        let shifted = goal.try_move(Move::Up).unwrap();
        assert!(shifted.is_solvable());
    }

    #[test]
    fn test_random_boards_are_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 2..=4 {
            for _ in 0..20 {
                let board = TileBoard::random(size, &mut rng).unwrap();
                assert!(board.is_solvable(), "{board}");
            }
        }
    }

    #[test]
    fn test_one_move_from_solved() {
        let start = board(3, &[1, 2, 3, 4, 5, 0, 7, 8, 6]);
        let legal_moves = start.actions().len();
        let problem = NPuzzle::new(start, Strategy::BreadthFirst);
        let report = graph_search(&problem, true, false).unwrap();

        assert_eq!(report.solution().unwrap(), vec![Move::Down]);
        assert_eq!(report.path().unwrap().len(), 2);
        assert!(report.explored <= legal_moves);
    }

    #[test]
    fn test_unsolvable_exhausts_reachable_states() {
        let problem = NPuzzle::new(board(2, &[2, 1, 3, 0]), Strategy::BreadthFirst);
        let report = graph_search(&problem, false, false).unwrap();

        assert!(matches!(report.outcome, SearchOutcome::NoSolution));
        // Half of the 4! arrangements are reachable.
        assert_eq!(report.explored, 12);
    }

    #[test]
    fn test_path_replays_through_transition_function() {
        let mut rng = StdRng::seed_from_u64(3);
        let problem = NPuzzle::random(3, Strategy::Manhattan, &mut rng).unwrap();
        let report = graph_search(&problem, false, false).unwrap();
        let path = report.path().unwrap();

        assert_eq!(path[0].state(), problem.initial_state());
        assert!(path.last().unwrap().state().is_goal());
        for pair in path.windows(2) {
            let action = pair[1].action().unwrap();
            assert_eq!(problem.result(pair[0].state(), action), *pair[1].state());
        }
    }

    #[test]
    fn test_describe_path_prints_grids() {
        let problem = NPuzzle::new(board(2, &[1, 2, 0, 3]), Strategy::BreadthFirst);
        let report = graph_search(&problem, false, false).unwrap();
        let text = NPuzzle::describe_path(report.path().unwrap());

        assert_eq!(text, "Initial state\n1 2\n. 3\nMove 1 - Right\n1 2\n3 .\n");
    }

    #[test]
    fn test_strategies_agree_on_solvability() {
        let mut rng = StdRng::seed_from_u64(11);
        let puzzle = NPuzzle::random(3, Strategy::BreadthFirst, &mut rng).unwrap();

        let breadth_first = graph_search(&puzzle, false, false).unwrap();
        let manhattan = graph_search(&puzzle.with_strategy(Strategy::Manhattan), false, false).unwrap();
        let depth_first = graph_search(&puzzle.with_strategy(Strategy::DepthFirst), false, false).unwrap();

        let shortest = breadth_first.solution().unwrap().len();
        assert!(manhattan.solution().unwrap().len() >= shortest);
        assert!(depth_first.solution().unwrap().len() >= shortest);
    }
}
