//! Depth-limited minimax with alpha-beta pruning.
//!
//! The side to move decides the role at each node: the engine's side
//! maximizes, the opponent minimizes. A ThreeForOne bonus keeps the same
//! side on move for one more ply, so roles do not strictly alternate.

use crate::board::{Position, Side};
use crate::eval::EvalWeights;
use crate::movegen::legal_moves;
use crate::resolve::apply;
use crate::rules::{is_win, Variant};

/// Score of a decided win. Larger in magnitude than any heuristic sum.
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Bound used to open the alpha-beta window.
pub const INFINITY: i32 = WIN_SCORE + 1;

/// Per-search state: the rules, the side being maximized, and counters.
pub struct AlphaBeta<'a> {
    pub variant: Variant,
    pub engine: Side,
    pub weights: &'a EvalWeights,
    pub nodes: u64,
}

impl<'a> AlphaBeta<'a> {
    /// Creates a search for `engine` under `variant`.
    pub fn new(variant: Variant, engine: Side, weights: &'a EvalWeights) -> Self {
        AlphaBeta {
            variant,
            engine,
            weights,
            nodes: 0,
        }
    }

    /// Sentinel score if a line of four is on the board.
    ///
    /// Both sides holding a line counts as a draw.
    #[inline]
    pub fn decided_score(&self, position: &Position) -> Option<i32> {
        let own = is_win(&position.board, self.engine);
        let opp = is_win(&position.board, self.engine.opponent());
        match (own, opp) {
            (true, true) => Some(0),
            (true, false) => Some(WIN_SCORE),
            (false, true) => Some(-WIN_SCORE),
            (false, false) => None,
        }
    }

    /// Minimax value of `position` searched `depth` plies deep.
    pub fn minimax(&mut self, position: &Position, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.decided_score(position) {
            return score;
        }
        if depth == 0 {
            return self
                .variant
                .evaluate(&position.board, self.engine, self.weights);
        }

        let moves = legal_moves(position, self.variant);
        if moves.is_empty() {
            return 0;
        }

        if position.to_move == self.engine {
            let mut best = -INFINITY;
            for mv in moves {
                let child = apply(position, mv, self.variant);
                let score = self.minimax(&child, depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let child = apply(position, mv, self.variant);
                let score = self.minimax(&child, depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::resolve::outcome;
    use crate::rules::ALL_VARIANTS;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Plain minimax over the same tree, without pruning.
    fn exhaustive(search: &mut AlphaBeta, position: &Position, depth: u32) -> i32 {
        if let Some(score) = search.decided_score(position) {
            return score;
        }
        if depth == 0 {
            return search
                .variant
                .evaluate(&position.board, search.engine, search.weights);
        }
        let moves = legal_moves(position, search.variant);
        if moves.is_empty() {
            return 0;
        }
        let maximizing = position.to_move == search.engine;
        let variant = search.variant;
        let scores: Vec<i32> = moves
            .into_iter()
            .map(|mv| exhaustive(search, &apply(position, mv, variant), depth - 1))
            .collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn random_position(rng: &mut StdRng, variant: Variant, plies: usize) -> Position {
        let mut pos = Position::start();
        for _ in 0..plies {
            if outcome(&pos, variant).is_some() {
                break;
            }
            let moves = legal_moves(&pos, variant);
            let mv = moves[rng.gen_range(0..moves.len())];
            let next = apply(&pos, mv, variant);
            if outcome(&next, variant).is_some() {
                break;
            }
            pos = next;
        }
        pos
    }

    #[test]
    fn pruning_never_changes_the_value() {
        let weights = EvalWeights::default();
        let mut rng = StdRng::seed_from_u64(99);
        for variant in ALL_VARIANTS {
            for _ in 0..12 {
                let plies = rng.gen_range(4..20);
                let pos = random_position(&mut rng, variant, plies);
                for depth in 0..=3 {
                    let mut pruned = AlphaBeta::new(variant, pos.to_move, &weights);
                    let mut full = AlphaBeta::new(variant, pos.to_move, &weights);
                    let a = pruned.minimax(&pos, depth, -INFINITY, INFINITY);
                    let b = exhaustive(&mut full, &pos, depth);
                    assert_eq!(a, b, "{:?} depth {} diverged", variant, depth);
                }
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let weights = EvalWeights::default();
        let mut search = AlphaBeta::new(Variant::Classic, Side::Red, &weights);
        search.minimax(&Position::start(), 4, -INFINITY, INFINITY);
        // 1 + 7 + 49 + 343 + 2401 nodes without pruning.
        assert!(search.nodes < 2801);
    }

    #[test]
    fn depth_zero_is_the_evaluation() {
        let weights = EvalWeights::default();
        let mut board = Board::empty();
        board.set(5, 3, Some(Side::Red));
        let pos = Position::new(board, Side::Yellow);
        let mut search = AlphaBeta::new(Variant::Classic, Side::Red, &weights);
        assert_eq!(search.minimax(&pos, 0, -INFINITY, INFINITY), 3);
    }

    #[test]
    fn decided_positions_return_sentinel_at_any_depth() {
        let weights = EvalWeights::default();
        let mut board = Board::empty();
        for col in 0..4 {
            board.set(5, col, Some(Side::Yellow));
        }
        let pos = Position::new(board, Side::Red);
        for depth in [0, 1, 5] {
            let mut search = AlphaBeta::new(Variant::Classic, Side::Red, &weights);
            assert_eq!(search.minimax(&pos, depth, -INFINITY, INFINITY), -WIN_SCORE);
        }
    }

    #[test]
    fn heuristic_never_reaches_the_win_sentinel() {
        let weights = EvalWeights::default();
        let mut board = Board::empty();
        board.stock = [u32::MAX, 0];
        let pos = Position::new(board, Side::Red);
        let mut search = AlphaBeta::new(Variant::Stock, Side::Red, &weights);
        let score = search.minimax(&pos, 0, -INFINITY, INFINITY);
        assert!(score < WIN_SCORE);
        assert!(crate::eval::HEURISTIC_LIMIT < WIN_SCORE);
    }

    #[test]
    fn win_in_one_is_found() {
        let weights = EvalWeights::default();
        let mut board = Board::empty();
        for col in 0..3 {
            board.set(5, col, Some(Side::Red));
        }
        let pos = Position::new(board, Side::Red);
        let mut search = AlphaBeta::new(Variant::Classic, Side::Red, &weights);
        assert_eq!(search.minimax(&pos, 1, -INFINITY, INFINITY), WIN_SCORE);
    }
}
