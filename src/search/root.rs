//! Root move selection.
//!
//! `choose_move` layers three shortcuts over the alpha-beta search, in
//! this order:
//!
//! 1. Forced block: if the opponent could win by dropping into a column on
//!    their next turn, the engine drops there, even when it holds a win of
//!    its own.
//! 2. Immediate win: a turn that completes a line of four right now,
//!    bonus destroys included, is played without searching.
//! 3. Losing-move filter: a root candidate that hands the opponent a win on
//!    their very next turn is scored as a loss instead of being searched.
//!
//! Candidates are examined in generation order and ties keep the first one
//! seen, so the center-out column order is the tie-break at every layer.

use rayon::prelude::*;

use crate::board::{Move, Position, Side, Turn, COLUMN_ORDER};
use crate::eval::EvalWeights;
use crate::movegen::legal_moves;
use crate::resolve::{apply, wins_for};
use crate::rules::Variant;

use super::alphabeta::{AlphaBeta, INFINITY, WIN_SCORE};

/// Search constraints for one call to `choose_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Plies to search below the root.
    pub depth: u32,
    /// Worker threads for the root split; 1 searches sequentially.
    pub threads: usize,
    pub weights: EvalWeights,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            depth: 4,
            threads: 1,
            weights: EvalWeights::default(),
        }
    }
}

/// Which layer produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    ImmediateWin,
    ForcedBlock,
    Search,
    Fallback,
}

/// Result of a root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen turn, `None` only when no move exists at all.
    pub turn: Option<Turn>,
    pub score: i32,
    pub nodes: u64,
    pub depth: u32,
    pub decision: Decision,
}

/// A root turn and the position it leads to.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    first: Move,
    follow_up: Option<Move>,
    state: Position,
    remaining: u32,
}

impl Candidate {
    fn turn(&self) -> Option<Turn> {
        Turn::from_plies(self.first, self.follow_up)
    }
}

/// Picks the turn for the side to move in `position`.
pub fn choose_move(position: &Position, variant: Variant, params: &SearchParams) -> SearchResult {
    let engine = position.to_move;

    let moves = legal_moves(position, variant);
    if moves.is_empty() {
        return fallback(position, params.depth);
    }

    if !position.bonus_pending {
        if let Some(col) = blocking_column(position, variant) {
            log::debug!("forced block in column {}", col);
            return forced_block(position, variant, params, col);
        }
    }

    if let Some((first, follow_up)) = winning_turn(position, variant) {
        log::debug!("immediate win with {:?} {:?}", first, follow_up);
        return SearchResult {
            turn: Turn::from_plies(first, follow_up),
            score: WIN_SCORE,
            nodes: 0,
            depth: params.depth,
            decision: Decision::ImmediateWin,
        };
    }

    let candidates = expand(position, variant, moves, params.depth);
    let ranked = if params.threads > 1 {
        rank_parallel(&candidates, variant, engine, params)
    } else {
        None
    };
    let (best, score, nodes) =
        ranked.unwrap_or_else(|| rank_sequential(&candidates, variant, engine, &params.weights));

    SearchResult {
        turn: candidates[best].turn(),
        score,
        nodes,
        depth: params.depth,
        decision: Decision::Search,
    }
}

/// Finds a turn for the side to move that wins immediately.
///
/// Covers plain drops, Stock destroys whose compaction completes a line,
/// and ThreeForOne drops whose bonus destroy does.
pub fn winning_turn(position: &Position, variant: Variant) -> Option<(Move, Option<Move>)> {
    let side = position.to_move;
    for mv in legal_moves(position, variant) {
        let child = apply(position, mv, variant);
        if wins_for(&child.board, side) {
            return Some((mv, None));
        }
        if child.bonus_pending {
            for follow_up in legal_moves(&child, variant) {
                let grandchild = apply(&child, follow_up, variant);
                if wins_for(&grandchild.board, side) {
                    return Some((mv, Some(follow_up)));
                }
            }
        }
    }
    None
}

/// First column, in center-out order, where an opponent drop would win on
/// their next turn, directly or through the bonus destroy it earns.
pub fn blocking_column(position: &Position, variant: Variant) -> Option<usize> {
    let opponent = position.to_move.opponent();
    let probe = Position::new(position.board, opponent);

    COLUMN_ORDER.into_iter().find(|&col| {
        if probe.board.is_column_full(col) {
            return false;
        }
        let child = apply(&probe, Move::Drop { col }, variant);
        if wins_for(&child.board, opponent) {
            return true;
        }
        child.bonus_pending
            && legal_moves(&child, variant)
                .into_iter()
                .any(|f| wins_for(&apply(&child, f, variant).board, opponent))
    })
}

/// Plays the block in `col`, choosing the bonus destroy by search if the
/// blocking drop earns one.
fn forced_block(position: &Position, variant: Variant, params: &SearchParams, col: usize) -> SearchResult {
    let engine = position.to_move;
    let first = Move::Drop { col };
    let child = apply(position, first, variant);

    let (follow_up, nodes) = if child.bonus_pending {
        let moves = legal_moves(&child, variant);
        let candidates = expand(&child, variant, moves, params.depth.saturating_sub(1));
        let (best, _, nodes) = rank_sequential(&candidates, variant, engine, &params.weights);
        (Some(candidates[best].first), nodes)
    } else {
        (None, 0)
    };

    let final_board = match follow_up {
        Some(f) => apply(&child, f, variant).board,
        None => child.board,
    };

    SearchResult {
        turn: Turn::from_plies(first, follow_up),
        score: variant.evaluate(&final_board, engine, &params.weights),
        nodes,
        depth: params.depth,
        decision: Decision::ForcedBlock,
    }
}

/// Drops into the first non-full column, center first.
fn fallback(position: &Position, depth: u32) -> SearchResult {
    let turn = COLUMN_ORDER
        .into_iter()
        .find(|&c| !position.board.is_column_full(c))
        .map(|col| Turn::Drop { col });
    if turn.is_none() {
        log::warn!("no legal move at the root");
    }
    SearchResult {
        turn,
        score: 0,
        nodes: 0,
        depth,
        decision: Decision::Fallback,
    }
}

/// Expands root moves into complete turns. A bonus-earning drop becomes one
/// candidate per follow-up, each searched one ply shallower.
fn expand(position: &Position, variant: Variant, moves: Vec<Move>, depth: u32) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(moves.len());
    for mv in moves {
        let child = apply(position, mv, variant);
        if child.bonus_pending {
            for follow_up in legal_moves(&child, variant) {
                candidates.push(Candidate {
                    first: mv,
                    follow_up: Some(follow_up),
                    state: apply(&child, follow_up, variant),
                    remaining: depth.saturating_sub(2),
                });
            }
        } else {
            candidates.push(Candidate {
                first: mv,
                follow_up: None,
                state: child,
                remaining: depth.saturating_sub(1),
            });
        }
    }
    candidates
}

/// Scores one candidate. Decided positions take their sentinel; positions
/// where the opponent wins on their next turn take the loss sentinel.
fn score_candidate(candidate: &Candidate, search: &mut AlphaBeta, alpha: i32) -> i32 {
    if let Some(score) = search.decided_score(&candidate.state) {
        return score;
    }
    if candidate.state.to_move != search.engine
        && winning_turn(&candidate.state, search.variant).is_some()
    {
        return -WIN_SCORE;
    }
    search.minimax(&candidate.state, candidate.remaining, alpha, INFINITY)
}

/// Sequential root search carrying alpha across siblings.
///
/// Returns (best index, best score, nodes searched).
fn rank_sequential(
    candidates: &[Candidate],
    variant: Variant,
    engine: Side,
    weights: &EvalWeights,
) -> (usize, i32, u64) {
    let mut search = AlphaBeta::new(variant, engine, weights);
    let mut alpha = -INFINITY;
    let mut best = 0;
    let mut best_score = -INFINITY;

    for (i, candidate) in candidates.iter().enumerate() {
        let score = score_candidate(candidate, &mut search, alpha);
        if score > best_score {
            best_score = score;
            best = i;
        }
        alpha = alpha.max(score);
    }

    (best, best_score, search.nodes)
}

/// Root-split search: every candidate gets its own full window on a rayon
/// worker, then the scores are reduced in generation order.
///
/// Returns `None` if the thread pool cannot be built.
fn rank_parallel(
    candidates: &[Candidate],
    variant: Variant,
    engine: Side,
    params: &SearchParams,
) -> Option<(usize, i32, u64)> {
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("falling back to sequential search: {}", e);
            return None;
        }
    };

    let weights = &params.weights;
    let scored: Vec<(i32, u64)> = pool.install(|| {
        candidates
            .par_iter()
            .map(|candidate| {
                let mut search = AlphaBeta::new(variant, engine, weights);
                let score = score_candidate(candidate, &mut search, -INFINITY);
                (score, search.nodes)
            })
            .collect()
    });

    let mut best = 0;
    let mut best_score = -INFINITY;
    let mut nodes = 0;
    for (i, &(score, n)) in scored.iter().enumerate() {
        nodes += n;
        if score > best_score {
            best_score = score;
            best = i;
        }
    }
    Some((best, best_score, nodes))
}
