//! Self-play game generation.
//!
//! Plays complete engine-vs-engine games under any rule variant, optionally
//! starting from a few random opening turns, and records each game's turns,
//! final position and result. Records serialize to JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Position, Side, Turn};
use crate::eval::EvalWeights;
use crate::movegen::legal_moves;
use crate::protocol::notation::{encode_position, format_turn};
use crate::resolve::{apply, outcome, MoveError, Outcome};
use crate::rules::Variant;
use crate::search::{choose_move, SearchParams};

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub games: usize,
    /// Search depth for Red.
    pub depth_red: u32,
    /// Search depth for Yellow.
    pub depth_yellow: u32,
    pub variant: Variant,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Random turns played before the engines take over.
    pub random_openings: usize,
    /// Turn limit after which a game is scored as a draw.
    pub max_turns: usize,
    pub weights: EvalWeights,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            games: 10,
            depth_red: 4,
            depth_yellow: 4,
            variant: Variant::Classic,
            threads: 4,
            seed: 0,
            random_openings: 2,
            max_turns: 200,
            weights: EvalWeights::default(),
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub variant: Variant,
    /// Every turn in move notation, random openings included.
    pub turns: Vec<String>,
    /// Number of leading turns that were chosen at random.
    pub random_turns: usize,
    /// Position notation after the last turn.
    pub final_position: String,
    /// The winning side, `None` for a draw.
    pub winner: Option<Side>,
}

/// Picks a random complete turn for the side to move.
fn random_turn(position: &Position, variant: Variant, rng: &mut SmallRng) -> Option<Turn> {
    let first = *legal_moves(position, variant).choose(rng)?;
    let child = apply(position, first, variant);
    let follow_up = if child.bonus_pending {
        legal_moves(&child, variant).choose(rng).copied()
    } else {
        None
    };
    Turn::from_plies(first, follow_up)
}

/// Plays `turn` through the referee.
fn play_turn(position: &Position, turn: Turn, variant: Variant) -> Result<Position, MoveError> {
    turn.plies()
        .into_iter()
        .try_fold(*position, |pos, ply| pos.play(ply, variant))
}

/// Plays a single self-play game and returns the game record.
///
/// Fails only if a chosen turn is rejected by the referee.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, MoveError> {
    let variant = config.variant;
    let mut position = Position::start();
    let mut turns = Vec::new();
    let mut random_turns = 0;

    let result = loop {
        if let Some(result) = outcome(&position, variant) {
            break result;
        }
        if turns.len() >= config.max_turns {
            log::debug!("game {} hit the turn limit", game_id);
            break Outcome::Draw;
        }

        let turn = if random_turns < config.random_openings {
            random_turns += 1;
            random_turn(&position, variant, rng)
        } else {
            let depth = match position.to_move {
                Side::Red => config.depth_red,
                Side::Yellow => config.depth_yellow,
            };
            let params = SearchParams {
                depth,
                threads: 1,
                weights: config.weights,
            };
            choose_move(&position, variant, &params).turn
        };

        let Some(turn) = turn else {
            break Outcome::Draw;
        };
        position = play_turn(&position, turn, variant)?;
        turns.push(format_turn(turn));
    };

    Ok(GameRecord {
        game_id,
        variant,
        turns,
        random_turns,
        final_position: encode_position(&position),
        winner: match result {
            Outcome::Win(side) => Some(side),
            Outcome::Draw => None,
        },
    })
}

fn seeded_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, start: Instant) {
    if config.quiet {
        return;
    }
    let result = match game.winner {
        Some(side) => format!("{} wins", side.name()),
        None => "draw".to_string(),
    };
    log::info!(
        "Game {}/{}: {} after {} turns ({:.1}s)",
        n,
        config.games,
        result,
        game.turns.len(),
        start.elapsed().as_secs_f64(),
    );
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.games);
    run_self_play_with_callback(config, |game| games.push(game));
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// Games rejected by the referee are logged and skipped.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.games {
        let start = Instant::now();
        let mut rng = seeded_rng(config.seed, i);
        match play_game(config, i, &mut rng) {
            Ok(game) => {
                log_game(config, i + 1, &game, start);
                on_game(game);
            }
            Err(e) => log::error!("game {} aborted: {}", i, e),
        }
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("falling back to sequential self-play: {}", e);
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let start = Instant::now();
                        let mut rng = seeded_rng(config.seed, i);
                        match play_game(config, i, &mut rng) {
                            Ok(game) => {
                                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                                log_game(config, n, &game, start);
                                deliver(tx, game);
                            }
                            Err(e) => log::error!("game {} aborted: {}", i, e),
                        }
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Hands a finished game to the collecting thread.
fn deliver(tx: &std::sync::mpsc::Sender<GameRecord>, game: GameRecord) {
    let id = game.game_id;
    if tx.send(game).is_err() {
        log::warn!("game {} finished after the collector stopped; record dropped", id);
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Win/draw tallies over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub red_wins: usize,
    pub yellow_wins: usize,
    pub draws: usize,
    pub total_turns: usize,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Summary::default()
        };
        for game in games {
            summary.total_turns += game.turns.len();
            match game.winner {
                Some(Side::Red) => summary.red_wins += 1,
                Some(Side::Yellow) => summary.yellow_wins += 1,
                None => summary.draws += 1,
            }
        }
        summary
    }
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let s = Summary::of(games);
    let pct = |n: usize| 100.0 * n as f64 / s.games.max(1) as f64;

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", s.games);
    eprintln!(
        "Avg turns/game: {:.1}",
        s.total_turns as f64 / s.games.max(1) as f64
    );
    eprintln!("  red: {} ({:.1}%)", s.red_wins, pct(s.red_wins));
    eprintln!("  yellow: {} ({:.1}%)", s.yellow_wins, pct(s.yellow_wins));
    eprintln!("  draws: {} ({:.1}%)", s.draws, pct(s.draws));
}
