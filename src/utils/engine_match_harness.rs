//! Head-to-head engine match harness.
//!
//! Runs two `Engine` implementations against each other on a fresh board,
//! optionally with seeded random pre-game walls, and records every ply.

use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::info;

use crate::engines::engine_trait::{Engine, SearchParams};
use crate::game_state::board_state::Board;
use crate::game_state::isolation_types::{Move, Player};
use crate::utils::move_record::GameRecord;

/// Engine identity within a series, independent of who moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    Win { player: PlayerId, moved_first: bool },
    Unfinished,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub rows: usize,
    pub columns: usize,
    /// Inclusive `(min, max)` number of random walls drawn before play.
    pub blocked: Option<(usize, usize)>,
    pub seed: u64,
    pub max_plies: u32,
    pub params: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 5,
            blocked: None,
            seed: 0,
            max_plies: 1_000,
            params: SearchParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    /// `None` only when `max_plies` ran out first.
    pub winner: Option<Player>,
    pub final_board: Board,
    pub record: GameRecord,
    pub player1_move_count: u32,
    pub player2_move_count: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

/// One applied ply, handed to the observer of
/// [`play_engine_match_observed`] after the move is on the board.
#[derive(Debug)]
pub struct PlyReport<'a> {
    pub player: Player,
    pub mv: Move,
    pub score: Option<i32>,
    pub elapsed: Duration,
    pub info_lines: &'a [String],
    pub board: &'a Board,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub first_mover_wins: u16,
    pub unfinished: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} first_mover_wins={} unfinished={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.first_mover_wins,
            self.unfinished,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Build the starting board described by `config`.
pub fn build_match_board(config: &MatchConfig) -> Result<Board, String> {
    let mut board = Board::new(config.rows, config.columns).map_err(|e| e.to_string())?;
    if let Some((min, max)) = config.blocked {
        let mut rng = StdRng::seed_from_u64(config.seed);
        board
            .gen_random_blocked_cells(min, max, &mut rng)
            .map_err(|e| e.to_string())?;
    }
    Ok(board)
}

/// Play a single engine-vs-engine match.
///
/// `engine_one` moves first as player one, `engine_two` is player two.
pub fn play_engine_match(
    mut engine_one: Box<dyn Engine>,
    mut engine_two: Box<dyn Engine>,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    let board = build_match_board(&config)?;
    play_engine_match_from_board(&mut engine_one, &mut engine_two, board, &config)
}

/// Play from a caller-provided board that has not been played on yet.
pub fn play_engine_match_from_board(
    engine_one: &mut Box<dyn Engine>,
    engine_two: &mut Box<dyn Engine>,
    board: Board,
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    play_engine_match_observed(engine_one, engine_two, board, config, |_| {})
}

/// Same as [`play_engine_match_from_board`], calling `on_ply` after every ply.
pub fn play_engine_match_observed<F>(
    engine_one: &mut Box<dyn Engine>,
    engine_two: &mut Box<dyn Engine>,
    mut board: Board,
    config: &MatchConfig,
    mut on_ply: F,
) -> Result<MatchResult, String>
where
    F: FnMut(&PlyReport<'_>),
{
    if board.player1_position().is_some() || board.player2_position().is_some() {
        return Err("match board has already been played on".to_owned());
    }

    engine_one.new_game();
    engine_two.new_game();

    let mut record = GameRecord::new(&board);
    let mut player1_move_count = 0u32;
    let mut player2_move_count = 0u32;
    let mut player1_total_time_ns = 0u128;
    let mut player2_total_time_ns = 0u128;

    let mut winner = board.winner();
    let mut plies = 0u32;
    while winner.is_none() && plies < config.max_plies {
        let mover = board.active_player();
        let legal_moves = board.legal_moves();

        let started = Instant::now();
        let out = match mover {
            Player::One => engine_one.choose_move(&board, &config.params)?,
            Player::Two => engine_two.choose_move(&board, &config.params)?,
        };
        let elapsed = started.elapsed();
        let elapsed_ns = elapsed.as_nanos();

        match mover {
            Player::One => {
                player1_move_count = player1_move_count.saturating_add(1);
                player1_total_time_ns = player1_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Two => {
                player2_move_count = player2_move_count.saturating_add(1);
                player2_total_time_ns = player2_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out
            .best_move
            .or_else(|| legal_moves.first().copied())
            .ok_or("no legal move for undecided position")?;
        if !legal_moves.contains(&chosen) {
            return Err(format!(
                "engine returned illegal move {chosen} for player {}",
                mover.number()
            ));
        }

        record.push(mover, out.score, chosen);
        board.make_move(chosen.x, chosen.y).map_err(|e| e.to_string())?;
        plies += 1;
        winner = board.winner();

        on_ply(&PlyReport {
            player: mover,
            mv: chosen,
            score: out.score,
            elapsed,
            info_lines: &out.info_lines,
            board: &board,
        });
    }

    info!(
        winner = ?winner,
        plies,
        rows = board.rows(),
        columns = board.columns(),
        "match finished"
    );

    Ok(MatchResult {
        winner,
        final_board: board,
        record,
        player1_move_count,
        player2_move_count,
        player1_total_time_ns,
        player2_total_time_ns,
    })
}

/// Play a series of matches and aggregate win statistics.
///
/// The first mover alternates each game, starting with `player1_factory`.
/// Game `i` uses seed `base_seed + i` for its walls.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_first = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let per_game = MatchConfig {
            seed,
            ..config.per_game.clone()
        };
        if config.verbose {
            let (first, second) = if player1_first {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} first={} second={}",
                i + 1,
                config.games,
                seed,
                first,
                second
            );
        }

        let result = if player1_first {
            play_engine_match(player1_factory(), player2_factory(), per_game)?
        } else {
            play_engine_match(player2_factory(), player1_factory(), per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_first {
            (
                result.player1_move_count,
                result.player2_move_count,
                result.player1_total_time_ns,
                result.player2_total_time_ns,
            )
        } else {
            (
                result.player2_move_count,
                result.player1_move_count,
                result.player2_total_time_ns,
                result.player1_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let outcome = match result.winner {
            Some(winner) => {
                let moved_first = winner == Player::One;
                let player = if moved_first == player1_first {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                if moved_first {
                    stats.first_mover_wins += 1;
                }
                SeriesOutcome::Win {
                    player,
                    moved_first,
                }
            }
            None => {
                stats.unfinished += 1;
                SeriesOutcome::Unfinished
            }
        };
        stats.outcomes.push(outcome);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} unfinished={}\n",
                i + 1,
                config.games,
                outcome,
                stats.player1_wins,
                stats.player2_wins,
                stats.unfinished
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    info!(report = %stats.report(), "series finished");

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_match_board, play_engine_match, play_engine_match_from_board,
        play_engine_match_observed, play_engine_match_series, MatchConfig, MatchSeriesConfig,
        PlayerId, SeriesOutcome,
    };
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_search::{EngineConfig, SearchAlgorithm, SearchEngine};
    use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
    use crate::game_state::board_state::Board;
    use crate::game_state::isolation_types::{Coord, Player};
    use crate::search::board_scoring::HeuristicKind;
    use crate::utils::move_record::Replay;

    struct CornerEngine;

    impl Engine for CornerEngine {
        fn name(&self) -> &str {
            "corner"
        }

        fn choose_move(
            &mut self,
            _board: &Board,
            _params: &SearchParams,
        ) -> Result<EngineOutput, String> {
            Ok(EngineOutput {
                best_move: Some(Coord::new(0, 0)),
                ..EngineOutput::default()
            })
        }
    }

    fn shallow_search(depth: u32) -> Box<dyn Engine> {
        Box::new(SearchEngine::new(EngineConfig {
            depth,
            heuristic: HeuristicKind::Mobility,
            algorithm: SearchAlgorithm::PessimismAware,
        }))
    }

    #[test]
    fn engine_match_harness_runs_random_vs_search_to_a_winner() {
        let result = play_engine_match(
            Box::new(RandomEngine::with_seed(5)),
            shallow_search(2),
            MatchConfig {
                rows: 4,
                columns: 4,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        let winner = result.winner.expect("isolation always ends");
        assert_eq!(result.final_board.winner(), Some(winner));
        assert_eq!(
            result.record.len() as u32,
            result.player1_move_count + result.player2_move_count
        );
        assert!(result.record.entries.iter().step_by(2).all(|e| e.player == Player::One));
        assert!(result.record.entries.iter().all(|e| match e.player {
            Player::One => e.score.is_none(),
            Player::Two => e.score.is_some(),
        }));
    }

    #[test]
    fn recorded_match_replays_to_the_final_board() {
        let result = play_engine_match(
            Box::new(RandomEngine::with_seed(1)),
            Box::new(RandomEngine::with_seed(2)),
            MatchConfig {
                rows: 5,
                columns: 4,
                blocked: Some((2, 5)),
                seed: 99,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        let mut replay = Replay::new(&result.record).expect("replay");
        while replay.step_forward().expect("recorded move").is_some() {}
        assert_eq!(replay.board(), &result.final_board);
    }

    #[test]
    fn walls_are_reproducible_from_the_seed() {
        let config = MatchConfig {
            blocked: Some((3, 9)),
            seed: 17,
            ..MatchConfig::default()
        };
        let a = build_match_board(&config).expect("board");
        let b = build_match_board(&config).expect("board");
        assert_eq!(a, b);
        assert!(!a.walls().is_empty());
    }

    #[test]
    fn illegal_engine_output_is_rejected() {
        let err = play_engine_match(
            Box::new(CornerEngine),
            Box::new(CornerEngine),
            MatchConfig::default(),
        )
        .expect_err("second corner placement is illegal");
        assert!(err.contains("illegal move (0, 0)"), "{err}");
    }

    #[test]
    fn max_plies_stops_an_undecided_game() {
        let result = play_engine_match(
            Box::new(RandomEngine::with_seed(3)),
            Box::new(RandomEngine::with_seed(4)),
            MatchConfig {
                rows: 6,
                columns: 6,
                max_plies: 2,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");
        assert_eq!(result.winner, None);
        assert_eq!(result.record.len(), 2);
    }

    #[test]
    fn engine_match_series_alternates_the_first_mover() {
        let stats = play_engine_match_series(
            || shallow_search(3),
            || Box::new(RandomEngine::with_seed(8)) as Box<dyn Engine>,
            MatchSeriesConfig {
                games: 4,
                base_seed: 21,
                per_game: MatchConfig {
                    rows: 4,
                    columns: 4,
                    params: SearchParams { depth: None },
                    ..MatchConfig::default()
                },
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 4);
        assert_eq!(stats.outcomes.len(), 4);
        assert_eq!(stats.unfinished, 0);
        assert_eq!(stats.player1_wins + stats.player2_wins, 4);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        for (i, outcome) in stats.outcomes.iter().enumerate() {
            if let SeriesOutcome::Win {
                player,
                moved_first,
            } = *outcome
            {
                let player1_first = i % 2 == 0;
                assert_eq!(player == PlayerId::Player1, moved_first == player1_first);
            }
        }
        assert!(stats.report().starts_with("games=4 "));
    }

    #[test]
    fn board_already_in_play_is_rejected() {
        let mut board = Board::new(4, 4).expect("board");
        board.make_move(1, 1).expect("p1");

        let mut one: Box<dyn Engine> = Box::new(RandomEngine::with_seed(1));
        let mut two: Box<dyn Engine> = Box::new(RandomEngine::with_seed(2));
        let err = play_engine_match_from_board(&mut one, &mut two, board, &MatchConfig::default())
            .expect_err("a started board cannot be recorded from the beginning");
        assert!(err.contains("already been played"), "{err}");
    }

    #[test]
    fn observer_sees_every_ply_in_record_order() {
        let config = MatchConfig {
            rows: 4,
            columns: 4,
            ..MatchConfig::default()
        };
        let board = build_match_board(&config).expect("board");
        let mut one = shallow_search(2);
        let mut two: Box<dyn Engine> = Box::new(RandomEngine::with_seed(6));

        let mut seen = Vec::new();
        let result = play_engine_match_observed(&mut one, &mut two, board, &config, |ply| {
            assert_eq!(ply.board.player_position(ply.player), Some(ply.mv));
            assert!(!ply.info_lines.is_empty());
            seen.push((ply.player, ply.score, ply.mv));
        })
        .expect("match should run");

        let recorded: Vec<_> = result
            .record
            .entries
            .iter()
            .map(|e| (e.player, e.score, e.mv))
            .collect();
        assert_eq!(seen, recorded);
        assert!(result.winner.is_some());
    }
}
