//! Integration tests for the environment's step/reset contract.

use tictactoe_rl::board::{Board, GameStatus};
use tictactoe_rl::core::{
    CellIndex, EnvConfig, EnvError, IllegalMovePolicy, IllegalMoveReason, Mark, StartPosition,
};
use tictactoe_rl::env::{
    EnvSnapshot, EnvironmentObserver, Episode, Observation, OutcomeTally, TicTacToeEnv, Transition,
};
use tictactoe_rl::opponent::OpponentStrategy;
use tictactoe_rl::rules::Environment;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn first_legal(_: &Observation, legal: &tictactoe_rl::rules::LegalActions) -> usize {
    legal[0].index()
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_blank_start_offers_every_cell() {
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    let obs = env.reset();

    let legal: Vec<usize> = obs.legal_actions().iter().map(|c| c.index()).collect();
    assert_eq!(legal, (0..9).collect::<Vec<_>>());
    assert_eq!(env.legal_actions().len(), 9);
}

#[test]
fn test_center_opening() {
    init_tracing();
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.reset();

    let t = env.step(4).unwrap();
    assert_eq!(t.next.board.marks_placed(), 2);
    assert_eq!(t.next.status, GameStatus::InProgress);
    assert_eq!(t.reward, -1.0);
    assert!(!t.terminated);

    // Center is gone, so the positional tier takes a corner
    let reply = t.opponent_reply.unwrap();
    assert!(reply.is_corner());
    assert!(!env.legal_actions().contains(&reply));
}

#[test]
fn test_agent_completes_diagonal() {
    // XXO
    // .X.
    // OO.
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.reset_to(board("XXO.X.OO.")).unwrap();

    let t = env.step(8).unwrap();
    assert_eq!(t.next.status, GameStatus::XWon);
    assert_eq!(t.reward, 10.0);
    assert!(t.terminated);
    assert_eq!(t.opponent_reply, None);
    assert_eq!(t.next.board.to_string(), "XXO.X.OOX");
}

#[test]
fn test_occupied_cell_rejected_then_ignored() {
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.step(4).unwrap();
    let before = env.current_observation();

    let err = env.step(4).unwrap_err();
    assert_eq!(
        err,
        EnvError::IllegalMove {
            cell: 4,
            reason: IllegalMoveReason::Occupied
        }
    );
    assert_eq!(env.current_observation(), before);

    let config = EnvConfig::default().with_illegal_moves(IllegalMovePolicy::Ignore);
    let mut env = TicTacToeEnv::new(config).unwrap();
    env.step(4).unwrap();
    let before = env.current_observation();

    let t = env.step(4).unwrap();
    assert_eq!(t.reward, -1.0);
    assert!(!t.terminated);
    assert_eq!(env.current_observation(), before);
}

#[test]
fn test_terminal_episode_is_frozen() {
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.rollout(first_legal).unwrap();
    assert!(env.is_terminal());

    let frozen = *env.board();
    for action in 0..9 {
        let err = env.step(action).unwrap_err();
        assert!(matches!(err, EnvError::EpisodeTerminated { .. }));
    }
    assert_eq!(env.board(), &frozen);

    let obs = env.reset();
    assert_eq!(obs.board, Board::new());
    assert!(!env.is_terminal());
}

#[test]
fn test_agent_as_o_against_opening() {
    let config = EnvConfig::default()
        .with_agent_mark(Mark::O)
        .with_start(StartPosition::OpponentOpens)
        .with_opponent(OpponentStrategy::Random);
    let mut env = TicTacToeEnv::new(config).unwrap();

    for _ in 0..10 {
        let obs = env.reset();
        assert_eq!(obs.board.count(Mark::X), 1);
        assert_eq!(obs.board.count(Mark::O), 0);

        let episode = env.rollout(first_legal).unwrap();
        assert!(episode.is_finished());
        for t in &episode.transitions {
            assert_eq!(t.next.board.cell(CellIndex::new(t.action).unwrap()).mark(), Some(Mark::O));
        }
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

fn play(seed: u64, strategy: OpponentStrategy) -> Vec<Episode> {
    let config = EnvConfig::default().with_seed(seed).with_opponent(strategy);
    let mut env = TicTacToeEnv::new(config).unwrap();
    (0..5)
        .map(|_| {
            env.reset();
            env.rollout(first_legal).unwrap()
        })
        .collect()
}

#[test]
fn test_same_seed_same_episodes() {
    for strategy in OpponentStrategy::ALL {
        assert_eq!(play(11, strategy), play(11, strategy), "{strategy}");
    }
}

#[test]
fn test_reseed_replays_episode() {
    let config = EnvConfig::default().with_opponent(OpponentStrategy::Random);
    let mut env = TicTacToeEnv::new(config).unwrap();

    env.reseed(5);
    env.reset();
    let first = env.rollout(first_legal).unwrap();

    env.reseed(5);
    env.reset();
    let second = env.rollout(first_legal).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_snapshot_json_round_trip() {
    let config = EnvConfig::default().with_opponent(OpponentStrategy::Random);
    let mut env = TicTacToeEnv::new(config).unwrap();
    env.step(0).unwrap();

    let snapshot = env.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: EnvSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, restored);

    let branch_a = env.rollout(first_legal).unwrap();
    env.restore(&restored).unwrap();
    assert_eq!(env.history(), snapshot.history.as_slice());
    let branch_b = env.rollout(first_legal).unwrap();

    assert_eq!(branch_a, branch_b);
}

// =============================================================================
// Observer Tests
// =============================================================================

#[derive(Default)]
struct Recorder {
    resets: usize,
    steps: Vec<Transition>,
}

struct SharedRecorder(std::sync::Arc<std::sync::Mutex<Recorder>>);

impl EnvironmentObserver for SharedRecorder {
    fn observe_reset(&mut self, _observation: &Observation) {
        self.0.lock().unwrap().resets += 1;
    }

    fn observe_step(&mut self, transition: &Transition) {
        self.0.lock().unwrap().steps.push(*transition);
    }
}

#[test]
fn test_observers_see_every_event() {
    let recorder = std::sync::Arc::new(std::sync::Mutex::new(Recorder::default()));
    let tally = OutcomeTally::new();

    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.add_observer(Box::new(SharedRecorder(recorder.clone())));
    env.add_observer(Box::new(tally.clone()));
    assert_eq!(env.observer_count(), 2);

    let mut total_steps = 0;
    for _ in 0..3 {
        env.reset();
        total_steps += env.rollout(first_legal).unwrap().len();
    }

    let recorder = recorder.lock().unwrap();
    assert_eq!(recorder.resets, 3);
    assert_eq!(recorder.steps.len(), total_steps);
    assert!(recorder.steps.last().unwrap().terminated);

    let counts = tally.counts();
    assert_eq!(counts.episodes(), 3);
    assert_eq!(counts.steps as usize, total_steps);

    env.clear_observers();
    assert_eq!(env.observer_count(), 0);
}

#[test]
fn test_rejected_moves_are_not_observed() {
    let tally = OutcomeTally::new();
    let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    env.add_observer(Box::new(tally.clone()));

    env.step(0).unwrap();
    assert!(env.step(0).is_err());
    assert!(env.step(12).is_err());
    assert_eq!(tally.counts().steps, 1);
}

// =============================================================================
// Trait Tests
// =============================================================================

fn run_generic<E: Environment>(env: &mut E) -> GameStatus {
    let mut obs = env.reset();
    while !env.is_terminal() {
        let action = env.legal_actions(&obs)[0].index();
        obs = env.step(action).unwrap().next;
    }
    obs.status
}

#[test]
fn test_generic_driver_matches_rollout() {
    let mut generic = TicTacToeEnv::new(EnvConfig::default()).unwrap();
    let mut direct = TicTacToeEnv::new(EnvConfig::default()).unwrap();

    let status = run_generic(&mut generic);
    let episode = direct.rollout(first_legal).unwrap();
    assert_eq!(status, episode.outcome());
}
