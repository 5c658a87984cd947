//! The tic-tac-toe environment.
//!
//! `TicTacToeEnv` owns the board, the opponent policy, and the RNG. Each
//! `step` plays the agent's mark, classifies the position, and if the game
//! continues plays the opponent's reply and classifies again. Reward comes
//! from the last classification only.
//!
//! ## Lifecycle
//!
//! ```text
//! reset ──> Ready ──step──> Ready ──step──> ... ──> Terminal
//!             ^                                        │
//!             └────────────────── reset ───────────────┘
//! ```
//!
//! `step` on a terminal episode fails with `EnvError::EpisodeTerminated`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, GameStatus};
use crate::core::{
    CellIndex, EnvConfig, EnvError, GameRng, GameRngState, IllegalMovePolicy, Mark, MoveRecord,
    Result, StartPosition,
};
use crate::opponent::{tiers, OpponentPolicy};
use crate::rules::{ActionSpace, Environment, LegalActions};

use super::episode::Episode;
use super::observation::{Observation, Transition};
use super::observer::EnvironmentObserver;

/// In-memory checkpoint of an environment's mutable state.
///
/// Restoring a snapshot also restores the RNG, so the same agent moves
/// replay the same opponent replies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvSnapshot {
    pub board: Board,
    pub status: GameStatus,
    pub terminated: bool,
    pub last_reward: f64,
    pub history: Vec<MoveRecord>,
    pub rng: GameRngState,
}

/// Tic-tac-toe MDP environment with a built-in opponent.
///
/// ## Example
///
/// ```
/// use tictactoe_rl::board::GameStatus;
/// use tictactoe_rl::core::EnvConfig;
/// use tictactoe_rl::env::TicTacToeEnv;
///
/// let mut env = TicTacToeEnv::new(EnvConfig::default().with_seed(7)).unwrap();
/// let obs = env.reset();
/// assert_eq!(obs.legal_actions().len(), 9);
///
/// let t = env.step(4).unwrap();
/// assert_eq!(t.next.board.marks_placed(), 2);
/// assert_eq!(t.next.status, GameStatus::InProgress);
/// assert_eq!(t.reward, -1.0);
/// ```
pub struct TicTacToeEnv {
    config: EnvConfig,
    opponent: Box<dyn OpponentPolicy>,
    rng: GameRng,

    board: Board,
    status: GameStatus,
    terminated: bool,
    last_reward: f64,
    history: Vec<MoveRecord>,

    observers: Vec<Box<dyn EnvironmentObserver>>,
}

impl TicTacToeEnv {
    /// Create an environment using the configured opponent strategy.
    ///
    /// Fails with `EnvError::InvalidConfig` if the start position is not
    /// playable for the agent.
    pub fn new(config: EnvConfig) -> Result<Self> {
        let opponent = config.opponent.build();
        Self::with_policy(config, opponent)
    }

    /// Create an environment with a custom opponent policy.
    ///
    /// `config.opponent` is ignored.
    pub fn with_policy(config: EnvConfig, opponent: Box<dyn OpponentPolicy>) -> Result<Self> {
        if let StartPosition::Preset(board) = &config.start {
            check_start(board, config.agent_mark, false).map_err(|reason| EnvError::InvalidConfig {
                message: format!("preset start '{board}': {reason}"),
            })?;
        }

        let mut env = Self {
            rng: GameRng::new(config.seed),
            config,
            opponent,
            board: Board::new(),
            status: GameStatus::InProgress,
            terminated: false,
            last_reward: 0.0,
            history: Vec::new(),
            observers: Vec::new(),
        };
        env.reset();
        Ok(env)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn agent_mark(&self) -> Mark {
        self.config.agent_mark
    }

    #[must_use]
    pub fn opponent_mark(&self) -> Mark {
        self.config.opponent_mark()
    }

    /// Name of the opponent policy in use.
    #[must_use]
    pub fn opponent_name(&self) -> &'static str {
        self.opponent.name()
    }

    /// Reward returned by the most recent step (0 after reset).
    #[must_use]
    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminated
    }

    /// Moves placed this episode, agent and opponent, in play order.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    pub fn current_observation(&self) -> Observation {
        Observation {
            board: self.board,
            status: self.status,
        }
    }

    /// Legal actions on the current board.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        ActionSpace::legal_actions(&self.board)
    }

    // === Observers ===

    pub fn add_observer(&mut self, observer: Box<dyn EnvironmentObserver>) {
        self.observers.push(observer);
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // === Episode control ===

    /// Start a new episode from the configured start position.
    ///
    /// The RNG is not reseeded, so `OpponentOpens` starts vary between
    /// episodes; `Empty` and `Preset` starts are identical every time.
    pub fn reset(&mut self) -> Observation {
        self.history.clear();

        let board = match &self.config.start {
            StartPosition::Empty => Board::new(),
            StartPosition::Preset(board) => *board,
            StartPosition::OpponentOpens => {
                let mut board = Board::new();
                let mark = self.config.opponent_mark();
                if let Some(cell) = self.opponent.select(&board, mark, &mut self.rng) {
                    board.set(cell, mark);
                    self.history.push(MoveRecord::new(mark, cell, true));
                }
                board
            }
        };

        self.install(board)
    }

    /// Start a new episode from an arbitrary position.
    ///
    /// The board must be valid and leave the agent to move (the agent has
    /// no more marks than the opponent). A terminal board is accepted and
    /// yields a terminal episode.
    pub fn reset_to(&mut self, board: Board) -> Result<Observation> {
        board.validate()?;
        check_start(&board, self.config.agent_mark, true).map_err(|reason| EnvError::InvalidBoard {
            input: board.to_string(),
            reason,
        })?;

        self.history.clear();
        Ok(self.install(board))
    }

    /// Reseed the opponent RNG.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = GameRng::new(seed);
    }

    fn install(&mut self, board: Board) -> Observation {
        self.board = board;
        self.status = board.status();
        self.terminated = self.status.is_terminal();
        self.last_reward = 0.0;

        let observation = self.current_observation();
        debug!(%observation, "reset");
        for observer in &mut self.observers {
            observer.observe_reset(&observation);
        }
        observation
    }

    /// Play the agent's mark at `action`, then the opponent's reply.
    ///
    /// ## Errors
    ///
    /// - `EpisodeTerminated` if the episode is already over
    /// - `IllegalMove` for an out-of-range or occupied cell under
    ///   `IllegalMovePolicy::Reject`
    pub fn step(&mut self, action: usize) -> Result<Transition> {
        if self.terminated {
            return Err(EnvError::EpisodeTerminated {
                status: self.status,
            });
        }

        let prior = self.current_observation();
        let agent = self.config.agent_mark;

        let cell = match self.board.apply(action, agent) {
            Ok(cell) => cell,
            Err(err) => {
                warn!(action, error = %err, "illegal move attempted");
                return match self.config.illegal_moves {
                    IllegalMovePolicy::Reject => Err(err),
                    IllegalMovePolicy::Ignore => {
                        let reward = self.config.rewards.step;
                        Ok(self.finish_step(prior, action, None, reward))
                    }
                };
            }
        };
        self.history.push(MoveRecord::new(agent, cell, false));

        let mut status = self.board.status();
        let mut reply = None;

        if !status.is_terminal() {
            reply = self.opponent_reply();
            status = self.board.status();
        }

        self.status = status;
        self.terminated = status.is_terminal();
        let reward = self.config.rewards.for_status(status, agent);
        Ok(self.finish_step(prior, action, reply, reward))
    }

    /// Ask the opponent for a cell and play it.
    ///
    /// A cell that is not empty (possible only with a faulty custom policy)
    /// is replaced by a random empty one.
    fn opponent_reply(&mut self) -> Option<CellIndex> {
        let mark = self.config.opponent_mark();
        let chosen = self.opponent.select(&self.board, mark, &mut self.rng);

        let cell = match chosen {
            Some(cell) if self.board.is_empty_at(cell) => cell,
            other => {
                if other.is_some() {
                    warn!(
                        policy = self.opponent.name(),
                        cell = ?other,
                        "opponent chose an occupied cell, playing randomly instead"
                    );
                }
                tiers::random_empty(&self.board, &mut self.rng)?
            }
        };

        self.board.set(cell, mark);
        self.history.push(MoveRecord::new(mark, cell, true));
        Some(cell)
    }

    fn finish_step(
        &mut self,
        prior: Observation,
        action: usize,
        opponent_reply: Option<CellIndex>,
        reward: f64,
    ) -> Transition {
        self.last_reward = reward;

        let transition = Transition {
            prior,
            action,
            next: self.current_observation(),
            reward,
            terminated: self.terminated,
            opponent_reply,
        };

        debug!(
            action,
            reply = ?opponent_reply,
            status = %transition.next.status,
            reward,
            "step"
        );
        for observer in &mut self.observers {
            observer.observe_step(&transition);
        }
        transition
    }

    /// Play out the current episode with `agent` choosing moves.
    ///
    /// `agent` receives the current observation and its legal actions and
    /// returns a cell index. Stops when the episode is terminal. A choice
    /// outside the legal actions fails with `EnvError::IllegalMove` and
    /// leaves the board untouched.
    pub fn rollout<F>(&mut self, mut agent: F) -> Result<Episode>
    where
        F: FnMut(&Observation, &LegalActions) -> usize,
    {
        let mut episode = Episode::new(self.current_observation());

        while !self.terminated {
            let observation = self.current_observation();
            let legal = observation.legal_actions();
            let action = agent(&observation, &legal);

            if !legal.iter().any(|c| c.index() == action) {
                return Err(match CellIndex::new(action) {
                    None => EnvError::out_of_range(action),
                    Some(_) => EnvError::occupied(action),
                });
            }

            episode.push(self.step(action)?);
        }

        Ok(episode)
    }

    // === Checkpoints ===

    #[must_use]
    pub fn snapshot(&self) -> EnvSnapshot {
        EnvSnapshot {
            board: self.board,
            status: self.status,
            terminated: self.terminated,
            last_reward: self.last_reward,
            history: self.history.clone(),
            rng: self.rng.state(),
        }
    }

    /// Restore a snapshot taken with `snapshot`.
    ///
    /// Fails with `EnvError::InvalidBoard` if the snapshot's status or
    /// terminal flag disagree with its board.
    pub fn restore(&mut self, snapshot: &EnvSnapshot) -> Result<()> {
        snapshot.board.validate()?;
        let derived = snapshot.board.status();
        if derived != snapshot.status || derived.is_terminal() != snapshot.terminated {
            return Err(EnvError::InvalidBoard {
                input: snapshot.board.to_string(),
                reason: format!(
                    "snapshot status {} (terminated={}) disagrees with board status {derived}",
                    snapshot.status, snapshot.terminated
                ),
            });
        }

        self.board = snapshot.board;
        self.status = snapshot.status;
        self.terminated = snapshot.terminated;
        self.last_reward = snapshot.last_reward;
        self.history = snapshot.history.clone();
        self.rng = GameRng::from_state(&snapshot.rng);
        Ok(())
    }
}

/// Check that `board` is a position where `agent` is to move.
///
/// Terminal boards pass only when `allow_terminal` is set, and then skip
/// the turn check.
fn check_start(board: &Board, agent: Mark, allow_terminal: bool) -> std::result::Result<(), String> {
    if let Err(err) = board.validate() {
        return Err(err.to_string());
    }
    let status = board.status();
    if status.is_terminal() {
        return if allow_terminal {
            Ok(())
        } else {
            Err(format!("already over ({status})"))
        };
    }
    if board.count(agent) > board.count(agent.other()) {
        return Err(format!("agent {agent} is not to move"));
    }
    Ok(())
}

impl Environment for TicTacToeEnv {
    fn reset(&mut self) -> Observation {
        TicTacToeEnv::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Transition> {
        TicTacToeEnv::step(self, action)
    }

    fn current_observation(&self) -> Observation {
        TicTacToeEnv::current_observation(self)
    }

    fn is_terminal(&self) -> bool {
        self.terminated
    }
}

impl std::fmt::Debug for TicTacToeEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicTacToeEnv")
            .field("config", &self.config)
            .field("opponent", &self.opponent.name())
            .field("board", &self.board)
            .field("status", &self.status)
            .field("terminated", &self.terminated)
            .field("last_reward", &self.last_reward)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IllegalMoveReason, RewardConfig};
    use crate::opponent::{FirstEmptyOpponent, OpponentStrategy};

    fn env() -> TicTacToeEnv {
        TicTacToeEnv::new(EnvConfig::default()).unwrap()
    }

    #[test]
    fn test_new_env_is_reset() {
        let env = env();
        assert_eq!(env.board(), &Board::new());
        assert_eq!(env.status(), GameStatus::InProgress);
        assert!(!env.is_terminal());
        assert_eq!(env.last_reward(), 0.0);
        assert_eq!(env.legal_actions().len(), 9);
        assert_eq!(env.opponent_name(), "win_block_positional");
    }

    #[test]
    fn test_step_places_two_marks() {
        let mut env = env();
        let t = env.step(0).unwrap();

        assert_eq!(t.prior, Observation::default());
        assert_eq!(t.action, 0);
        assert_eq!(t.next.board.count(Mark::X), 1);
        assert_eq!(t.next.board.count(Mark::O), 1);
        assert_eq!(t.reward, -1.0);
        assert!(!t.terminated);
        // Positional tier takes the center
        assert_eq!(t.opponent_reply, Some(CellIndex::CENTER));
        assert_eq!(env.history().len(), 2);
        assert!(!env.history()[0].by_opponent);
        assert!(env.history()[1].by_opponent);
    }

    #[test]
    fn test_winning_move_skips_opponent() {
        let mut env = env();
        env.reset_to("XXO.X.OO.".parse().unwrap()).unwrap();

        let t = env.step(8).unwrap();
        assert_eq!(t.next.status, GameStatus::XWon);
        assert_eq!(t.reward, 10.0);
        assert!(t.terminated);
        assert_eq!(t.opponent_reply, None);
        assert_eq!(t.next.board.count(Mark::O), 3);
        assert!(env.is_terminal());
    }

    #[test]
    fn test_opponent_win() {
        // X ignores O's threat down the middle column
        let mut env = env();
        env.reset_to("XO.XO....".parse().unwrap()).unwrap();
        let t = env.step(2).unwrap();

        assert_eq!(t.opponent_reply, CellIndex::new(7));
        assert_eq!(t.next.status, GameStatus::OWon);
        assert_eq!(t.reward, -10.0);
        assert!(t.terminated);
    }

    #[test]
    fn test_draw_on_agent_move() {
        let mut env = env();
        // XOX
        // XOO
        // OX.
        env.reset_to("XOXXOOOX.".parse().unwrap()).unwrap();
        let t = env.step(8).unwrap();

        assert_eq!(t.next.status, GameStatus::Draw);
        assert_eq!(t.reward, -1.0);
        assert!(t.terminated);
        assert_eq!(t.opponent_reply, None);
    }

    #[test]
    fn test_step_after_terminal_fails() {
        let mut env = env();
        env.reset_to("XXO.X.OO.".parse().unwrap()).unwrap();
        env.step(8).unwrap();

        let before = *env.board();
        let err = env.step(3).unwrap_err();
        assert_eq!(
            err,
            EnvError::EpisodeTerminated {
                status: GameStatus::XWon
            }
        );
        assert_eq!(env.board(), &before);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut env = env();
        env.step(0).unwrap();
        let before = env.current_observation();
        let history_len = env.history().len();

        let err = env.step(0).unwrap_err();
        assert_eq!(
            err,
            EnvError::IllegalMove {
                cell: 0,
                reason: IllegalMoveReason::Occupied
            }
        );
        assert_eq!(env.current_observation(), before);
        assert_eq!(env.history().len(), history_len);

        assert!(env.step(42).unwrap_err().is_illegal_move());
        assert_eq!(env.current_observation(), before);
    }

    #[test]
    fn test_illegal_move_ignored() {
        let config = EnvConfig::default().with_illegal_moves(IllegalMovePolicy::Ignore);
        let mut env = TicTacToeEnv::new(config).unwrap();
        env.step(0).unwrap();
        let before = env.current_observation();

        let t = env.step(0).unwrap();
        assert!(t.is_noop());
        assert_eq!(t.next, before);
        assert_eq!(t.reward, -1.0);
        assert!(!t.terminated);
        assert_eq!(t.opponent_reply, None);
        assert_eq!(env.last_reward(), -1.0);

        let t = env.step(9).unwrap();
        assert!(t.is_noop());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut env = env();
        let first = env.reset();
        env.step(4).unwrap();
        let second = env.reset();
        let third = env.reset();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert!(env.history().is_empty());
        assert_eq!(env.last_reward(), 0.0);
    }

    #[test]
    fn test_preset_start() {
        let config = EnvConfig::default()
            .with_agent_mark(Mark::O)
            .with_start(StartPosition::Preset("X........".parse().unwrap()));
        let mut env = TicTacToeEnv::new(config).unwrap();

        let obs = env.reset();
        assert_eq!(obs.board.to_string(), "X........");
        assert_eq!(obs.legal_actions().len(), 8);

        let t = env.step(4).unwrap();
        assert_eq!(t.next.board.count(Mark::O), 1);
        assert_eq!(t.next.board.count(Mark::X), 2);
    }

    #[test]
    fn test_preset_start_rejected() {
        // Agent X would be moving twice in a row
        let config = EnvConfig::default()
            .with_start(StartPosition::Preset("X........".parse().unwrap()));
        let err = TicTacToeEnv::new(config).unwrap_err();
        assert!(matches!(err, EnvError::InvalidConfig { .. }));

        let config = EnvConfig::default()
            .with_start(StartPosition::Preset("XXXOO.O..".parse().unwrap()));
        let err = TicTacToeEnv::new(config).unwrap_err();
        assert!(matches!(err, EnvError::InvalidConfig { .. }));
    }

    #[test]
    fn test_opponent_opens() {
        let config = EnvConfig::default()
            .with_agent_mark(Mark::O)
            .with_start(StartPosition::OpponentOpens);
        let mut env = TicTacToeEnv::new(config).unwrap();

        let obs = env.reset();
        assert_eq!(obs.board.count(Mark::X), 1);
        assert_eq!(obs.board.count(Mark::O), 0);
        // Positional tier opens in the center
        assert_eq!(obs.board.cell(CellIndex::CENTER).mark(), Some(Mark::X));
        assert_eq!(env.history().len(), 1);
    }

    #[test]
    fn test_reset_to_rejects_bad_boards() {
        let mut env = env();
        // Agent X already ahead
        let err = env.reset_to("X........".parse().unwrap()).unwrap_err();
        assert!(matches!(err, EnvError::InvalidBoard { .. }));
    }

    #[test]
    fn test_reset_to_terminal_board() {
        let mut env = env();
        let obs = env.reset_to("OOOXX.X.X".parse().unwrap()).unwrap();
        assert_eq!(obs.status, GameStatus::OWon);
        assert!(env.is_terminal());
        assert!(env.step(5).is_err());
    }

    #[test]
    fn test_custom_policy() {
        let mut env =
            TicTacToeEnv::with_policy(EnvConfig::default(), Box::new(FirstEmptyOpponent)).unwrap();
        let t = env.step(0).unwrap();
        assert_eq!(t.opponent_reply, CellIndex::new(1));
        assert_eq!(env.opponent_name(), "first_empty");
    }

    #[test]
    fn test_faulty_policy_falls_back() {
        struct AlwaysCenter;
        impl OpponentPolicy for AlwaysCenter {
            fn select(&self, _: &Board, _: Mark, _: &mut GameRng) -> Option<CellIndex> {
                Some(CellIndex::CENTER)
            }
            fn name(&self) -> &'static str {
                "always_center"
            }
        }

        let mut env =
            TicTacToeEnv::with_policy(EnvConfig::default(), Box::new(AlwaysCenter)).unwrap();
        let t = env.step(4).unwrap();
        let reply = t.opponent_reply.unwrap();
        assert_ne!(reply, CellIndex::CENTER);
        assert_eq!(t.next.board.cell(reply).mark(), Some(Mark::O));
    }

    #[test]
    fn test_custom_rewards() {
        let config = EnvConfig::default().with_rewards(RewardConfig::legacy());
        let mut env = TicTacToeEnv::new(config).unwrap();
        env.reset_to("XXO.X.OO.".parse().unwrap()).unwrap();
        assert_eq!(env.step(8).unwrap().reward, 7.0);
    }

    #[test]
    fn test_snapshot_restore_replays() {
        let config = EnvConfig::default().with_opponent(OpponentStrategy::Random);
        let mut env = TicTacToeEnv::new(config).unwrap();
        env.step(0).unwrap();

        let snapshot = env.snapshot();
        let first = env.step(8).map(|t| t.next);

        env.restore(&snapshot).unwrap();
        let second = env.step(8).map(|t| t.next);

        assert_eq!(first, second);
    }

    #[test]
    fn test_restore_rejects_inconsistent_snapshot() {
        let mut env = env();
        let mut snapshot = env.snapshot();
        snapshot.status = GameStatus::Draw;
        assert!(env.restore(&snapshot).is_err());
    }

    #[test]
    fn test_rollout_first_legal() {
        let mut env = env();
        let episode = env.rollout(|_, legal| legal[0].index()).unwrap();

        assert!(episode.is_finished());
        assert!(env.is_terminal());
        assert_eq!(episode.outcome(), env.status());
        assert_eq!(episode.last_observation(), env.current_observation());
    }

    #[test]
    fn test_rollout_illegal_choice() {
        let mut env = env();
        let err = env.rollout(|_, _| 99).unwrap_err();
        assert!(err.is_illegal_move());
        assert_eq!(env.board(), &Board::new());
    }

    #[test]
    fn test_environment_trait() {
        fn play<E: Environment>(env: &mut E) -> usize {
            let obs = env.reset();
            env.legal_actions(&obs).len()
        }
        assert_eq!(play(&mut env()), 9);
    }

    #[test]
    fn test_debug_format() {
        let env = env();
        let debug = format!("{env:?}");
        assert!(debug.contains("TicTacToeEnv"));
        assert!(debug.contains("win_block_positional"));
    }
}
