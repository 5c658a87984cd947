//! The built-in opponent.
//!
//! After every non-terminal agent move the environment asks an
//! `OpponentPolicy` for a reply. Policies only read the board; the
//! environment applies the move.
//!
//! - `tiers`: the individual win / block / positional / random queries
//! - `policy`: the `OpponentPolicy` trait and its implementations
//! - `strategy`: `OpponentStrategy`, the config-facing selector

pub mod tiers;
pub mod policy;
pub mod strategy;

pub use tiers::Tier;
pub use policy::{FirstEmptyOpponent, HeuristicOpponent, OpponentPolicy, UniformOpponent};
pub use strategy::OpponentStrategy;
