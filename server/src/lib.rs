//! # Hangman Game Server Library
//!
//! This library implements the authoritative server for a multiplayer
//! hangman-style guessing game. Players connect over TCP, join a lobby with
//! a nickname, and play a fixed number of rounds guessing letters of a
//! secretly chosen word under a per-round guess budget. Scores accumulate
//! across rounds and a ranked leaderboard is broadcast after every round and
//! at game end.
//!
//! ## Architecture
//!
//! The server is built around one orchestrating flow that owns all shared
//! state, with short-lived tasks for the per-player blocking I/O:
//!
//! - During the **lobby**, a single loop `select!`s between the listening
//!   socket and a channel of join results; each accepted connection claims a
//!   registry slot and gets its own nickname-reader task. A connection that
//!   dies before completing the handshake frees its slot for a replacement,
//!   and the game never starts short-handed.
//! - During a **round**, each player's connection and round state move into a
//!   dedicated task that runs that player's guess loop to completion, so one
//!   slow player never delays another's turns. Score updates are applied
//!   serially, in slot order, when the tasks are joined.
//! - Between rounds, every surviving player must confirm with a one-byte
//!   ready signal; anything else is treated as a departure.
//!
//! Per-player failures are always contained to that player: a disconnect at
//! any phase releases the connection exactly once and the game proceeds for
//! everyone else. Only listener setup/accept failure is fatal.
//!
//! ## Module Organization
//!
//! - [`words`]: the embedded word catalog and seeded uniform selection
//! - [`registry`]: slot-stable roster of identities and cumulative scores
//! - [`connection`]: per-player socket wrapper over the wire codec
//! - [`lobby`]: fills the roster to the required player count
//! - [`round`]: per-player round state and the guess-application rules
//! - [`session`]: the game loop from lobby to final standings
//! - [`leaderboard`]: ranked report rendering

pub mod connection;
pub mod leaderboard;
pub mod lobby;
pub mod registry;
pub mod round;
pub mod session;
pub mod words;
