//! Session orchestration: lobby, round driving, ready-up, final standings.

use log::{debug, info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::connection::PlayerConn;
use crate::leaderboard;
use crate::lobby;
use crate::registry::PlayerRegistry;
use crate::round::{Outcome, RoundState};
use crate::words::WordSource;
use shared::{WireError, MAX_GUESSES, NUM_ROUNDS, READY_SENTINEL};

/// Operator-tunable game parameters.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Connections required (with nicknames) before the game starts
    pub players: usize,
    /// Rounds played before the final standings
    pub rounds: u32,
    /// Unrevealing guesses each player may spend per round
    pub guess_budget: u8,
    /// Fixed word-selection seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            rounds: NUM_ROUNDS,
            guess_budget: MAX_GUESSES,
            seed: None,
        }
    }
}

/// The game server: listener, roster, word source, and the session loop.
///
/// All registry mutation happens in the orchestrating flow. During a round,
/// each player's connection and round state are exclusively owned by that
/// player's task; results come back when the tasks are joined, in slot
/// order.
pub struct GameServer {
    listener: TcpListener,
    registry: PlayerRegistry,
    words: WordSource,
    config: GameConfig,
}

impl GameServer {
    /// Binds the listening socket. Bind failure is fatal at this scope.
    pub async fn bind(
        addr: &str,
        config: GameConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if config.players == 0 {
            return Err("player count must be at least 1".into());
        }
        let listener = TcpListener::bind(addr).await?;
        info!("server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            registry: PlayerRegistry::new(config.players),
            words: WordSource::new(config.seed),
            config,
        })
    }

    /// The actual bound address, useful when binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the whole session: lobby, every round with its leaderboard
    /// broadcast and ready-up handshake, then the final result.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let GameServer {
            listener,
            mut registry,
            mut words,
            config,
        } = self;

        let mut connections = lobby::gather_players(&listener, &mut registry).await?;
        // The roster is full; late arrivals are no longer accepted.
        drop(listener);

        for round in 1..=config.rounds {
            if registry.connected_count() == 0 {
                warn!("no connected players remain, ending the game early");
                break;
            }

            let word = words.pick();
            info!(
                "round {} of {} begins, the word has {} letters",
                round,
                config.rounds,
                word.len()
            );

            play_round(&mut registry, &mut connections, word, config.guess_budget).await;
            broadcast_leaderboard(&mut registry, &mut connections).await;

            if round < config.rounds && registry.connected_count() > 0 {
                ready_up(&mut registry, &mut connections).await;
            }
        }

        // Final result, then every remaining connection is released on drop.
        broadcast_leaderboard(&mut registry, &mut connections).await;
        info!(
            "game over, final standings:\n{}",
            leaderboard::build_report(&registry)
        );

        Ok(())
    }
}

struct PlayerRoundResult {
    outcome: Outcome,
    score: u32,
    conn: Option<PlayerConn>,
}

/// Runs one player's guess loop to completion.
///
/// Owns the connection and round state exclusively and never touches shared
/// registry state; a disconnect at any point ends participation with no
/// score for this round.
async fn drive_player_round(
    mut conn: PlayerConn,
    word: &'static str,
    budget: u8,
) -> PlayerRoundResult {
    let mut state = RoundState::new(word.len(), budget);
    let mut score = 0;

    while !state.is_terminal() {
        let guess = match conn.recv_guess().await {
            Ok(guess) => guess,
            Err(err) => {
                debug!("{} stopped guessing: {}", conn.addr(), err);
                state.mark_disconnected();
                return PlayerRoundResult {
                    outcome: state.outcome(),
                    score: 0,
                    conn: None,
                };
            }
        };

        score += state.apply_guess(word, guess);

        if let Err(err) = conn.send_progress(state.progress()).await {
            debug!("{} unreachable for progress: {}", conn.addr(), err);
            state.mark_disconnected();
            return PlayerRoundResult {
                outcome: state.outcome(),
                score: 0,
                conn: None,
            };
        }
    }

    PlayerRoundResult {
        outcome: state.outcome(),
        score,
        conn: Some(conn),
    }
}

/// Drives one round for every connected player concurrently.
///
/// The round ends when every participant has solved, exhausted their budget,
/// or disconnected; a dropped player never blocks the others.
async fn play_round(
    registry: &mut PlayerRegistry,
    connections: &mut [Option<PlayerConn>],
    word: &'static str,
    budget: u8,
) {
    let word_len = word.len() as u32;

    // Word length goes out in slot order; a failed send is a departure.
    for slot in registry.connected_slots() {
        if let Some(conn) = connections[slot].as_mut() {
            if let Err(err) = conn.send_word_len(word_len).await {
                log_departure(slot, &err);
                registry.mark_disconnected(slot);
                connections[slot] = None;
            }
        }
    }

    let mut tasks = Vec::new();
    for slot in registry.connected_slots() {
        if let Some(conn) = connections[slot].take() {
            tasks.push((slot, tokio::spawn(drive_player_round(conn, word, budget))));
        }
    }

    // Results are applied serially, in slot order.
    for (slot, task) in tasks {
        match task.await {
            Ok(result) => {
                debug!(
                    "slot {} finished the round: {:?}, +{} points",
                    slot + 1,
                    result.outcome,
                    result.score
                );
                if result.score > 0 {
                    registry.award(slot, result.score);
                }
                match result.conn {
                    Some(conn) => connections[slot] = Some(conn),
                    None => registry.mark_disconnected(slot),
                }
            }
            Err(err) => {
                warn!("round task for slot {} failed: {}", slot + 1, err);
                registry.mark_disconnected(slot);
            }
        }
    }
}

/// Between rounds every surviving player must send the ready sentinel; a
/// wrong byte or a dead connection drops them from the remaining rounds.
async fn ready_up(registry: &mut PlayerRegistry, connections: &mut [Option<PlayerConn>]) {
    let mut tasks = Vec::new();
    for slot in registry.connected_slots() {
        if let Some(mut conn) = connections[slot].take() {
            tasks.push((
                slot,
                tokio::spawn(async move {
                    let byte = conn.recv_ready().await;
                    (byte, conn)
                }),
            ));
        }
    }

    for (slot, task) in tasks {
        match task.await {
            Ok((Ok(byte), conn)) if byte == READY_SENTINEL => {
                connections[slot] = Some(conn);
            }
            Ok((Ok(byte), _conn)) => {
                warn!(
                    "slot {} sent {:#04x} instead of the ready sentinel, dropping",
                    slot + 1,
                    byte
                );
                registry.mark_disconnected(slot);
            }
            Ok((Err(err), _conn)) => {
                log_departure(slot, &err);
                registry.mark_disconnected(slot);
            }
            Err(err) => {
                warn!("ready task for slot {} failed: {}", slot + 1, err);
                registry.mark_disconnected(slot);
            }
        }
    }
}

/// Sends the current standings to every connected player in slot order.
async fn broadcast_leaderboard(registry: &mut PlayerRegistry, connections: &mut [Option<PlayerConn>]) {
    let report = leaderboard::build_report(registry);
    for slot in registry.connected_slots() {
        if let Some(conn) = connections[slot].as_mut() {
            if let Err(err) = conn.send_report(&report).await {
                log_departure(slot, &err);
                registry.mark_disconnected(slot);
                connections[slot] = None;
            }
        }
    }
}

fn log_departure(slot: usize, err: &WireError) {
    match err {
        WireError::Closed => info!("slot {} closed the connection", slot + 1),
        err => warn!("slot {} dropped: {}", slot + 1, err),
    }
}
