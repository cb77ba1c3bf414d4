//! Lobby coordination: assembling the full player roster before the game.

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::connection::PlayerConn;
use crate::registry::PlayerRegistry;
use shared::WireError;

/// One connection's join attempt, reported back to the lobby loop.
struct JoinResult {
    slot: usize,
    outcome: Result<(String, PlayerConn), WireError>,
}

/// Fills the registry to capacity and returns the connection table, indexed
/// by slot.
///
/// The loop waits simultaneously on the listening socket and on every pending
/// join attempt: an accepted connection claims the first free slot and hands
/// its socket to a short-lived nickname-reader task, and completed attempts
/// come back over a channel. A connection that closes or errors before
/// delivering a complete nickname frees its slot and the lobby keeps waiting
/// for a replacement, so the game never starts short-handed. Arrivals while
/// no slot is free are dropped without affecting anyone else.
///
/// Only a failure of the listening socket itself is fatal here.
pub async fn gather_players(
    listener: &TcpListener,
    registry: &mut PlayerRegistry,
) -> Result<Vec<Option<PlayerConn>>, Box<dyn std::error::Error + Send + Sync>> {
    let capacity = registry.capacity();
    let mut connections: Vec<Option<PlayerConn>> = (0..capacity).map(|_| None).collect();
    let (join_tx, mut join_rx) = mpsc::unbounded_channel::<JoinResult>();

    info!("lobby open, waiting for {} players to join", capacity);

    while registry.joined_count() < capacity {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = accepted?;
                match registry.reserve() {
                    Some(slot) => {
                        info!("new connection from {} takes slot {}", addr, slot + 1);
                        let join_tx = join_tx.clone();
                        tokio::spawn(async move {
                            let mut conn = PlayerConn::new(stream, addr);
                            let outcome = match conn.recv_nickname().await {
                                Ok(nickname) => Ok((nickname, conn)),
                                Err(err) => Err(err),
                            };
                            let _ = join_tx.send(JoinResult { slot, outcome });
                        });
                    }
                    None => {
                        warn!("rejecting connection from {}: no free player slot", addr);
                        drop(stream);
                    }
                }
            }
            Some(result) = join_rx.recv() => {
                match result.outcome {
                    Ok((nickname, conn)) => {
                        registry.join(result.slot, nickname);
                        connections[result.slot] = Some(conn);
                    }
                    Err(err) => {
                        warn!(
                            "slot {} freed before a nickname arrived: {}",
                            result.slot + 1,
                            err
                        );
                        registry.release(result.slot);
                    }
                }
            }
        }
    }

    info!("all {} players joined, starting game", capacity);
    Ok(connections)
}
