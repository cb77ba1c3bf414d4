//! Player registry: slot-stable roster of identities and scores
//!
//! This module is the single source of truth for who is in the game:
//! - Slot lifecycle (free, connecting, joined) with first-free assignment
//! - Nicknames, assigned once at join and immutable afterwards
//! - Cumulative scores, mutated only through registry calls
//! - Monotonic disconnect tracking (a disconnected player never comes back)
//!
//! Slots are stable for the life of the session: once a player has joined,
//! their slot index identifies them in every later phase. Disconnection keeps
//! the identity and score in place so earned points stay visible on the
//! leaderboard.

use log::info;

/// A player that completed the join handshake.
///
/// Identity lives here and nowhere else; the round engine only ever holds a
/// slot index back into the registry.
#[derive(Debug)]
pub struct Player {
    /// Nickname supplied during the lobby phase, immutable after assignment
    pub nickname: String,
    /// Cumulative score across rounds, never decreasing
    pub score: u32,
    /// False once the player's connection is gone, permanently
    pub connected: bool,
}

#[derive(Debug)]
enum Slot {
    /// No connection has claimed this slot
    Free,
    /// A connection claimed the slot but has not delivered a nickname yet
    Connecting,
    /// A nicknamed player, present for the rest of the session
    Joined(Player),
}

/// Fixed-capacity roster of player slots.
///
/// The registry enforces the player count: a slot must be reserved before a
/// nickname can be attached, reservations that fail to produce a nickname are
/// released back to the pool, and arrivals beyond capacity are refused by
/// `reserve` returning `None`.
pub struct PlayerRegistry {
    slots: Vec<Slot>,
}

impl PlayerRegistry {
    /// Creates a registry with `capacity` stable slots, all free.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::Free).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claims the first free slot for a new connection.
    ///
    /// Returns `None` when every slot is reserved or joined, which is the
    /// only resource-exhaustion case the lobby can hit.
    pub fn reserve(&mut self) -> Option<usize> {
        let slot = self
            .slots
            .iter()
            .position(|s| matches!(s, Slot::Free))?;
        self.slots[slot] = Slot::Connecting;
        Some(slot)
    }

    /// Returns a reserved slot to the free pool after a failed join.
    pub fn release(&mut self, slot: usize) {
        if matches!(self.slots[slot], Slot::Connecting) {
            self.slots[slot] = Slot::Free;
        }
    }

    /// Completes the join handshake: the reserved slot becomes a player.
    ///
    /// Returns false if the slot was not in the connecting state.
    pub fn join(&mut self, slot: usize, nickname: String) -> bool {
        if !matches!(self.slots[slot], Slot::Connecting) {
            return false;
        }
        info!("player {} joined with nickname {:?}", slot + 1, nickname);
        self.slots[slot] = Slot::Joined(Player {
            nickname,
            score: 0,
            connected: true,
        });
        true
    }

    /// Marks a joined player as gone. Identity and score stay in place;
    /// the flag never flips back.
    pub fn mark_disconnected(&mut self, slot: usize) {
        if let Slot::Joined(player) = &mut self.slots[slot] {
            if player.connected {
                player.connected = false;
                info!("player {} ({}) left the game", slot + 1, player.nickname);
            }
        }
    }

    /// Adds round points to a joined player's cumulative score.
    pub fn award(&mut self, slot: usize, points: u32) {
        if let Slot::Joined(player) = &mut self.slots[slot] {
            player.score += points;
        }
    }

    pub fn player(&self, slot: usize) -> Option<&Player> {
        match &self.slots[slot] {
            Slot::Joined(player) => Some(player),
            _ => None,
        }
    }

    /// All joined players in slot order, connected or not.
    pub fn players(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| match s {
            Slot::Joined(player) => Some((i, player)),
            _ => None,
        })
    }

    /// Slot indices of joined players that still have a live connection,
    /// in slot order.
    pub fn connected_slots(&self) -> Vec<usize> {
        self.players()
            .filter(|(_, p)| p.connected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of players that completed the join handshake.
    pub fn joined_count(&self) -> usize {
        self.players().count()
    }

    /// Number of joined players still connected.
    pub fn connected_count(&self) -> usize {
        self.players().filter(|(_, p)| p.connected).count()
    }
}
