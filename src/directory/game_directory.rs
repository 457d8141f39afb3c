//! Fixed-capacity game table (spec §4.3).
//!
//! Grounded on `original_source/server/main.c`'s `g_games` array and
//! `create_game_locked`-equivalent construction, `remove_client_from_game_locked`,
//! and `expire_pending_games`.

use std::time::{Duration, Instant};

use crate::config::Transport;
use crate::domain::{Game, Membership};
use crate::idgen::{generate_id, generate_join_token};

/// Outcome of [`GameDirectory::join`].
pub enum JoinOutcome {
    /// Joined; game still has open slots.
    Joined,
    /// Joined and the game just reached `max_players` — the caller must run
    /// the activation sequence (spec §4.4 `activate`) under the same
    /// coordinator critical section.
    ReadyToActivate,
}

pub struct GameDirectory {
    slots: Vec<Option<Game>>,
}

impl GameDirectory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    /// Create a pending game with `creator` as its first member, or `None` if
    /// the table is at `max_games` capacity.
    pub fn create(
        &mut self,
        creator_client_id: &str,
        creator_name: &str,
        name: &str,
        max_players: u32,
        transport: Transport,
    ) -> Option<&Game> {
        let slot = self.slots.iter_mut().find(|s| s.is_none())?;
        *slot = Some(Game {
            id: generate_id(),
            name: name.to_string(),
            max_players,
            transport,
            created_at: Instant::now(),
            members: vec![Membership {
                client_id: creator_client_id.to_string(),
                player_name: creator_name.to_string(),
                token: generate_join_token(),
            }],
            port: None,
            active: false,
            ended: false,
        });
        slot.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&Game> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .find(|g| g.id == id && !g.ended)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Game> {
        self.slots
            .iter_mut()
            .filter_map(|s| s.as_mut())
            .find(|g| g.id == id && !g.ended)
    }

    /// Non-ended games, for `/list` (spec §6).
    pub fn list(&self) -> impl Iterator<Item = &Game> {
        self.slots.iter().filter_map(|s| s.as_ref()).filter(|g| !g.ended)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Game> {
        self.slots.iter_mut().filter_map(|s| s.as_mut())
    }

    /// Append a membership entry with a freshly generated token; the caller
    /// checks the returned outcome to decide whether to run `activate`.
    pub fn join(
        &mut self,
        game_id: &str,
        client_id: &str,
        player_name: &str,
    ) -> Option<JoinOutcome> {
        let game = self.find_mut(game_id)?;
        if game.has_member(client_id) {
            return Some(if game.is_full() {
                JoinOutcome::ReadyToActivate
            } else {
                JoinOutcome::Joined
            });
        }
        game.members.push(Membership {
            client_id: client_id.to_string(),
            player_name: player_name.to_string(),
            token: generate_join_token(),
        });
        Some(if game.is_full() {
            JoinOutcome::ReadyToActivate
        } else {
            JoinOutcome::Joined
        })
    }

    /// Remove `client_id` from `game_id`'s membership, if present. No-op if
    /// the client was never a member (spec §8 law: "/leave on a game the
    /// client is not in returns ok:true and changes nothing").
    pub fn leave(&mut self, game_id: &str, client_id: &str) {
        if let Some(game) = self.find_mut(game_id) {
            game.members.retain(|m| m.client_id != client_id);
        }
    }

    /// Remove `client_id`'s membership from every pending game other than
    /// `except_game_id` (spec §4.4 step 4, §4.3
    /// "remove_client_everywhere_except").
    pub fn remove_client_everywhere_except(&mut self, client_id: &str, except_game_id: &str) {
        for game in self.iter_mut() {
            if game.id == except_game_id || game.active || game.ended {
                continue;
            }
            game.members.retain(|m| m.client_id != client_id);
        }
    }

    /// Mark pending games older than `join_timeout` as not-in-use (spec §4.7).
    pub fn expire(&mut self, now: Instant, join_timeout: Duration) {
        for slot in &mut self.slots {
            let timed_out = slot.as_ref().is_some_and(|g| {
                !g.active && !g.ended && now.saturating_duration_since(g.created_at) > join_timeout
            });
            if timed_out {
                *slot = None;
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop a game entirely, freeing its slot and membership (spec §7:
    /// activation port-pool exhaustion "marks the game not-in-use and drops
    /// its membership").
    pub fn drop_game(&mut self, id: &str) {
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|g| g.id == id) {
                *slot = None;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir() -> GameDirectory {
        GameDirectory::new(2)
    }

    #[test]
    fn create_rejects_beyond_max_games() {
        let mut d = dir();
        assert!(d.create("c1", "A", "G1", 2, Transport::Tcp).is_some());
        assert!(d.create("c2", "B", "G2", 2, Transport::Tcp).is_some());
        assert!(d.create("c3", "C", "G3", 2, Transport::Tcp).is_none());
    }

    #[test]
    fn join_reports_ready_to_activate_on_last_slot() {
        let mut d = dir();
        let game_id = d.create("c1", "A", "G", 2, Transport::Tcp).unwrap().id.clone();
        let outcome = d.join(&game_id, "c2", "B").unwrap();
        assert!(matches!(outcome, JoinOutcome::ReadyToActivate));
    }

    #[test]
    fn leave_on_game_not_joined_is_a_no_op() {
        let mut d = dir();
        let game_id = d.create("c1", "A", "G", 2, Transport::Tcp).unwrap().id.clone();
        d.leave(&game_id, "stranger");
        assert_eq!(d.find(&game_id).unwrap().player_count(), 1);
    }

    #[test]
    fn remove_client_everywhere_except_spares_the_target_game() {
        let mut d = GameDirectory::new(3);
        let g0 = d.create("c1", "A", "G0", 3, Transport::Tcp).unwrap().id.clone();
        d.join(&g0, "c2", "B");
        let g1 = d.create("c1", "A", "G1", 2, Transport::Tcp).unwrap().id.clone();
        d.join(&g1, "c2", "B");

        d.remove_client_everywhere_except("c1", &g1);

        assert!(!d.find(&g0).unwrap().has_member("c1"));
        assert!(d.find(&g1).unwrap().has_member("c1"));
    }

    #[test]
    fn expire_frees_only_stale_pending_games() {
        let mut d = dir();
        let game_id = d.create("c1", "A", "G", 2, Transport::Tcp).unwrap().id.clone();
        let now = Instant::now() + Duration::from_secs(700);
        d.expire(now, Duration::from_secs(600));
        assert!(d.find(&game_id).is_none());
    }

    #[test]
    fn expire_never_touches_active_games() {
        let mut d = dir();
        let game_id = d.create("c1", "A", "G", 1, Transport::Tcp).unwrap().id.clone();
        d.find_mut(&game_id).unwrap().active = true;
        let now = Instant::now() + Duration::from_secs(10_000);
        d.expire(now, Duration::from_secs(600));
        assert!(d.find(&game_id).is_some());
    }
}
