//! Fixed-capacity client table (spec §4.2).
//!
//! Grounded on `original_source/server/main.c`'s `g_clients` array and
//! `create_client_locked`/`find_client_by_id_locked`/`expire_clients`, kept
//! as a `Vec<Option<Client>>` of slots rather than a fixed array (idiomatic
//! Rust equivalent of the C source's "`in_use` flag over a fixed array").

use std::time::{Duration, Instant};

use crate::config::limits::MAX_CLIENTS_LIMIT;
use crate::domain::Client;
use crate::idgen::generate_id;

pub struct ClientDirectory {
    slots: Vec<Option<Client>>,
}

impl ClientDirectory {
    pub fn new() -> Self {
        Self {
            slots: (0..MAX_CLIENTS_LIMIT).map(|_| None).collect(),
        }
    }

    /// Create a client with a freshly generated 8-char id, or `None` if the
    /// table is full (spec §4.2 "create(name) -> client | full").
    pub fn create(&mut self, name: &str) -> Option<&Client> {
        let slot = self.slots.iter_mut().find(|s| s.is_none())?;
        *slot = Some(Client {
            id: generate_id(),
            name: name.to_string(),
            last_seen: Instant::now(),
            pending_start: None,
        });
        slot.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&Client> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.slots
            .iter_mut()
            .filter_map(|s| s.as_mut())
            .find(|c| c.id == id)
    }

    /// Refresh a client's `last_seen` timestamp.
    pub fn touch(&mut self, id: &str) {
        if let Some(client) = self.find_mut(id) {
            client.last_seen = Instant::now();
        }
    }

    /// Free any slot whose `last_seen` is older than `inactivity_window`.
    pub fn expire(&mut self, now: Instant, inactivity_window: Duration) {
        for slot in &mut self.slots {
            let expired = slot
                .as_ref()
                .is_some_and(|c| now.saturating_duration_since(c.last_seen) > inactivity_window);
            if expired {
                *slot = None;
            }
        }
    }
}

impl Default for ClientDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_generates_unique_id_and_is_findable() {
        let mut dir = ClientDirectory::new();
        let id = dir.create("Alice").unwrap().id.clone();
        assert_eq!(dir.find(&id).unwrap().name, "Alice");
    }

    #[test]
    fn full_table_rejects_create() {
        let mut dir = ClientDirectory::new();
        for i in 0..MAX_CLIENTS_LIMIT {
            assert!(dir.create(&format!("c{i}")).is_some(), "slot {i}");
        }
        assert!(dir.create("overflow").is_none());
    }

    #[test]
    fn expire_removes_stale_clients_only() {
        let mut dir = ClientDirectory::new();
        let id = dir.create("Alice").unwrap().id.clone();
        let now = Instant::now() + Duration::from_secs(3601);
        dir.expire(now, Duration::from_secs(3600));
        assert!(dir.find(&id).is_none());
    }

    #[test]
    fn expire_keeps_recently_touched_clients() {
        let mut dir = ClientDirectory::new();
        let id = dir.create("Alice").unwrap().id.clone();
        let now = Instant::now() + Duration::from_secs(10);
        dir.expire(now, Duration::from_secs(3600));
        assert!(dir.find(&id).is_some());
    }
}
