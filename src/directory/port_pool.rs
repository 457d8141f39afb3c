//! Bounded UDP/TCP port pool (spec §4.1).
//!
//! Grounded on `original_source/server/main.c`'s `g_port_used`/
//! `acquire_game_port`/`release_game_port`: a bitset over `[min, max]`,
//! scanned from the low end on acquire. Both operations are only ever called
//! from inside [`crate::coordinator::LobbyCoordinator`]'s mutex — there is no
//! independent locking here.

pub struct PortPool {
    min: u16,
    used: Vec<bool>,
}

impl PortPool {
    pub fn new(min: u16, max: u16) -> Self {
        let range = (max - min + 1) as usize;
        Self {
            min,
            used: vec![false; range],
        }
    }

    /// Scan from the low end and reserve the first free port.
    pub fn acquire(&mut self) -> Option<u16> {
        let idx = self.used.iter().position(|&taken| !taken)?;
        self.used[idx] = true;
        Some(self.min + idx as u16)
    }

    /// Release a port. Out-of-range or already-free ports are silently
    /// ignored (spec §4.1 "idempotent for out-of-range values").
    pub fn release(&mut self, port: u16) {
        if port < self.min {
            return;
        }
        let idx = (port - self.min) as usize;
        if let Some(slot) = self.used.get_mut(idx) {
            *slot = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_scans_from_low_end() {
        let mut pool = PortPool::new(9000, 9002);
        assert_eq!(pool.acquire(), Some(9000));
        assert_eq!(pool.acquire(), Some(9001));
        assert_eq!(pool.acquire(), Some(9002));
        assert_eq!(pool.acquire(), None);
    }

    #[test]
    fn release_frees_a_port_for_reacquisition() {
        let mut pool = PortPool::new(9000, 9000);
        let port = pool.acquire().unwrap();
        assert_eq!(pool.acquire(), None);
        pool.release(port);
        assert_eq!(pool.acquire(), Some(port));
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = PortPool::new(9000, 9000);
        let port = pool.acquire().unwrap();
        pool.release(port);
        pool.release(port);
        assert_eq!(pool.acquire(), Some(port));
    }

    #[test]
    fn release_out_of_range_is_ignored() {
        let mut pool = PortPool::new(9000, 9000);
        pool.release(1234);
        pool.release(65535);
        assert_eq!(pool.acquire(), Some(9000));
    }
}
