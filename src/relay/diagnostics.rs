//! Per-game relay counters, logged every `DIAG_INTERVAL_MS` and once more on
//! shutdown (spec §4.6 "Diagnostics").

use crate::relay::sequence::SequenceStats;

#[derive(Debug, Default, Clone, Copy)]
pub struct Diagnostics {
    pub rx: u64,
    pub tx: u64,
    pub dup_tx: u64,
    pub register: u64,
    pub drop: u64,
    pub unknown: u64,
    pub seq: SequenceStats,
}

impl Diagnostics {
    pub fn log(&self, game_id: &str) {
        tracing::info!(
            game_id,
            rx = self.rx,
            tx = self.tx,
            dup_tx = self.dup_tx,
            register = self.register,
            drop = self.drop,
            unknown = self.unknown,
            seq_in_order = self.seq.in_order,
            seq_ahead = self.seq.ahead,
            seq_behind = self.seq.behind,
            seq_duplicate = self.seq.duplicate,
            seq_total_gap = self.seq.total_gap,
            seq_max_gap = self.seq.max_gap,
            seq_short = self.seq.short,
            "relay diagnostics"
        );
    }
}
