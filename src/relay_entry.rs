use std::sync::atomic::{AtomicI64, Ordering};

use crate::hint_kind::HintKind;
use crate::score::Snapshot;

/// Per-kind last-seen timestamps for one (pubkey, relay) pair (§3).
///
/// Each slot is an independent atomic, updated with a monotonic-max
/// compare-and-swap rather than behind a lock, per the concurrency note in
/// §9 ("A fully lock-free implementation is possible because `Save` is
/// monotonic-max over scalars"). This gives per-relay atomicity for any one
/// kind without serializing unrelated kinds against each other, which is as
/// strong a guarantee as §5 asks for.
#[derive(Debug, Default)]
pub struct RelayEntry {
    timestamps: [AtomicI64; HintKind::COUNT],
}

impl RelayEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs an observation of `kind` at `ts`. A no-op if `ts` does not
    /// exceed the timestamp already stored for this kind (invariant 2, §3).
    pub fn save(&self, kind: HintKind, ts: i64) {
        let slot = &self.timestamps[kind.index()];
        let mut current = slot.load(Ordering::Relaxed);
        loop {
            if ts <= current {
                return;
            }
            match slot.compare_exchange_weak(current, ts, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// The timestamp stored for `kind`, or 0 if never observed.
    pub fn get(&self, kind: HintKind) -> i64 {
        self.timestamps[kind.index()].load(Ordering::Acquire)
    }

    /// A consistent-per-slot snapshot of every kind's timestamp, suitable
    /// for feeding to [`crate::score::score`]. Not required to be atomic
    /// across slots (§5: "not required to observe a globally consistent
    /// snapshot across all relays... interleaved saves... may be reflected
    /// partially" — the same relaxation applies within one relay's kinds).
    pub fn snapshot(&self) -> Snapshot {
        let mut out = [0i64; HintKind::COUNT];
        for (i, slot) in self.timestamps.iter().enumerate() {
            out[i] = slot.load(Ordering::Acquire);
        }
        out
    }

    /// Whether this entry has ever recorded any observation at all.
    pub fn is_empty(&self) -> bool {
        self.timestamps.iter().all(|s| s.load(Ordering::Relaxed) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_keeps_the_maximum() {
        let entry = RelayEntry::new();
        entry.save(HintKind::LastInTag, 100);
        entry.save(HintKind::LastInTag, 50);
        assert_eq!(entry.get(HintKind::LastInTag), 100);
        entry.save(HintKind::LastInTag, 200);
        assert_eq!(entry.get(HintKind::LastInTag), 200);
    }

    #[test]
    fn equal_timestamp_is_a_no_op() {
        let entry = RelayEntry::new();
        entry.save(HintKind::LastInTag, 100);
        entry.save(HintKind::LastInTag, 100);
        assert_eq!(entry.get(HintKind::LastInTag), 100);
    }

    #[test]
    fn kinds_are_independent() {
        let entry = RelayEntry::new();
        entry.save(HintKind::LastInTag, 100);
        assert_eq!(entry.get(HintKind::LastInNIP05), 0);
        assert!(!entry.is_empty());
    }

    #[test]
    fn fresh_entry_is_empty() {
        let entry = RelayEntry::new();
        assert!(entry.is_empty());
        assert_eq!(entry.snapshot(), [0i64; HintKind::COUNT]);
    }
}
