use crate::config::ScoringConfig;
use crate::hint_kind::{HintKind, ALL};

/// A plain snapshot of a [`RelayEntry`](crate::relay_entry::RelayEntry)'s
/// per-kind timestamps, indexed by [`HintKind::index`]. Zero means "never
/// observed" (§3).
///
/// This is the pure-function boundary the scoring algorithm is tested
/// against (§4.3, §8): given a snapshot and a reference time, scoring has no
/// other inputs and no side effects, mirroring how `gossip-lib`'s
/// `PersonRelay2::association_score` is a pure `(&self, now, usage) -> f32`
/// function over already-loaded state.
pub type Snapshot = [i64; HintKind::COUNT];

/// Computes the relay's score at `now` per §4.3.
///
/// Step 1: for every kind with a non-zero timestamp, the freshness factor
/// `f = max(0, 1 - age / horizon)` is multiplied by the kind's base weight.
/// Step 2: contributions are summed in floating point. Step 3: the sum is
/// rounded to an integer exactly once, at the end — not per kind, so that
/// e.g. two kinds each at half-freshness round together rather than each
/// rounding away their own fractional weight.
pub fn score(snapshot: &Snapshot, now: i64, cfg: &ScoringConfig) -> i64 {
    let mut sum: f64 = 0.0;
    for k in ALL {
        let ts = snapshot[k.index()];
        if ts <= 0 {
            continue;
        }
        let age = (now - ts).max(0);
        let horizon = cfg.horizon_secs(k);
        let freshness = (1.0 - age as f64 / horizon as f64).max(0.0);
        sum += cfg.weight(k) as f64 * freshness;
    }
    sum.round() as i64
}

/// Whether a relay with this snapshot and this computed `score` is a TopN
/// candidate at all (invariant 4, §3): either it has ever been observed
/// under a positive-weight kind, or its final score is strictly positive.
///
/// A relay whose *only* evidence is a `LastFetchAttempt` (the sole
/// negative-weight kind) and whose score is therefore `<= 0` is not a
/// candidate — we attempted a fetch but have no other reason to believe it
/// is an outbox relay at all.
pub fn is_candidate(snapshot: &Snapshot, score: i64, cfg: &ScoringConfig) -> bool {
    if score > 0 {
        return true;
    }
    ALL.iter()
        .any(|&k| cfg.is_positive(k) && snapshot[k.index()] > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const HOUR: i64 = 3_600;

    fn empty() -> Snapshot {
        [0; HintKind::COUNT]
    }

    #[test]
    fn never_observed_scores_zero_and_is_not_a_candidate() {
        let cfg = ScoringConfig::default();
        let snap = empty();
        assert_eq!(score(&snap, 1_000_000, &cfg), 0);
        assert!(!is_candidate(&snap, 0, &cfg));
    }

    #[test]
    fn full_freshness_equals_base_weight() {
        let cfg = ScoringConfig::default();
        let now = 10 * DAY;
        let mut snap = empty();
        snap[HintKind::LastInNIP05.index()] = now;
        assert_eq!(score(&snap, now, &cfg), HintKind::LastInNIP05.base_weight());
    }

    #[test]
    fn decays_to_zero_exactly_at_horizon() {
        let cfg = ScoringConfig::default();
        let t0 = 10 * DAY;
        let mut snap = empty();
        snap[HintKind::LastInTag.index()] = t0;
        let horizon = HintKind::LastInTag.horizon_secs();

        // Just before the horizon, still some positive contribution.
        assert!(score(&snap, t0 + horizon - 1, &cfg) >= 0);
        // At and beyond the horizon, contribution is exactly zero (P3).
        assert_eq!(score(&snap, t0 + horizon, &cfg), 0);
        assert_eq!(score(&snap, t0 + horizon + 365 * DAY, &cfg), 0);
    }

    #[test]
    fn half_decayed_is_half_weight_rounded_once() {
        let cfg = ScoringConfig::default();
        let t0 = 100 * DAY;
        let mut snap = empty();
        snap[HintKind::LastInRelayList.index()] = t0;
        let half = HintKind::LastInRelayList.horizon_secs() / 2;
        let got = score(&snap, t0 + half, &cfg);
        // 30 * 0.5 = 15 exactly.
        assert_eq!(got, 15);
    }

    #[test]
    fn only_a_fetch_attempt_is_not_a_candidate() {
        let cfg = ScoringConfig::default();
        let now = 5 * DAY;
        let mut snap = empty();
        snap[HintKind::LastFetchAttempt.index()] = now;
        let s = score(&snap, now, &cfg);
        assert!(s <= 0);
        assert!(!is_candidate(&snap, s, &cfg));
    }

    #[test]
    fn fetch_attempt_plus_decayed_positive_evidence_is_still_a_candidate() {
        let cfg = ScoringConfig::default();
        let mut snap = empty();
        // LastInTag recorded long enough ago to have fully decayed...
        snap[HintKind::LastInTag.index()] = 0 + 1; // ts just above zero
        let now = HintKind::LastInTag.horizon_secs() * 100;
        // ...plus a fresh, negative-weight fetch attempt.
        snap[HintKind::LastFetchAttempt.index()] = now;
        let s = score(&snap, now, &cfg);
        assert!(s < 0);
        // Still a candidate: it has a non-zero timestamp for a
        // positive-weight kind, even though that kind has fully decayed.
        assert!(is_candidate(&snap, s, &cfg));
    }

    #[test]
    fn successful_recent_fetch_outweighs_its_own_attempt_debit() {
        let cfg = ScoringConfig::default();
        let now = 10 * DAY;
        let mut snap = empty();
        snap[HintKind::LastFetchAttempt.index()] = now;
        snap[HintKind::MostRecentEventFetched.index()] = now;
        // +30 - 20 = +10 net, per §4.3 step 3.
        assert_eq!(score(&snap, now, &cfg), 10);
    }

    #[test]
    fn stale_event_from_an_attempt_leaves_a_net_negative() {
        let cfg = ScoringConfig::default();
        let now = 60 * DAY;
        let mut snap = empty();
        snap[HintKind::LastFetchAttempt.index()] = now;
        snap[HintKind::MostRecentEventFetched.index()] = now - 60 * DAY;
        assert!(score(&snap, now, &cfg) < 0);
    }
}
