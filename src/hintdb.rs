use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

use crate::config::ScoringConfig;
use crate::error::{Error, ErrorKind};
use crate::hint_kind::{HintKind, ALL};
use crate::relay_entry::RelayEntry;
use crate::score;

/// Per-pubkey relay table: relay URL -> observed timestamps (§3 `KeyEntry`).
type KeyEntry = DashMap<String, RelayEntry>;

/// Current Unix time in seconds. The public `save`/`top_n` entry points use
/// this rather than take `now` as a parameter, matching the external
/// interface in §6 (`TopN(pubkey, n)`, no clock parameter) — the engine
/// reads the wall clock the same way the reference implementation's
/// `nostr.Now()` calls do.
fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// The relay-hint ranking core (§2).
///
/// `HintDB` absorbs weakly-correlated evidence about which relays carry a
/// given author's events (`save`), and answers "what are the best N relays
/// for this author right now" (`top_n`) by recomputing scores fresh against
/// the current time on every call — there is no incrementally-maintained
/// ranking to keep in sync, which is what makes `save` trivially idempotent
/// and order-independent (invariant 2/3, §3).
///
/// Concurrency: reads and writes are sharded two levels deep (by pubkey,
/// then by relay), and the innermost timestamps are plain atomics updated
/// with monotonic-max compare-and-swap (§5, §9). No single lock serializes
/// unrelated pubkeys or unrelated relays against each other.
#[derive(Debug, Default)]
pub struct HintDB {
    config: ScoringConfig,
    keys: DashMap<String, KeyEntry>,
}

impl HintDB {
    /// An empty `HintDB` using the default weights and horizons (§3, §4.3).
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty `HintDB` using a custom [`ScoringConfig`]. Intended for
    /// experimentation; production callers should generally use [`Self::new`]
    /// so they get the pinned external contract.
    pub fn with_config(config: ScoringConfig) -> Self {
        HintDB {
            config,
            keys: DashMap::new(),
        }
    }

    /// Absorbs an observation: `relay` is evidence of kind `kind` for
    /// `pubkey`, last seen at `ts` (Unix seconds). A no-op if `ts` does not
    /// exceed whatever timestamp of this kind was already stored for this
    /// (pubkey, relay) pair (invariant 2, §3).
    ///
    /// `pubkey` and `relay` are not validated or canonicalized (§6); it is
    /// the caller's responsibility to normalize them before calling.
    pub fn save(&self, pubkey: &str, relay: &str, kind: HintKind, ts: i64) {
        tracing::trace!(pubkey, relay, kind = ?kind, ts, "absorbing relay hint");

        let key_entry = self
            .keys
            .entry(pubkey.to_owned())
            .or_insert_with(DashMap::new);
        let relay_entry = key_entry
            .entry(relay.to_owned())
            .or_insert_with(RelayEntry::new);
        relay_entry.save(kind, ts);
    }

    /// Ranks the relays known for `pubkey` and returns the top `n` URLs,
    /// best first (§4.4). Returns an empty list if `pubkey` is unknown or
    /// `n <= 0` (§7).
    pub fn top_n(&self, pubkey: &str, n: i64) -> Vec<String> {
        self.top_n_at(pubkey, n, now_unix())
    }

    /// Like [`Self::top_n`], but scored against an explicit `now` instead of
    /// the wall clock. Exposed so the scoring contract (§4.3, §8 properties
    /// P2/P3) can be tested deterministically without depending on how fast
    /// the test runs.
    pub fn top_n_at(&self, pubkey: &str, n: i64, now: i64) -> Vec<String> {
        tracing::debug!(pubkey, n, now, "ranking relays");

        if n <= 0 {
            return Vec::new();
        }
        let n = n as usize;

        let Some(key_entry) = self.keys.get(pubkey) else {
            return Vec::new();
        };

        let mut ranked: Vec<(i64, String)> = Vec::with_capacity(key_entry.len());
        for item in key_entry.iter() {
            let relay = item.key();
            let snapshot = item.value().snapshot();
            let relay_score = score::score(&snapshot, now, &self.config);
            if score::is_candidate(&snapshot, relay_score, &self.config) {
                ranked.push((relay_score, relay.clone()));
            }
        }

        // Score descending, then URL ascending (§4.3 step 5, P4).
        ranked.sort_by(|(score_a, url_a), (score_b, url_b)| {
            score_b.cmp(score_a).then_with(|| url_a.cmp(url_b))
        });

        ranked.into_iter().take(n).map(|(_, url)| url).collect()
    }

    /// Writes a deterministic, human-readable snapshot of the whole DB to
    /// `sink` (§4.5). Pubkeys are sorted; within each pubkey, relays are
    /// sorted score-descending then URL-ascending, same as `top_n`. Every
    /// relay ever observed is listed, including ones that would not qualify
    /// as a TopN candidate, since this is a debugging aid, not a ranking.
    ///
    /// A write failure is returned to the caller but never touches scoring
    /// state (§7).
    pub fn dump<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        self.dump_at(sink, now_unix())
    }

    /// Like [`Self::dump`], scored against an explicit `now`.
    pub fn dump_at<W: Write>(&self, sink: &mut W, now: i64) -> Result<(), Error> {
        let mut pubkeys: Vec<String> = self.keys.iter().map(|e| e.key().clone()).collect();
        pubkeys.sort();

        for pubkey in pubkeys {
            writeln!(sink, "{pubkey}").map_err(io_err)?;

            let Some(key_entry) = self.keys.get(&pubkey) else {
                continue;
            };

            let mut rows: Vec<(i64, String, [i64; HintKind::COUNT])> =
                Vec::with_capacity(key_entry.len());
            for item in key_entry.iter() {
                let snapshot = item.value().snapshot();
                let relay_score = score::score(&snapshot, now, &self.config);
                rows.push((relay_score, item.key().clone(), snapshot));
            }
            rows.sort_by(|(score_a, url_a, _), (score_b, url_b, _)| {
                score_b.cmp(score_a).then_with(|| url_a.cmp(url_b))
            });

            for (relay_score, url, snapshot) in rows {
                write!(sink, "  {relay_score:>6}  {url}").map_err(io_err)?;
                for k in ALL {
                    let ts = snapshot[k.index()];
                    if ts > 0 {
                        let age = (now - ts).max(0);
                        write!(sink, "  {}={age}s", kind_label(k)).map_err(io_err)?;
                    } else {
                        write!(sink, "  {}=-", kind_label(k)).map_err(io_err)?;
                    }
                }
                writeln!(sink).map_err(io_err)?;
            }
        }

        Ok(())
    }

    /// Convenience wrapper around [`Self::dump`] that writes to stdout, for
    /// interactive debugging. Failures are logged rather than propagated,
    /// since there is no caller to hand them back to.
    pub fn print_scores(&self) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = self.dump(&mut out) {
            tracing::warn!(error = %e, "failed to print hint scores");
        }
    }
}

fn kind_label(kind: HintKind) -> &'static str {
    match kind {
        HintKind::LastInRelayList => "relay_list",
        HintKind::LastInTag => "tag",
        HintKind::LastInAssociatedEventTag => "assoc_tag",
        HintKind::LastInNprofile => "nprofile",
        HintKind::LastInNevent => "nevent",
        HintKind::LastInNIP05 => "nip05",
        HintKind::LastFetchAttempt => "fetch_attempt",
        HintKind::MostRecentEventFetched => "fetched",
    }
}

fn io_err(e: std::io::Error) -> Error {
    (ErrorKind::Io(e), file!(), line!()).into()
}
