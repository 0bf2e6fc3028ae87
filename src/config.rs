use crate::hint_kind::{HintKind, ALL};

/// Tunable weights and horizons for the scoring function.
///
/// There is no config *file* format here (none is specified and the engine
/// has no persistent state of its own), but the weight and horizon tables
/// are exactly the sort of thing a host application may want to tune or
/// persist, the way `gossip-lib`'s `Settings` exposes `num_relays_per_person`
/// and friends as a plain struct rather than scattered constants. A host
/// that wants to load overrides from its own config file can deserialize
/// straight into this type when the `serde` feature is enabled.
///
/// [`ScoringConfig::default`] reproduces the weight and horizon tables from
/// §3/§4.3 exactly; changing them changes scoring behavior away from the
/// pinned external contract, so most callers should just use the default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    weights: [i64; HintKind::COUNT],
    horizons: [i64; HintKind::COUNT],
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut weights = [0i64; HintKind::COUNT];
        let mut horizons = [0i64; HintKind::COUNT];
        for k in ALL {
            weights[k.index()] = k.base_weight();
            horizons[k.index()] = k.horizon_secs();
        }
        ScoringConfig { weights, horizons }
    }
}

impl ScoringConfig {
    /// The base weight configured for `kind`.
    #[inline]
    pub fn weight(&self, kind: HintKind) -> i64 {
        self.weights[kind.index()]
    }

    /// The decay horizon (in seconds) configured for `kind`.
    #[inline]
    pub fn horizon_secs(&self, kind: HintKind) -> i64 {
        self.horizons[kind.index()]
    }

    /// Override the base weight for `kind`. Intended for experimentation
    /// (e.g. tuning weights against a corpus of known-good rankings); the
    /// values pinned in §3 are the external contract and production callers
    /// should leave them alone.
    pub fn set_weight(&mut self, kind: HintKind, weight: i64) -> &mut Self {
        self.weights[kind.index()] = weight;
        self
    }

    /// Override the decay horizon (in seconds) for `kind`. Must be positive
    /// or every observation of that kind will decay to zero instantly.
    pub fn set_horizon_secs(&mut self, kind: HintKind, horizon_secs: i64) -> &mut Self {
        self.horizons[kind.index()] = horizon_secs;
        self
    }

    /// Whether `kind` currently carries a positive (evidence-of-fit) weight
    /// under this config, used by the TopN candidacy rule (invariant 4, §3).
    #[inline]
    pub fn is_positive(&self, kind: HintKind) -> bool {
        self.weight(kind) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_hint_kind_tables() {
        let cfg = ScoringConfig::default();
        for k in ALL {
            assert_eq!(cfg.weight(k), k.base_weight());
            assert_eq!(cfg.horizon_secs(k), k.horizon_secs());
        }
    }

    #[test]
    fn overrides_are_scoped_to_one_kind() {
        let mut cfg = ScoringConfig::default();
        cfg.set_weight(HintKind::LastInTag, 100);
        assert_eq!(cfg.weight(HintKind::LastInTag), 100);
        assert_eq!(
            cfg.weight(HintKind::LastInNIP05),
            HintKind::LastInNIP05.base_weight()
        );
    }
}
