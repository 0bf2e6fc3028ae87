/// One second, for readability in the horizon table below.
const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// The closed set of evidence kinds the scoring engine understands.
///
/// Each kind carries a fixed base weight (its authority, §3) and a fixed
/// decay horizon (§4.3). Both are compiled-in constants, not configuration,
/// to match the external contract: the weight and horizon tables are part of
/// what callers rely on when they reason about the shape of a ranking.
///
/// Variant order is the iteration order used by the diagnostic dump; it is
/// part of why the dump is deterministic, not part of the scoring contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HintKind {
    /// Author's self-published relay list names this relay.
    LastInRelayList,
    /// Relay appeared in a hint tag on some event referencing the author.
    LastInTag,
    /// Relay appeared in a tag on an event authored by the subject.
    LastInAssociatedEventTag,
    /// Relay appeared inside an author-identifier encoding (e.g. nprofile).
    LastInNprofile,
    /// Relay appeared inside an event-identifier encoding for an event by the author (e.g. nevent).
    LastInNevent,
    /// Relay appeared in a verified identifier record for the author (NIP-05).
    LastInNIP05,
    /// We attempted to fetch events for the author from this relay.
    LastFetchAttempt,
    /// We actually received events authored by this author from this relay.
    MostRecentEventFetched,
}

/// All `HintKind` variants, in the stable order used for iteration and dump
/// rendering. Kept as a plain array rather than a derive macro: the set is
/// closed and will not grow without a spec change (§4.1: "No dynamic
/// registration").
pub const ALL: [HintKind; HintKind::COUNT] = [
    HintKind::LastInRelayList,
    HintKind::LastInTag,
    HintKind::LastInAssociatedEventTag,
    HintKind::LastInNprofile,
    HintKind::LastInNevent,
    HintKind::LastInNIP05,
    HintKind::LastFetchAttempt,
    HintKind::MostRecentEventFetched,
];

impl HintKind {
    /// Number of kinds in the closed enumeration.
    pub const COUNT: usize = 8;

    /// This kind's ordinal, used to index into a `RelayEntry`'s timestamp array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            HintKind::LastInRelayList => 0,
            HintKind::LastInTag => 1,
            HintKind::LastInAssociatedEventTag => 2,
            HintKind::LastInNprofile => 3,
            HintKind::LastInNevent => 4,
            HintKind::LastInNIP05 => 5,
            HintKind::LastFetchAttempt => 6,
            HintKind::MostRecentEventFetched => 7,
        }
    }

    /// This kind's base weight (§3). Positive values are evidence of fit;
    /// `LastFetchAttempt` is the sole negative weight, a cost paid without
    /// yet seeing a result.
    #[inline]
    pub const fn base_weight(self) -> i64 {
        match self {
            HintKind::LastInRelayList => 30,
            HintKind::LastInTag => 4,
            HintKind::LastInAssociatedEventTag => 5,
            HintKind::LastInNprofile => 6,
            HintKind::LastInNevent => 5,
            HintKind::LastInNIP05 => 9,
            HintKind::LastFetchAttempt => -20,
            HintKind::MostRecentEventFetched => 30,
        }
    }

    /// This kind's decay horizon in seconds (§4.3): the age at which its
    /// contribution has fully decayed to zero.
    #[inline]
    pub const fn horizon_secs(self) -> i64 {
        match self {
            HintKind::LastInRelayList => 60 * DAY,
            HintKind::LastInNprofile => 30 * DAY,
            HintKind::LastInNIP05 => 30 * DAY,
            HintKind::LastInNevent => 15 * DAY,
            HintKind::LastInAssociatedEventTag => 15 * DAY,
            HintKind::LastInTag => 7 * DAY,
            HintKind::LastFetchAttempt => 7 * DAY,
            HintKind::MostRecentEventFetched => 30 * DAY,
        }
    }

    /// Whether this kind is "evidence of fit" rather than "cost paid".
    /// Used by invariant 4 (§3) to decide whether a relay with only a
    /// negative-weight observation should still be a TopN candidate.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.base_weight() > 0
    }
}
