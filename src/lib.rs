//! Relay-hint ranking core for a nostr-style gossip client.
//!
//! Each participant in the network is identified by a public key and
//! publishes events to an open set of relay servers. Other participants have
//! to guess which relays are likely to carry a given author's content. This
//! crate maintains, per author, a compact scoring table over observed relays
//! and answers "what are the best relays for this author, right now?"
//!
//! The entry point is [`HintDB`]: callers feed it weakly-correlated evidence
//! with [`HintDB::save`] as they observe it (an author's self-published
//! relay list, a relay hint embedded in an event reference, the outcome of a
//! fetch attempt, ...), and query it with [`HintDB::top_n`]. Evidence is
//! absorbed idempotently and scored with linear time decay; see
//! [`HintKind`] and [`score`] for the exact rules.
//!
//! This library does not perform any network I/O, signing, or identifier
//! decoding; it only ranks relays from evidence handed to it by a caller
//! that does those things.

mod config;
mod error;
mod hint_kind;
mod hintdb;
mod relay_entry;
mod score;

pub use config::ScoringConfig;
pub use error::{Error, ErrorKind};
pub use hint_kind::{HintKind, ALL};
pub use hintdb::HintDB;
pub use score::Snapshot;
