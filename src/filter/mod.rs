//! Rule filter compilation
//!
//! A raw filter is a comma-separated list of rule ids and/or topic names.
//! [`RuleFilterCompiler::parse`] turns it into a [`RuleFilter`] that accepts
//! a catalog entry when its id or topic matches one of the recognized tokens,
//! ignoring case. A blank filter accepts everything; a filter whose tokens
//! are all unrecognized accepts nothing.

pub mod catalog;

use std::collections::HashSet;

pub use catalog::{RuleCatalog, RuleEntry, StaticCatalog};

/// Which field of an entry a token matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Id,
    Topic,
}

/// Compiled predicate over catalog entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFilter {
    accept_all: bool,
    accepted: HashSet<(MatchKind, String)>,
    ignored: Vec<String>,
}

impl RuleFilter {
    pub fn accept_all() -> Self {
        Self {
            accept_all: true,
            accepted: HashSet::new(),
            ignored: Vec::new(),
        }
    }

    pub fn reject_all() -> Self {
        Self {
            accept_all: false,
            accepted: HashSet::new(),
            ignored: Vec::new(),
        }
    }

    pub fn is_accept_all(&self) -> bool {
        self.accept_all
    }

    /// Tokens that matched neither a known id nor a known topic
    pub fn ignored_tokens(&self) -> &[String] {
        &self.ignored
    }

    /// Case is folded with `str::to_lowercase`. A handful of characters whose
    /// lowercase form is longer than one `char` (such as `İ`) fold differently
    /// from a char-by-char comparison; rule ids and topics are ASCII in practice.
    pub fn accepts(&self, entry: &RuleEntry) -> bool {
        self.accept_all
            || self
                .accepted
                .contains(&(MatchKind::Id, entry.id.to_lowercase()))
            || self
                .accepted
                .contains(&(MatchKind::Topic, entry.topic.to_lowercase()))
    }

    /// Entries of `catalog` this filter accepts, in catalog order
    pub fn select(&self, catalog: &dyn RuleCatalog) -> Vec<RuleEntry> {
        catalog
            .entries()
            .into_iter()
            .filter(|entry| self.accepts(entry))
            .collect()
    }
}

/// Knows every rule id and topic, compared case-insensitively
#[derive(Debug, Clone, Default)]
pub struct RuleFilterCompiler {
    ids: HashSet<String>,
    topics: HashSet<String>,
}

impl RuleFilterCompiler {
    pub fn new<I, T>(ids: I, topics: T) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            ids: ids.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            topics: topics
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Snapshot the ids and topics of `catalog`. Rules added to the catalog
    /// later are unknown to this compiler.
    pub fn from_catalog(catalog: &dyn RuleCatalog) -> Self {
        let entries = catalog.entries();
        Self::new(
            entries.iter().map(|e| e.id.as_str()),
            entries.iter().map(|e| e.topic.as_str()),
        )
    }

    pub fn knows_id(&self, id: &str) -> bool {
        self.ids.contains(&id.to_lowercase())
    }

    pub fn knows_topic(&self, topic: &str) -> bool {
        self.topics.contains(&topic.to_lowercase())
    }

    /// Compile `raw_filter`. A token naming both an id and a topic matches
    /// as an id.
    pub fn parse(&self, raw_filter: &str) -> RuleFilter {
        if raw_filter.trim().is_empty() {
            return RuleFilter::accept_all();
        }

        let mut filter = RuleFilter::reject_all();
        for token in raw_filter.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            let folded = token.to_lowercase();
            if self.ids.contains(&folded) {
                filter.accepted.insert((MatchKind::Id, folded));
            } else if self.topics.contains(&folded) {
                filter.accepted.insert((MatchKind::Topic, folded));
            } else {
                tracing::debug!(token, "Ignoring unrecognized rule filter token");
                filter.ignored.push(token.to_string());
            }
        }
        filter
    }
}
