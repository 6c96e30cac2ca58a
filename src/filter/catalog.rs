use serde::{Deserialize, Serialize};

/// One analysis rule as listed by a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleEntry {
    pub id: String,
    pub topic: String,
}

impl RuleEntry {
    pub fn new(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
        }
    }
}

/// Enumerable collection of rules
pub trait RuleCatalog {
    fn entries(&self) -> Vec<RuleEntry>;
}

/// Catalog backed by a fixed list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCatalog {
    rules: Vec<RuleEntry>,
}

impl StaticCatalog {
    pub fn new(rules: Vec<RuleEntry>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleCatalog for StaticCatalog {
    fn entries(&self) -> Vec<RuleEntry> {
        self.rules.clone()
    }
}

impl FromIterator<RuleEntry> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = RuleEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
