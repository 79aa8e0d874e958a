//! Keyword → replies table.
//!
//! An ordered list of [`ReplyRule`]s plus a fallback. The first rule whose
//! keyword is a substring of the lowercased message wins; later rules are
//! never consulted. Tables are validated when built and are read-only
//! afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReplyTableError;

/// A keyword and the replies it may trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRule {
    keyword: String,
    replies: Vec<String>,
}

impl ReplyRule {
    /// Build a rule. The keyword is lowercased so it matches lowercased input.
    pub fn new<K, I, S>(keyword: K, replies: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyword: keyword.as_ref().to_lowercase(),
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    fn matches(&self, lowered: &str) -> bool {
        lowered.contains(self.keyword.as_str())
    }
}

/// Serialized form of a table, as loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyTableSpec {
    pub rules: Vec<ReplyRule>,
    pub fallback: Vec<String>,
}

/// Validated, immutable reply table.
#[derive(Debug, Clone)]
pub struct ReplyTable {
    rules: Vec<ReplyRule>,
    fallback: Vec<String>,
}

impl ReplyTable {
    /// Build a table, rejecting empty keywords and empty candidate lists.
    pub fn new(rules: Vec<ReplyRule>, fallback: Vec<String>) -> Result<Self, ReplyTableError> {
        let rules: Vec<ReplyRule> = rules
            .into_iter()
            .map(|r| ReplyRule {
                keyword: r.keyword.to_lowercase(),
                replies: r.replies,
            })
            .collect();

        for (index, rule) in rules.iter().enumerate() {
            if rule.keyword.is_empty() {
                return Err(ReplyTableError::EmptyKeyword { index });
            }
            if rule.replies.is_empty() {
                return Err(ReplyTableError::EmptyCandidates {
                    keyword: rule.keyword.clone(),
                });
            }
        }
        if fallback.is_empty() {
            return Err(ReplyTableError::EmptyFallback);
        }

        Ok(Self { rules, fallback })
    }

    /// Start building a table rule by rule.
    pub fn builder() -> ReplyTableBuilder {
        ReplyTableBuilder::default()
    }

    /// Parse and validate a table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ReplyTableError> {
        let spec: ReplyTableSpec = serde_json::from_str(json)?;
        Self::new(spec.rules, spec.fallback)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReplyTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            rules = table.rules.len(),
            "Loaded reply table"
        );
        Ok(table)
    }

    /// First rule whose keyword occurs in `lowered`, in table order.
    pub fn find_rule(&self, lowered: &str) -> Option<&ReplyRule> {
        self.rules.iter().find(|rule| rule.matches(lowered))
    }

    /// Candidates for already-lowercased text: the matching rule's, or the fallback.
    pub fn candidates_for(&self, lowered: &str) -> &[String] {
        self.find_rule(lowered)
            .map(ReplyRule::replies)
            .unwrap_or(self.fallback.as_slice())
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }
}

/// Incremental table construction; validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ReplyTableBuilder {
    rules: Vec<ReplyRule>,
    fallback: Vec<String>,
}

impl ReplyTableBuilder {
    pub fn rule<K, I, S>(mut self, keyword: K, replies: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(ReplyRule::new(keyword, replies));
        self
    }

    pub fn fallback<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = replies.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ReplyTable, ReplyTableError> {
        ReplyTable::new(self.rules, self.fallback)
    }
}
