//! Trend record types
//!
//! These are the normalized shapes served on the wire. Stored documents are
//! converted into them by [`super::document`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-country snapshot of ranked trending keywords
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRecord {
    /// Uppercase country code, the natural key ("US", "KR", ...)
    pub country_code: String,

    /// Human-readable country name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,

    /// Last refresh by the ingestion job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Ranked keywords in stored order
    pub keywords: Vec<KeywordEntry>,
}

impl TrendRecord {
    /// Create an empty record for a country
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: None,
            updated_at: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.country_name = Some(name.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_keyword(mut self, entry: KeywordEntry) -> Self {
        self.keywords.push(entry);
        self
    }
}

/// One ranked keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordEntry {
    pub rank: u32,
    pub keyword: String,

    /// Explanation per language code; always present, possibly empty
    pub explanations: BTreeMap<String, String>,

    /// Number of related news articles
    pub news_count: u64,
}

impl KeywordEntry {
    pub fn new(rank: u32, keyword: impl Into<String>) -> Self {
        Self {
            rank,
            keyword: keyword.into(),
            explanations: BTreeMap::new(),
            news_count: 0,
        }
    }

    pub fn with_explanation(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.explanations.insert(lang.into(), text.into());
        self
    }

    pub fn with_news_count(mut self, news_count: u64) -> Self {
        self.news_count = news_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyword_entry_serializes_defaults() {
        let entry = KeywordEntry::new(1, "foo");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            value,
            json!({"rank": 1, "keyword": "foo", "explanations": {}, "news_count": 0})
        );
    }

    #[test]
    fn test_record_omits_missing_optional_fields() {
        let record = TrendRecord::new("US");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value, json!({"country_code": "US", "keywords": []}));
    }
}
