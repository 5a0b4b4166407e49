//! Stored document normalization
//!
//! The ingestion job writes loosely shaped documents. Everything is projected
//! here into [`TrendRecord`] / [`KeywordEntry`] so the wire contract does not
//! depend on which optional fields happened to be populated.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};

use super::model::{KeywordEntry, TrendRecord};

/// Convert a stored document into a record.
///
/// Returns `None` when the document has no string `country_code`.
pub fn record_from_document(doc: &Document) -> Option<TrendRecord> {
    let country_code = doc.get_str("country_code").ok()?.to_string();

    let keywords = match doc.get("keywords") {
        Some(Bson::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Bson::Document(entry) => keyword_from_document(entry, index + 1),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Some(TrendRecord {
        country_code,
        country_name: doc.get_str("country_name").ok().map(str::to_string),
        updated_at: timestamp(doc.get("updated_at")),
        keywords,
    })
}

/// Project a stored keyword entry. `position` is 1-based and stands in for a
/// missing rank.
fn keyword_from_document(doc: &Document, position: usize) -> Option<KeywordEntry> {
    let keyword = doc.get_str("keyword").ok()?.to_string();

    let rank = doc
        .get("rank")
        .and_then(as_u64)
        .and_then(|rank| u32::try_from(rank).ok())
        .filter(|rank| *rank > 0)
        .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));

    let explanations = match doc.get("explanations") {
        Some(Bson::Document(map)) => map
            .iter()
            .filter_map(|(lang, text)| text.as_str().map(|t| (lang.clone(), t.to_string())))
            .collect(),
        _ => BTreeMap::new(),
    };

    Some(KeywordEntry {
        rank,
        keyword,
        explanations,
        news_count: news_count(doc),
    })
}

/// `news_count` wins; a `news_articles` list is counted by length.
fn news_count(doc: &Document) -> u64 {
    if let Some(count) = doc.get("news_count").and_then(as_u64) {
        return count;
    }
    match doc.get("news_articles") {
        Some(Bson::Array(articles)) => articles.len() as u64,
        _ => 0,
    }
}

fn as_u64(value: &Bson) -> Option<u64> {
    match value {
        Bson::Int32(v) => u64::try_from(*v).ok(),
        Bson::Int64(v) => u64::try_from(*v).ok(),
        Bson::Double(v) if v.is_finite() && *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}

fn timestamp(value: Option<&Bson>) -> Option<DateTime<Utc>> {
    match value? {
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        Bson::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::{doc, DateTime as BsonDateTime};

    #[test]
    fn test_missing_optional_fields_get_defaults() {
        let stored = doc! {
            "country_code": "KR",
            "keywords": [{ "rank": 1, "keyword": "foo" }],
        };

        let record = record_from_document(&stored).unwrap();
        assert_eq!(record.country_code, "KR");
        assert_eq!(record.country_name, None);
        assert_eq!(record.updated_at, None);
        assert_eq!(record.keywords, vec![KeywordEntry::new(1, "foo")]);
    }

    #[test]
    fn test_complete_document() {
        let updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let stored = doc! {
            "_id": "665f1c",
            "country_code": "US",
            "country_name": "United States",
            "updated_at": "2024-05-01T09:00:00Z",
            "keywords": [{
                "rank": 1,
                "keyword": "bar",
                "explanations": { "en": "Playoff game", "ko": "플레이오프" },
                "news_articles": [{ "title": "x" }, { "title": "y" }],
                "trend_score": 98.5,
            }],
        };

        let expected = TrendRecord::new("US")
            .with_name("United States")
            .with_updated_at(updated_at)
            .with_keyword(
                KeywordEntry::new(1, "bar")
                    .with_explanation("en", "Playoff game")
                    .with_explanation("ko", "플레이오프")
                    .with_news_count(2),
            );
        assert_eq!(record_from_document(&stored), Some(expected));
    }

    #[test]
    fn test_document_without_country_code_is_rejected() {
        assert!(record_from_document(&doc! { "keywords": [] }).is_none());
        assert!(record_from_document(&doc! { "country_code": 42 }).is_none());
    }

    #[test]
    fn test_news_articles_list_is_counted() {
        let stored = doc! {
            "country_code": "US",
            "keywords": [
                { "rank": 1, "keyword": "a", "news_articles": [{ "title": "x" }, { "title": "y" }] },
                { "rank": 2, "keyword": "b", "news_count": 5_i64 },
                { "rank": 3, "keyword": "c", "news_count": 4, "news_articles": [] },
            ],
        };

        let record = record_from_document(&stored).unwrap();
        let counts: Vec<u64> = record.keywords.iter().map(|k| k.news_count).collect();
        assert_eq!(counts, vec![2, 5, 4]);
    }

    #[test]
    fn test_explanations_keep_only_strings() {
        let stored = doc! {
            "country_code": "JP",
            "keywords": [{
                "rank": 1,
                "keyword": "k",
                "explanations": { "en": "why", "ko": "이유", "de": null },
            }],
        };

        let record = record_from_document(&stored).unwrap();
        let explanations = &record.keywords[0].explanations;
        assert_eq!(explanations.len(), 2);
        assert_eq!(explanations["en"], "why");
        assert_eq!(explanations["ko"], "이유");
    }

    #[test]
    fn test_rank_falls_back_to_position() {
        let stored = doc! {
            "country_code": "GB",
            "keywords": [
                { "keyword": "first" },
                { "rank": 0, "keyword": "second" },
                { "rank": 7.0, "keyword": "third" },
                { "rank": 4 },
                "not a document",
            ],
        };

        let record = record_from_document(&stored).unwrap();
        let ranks: Vec<(u32, &str)> = record
            .keywords
            .iter()
            .map(|k| (k.rank, k.keyword.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "first"), (2, "second"), (7, "third")]);
    }

    #[test]
    fn test_updated_at_accepts_bson_datetime_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let from_bson = doc! {
            "country_code": "US",
            "updated_at": BsonDateTime::from_millis(expected.timestamp_millis()),
        };
        let from_text = doc! {
            "country_code": "US",
            "updated_at": "2024-05-01T12:30:00+00:00",
        };
        let garbage = doc! { "country_code": "US", "updated_at": "yesterday" };

        assert_eq!(record_from_document(&from_bson).unwrap().updated_at, Some(expected));
        assert_eq!(record_from_document(&from_text).unwrap().updated_at, Some(expected));
        assert_eq!(record_from_document(&garbage).unwrap().updated_at, None);
    }
}
