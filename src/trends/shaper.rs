//! Response shaping
//!
//! Ordering policies for multi-country responses and the success envelopes
//! wrapped around them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::TrendRecord;

/// Countries in display priority order
pub const COUNTRY_PRIORITY: [&str; 11] = [
    "US", "CA", "AU", "GB", "DE", "FR", "NO", "SE", "JP", "KR", "SG",
];

/// Advisory message when the collection is empty
pub const NO_DATA_MESSAGE: &str = "No trends data available yet";

/// How multi-record responses are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortPolicy {
    /// Position in [`COUNTRY_PRIORITY`]; unlisted codes last
    #[default]
    Priority,
    /// Newest `updated_at` first; records without a timestamp last
    Recency,
}

impl SortPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortPolicy::Priority => "priority",
            SortPolicy::Recency => "recency",
        }
    }
}

impl FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(SortPolicy::Priority),
            "recency" => Ok(SortPolicy::Recency),
            other => Err(format!("unknown sort policy '{}'", other)),
        }
    }
}

/// Position of a country code in the priority list, or the list length
pub fn priority_rank(country_code: &str) -> usize {
    COUNTRY_PRIORITY
        .iter()
        .position(|code| *code == country_code)
        .unwrap_or(COUNTRY_PRIORITY.len())
}

/// Sort records in place. Both policies are stable.
pub fn sort_records(records: &mut [TrendRecord], policy: SortPolicy) {
    match policy {
        SortPolicy::Priority => records.sort_by_key(|r| priority_rank(&r.country_code)),
        SortPolicy::Recency => records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
}

/// Envelope for `GET /api/trends`
#[derive(Debug, Serialize)]
pub struct TrendListResponse {
    pub success: bool,
    pub data: Vec<TrendRecord>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for `GET /api/trends/{country}`
#[derive(Debug, Serialize)]
pub struct TrendDetailResponse {
    pub success: bool,
    pub data: TrendRecord,
}

/// Order records and wrap them in the list envelope.
///
/// An empty collection is a success with an advisory message.
pub fn list_response(mut records: Vec<TrendRecord>, policy: SortPolicy) -> TrendListResponse {
    if records.is_empty() {
        return TrendListResponse {
            success: true,
            data: Vec::new(),
            count: 0,
            last_updated: None,
            message: Some(NO_DATA_MESSAGE.to_string()),
        };
    }

    sort_records(&mut records, policy);
    let last_updated = records.iter().filter_map(|r| r.updated_at).max();

    TrendListResponse {
        success: true,
        count: records.len(),
        data: records,
        last_updated,
        message: None,
    }
}

pub fn detail_response(record: TrendRecord) -> TrendDetailResponse {
    TrendDetailResponse {
        success: true,
        data: record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn codes(records: &[TrendRecord]) -> Vec<&str> {
        records.iter().map(|r| r.country_code.as_str()).collect()
    }

    #[test]
    fn test_priority_order_matches_list() {
        let mut records: Vec<TrendRecord> = COUNTRY_PRIORITY
            .iter()
            .rev()
            .map(|code| TrendRecord::new(*code))
            .collect();

        sort_records(&mut records, SortPolicy::Priority);
        assert_eq!(codes(&records), COUNTRY_PRIORITY.to_vec());
    }

    #[test]
    fn test_unlisted_codes_sort_last_in_stored_order() {
        let mut records = vec![
            TrendRecord::new("BR"),
            TrendRecord::new("KR"),
            TrendRecord::new("IN"),
            TrendRecord::new("US"),
        ];

        sort_records(&mut records, SortPolicy::Priority);
        assert_eq!(codes(&records), vec!["US", "KR", "BR", "IN"]);
    }

    #[test]
    fn test_recency_order_newest_first() {
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        let mut records = vec![
            TrendRecord::new("US").with_updated_at(day(1)),
            TrendRecord::new("XX"),
            TrendRecord::new("KR").with_updated_at(day(3)),
            TrendRecord::new("JP").with_updated_at(day(2)),
        ];

        sort_records(&mut records, SortPolicy::Recency);
        assert_eq!(codes(&records), vec!["KR", "JP", "US", "XX"]);
    }

    #[test]
    fn test_empty_list_is_success_with_message() {
        let response = list_response(Vec::new(), SortPolicy::Priority);
        assert!(response.success);
        assert_eq!(response.count, 0);
        assert_eq!(response.message.as_deref(), Some(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_last_updated_is_newest_timestamp() {
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let records = vec![
            TrendRecord::new("KR").with_updated_at(newer),
            TrendRecord::new("US").with_updated_at(older),
        ];

        let response = list_response(records, SortPolicy::Priority);
        assert_eq!(response.count, 2);
        assert_eq!(response.last_updated, Some(newer));
        assert_eq!(response.data[0].country_code, "US");
        assert!(response.message.is_none());
    }

    #[test]
    fn test_sort_policy_parsing() {
        assert_eq!("priority".parse::<SortPolicy>(), Ok(SortPolicy::Priority));
        assert_eq!(" Recency ".parse::<SortPolicy>(), Ok(SortPolicy::Recency));
        assert!("alphabetical".parse::<SortPolicy>().is_err());
    }
}
