//! Remote query construction
//!
//! A dimension whose terms resolved to nothing is left out of the query
//! entirely: it means "no filter", never "match nothing".

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{NewsError, Result};
use crate::request::FilterRequest;
use crate::vocabulary::TaxonomyId;

/// Sort order requested from the news service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    /// Creation time, most recent first
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortKey {
    /// Wire name of the sort key
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
        }
    }
}

/// Fully-formed parameter set sent to the news service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsQuery {
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Vec<TaxonomyId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<Vec<TaxonomyId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<Vec<TaxonomyId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_after: Option<DateTime<Utc>>,
}

fn non_empty(ids: &[TaxonomyId]) -> Option<Vec<TaxonomyId>> {
    (!ids.is_empty()).then(|| ids.to_vec())
}

impl NewsQuery {
    /// Build the query for `request` from the resolved id lists
    ///
    /// Fails with [`NewsError::InvalidDate`] when `fetchAfter` is supplied but
    /// cannot be parsed.
    pub fn build(
        request: &FilterRequest,
        category_ids: &[TaxonomyId],
        sub_category_ids: &[TaxonomyId],
        token_ids: &[TaxonomyId],
    ) -> Result<Self> {
        let fetch_after = request.fetch_after().map(parse_fetch_after).transpose()?;

        Ok(Self {
            limit: request.limit(),
            offset: request.offset(),
            sort_by: SortKey::CreatedAt,
            category_id: non_empty(category_ids),
            sub_category_id: non_empty(sub_category_ids),
            token_id: non_empty(token_ids),
            search_query: request.search_query().map(str::to_string),
            fetch_after,
        })
    }

    /// Render as URL query parameters; id lists become repeated keys
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
        ];

        for (key, ids) in [
            ("categoryId", &self.category_id),
            ("subCategoryId", &self.sub_category_id),
            ("tokenId", &self.token_id),
        ] {
            if let Some(ids) = ids {
                pairs.extend(ids.iter().map(|id| (key, id.to_string())));
            }
        }

        if let Some(search) = &self.search_query {
            pairs.push(("searchQuery", search.clone()));
        }

        if let Some(after) = &self.fetch_after {
            pairs.push((
                "fetchAfter",
                after.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }

        pairs
    }
}

/// Zoned forms tried after RFC 3339; `%#z` takes `Z`, `+08`, `+0800` and `+08:00`
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Forms without an offset, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 lower bound into a UTC instant
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, `2024-01-01T08:00:00+08:00`),
/// minute precision, a space separator and basic-format offsets (`+0000`).
/// Offset-less date-times, bare dates and `YYYY-MM` (first of the month) are
/// read as UTC.
pub fn parse_fetch_after(raw: &str) -> Result<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ZONED_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"));

    if let Some(midnight) = date.ok().and_then(|date| date.and_hms_opt(0, 0, 0)) {
        return Ok(midnight.and_utc());
    }

    Err(NewsError::InvalidDate {
        provided: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn ids(raw: &[u32]) -> Vec<TaxonomyId> {
        raw.iter().copied().map(TaxonomyId).collect()
    }

    #[test]
    fn test_defaults_and_fixed_sort() {
        let query = NewsQuery::build(&FilterRequest::default(), &[], &[], &[]).unwrap();

        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert_eq!(query.sort_by, SortKey::CreatedAt);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"limit": 10, "offset": 0, "sortBy": "createdAt"})
        );
    }

    #[test]
    fn test_empty_dimensions_are_omitted() {
        let query = NewsQuery::build(&FilterRequest::default(), &ids(&[8]), &[], &[]).unwrap();
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(value["categoryId"], json!([8]));
        assert!(value.get("subCategoryId").is_none());
        assert!(value.get("tokenId").is_none());
    }

    #[test]
    fn test_all_three_dimensions() {
        let query =
            NewsQuery::build(&FilterRequest::default(), &ids(&[5]), &ids(&[15]), &ids(&[79]))
                .unwrap();

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "limit": 10,
                "offset": 0,
                "sortBy": "createdAt",
                "categoryId": [5],
                "subCategoryId": [15],
                "tokenId": [79]
            })
        );
    }

    #[test]
    fn test_search_query_only_when_non_empty() {
        let request = FilterRequest {
            search_query: Some(String::new()),
            ..Default::default()
        };
        let query = NewsQuery::build(&request, &[], &[], &[]).unwrap();
        assert!(query.search_query.is_none());

        let request = FilterRequest {
            search_query: Some("bitcoin etf".to_string()),
            ..Default::default()
        };
        let query = NewsQuery::build(&request, &[], &[], &[]).unwrap();
        assert_eq!(query.search_query.as_deref(), Some("bitcoin etf"));
    }

    #[test]
    fn test_malformed_fetch_after_is_rejected() {
        let request = FilterRequest {
            fetch_after: Some("not-a-date".to_string()),
            ..Default::default()
        };

        match NewsQuery::build(&request, &[], &[], &[]) {
            Err(NewsError::InvalidDate { provided }) => assert_eq!(provided, "not-a-date"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_after_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for raw in [
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T08:00:00+08:00",
            "2024-01-01T00:00:00",
            "2024-01-01T00:00",
            "2024-01-01T00:00Z",
            "2024-01-01T02:00+02:00",
            "2024-01-01T00:00:00+0000",
            "2024-01-01T08:00:00+08",
            "2024-01-01 00:00:00",
            "2024-01-01 00:00:00.000",
            "2024-01-01 00:00",
            "2024-01-01 05:30:00+05:30",
            "2024-01-01",
            "2024-01",
            " 2024-01-01T00:00:00Z ",
        ] {
            assert_eq!(parse_fetch_after(raw).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_fetch_after_rejects_impossible_dates() {
        for raw in [
            "2024-13-01",
            "2024-13",
            "2024-02-30T00:00:00Z",
            "2024-01-01T25:00Z",
            "yesterday",
            "1704067200",
        ] {
            assert!(
                matches!(parse_fetch_after(raw), Err(NewsError::InvalidDate { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_query_pairs() {
        let request = FilterRequest {
            search_query: Some("halving".to_string()),
            fetch_after: Some("2024-01-01".to_string()),
            limit: Some(5),
            offset: Some(10),
            ..Default::default()
        };
        let query = NewsQuery::build(&request, &ids(&[5, 8]), &[], &ids(&[79])).unwrap();

        assert_eq!(
            query.query_pairs(),
            vec![
                ("limit", "5".to_string()),
                ("offset", "10".to_string()),
                ("sortBy", "createdAt".to_string()),
                ("categoryId", "5".to_string()),
                ("categoryId", "8".to_string()),
                ("tokenId", "79".to_string()),
                ("searchQuery", "halving".to_string()),
                ("fetchAfter", "2024-01-01T00:00:00.000Z".to_string()),
            ]
        );
    }
}
