//! Uniform success/error envelope returned to the calling agent
//!
//! Both outcomes serialize to one JSON object whose `status` field is the
//! discriminator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::api::NewsResponse;
use crate::error::{FailureCategory, NewsError};
use crate::request::FilterRequest;
use crate::resolver::ResolvedFilters;
use crate::vocabulary::{Dimension, TaxonomyId};

/// Outcome of one invocation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Success {
        metadata: Metadata,
        data: Vec<Value>,
    },
    Error(Failure),
}

/// Metadata attached to a successful result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub total_results: usize,
    pub limit: u32,
    pub offset: u32,
    pub applied_filters: AppliedFilters,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub timestamp: String,
}

/// Raw caller filters, echoed for audit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub categories: Value,
    pub blockchains: Value,
    pub tokens: Value,
    pub search_query: Option<String>,
    pub fetch_after: Option<String>,
    pub mapped_ids: MappedIds,
}

/// Resolved ids per dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedIds {
    pub category_ids: Vec<TaxonomyId>,
    pub sub_category_ids: Vec<TaxonomyId>,
    pub token_ids: Vec<TaxonomyId>,
}

impl From<&ResolvedFilters> for MappedIds {
    fn from(resolved: &ResolvedFilters) -> Self {
        Self {
            category_ids: resolved.categories.ids.clone(),
            sub_category_ids: resolved.networks.ids.clone(),
            token_ids: resolved.tokens.ids.clone(),
        }
    }
}

/// Structured failure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub message: String,
    pub error_type: FailureCategory,
    #[serde(flatten)]
    pub context: Map<String, Value>,
    pub timestamp: String,
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ResultEnvelope {
    /// Wrap a successful fetch together with the filters that produced it
    pub fn success(
        request: &FilterRequest,
        resolved: &ResolvedFilters,
        response: NewsResponse,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let data = response.data;

        Self::Success {
            metadata: Metadata {
                total_results: data.len(),
                limit: request.limit(),
                offset: request.offset(),
                applied_filters: AppliedFilters {
                    categories: request.supplied_terms(Dimension::Category),
                    blockchains: request.supplied_terms(Dimension::Network),
                    tokens: request.supplied_terms(Dimension::Token),
                    search_query: request.search_query().map(str::to_string),
                    fetch_after: request.fetch_after().map(str::to_string),
                    mapped_ids: MappedIds::from(resolved),
                },
                warnings: resolved.warnings(),
                timestamp: iso_timestamp(generated_at),
            },
            data,
        }
    }

    /// Describe a failure
    pub fn failure(error: &NewsError, generated_at: DateTime<Utc>) -> Self {
        Self::Error(Failure {
            message: error.to_string(),
            error_type: error.category(),
            context: error.context(),
            timestamp: iso_timestamp(generated_at),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Failure category, if this is an error envelope
    pub fn error_type(&self) -> Option<FailureCategory> {
        match self {
            Self::Success { .. } => None,
            Self::Error(failure) => Some(failure.error_type),
        }
    }

    /// JSON form of the envelope
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            json!({
                "status": "error",
                "message": format!("Failed to encode result: {e}"),
                "errorType": FailureCategory::UnexpectedFailure,
            })
        })
    }

    /// Pretty-printed JSON text payload
    pub fn to_text(&self) -> String {
        let value = self.to_value();
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}
