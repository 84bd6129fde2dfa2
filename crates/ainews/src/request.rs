//! Caller-supplied filter request

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::error::{NewsError, Result};
use crate::resolver::terms_from_value;
use crate::vocabulary::Dimension;

/// Default page size when the caller does not supply `limit`
pub const DEFAULT_LIMIT: u32 = 10;

/// Default page offset when the caller does not supply `offset`
pub const DEFAULT_OFFSET: u32 = 0;

/// Input of one `getAINews` invocation
///
/// Term lists are parsed leniently: a value that is not a list is treated as
/// absent, and non-string elements are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default, deserialize_with = "lenient_terms")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_terms")]
    pub blockchains: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_terms")]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub fetch_after: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(skip)]
    pub(crate) supplied: SuppliedTerms,
}

/// Term values exactly as the caller sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SuppliedTerms {
    categories: Option<Value>,
    blockchains: Option<Value>,
    tokens: Option<Value>,
}

impl SuppliedTerms {
    fn capture(params: &Value) -> Self {
        let field = |dimension: Dimension| {
            params
                .get(dimension.request_field())
                .filter(|value| !value.is_null())
                .cloned()
        };

        Self {
            categories: field(Dimension::Category),
            blockchains: field(Dimension::Network),
            tokens: field(Dimension::Token),
        }
    }

    fn get(&self, dimension: Dimension) -> Option<&Value> {
        match dimension {
            Dimension::Category => self.categories.as_ref(),
            Dimension::Network => self.blockchains.as_ref(),
            Dimension::Token => self.tokens.as_ref(),
        }
    }
}

fn lenient_terms<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(terms_from_value))
}

impl FilterRequest {
    /// Parse tool parameters; `null` is accepted as an empty request
    pub fn from_params(params: Value) -> Result<Self> {
        if params.is_null() {
            return Ok(Self::default());
        }
        if !params.is_object() {
            return Err(NewsError::InvalidRequest(
                "parameters must be a JSON object".to_string(),
            ));
        }

        let supplied = SuppliedTerms::capture(&params);
        let mut request: Self = serde_json::from_value(params)
            .map_err(|e| NewsError::InvalidRequest(e.to_string()))?;
        request.supplied = supplied;
        Ok(request)
    }

    /// Parsed string terms for one dimension
    pub fn terms(&self, dimension: Dimension) -> Option<&[String]> {
        match dimension {
            Dimension::Category => self.categories.as_deref(),
            Dimension::Network => self.blockchains.as_deref(),
            Dimension::Token => self.tokens.as_deref(),
        }
    }

    /// Terms for one dimension as the caller sent them, `[]` when absent
    ///
    /// Unlike [`FilterRequest::terms`], malformed values are returned untouched.
    pub fn supplied_terms(&self, dimension: Dimension) -> Value {
        match self.supplied.get(dimension) {
            Some(value) => value.clone(),
            None => json!(self.terms(dimension).unwrap_or_default()),
        }
    }

    /// Page size, defaulting to 10
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Page offset, defaulting to 0
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(DEFAULT_OFFSET)
    }

    /// Search text, if non-empty
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref().filter(|q| !q.is_empty())
    }

    /// Lower-bound date string, if non-empty
    pub fn fetch_after(&self) -> Option<&str> {
        self.fetch_after.as_deref().filter(|d| !d.is_empty())
    }
}
